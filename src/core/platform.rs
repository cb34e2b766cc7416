use std::rc::Rc;

use super::app::{apply_request, Application, InputSink};
use super::bridge::{HostBridge, HostSender};
use super::context::PlatformContext;
use super::events::{Event, EventBus, Mailbox, Request};
use super::frame_sync::{DriftOutcome, FrameSync};
use super::host::Host;
use super::window::NativeWindow;
use crate::config::Settings;

/// Platform window-adaptation layer.
///
/// Owns the process-wide [`PlatformContext`], the event bus and the request
/// mailbox, borrows the native window for its whole life and shares the host
/// with the callbacks it registers. Everything runs on the host loop thread.
///
/// Typical loop:
///
/// ```text
/// platform.setup();
/// loop {
///     platform.pump_host(&mut ui);
///     platform.begin_frame();
///     /* frame body */
///     platform.end_frame();
///     let events = platform.process_events();
///     platform.apply_requests(&mut app);
/// }
/// ```
pub struct Platform<W: NativeWindow, H: Host + 'static> {
    pub(crate) window: W,
    pub(crate) host: Rc<H>,
    pub(crate) settings: Settings,
    pub(crate) ctx: PlatformContext,
    pub(crate) events: EventBus,
    pub(crate) requests: Mailbox<Request>,
    pub(crate) bridge: HostBridge,
    pub(crate) frame_sync: FrameSync,
}

impl<W: NativeWindow, H: Host + 'static> Platform<W, H> {
    pub fn new(window: W, host: Rc<H>, settings: Settings) -> Self {
        Self {
            window,
            host,
            settings,
            ctx: PlatformContext::new(),
            events: EventBus::new(),
            requests: Mailbox::new(),
            bridge: HostBridge::new(),
            frame_sync: FrameSync::new(),
        }
    }

    pub fn context(&self) -> &PlatformContext {
        &self.ctx
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// Sender for host-originated notifications
    pub fn host_sender(&self) -> HostSender {
        self.bridge.sender()
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_sync.frame_count()
    }

    /// Drain host notifications and run deferred host completions
    pub fn pump_host(&mut self, input: &mut dyn InputSink) -> usize {
        self.host.run_pending();
        self.bridge.pump(
            &mut self.ctx,
            &mut self.window,
            self.host.as_ref(),
            &self.events,
            input,
        )
    }

    pub fn begin_frame(&mut self) {
        self.frame_sync.begin_frame();
    }

    pub fn end_frame(&mut self) -> DriftOutcome {
        let requests = self.requests.poster();
        self.frame_sync.end_frame(
            &mut self.ctx,
            &mut self.window,
            self.host.as_ref(),
            &self.events,
            &requests,
        )
    }

    /// Run subscribers over queued events and return them for other consumers
    pub fn process_events(&mut self) -> Vec<Event> {
        self.events.process()
    }

    /// Queued requests, in posting order
    pub fn take_requests(&mut self) -> Vec<Request> {
        self.requests.drain()
    }

    /// Carry out every queued request against `app`
    pub fn apply_requests<A: Application + ?Sized>(&mut self, app: &mut A) -> usize {
        let requests = self.take_requests();
        let count = requests.len();
        for request in requests {
            apply_request(app, request, self.ctx.native_scale);
        }
        count
    }
}
