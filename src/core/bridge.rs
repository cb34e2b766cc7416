use log::debug;

use super::app::InputSink;
use super::context::{PlatformContext, PointerMode, ThemePreference};
use super::events::{Event, EventBus, Mailbox, Poster};
use super::host::Host;
use super::window::{NativeWindow, WindowDimensions};

/// Notification originating in the host, outside the frame cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMessage {
    ThemeChanged,
    FramebufferResized { width: i32, height: i32 },
    EnterPointerMode(PointerMode),
}

/// Handed to host callbacks; posting never blocks and never re-enters
/// application code
pub type HostSender = Poster<HostMessage>;

/// Host event bridge.
///
/// Host callbacks only enqueue [`HostMessage`]s. The main loop drains them
/// with [`HostBridge::pump`], so every handler runs on the loop thread between
/// frames. Handlers are idempotent: duplicates and reordering are harmless.
pub struct HostBridge {
    inbox: Mailbox<HostMessage>,
}

impl HostBridge {
    pub fn new() -> Self {
        Self {
            inbox: Mailbox::new(),
        }
    }

    pub fn sender(&self) -> HostSender {
        self.inbox.poster()
    }

    /// Handle every queued host message, returning how many were handled
    pub fn pump(
        &mut self,
        ctx: &mut PlatformContext,
        window: &mut dyn NativeWindow,
        host: &dyn Host,
        events: &EventBus,
        input: &mut dyn InputSink,
    ) -> usize {
        let messages = self.inbox.drain();
        for message in &messages {
            debug!("Host message: {:?}", message);
            match *message {
                HostMessage::ThemeChanged => {
                    ctx.theme = ThemePreference::from_dark(host.prefers_dark());
                    events.post(Event::OsThemeChanged);
                }
                HostMessage::FramebufferResized { width, height } => {
                    window.set_size(WindowDimensions::new(width, height));
                }
                HostMessage::EnterPointerMode(mode) => {
                    ctx.pointer_mode = mode;
                    input.add_mouse_source_event(mode);
                    events.post(Event::InputModeChanged(mode));
                }
            }
        }
        messages.len()
    }
}

impl Default for HostBridge {
    fn default() -> Self {
        Self::new()
    }
}
