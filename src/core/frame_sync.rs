use log::{debug, info};

use super::context::PlatformContext;
use super::events::{Event, EventBus, Poster, Request};
use super::host::Host;
use super::scale::native_scale_of;
use super::window::NativeWindow;

/// What the post-frame boundary observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriftOutcome {
    /// First measurement; nothing to compare against yet
    FirstObservation(f32),
    Unchanged(f32),
    Drifted { previous: f32, current: f32 },
}

/// Runs around every rendered frame and reconciles scale and size with the
/// host. Drift detection is edge-triggered: only a change between two
/// consecutive post-frame measurements produces a notification.
#[derive(Debug, Default)]
pub struct FrameSync {
    frames: u64,
}

impl FrameSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Entry boundary. Scale information is only reliable once the host has
    /// applied pending layout, so nothing is corrected here.
    pub fn begin_frame(&mut self) {}

    /// Exit boundary: detect drift, pin the window to the wrapper size and
    /// remember the scale for the next frame.
    pub fn end_frame(
        &mut self,
        ctx: &mut PlatformContext,
        window: &mut dyn NativeWindow,
        host: &dyn Host,
        events: &EventBus,
        requests: &Poster<Request>,
    ) -> DriftOutcome {
        let current = native_scale_of(window);

        let outcome = match ctx.prior_scale {
            None => DriftOutcome::FirstObservation(current),
            Some(previous) if previous != current => {
                info!(
                    "DPI changed from {} to {} at frame {}",
                    previous, current, self.frames
                );
                events.post(Event::DpiChanged { previous, current });
                ctx.native_scale = native_scale_of(window);
                requests.post(Request::ReapplyCurrentTheme);
                DriftOutcome::Drifted { previous, current }
            }
            Some(_) => DriftOutcome::Unchanged(current),
        };

        // The window's logical size follows the wrapper, not the other way round
        match host.wrapper_size() {
            Some(size) => window.set_size(size),
            None => debug!("Host has no wrapper size, keeping window size"),
        }

        ctx.prior_scale = Some(current);
        self.frames += 1;
        outcome
    }
}
