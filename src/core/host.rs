use thiserror::Error;
use winit::event::WindowEvent;
use winit::window::Window;

use super::bridge::HostSender;
use super::window::WindowDimensions;

/// Keyboard-modifier convention of the host platform, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformFamily {
    #[default]
    Standard,
    /// Apple-derived browser or OS: Cmd takes the role of Ctrl
    AppleModifiers,
}

/// Failures surfaced by a host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host element not found: {0}")]
    MissingElement(String),

    #[error("{0}")]
    Storage(String),

    #[error("host call failed: {0}")]
    Js(String),
}

/// Completion of a durable storage mount, run on a later host turn
pub type MountCallback = Box<dyn FnOnce(Result<(), HostError>)>;

/// Capabilities of the environment hosting the canvas.
///
/// Every call happens on the host loop thread. Listener registration is
/// permanent: there is no way to unregister and the host may fire any number
/// of notifications in any order.
pub trait Host {
    /// Current color-scheme preference
    fn prefers_dark(&self) -> bool;

    fn platform_family(&self) -> PlatformFamily;

    /// Content-box size of the wrapper element that defines the logical
    /// window size, if the host has one
    fn wrapper_size(&self) -> Option<WindowDimensions>;

    /// Blocking, user-visible message
    fn alert(&self, message: &str);

    /// Pin the canvas in place (splash layout) or release it
    fn set_canvas_fixed(&self, fixed: bool);

    /// Mount durable storage at `path` and start an asynchronous sync.
    /// `done` runs later, exactly once.
    fn mount_storage(&self, path: &str, done: MountCallback);

    /// Whether a mount completed successfully and storage is usable
    fn storage_mounted(&self) -> bool;

    fn listen_theme_changes(&self, sender: HostSender);

    fn listen_pointer_modes(&self, sender: HostSender);

    /// Publish the script-callable entry points (theme change, framebuffer
    /// resize, pointer modes) so they post into `sender`
    fn expose_entry_points(&self, _sender: HostSender) {}

    /// Run completions the host deferred to a later turn
    fn run_pending(&self) {}

    /// Called once the native window exists, before setup
    fn attach_window(&self, _window: &Window) {}

    /// Observe a native window event; hosts without their own notification
    /// source translate these into bridge messages
    fn observe_window_event(&self, _event: &WindowEvent) {}
}
