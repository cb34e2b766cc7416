use super::context::PointerMode;
use super::events::Request;

/// Application theme switching
pub trait ThemeManager {
    /// Switch to the named theme ("Light" or "Dark")
    fn change_theme(&mut self, name: &str);

    /// Re-apply the active theme; colors and sizes depend on `native_scale`
    fn reapply_current_theme(&mut self, native_scale: f32);
}

/// Immediate-mode UI input state, fed by explicit pushes
pub trait InputSink {
    fn add_mouse_source_event(&mut self, source: PointerMode);
}

/// Keyboard-shortcut interpretation
pub trait ShortcutSink {
    /// Interpret the primary modifier with the macOS (Cmd) convention
    fn enable_macos_mode(&mut self);
}

pub trait FrameRenderer {
    /// Render one complete frame synchronously
    fn full_frame(&mut self);
}

/// Everything the platform layer can ask of the application
pub trait Application: ThemeManager + InputSink + ShortcutSink + FrameRenderer {}

impl<T: ThemeManager + InputSink + ShortcutSink + FrameRenderer> Application for T {}

/// Carry out one request against the application
pub fn apply_request<A: Application + ?Sized>(app: &mut A, request: Request, native_scale: f32) {
    match request {
        Request::ChangeTheme(name) => app.change_theme(&name),
        Request::ReapplyCurrentTheme => app.reapply_current_theme(native_scale),
        Request::EnableMacOsShortcuts => app.enable_macos_mode(),
        Request::FullFrameRender => app.full_frame(),
    }
}
