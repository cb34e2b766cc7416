use std::path::PathBuf;

use log::{debug, warn};

use crate::core::{InputSink, PointerMode, PlatformContext, ShortcutSink, ThemeManager};

/// Interaction size egui uses for mouse input
const MOUSE_INTERACT_SIZE: egui::Vec2 = egui::vec2(40.0, 18.0);
/// Larger hit targets once the host reports touch input
const TOUCH_INTERACT_SIZE: egui::Vec2 = egui::vec2(48.0, 32.0);

/// Immediate-mode UI side of the application: owns the egui context and
/// applies theme, scale, pointer-source and shortcut changes to it.
pub struct EguiShell {
    ctx: egui::Context,
    theme: egui::Theme,
    pointer_mode: PointerMode,
    last_drop: Option<PathBuf>,
    show_status: bool,
}

impl EguiShell {
    pub fn new(show_status: bool) -> Self {
        Self {
            ctx: egui::Context::default(),
            theme: egui::Theme::Dark,
            pointer_mode: PointerMode::Mouse,
            last_drop: None,
            show_status,
        }
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    pub fn theme(&self) -> egui::Theme {
        self.theme
    }

    pub fn pointer_mode(&self) -> PointerMode {
        self.pointer_mode
    }

    pub fn set_last_drop(&mut self, path: PathBuf) {
        self.last_drop = Some(path);
    }

    /// Run one UI pass
    pub fn run(&mut self, raw_input: egui::RawInput, platform: &PlatformContext) -> egui::FullOutput {
        let show_status = self.show_status;
        let last_drop = self.last_drop.clone();
        self.ctx.run(raw_input, |ctx| {
            if !show_status {
                return;
            }
            egui::Window::new("Platform")
                .resizable(false)
                .fixed_pos(egui::pos2(10.0, 10.0))
                .show(ctx, |ui| {
                    ui.label(format!("Native scale: {:.2}", platform.native_scale()));
                    ui.label(format!("Theme: {}", platform.theme().theme_name()));
                    ui.label(format!("Pointer: {:?}", platform.pointer_mode()));
                    if let Some(path) = &last_drop {
                        ui.label(format!("Dropped: {}", path.display()));
                    }
                });
        })
    }

    fn apply_pointer_style(&self) {
        let size = match self.pointer_mode {
            PointerMode::Mouse => MOUSE_INTERACT_SIZE,
            PointerMode::Touch => TOUCH_INTERACT_SIZE,
        };
        self.ctx
            .all_styles_mut(|style| style.spacing.interact_size = size);
    }
}

impl ThemeManager for EguiShell {
    fn change_theme(&mut self, name: &str) {
        let theme = match name {
            "Light" => egui::Theme::Light,
            "Dark" => egui::Theme::Dark,
            other => {
                warn!("Unknown theme {:?}, keeping {:?}", other, self.theme);
                return;
            }
        };
        debug!("Switching to theme {:?}", theme);
        self.theme = theme;
        self.ctx.set_theme(theme);
    }

    fn reapply_current_theme(&mut self, native_scale: f32) {
        debug!("Re-applying theme {:?} at scale {}", self.theme, native_scale);
        self.ctx.set_pixels_per_point(native_scale);
        self.ctx.set_theme(self.theme);
        self.apply_pointer_style();
    }
}

impl InputSink for EguiShell {
    fn add_mouse_source_event(&mut self, source: PointerMode) {
        self.pointer_mode = source;
        self.apply_pointer_style();
    }
}

impl ShortcutSink for EguiShell {
    fn enable_macos_mode(&mut self) {
        self.ctx.set_os(egui::os::OperatingSystem::Mac);
    }
}
