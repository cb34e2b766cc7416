use std::rc::Rc;

use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::OsError,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::WindowId,
};

use crate::config::Settings;
use crate::core::{
    apply_request, Event, FrameRenderer, Host, InputSink, Platform, PointerMode, ShortcutSink,
    ThemeManager, WindowHints,
};
use crate::ui::EguiShell;
use crate::window::WinitWindow;

const WINDOW_TITLE: &str = "Canvas Bridge";

/// egui asks for a repaint after input it handled, even when it consumed it
fn wants_redraw(response: &egui_winit::EventResponse) -> bool {
    response.repaint
}

/// Frame loop driving the platform layer from a winit event loop
pub struct Driver<H: Host + 'static> {
    settings: Settings,
    host: Rc<H>,
    platform: Option<Platform<WinitWindow, H>>,
    shell: EguiShell,
    egui_state: Option<egui_winit::State>,
}

impl<H: Host + 'static> Driver<H> {
    pub fn new(settings: Settings, host: Rc<H>, show_status: bool) -> Self {
        Self {
            settings,
            host,
            platform: None,
            shell: EguiShell::new(show_status),
            egui_state: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), OsError> {
        let hints = WindowHints::from_settings(&self.settings);
        let window = WinitWindow::create(
            event_loop,
            &hints,
            WINDOW_TITLE,
            LogicalSize::new(self.settings.initial_width, self.settings.initial_height),
        )?;
        self.host.attach_window(window.inner());

        let egui_state = egui_winit::State::new(
            self.shell.context().clone(),
            egui::ViewportId::ROOT,
            &**window.inner(),
            Some(window.inner().scale_factor() as f32),
            window.inner().theme(),
            None,
        );

        if !self.settings.follow_system_theme {
            self.shell.change_theme(&self.settings.theme);
        }

        let mut platform = Platform::new(window, Rc::clone(&self.host), self.settings.clone());
        platform.setup();

        self.platform = Some(platform);
        self.egui_state = Some(egui_state);
        self.settle();
        Ok(())
    }

    /// Deliver host messages, events and requests queued since the last turn
    fn settle(&mut self) {
        let Some(platform) = self.platform.as_mut() else {
            return;
        };
        platform.pump_host(&mut self.shell);

        for event in platform.process_events() {
            match event {
                Event::DpiChanged { previous, current } => {
                    info!("Native scale {} -> {}", previous, current);
                }
                Event::FileDropped(path) => {
                    info!("File dropped: {}", path.display());
                    self.shell.set_last_drop(path);
                }
                _ => {}
            }
        }

        let scale = platform.context().native_scale();
        let requests = platform.take_requests();
        for request in requests {
            apply_request(self, request, scale);
        }
    }

    fn render_frame(&mut self) {
        let (Some(platform), Some(egui_state)) = (self.platform.as_mut(), self.egui_state.as_mut())
        else {
            return;
        };

        platform.begin_frame();

        let raw_input = egui_state.take_egui_input(platform.window().inner());
        let output = self.shell.run(raw_input, platform.context());
        egui_state.handle_platform_output(platform.window().inner(), output.platform_output);

        platform.end_frame();
    }
}

impl<H: Host + 'static> ThemeManager for Driver<H> {
    fn change_theme(&mut self, name: &str) {
        self.shell.change_theme(name);
    }

    fn reapply_current_theme(&mut self, native_scale: f32) {
        self.shell.reapply_current_theme(native_scale);
    }
}

impl<H: Host + 'static> InputSink for Driver<H> {
    fn add_mouse_source_event(&mut self, source: PointerMode) {
        self.shell.add_mouse_source_event(source);
    }
}

impl<H: Host + 'static> ShortcutSink for Driver<H> {
    fn enable_macos_mode(&mut self) {
        self.shell.enable_macos_mode();
    }
}

impl<H: Host + 'static> FrameRenderer for Driver<H> {
    fn full_frame(&mut self) {
        self.render_frame();
    }
}

impl<H: Host + 'static> ApplicationHandler for Driver<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.platform.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            error!("Failed to create window: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.host.observe_window_event(&event);

        if let (Some(platform), Some(egui_state)) = (self.platform.as_ref(), self.egui_state.as_mut()) {
            let response = egui_state.on_window_event(platform.window().inner(), &event);
            if wants_redraw(&response) {
                platform.window().request_redraw();
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::DroppedFile(path) => {
                if let Some(platform) = self.platform.as_mut() {
                    platform.window_mut().deliver_drop(&[path]);
                }
            }
            // An overlay stopped obscuring the window
            WindowEvent::Occluded(false) => {
                if let Some(platform) = self.platform.as_mut() {
                    platform.window_mut().deliver_refresh();
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }

        self.settle();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.settle();
        if let Some(platform) = &self.platform {
            platform.window().request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redraw_follows_egui_repaint() {
        let consumed_with_repaint = egui_winit::EventResponse {
            consumed: true,
            repaint: true,
        };
        assert!(wants_redraw(&consumed_with_repaint));

        let ignored = egui_winit::EventResponse {
            consumed: false,
            repaint: false,
        };
        assert!(!wants_redraw(&ignored));
    }
}
