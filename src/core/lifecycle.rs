use std::path::PathBuf;
use std::rc::Rc;

use log::{debug, error, info};

use super::context::ThemePreference;
use super::events::{Event, EventKind, Request};
use super::host::{Host, HostError, PlatformFamily};
use super::platform::Platform;
use super::scale::{native_scale_of, NEUTRAL_SCALE};
use super::window::NativeWindow;
use crate::config::Settings;

/// Window creation hints, applied before the native window exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHints {
    /// Graphics context version (major, minor) the renderer binds to
    pub context_version: (u8, u8),
    pub decorated: bool,
    pub transparent_framebuffer: bool,
    pub scale_framebuffer: bool,
    /// Host element the window is created on
    pub canvas_selector: String,
}

impl WindowHints {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            context_version: settings.context_version,
            decorated: false,
            transparent_framebuffer: false,
            scale_framebuffer: true,
            canvas_selector: settings.canvas_selector.clone(),
        }
    }
}

impl Default for WindowHints {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl<W: NativeWindow, H: Host + 'static> Platform<W, H> {
    /// One-shot setup once the window exists. Order matters: the theme
    /// subscriber is installed before the seeding post so startup adopts the
    /// host preference. Nothing here can abort startup.
    pub fn setup(&mut self) {
        self.mount_storage();
        self.register_host_listeners();
        self.install_theme_follower();
        self.register_window_callbacks();
        self.detect_platform_family();
        self.present_window();
    }

    fn mount_storage(&mut self) {
        let path = self.settings.storage_path.clone();
        info!("Mounting persistent storage at {}", path);

        let host = Rc::clone(&self.host);
        self.host.mount_storage(
            &path,
            Box::new(move |result: Result<(), HostError>| match result {
                Ok(()) => debug!("Persistent storage synchronized"),
                Err(err) => {
                    error!("Persistent storage unavailable: {}", err);
                    host.alert(&format!("Failed to load permanent file system: {err}"));
                }
            }),
        );

        // Release the splash layout
        self.host.set_canvas_fixed(false);
    }

    fn register_host_listeners(&mut self) {
        let sender = self.bridge.sender();
        self.host.listen_theme_changes(sender.clone());
        self.host.listen_pointer_modes(sender.clone());
        self.host.expose_entry_points(sender);
        self.host.set_canvas_fixed(true);

        self.ctx.theme = ThemePreference::from_dark(self.host.prefers_dark());
    }

    fn install_theme_follower(&mut self) {
        let follow_system = self.settings.follow_system_theme;
        let host = Rc::clone(&self.host);
        let requests = self.requests.poster();

        self.events.subscribe(EventKind::OsThemeChanged, move |_| {
            if !follow_system {
                return;
            }
            let theme = ThemePreference::from_dark(host.prefers_dark());
            requests.post(Request::ChangeTheme(theme.theme_name().to_string()));
        });

        if follow_system {
            self.events.post(Event::OsThemeChanged);
        }
    }

    fn register_window_callbacks(&mut self) {
        let events = self.events.poster();
        self.window.set_drop_callback(Box::new(move |paths: &[PathBuf]| {
            for path in paths {
                events.post(Event::FileDropped(path.clone()));
            }
        }));

        let requests = self.requests.poster();
        self.window.set_refresh_callback(Box::new(move || {
            requests.post(Request::FullFrameRender);
        }));
    }

    fn detect_platform_family(&mut self) {
        self.ctx.family = self.host.platform_family();
        if self.ctx.family == PlatformFamily::AppleModifiers {
            info!("Apple platform detected, using macOS shortcut modifiers");
            self.requests.post(Request::EnableMacOsShortcuts);
        }
    }

    fn present_window(&mut self) {
        self.window.set_scale_framebuffer(true);
        self.window.show();
        self.window.make_resizable(&self.settings.wrapper_selector);

        self.ctx.native_scale = native_scale_of(&self.window);
        info!("Initial native scale {}", self.ctx.native_scale);

        // Consumers rely on exactly one startup notification from a neutral 1.0
        self.events.post(Event::DpiChanged {
            previous: NEUTRAL_SCALE,
            current: self.ctx.native_scale,
        });
    }
}
