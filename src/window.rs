use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};
use winit::dpi::LogicalSize;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window as WinitWindowInner;

use crate::core::{DropCallback, NativeWindow, RefreshCallback, WindowDimensions, WindowHints};

/// Wrapper around a winit window implementing [`NativeWindow`]
pub struct WinitWindow {
    inner: Arc<WinitWindowInner>,
    scale_framebuffer: bool,
    wrapper_selector: Option<String>,
    on_drop: Option<DropCallback>,
    on_refresh: Option<RefreshCallback>,
}

impl WinitWindow {
    /// Create the window from hints; it stays hidden until [`NativeWindow::show`]
    pub fn create(
        event_loop: &ActiveEventLoop,
        hints: &WindowHints,
        title: &str,
        initial: LogicalSize<u32>,
    ) -> Result<Self, OsError> {
        info!(
            "Creating window on {} (context {}.{})",
            hints.canvas_selector, hints.context_version.0, hints.context_version.1
        );
        let attributes = WinitWindowInner::default_attributes()
            .with_title(title)
            .with_inner_size(initial)
            .with_decorations(hints.decorated)
            .with_transparent(hints.transparent_framebuffer)
            .with_visible(false);

        #[cfg(target_arch = "wasm32")]
        let attributes = {
            use winit::platform::web::WindowAttributesExtWebSys;
            attributes.with_canvas(crate::web::find_canvas(&hints.canvas_selector))
        };

        let window = event_loop.create_window(attributes)?;
        Ok(Self::new(Arc::new(window), hints.scale_framebuffer))
    }

    pub fn new(window: Arc<WinitWindowInner>, scale_framebuffer: bool) -> Self {
        Self {
            inner: window,
            scale_framebuffer,
            wrapper_selector: None,
            on_drop: None,
            on_refresh: None,
        }
    }

    pub fn inner(&self) -> &Arc<WinitWindowInner> {
        &self.inner
    }

    /// Wrapper element the window was bound to, once resizable
    pub fn wrapper_selector(&self) -> Option<&str> {
        self.wrapper_selector.as_deref()
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// Forward a native file drop to the registered callback
    pub fn deliver_drop(&mut self, paths: &[PathBuf]) {
        if let Some(callback) = self.on_drop.as_mut() {
            callback(paths);
        }
    }

    /// Forward a host repaint request to the registered callback
    pub fn deliver_refresh(&mut self) {
        if let Some(callback) = self.on_refresh.as_mut() {
            callback();
        }
    }
}

impl NativeWindow for WinitWindow {
    fn logical_size(&self) -> WindowDimensions {
        let size = self
            .inner
            .inner_size()
            .to_logical::<f64>(self.inner.scale_factor());
        WindowDimensions::new(size.width.round() as i32, size.height.round() as i32)
    }

    fn framebuffer_size(&self) -> WindowDimensions {
        if !self.scale_framebuffer {
            return self.logical_size();
        }
        let size = self.inner.inner_size();
        WindowDimensions::new(size.width as i32, size.height as i32)
    }

    fn set_size(&mut self, size: WindowDimensions) {
        if size.is_degenerate() || size == self.logical_size() {
            return;
        }
        let _ = self
            .inner
            .request_inner_size(LogicalSize::new(size.width as u32, size.height as u32));
    }

    fn set_scale_framebuffer(&mut self, enabled: bool) {
        self.scale_framebuffer = enabled;
    }

    fn make_resizable(&mut self, wrapper_selector: &str) {
        debug!("Window follows {}", wrapper_selector);
        self.wrapper_selector = Some(wrapper_selector.to_string());
        self.inner.set_resizable(true);
    }

    fn show(&mut self) {
        self.inner.set_visible(true);
    }

    fn set_drop_callback(&mut self, callback: DropCallback) {
        self.on_drop = Some(callback);
    }

    fn set_refresh_callback(&mut self, callback: RefreshCallback) {
        self.on_refresh = Some(callback);
    }
}
