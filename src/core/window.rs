use std::path::PathBuf;

/// Window dimensions in either logical units or backing pixels.
///
/// Signed because hosts can report a collapsed (zero) or not-yet-laid-out
/// element, and the scale calculator has to tolerate that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowDimensions {
    pub width: i32,
    pub height: i32,
}

impl WindowDimensions {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either axis has no area
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Invoked once per drop with every path, in host order
pub type DropCallback = Box<dyn FnMut(&[PathBuf])>;

/// Invoked when the host asks for a repaint outside the frame cadence
pub type RefreshCallback = Box<dyn FnMut()>;

/// Native window/canvas pairing as seen by the platform layer.
///
/// The window is created before the layer initializes and outlives it; the
/// layer only ever borrows it.
pub trait NativeWindow {
    /// Window size in host layout units
    fn logical_size(&self) -> WindowDimensions;

    /// Size of the rendering surface in device pixels
    fn framebuffer_size(&self) -> WindowDimensions;

    /// Resize the window to the given logical size
    fn set_size(&mut self, size: WindowDimensions);

    /// Toggle framebuffer auto-scaling for high density displays
    fn set_scale_framebuffer(&mut self, enabled: bool);

    /// Let the window follow the size of the given wrapper element
    fn make_resizable(&mut self, wrapper_selector: &str);

    fn show(&mut self);

    fn set_drop_callback(&mut self, callback: DropCallback);

    fn set_refresh_callback(&mut self, callback: RefreshCallback);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_window_dimensions_new() {
        let dims = WindowDimensions::new(1920, 1080);
        assert_eq!(dims.width, 1920);
        assert_eq!(dims.height, 1080);
        assert!(!dims.is_degenerate());
    }

    #[test]
    fn test_window_dimensions_degenerate() {
        assert!(WindowDimensions::new(800, 0).is_degenerate());
        assert!(WindowDimensions::new(0, 600).is_degenerate());
        assert!(WindowDimensions::new(-1, 600).is_degenerate());
        assert!(WindowDimensions::default().is_degenerate());
    }

    // Mock window for testing trait implementation
    #[derive(Default)]
    struct MockWindow {
        size: WindowDimensions,
        visible: bool,
        on_drop: Option<DropCallback>,
        on_refresh: Option<RefreshCallback>,
    }

    impl NativeWindow for MockWindow {
        fn logical_size(&self) -> WindowDimensions {
            self.size
        }

        fn framebuffer_size(&self) -> WindowDimensions {
            self.size
        }

        fn set_size(&mut self, size: WindowDimensions) {
            self.size = size;
        }

        fn set_scale_framebuffer(&mut self, _enabled: bool) {}

        fn make_resizable(&mut self, _wrapper_selector: &str) {}

        fn show(&mut self) {
            self.visible = true;
        }

        fn set_drop_callback(&mut self, callback: DropCallback) {
            self.on_drop = Some(callback);
        }

        fn set_refresh_callback(&mut self, callback: RefreshCallback) {
            self.on_refresh = Some(callback);
        }
    }

    #[test]
    fn test_native_window_resize_and_show() {
        let mut window = MockWindow::default();
        window.set_size(WindowDimensions::new(640, 480));
        window.show();

        assert_eq!(window.logical_size(), WindowDimensions::new(640, 480));
        assert!(window.visible);
    }

    #[test]
    fn test_native_window_callbacks_are_stored() {
        let mut window = MockWindow::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let refreshes = Rc::new(RefCell::new(0));

        let sink = seen.clone();
        window.set_drop_callback(Box::new(move |paths: &[PathBuf]| {
            sink.borrow_mut().extend(paths.iter().cloned());
        }));
        let counter = refreshes.clone();
        window.set_refresh_callback(Box::new(move || *counter.borrow_mut() += 1));

        if let Some(cb) = window.on_drop.as_mut() {
            cb(&[PathBuf::from("a.bin")]);
        }
        if let Some(cb) = window.on_refresh.as_mut() {
            cb();
            cb();
        }

        assert_eq!(*seen.borrow(), vec![PathBuf::from("a.bin")]);
        assert_eq!(*refreshes.borrow(), 2);
    }
}
