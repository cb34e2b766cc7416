use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, error, info};
use winit::event::{ElementState, TouchPhase, WindowEvent};
use winit::window::{Theme, Window};

use crate::core::{
    Host, HostError, HostMessage, HostSender, MountCallback, PlatformFamily, PointerMode,
    WindowDimensions,
};

/// Stand-in for the browser when running as a desktop process.
///
/// Theme and pointer notifications come from winit window events instead of
/// DOM listeners, storage is a directory under `root`, and alerts go to the
/// log. Mount completions are deferred to the next [`Host::run_pending`] so
/// they arrive on a later loop turn, as they would in a browser.
pub struct DesktopHost {
    root: PathBuf,
    dark: Cell<bool>,
    mounted: Rc<Cell<bool>>,
    theme_sender: RefCell<Option<HostSender>>,
    pointer_sender: RefCell<Option<HostSender>>,
    pending: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl DesktopHost {
    /// Storage paths are resolved below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dark: Cell::new(false),
            mounted: Rc::new(Cell::new(false)),
            theme_sender: RefCell::new(None),
            pointer_sender: RefCell::new(None),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Host rooted in the system temp directory
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join("canvas-bridge"))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(Path::new(path.trim_start_matches('/')))
    }

    fn notify(sender: &RefCell<Option<HostSender>>, message: HostMessage) {
        if let Some(sender) = sender.borrow().as_ref() {
            sender.post(message);
        }
    }
}

impl Host for DesktopHost {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }

    fn platform_family(&self) -> PlatformFamily {
        if cfg!(target_os = "macos") {
            PlatformFamily::AppleModifiers
        } else {
            PlatformFamily::Standard
        }
    }

    fn wrapper_size(&self) -> Option<WindowDimensions> {
        // The desktop window is its own wrapper
        None
    }

    fn alert(&self, message: &str) {
        error!("{}", message);
    }

    fn set_canvas_fixed(&self, fixed: bool) {
        debug!("Canvas fixed layout: {}", fixed);
    }

    fn mount_storage(&self, path: &str, done: MountCallback) {
        let dir = self.resolve(path);
        let result = std::fs::create_dir_all(&dir)
            .map_err(|err| HostError::Storage(format!("{}: {}", dir.display(), err)));
        if result.is_ok() {
            info!("Persistent storage mounted at {}", dir.display());
        }
        let mounted = Rc::clone(&self.mounted);
        self.pending.borrow_mut().push(Box::new(move || {
            mounted.set(result.is_ok());
            done(result)
        }));
    }

    fn storage_mounted(&self) -> bool {
        self.mounted.get()
    }

    fn listen_theme_changes(&self, sender: HostSender) {
        *self.theme_sender.borrow_mut() = Some(sender);
    }

    fn listen_pointer_modes(&self, sender: HostSender) {
        *self.pointer_sender.borrow_mut() = Some(sender);
    }

    fn attach_window(&self, window: &Window) {
        self.dark.set(matches!(window.theme(), Some(Theme::Dark)));
    }

    fn run_pending(&self) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        for completion in pending {
            completion();
        }
    }

    fn observe_window_event(&self, event: &WindowEvent) {
        match event {
            WindowEvent::ThemeChanged(theme) => {
                self.dark.set(*theme == Theme::Dark);
                Self::notify(&self.theme_sender, HostMessage::ThemeChanged);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => Self::notify(
                &self.pointer_sender,
                HostMessage::EnterPointerMode(PointerMode::Mouse),
            ),
            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started => Self::notify(
                &self.pointer_sender,
                HostMessage::EnterPointerMode(PointerMode::Touch),
            ),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mailbox;

    fn scratch_root(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("canvas-bridge-test-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_storage_path_resolves_below_root() {
        let host = DesktopHost::new("/data");
        assert_eq!(
            host.resolve("/home/web_user/.local"),
            PathBuf::from("/data/home/web_user/.local")
        );
    }

    #[test]
    fn test_mount_completes_on_later_turn() {
        let root = scratch_root("mount");
        let host = DesktopHost::new(root.clone());
        let outcome = Rc::new(RefCell::new(None));

        let sink = outcome.clone();
        host.mount_storage(
            "/home/web_user/.local",
            Box::new(move |result: Result<(), HostError>| {
                *sink.borrow_mut() = Some(result.is_ok());
            }),
        );
        assert!(outcome.borrow().is_none());
        assert!(!host.storage_mounted());

        host.run_pending();
        assert_eq!(*outcome.borrow(), Some(true));
        assert!(host.storage_mounted());
        assert!(root.join("home/web_user/.local").is_dir());

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn test_failed_mount_is_not_usable() {
        let root = scratch_root("blocked");
        // A regular file where the mount directory should go
        std::fs::write(&root, b"").unwrap();
        let host = DesktopHost::new(root.clone());
        let outcome = Rc::new(RefCell::new(None));

        let sink = outcome.clone();
        host.mount_storage(
            "/home/web_user/.local",
            Box::new(move |result: Result<(), HostError>| {
                *sink.borrow_mut() = Some(result.is_ok());
            }),
        );
        host.run_pending();

        assert_eq!(*outcome.borrow(), Some(false));
        assert!(!host.storage_mounted());

        let _ = std::fs::remove_file(root);
    }

    #[test]
    fn test_theme_event_notifies_listener() {
        let host = DesktopHost::new(scratch_root("listen"));
        let mut inbox = Mailbox::new();
        host.listen_theme_changes(inbox.poster());

        host.observe_window_event(&WindowEvent::ThemeChanged(Theme::Dark));

        assert!(host.prefers_dark());
        assert_eq!(inbox.drain(), vec![HostMessage::ThemeChanged]);
    }

    #[test]
    fn test_no_wrapper_on_desktop() {
        let host = DesktopHost::new(scratch_root("wrapper"));
        assert_eq!(host.wrapper_size(), None);
    }
}
