//! Browser host: DOM listeners, script-callable entry points and the
//! wasm start function.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlCanvasElement, IdbDatabase, IdbOpenDbRequest, IdbVersionChangeEvent,
    MediaQueryList, Window,
};
use winit::event_loop::EventLoop;
use winit::platform::web::EventLoopExtWebSys;

use crate::config::Settings;
use crate::core::{
    Host, HostError, HostMessage, HostSender, MountCallback, PlatformFamily, PointerMode,
    WindowDimensions,
};
use crate::driver::Driver;

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
const FIXED_CANVAS_CLASS: &str = "canvas-fixed";
const APPLE_USER_AGENT: &str = "Mac OS X";
const STORAGE_VERSION: u32 = 1;

thread_local! {
    // Exported functions carry no context, so they post through this sender
    static ENTRY_SENDER: RefCell<Option<HostSender>> = const { RefCell::new(None) };
}

fn post_from_script(message: HostMessage) {
    ENTRY_SENDER.with(|sender| match sender.borrow().as_ref() {
        Some(sender) => sender.post(message),
        None => warn!("{:?} arrived before the bridge was set up", message),
    });
}

#[wasm_bindgen(js_name = handleThemeChange)]
pub fn handle_theme_change() {
    post_from_script(HostMessage::ThemeChanged);
}

#[wasm_bindgen(js_name = updateFramebufferSize)]
pub fn update_framebuffer_size(width: i32, height: i32) {
    post_from_script(HostMessage::FramebufferResized { width, height });
}

#[wasm_bindgen(js_name = enterMouseMode)]
pub fn enter_mouse_mode() {
    post_from_script(HostMessage::EnterPointerMode(PointerMode::Mouse));
}

#[wasm_bindgen(js_name = enterTouchMode)]
pub fn enter_touch_mode() {
    post_from_script(HostMessage::EnterPointerMode(PointerMode::Touch));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let settings = Settings::default();
    let host = BrowserHost::new(&settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let event_loop = EventLoop::new().map_err(|e| JsValue::from_str(&e.to_string()))?;

    event_loop.spawn_app(Driver::new(settings, Rc::new(host), true));
    Ok(())
}

/// Canvas element the window is created on
pub fn find_canvas(selector: &str) -> Option<HtmlCanvasElement> {
    gloo::utils::document()
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

fn js_error(value: JsValue) -> HostError {
    HostError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

type PendingMount = Rc<RefCell<Option<MountCallback>>>;

fn complete_mount(pending: &PendingMount, result: Result<(), HostError>) {
    let callback = pending.borrow_mut().take();
    if let Some(callback) = callback {
        callback(result);
    }
}

fn opened_database(request: &IdbOpenDbRequest) -> Result<IdbDatabase, HostError> {
    request
        .result()
        .map_err(js_error)?
        .dyn_into::<IdbDatabase>()
        .map_err(|_| HostError::Storage("open request did not yield a database".into()))
}

/// [`Host`] backed by the page the module runs in
pub struct BrowserHost {
    window: Window,
    document: Document,
    canvas_selector: String,
    wrapper_selector: String,
    database: Rc<RefCell<Option<IdbDatabase>>>,
}

impl BrowserHost {
    pub fn new(settings: &Settings) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or_else(|| HostError::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| HostError::MissingElement("document".into()))?;

        Ok(Self {
            window,
            document,
            canvas_selector: settings.canvas_selector.clone(),
            wrapper_selector: settings.wrapper_selector.clone(),
            database: Rc::new(RefCell::new(None)),
        })
    }

    /// Database backing the mounted storage. Holds one object store named
    /// after the mount path. `None` until the mount completed.
    pub fn database(&self) -> Option<IdbDatabase> {
        self.database.borrow().clone()
    }

    fn element(&self, selector: &str) -> Result<Element, HostError> {
        self.document
            .query_selector(selector)
            .map_err(js_error)?
            .ok_or_else(|| HostError::MissingElement(selector.to_string()))
    }

    fn dark_query(&self) -> Option<MediaQueryList> {
        self.window.match_media(DARK_SCHEME_QUERY).ok().flatten()
    }
}

impl Host for BrowserHost {
    fn prefers_dark(&self) -> bool {
        self.dark_query().map(|query| query.matches()).unwrap_or(false)
    }

    fn platform_family(&self) -> PlatformFamily {
        let apple = self
            .window
            .navigator()
            .user_agent()
            .map(|agent| agent.contains(APPLE_USER_AGENT))
            .unwrap_or(false);
        if apple {
            PlatformFamily::AppleModifiers
        } else {
            PlatformFamily::Standard
        }
    }

    fn wrapper_size(&self) -> Option<WindowDimensions> {
        match self.element(&self.wrapper_selector) {
            Ok(wrapper) => Some(WindowDimensions::new(
                wrapper.client_width(),
                wrapper.client_height(),
            )),
            Err(err) => {
                debug!("{}", err);
                None
            }
        }
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            warn!("alert failed: {}", js_error(err));
        }
    }

    fn set_canvas_fixed(&self, fixed: bool) {
        let canvas = match self.element(&self.canvas_selector) {
            Ok(canvas) => canvas,
            Err(err) => {
                warn!("{}", err);
                return;
            }
        };
        let classes = canvas.class_list();
        let result = if fixed {
            classes.add_1(FIXED_CANVAS_CLASS)
        } else {
            classes.remove_1(FIXED_CANVAS_CLASS)
        };
        if let Err(err) = result {
            warn!("{}", js_error(err));
        }
    }

    fn mount_storage(&self, path: &str, done: MountCallback) {
        let factory = match self.window.indexed_db() {
            Ok(Some(factory)) => factory,
            Ok(None) => {
                done(Err(HostError::Storage("IndexedDB is not available".into())));
                return;
            }
            Err(err) => {
                done(Err(js_error(err)));
                return;
            }
        };
        let request = match factory.open_with_u32(path, STORAGE_VERSION) {
            Ok(request) => request,
            Err(err) => {
                done(Err(js_error(err)));
                return;
            }
        };

        // Exactly one handler consumes the completion
        let pending: PendingMount = Rc::new(RefCell::new(Some(done)));

        // Object stores can only be created while the database upgrades
        let on_upgrade = {
            let request = request.clone();
            let store = path.to_string();
            let pending = Rc::clone(&pending);
            Closure::once_into_js(move |event: IdbVersionChangeEvent| {
                debug!(
                    "Upgrading storage {} from version {} to {:?}",
                    store,
                    event.old_version(),
                    event.new_version()
                );
                let created = opened_database(&request).and_then(|db| {
                    if db.object_store_names().contains(&store) {
                        return Ok(());
                    }
                    db.create_object_store(&store).map(|_| ()).map_err(js_error)
                });
                if let Err(err) = created {
                    complete_mount(&pending, Err(err));
                }
            })
        };

        let on_success = {
            let request = request.clone();
            let store = path.to_string();
            let database = Rc::clone(&self.database);
            let pending = Rc::clone(&pending);
            Closure::once_into_js(move || {
                let result = opened_database(&request).and_then(|db| {
                    if !db.object_store_names().contains(&store) {
                        return Err(HostError::Storage(format!("object store {} missing", store)));
                    }
                    *database.borrow_mut() = Some(db);
                    Ok(())
                });
                complete_mount(&pending, result);
            })
        };

        let on_error = {
            let path = path.to_string();
            Closure::once_into_js(move || {
                complete_mount(
                    &pending,
                    Err(HostError::Storage(format!("could not open {}", path))),
                );
            })
        };

        request.set_onupgradeneeded(Some(on_upgrade.unchecked_ref()));
        request.set_onsuccess(Some(on_success.unchecked_ref()));
        request.set_onerror(Some(on_error.unchecked_ref()));
    }

    fn storage_mounted(&self) -> bool {
        self.database.borrow().is_some()
    }

    fn listen_theme_changes(&self, sender: HostSender) {
        let Some(query) = self.dark_query() else {
            warn!("matchMedia unavailable, theme changes will not be observed");
            return;
        };
        EventListener::new(&query, "change", move |_| {
            sender.post(HostMessage::ThemeChanged);
        })
        .forget();
    }

    fn listen_pointer_modes(&self, sender: HostSender) {
        let canvas = match self.element(&self.canvas_selector) {
            Ok(canvas) => canvas,
            Err(err) => {
                warn!("{}", err);
                return;
            }
        };

        let mouse = sender.clone();
        EventListener::new(&canvas, "mousedown", move |_| {
            mouse.post(HostMessage::EnterPointerMode(PointerMode::Mouse));
        })
        .forget();

        EventListener::new(&canvas, "touchstart", move |_| {
            sender.post(HostMessage::EnterPointerMode(PointerMode::Touch));
        })
        .forget();
    }

    fn expose_entry_points(&self, sender: HostSender) {
        ENTRY_SENDER.with(|slot| *slot.borrow_mut() = Some(sender));
    }
}
