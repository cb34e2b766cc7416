use std::path::PathBuf;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use log::debug;

use super::context::PointerMode;

/// Notification posted to the application's event bus
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The host color-scheme preference changed (or is being seeded)
    OsThemeChanged,
    DpiChanged { previous: f32, current: f32 },
    FileDropped(PathBuf),
    InputModeChanged(PointerMode),
}

/// Discriminant used to filter subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    OsThemeChanged,
    DpiChanged,
    FileDropped,
    InputModeChanged,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::OsThemeChanged => EventKind::OsThemeChanged,
            Event::DpiChanged { .. } => EventKind::DpiChanged,
            Event::FileDropped(_) => EventKind::FileDropped,
            Event::InputModeChanged(_) => EventKind::InputModeChanged,
        }
    }
}

/// Work the platform layer asks the application to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ChangeTheme(String),
    FullFrameRender,
    ReapplyCurrentTheme,
    EnableMacOsShortcuts,
}

/// Cloneable sending half of a [`Mailbox`]
pub struct Poster<T> {
    tx: UnboundedSender<T>,
}

impl<T> Poster<T> {
    /// Queue an item; never blocks
    pub fn post(&self, item: T) {
        if self.tx.unbounded_send(item).is_err() {
            debug!("Mailbox dropped, discarding message");
        }
    }
}

impl<T> Clone for Poster<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Single-consumer queue drained by the main loop
pub struct Mailbox<T> {
    tx: UnboundedSender<T>,
    rx: UnboundedReceiver<T>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded();
        Self { tx, rx }
    }

    pub fn poster(&self) -> Poster<T> {
        Poster {
            tx: self.tx.clone(),
        }
    }

    pub fn post(&self, item: T) {
        // The mailbox keeps its own sender, so the channel cannot be closed here
        let _ = self.tx.unbounded_send(item);
    }

    /// Take everything queued so far, in posting order
    pub fn drain(&mut self) -> Vec<T> {
        let mut items = Vec::new();
        while let Ok(item) = self.rx.try_recv() {
            items.push(item);
        }
        items
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

type Handler = Box<dyn FnMut(&Event)>;

/// Event mailbox plus subscribers filtered by [`EventKind`]
pub struct EventBus {
    mailbox: Mailbox<Event>,
    subscribers: Vec<(EventKind, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            mailbox: Mailbox::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: impl FnMut(&Event) + 'static) {
        self.subscribers.push((kind, Box::new(handler)));
    }

    pub fn post(&self, event: Event) {
        self.mailbox.post(event);
    }

    pub fn poster(&self) -> Poster<Event> {
        self.mailbox.poster()
    }

    /// Deliver queued events to subscribers and hand them back for any other
    /// consumer. Events posted by subscribers are delivered in the same call.
    pub fn process(&mut self) -> Vec<Event> {
        let mut delivered = Vec::new();
        loop {
            let batch = self.mailbox.drain();
            if batch.is_empty() {
                break;
            }
            for event in batch {
                let kind = event.kind();
                for (_, handler) in self.subscribers.iter_mut().filter(|(k, _)| *k == kind) {
                    handler(&event);
                }
                delivered.push(event);
            }
        }
        delivered
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
