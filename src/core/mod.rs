pub mod app;
pub mod bridge;
pub mod context;
pub mod events;
pub mod frame_sync;
pub mod host;
pub mod lifecycle;
pub mod platform;
pub mod scale;
pub mod window;

pub use app::*;
pub use bridge::*;
pub use context::*;
pub use events::*;
pub use frame_sync::*;
pub use host::*;
pub use lifecycle::*;
pub use platform::*;
pub use scale::*;
pub use window::*;
