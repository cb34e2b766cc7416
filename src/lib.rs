pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod ui;
pub mod window;

#[cfg(not(target_arch = "wasm32"))]
pub mod desktop;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::Settings;
pub use core::{Platform, PlatformContext, PointerMode, ThemePreference};
