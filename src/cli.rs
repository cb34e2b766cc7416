// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Settings;

#[derive(Parser, Debug, Clone)]
#[command(name = "canvas-bridge")]
#[command(about = "Canvas window adaptation layer demo", long_about = None)]
pub struct Cli {
    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use a fixed theme ("Light" or "Dark") instead of the system preference
    #[arg(long)]
    pub theme: Option<String>,

    /// Follow the system color scheme
    #[arg(long = "follow-system-theme", conflicts_with = "theme")]
    pub follow_system_theme: bool,

    /// Override the persistent storage mount point
    #[arg(long = "storage-path")]
    pub storage_path: Option<String>,

    /// Disable the status panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// Settings from the config file (or defaults) with flags applied on top
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_file(path)
                .with_context(|| format!("Failed to load settings from {:?}", path))?,
            None => Settings::default(),
        };

        if let Some(theme) = &self.theme {
            settings.theme = theme.clone();
            settings.follow_system_theme = false;
        }
        if self.follow_system_theme {
            settings.follow_system_theme = true;
        }
        if let Some(path) = &self.storage_path {
            settings.storage_path = path.clone();
        }

        Ok(settings)
    }
}
