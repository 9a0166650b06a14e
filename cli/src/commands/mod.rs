pub mod colors;
pub mod config;
pub mod contrast;
pub mod reset;
pub mod set;
pub mod show;
pub mod validate;

use std::path::PathBuf;

use color_eyre::eyre::Result;
use glacial_settings::{JsonFileStore, SettingsManager};
use glacial_theme::{load_host_file, StaticHost};

use crate::config::CliConfig;

pub type Manager = SettingsManager<JsonFileStore, StaticHost>;

/// Resolved configuration shared by every command.
pub struct Context {
    pub config: CliConfig,
}

impl Context {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config.settings_path()
    }

    pub fn is_dark(&self) -> bool {
        self.config.appearance.is_dark()
    }

    pub fn host(&self, dark: bool) -> Result<StaticHost> {
        match &self.config.host_theme {
            Some(path) => Ok(load_host_file(path, dark)?),
            None => Ok(StaticHost::builtin(dark)),
        }
    }

    pub fn open(&self) -> Result<Manager> {
        let host = self.host(self.is_dark())?;
        let store = JsonFileStore::new(self.settings_path());
        Ok(SettingsManager::open(store, host)?)
    }
}
