use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[default]
    Auto,
    Dark,
    Light,
}

impl AppearanceMode {
    pub fn label(&self) -> &'static str {
        match self {
            AppearanceMode::Auto => "Auto",
            AppearanceMode::Dark => "Dark",
            AppearanceMode::Light => "Light",
        }
    }

    /// Whether the host should report the dark appearance. `Auto` asks the OS.
    pub fn is_dark(&self) -> bool {
        match self {
            AppearanceMode::Auto => detect_system_dark_mode(),
            AppearanceMode::Dark => true,
            AppearanceMode::Light => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[value(alias = "none")]
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CliConfig {
    pub log_level: LogLevel,
    /// Write logs to a daily file under the cache directory instead of stderr.
    pub log_to_file: bool,
    pub appearance: AppearanceMode,
    /// Settings document to use instead of the one in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_file: Option<PathBuf>,
    /// Host theme TOML. The built-in token table is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_theme: Option<PathBuf>,
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("glacial")
}

pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("~/.cache"))
        .join("glacial")
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("glacial")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn log_dir() -> PathBuf {
    cache_dir().join("logs")
}

pub fn default_settings_path() -> PathBuf {
    data_dir().join("data.json")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())?;
    fs::create_dir_all(data_dir())?;
    Ok(())
}

impl CliConfig {
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse config TOML. Logging is not up yet, so a bad file is reported on stderr.
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: ignoring invalid config file: {}", e);
            Self::default()
        })
    }

    pub fn save(&self) -> std::io::Result<()> {
        let _ = ensure_dirs();
        let path = config_path();
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, content)
    }

    pub fn merge_with_args(
        &mut self,
        appearance: Option<AppearanceMode>,
        settings_file: Option<PathBuf>,
        host_theme: Option<PathBuf>,
    ) {
        if let Some(appearance) = appearance {
            self.appearance = appearance;
        }
        if settings_file.is_some() {
            self.settings_file = settings_file;
        }
        if host_theme.is_some() {
            self.host_theme = host_theme;
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.settings_file
            .clone()
            .unwrap_or_else(default_settings_path)
    }
}

#[cfg(target_os = "macos")]
fn detect_system_dark_mode() -> bool {
    Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map(|output| {
            String::from_utf8_lossy(&output.stdout)
                .trim()
                .eq_ignore_ascii_case("dark")
        })
        .unwrap_or(false)
}

#[cfg(not(target_os = "macos"))]
fn detect_system_dark_mode() -> bool {
    Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).contains("dark"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_partial_config() {
        let config = CliConfig::parse(
            r#"
log_level = "debug"
appearance = "light"
host_theme = "/tmp/host.toml"
"#,
        );
        assert_eq!(
            config,
            CliConfig {
                log_level: LogLevel::Debug,
                appearance: AppearanceMode::Light,
                host_theme: Some(PathBuf::from("/tmp/host.toml")),
                ..CliConfig::default()
            }
        );
    }

    #[test]
    fn test_parse_invalid_config_is_default() {
        assert_eq!(CliConfig::parse("log_level = 3"), CliConfig::default());
    }

    #[test]
    fn test_config_round_trip() {
        let config = CliConfig {
            log_to_file: true,
            settings_file: Some(PathBuf::from("/tmp/data.json")),
            ..CliConfig::default()
        };
        let content = toml::to_string_pretty(&config).unwrap();
        assert_eq!(CliConfig::parse(&content), config);
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = CliConfig::default();
        config.merge_with_args(
            Some(AppearanceMode::Dark),
            None,
            Some(PathBuf::from("host.toml")),
        );
        assert_eq!(config.appearance, AppearanceMode::Dark);
        assert_eq!(config.settings_path(), default_settings_path());
        assert_eq!(config.host_theme, Some(PathBuf::from("host.toml")));
        assert!(AppearanceMode::Dark.is_dark());
        assert!(!AppearanceMode::Light.is_dark());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(LogLevel::from_str("INFO", true), Ok(LogLevel::Info));
        assert_eq!(LogLevel::from_str("none", true), Ok(LogLevel::Off));
        assert!(LogLevel::from_str("bogus", true).is_err());
        assert_eq!(LogLevel::Off.as_tracing_level(), None);
        assert_eq!(LogLevel::Trace.as_tracing_level(), Some(Level::TRACE));
    }
}
