use std::path::Path;

use color_eyre::eyre::{bail, Result};

use super::Context;
use crate::config::{config_path, log_dir, AppearanceMode, CliConfig};

fn with_presence(path: &Path) -> String {
    let marker = if path.exists() { "" } else { " (missing)" };
    format!("{}{}", path.display(), marker)
}

/// Label and value for each path and mode the other commands will use.
fn describe(config: &CliConfig) -> Vec<(&'static str, String)> {
    let appearance = match config.appearance {
        AppearanceMode::Auto => {
            let detected = if config.appearance.is_dark() { "dark" } else { "light" };
            format!("Auto (system is {})", detected)
        }
        mode => mode.label().to_string(),
    };
    let host_theme = match &config.host_theme {
        Some(path) => with_presence(path),
        None => "built-in".to_string(),
    };
    let logs = if config.log_to_file {
        with_presence(&log_dir())
    } else {
        "stderr".to_string()
    };

    vec![
        ("Config file", with_presence(&config_path())),
        ("Settings file", with_presence(&config.settings_path())),
        ("Host theme", host_theme),
        ("Appearance", appearance),
        ("Log level", format!("{:?}", config.log_level).to_lowercase()),
        ("Logs", logs),
    ]
}

fn edit_config(config_file: &Path) -> Result<()> {
    if !config_file.exists() {
        CliConfig::default().save()?;
    }

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor)
        .arg(config_file)
        .status()?;
    if !status.success() {
        bail!("{} exited with {}", editor, status);
    }

    // Surfaces a parse warning right away instead of on the next run.
    let _ = CliConfig::load();
    Ok(())
}

pub fn run(ctx: &Context, path: bool, reset: bool, edit: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if reset {
        CliConfig::default().save()?;
        println!("Config reset to defaults at: {}", config_file.display());
        return Ok(());
    }

    if edit {
        return edit_config(&config_file);
    }

    for (label, value) in describe(&ctx.config) {
        println!("{:<14} {}", label, value);
    }

    if config_file.exists() {
        println!();
        println!("{}", toml::to_string_pretty(&CliConfig::load())?);
    }

    Ok(())
}
