use color_eyre::eyre::Result;
use glacial_settings::to_document;
use glacial_theme::{ColorState, ThemeMode};

use super::Context;

pub fn run(ctx: &Context, json: bool) -> Result<()> {
    let manager = ctx.open()?;
    let settings = manager.settings();

    if json {
        println!("{}", serde_json::to_string_pretty(&to_document(settings)?)?);
        return Ok(());
    }

    let path = ctx.settings_path();
    println!("Settings file: {}", path.display());
    if !path.exists() {
        println!("  (not created yet, showing defaults)");
    }
    println!("Host theme:    {}", manager.host().name);
    println!(
        "Appearance:    {} ({})",
        ctx.config.appearance.label(),
        manager.current_mode().label()
    );
    println!();

    println!("{:<22} {}", "Schema version", settings.schema_version);
    println!("{:<22} {}", "Tag collector", settings.tag_collector);
    println!("{:<22} {}", "Metadata keys", settings.meta_keys.join(", "));
    println!("{:<22} {}", "Reset font styling", settings.font_reset);
    println!("{:<22} {}", "Follow theme colors", settings.follow_theme_colors);
    for state in ColorState::ALL {
        println!(
            "{:<22} {}",
            format!("{} font weight", state.label()),
            settings.font_weight(state)
        );
    }

    println!("\nStored palette");
    println!("{}", "-".repeat(48));
    for mode in ThemeMode::ALL {
        let colors = settings.colors.get(mode);
        for state in ColorState::ALL {
            let pair = colors.pair(state);
            println!(
                "{:<6} {:<10} bg {}  fg {}",
                mode.key(),
                state.label(),
                pair.background_color,
                pair.font_color
            );
        }
    }

    if !settings.extra.is_empty() {
        let keys: Vec<_> = settings.extra.keys().map(String::as_str).collect();
        println!("\nKept unknown fields: {}", keys.join(", "));
    }

    Ok(())
}
