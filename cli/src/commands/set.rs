use color_eyre::eyre::Result;
use glacial_theme::ThemeMode;

use super::Context;
use crate::SetCommands;

pub fn run(ctx: &Context, command: SetCommands) -> Result<()> {
    let mut manager = ctx.open()?;

    match command {
        SetCommands::Tag { value } => {
            manager.set_tag_collector(&value)?;
            println!("Tag collector: {}", manager.settings().tag_collector);
        }
        SetCommands::MetaKeys { csv } => {
            manager.set_meta_keys_csv(&csv)?;
            println!("Metadata keys: {}", manager.settings().meta_keys.join(", "));
        }
        SetCommands::FontReset { enabled } => {
            manager.set_font_reset(enabled)?;
            println!("Reset font styling: {}", enabled);
        }
        SetCommands::FollowTheme { follow } => {
            manager.set_follow_theme_colors(follow)?;
            println!("Follow theme colors: {}", follow);
        }
        SetCommands::FontWeight { state, weight } => {
            manager.set_font_weight(state.into(), weight)?;
            println!("Font weight: {}", weight);
        }
        SetCommands::Color {
            state,
            part,
            value,
            mode,
        } => {
            let mode: ThemeMode = mode.map(Into::into).unwrap_or_else(|| manager.current_mode());
            let color = manager.set_mode_color(mode, state.into(), part.into(), &value)?;
            println!("{} palette: {}", mode.label(), color);
            if manager.settings().follow_theme_colors {
                println!("Colors follow the host theme; stored colors apply once that is off.");
            }
        }
        SetCommands::Background { state, value, mode } => {
            let mode: ThemeMode = mode.map(Into::into).unwrap_or_else(|| manager.current_mode());
            let (background, font) =
                manager.set_background_with_auto_font(mode, state.into(), &value)?;
            println!("{} palette: bg {} fg {}", mode.label(), background, font);
        }
    }

    Ok(())
}
