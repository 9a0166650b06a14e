use color_eyre::eyre::Result;
use glacial_settings::active_colors;
use glacial_theme::{contrast::WcagGrade, contrast_ratio, ColorState, ThemeMode};

use super::Context;

pub fn run(ctx: &Context, mode: Option<ThemeMode>) -> Result<()> {
    let manager = ctx.open()?;
    let mode = mode.unwrap_or_else(|| manager.current_mode());
    let host = ctx.host(mode == ThemeMode::Dark)?;
    let settings = manager.settings();
    let colors = active_colors(settings, mode, &host);

    let source = if settings.follow_theme_colors {
        format!("derived from host theme '{}'", host.name)
    } else {
        "stored palette".to_string()
    };
    println!("{} mode, {}", mode.label(), source);
    println!("{}", "-".repeat(56));
    println!(
        "{:<10} {:<9} {:<9} {:>8} {:<8} {}",
        "State", "Bg", "Fg", "Ratio", "Grade", "Weight"
    );

    for state in ColorState::ALL {
        let pair = colors.pair(state);
        let ratio = contrast_ratio(&pair.background_color, &pair.font_color);
        println!(
            "{:<10} {:<9} {:<9} {:>6.2}:1 {:<8} {}",
            state.label(),
            pair.background_color,
            pair.font_color,
            ratio,
            WcagGrade::from_ratio(ratio).label(),
            settings.font_weight(state)
        );
    }

    Ok(())
}
