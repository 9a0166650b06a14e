use color_eyre::eyre::Result;
use glacial_theme::contrast::{check_mode_colors, check_palette, print_results};
use glacial_theme::{derive_themed_palette, ThemeMode};

use super::Context;

pub fn run(ctx: &Context, verbose: bool) -> Result<()> {
    let manager = ctx.open()?;

    let mut results = check_palette(&manager.settings().colors);
    for mode in ThemeMode::ALL {
        let host = ctx.host(mode == ThemeMode::Dark)?;
        let variant = format!("live-{}", mode.key());
        results.extend(check_mode_colors(&variant, &derive_themed_palette(&host)));
    }

    print_results(&results, verbose);

    if results.iter().any(|r| !r.pass) {
        std::process::exit(1);
    }
    Ok(())
}
