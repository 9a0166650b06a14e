use std::io::Write;

use color_eyre::eyre::Result;

use super::Context;

pub fn run(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        print!("Restore default settings in {}? [y/N] ", ctx.settings_path().display());
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let mut manager = ctx.open()?;
    manager.reset_to_defaults()?;
    println!("Settings reset to defaults.");
    Ok(())
}
