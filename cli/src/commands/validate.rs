use color_eyre::eyre::Result;
use glacial_settings::{print_validation_results, validate_settings_file};

use super::Context;

pub fn run(ctx: &Context, verbose: bool) -> Result<()> {
    let path = ctx.settings_path();
    if !path.exists() {
        println!("No settings file at {}", path.display());
        println!("Defaults are in use; the file is created on the first change.");
        return Ok(());
    }

    let result = validate_settings_file(&path);
    print_validation_results(&result, verbose);

    if !result.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}
