mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use glacial_theme::{ColorPart, ColorState, ThemeMode};

use config::{ensure_dirs, AppearanceMode, CliConfig, LogLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Overdue,
    #[value(alias = "today")]
    DueToday,
}

impl From<StateArg> for ColorState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Overdue => ColorState::Overdue,
            StateArg::DueToday => ColorState::DueToday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PartArg {
    #[value(alias = "bg")]
    Background,
    #[value(alias = "fg")]
    Font,
}

impl From<PartArg> for ColorPart {
    fn from(arg: PartArg) -> Self {
        match arg {
            PartArg::Background => ColorPart::Background,
            PartArg::Font => ColorPart::Font,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Dark,
    Light,
}

impl From<ModeArg> for ThemeMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Dark => ThemeMode::Dark,
            ModeArg::Light => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SetCommands {
    /// Tag that marks a list as the to-do collector
    Tag { value: String },

    /// Metadata keys shown on each task, comma-separated
    #[command(alias = "meta")]
    MetaKeys { csv: String },

    /// Reset font styling inside highlighted tasks
    FontReset {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Derive status colors from the host theme instead of the stored palette
    #[command(alias = "follow")]
    FollowTheme {
        #[arg(action = clap::ArgAction::Set)]
        follow: bool,
    },

    /// Font weight for a status (100-900, step 100)
    #[command(alias = "weight")]
    FontWeight { state: StateArg, weight: i64 },

    /// One stored palette color
    Color {
        state: StateArg,
        part: PartArg,
        value: String,

        /// Palette to edit (defaults to the current appearance)
        #[arg(short, long)]
        mode: Option<ModeArg>,
    },

    /// A stored background, with black or white text picked for contrast
    #[command(alias = "bg")]
    Background {
        state: StateArg,
        value: String,

        /// Palette to edit (defaults to the current appearance)
        #[arg(short, long)]
        mode: Option<ModeArg>,
    },
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the current settings (default)
    Show {
        /// Print the stored JSON document
        #[arg(long)]
        json: bool,
    },

    /// Show the status colors in effect
    Colors {
        /// Appearance to show (defaults to the current one)
        #[arg(short, long)]
        mode: Option<ModeArg>,
    },

    /// Check status colors for WCAG contrast issues
    #[command(alias = "check")]
    Contrast {
        /// Show passing checks too
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate the settings file without changing it
    Validate {
        #[arg(short, long)]
        verbose: bool,
    },

    /// Change a setting and save it
    Set {
        #[command(subcommand)]
        command: SetCommands,
    },

    /// Show or edit CLI configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(short, long)]
        edit: bool,
    },

    /// Restore default settings
    Reset {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Settings and adaptive status colors for the Glacial to-do list
#[derive(Debug, Parser)]
#[command(name = "glacial", version, verbatim_doc_comment)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Appearance mode
    #[arg(short, long, global = true, value_enum, ignore_case = true)]
    appearance: Option<AppearanceMode>,

    /// Settings JSON file
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Host theme TOML file
    #[arg(long, global = true)]
    host_theme: Option<PathBuf>,

    /// Log level for this run
    #[arg(long, global = true, value_enum, ignore_case = true)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let mut config = CliConfig::load();
    let _guard = logging::init(&config, cli.log_level);

    config.merge_with_args(cli.appearance, cli.settings, cli.host_theme);
    let ctx = commands::Context::new(config);

    match cli.command.unwrap_or(Commands::Show { json: false }) {
        Commands::Show { json } => commands::show::run(&ctx, json),
        Commands::Colors { mode } => commands::colors::run(&ctx, mode.map(Into::into)),
        Commands::Contrast { verbose } => commands::contrast::run(&ctx, verbose),
        Commands::Validate { verbose } => commands::validate::run(&ctx, verbose),
        Commands::Set { command } => commands::set::run(&ctx, command),
        Commands::Config { path, reset, edit } => commands::config::run(&ctx, path, reset, edit),
        Commands::Reset { yes } => commands::reset::run(&ctx, yes),
    }
}
