use std::path::PathBuf;

use thiserror::Error;

/// A color value entered by the user that cannot become a `HexColor`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorInputError {
    #[error("color value is empty")]
    Empty,
    #[error("invalid color \"{input}\" (use #RGB or #RRGGBB)")]
    Invalid { input: String },
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read host theme {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid host theme TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("host theme must have at least one [dark] or [light] token table")]
    NoVariants,
}
