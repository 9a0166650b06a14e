use glacial_theme::ColorInputError;
use thiserror::Error;

use crate::store::StoreError;
use crate::types::{FONT_WEIGHT_MAX, FONT_WEIGHT_MIN, FONT_WEIGHT_STEP};

/// A rejected settings change. The in-memory settings are left as they were
/// for every variant except `Store`.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Color(#[from] ColorInputError),
    #[error(
        "font weight {value} is not one of {}..={} in steps of {}",
        FONT_WEIGHT_MIN,
        FONT_WEIGHT_MAX,
        FONT_WEIGHT_STEP
    )]
    FontWeight { value: i64 },
    #[error("tag collector cannot be empty")]
    EmptyTag,
    #[error(transparent)]
    Store(#[from] StoreError),
}
