//! Persisted settings for the Glacial to-do list.
//!
//! Raw documents of any schema version are upgraded, deep-merged onto the
//! defaults and repaired by [`load`]. [`SettingsManager`] owns the result,
//! answers which palette is active, and writes every accepted change back
//! through a [`SettingsStore`].

mod error;
mod load;
pub mod manager;
pub mod merge;
pub mod migrate;
pub mod repair;
pub mod store;
mod types;
pub mod validation;
pub mod version;

pub use error::SettingsError;
pub use load::{load, to_document};
pub use manager::{active_colors, save, SettingsManager};
pub use merge::deep_merge;
pub use store::{JsonFileStore, MemoryStore, SettingsStore, StoreError};
pub use types::{
    default_palette, is_valid_font_weight, parse_csv, Settings, DEFAULT_FONT_WEIGHT,
    DEFAULT_META_KEYS, DEFAULT_TAG_COLLECTOR, FONT_WEIGHT_MAX, FONT_WEIGHT_MIN, FONT_WEIGHT_STEP,
};
pub use validation::{
    print_validation_results, validate_settings_content, validate_settings_file,
    ValidationError, ValidationResult, ValidationWarning,
};
pub use version::{LEGACY_VERSION, SCHEMA_VERSION};
