//! Status-color engine for the Glacial to-do list.
//!
//! Pure color math and WCAG contrast helpers, plus derivation of the
//! overdue / due-today palette from a live host theme through the
//! [`ThemeHost`] capability.

pub mod color;
pub mod contrast;
pub mod css;
pub mod derive;
mod error;
pub mod host;
pub mod introspect;
mod types;

pub use color::{contrast_ratio, is_hex_color, normalize_hex, relative_luminance};
pub use contrast::{best_foreground_on, meets_aa, meets_contrast_threshold, AA_NORMAL};
pub use derive::derive_themed_palette;
pub use error::{ColorInputError, HostError};
pub use host::{load_host_file, parse_host_toml, StaticHost, ThemeHost};
pub use introspect::{color_to_hex, current_theme_mode, read_theme_variable, readable_text_for};
pub use types::{ColorPair, ColorPart, ColorState, HexColor, ModeColors, Palette, Rgb, ThemeMode};
