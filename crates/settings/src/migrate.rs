//! Upgrade raw persisted documents from older schema versions.
//!
//! Migrations only add data. Keys the old layout used are left in place so a
//! downgrade still finds them.

use glacial_theme::{ColorPart, ColorState, ThemeMode};
use serde_json::{Map, Value};

use crate::version::{self, SCHEMA_VERSION};

/// Flat palette keys used by schema version 1.
pub const LEGACY_PALETTE_KEYS: [(ColorState, ColorPart, &str); 4] = [
    (ColorState::Overdue, ColorPart::Background, "overdueBackgroundColor"),
    (ColorState::Overdue, ColorPart::Font, "overdueFontColor"),
    (ColorState::DueToday, ColorPart::Background, "dueTodayBackgroundColor"),
    (ColorState::DueToday, ColorPart::Font, "dueTodayFontColor"),
];

/// Bring `raw` up to [`SCHEMA_VERSION`] in place. Returns the version it was written with.
pub fn upgrade(raw: &mut Value) -> u32 {
    let from = version::detect(raw);
    if from < 2 {
        let lifted = lift_flat_palettes(raw);
        tracing::debug!(from, to = SCHEMA_VERSION, lifted, "migrated legacy settings");
    }
    from
}

/// Copy v1 flat palette keys into nested `overdue` / `dueToday` pairs.
///
/// Nested values that already exist win. Returns the number of values copied.
pub fn lift_flat_palettes(raw: &mut Value) -> usize {
    let Some(colors) = raw.get_mut("colors").and_then(Value::as_object_mut) else {
        return 0;
    };

    let mut lifted = 0;
    for mode in ThemeMode::ALL {
        let Some(mode_map) = colors.get_mut(mode.key()).and_then(Value::as_object_mut) else {
            continue;
        };
        for (state, part, legacy_key) in LEGACY_PALETTE_KEYS {
            let Some(value) = mode_map.get(legacy_key).cloned() else {
                continue;
            };
            let pair = mode_map
                .entry(state.key())
                .or_insert_with(|| Value::Object(Map::new()));
            if !pair.is_object() {
                *pair = Value::Object(Map::new());
            }
            if let Some(pair) = pair.as_object_mut() {
                if !pair.contains_key(part.key()) {
                    pair.insert(part.key().to_string(), value);
                    lifted += 1;
                }
            }
        }
    }
    lifted
}

/// Whether a mode's palette mapping still uses the v1 flat keys.
pub fn has_flat_palette(mode_colors: &Value) -> bool {
    LEGACY_PALETTE_KEYS
        .iter()
        .any(|(_, _, key)| mode_colors.get(key).is_some())
}
