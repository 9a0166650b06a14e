use glacial_theme::{ColorPair, ColorState, ModeColors, Palette, Rgb};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::version::SCHEMA_VERSION;

pub const FONT_WEIGHT_MIN: i64 = 100;
pub const FONT_WEIGHT_MAX: i64 = 900;
pub const FONT_WEIGHT_STEP: i64 = 100;
pub const DEFAULT_FONT_WEIGHT: i64 = 600;

pub const DEFAULT_TAG_COLLECTOR: &str = "#todo";
pub const DEFAULT_META_KEYS: [&str; 4] = ["due", "priority", "topic", "completion"];

/// Whether `weight` is one the weight slider can produce (100..=900, step 100).
pub fn is_valid_font_weight(weight: i64) -> bool {
    (FONT_WEIGHT_MIN..=FONT_WEIGHT_MAX).contains(&weight) && weight % FONT_WEIGHT_STEP == 0
}

/// The persisted plugin settings document.
///
/// Field names serialize in camelCase to match the stored JSON. Fields this
/// build does not know about are kept in `extra` and written back on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub schema_version: u32,
    /// Tag marking lines to collect, e.g. `#todo`.
    pub tag_collector: String,
    /// Inline metadata keys, in display and parse order.
    pub meta_keys: Vec<String>,
    pub font_reset: bool,
    /// Derive colors from the live host theme instead of `colors`.
    pub follow_theme_colors: bool,
    pub colors: Palette,
    /// Not range-checked here; see [`is_valid_font_weight`].
    pub overdue_font_weight: i64,
    pub due_today_font_weight: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            tag_collector: DEFAULT_TAG_COLLECTOR.to_string(),
            meta_keys: DEFAULT_META_KEYS.iter().map(|k| k.to_string()).collect(),
            font_reset: true,
            follow_theme_colors: true,
            colors: default_palette(),
            overdue_font_weight: DEFAULT_FONT_WEIGHT,
            due_today_font_weight: DEFAULT_FONT_WEIGHT,
            extra: Map::new(),
        }
    }
}

impl Settings {
    pub fn font_weight(&self, state: ColorState) -> i64 {
        match state {
            ColorState::Overdue => self.overdue_font_weight,
            ColorState::DueToday => self.due_today_font_weight,
        }
    }

    pub fn set_font_weight(&mut self, state: ColorState, weight: i64) {
        match state {
            ColorState::Overdue => self.overdue_font_weight = weight,
            ColorState::DueToday => self.due_today_font_weight = weight,
        }
    }
}

fn pair(bg: Rgb, fg: Rgb) -> ColorPair {
    ColorPair::new(bg.to_hex(), fg.to_hex())
}

/// Built-in palettes for both modes.
pub fn default_palette() -> Palette {
    let dark = ModeColors::new(
        pair(Rgb::new(0x6F, 0x1B, 0x1B), Rgb::new(0xFF, 0x6B, 0x6B)),
        pair(Rgb::new(0x96, 0x94, 0x54), Rgb::WHITE),
    );
    let light = ModeColors::new(
        pair(Rgb::new(0xFF, 0x6B, 0x6B), Rgb::BLACK),
        pair(Rgb::new(0xFF, 0xFF, 0x80), Rgb::BLACK),
    );
    Palette::new(dark, light)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_font_weight_validity() {
        for w in (100..=900).step_by(100) {
            assert!(is_valid_font_weight(w), "{}", w);
        }
        for w in [0, 50, 150, 650, 950, 1000, -100] {
            assert!(!is_valid_font_weight(w), "{}", w);
        }
    }

    #[test]
    fn test_default_serializes_camel_case() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["tagCollector"], "#todo");
        assert_eq!(value["metaKeys"], json!(["due", "priority", "topic", "completion"]));
        assert_eq!(value["followThemeColors"], true);
        assert_eq!(value["overdueFontWeight"], 600);
        assert_eq!(value["colors"]["dark"]["overdue"]["fontColor"], "#FF6B6B");
        assert_eq!(value["colors"]["light"]["dueToday"]["backgroundColor"], "#FFFF80");
        assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let mut value = serde_json::to_value(Settings::default()).unwrap();
        value["futureFlag"] = json!({"enabled": true});
        let settings: Settings = serde_json::from_value(value).unwrap();
        assert_eq!(settings.extra["futureFlag"], json!({"enabled": true}));

        let back = serde_json::to_value(&settings).unwrap();
        assert_eq!(back["futureFlag"]["enabled"], true);
    }

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv(" due, priority ,, topic ,"), ["due", "priority", "topic"]);
        assert!(parse_csv(" , ").is_empty());
    }
}
