use std::fs;
use std::path::PathBuf;

use glacial_settings::*;
use glacial_theme::{HexColor, StaticHost, ThemeMode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("fixtures")
        .join("settings")
}

fn read_fixture(name: &str) -> Value {
    let path = fixtures_dir().join(format!("{}.json", name));
    let content =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {:?}", path));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Bad fixture {:?}: {}", path, e))
}

fn hex(s: &str) -> HexColor {
    HexColor::parse(s).unwrap()
}

#[test]
fn generate_defaults_fixture() {
    let dir = fixtures_dir();
    fs::create_dir_all(&dir).unwrap();

    let document = to_document(&Settings::default()).unwrap();
    let json = serde_json::to_string_pretty(&document).unwrap();
    fs::write(dir.join("defaults.json"), &json).unwrap();

    let reparsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(load(Some(&reparsed)), Settings::default());
    assert!(validate_settings_content(&json, "defaults.json").is_valid());
}

#[test]
fn v1_legacy_document_is_migrated() {
    let raw = read_fixture("v1_legacy");
    let settings = load(Some(&raw));

    assert_eq!(settings.schema_version, SCHEMA_VERSION);
    assert_eq!(settings.tag_collector, "#tasks");
    assert_eq!(settings.meta_keys, vec!["due", "priority"]);
    assert_eq!(settings.overdue_font_weight, 700);
    assert_eq!(settings.due_today_font_weight, 500);
    assert!(settings.font_reset);

    let dark = settings.colors.get(ThemeMode::Dark);
    assert_eq!(dark.overdue.background_color, hex("#5A1010"));
    assert_eq!(dark.overdue.font_color, hex("#FFDDDD"));
    assert_eq!(dark.due_today.background_color, hex("#6B6A30"));
    let light = settings.colors.get(ThemeMode::Light);
    assert_eq!(light.due_today.background_color, hex("#FFF3A0"));

    let saved = to_document(&settings).unwrap();
    assert_eq!(saved["schemaVersion"], json!(2));
    assert_eq!(saved["colors"]["dark"]["overdueBackgroundColor"], "#5a1010");
}

#[test]
fn newer_document_round_trips_unknown_fields() {
    let raw = read_fixture("newer_schema");
    let settings = load(Some(&raw));

    assert_eq!(settings.schema_version, 3);
    assert!(!settings.follow_theme_colors);

    let saved = to_document(&settings).unwrap();
    assert_eq!(saved["schemaVersion"], json!(3));
    assert_eq!(saved["showBadges"], raw["showBadges"]);
    assert_eq!(saved["badgeStyle"], raw["badgeStyle"]);
    assert_eq!(saved["colors"]["highContrast"], raw["colors"]["highContrast"]);
    assert_eq!(
        saved["colors"]["dark"]["overdue"]["borderColor"],
        json!("#FF0000")
    );
    let defaults = to_document(&Settings::default()).unwrap();
    assert_eq!(saved["colors"]["light"], defaults["colors"]["light"]);

    let validation = validate_settings_content(&raw.to_string(), "newer_schema.json");
    assert!(validation.is_valid());
    assert!(validation
        .warnings
        .contains(&ValidationWarning::NewerSchema { found: 3 }));
}

#[test]
fn malformed_document_is_repaired() {
    let raw = read_fixture("malformed");
    let settings = load(Some(&raw));
    let defaults = Settings::default();

    assert_eq!(settings.tag_collector, defaults.tag_collector);
    assert_eq!(settings.meta_keys, defaults.meta_keys);
    assert_eq!(settings.font_reset, defaults.font_reset);
    assert!(!settings.follow_theme_colors);
    assert_eq!(settings.overdue_font_weight, 650);

    let dark = settings.colors.get(ThemeMode::Dark);
    assert_eq!(
        dark.overdue.background_color,
        defaults.colors.dark.overdue.background_color
    );
    assert_eq!(dark.overdue.font_color, hex("#ABC"));
    assert_eq!(dark.due_today, defaults.colors.dark.due_today);
    assert_eq!(settings.colors.light, defaults.colors.light);

    let validation = validate_settings_content(&raw.to_string(), "malformed.json");
    assert!(!validation.is_valid());
    assert!(validation
        .warnings
        .iter()
        .any(|w| matches!(w, ValidationWarning::FontWeightOffScale { value: 650, .. })));
}

#[test]
fn json_file_store_reads_fixture() {
    let store = JsonFileStore::new(fixtures_dir().join("v1_legacy.json"));
    let raw = store.read().unwrap();
    assert_eq!(raw, Some(read_fixture("v1_legacy")));
}

#[test]
fn corrupt_settings_file_is_left_untouched() {
    let dir = std::env::temp_dir().join(format!("glacial-corrupt-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("data.json");
    let corrupt = r##"{"tagCollector": "#mine", "customStuff": 1,}"##;
    fs::write(&path, corrupt).unwrap();

    let opened = SettingsManager::open(JsonFileStore::new(&path), StaticHost::builtin(true));
    assert!(matches!(opened, Err(StoreError::Parse { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), corrupt);

    fs::write(&path, r##"{"tagCollector": "#mine", "customStuff": 1}"##).unwrap();
    let mut manager =
        SettingsManager::open(JsonFileStore::new(&path), StaticHost::builtin(true)).unwrap();
    manager.set_font_reset(false).unwrap();

    let saved = JsonFileStore::new(&path).read().unwrap().unwrap();
    assert_eq!(saved["tagCollector"], "#mine");
    assert_eq!(saved["customStuff"], 1);
    assert_eq!(saved["fontReset"], false);
    assert!(!dir.join("data.json.tmp").exists());

    let _ = fs::remove_dir_all(&dir);
}
