use serde_json::Value;

use crate::merge::deep_merge;
use crate::migrate;
use crate::repair::{conform_to_defaults, sanitize_colors};
use crate::types::Settings;
use crate::version::{self, SCHEMA_VERSION, VERSION_KEY};

/// Build settings from a persisted blob. Never fails.
///
/// Starts from [`Settings::default`], upgrades and merges `raw` onto it, then
/// restores any known field that came back malformed. `None`, `null` and
/// non-mapping blobs give the defaults. Unknown fields survive into
/// `Settings::extra` and the nested `extra` maps.
pub fn load(raw: Option<&Value>) -> Settings {
    let defaults = Settings::default();
    let default_doc = match serde_json::to_value(&defaults) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize default settings");
            return defaults;
        }
    };

    let Some(raw) = raw.filter(|v| v.is_object()) else {
        if raw.is_some_and(|v| !v.is_null()) {
            tracing::warn!("persisted settings are not a mapping, using defaults");
        }
        return defaults;
    };

    let mut raw = raw.clone();
    let from = migrate::upgrade(&mut raw);
    if from > SCHEMA_VERSION {
        tracing::warn!(
            from,
            current = SCHEMA_VERSION,
            "settings were written by a newer version, unknown fields are kept as-is"
        );
    }

    let mut doc = default_doc.clone();
    deep_merge(&mut doc, &raw);
    doc[VERSION_KEY] = Value::from(version::detect(&doc).max(SCHEMA_VERSION));

    let mut repaired = conform_to_defaults(&mut doc, &default_doc);
    repaired.extend(sanitize_colors(&mut doc, &default_doc));
    if !repaired.is_empty() {
        tracing::info!(count = repaired.len(), fields = ?repaired, "repaired settings fields");
    }

    match serde_json::from_value(doc) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "merged settings did not deserialize, using defaults");
            defaults
        }
    }
}

/// The document `save` hands to the store.
pub fn to_document(settings: &Settings) -> Result<Value, serde_json::Error> {
    serde_json::to_value(settings)
}
