//! Schema versioning for the persisted settings document.
//!
//! # Version History
//!
//! | Version | Changes |
//! |---------|---------|
//! | 1 | Initial layout, unstamped. Each mode's palette stored flat (`overdueBackgroundColor`, ...) |
//! | 2 | Added `schemaVersion`, `followThemeColors`, `fontReset`; palettes nested as `overdue` / `dueToday` pairs |
//!
//! # Breaking Changes (require SCHEMA_VERSION bump and a migration step)
//!
//! - Moving or renaming a field
//! - Changing a field's type
//!
//! # Non-Breaking Changes (safe without version bump)
//!
//! - Adding new fields with a default
//! - Adding keys inside an existing mapping
//!
//! # Compatibility Policy
//!
//! Documents are merged onto the current defaults, so older documents gain new
//! fields and newer documents keep the fields this build does not know about.
//! A document stamped with a newer version keeps its stamp on save.

use serde_json::Value;

/// Current schema version. Bump when making breaking changes.
pub const SCHEMA_VERSION: u32 = 2;

/// Version assumed for documents written before the stamp existed.
pub const LEGACY_VERSION: u32 = 1;

pub const VERSION_KEY: &str = "schemaVersion";

/// Schema version a raw persisted document was written with.
pub fn detect(raw: &Value) -> u32 {
    raw.get(VERSION_KEY)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(LEGACY_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect() {
        assert_eq!(detect(&json!({})), LEGACY_VERSION);
        assert_eq!(detect(&json!({"schemaVersion": 2})), 2);
        assert_eq!(detect(&json!({"schemaVersion": "2"})), LEGACY_VERSION);
        assert_eq!(detect(&json!({"schemaVersion": 7})), 7);
    }
}
