//! Post-merge repair: make a merged document deserializable without
//! discarding anything that is still usable.

use glacial_theme::{ColorPart, ColorState, HexColor, ThemeMode};
use serde_json::Value;

/// JSON kind name, for messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether `value` has the same JSON shape as `default`.
///
/// Integer defaults require an `i64`-representable integer. Array elements are
/// checked against the default's first element.
pub fn same_shape(value: &Value, default: &Value) -> bool {
    match (value, default) {
        (Value::Bool(_), Value::Bool(_))
        | (Value::String(_), Value::String(_))
        | (Value::Object(_), Value::Object(_)) => true,
        (Value::Number(n), Value::Number(d)) => d.is_f64() || n.is_i64(),
        (Value::Array(items), Value::Array(default_items)) => match default_items.first() {
            Some(sample) => items.iter().all(|item| same_shape(item, sample)),
            None => true,
        },
        _ => false,
    }
}

/// The nearest integer to a fractional `value` when `default` is an integer.
///
/// `None` when `value` is already an integer, is not a number, or is out of
/// `i64` range.
pub fn rounded_integer(value: &Value, default: &Value) -> Option<i64> {
    if !default.is_i64() || value.is_i64() {
        return None;
    }
    let rounded = value.as_f64()?.round();
    (rounded >= i64::MIN as f64 && rounded <= i64::MAX as f64).then_some(rounded as i64)
}

/// Restore every key of `defaults` whose value in `doc` has the wrong shape.
///
/// Fractional numbers under integer defaults are rounded instead. Keys that `defaults` does not know about are left alone. Returns the
/// JSON pointers of the restored keys.
pub fn conform_to_defaults(doc: &mut Value, defaults: &Value) -> Vec<String> {
    let mut repaired = Vec::new();
    conform_at(doc, defaults, "", &mut repaired);
    repaired
}

fn conform_at(doc: &mut Value, defaults: &Value, path: &str, repaired: &mut Vec<String>) {
    let (Some(doc_map), Some(default_map)) = (doc.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_map {
        let pointer = format!("{}/{}", path, key);
        if !doc_map.contains_key(key) {
            doc_map.insert(key.clone(), default_value.clone());
            continue;
        }
        let Some(value) = doc_map.get_mut(key) else {
            continue;
        };
        if let Some(rounded) = rounded_integer(value, default_value) {
            tracing::warn!(
                field = %pointer,
                found = %value,
                rounded,
                "settings field is not an integer, rounding"
            );
            *value = Value::from(rounded);
        } else if same_shape(value, default_value) {
            conform_at(value, default_value, &pointer, repaired);
        } else {
            tracing::warn!(
                field = %pointer,
                found = kind_name(value),
                expected = kind_name(default_value),
                "settings field has the wrong type, restoring default"
            );
            *value = default_value.clone();
            repaired.push(pointer);
        }
    }
}

/// JSON pointer of one stored palette color.
pub fn color_pointer(mode: ThemeMode, state: ColorState, part: ColorPart) -> String {
    format!("/colors/{}/{}/{}", mode.key(), state.key(), part.key())
}

/// Normalize every stored palette color; restore invalid ones from `defaults`.
///
/// Returns the JSON pointers of the restored colors.
pub fn sanitize_colors(doc: &mut Value, defaults: &Value) -> Vec<String> {
    let mut repaired = Vec::new();

    for mode in ThemeMode::ALL {
        for state in ColorState::ALL {
            for part in ColorPart::ALL {
                let pointer = color_pointer(mode, state, part);
                let stored = doc.pointer(&pointer).and_then(Value::as_str);
                let fixed = match stored.map(HexColor::parse) {
                    Some(Ok(color)) => Value::from(color.as_str()),
                    _ => {
                        tracing::warn!(
                            field = %pointer,
                            value = ?stored,
                            "invalid stored color, restoring default"
                        );
                        repaired.push(pointer.clone());
                        defaults.pointer(&pointer).cloned().unwrap_or(Value::Null)
                    }
                };
                if let Some(slot) = doc.pointer_mut(&pointer) {
                    *slot = fixed;
                }
            }
        }
    }

    repaired
}
