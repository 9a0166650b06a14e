//! Structural deep merge over JSON-shaped values.

use serde_json::{Map, Value};

/// Merge `source` onto `target` in place and return `target`.
///
/// - A null or non-mapping `source` leaves `target` untouched.
/// - Sequences replace the target value wholesale; they are never merged
///   element by element.
/// - Mappings recurse, replacing a target value that is missing or not a
///   mapping with an empty one first.
/// - Scalars overwrite. Null-valued keys are skipped like absent ones.
/// - Keys only present in `target` are kept.
///
/// Keys are visited in `source` order; new keys are appended in that order.
pub fn deep_merge<'a>(target: &'a mut Value, source: &Value) -> &'a mut Value {
    let Value::Object(source) = source else {
        return target;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    if let Some(target_map) = target.as_object_mut() {
        for (key, value) in source {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    target_map.insert(key.clone(), Value::Array(items.clone()));
                }
                Value::Object(_) => {
                    let slot = target_map
                        .entry(key.clone())
                        .or_insert_with(|| Value::Object(Map::new()));
                    deep_merge(slot, value);
                }
                scalar => {
                    target_map.insert(key.clone(), scalar.clone());
                }
            }
        }
    }

    target
}
