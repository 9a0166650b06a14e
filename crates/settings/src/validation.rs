use std::fmt;
use std::path::Path;

use glacial_theme::{ColorPart, ColorState, HexColor, ThemeMode};
use serde_json::{Map, Value};

use crate::migrate::has_flat_palette;
use crate::repair::{kind_name, rounded_integer, same_shape};
use crate::types::{is_valid_font_weight, Settings};
use crate::version::{self, SCHEMA_VERSION, VERSION_KEY};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Unreadable {
        message: String,
    },
    InvalidJson {
        message: String,
        line: usize,
        col: usize,
    },
    NotAnObject {
        found: &'static str,
    },
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    InvalidColor {
        mode: ThemeMode,
        state: ColorState,
        part: ColorPart,
        value: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { message } => write!(f, "Could not read file: {}", message),
            Self::InvalidJson { message, line, col } => {
                write!(f, "Invalid JSON at line {}, col {}: {}", line, col, message)
            }
            Self::NotAnObject { found } => {
                write!(f, "Settings must be a JSON object, found {}", found)
            }
            Self::WrongType {
                field,
                expected,
                found,
            } => write!(
                f,
                "'{}' should be {} but is {} (default will be used)",
                field, expected, found
            ),
            Self::InvalidColor {
                mode,
                state,
                part,
                value,
            } => write!(
                f,
                "[{}] Invalid {} {}: \"{}\" (expected #RGB or #RRGGBB hex)",
                mode.key(),
                state.key(),
                part.key(),
                value
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    FontWeightOffScale { field: String, value: i64 },
    NotAnInteger { field: String, value: f64, rounded: i64 },
    UnknownField { field: String },
    MissingMode { mode: ThemeMode },
    LegacyPalette { mode: ThemeMode },
    NewerSchema { found: u32 },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontWeightOffScale { field, value } => write!(
                f,
                "'{}' is {} which the settings slider cannot show (100..=900, step 100)",
                field, value
            ),
            Self::NotAnInteger {
                field,
                value,
                rounded,
            } => write!(
                f,
                "'{}' should be an integer but is {} (loaded as {})",
                field, value, rounded
            ),
            Self::UnknownField { field } => {
                write!(f, "Unknown field '{}' (kept as-is)", field)
            }
            Self::MissingMode { mode } => {
                write!(f, "No [{}] palette (defaults will be used)", mode.key())
            }
            Self::LegacyPalette { mode } => write!(
                f,
                "[{}] palette uses the version 1 flat layout (migrated on load)",
                mode.key()
            ),
            Self::NewerSchema { found } => write!(
                f,
                "Written by schema version {}, this build knows {}",
                found, SCHEMA_VERSION
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub path: String,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn parse_json_with_location(content: &str) -> Result<Value, ValidationError> {
    serde_json::from_str(content).map_err(|e| {
        let message = e.to_string();
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        ValidationError::InvalidJson {
            message,
            line: e.line(),
            col: e.column(),
        }
    })
}

fn check_types(
    doc: &Map<String, Value>,
    defaults: &Map<String, Value>,
    path: &str,
    result: &mut ValidationResult,
) {
    for (key, default_value) in defaults {
        let Some(value) = doc.get(key) else {
            continue;
        };
        let field = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };
        if let Some(rounded) = rounded_integer(value, default_value) {
            result.warnings.push(ValidationWarning::NotAnInteger {
                value: value.as_f64().unwrap_or_default(),
                field,
                rounded,
            });
        } else if !same_shape(value, default_value) {
            result.errors.push(ValidationError::WrongType {
                field,
                expected: kind_name(default_value),
                found: kind_name(value),
            });
        } else if field == "colors" {
            continue;
        } else if let (Some(inner), Some(inner_defaults)) =
            (value.as_object(), default_value.as_object())
        {
            check_types(inner, inner_defaults, &field, result);
        }
    }
}

fn check_palette(colors: &Map<String, Value>, result: &mut ValidationResult) {
    for mode in ThemeMode::ALL {
        let Some(mode_colors) = colors.get(mode.key()) else {
            result.warnings.push(ValidationWarning::MissingMode { mode });
            continue;
        };
        if !mode_colors.is_object() {
            result.errors.push(ValidationError::WrongType {
                field: format!("colors.{}", mode.key()),
                expected: "object",
                found: kind_name(mode_colors),
            });
            continue;
        }
        if has_flat_palette(mode_colors) {
            result.warnings.push(ValidationWarning::LegacyPalette { mode });
        }
        for state in ColorState::ALL {
            for part in ColorPart::ALL {
                let Some(value) = mode_colors.get(state.key()).and_then(|p| p.get(part.key()))
                else {
                    continue;
                };
                let valid = value.as_str().is_some_and(|s| HexColor::parse(s).is_ok());
                if !valid {
                    result.errors.push(ValidationError::InvalidColor {
                        mode,
                        state,
                        part,
                        value: value
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| value.to_string()),
                    });
                }
            }
        }
    }
}

/// Check a persisted settings document without loading it.
///
/// Errors are fields that `load` would replace with defaults; warnings are
/// fields that load fine but are worth a look. Palette colors are checked
/// per mode rather than by shape.
pub fn validate_settings_content(content: &str, path: &str) -> ValidationResult {
    let mut result = ValidationResult::new(path);

    let value = match parse_json_with_location(content) {
        Ok(v) => v,
        Err(e) => {
            result.errors.push(e);
            return result;
        }
    };

    let Some(doc) = value.as_object() else {
        result.errors.push(ValidationError::NotAnObject {
            found: kind_name(&value),
        });
        return result;
    };

    let defaults = match serde_json::to_value(Settings::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    if doc.contains_key(VERSION_KEY) {
        let found = version::detect(&value);
        if found > SCHEMA_VERSION {
            result.warnings.push(ValidationWarning::NewerSchema { found });
        }
    }

    check_types(doc, &defaults, "", &mut result);

    if let Some(colors) = doc.get("colors").and_then(Value::as_object) {
        check_palette(colors, &mut result);
    }

    for state in ColorState::ALL {
        let field = match state {
            ColorState::Overdue => "overdueFontWeight",
            ColorState::DueToday => "dueTodayFontWeight",
        };
        let weight = doc.get(field).and_then(|v| {
            v.as_i64()
                .or_else(|| defaults.get(field).and_then(|d| rounded_integer(v, d)))
        });
        if let Some(weight) = weight {
            if !is_valid_font_weight(weight) {
                result.warnings.push(ValidationWarning::FontWeightOffScale {
                    field: field.to_string(),
                    value: weight,
                });
            }
        }
    }

    for key in doc.keys() {
        if !defaults.contains_key(key) {
            result.warnings.push(ValidationWarning::UnknownField { field: key.clone() });
        }
    }

    result
}

pub fn validate_settings_file(path: &Path) -> ValidationResult {
    let path_str = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(content) => validate_settings_content(&content, &path_str),
        Err(e) => {
            let mut result = ValidationResult::new(&path_str);
            result.errors.push(ValidationError::Unreadable {
                message: e.to_string(),
            });
            result
        }
    }
}

pub fn print_validation_results(result: &ValidationResult, verbose: bool) {
    println!("{}", "=".repeat(80));
    println!("SETTINGS VALIDATION");
    println!("{}", "=".repeat(80));
    println!("\nFile: {}", result.path);

    if !result.errors.is_empty() {
        println!("\nX ERRORS ({})\n", result.errors.len());
        for error in &result.errors {
            println!("  * {}", error);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n! WARNINGS ({})\n", result.warnings.len());
        for warning in &result.warnings {
            println!("  * {}", warning);
        }
    }

    if verbose && result.is_valid() {
        println!("\nSchema version: {}", SCHEMA_VERSION);
    }

    println!();
    if result.is_valid() && !result.has_warnings() {
        println!("+ Settings passed validation!");
    } else if result.is_valid() {
        println!("+ Settings are valid (with some warnings)");
    } else {
        println!("Invalid fields fall back to their defaults when loaded.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_defaults_document() {
        let content = serde_json::to_string_pretty(&Settings::default()).unwrap();
        let result = validate_settings_content(&content, "data.json");
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
        assert!(!result.has_warnings(), "unexpected warnings: {:?}", result.warnings);
    }

    #[test]
    fn test_validate_invalid_json_location() {
        let content = "{\n  \"tagCollector\": \"#todo\",\n  oops\n}";
        let result = validate_settings_content(content, "data.json");
        match &result.errors[..] {
            [ValidationError::InvalidJson { line, .. }] => assert_eq!(*line, 3),
            other => panic!("expected one InvalidJson, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_not_an_object() {
        let result = validate_settings_content("[1, 2]", "data.json");
        assert_eq!(
            result.errors,
            vec![ValidationError::NotAnObject { found: "array" }]
        );
    }

    #[test]
    fn test_validate_wrong_types_and_colors() {
        let content = r##"{
            "fontReset": "yes",
            "colors": {
                "dark": {"overdue": {"backgroundColor": "#12", "fontColor": 7}},
                "light": {"dueToday": {"fontColor": "#fff"}}
            }
        }"##;
        let result = validate_settings_content(content, "data.json");

        assert!(result.errors.contains(&ValidationError::WrongType {
            field: "fontReset".to_string(),
            expected: "boolean",
            found: "string",
        }));
        assert!(result.errors.contains(&ValidationError::InvalidColor {
            mode: ThemeMode::Dark,
            state: ColorState::Overdue,
            part: ColorPart::Background,
            value: "#12".to_string(),
        }));
        assert!(result.errors.contains(&ValidationError::InvalidColor {
            mode: ThemeMode::Dark,
            state: ColorState::Overdue,
            part: ColorPart::Font,
            value: "7".to_string(),
        }));
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_validate_warnings() {
        let content = r##"{
            "schemaVersion": 9,
            "overdueFontWeight": 650,
            "pluginExtra": true,
            "colors": {"dark": {"overdueFontColor": "#ffffff"}}
        }"##;
        let result = validate_settings_content(content, "data.json");

        assert!(result.is_valid());
        assert!(result.warnings.contains(&ValidationWarning::NewerSchema { found: 9 }));
        assert!(result.warnings.contains(&ValidationWarning::FontWeightOffScale {
            field: "overdueFontWeight".to_string(),
            value: 650,
        }));
        assert!(result.warnings.contains(&ValidationWarning::UnknownField {
            field: "pluginExtra".to_string(),
        }));
        assert!(result.warnings.contains(&ValidationWarning::LegacyPalette {
            mode: ThemeMode::Dark,
        }));
        assert!(result.warnings.contains(&ValidationWarning::MissingMode {
            mode: ThemeMode::Light,
        }));
    }

    #[test]
    fn test_validate_fractional_font_weight() {
        let result =
            validate_settings_content(r#"{"overdueFontWeight": 650.5}"#, "data.json");

        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
        assert!(result.warnings.contains(&ValidationWarning::NotAnInteger {
            field: "overdueFontWeight".to_string(),
            value: 650.5,
            rounded: 651,
        }));
        assert!(result.warnings.contains(&ValidationWarning::FontWeightOffScale {
            field: "overdueFontWeight".to_string(),
            value: 651,
        }));
    }

    #[test]
    fn test_validate_missing_file() {
        let result = validate_settings_file(Path::new("/nonexistent/glacial/data.json"));
        assert!(matches!(
            result.errors[..],
            [ValidationError::Unreadable { .. }]
        ));
    }
}
