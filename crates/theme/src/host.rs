//! The host theme capability and a file-backed implementation.
//!
//! A host exposes its appearance flag, its design tokens (CSS custom
//! properties) and a color resolver. `StaticHost` reads tokens from a TOML file
//! with one table per appearance:
//!
//! ```toml
//! name = "Obsidian default"
//!
//! [dark]
//! "--color-red" = "#fb464c"
//!
//! [light]
//! "--color-red" = "#e93147"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::css;
use crate::error::HostError;
use crate::types::Rgb;

/// Read-only view of the host application's live visual state.
pub trait ThemeHost {
    /// Whether the dark appearance is active.
    fn is_dark(&self) -> bool;

    /// Raw value of a design token such as `--color-red`, untrimmed.
    fn resolve_token(&self, name: &str) -> Option<String>;

    /// Resolve any color expression the host understands to an opaque RGB triple.
    fn resolve_color(&self, expr: &str) -> Option<Rgb>;
}

impl<T: ThemeHost + ?Sized> ThemeHost for &T {
    fn is_dark(&self) -> bool {
        (**self).is_dark()
    }

    fn resolve_token(&self, name: &str) -> Option<String> {
        (**self).resolve_token(name)
    }

    fn resolve_color(&self, expr: &str) -> Option<Rgb> {
        (**self).resolve_color(expr)
    }
}

#[derive(Debug, Deserialize)]
struct HostFile {
    name: Option<String>,
    dark: Option<BTreeMap<String, String>>,
    light: Option<BTreeMap<String, String>>,
}

/// A host whose tokens come from a fixed table per appearance.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    pub name: String,
    dark: bool,
    dark_tokens: BTreeMap<String, String>,
    light_tokens: BTreeMap<String, String>,
}

impl StaticHost {
    pub fn new(name: impl Into<String>, dark: bool) -> Self {
        Self {
            name: name.into(),
            dark,
            ..Self::default()
        }
    }

    /// Token values of the default Obsidian theme.
    pub fn builtin(dark: bool) -> Self {
        Self::new("builtin", dark)
            .with_token(true, "--color-red", "#fb464c")
            .with_token(true, "--color-yellow", "#e0de71")
            .with_token(true, "--color-red-rgb", "251, 70, 76")
            .with_token(true, "--background-modifier-error", "rgba(var(--color-red-rgb), 0.4)")
            .with_token(false, "--color-red", "#e93147")
            .with_token(false, "--color-yellow", "#e0ac00")
            .with_token(false, "--color-red-rgb", "233, 49, 71")
            .with_token(false, "--background-modifier-error", "rgba(var(--color-red-rgb), 0.4)")
    }

    pub fn with_token(mut self, dark: bool, name: &str, value: &str) -> Self {
        self.tokens_mut(dark).insert(name.to_string(), value.to_string());
        self
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    fn tokens(&self) -> &BTreeMap<String, String> {
        if self.dark {
            &self.dark_tokens
        } else {
            &self.light_tokens
        }
    }

    fn tokens_mut(&mut self, dark: bool) -> &mut BTreeMap<String, String> {
        if dark {
            &mut self.dark_tokens
        } else {
            &mut self.light_tokens
        }
    }
}

impl ThemeHost for StaticHost {
    fn is_dark(&self) -> bool {
        self.dark
    }

    fn resolve_token(&self, name: &str) -> Option<String> {
        self.tokens().get(name).cloned()
    }

    fn resolve_color(&self, expr: &str) -> Option<Rgb> {
        css::parse_color(expr, |name| self.resolve_token(name))
    }
}

pub fn parse_host_toml(content: &str, dark: bool) -> Result<StaticHost, HostError> {
    let file: HostFile = toml::from_str(content)?;

    if file.dark.is_none() && file.light.is_none() {
        return Err(HostError::NoVariants);
    }

    Ok(StaticHost {
        name: file.name.unwrap_or_else(|| "custom".to_string()),
        dark,
        dark_tokens: file.dark.unwrap_or_default(),
        light_tokens: file.light.unwrap_or_default(),
    })
}

pub fn load_host_file(path: &Path, dark: bool) -> Result<StaticHost, HostError> {
    let content = fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let host = parse_host_toml(&content, dark)?;
    tracing::debug!(path = %path.display(), name = %host.name, "loaded host theme");
    Ok(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_toml_picks_variant() {
        let content = r##"
name = "Minimal"

[dark]
"--color-red" = "#ff0000"

[light]
"--color-red" = "rgb(200, 0, 0)"
"##;
        let mut host = parse_host_toml(content, true).unwrap();
        assert_eq!(host.name, "Minimal");
        assert_eq!(host.resolve_token("--color-red").as_deref(), Some("#ff0000"));

        host.set_dark(false);
        assert!(!host.is_dark());
        assert_eq!(host.resolve_color("var(--color-red)"), Some(Rgb::new(200, 0, 0)));
    }

    #[test]
    fn test_parse_host_toml_requires_variant() {
        assert!(matches!(
            parse_host_toml("name = \"x\"", true),
            Err(HostError::NoVariants)
        ));
        assert!(matches!(
            parse_host_toml("name = ", true),
            Err(HostError::Toml(_))
        ));
    }

    #[test]
    fn test_builtin_translucent_modifier_does_not_resolve() {
        let host = StaticHost::builtin(true);
        assert_eq!(host.resolve_color("var(--background-modifier-error)"), None);
        assert_eq!(host.resolve_color("var(--color-red)"), Some(Rgb::new(251, 70, 76)));
    }
}
