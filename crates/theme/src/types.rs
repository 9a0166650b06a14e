//! Core theme types.
//!
//! This module defines the fundamental types for the status-color system:
//! - `Rgb` - resolved RGB triple with luminance math
//! - `HexColor` - validated, canonical `#RGB` / `#RRGGBB` string
//! - `ThemeMode` - the host's dark or light appearance
//! - `ColorPair` / `ModeColors` / `Palette` - status colors per mode

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::{is_hex_color, normalize_hex};
use crate::error::ColorInputError;

/// RGB color representation.
///
/// Each component is a value from 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a new color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (e.g., "#ffffff", "fff").
    ///
    /// Three-digit forms are expanded by doubling each digit.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let mut digits = hex.chars().filter_map(|c| c.to_digit(16));
                let mut next = || digits.next().map(|d| (d * 17) as u8);
                Some(Self::new(next()?, next()?, next()?))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Convert to a canonical 6-digit uppercase hex color (e.g., "#FFFFFF").
    pub fn to_hex(&self) -> HexColor {
        HexColor(format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b))
    }

    /// Convert sRGB channel to linear for luminance calculation.
    fn linearize(val: u8) -> f64 {
        let v = val as f64 / 255.0;
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Calculate relative luminance (0.0 = black, 1.0 = white).
    pub fn luminance(&self) -> f64 {
        0.2126 * Self::linearize(self.r)
            + 0.7152 * Self::linearize(self.g)
            + 0.0722 * Self::linearize(self.b)
    }

    /// Calculate WCAG contrast ratio between two colors (1:1 to 21:1).
    pub fn contrast_ratio(&self, other: &Rgb) -> f64 {
        let l1 = self.luminance();
        let l2 = other.luminance();
        let lighter = l1.max(l2);
        let darker = l1.min(l2);
        (lighter + 0.05) / (darker + 0.05)
    }

    /// YIQ luma, 0-255. Cheaper than luminance and tuned for perceived brightness.
    pub fn yiq(&self) -> f64 {
        (self.r as f64 * 299.0 + self.g as f64 * 587.0 + self.b as f64 * 114.0) / 1000.0
    }
}

/// A validated hex color in canonical (uppercase) form.
///
/// Only `#RGB` and `#RRGGBB` are representable. Parsing trims whitespace,
/// adds a missing `#` and uppercases before validating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(input: &str) -> Result<Self, ColorInputError> {
        if input.trim().is_empty() {
            return Err(ColorInputError::Empty);
        }
        let hex = normalize_hex(input);
        if is_hex_color(&hex) {
            Ok(Self(hex))
        } else {
            Err(ColorInputError::Invalid {
                input: input.to_string(),
            })
        }
    }

    pub fn black() -> Self {
        Rgb::BLACK.to_hex()
    }

    pub fn white() -> Self {
        Rgb::WHITE.to_hex()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> Rgb {
        // Always valid by construction.
        Rgb::from_hex(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorInputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The host's active appearance. Derived from host state, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Dark, ThemeMode::Light];

    pub fn from_is_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Key used for this mode in the persisted `colors` mapping.
    pub fn key(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(format!("unknown theme mode '{}' (expected dark or light)", other)),
        }
    }
}

/// The two task states that get status colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorState {
    Overdue,
    DueToday,
}

impl ColorState {
    pub const ALL: [ColorState; 2] = [ColorState::Overdue, ColorState::DueToday];

    pub fn key(&self) -> &'static str {
        match self {
            ColorState::Overdue => "overdue",
            ColorState::DueToday => "dueToday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorState::Overdue => "Overdue",
            ColorState::DueToday => "Due today",
        }
    }
}

impl fmt::Display for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which half of a `ColorPair` is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorPart {
    Background,
    Font,
}

impl ColorPart {
    pub const ALL: [ColorPart; 2] = [ColorPart::Background, ColorPart::Font];

    pub fn key(&self) -> &'static str {
        match self {
            ColorPart::Background => "backgroundColor",
            ColorPart::Font => "fontColor",
        }
    }
}

/// Background and foreground for one task state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPair {
    pub background_color: HexColor,
    pub font_color: HexColor,
    /// Fields written by other schema versions, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColorPair {
    pub fn new(background_color: HexColor, font_color: HexColor) -> Self {
        Self {
            background_color,
            font_color,
            extra: Map::new(),
        }
    }

    pub fn get(&self, part: ColorPart) -> &HexColor {
        match part {
            ColorPart::Background => &self.background_color,
            ColorPart::Font => &self.font_color,
        }
    }

    pub fn set(&mut self, part: ColorPart, color: HexColor) {
        match part {
            ColorPart::Background => self.background_color = color,
            ColorPart::Font => self.font_color = color,
        }
    }
}

/// The full status palette for one `ThemeMode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeColors {
    pub overdue: ColorPair,
    pub due_today: ColorPair,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModeColors {
    pub fn new(overdue: ColorPair, due_today: ColorPair) -> Self {
        Self {
            overdue,
            due_today,
            extra: Map::new(),
        }
    }

    pub fn pair(&self, state: ColorState) -> &ColorPair {
        match state {
            ColorState::Overdue => &self.overdue,
            ColorState::DueToday => &self.due_today,
        }
    }

    pub fn pair_mut(&mut self, state: ColorState) -> &mut ColorPair {
        match state {
            ColorState::Overdue => &mut self.overdue,
            ColorState::DueToday => &mut self.due_today,
        }
    }
}

/// Stored palettes for both modes. Both are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub dark: ModeColors,
    pub light: ModeColors,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Palette {
    pub fn new(dark: ModeColors, light: ModeColors) -> Self {
        Self {
            dark,
            light,
            extra: Map::new(),
        }
    }

    pub fn get(&self, mode: ThemeMode) -> &ModeColors {
        match mode {
            ThemeMode::Dark => &self.dark,
            ThemeMode::Light => &self.light,
        }
    }

    pub fn get_mut(&mut self, mode: ThemeMode) -> &mut ModeColors {
        match mode {
            ThemeMode::Dark => &mut self.dark,
            ThemeMode::Light => &mut self.light,
        }
    }
}
