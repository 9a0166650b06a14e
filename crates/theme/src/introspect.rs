//! Reading the host's live appearance and tokens.

use crate::host::ThemeHost;
use crate::types::{HexColor, ThemeMode};

/// Threshold on YIQ luma above which black text reads better.
pub const YIQ_LIGHT_THRESHOLD: f64 = 160.0;

pub fn current_theme_mode(host: &impl ThemeHost) -> ThemeMode {
    ThemeMode::from_is_dark(host.is_dark())
}

/// Trimmed value of a design token, or `fallback` when unset or blank.
pub fn read_theme_variable(
    host: &impl ThemeHost,
    name: &str,
    fallback: Option<&str>,
) -> Option<String> {
    host.resolve_token(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.map(str::to_string))
}

/// Resolve any color expression to a 6-digit hex, or `fallback` if the host can't.
pub fn color_to_hex(host: &impl ThemeHost, expr: &str, fallback: &HexColor) -> HexColor {
    match host.resolve_color(expr) {
        Some(rgb) => rgb.to_hex(),
        None => {
            tracing::debug!(expr, fallback = %fallback, "color did not resolve, using fallback");
            fallback.clone()
        }
    }
}

/// Black or white text for `bg` using the YIQ luma heuristic.
pub fn readable_text_for(bg: &HexColor) -> HexColor {
    if bg.rgb().yiq() >= YIQ_LIGHT_THRESHOLD {
        HexColor::black()
    } else {
        HexColor::white()
    }
}
