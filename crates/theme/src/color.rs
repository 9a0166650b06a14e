//! String-level hex color helpers and WCAG luminance math.

use crate::types::HexColor;

/// True iff `s` is `#` followed by exactly 3 or 6 hex digits.
///
/// No trimming and no other syntax; run [`normalize_hex`] first for user input.
pub fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Trim, add a missing `#`, uppercase. Does not validate.
pub fn normalize_hex(s: &str) -> String {
    let trimmed = s.trim();
    let mut out = String::with_capacity(trimmed.len() + 1);
    if !trimmed.starts_with('#') {
        out.push('#');
    }
    out.push_str(trimmed);
    out.to_uppercase()
}

/// Relative luminance of a color per WCAG 2.x, in `[0, 1]`.
pub fn relative_luminance(hex: &HexColor) -> f64 {
    hex.rgb().luminance()
}

/// WCAG contrast ratio between two colors, in `[1, 21]`. Symmetric.
pub fn contrast_ratio(bg: &HexColor, fg: &HexColor) -> f64 {
    bg.rgb().contrast_ratio(&fg.rgb())
}
