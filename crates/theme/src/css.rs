//! Resolve CSS color expressions to an opaque RGB triple.
//!
//! Supports hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()`
//! in comma or space syntax, `hsl()`/`hsla()`, a table of named colors and
//! `var(--token[, fallback])` indirection. Anything that is not fully opaque
//! resolves to `None`, the same as a computed style that reads back as `rgba(...)`.

use crate::types::Rgb;

const MAX_VAR_DEPTH: usize = 8;

/// Resolve `expr`, looking custom properties up through `lookup`.
pub fn parse_color<F>(expr: &str, lookup: F) -> Option<Rgb>
where
    F: Fn(&str) -> Option<String>,
{
    parse_with_depth(expr, &lookup, MAX_VAR_DEPTH)
}

fn parse_with_depth(
    expr: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
    depth: usize,
) -> Option<Rgb> {
    let expr = expr.trim().to_ascii_lowercase();
    if expr.is_empty() {
        return None;
    }

    if let Some(inner) = function_args(&expr, "var") {
        if depth == 0 {
            return None;
        }
        let (name, fallback) = match inner.split_once(',') {
            Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
            None => (inner.trim(), None),
        };
        return lookup(name)
            .and_then(|value| parse_with_depth(&value, lookup, depth - 1))
            .or_else(|| fallback.and_then(|fb| parse_with_depth(fb, lookup, depth - 1)));
    }

    if let Some(hex) = expr.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(inner) = function_args(&expr, "rgba").or_else(|| function_args(&expr, "rgb")) {
        return parse_rgb_args(inner);
    }

    if let Some(inner) = function_args(&expr, "hsla").or_else(|| function_args(&expr, "hsl")) {
        return parse_hsl_args(inner);
    }

    named_color(&expr)
}

/// `name(...)` -> the text between the parentheses.
fn function_args<'a>(expr: &'a str, name: &str) -> Option<&'a str> {
    expr.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 | 6 => Rgb::from_hex(hex),
        4 => opaque_alpha(&hex[3..4].repeat(2)).then(|| Rgb::from_hex(&hex[..3]))?,
        8 => opaque_alpha(&hex[6..8]).then(|| Rgb::from_hex(&hex[..6]))?,
        _ => None,
    }
}

fn opaque_alpha(alpha_hex: &str) -> bool {
    alpha_hex.eq_ignore_ascii_case("ff")
}

fn split_args(inner: &str) -> Vec<&str> {
    inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_rgb_args(inner: &str) -> Option<Rgb> {
    let args = split_args(inner);
    if !(args.len() == 3 || args.len() == 4) {
        return None;
    }
    if let Some(alpha) = args.get(3) {
        if parse_alpha(alpha)? < 1.0 {
            return None;
        }
    }
    Some(Rgb::new(
        parse_channel(args[0])?,
        parse_channel(args[1])?,
        parse_channel(args[2])?,
    ))
}

fn parse_channel(arg: &str) -> Option<u8> {
    let value = match arg.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? * 255.0 / 100.0,
        None => arg.parse::<f64>().ok()?,
    };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(arg: &str) -> Option<f64> {
    match arg.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok().map(|p| p / 100.0),
        None => arg.parse::<f64>().ok(),
    }
}

fn parse_hsl_args(inner: &str) -> Option<Rgb> {
    let args = split_args(inner);
    if !(args.len() == 3 || args.len() == 4) {
        return None;
    }
    if let Some(alpha) = args.get(3) {
        if parse_alpha(alpha)? < 1.0 {
            return None;
        }
    }
    let hue = args[0]
        .strip_suffix("deg")
        .unwrap_or(args[0])
        .parse::<f64>()
        .ok()?;
    let sat = args[1].strip_suffix('%')?.parse::<f64>().ok()? / 100.0;
    let light = args[2].strip_suffix('%')?.parse::<f64>().ok()? / 100.0;
    Some(hsl_to_rgb(hue, sat.clamp(0.0, 1.0), light.clamp(0.0, 1.0)))
}

fn hsl_to_rgb(hue: f64, sat: f64, light: f64) -> Rgb {
    let h = hue.rem_euclid(360.0) / 360.0;
    if sat == 0.0 {
        let v = (light * 255.0).round() as u8;
        return Rgb::new(v, v, v);
    }
    let q = if light < 0.5 {
        light * (1.0 + sat)
    } else {
        light + sat - light * sat
    };
    let p = 2.0 * light - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

fn named_color(name: &str) -> Option<Rgb> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "orangered" => (255, 69, 0),
        "purple" => (128, 0, 128),
        "rebeccapurple" => (102, 51, 153),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "gray" | "grey" => (128, 128, 128),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "darkred" => (139, 0, 0),
        "firebrick" => (178, 34, 34),
        "crimson" => (220, 20, 60),
        "tomato" => (255, 99, 71),
        "salmon" => (250, 128, 114),
        "coral" => (255, 127, 80),
        "olive" => (128, 128, 0),
        "khaki" => (240, 230, 140),
        "gold" => (255, 215, 0),
        "aqua" | "cyan" => (0, 255, 255),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "fuchsia" | "magenta" => (255, 0, 255),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        _ => return None,
    };
    Some(Rgb::new(r, g, b))
}
