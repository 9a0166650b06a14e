//! Live status colors derived from the host theme.

use crate::host::ThemeHost;
use crate::introspect::{color_to_hex, read_theme_variable, readable_text_for};
use crate::types::{ColorPair, ColorState, HexColor, ModeColors, Rgb};

/// Ordered token lookups for one state's background, ending in a literal.
#[derive(Debug, Clone, Copy)]
pub struct TokenChain {
    pub tokens: &'static [&'static str],
    pub fallback: Rgb,
}

pub const OVERDUE_CHAIN: TokenChain = TokenChain {
    tokens: &["--color-red", "--background-modifier-error"],
    fallback: Rgb::new(0xFB, 0x46, 0x4C),
};

pub const DUE_TODAY_CHAIN: TokenChain = TokenChain {
    tokens: &["--color-yellow", "--background-modifier-warning"],
    fallback: Rgb::new(0xE0, 0xDE, 0x71),
};

pub fn chain_for(state: ColorState) -> TokenChain {
    match state {
        ColorState::Overdue => OVERDUE_CHAIN,
        ColorState::DueToday => DUE_TODAY_CHAIN,
    }
}

/// First token in the chain that is set and resolves to an opaque color.
pub fn resolve_background(host: &impl ThemeHost, chain: &TokenChain) -> HexColor {
    let fallback = chain.fallback.to_hex();
    for &token in chain.tokens {
        let Some(raw) = read_theme_variable(host, token, None) else {
            continue;
        };
        if host.resolve_color(&raw).is_some() {
            return color_to_hex(host, &raw, &fallback);
        }
        tracing::debug!(token, raw = %raw, "theme token set but not resolvable");
    }
    fallback
}

pub fn derive_pair(host: &impl ThemeHost, state: ColorState) -> ColorPair {
    let background = resolve_background(host, &chain_for(state));
    let font = readable_text_for(&background);
    ColorPair::new(background, font)
}

/// Status colors for the host's current theme. Stateless; safe to call per render.
pub fn derive_themed_palette(host: &impl ThemeHost) -> ModeColors {
    ModeColors::new(
        derive_pair(host, ColorState::Overdue),
        derive_pair(host, ColorState::DueToday),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticHost;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    #[test]
    fn test_semantic_token_wins() {
        let host = StaticHost::new("t", true)
            .with_token(true, "--color-red", "rgb(10, 20, 30)")
            .with_token(true, "--background-modifier-error", "#ffffff")
            .with_token(true, "--color-yellow", "#ffff80");

        let palette = derive_themed_palette(&host);
        assert_eq!(palette.overdue.background_color, hex("#0A141E"));
        assert_eq!(palette.overdue.font_color, HexColor::white());
        assert_eq!(palette.due_today.background_color, hex("#FFFF80"));
        assert_eq!(palette.due_today.font_color, HexColor::black());
    }

    #[test]
    fn test_modifier_token_used_when_semantic_missing() {
        let host = StaticHost::new("t", false)
            .with_token(false, "--color-red", "   ")
            .with_token(false, "--background-modifier-error", "maroon")
            .with_token(false, "--color-yellow", "not a color")
            .with_token(false, "--background-modifier-warning", "hsl(60, 100%, 50%)");

        let palette = derive_themed_palette(&host);
        assert_eq!(palette.overdue.background_color, hex("#800000"));
        assert_eq!(palette.due_today.background_color, hex("#FFFF00"));
    }

    #[test]
    fn test_literal_fallback_never_fails() {
        let host = StaticHost::new("empty", true);
        let palette = derive_themed_palette(&host);
        assert_eq!(palette.overdue.background_color, hex("#FB464C"));
        assert_eq!(palette.overdue.font_color, HexColor::white());
        assert_eq!(palette.due_today.background_color, hex("#E0DE71"));
        assert_eq!(palette.due_today.font_color, HexColor::black());
    }

    #[test]
    fn test_follows_live_appearance() {
        let mut host = StaticHost::builtin(true);
        let dark = derive_themed_palette(&host);
        host.set_dark(false);
        let light = derive_themed_palette(&host);

        assert_eq!(dark.overdue.background_color, hex("#FB464C"));
        assert_eq!(light.overdue.background_color, hex("#E93147"));
        assert_eq!(light.due_today.background_color, hex("#E0AC00"));
    }
}
