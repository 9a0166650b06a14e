use std::collections::BTreeMap;

use crate::color::contrast_ratio;
use crate::types::{ColorState, HexColor, ModeColors, Palette, ThemeMode};

pub const AA_NORMAL: f64 = 4.5;
pub const AA_LARGE: f64 = 3.0;
pub const AAA_NORMAL: f64 = 7.0;

/// Pure black or pure white, whichever contrasts more with `bg`. Ties go to black.
pub fn best_foreground_on(bg: &HexColor) -> HexColor {
    let black = HexColor::black();
    let white = HexColor::white();
    if contrast_ratio(bg, &black) >= contrast_ratio(bg, &white) {
        black
    } else {
        white
    }
}

pub fn meets_contrast_threshold(bg: &HexColor, fg: &HexColor, threshold: f64) -> bool {
    contrast_ratio(bg, fg) >= threshold
}

/// [`meets_contrast_threshold`] at the WCAG AA body-text minimum.
pub fn meets_aa(bg: &HexColor, fg: &HexColor) -> bool {
    meets_contrast_threshold(bg, fg, AA_NORMAL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WcagGrade {
    Aaa,
    Aa,
    AaLarge,
    Fail,
}

impl WcagGrade {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= AAA_NORMAL {
            WcagGrade::Aaa
        } else if ratio >= AA_NORMAL {
            WcagGrade::Aa
        } else if ratio >= AA_LARGE {
            WcagGrade::AaLarge
        } else {
            WcagGrade::Fail
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WcagGrade::Aaa => "AAA",
            WcagGrade::Aa => "AA",
            WcagGrade::AaLarge => "AA-large",
            WcagGrade::Fail => "FAIL",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContrastResult {
    /// `dark`, `light`, or `live-dark` / `live-light` for palettes derived from the host theme.
    pub variant: String,
    pub state: ColorState,
    pub bg_hex: HexColor,
    pub fg_hex: HexColor,
    pub ratio: f64,
    pub grade: WcagGrade,
    pub pass: bool,
}

pub fn check_mode_colors(variant: &str, colors: &ModeColors) -> Vec<ContrastResult> {
    ColorState::ALL
        .iter()
        .map(|&state| {
            let pair = colors.pair(state);
            let ratio = contrast_ratio(&pair.background_color, &pair.font_color);

            ContrastResult {
                variant: variant.to_string(),
                state,
                bg_hex: pair.background_color.clone(),
                fg_hex: pair.font_color.clone(),
                ratio,
                grade: WcagGrade::from_ratio(ratio),
                pass: ratio >= AA_NORMAL,
            }
        })
        .collect()
}

pub fn check_palette(palette: &Palette) -> Vec<ContrastResult> {
    ThemeMode::ALL
        .iter()
        .flat_map(|&mode| check_mode_colors(mode.key(), palette.get(mode)))
        .collect()
}

pub fn print_results(results: &[ContrastResult], verbose: bool) {
    let failures: Vec<_> = results.iter().filter(|r| !r.pass).collect();
    let passes: Vec<_> = results.iter().filter(|r| r.pass).collect();

    println!("{}", "=".repeat(72));
    println!("STATUS COLOR CONTRAST");
    println!("Target: {}:1 (WCAG AA Normal Text)", AA_NORMAL);
    println!("{}", "=".repeat(72));

    if failures.is_empty() {
        println!("\nAll {} color pairs pass WCAG AA.", results.len());
    } else {
        println!("\nFAILURES ({} issues)\n", failures.len());
        println!(
            "{:<11} {:<12} {:>8} {:<10} {:<9} {:<9}",
            "Variant", "State", "Ratio", "Grade", "Bg", "Fg"
        );
        println!("{}", "-".repeat(72));
        for r in &failures {
            print_row(r);
        }
    }

    if verbose && !passes.is_empty() {
        println!("\nPASSING ({} checks)\n", passes.len());
        for r in &passes {
            print_row(r);
        }
    }

    let mut by_variant: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for r in results {
        let entry = by_variant.entry(r.variant.as_str()).or_insert((0, 0));
        if r.pass {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    println!("\n{:<11} {:>6} {:>6}", "Variant", "Pass", "Fail");
    println!("{}", "-".repeat(25));
    for (variant, (pass, fail)) in by_variant {
        println!("{:<11} {:>6} {:>6}", variant, pass, fail);
    }
}

fn print_row(r: &ContrastResult) {
    println!(
        "{:<11} {:<12} {:>7.2}:1 {:<10} {:<9} {:<9}",
        r.variant,
        r.state.label(),
        r.ratio,
        r.grade.label(),
        r.bg_hex,
        r.fg_hex
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorPair;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    #[test]
    fn test_best_foreground_extremes() {
        assert_eq!(best_foreground_on(&hex("#000000")), hex("#FFFFFF"));
        assert_eq!(best_foreground_on(&hex("#FFFFFF")), hex("#000000"));
        assert_eq!(best_foreground_on(&hex("#FFFF80")), hex("#000000"));
        assert_eq!(best_foreground_on(&hex("#6F1B1B")), hex("#FFFFFF"));
    }

    #[test]
    fn test_threshold() {
        assert!(!meets_contrast_threshold(&hex("#FFFFFF"), &hex("#FFFFFF"), AA_NORMAL));
        assert!(meets_aa(&hex("#000000"), &hex("#FFFFFF")));
        assert!(meets_contrast_threshold(&hex("#777"), &hex("#fff"), AA_LARGE));
        assert!(!meets_aa(&hex("#777"), &hex("#fff")));
    }

    #[test]
    fn test_grades() {
        assert_eq!(WcagGrade::from_ratio(21.0), WcagGrade::Aaa);
        assert_eq!(WcagGrade::from_ratio(4.5), WcagGrade::Aa);
        assert_eq!(WcagGrade::from_ratio(3.2), WcagGrade::AaLarge);
        assert_eq!(WcagGrade::from_ratio(1.0), WcagGrade::Fail);
    }

    #[test]
    fn test_check_palette_covers_both_modes() {
        let good = ModeColors::new(
            ColorPair::new(hex("#000"), hex("#fff")),
            ColorPair::new(hex("#fff"), hex("#000")),
        );
        let bad = ModeColors::new(
            ColorPair::new(hex("#fff"), hex("#fff")),
            ColorPair::new(hex("#000"), hex("#fff")),
        );
        let results = check_palette(&Palette::new(good, bad));

        assert_eq!(results.len(), 4);
        assert!(results.iter().filter(|r| r.variant == "dark").all(|r| r.pass));
        let failing: Vec<_> = results.iter().filter(|r| !r.pass).collect();
        assert_eq!(failing.len(), 1);
        assert_eq!(failing[0].variant, "light");
        assert_eq!(failing[0].state, ColorState::Overdue);
        assert_eq!(failing[0].grade, WcagGrade::Fail);
    }
}
