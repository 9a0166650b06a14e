//! The settings facade: owns the document, answers "which colors are active",
//! and persists every accepted change.

use glacial_theme::{
    best_foreground_on, current_theme_mode, derive_themed_palette, ColorPart, ColorState,
    HexColor, ModeColors, ThemeHost, ThemeMode,
};

use crate::error::SettingsError;
use crate::load::{load, to_document};
use crate::store::{SettingsStore, StoreError};
use crate::types::{is_valid_font_weight, parse_csv, Settings};

/// The palette consumers should render with right now.
///
/// Following the theme derives a live palette and ignores `mode` and the
/// stored colors; otherwise the stored palette for `mode` is returned.
pub fn active_colors(settings: &Settings, mode: ThemeMode, host: &impl ThemeHost) -> ModeColors {
    if settings.follow_theme_colors {
        derive_themed_palette(host)
    } else {
        settings.colors.get(mode).clone()
    }
}

/// Write the whole document. Store errors propagate unchanged.
pub fn save(store: &mut impl SettingsStore, settings: &Settings) -> Result<(), StoreError> {
    let document = to_document(settings)?;
    store.write(&document)?;
    tracing::info!("settings saved");
    Ok(())
}

pub struct SettingsManager<S, H> {
    settings: Settings,
    mode: ThemeMode,
    store: S,
    host: H,
}

impl<S: SettingsStore, H: ThemeHost> SettingsManager<S, H> {
    /// Read the store and build settings from it. Only a failing read is an error.
    pub fn open(store: S, host: H) -> Result<Self, StoreError> {
        let raw = store.read()?;
        let settings = load(raw.as_ref());
        let mode = current_theme_mode(&host);
        tracing::debug!(
            %mode,
            follow_theme = settings.follow_theme_colors,
            persisted = raw.is_some(),
            "settings opened"
        );
        Ok(Self {
            settings,
            mode,
            store,
            host,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn active_colors(&self) -> ModeColors {
        active_colors(&self.settings, self.mode, &self.host)
    }

    /// Re-read the host appearance. Returns true when the mode changed and
    /// views showing colors are stale.
    pub fn on_appearance_change(&mut self) -> bool {
        let next = current_theme_mode(&self.host);
        if next == self.mode {
            return false;
        }
        tracing::debug!(from = %self.mode, to = %next, "appearance changed");
        self.mode = next;
        true
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        save(&mut self.store, &self.settings)
    }

    pub fn set_tag_collector(&mut self, tag: &str) -> Result<(), SettingsError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(SettingsError::EmptyTag);
        }
        self.settings.tag_collector = tag.to_string();
        Ok(self.save()?)
    }

    pub fn set_meta_keys(&mut self, keys: Vec<String>) -> Result<(), SettingsError> {
        self.settings.meta_keys = keys;
        Ok(self.save()?)
    }

    /// Replace the metadata keys from comma-separated text.
    pub fn set_meta_keys_csv(&mut self, input: &str) -> Result<(), SettingsError> {
        self.set_meta_keys(parse_csv(input))
    }

    pub fn set_font_reset(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.settings.font_reset = enabled;
        Ok(self.save()?)
    }

    pub fn set_follow_theme_colors(&mut self, follow: bool) -> Result<(), SettingsError> {
        self.settings.follow_theme_colors = follow;
        Ok(self.save()?)
    }

    pub fn set_font_weight(&mut self, state: ColorState, weight: i64) -> Result<(), SettingsError> {
        if !is_valid_font_weight(weight) {
            tracing::warn!(%state, weight, "rejected font weight");
            return Err(SettingsError::FontWeight { value: weight });
        }
        self.settings.set_font_weight(state, weight);
        Ok(self.save()?)
    }

    /// Set one stored color for the current mode from user input.
    pub fn set_color(
        &mut self,
        state: ColorState,
        part: ColorPart,
        input: &str,
    ) -> Result<HexColor, SettingsError> {
        self.set_mode_color(self.mode, state, part, input)
    }

    /// Set one stored color for `mode`. Invalid input leaves the stored
    /// value alone and is not persisted.
    pub fn set_mode_color(
        &mut self,
        mode: ThemeMode,
        state: ColorState,
        part: ColorPart,
        input: &str,
    ) -> Result<HexColor, SettingsError> {
        let color = HexColor::parse(input).inspect_err(|e| {
            tracing::warn!(%mode, %state, part = part.key(), error = %e, "rejected color input");
        })?;
        self.settings
            .colors
            .get_mut(mode)
            .pair_mut(state)
            .set(part, color.clone());
        self.save()?;
        Ok(color)
    }

    /// Set a stored background for `mode` and pick black or white text for it.
    pub fn set_background_with_auto_font(
        &mut self,
        mode: ThemeMode,
        state: ColorState,
        input: &str,
    ) -> Result<(HexColor, HexColor), SettingsError> {
        let background = HexColor::parse(input).inspect_err(|e| {
            tracing::warn!(%mode, %state, error = %e, "rejected background input");
        })?;
        let font = best_foreground_on(&background);
        let pair = self.settings.colors.get_mut(mode).pair_mut(state);
        pair.set(ColorPart::Background, background.clone());
        pair.set(ColorPart::Font, font.clone());
        self.save()?;
        Ok((background, font))
    }

    /// Restore defaults. Fields this build does not know about are kept.
    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        let extra = std::mem::take(&mut self.settings.extra);
        let schema_version = self.settings.schema_version;
        self.settings = Settings {
            extra,
            schema_version,
            ..Settings::default()
        };
        Ok(self.save()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use glacial_theme::StaticHost;
    use serde_json::json;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    fn manager(data: serde_json::Value, dark: bool) -> SettingsManager<MemoryStore, StaticHost> {
        SettingsManager::open(MemoryStore::with_data(data), StaticHost::builtin(dark)).unwrap()
    }

    #[test]
    fn test_active_colors_stored_when_not_following() {
        let settings = Settings {
            follow_theme_colors: false,
            ..Settings::default()
        };
        let host = StaticHost::builtin(false);
        assert_eq!(
            active_colors(&settings, ThemeMode::Dark, &host),
            settings.colors.dark
        );
        assert_eq!(
            active_colors(&settings, ThemeMode::Light, &host),
            settings.colors.light
        );
    }

    #[test]
    fn test_active_colors_live_when_following() {
        let settings = Settings::default();
        let host = StaticHost::builtin(true);
        let colors = active_colors(&settings, ThemeMode::Light, &host);
        assert_eq!(colors, derive_themed_palette(&host));
        assert_eq!(colors.overdue.background_color, hex("#FB464C"));
    }

    #[test]
    fn test_invalid_color_keeps_prior_value_and_skips_write() {
        let mut m = manager(json!({"followThemeColors": false}), true);
        let before = m.settings().colors.dark.overdue.background_color.clone();

        let err = m
            .set_color(ColorState::Overdue, ColorPart::Background, "#12")
            .unwrap_err();
        assert!(matches!(err, SettingsError::Color(_)));
        assert_eq!(m.settings().colors.dark.overdue.background_color, before);
        assert_eq!(m.store().writes(), 0);
    }

    #[test]
    fn test_valid_color_is_normalized_and_persisted() {
        let mut m = manager(json!({"followThemeColors": false}), false);
        let color = m
            .set_color(ColorState::DueToday, ColorPart::Font, " 1a2b3c ")
            .unwrap();
        assert_eq!(color.as_str(), "#1A2B3C");
        assert_eq!(m.active_colors().due_today.font_color, color);
        assert_eq!(
            m.store().data().unwrap()["colors"]["light"]["dueToday"]["fontColor"],
            "#1A2B3C"
        );
    }

    #[test]
    fn test_font_weight_validation() {
        let mut m = manager(json!({}), true);
        assert!(matches!(
            m.set_font_weight(ColorState::Overdue, 650),
            Err(SettingsError::FontWeight { value: 650 })
        ));
        assert_eq!(m.settings().overdue_font_weight, 600);

        m.set_font_weight(ColorState::DueToday, 800).unwrap();
        assert_eq!(m.settings().due_today_font_weight, 800);
        assert_eq!(m.store().writes(), 1);
    }

    #[test]
    fn test_appearance_change() {
        let mut m = manager(json!({}), true);
        assert_eq!(m.current_mode(), ThemeMode::Dark);
        assert!(!m.on_appearance_change());

        m.host_mut().set_dark(false);
        assert!(m.on_appearance_change());
        assert_eq!(m.current_mode(), ThemeMode::Light);
        assert!(!m.on_appearance_change());
    }

    #[test]
    fn test_store_failure_propagates_and_memory_keeps_change() {
        let mut store = MemoryStore::new();
        store.reject_writes(true);
        let mut m = SettingsManager::open(store, StaticHost::builtin(true)).unwrap();

        let err = m.set_tag_collector("#later").unwrap_err();
        assert!(matches!(err, SettingsError::Store(StoreError::Rejected(_))));
        assert_eq!(m.settings().tag_collector, "#later");
    }

    #[test]
    fn test_auto_font_uses_wcag_choice() {
        let mut m = manager(json!({}), true);
        let (bg, font) = m
            .set_background_with_auto_font(ThemeMode::Light, ColorState::Overdue, "#fb464c")
            .unwrap();
        assert_eq!(bg, hex("#FB464C"));
        assert_eq!(font, HexColor::black());
        assert_eq!(m.settings().colors.light.overdue.font_color, HexColor::black());
    }

    #[test]
    fn test_rejected_background_keeps_pair() {
        let mut m = manager(json!({}), true);
        let before = m.settings().colors.dark.due_today.clone();

        let err = m
            .set_background_with_auto_font(ThemeMode::Dark, ColorState::DueToday, "yellow")
            .unwrap_err();
        assert!(matches!(err, SettingsError::Color(_)));
        assert_eq!(m.settings().colors.dark.due_today, before);
        assert_eq!(m.store().writes(), 0);
    }

    #[test]
    fn test_reset_keeps_unknown_fields() {
        let mut m = manager(json!({"tagCollector": "#x", "pluginExtra": [1]}), true);
        m.reset_to_defaults().unwrap();
        assert_eq!(m.settings().tag_collector, "#todo");
        assert_eq!(m.settings().extra["pluginExtra"], json!([1]));
    }
}
