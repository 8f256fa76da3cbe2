//! User settings (the "config" storage bucket).
//!
//! Settings use camelCase JSON keys so that data files written by other start
//! page front-ends load unchanged. Every field falls back to its default on
//! its own, which lets partial documents load.

use serde::{Deserialize, Serialize};

/// Search engine used when the stored value is empty.
pub const DEFAULT_SEARCH_ENGINE: &str = "https://www.startpage.com/search?q=";

/// Default accent colour. The theme keeps its own accent while this is unchanged.
pub const DEFAULT_ACCENT_COLOR: &str = "#4a9eff";

/// Default text colour. The theme keeps its own text colour while this is unchanged.
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// Appearance and search settings.
///
/// Background image, blur, and mask only matter to graphical front-ends. They
/// are kept so that import/export round-trips them untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    /// Base URL the percent-encoded query is appended to.
    pub search_engine: String,
    pub background_image: String,
    pub background_blur: u32,
    pub mask_color: String,
    /// Mask opacity in percent.
    pub mask_opacity: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_color: "#000000".to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            search_engine: DEFAULT_SEARCH_ENGINE.to_string(),
            background_image: String::new(),
            background_blur: 0,
            mask_color: "#000000".to_string(),
            mask_opacity: 60,
        }
    }
}

impl Settings {
    /// Returns the search engine base URL, falling back to the default when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use startpage::Settings;
    ///
    /// let mut settings = Settings::default();
    /// settings.search_engine.clear();
    /// assert_eq!(settings.search_engine_base(), "https://www.startpage.com/search?q=");
    /// ```
    #[must_use]
    pub fn search_engine_base(&self) -> &str {
        if self.search_engine.trim().is_empty() {
            DEFAULT_SEARCH_ENGINE
        } else {
            &self.search_engine
        }
    }

    /// Accent colour the user picked, if it differs from the default.
    #[must_use]
    pub fn custom_accent(&self) -> Option<&str> {
        Self::customized(&self.accent_color, DEFAULT_ACCENT_COLOR)
    }

    /// Text colour the user picked, if it differs from the default.
    #[must_use]
    pub fn custom_text_color(&self) -> Option<&str> {
        Self::customized(&self.text_color, DEFAULT_TEXT_COLOR)
    }

    fn customized<'a>(value: &'a str, default: &str) -> Option<&'a str> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(default) {
            None
        } else {
            Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r##"{"accentColor":"#ff0000","maskOpacity":20}"##).expect("parse");
        assert_eq!(settings.accent_color, "#ff0000");
        assert_eq!(settings.mask_opacity, 20);
        assert_eq!(settings.search_engine, DEFAULT_SEARCH_ENGINE);
        assert_eq!(settings.text_color, DEFAULT_TEXT_COLOR);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).expect("serialize");
        assert!(json.get("searchEngine").is_some());
        assert!(json.get("backgroundBlur").is_some());
        assert!(json.get("search_engine").is_none());
    }

    #[test]
    fn custom_colours_ignore_defaults() {
        let mut settings = Settings::default();
        assert_eq!(settings.custom_accent(), None);
        assert_eq!(settings.custom_text_color(), None);

        settings.accent_color = "#A6E3A1".to_string();
        settings.text_color = "#FFFFFF".to_string();
        assert_eq!(settings.custom_accent(), Some("#A6E3A1"));
        assert_eq!(settings.custom_text_color(), None);
    }
}
