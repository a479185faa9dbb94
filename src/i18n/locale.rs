//! Locale type: the closed set of locales the dashboard renders.
//!
//! Codes and record-field suffixes are matched on the enum, so a typo in a
//! locale or suffix is a compile error instead of a silent lookup miss.

use crate::i18n::{LocaleConfig, LocaleRegistry, TextDirection};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    En,
    Es,
    Fr,
}

impl LocaleCode {
    /// Number of supported locales.
    pub const COUNT: usize = 3;

    /// Every supported locale, in declaration order.
    pub const ALL: [LocaleCode; LocaleCode::COUNT] =
        [LocaleCode::En, LocaleCode::Es, LocaleCode::Fr];

    /// The fallback locale. Its dictionary is complete and its field variant is
    /// consulted when the active locale has none.
    pub const DEFAULT: LocaleCode = LocaleCode::En;

    /// Create a locale from a code string.
    ///
    /// Accepts exact codes ("es") as well as region/encoding variants
    /// ("es-MX", "es_ES.UTF-8"), which are reduced to their primary subtag.
    ///
    /// # Returns
    /// * `Ok(LocaleCode)` if the code is supported and enabled
    /// * `Err` if the code is unknown or the locale is disabled
    pub fn from_code(code: &str) -> Result<LocaleCode> {
        let registry = LocaleRegistry::get();
        let primary = primary_subtag(code);

        match registry.get_by_code(&primary) {
            Some(config) if config.enabled => Ok(config.locale),
            Some(_) => bail!("Locale '{}' is not enabled", code),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// Same as [`LocaleCode::from_code`], discarding the reason.
    pub fn parse(code: &str) -> Option<LocaleCode> {
        Self::from_code(code).ok()
    }

    /// ISO 639-1 code (e.g., "en").
    pub fn code(self) -> &'static str {
        match self {
            LocaleCode::En => "en",
            LocaleCode::Es => "es",
            LocaleCode::Fr => "fr",
        }
    }

    /// Suffix appended to a field base name for this locale's variant
    /// (`title` + `_es` = `title_es`).
    pub fn suffix(self) -> &'static str {
        match self {
            LocaleCode::En => "_en",
            LocaleCode::Es => "_es",
            LocaleCode::Fr => "_fr",
        }
    }

    /// Registry metadata for this locale.
    pub fn config(self) -> &'static LocaleConfig {
        LocaleRegistry::get().config(self)
    }

    /// English name of the locale.
    pub fn name(self) -> &'static str {
        self.config().name
    }

    /// Name of the locale in its own language.
    pub fn native_name(self) -> &'static str {
        self.config().native_name
    }

    pub fn direction(self) -> TextDirection {
        self.config().direction
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl Default for LocaleCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for LocaleCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// Reduce "es_MX.UTF-8" / "ES-mx" to "es".
fn primary_subtag(value: &str) -> String {
    let trimmed = value.trim();
    let without_encoding = trimmed.split('.').next().unwrap_or(trimmed);
    without_encoding
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Code/Suffix Tests ====================

    #[test]
    fn test_codes() {
        assert_eq!(LocaleCode::En.code(), "en");
        assert_eq!(LocaleCode::Es.code(), "es");
        assert_eq!(LocaleCode::Fr.code(), "fr");
    }

    #[test]
    fn test_suffixes_are_unique() {
        let mut suffixes: Vec<_> = LocaleCode::ALL.iter().map(|l| l.suffix()).collect();
        suffixes.sort();
        suffixes.dedup();
        assert_eq!(suffixes.len(), LocaleCode::COUNT);
    }

    #[test]
    fn test_suffix_matches_code() {
        for locale in LocaleCode::ALL {
            assert_eq!(locale.suffix(), format!("_{}", locale.code()));
        }
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_spanish() {
        let locale = LocaleCode::from_code("es").expect("Should succeed");
        assert_eq!(locale, LocaleCode::Es);
        assert_eq!(locale.name(), "Spanish");
    }

    #[test]
    fn test_from_code_with_region_and_encoding() {
        assert_eq!(LocaleCode::from_code("es-MX").unwrap(), LocaleCode::Es);
        assert_eq!(LocaleCode::from_code("fr_CA.UTF-8").unwrap(), LocaleCode::Fr);
        assert_eq!(LocaleCode::from_code(" EN ").unwrap(), LocaleCode::En);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = LocaleCode::from_code("de");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(LocaleCode::from_code("").is_err());
        assert!(LocaleCode::parse("").is_none());
    }

    #[test]
    fn test_from_str() {
        let locale: LocaleCode = "fr".parse().expect("Should parse");
        assert_eq!(locale, LocaleCode::Fr);
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_default_is_english() {
        assert_eq!(LocaleCode::default(), LocaleCode::En);
        assert!(LocaleCode::En.is_default());
        assert!(!LocaleCode::Es.is_default());
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display() {
        assert_eq!(LocaleCode::Es.to_string(), "es");
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&LocaleCode::Fr).expect("Should serialize");
        assert_eq!(json, "\"fr\"");
        let parsed: LocaleCode = serde_json::from_str("\"es\"").expect("Should deserialize");
        assert_eq!(parsed, LocaleCode::Es);
    }

    #[test]
    fn test_native_name() {
        assert_eq!(LocaleCode::Es.native_name(), "Español");
        assert_eq!(LocaleCode::Fr.native_name(), "Français");
    }
}
