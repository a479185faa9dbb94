//! Locale registry: Single source of truth for all supported locales.
//!
//! This module provides a centralized, immutable table of every locale the
//! dashboard can render. It uses `OnceLock` to build the table once and share
//! it across threads.

use crate::i18n::LocaleCode;
use std::sync::OnceLock;

/// Horizontal direction in which a locale's text is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    /// Value for the HTML `dir` attribute.
    pub fn as_attr(&self) -> &'static str {
        match self {
            TextDirection::LeftToRight => "ltr",
            TextDirection::RightToLeft => "rtl",
        }
    }
}

/// Configuration for a supported locale.
///
/// Contains the display metadata the UI needs about a locale. The code and the
/// record-field suffix live on `LocaleCode` itself.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale this entry describes
    pub locale: LocaleCode,

    /// English name of the locale (e.g., "English", "Spanish")
    pub name: &'static str,

    /// Native name of the locale (e.g., "English", "Español")
    pub native_name: &'static str,

    /// Text direction used when this locale is active
    pub direction: TextDirection,

    /// Whether this is the default (fallback) locale. Exactly one entry is.
    pub is_default: bool,

    /// Whether this locale can be selected by users
    pub enabled: bool,
}

/// Registry of supported locales.
///
/// Entries are stored in `LocaleCode` declaration order, so lookups by code are
/// plain indexing and never fail.
pub struct LocaleRegistry {
    locales: [LocaleConfig; LocaleCode::COUNT],
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get the configuration of a locale.
    pub fn config(&self, locale: LocaleCode) -> &LocaleConfig {
        &self.locales[locale.index()]
    }

    /// Get a locale configuration by its code string (e.g., "es").
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the code names a supported locale
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales
            .iter()
            .find(|entry| entry.locale.code() == code)
    }

    /// Get all locales users can select.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|entry| entry.enabled).collect()
    }

    /// Get all locales, including disabled ones.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the default locale configuration.
    pub fn default_locale(&self) -> &LocaleConfig {
        self.config(LocaleCode::DEFAULT)
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|entry| entry.enabled)
            .unwrap_or(false)
    }
}

/// Supported locales, in `LocaleCode` declaration order.
fn default_locales() -> [LocaleConfig; LocaleCode::COUNT] {
    [
        LocaleConfig {
            locale: LocaleCode::En,
            name: "English",
            native_name: "English",
            direction: TextDirection::LeftToRight,
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            locale: LocaleCode::Es,
            name: "Spanish",
            native_name: "Español",
            direction: TextDirection::LeftToRight,
            is_default: false,
            enabled: true,
        },
        LocaleConfig {
            locale: LocaleCode::Fr,
            name: "French",
            native_name: "Français",
            direction: TextDirection::LeftToRight,
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_entries_follow_declaration_order() {
        let registry = LocaleRegistry::get();
        for locale in LocaleCode::ALL {
            assert_eq!(registry.config(locale).locale, locale);
        }
    }

    #[test]
    fn test_exactly_one_default_locale() {
        let registry = LocaleRegistry::get();
        let defaults: Vec<_> = registry
            .list_all()
            .into_iter()
            .filter(|entry| entry.is_default)
            .collect();

        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].locale, LocaleCode::DEFAULT);
        assert!(defaults[0].enabled);
    }

    #[test]
    fn test_get_by_code_spanish() {
        let registry = LocaleRegistry::get();
        let config = registry.get_by_code("es").expect("es is supported");

        assert_eq!(config.locale, LocaleCode::Es);
        assert_eq!(config.name, "Spanish");
        assert_eq!(config.native_name, "Español");
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LocaleRegistry::get();
        assert!(registry.get_by_code("de").is_none());
        assert!(registry.get_by_code("").is_none());
    }

    #[test]
    fn test_all_locales_left_to_right() {
        let registry = LocaleRegistry::get();
        for entry in registry.list_all() {
            assert_eq!(entry.direction, TextDirection::LeftToRight);
        }
    }

    #[test]
    fn test_is_enabled() {
        let registry = LocaleRegistry::get();
        assert!(registry.is_enabled("en"));
        assert!(registry.is_enabled("fr"));
        assert!(!registry.is_enabled("ar"));
    }

    #[test]
    fn test_direction_attr() {
        assert_eq!(TextDirection::LeftToRight.as_attr(), "ltr");
        assert_eq!(TextDirection::RightToLeft.as_attr(), "rtl");
    }
}
