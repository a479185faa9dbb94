//! Translation catalog validation.
//!
//! The default locale's dictionary must hold every key any locale defines;
//! partial locales are allowed but their gaps are reported as warnings.

use crate::i18n::{LocaleCode, TranslationCatalog};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Violations of the catalog invariants
    pub errors: Vec<String>,

    /// Coverage gaps in partial locales
    pub warnings: Vec<String>,

    /// Share of default-locale keys each locale defines, as a percentage (0-100)
    pub coverage: BTreeMap<LocaleCode, f64>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            coverage: BTreeMap::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation catalogs.
pub struct CatalogValidator;

static KEY_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Validate a catalog.
    ///
    /// Errors:
    /// - a key defined by some locale but missing from the default locale
    /// - a key that is not dot-separated lowercase identifiers
    /// - an empty text in the default locale
    ///
    /// Warnings:
    /// - a default-locale key a partial locale does not translate
    pub fn validate(catalog: &TranslationCatalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        let default = LocaleCode::DEFAULT;

        let mut default_keys: Vec<&str> = catalog.keys(default).collect();
        default_keys.sort_unstable();

        for key in &default_keys {
            if catalog.get(default, key).is_some_and(str::is_empty) {
                report
                    .errors
                    .push(format!("Empty default text for key '{}'", key));
            }
        }

        for locale in LocaleCode::ALL {
            let mut keys: Vec<&str> = catalog.keys(locale).collect();
            keys.sort_unstable();

            for key in &keys {
                if !Self::is_valid_key(key) {
                    report
                        .errors
                        .push(format!("Malformed key '{}' in locale {}", key, locale));
                }
                if locale != default && catalog.get(default, key).is_none() {
                    report.errors.push(format!(
                        "Key '{}' defined in {} is missing from default locale {}",
                        key, locale, default
                    ));
                }
            }

            if locale != default {
                let missing: Vec<&str> = default_keys
                    .iter()
                    .copied()
                    .filter(|key| catalog.get(locale, key).is_none())
                    .collect();
                if !missing.is_empty() {
                    report.warnings.push(format!(
                        "Locale {} is missing {} of {} keys: {:?}",
                        locale,
                        missing.len(),
                        default_keys.len(),
                        missing
                    ));
                }
            }

            report
                .coverage
                .insert(locale, Self::coverage(catalog, locale, &default_keys));
        }

        report
    }

    /// Check a key against the `section.name` convention.
    pub fn is_valid_key(key: &str) -> bool {
        let regex = KEY_REGEX
            .get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z0-9_]+)*$").unwrap());
        regex.is_match(key)
    }

    fn coverage(catalog: &TranslationCatalog, locale: LocaleCode, default_keys: &[&str]) -> f64 {
        if default_keys.is_empty() {
            return 100.0;
        }
        let covered = default_keys
            .iter()
            .filter(|key| catalog.get(locale, key).is_some())
            .count();
        (covered as f64 / default_keys.len() as f64) * 100.0
    }
}
