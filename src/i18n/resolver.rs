//! Translation resolver: symbolic UI keys to display strings.
//!
//! Lookup order is active locale, then the default locale, then the key itself.
//! Returning the raw key keeps missing translations visible on screen.

use crate::i18n::strings::builtin_strings;
use crate::i18n::{LocaleCode, LocaleStore, ResolutionMetrics, ResolutionTier};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Per-locale dictionaries.
#[derive(Debug, Clone)]
pub struct TranslationCatalog {
    dictionaries: [HashMap<String, String>; LocaleCode::COUNT],
}

impl TranslationCatalog {
    /// Catalog with no entries.
    pub fn empty() -> Self {
        Self {
            dictionaries: std::array::from_fn(|_| HashMap::new()),
        }
    }

    /// Catalog holding the compiled-in dictionaries.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for locale in LocaleCode::ALL {
            for (key, text) in builtin_strings(locale) {
                catalog.insert(locale, *key, *text);
            }
        }
        catalog
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, locale: LocaleCode, key: impl Into<String>, text: impl Into<String>) {
        self.dictionaries[locale.index()].insert(key.into(), text.into());
    }

    /// Entry for `key` in exactly `locale`, without fallback.
    pub fn get(&self, locale: LocaleCode, key: &str) -> Option<&str> {
        self.dictionaries[locale.index()].get(key).map(String::as_str)
    }

    /// Keys defined for `locale`.
    pub fn keys(&self, locale: LocaleCode) -> impl Iterator<Item = &str> {
        self.dictionaries[locale.index()].keys().map(String::as_str)
    }

    /// Number of entries defined for `locale`.
    pub fn len(&self, locale: LocaleCode) -> usize {
        self.dictionaries[locale.index()].len()
    }

    /// Overlay dictionaries from `<dir>/<code>.json`.
    ///
    /// Each file is a flat JSON object of key to text. Locales without a file
    /// are left as they are.
    ///
    /// # Returns
    /// The number of entries loaded.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<usize> {
        let mut loaded = 0;

        for locale in LocaleCode::ALL {
            let path = dir.join(format!("{}.json", locale.code()));
            if !path.exists() {
                debug!(path = %path.display(), "No dictionary override");
                continue;
            }

            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read dictionary {}", path.display()))?;
            let entries: HashMap<String, String> = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid dictionary {}", path.display()))?;

            loaded += entries.len();
            for (key, text) in entries {
                self.insert(locale, key, text);
            }
        }

        info!(entries = loaded, dir = %dir.display(), "Loaded dictionary overrides");
        Ok(loaded)
    }

    /// Resolve `key` for `locale` and report which tier answered.
    pub fn lookup<'a>(&'a self, locale: LocaleCode, key: &'a str) -> (&'a str, ResolutionTier) {
        if let Some(text) = self.get(locale, key) {
            return (text, ResolutionTier::Active);
        }
        if let Some(text) = self.get(LocaleCode::DEFAULT, key) {
            return (text, ResolutionTier::Default);
        }
        (key, ResolutionTier::Missing)
    }
}

impl Default for TranslationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolves UI keys against the store's active locale.
#[derive(Debug)]
pub struct Translator {
    store: Arc<LocaleStore>,
    catalog: TranslationCatalog,
    metrics: Arc<ResolutionMetrics>,
}

impl Translator {
    pub fn new(store: Arc<LocaleStore>, catalog: TranslationCatalog) -> Self {
        Self {
            store,
            catalog,
            metrics: Arc::new(ResolutionMetrics::new()),
        }
    }

    /// Share a metrics instance with other resolvers.
    pub fn with_metrics(mut self, metrics: Arc<ResolutionMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Display string for `key` in the active locale.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.resolve_in(self.store.current_locale(), key)
    }

    /// Display string for `key` in an explicit locale.
    pub fn resolve_in<'a>(&'a self, locale: LocaleCode, key: &'a str) -> &'a str {
        let (text, tier) = self.catalog.lookup(locale, key);
        if tier == ResolutionTier::Missing {
            debug!(key = %key, locale = %locale, "Missing translation");
        }
        self.metrics.record_translation(tier);
        text
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &Arc<LocaleStore> {
        &self.store
    }
}
