//! Localized field resolver: per-record multilingual text.
//!
//! Upstream records carry one variant per locale (`title_en`, `title_es`, ...)
//! plus a legacy unsuffixed `title`. The best variant is chosen in a fixed
//! order: active locale, default locale, legacy field, empty string.

use crate::i18n::{LocaleCode, LocaleStore, ResolutionMetrics, ResolutionTier};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// A record whose fields can be probed by name.
///
/// Implementations return only "truthy" values: non-empty text, non-zero
/// numbers and `true`. Everything else counts as absent.
pub trait FieldSource {
    fn text_field(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl FieldSource for Map<String, Value> {
    fn text_field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).and_then(truthy_text)
    }
}

impl FieldSource for Value {
    fn text_field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self {
            Value::Object(map) => map.text_field(name),
            _ => None,
        }
    }
}

impl FieldSource for HashMap<String, String> {
    fn text_field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name)
            .filter(|text| !text.is_empty())
            .map(|text| Cow::Borrowed(text.as_str()))
    }
}

fn truthy_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) if !text.is_empty() => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => match number.as_f64() {
            Some(n) if n != 0.0 && n.is_finite() => {
                // Whole floats render without a fractional part: 7.0 -> "7"
                let text = if number.is_f64() { n.to_string() } else { number.to_string() };
                Some(Cow::Owned(text))
            }
            _ => None,
        },
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        _ => None,
    }
}

/// Walk the fallback chain for `base` on `record` in `locale`.
pub fn lookup_field<'r>(
    record: &'r impl FieldSource,
    base: &str,
    locale: LocaleCode,
) -> (Cow<'r, str>, ResolutionTier) {
    let active = format!("{}{}", base, locale.suffix());
    if let Some(text) = record.text_field(&active) {
        return (text, ResolutionTier::Active);
    }

    if locale != LocaleCode::DEFAULT {
        let default = format!("{}{}", base, LocaleCode::DEFAULT.suffix());
        if let Some(text) = record.text_field(&default) {
            return (text, ResolutionTier::Default);
        }
    }

    if let Some(text) = record.text_field(base) {
        return (text, ResolutionTier::Legacy);
    }

    (Cow::Borrowed(""), ResolutionTier::Missing)
}

/// Parallel per-locale variants of one text field, plus the legacy value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    variants: [Option<String>; LocaleCode::COUNT],
    legacy: Option<String>,
}

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text with only a legacy (unsuffixed) value.
    pub fn legacy_only(text: impl Into<String>) -> Self {
        Self::new().with_legacy(text)
    }

    /// Collect every variant of `base` from a raw record.
    pub fn from_record(record: &impl FieldSource, base: &str) -> Self {
        let mut text = Self::new();
        for locale in LocaleCode::ALL {
            let name = format!("{}{}", base, locale.suffix());
            if let Some(value) = record.text_field(&name) {
                text.set(locale, value.into_owned());
            }
        }
        if let Some(value) = record.text_field(base) {
            text.legacy = Some(value.into_owned());
        }
        text
    }

    /// Set the variant for `locale`. Empty text clears it.
    pub fn set(&mut self, locale: LocaleCode, text: impl Into<String>) {
        self.variants[locale.index()] = non_empty(text.into());
    }

    pub fn with(mut self, locale: LocaleCode, text: impl Into<String>) -> Self {
        self.set(locale, text);
        self
    }

    pub fn with_legacy(mut self, text: impl Into<String>) -> Self {
        self.legacy = non_empty(text.into());
        self
    }

    pub fn variant(&self, locale: LocaleCode) -> Option<&str> {
        self.variants[locale.index()].as_deref()
    }

    pub fn legacy(&self) -> Option<&str> {
        self.legacy.as_deref()
    }

    /// True when no variant and no legacy value exist.
    pub fn is_empty(&self) -> bool {
        self.legacy.is_none() && self.variants.iter().all(Option::is_none)
    }

    /// Best text for `locale`.
    pub fn resolve(&self, locale: LocaleCode) -> &str {
        self.lookup(locale).0
    }

    /// Best text for `locale` and the tier that supplied it.
    pub fn lookup(&self, locale: LocaleCode) -> (&str, ResolutionTier) {
        if let Some(text) = self.variant(locale) {
            return (text, ResolutionTier::Active);
        }
        if let Some(text) = self.variant(LocaleCode::DEFAULT) {
            return (text, ResolutionTier::Default);
        }
        match self.legacy() {
            Some(text) => (text, ResolutionTier::Legacy),
            None => ("", ResolutionTier::Missing),
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Resolves multilingual record fields against the store's active locale.
#[derive(Debug)]
pub struct FieldResolver {
    store: Arc<LocaleStore>,
    metrics: Arc<ResolutionMetrics>,
}

impl FieldResolver {
    pub fn new(store: Arc<LocaleStore>) -> Self {
        Self {
            store,
            metrics: Arc::new(ResolutionMetrics::new()),
        }
    }

    /// Share a metrics instance with other resolvers.
    pub fn with_metrics(mut self, metrics: Arc<ResolutionMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Best variant of `base` on a raw record, or `""`.
    pub fn resolve_field(&self, record: &impl FieldSource, base: &str) -> String {
        self.resolve_field_in(self.store.current_locale(), record, base)
    }

    /// Same as [`FieldResolver::resolve_field`] for an explicit locale.
    pub fn resolve_field_in(
        &self,
        locale: LocaleCode,
        record: &impl FieldSource,
        base: &str,
    ) -> String {
        let (text, tier) = lookup_field(record, base, locale);
        self.metrics.record_field(tier);
        text.into_owned()
    }

    /// Best variant of a typed field for the active locale.
    pub fn resolve_text<'t>(&self, text: &'t LocalizedText) -> &'t str {
        let (value, tier) = text.lookup(self.store.current_locale());
        self.metrics.record_field(tier);
        value
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver(locale: LocaleCode) -> FieldResolver {
        let store = Arc::new(LocaleStore::in_memory());
        store.set_locale(locale);
        FieldResolver::new(store)
    }

    // ==================== Fallback Chain Tests ====================

    #[test]
    fn test_active_variant_wins() {
        let record = json!({ "title_es": "Álgebra", "title_en": "Algebra", "title": "Alg" });
        assert_eq!(resolver(LocaleCode::Es).resolve_field(&record, "title"), "Álgebra");
    }

    #[test]
    fn test_falls_back_to_default_variant() {
        let record = json!({ "title_en": "A" });
        assert_eq!(resolver(LocaleCode::Es).resolve_field(&record, "title"), "A");
    }

    #[test]
    fn test_falls_back_to_legacy_field() {
        let record = json!({ "title": "Legacy", "title_fr": "Français" });
        assert_eq!(resolver(LocaleCode::Es).resolve_field(&record, "title"), "Legacy");
    }

    #[test]
    fn test_empty_record_resolves_to_empty_string() {
        let record = json!({});
        assert_eq!(resolver(LocaleCode::Fr).resolve_field(&record, "title"), "");
    }

    #[test]
    fn test_non_object_record_resolves_to_empty_string() {
        assert_eq!(resolver(LocaleCode::En).resolve_field(&json!(null), "title"), "");
        assert_eq!(resolver(LocaleCode::En).resolve_field(&json!([1, 2]), "title"), "");
    }

    #[test]
    fn test_empty_string_is_skipped() {
        let record = json!({ "title_es": "", "title_en": "", "title": "Legacy" });
        assert_eq!(resolver(LocaleCode::Es).resolve_field(&record, "title"), "Legacy");
    }

    #[test]
    fn test_null_and_false_are_skipped() {
        let record = json!({ "title_es": null, "title_en": false, "title": "Legacy" });
        assert_eq!(resolver(LocaleCode::Es).resolve_field(&record, "title"), "Legacy");
    }

    #[test]
    fn test_numeric_values() {
        let record = json!({ "grade_es": 0, "grade_en": 7 });
        assert_eq!(resolver(LocaleCode::Es).resolve_field(&record, "grade"), "7");
    }

    #[test]
    fn test_whole_float_renders_without_fraction() {
        let record = json!({ "grade_en": 7.0, "score_en": 7.5, "rank_en": -3.0 });
        let resolver = resolver(LocaleCode::En);
        assert_eq!(resolver.resolve_field(&record, "grade"), "7");
        assert_eq!(resolver.resolve_field(&record, "score"), "7.5");
        assert_eq!(resolver.resolve_field(&record, "rank"), "-3");
    }

    #[test]
    fn test_other_locale_variant_is_never_used() {
        let record = json!({ "title_fr": "Seulement" });
        assert_eq!(resolver(LocaleCode::Es).resolve_field(&record, "title"), "");
    }

    #[test]
    fn test_hash_map_record() {
        let mut record = HashMap::new();
        record.insert("name_en".to_string(), "Maple High".to_string());
        record.insert("name_fr".to_string(), "Lycée Érable".to_string());

        assert_eq!(resolver(LocaleCode::Fr).resolve_field(&record, "name"), "Lycée Érable");
        assert_eq!(resolver(LocaleCode::Es).resolve_field(&record, "name"), "Maple High");
    }

    #[test]
    fn test_tiers_are_counted() {
        let resolver = resolver(LocaleCode::Es);
        resolver.resolve_field(&json!({ "t_es": "x" }), "t");
        resolver.resolve_field(&json!({ "t_en": "x" }), "t");
        resolver.resolve_field(&json!({ "t": "x" }), "t");
        resolver.resolve_field(&json!({}), "t");

        let report = resolver.metrics().report();
        assert_eq!(report.field_active, 1);
        assert_eq!(report.field_default, 1);
        assert_eq!(report.field_legacy, 1);
        assert_eq!(report.field_empty, 1);
    }

    // ==================== LocalizedText Tests ====================

    #[test]
    fn test_localized_text_from_record() {
        let record = json!({ "title_en": "Biology", "title_es": "Biología", "title": "Bio" });
        let text = LocalizedText::from_record(&record, "title");

        assert_eq!(text.variant(LocaleCode::En), Some("Biology"));
        assert_eq!(text.variant(LocaleCode::Es), Some("Biología"));
        assert_eq!(text.variant(LocaleCode::Fr), None);
        assert_eq!(text.legacy(), Some("Bio"));
    }

    #[test]
    fn test_localized_text_chain() {
        let text = LocalizedText::new()
            .with(LocaleCode::En, "History")
            .with_legacy("Hist");

        assert_eq!(text.lookup(LocaleCode::En), ("History", ResolutionTier::Active));
        assert_eq!(text.lookup(LocaleCode::Fr), ("History", ResolutionTier::Default));
        assert_eq!(
            LocalizedText::legacy_only("Hist").lookup(LocaleCode::Fr),
            ("Hist", ResolutionTier::Legacy)
        );
        assert_eq!(LocalizedText::new().resolve(LocaleCode::Es), "");
    }

    #[test]
    fn test_localized_text_empty_values_cleared() {
        let mut text = LocalizedText::new().with(LocaleCode::Es, "Arte");
        text.set(LocaleCode::Es, "");
        assert!(text.is_empty());
        assert!(LocalizedText::legacy_only("").is_empty());
    }

    #[test]
    fn test_typed_and_raw_paths_agree() {
        let record = json!({ "title_fr": "Chimie", "title": "Chem" });
        let text = LocalizedText::from_record(&record, "title");
        for locale in LocaleCode::ALL {
            let (raw, _) = lookup_field(&record, "title", locale);
            assert_eq!(text.resolve(locale), raw);
        }
    }

    #[test]
    fn test_resolve_text_uses_active_locale() {
        let resolver = resolver(LocaleCode::Fr);
        let text = LocalizedText::new()
            .with(LocaleCode::En, "Physics")
            .with(LocaleCode::Fr, "Physique");
        assert_eq!(resolver.resolve_text(&text), "Physique");
    }
}
