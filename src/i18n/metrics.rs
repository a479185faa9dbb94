//! Resolution metrics and observability.
//!
//! Counts how translations and localized fields were resolved, so missing
//! translations show up as numbers and not only as raw keys on screen.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by the translation and field resolvers.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Keys found in the active locale's dictionary
    direct_hits: AtomicUsize,

    /// Keys served from the default locale's dictionary
    default_fallbacks: AtomicUsize,

    /// Keys found nowhere and returned raw
    missing_keys: AtomicUsize,

    /// Fields served from the active locale's variant
    field_active: AtomicUsize,

    /// Fields served from the default locale's variant
    field_default: AtomicUsize,

    /// Fields served from the unsuffixed legacy value
    field_legacy: AtomicUsize,

    /// Fields with no usable value
    field_empty: AtomicUsize,
}

/// Which tier of the fallback chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionTier {
    Active,
    Default,
    Legacy,
    Missing,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a translation lookup outcome (`Legacy` never applies here).
    pub fn record_translation(&self, tier: ResolutionTier) {
        let counter = match tier {
            ResolutionTier::Active => &self.direct_hits,
            ResolutionTier::Default | ResolutionTier::Legacy => &self.default_fallbacks,
            ResolutionTier::Missing => &self.missing_keys,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a localized field lookup outcome.
    pub fn record_field(&self, tier: ResolutionTier) {
        let counter = match tier {
            ResolutionTier::Active => &self.field_active,
            ResolutionTier::Default => &self.field_default,
            ResolutionTier::Legacy => &self.field_legacy,
            ResolutionTier::Missing => &self.field_empty,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn direct_hits(&self) -> usize {
        self.direct_hits.load(Ordering::Relaxed)
    }

    pub fn default_fallbacks(&self) -> usize {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.direct_hits();
        let fallbacks = self.default_fallbacks();
        let missing = self.missing_keys();
        let total = hits + fallbacks + missing;
        let translation_coverage = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            direct_hits: hits,
            default_fallbacks: fallbacks,
            missing_keys: missing,
            translation_coverage,
            field_active: self.field_active.load(Ordering::Relaxed),
            field_default: self.field_default.load(Ordering::Relaxed),
            field_legacy: self.field_legacy.load(Ordering::Relaxed),
            field_empty: self.field_empty.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        for counter in [
            &self.direct_hits,
            &self.default_fallbacks,
            &self.missing_keys,
            &self.field_active,
            &self.field_default,
            &self.field_legacy,
            &self.field_empty,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Snapshot of the resolution counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub direct_hits: usize,
    pub default_fallbacks: usize,
    pub missing_keys: usize,

    /// Share of translations served by the active locale, as a percentage (0-100)
    pub translation_coverage: f64,

    pub field_active: usize,
    pub field_default: usize,
    pub field_legacy: usize,
    pub field_empty: usize,
}
