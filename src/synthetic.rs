//! Deterministic placeholder metrics.
//!
//! When a record has no authoritative figure for a metric, the dashboard shows
//! a plausible stand-in derived only from the record's identity string. The
//! same identity always yields the same numbers, on any machine and in any
//! run. The values are not random in any useful sense and must never be used
//! where unpredictability matters.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A metric the synthesizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntheticMetric {
    /// Average assessment score, `[60, 95)`
    AverageScore,
    /// Attendance percentage, `[70, 100)`
    AttendanceRate,
    /// Course completion percentage, `[40, 95)`
    CompletionRate,
    /// Weekly engagement in minutes, `[20, 180)`
    EngagementMinutes,
    /// Assignments handed in this term, `[5, 40)`
    AssignmentsSubmitted,
    /// Students enrolled in a course, `[15, 120)`
    EnrolledStudents,
}

impl SyntheticMetric {
    pub const ALL: [SyntheticMetric; 6] = [
        SyntheticMetric::AverageScore,
        SyntheticMetric::AttendanceRate,
        SyntheticMetric::CompletionRate,
        SyntheticMetric::EngagementMinutes,
        SyntheticMetric::AssignmentsSubmitted,
        SyntheticMetric::EnrolledStudents,
    ];

    /// Field name used in records and serialized output.
    pub fn name(self) -> &'static str {
        match self {
            SyntheticMetric::AverageScore => "average_score",
            SyntheticMetric::AttendanceRate => "attendance_rate",
            SyntheticMetric::CompletionRate => "completion_rate",
            SyntheticMetric::EngagementMinutes => "engagement_minutes",
            SyntheticMetric::AssignmentsSubmitted => "assignments_submitted",
            SyntheticMetric::EnrolledStudents => "enrolled_students",
        }
    }

    /// Dictionary key of the metric's UI label.
    pub fn label_key(self) -> &'static str {
        match self {
            SyntheticMetric::AverageScore => "metrics.average_score",
            SyntheticMetric::AttendanceRate => "metrics.attendance_rate",
            SyntheticMetric::CompletionRate => "metrics.completion_rate",
            SyntheticMetric::EngagementMinutes => "metrics.engagement_minutes",
            SyntheticMetric::AssignmentsSubmitted => "metrics.assignments_submitted",
            SyntheticMetric::EnrolledStudents => "metrics.enrolled_students",
        }
    }

    /// Per-metric offset added to the identity seed. Fixed forever: changing
    /// one changes every value previously shown for that metric.
    pub fn offset(self) -> u64 {
        match self {
            SyntheticMetric::AverageScore => 1,
            SyntheticMetric::AttendanceRate => 2,
            SyntheticMetric::CompletionRate => 3,
            SyntheticMetric::EngagementMinutes => 4,
            SyntheticMetric::AssignmentsSubmitted => 5,
            SyntheticMetric::EnrolledStudents => 6,
        }
    }

    /// Half-open range `[min, max)` of the metric.
    pub fn range(self) -> (i64, i64) {
        match self {
            SyntheticMetric::AverageScore => (60, 95),
            SyntheticMetric::AttendanceRate => (70, 100),
            SyntheticMetric::CompletionRate => (40, 95),
            SyntheticMetric::EngagementMinutes => (20, 180),
            SyntheticMetric::AssignmentsSubmitted => (5, 40),
            SyntheticMetric::EnrolledStudents => (15, 120),
        }
    }
}

impl fmt::Display for SyntheticMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the seed is turned into a fraction in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisAlgorithm {
    /// Fractional part of `sin(seed + offset) * 10000`. Matches every figure
    /// the dashboard has displayed so far.
    #[default]
    Legacy,
    /// splitmix64 scramble of the seed. Better spread, different numbers.
    SplitMix,
}

impl FromStr for SynthesisAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "sine" => Ok(SynthesisAlgorithm::Legacy),
            "splitmix" | "splitmix64" => Ok(SynthesisAlgorithm::SplitMix),
            other => bail!("Unknown synthesis algorithm: '{}'", other),
        }
    }
}

/// Seed derived from an identity: the sum of its UTF-16 code units.
///
/// Anagrams share a seed. The empty string has seed 0.
pub fn identity_seed(identity: &str) -> u64 {
    identity.encode_utf16().map(u64::from).sum()
}

// `f64::sin` may differ across platforms; libm gives the same bits everywhere.
fn legacy_fraction(seed: u64, offset: u64) -> f64 {
    let raw = libm::sin(seed.wrapping_add(offset) as f64) * 10000.0;
    let magnitude = raw.abs();
    magnitude - magnitude.floor()
}

fn splitmix_fraction(seed: u64, offset: u64) -> f64 {
    let mut z = (seed ^ offset.wrapping_mul(0x9e37_79b9_7f4a_7c15))
        .wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 11) as f64 / ((1u64 << 53) as f64)
}

/// Map a fraction in `[0, 1)` onto `[min, max)`.
fn scale(fraction: f64, min: i64, max: i64) -> i64 {
    let value = (min as f64 + fraction * (max - min) as f64).floor() as i64;
    // Rounding can land exactly on `max` for fractions just below 1.
    value.clamp(min, max - 1)
}

/// A full set of synthesized metrics for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SynthesizedMetricSet {
    values: BTreeMap<SyntheticMetric, i64>,
}

impl SynthesizedMetricSet {
    pub fn get(&self, metric: SyntheticMetric) -> i64 {
        self.values.get(&metric).copied().unwrap_or(metric.range().0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SyntheticMetric, i64)> + '_ {
        self.values.iter().map(|(metric, value)| (*metric, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Produces deterministic metrics from identity strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricSynthesizer {
    algorithm: SynthesisAlgorithm,
}

impl MetricSynthesizer {
    pub fn new(algorithm: SynthesisAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> SynthesisAlgorithm {
        self.algorithm
    }

    /// Every metric for `identity`.
    pub fn synthesize(&self, identity: &str) -> SynthesizedMetricSet {
        let seed = identity_seed(identity);
        let values = SyntheticMetric::ALL
            .iter()
            .map(|metric| (*metric, self.value_for_seed(seed, *metric)))
            .collect();
        SynthesizedMetricSet { values }
    }

    /// A single metric for `identity`.
    pub fn synthesize_metric(&self, identity: &str, metric: SyntheticMetric) -> i64 {
        self.value_for_seed(identity_seed(identity), metric)
    }

    fn value_for_seed(&self, seed: u64, metric: SyntheticMetric) -> i64 {
        let fraction = match self.algorithm {
            SynthesisAlgorithm::Legacy => legacy_fraction(seed, metric.offset()),
            SynthesisAlgorithm::SplitMix => splitmix_fraction(seed, metric.offset()),
        };
        let (min, max) = metric.range();
        scale(fraction, min, max)
    }
}

/// Every metric for `identity` using the legacy algorithm.
pub fn synthesize(identity: &str) -> SynthesizedMetricSet {
    MetricSynthesizer::default().synthesize(identity)
}

// ==================== Precedence ====================

/// What an authoritative value of exactly zero means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPolicy {
    /// Zero means "no data yet" and is replaced by a synthesized value.
    #[default]
    TreatAsMissing,
    /// Zero is a real measurement and is shown as is.
    Authoritative,
}

impl FromStr for ZeroPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "missing" | "treat_as_missing" => Ok(ZeroPolicy::TreatAsMissing),
            "authoritative" => Ok(ZeroPolicy::Authoritative),
            other => bail!("Unknown zero metric policy: '{}'", other),
        }
    }
}

/// Where a displayed metric came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricOrigin {
    Authoritative,
    Synthesized,
}

/// A metric ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricValue {
    pub value: f64,
    pub origin: MetricOrigin,
}

impl MetricValue {
    pub fn is_synthesized(&self) -> bool {
        self.origin == MetricOrigin::Synthesized
    }
}

/// Prefer the authoritative value; fall back to the synthesized one.
///
/// Absent and non-finite values always fall back. Zero falls back unless the
/// policy says zero is authoritative.
pub fn resolve_metric(
    authoritative: Option<f64>,
    synthesized: i64,
    policy: ZeroPolicy,
) -> MetricValue {
    let usable = authoritative
        .filter(|value| value.is_finite())
        .filter(|value| *value != 0.0 || policy == ZeroPolicy::Authoritative);

    match usable {
        Some(value) => MetricValue {
            value,
            origin: MetricOrigin::Authoritative,
        },
        None => MetricValue {
            value: synthesized as f64,
            origin: MetricOrigin::Synthesized,
        },
    }
}
