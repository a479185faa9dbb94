//! Typed dashboard records.
//!
//! Each entity type lists its localized fields in an enum, so a misspelled
//! field is a compile error, and knows which metrics it may carry. Metric
//! lookups apply the authoritative-first precedence with a synthesized
//! fallback keyed on the entity's identity.

use crate::i18n::{LocaleCode, LocalizedText};
use crate::synthetic::{resolve_metric, MetricSynthesizer, MetricValue, SyntheticMetric, ZeroPolicy};
use anyhow::{bail, Result};
use serde_json::{Map, Value};

/// A record with an identity, localized fields and optional metrics.
pub trait Entity {
    /// The entity's localized fields.
    type Field: Copy;

    /// String the synthesized metrics are derived from.
    fn identity(&self) -> &str;

    fn localized(&self, field: Self::Field) -> &LocalizedText;

    /// Upstream value of `metric`, if the record carries one.
    fn authoritative(&self, metric: SyntheticMetric) -> Option<f64>;

    /// Metrics shown for this entity type.
    fn metrics(&self) -> &'static [SyntheticMetric];

    /// Localized text of `field` in `locale`.
    fn text(&self, field: Self::Field, locale: LocaleCode) -> &str {
        self.localized(field).resolve(locale)
    }

    /// Display value of `metric`: authoritative if usable, synthesized otherwise.
    fn metric(
        &self,
        metric: SyntheticMetric,
        synthesizer: &MetricSynthesizer,
        policy: ZeroPolicy,
    ) -> MetricValue {
        let synthesized = synthesizer.synthesize_metric(self.identity(), metric);
        resolve_metric(self.authoritative(metric), synthesized, policy)
    }
}

/// Localized fields of a [`Course`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Title,
    Description,
}

impl CourseField {
    /// Base name of the field in upstream records.
    pub fn base(self) -> &'static str {
        match self {
            CourseField::Title => "title",
            CourseField::Description => "description",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub name: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub enrolled_students: Option<f64>,
    pub average_score: Option<f64>,
    pub completion_rate: Option<f64>,
}

const COURSE_METRICS: &[SyntheticMetric] = &[
    SyntheticMetric::EnrolledStudents,
    SyntheticMetric::AverageScore,
    SyntheticMetric::CompletionRate,
];

impl Course {
    /// Build a course from an upstream JSON record.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            name: identity_of(record)?,
            title: LocalizedText::from_record(record, CourseField::Title.base()),
            description: LocalizedText::from_record(record, CourseField::Description.base()),
            enrolled_students: number(record, SyntheticMetric::EnrolledStudents),
            average_score: number(record, SyntheticMetric::AverageScore),
            completion_rate: number(record, SyntheticMetric::CompletionRate),
        })
    }
}

impl Entity for Course {
    type Field = CourseField;

    fn identity(&self) -> &str {
        &self.name
    }

    fn localized(&self, field: CourseField) -> &LocalizedText {
        match field {
            CourseField::Title => &self.title,
            CourseField::Description => &self.description,
        }
    }

    fn authoritative(&self, metric: SyntheticMetric) -> Option<f64> {
        match metric {
            SyntheticMetric::EnrolledStudents => self.enrolled_students,
            SyntheticMetric::AverageScore => self.average_score,
            SyntheticMetric::CompletionRate => self.completion_rate,
            _ => None,
        }
    }

    fn metrics(&self) -> &'static [SyntheticMetric] {
        COURSE_METRICS
    }
}

/// Localized fields of a [`Student`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    DisplayName,
    Program,
}

impl StudentField {
    /// Base name of the field in upstream records.
    pub fn base(self) -> &'static str {
        match self {
            StudentField::DisplayName => "display_name",
            StudentField::Program => "program",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: String,
    pub display_name: LocalizedText,
    pub program: LocalizedText,
    pub average_score: Option<f64>,
    pub attendance_rate: Option<f64>,
    pub engagement_minutes: Option<f64>,
    pub assignments_submitted: Option<f64>,
}

const STUDENT_METRICS: &[SyntheticMetric] = &[
    SyntheticMetric::AverageScore,
    SyntheticMetric::AttendanceRate,
    SyntheticMetric::EngagementMinutes,
    SyntheticMetric::AssignmentsSubmitted,
];

impl Student {
    /// Build a student from an upstream JSON record.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            name: identity_of(record)?,
            display_name: LocalizedText::from_record(record, StudentField::DisplayName.base()),
            program: LocalizedText::from_record(record, StudentField::Program.base()),
            average_score: number(record, SyntheticMetric::AverageScore),
            attendance_rate: number(record, SyntheticMetric::AttendanceRate),
            engagement_minutes: number(record, SyntheticMetric::EngagementMinutes),
            assignments_submitted: number(record, SyntheticMetric::AssignmentsSubmitted),
        })
    }
}

impl Entity for Student {
    type Field = StudentField;

    fn identity(&self) -> &str {
        &self.name
    }

    fn localized(&self, field: StudentField) -> &LocalizedText {
        match field {
            StudentField::DisplayName => &self.display_name,
            StudentField::Program => &self.program,
        }
    }

    fn authoritative(&self, metric: SyntheticMetric) -> Option<f64> {
        match metric {
            SyntheticMetric::AverageScore => self.average_score,
            SyntheticMetric::AttendanceRate => self.attendance_rate,
            SyntheticMetric::EngagementMinutes => self.engagement_minutes,
            SyntheticMetric::AssignmentsSubmitted => self.assignments_submitted,
            _ => None,
        }
    }

    fn metrics(&self) -> &'static [SyntheticMetric] {
        STUDENT_METRICS
    }
}

/// Identity of a record: its `name`, else its `id`.
fn identity_of(record: &Map<String, Value>) -> Result<String> {
    for field in ["name", "id"] {
        match record.get(field) {
            Some(Value::String(value)) if !value.is_empty() => return Ok(value.clone()),
            Some(Value::Number(value)) => return Ok(value.to_string()),
            _ => {}
        }
    }
    bail!("Record has neither a 'name' nor an 'id'")
}

fn number(record: &Map<String, Value>, metric: SyntheticMetric) -> Option<f64> {
    record.get(metric.name()).and_then(Value::as_f64)
}
