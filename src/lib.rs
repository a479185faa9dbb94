//! Content-resolution core of the education dashboard.
//!
//! - [`i18n`]: active locale, UI string translation and per-record localized fields
//! - [`synthetic`]: deterministic placeholder metrics for records without data
//! - [`entity`]: typed records tying the two together

pub mod config;
pub mod entity;
pub mod i18n;
pub mod synthetic;
