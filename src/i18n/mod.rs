//! Internationalization (i18n) module for the dashboard's text layer.
//!
//! # Architecture
//!
//! - `locale`: `LocaleCode`, the closed set of supported locales and their field suffixes
//! - `registry`: display metadata for every locale
//! - `store`: `LocaleStore`, the active locale, its persistence and listeners
//! - `strings`: built-in UI dictionaries
//! - `resolver`: `Translator`, UI key to display string
//! - `fields`: `FieldResolver` and `LocalizedText`, per-record multilingual fields
//! - `validator`: catalog completeness checks
//! - `metrics`: resolution counters
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use edu_dashboard_content::i18n::{LocaleCode, LocaleStore, TranslationCatalog, Translator};
//!
//! let store = Arc::new(LocaleStore::in_memory());
//! let translator = Translator::new(Arc::clone(&store), TranslationCatalog::builtin());
//!
//! store.set_locale(LocaleCode::Es);
//! assert_eq!(translator.resolve("nav.students"), "Estudiantes");
//! ```

mod fields;
mod locale;
mod metrics;
mod registry;
mod resolver;
mod store;
pub mod strings;
mod validator;

pub use fields::{lookup_field, FieldResolver, FieldSource, LocalizedText};
pub use locale::LocaleCode;
pub use metrics::{MetricsReport, ResolutionMetrics, ResolutionTier};
pub use registry::{LocaleConfig, LocaleRegistry, TextDirection};
pub use resolver::{TranslationCatalog, Translator};
pub use store::{
    FileStorage, LocaleStorage, LocaleStore, MemoryStorage, StorageError, SubscriptionId,
};
pub use validator::{CatalogValidator, ValidationReport};
