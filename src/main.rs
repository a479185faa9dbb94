//! Preview binary - renders dashboard strings and placeholder metrics
//!
//! Usage:
//!   cargo run -- [--locale <code>] [--courses <file.json>] [identity ...]
//!
//! Optional environment variables:
//! - LOCALE_STATE_FILE (defaults to data/locale.json)
//! - TRANSLATIONS_DIR
//! - SYNTHESIS_ALGORITHM (legacy | splitmix)
//! - ZERO_METRIC_POLICY (missing | authoritative)

use anyhow::{bail, Context, Result};
use edu_dashboard_content::config::Config;
use edu_dashboard_content::entity::{Course, CourseField, Entity};
use edu_dashboard_content::i18n::{
    CatalogValidator, FileStorage, LocaleStore, TranslationCatalog, Translator,
};
use edu_dashboard_content::synthetic::{MetricSynthesizer, SyntheticMetric};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

struct Args {
    locale: Option<String>,
    courses: Option<PathBuf>,
    identities: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut locale = None;
    let mut courses = None;
    let mut identities = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        if arg == "--locale" {
            match args.next() {
                Some(code) => locale = Some(code),
                None => bail!("--locale requires a value"),
            }
        } else if arg == "--courses" {
            match args.next() {
                Some(path) => courses = Some(PathBuf::from(path)),
                None => bail!("--courses requires a file path"),
            }
        } else {
            identities.push(arg);
        }
    }

    Ok(Args {
        locale,
        courses,
        identities,
    })
}

fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("edu_dashboard_content=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;

    let store = Arc::new(LocaleStore::load(FileStorage::new(&config.locale_state_file)));
    info!(locale = %store.current_locale(), "Locale store ready");

    if let Some(code) = args.locale.as_deref() {
        if !store.set_locale_code(code) {
            warn!(code = %code, "Unsupported locale, keeping {}", store.current_locale());
        }
    }

    let mut catalog = TranslationCatalog::builtin();
    if let Some(dir) = &config.translations_dir {
        catalog.load_overrides(dir)?;
    }

    let report = CatalogValidator::validate(&catalog);
    for error in &report.errors {
        warn!("Catalog error: {}", error);
    }

    let translator = Translator::new(Arc::clone(&store), catalog);
    let synthesizer = MetricSynthesizer::new(config.synthesis_algorithm);

    println!(
        "{} [{}, {}]",
        translator.resolve("dashboard.title"),
        store.current_locale().native_name(),
        store.direction().as_attr()
    );
    println!("{}", translator.resolve("dashboard.subtitle"));

    if let Some(path) = &args.courses {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let records: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(&raw).context("Course file must be a JSON array of objects")?;
        let locale = store.current_locale();

        for record in &records {
            let course = Course::from_record(record)?;
            println!();
            println!("{}", course.text(CourseField::Title, locale));
            for metric in course.metrics() {
                let value = course.metric(*metric, &synthesizer, config.zero_metric_policy);
                let marker = if value.is_synthesized() {
                    format!(" ({})", translator.resolve("metrics.estimated"))
                } else {
                    String::new()
                };
                println!("  {}: {}{}", translator.resolve(metric.label_key()), value.value, marker);
            }
        }
    }

    if args.identities.is_empty() && args.courses.is_none() {
        println!("{}", translator.resolve("common.no_data"));
        return Ok(());
    }

    for identity in &args.identities {
        let metrics = synthesizer.synthesize(identity);
        println!();
        println!("{} ({})", identity, translator.resolve("metrics.estimated"));
        for metric in SyntheticMetric::ALL {
            println!("  {}: {}", translator.resolve(metric.label_key()), metrics.get(metric));
        }
        println!("{}", serde_json::to_string(&metrics)?);
    }

    info!(coverage = translator.metrics().report().translation_coverage, "Done");
    Ok(())
}
