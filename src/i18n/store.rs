//! Locale state store: the active locale, its persistence and its listeners.
//!
//! `LocaleStore` is an injectable service. Views hold an `Arc<LocaleStore>`
//! and read the active locale from it; only an explicit user action changes
//! it through [`LocaleStore::set_locale`] or [`LocaleStore::set_locale_code`].

use crate::i18n::{LocaleCode, TextDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised by a [`LocaleStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access locale state at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("locale state at {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("locale storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage holding the single persisted locale code.
pub trait LocaleStorage: Send + Sync {
    /// Read the persisted code, `None` when nothing was ever saved.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the persisted code.
    fn save(&self, code: &str) -> Result<(), StorageError>;
}

/// On-disk shape of the persisted locale.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedLocale {
    locale: String,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Stores the locale as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LocaleStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let persisted: PersistedLocale =
            serde_json::from_str(&raw).map_err(|source| StorageError::Json {
                path: self.path.clone(),
                source,
            })?;

        Ok(Some(persisted.locale))
    }

    fn save(&self, code: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let document = PersistedLocale {
            locale: code.to_string(),
            updated_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&document).map_err(|source| {
            StorageError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

#[derive(Debug, Default)]
struct MemoryCell {
    value: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// In-process storage. Clones share the same cell, so a test can keep a handle
/// and build a second store from it to simulate a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    cell: Arc<Mutex<MemoryCell>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `code`, as if saved by an earlier run.
    pub fn with_value(code: &str) -> Self {
        let storage = Self::new();
        storage.lock().value = Some(code.to_string());
        storage
    }

    /// Currently persisted code.
    pub fn value(&self) -> Option<String> {
        self.lock().value.clone()
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make every subsequent save fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryCell> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocaleStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value())
    }

    fn save(&self, code: &str) -> Result<(), StorageError> {
        let mut cell = self.lock();
        if cell.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        cell.value = Some(code.to_string());
        cell.writes += 1;
        Ok(())
    }
}

/// Handle returned by [`LocaleStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(LocaleCode) + Send + Sync>;

#[derive(Debug, Clone, Copy)]
struct LocaleState {
    locale: LocaleCode,
    direction: TextDirection,
}

impl LocaleState {
    fn for_locale(locale: LocaleCode) -> Self {
        Self {
            locale,
            direction: locale.direction(),
        }
    }
}

/// Holds the active locale and the presentation direction derived from it.
pub struct LocaleStore {
    state: RwLock<LocaleState>,
    storage: Box<dyn LocaleStorage>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

impl LocaleStore {
    /// Initialize the store from durable storage.
    ///
    /// A missing value starts the store on the default locale. An unreadable
    /// or unsupported value does the same, with a warning.
    pub fn load(storage: impl LocaleStorage + 'static) -> Self {
        let locale = match storage.load() {
            Ok(Some(code)) => match LocaleCode::parse(&code) {
                Some(locale) => {
                    debug!(locale = %locale, "Restored persisted locale");
                    locale
                }
                None => {
                    warn!(code = %code, "Persisted locale is not supported, using default");
                    LocaleCode::DEFAULT
                }
            },
            Ok(None) => LocaleCode::DEFAULT,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted locale, using default");
                LocaleCode::DEFAULT
            }
        };

        Self {
            state: RwLock::new(LocaleState::for_locale(locale)),
            storage: Box::new(storage),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Store backed by a fresh [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::load(MemoryStorage::new())
    }

    /// The active locale.
    pub fn current_locale(&self) -> LocaleCode {
        self.read_state().locale
    }

    /// Text direction of the active locale.
    pub fn direction(&self) -> TextDirection {
        self.read_state().direction
    }

    /// Switch the active locale.
    ///
    /// Updates memory, persists the code (a failed write is logged and
    /// otherwise ignored), updates the direction flag and notifies listeners.
    pub fn set_locale(&self, locale: LocaleCode) {
        {
            // Held across the save so memory and storage agree on the last writer
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = LocaleState::for_locale(locale);

            if let Err(e) = self.storage.save(locale.code()) {
                warn!(locale = %locale, error = %e, "Failed to persist locale");
            }
        }

        info!(locale = %locale, direction = locale.direction().as_attr(), "Locale changed");
        self.notify(locale);
    }

    /// Switch the active locale from a code string.
    ///
    /// Unsupported codes leave the store untouched and return `false`.
    pub fn set_locale_code(&self, code: &str) -> bool {
        match LocaleCode::parse(code) {
            Some(locale) => {
                self.set_locale(locale);
                true
            }
            None => {
                warn!(code = %code, "Ignoring unsupported locale");
                false
            }
        }
    }

    /// Register a listener called with the new locale after every change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(LocaleCode) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.lock_listeners().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.lock_listeners().len()
    }

    /// Return to the default locale and drop every listener.
    ///
    /// Storage is not touched. Meant for tests that share a store.
    pub fn reset(&self) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = LocaleState::for_locale(LocaleCode::DEFAULT);
        }
        self.lock_listeners().clear();
    }

    fn notify(&self, locale: LocaleCode) {
        // Listeners run outside the lock so they may read or resubscribe.
        let listeners: Vec<Listener> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(locale);
        }
    }

    fn read_state(&self) -> LocaleState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleStore")
            .field("locale", &self.current_locale())
            .field("direction", &self.direction())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
