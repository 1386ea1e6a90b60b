mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{LoanApplication, Progress, UserProfile};

pub const PROFILE_KEY: &str = "loan_profile";
pub const APPLICATION_KEY: &str = "loan_application";
pub const PROGRESS_KEY: &str = "application_progress";
pub const LANGUAGE_KEY: &str = "preferred_language";
pub const BANK_SMS_KEY: &str = "bank_sms";

/// Opaque string-keyed persistence.
pub trait KeyValueStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Typed view over a [`KeyValueStore`] holding one applicant's intake state
/// as JSON documents.
pub struct LoanStore<S> {
    inner: S,
}

impl<S: KeyValueStore> LoanStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn save_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json =
            serde_json::to_string(value).with_context(|| format!("Failed to encode '{key}'"))?;
        debug!(key, bytes = json.len(), "saving");
        self.inner.save(key, &json)
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.inner.load(key)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .with_context(|| format!("Stored value for '{key}' is corrupt")),
            None => Ok(None),
        }
    }

    // ── Profile ───────────────────────────────────────────────

    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        self.save_json(PROFILE_KEY, profile)
    }

    pub fn profile(&self) -> Result<Option<UserProfile>> {
        self.load_json(PROFILE_KEY)
    }

    // ── Application ───────────────────────────────────────────

    /// Stamps the application with the current time before saving.
    pub fn save_application(&mut self, application: &LoanApplication) -> Result<()> {
        let mut application = application.clone();
        application.timestamp = chrono::Utc::now().timestamp_millis();
        self.save_json(APPLICATION_KEY, &application)
    }

    pub fn application(&self) -> Result<Option<LoanApplication>> {
        self.load_json(APPLICATION_KEY)
    }

    // ── Progress ──────────────────────────────────────────────

    pub fn save_progress(&mut self, step: &str, data: Option<serde_json::Value>) -> Result<()> {
        self.save_json(PROGRESS_KEY, &Progress::new(step, data))
    }

    pub fn progress(&self) -> Result<Option<Progress>> {
        self.load_json(PROGRESS_KEY)
    }

    // ── Bank SMS ──────────────────────────────────────────────

    pub fn save_bank_sms(&mut self, text: &str) -> Result<()> {
        self.inner.save(BANK_SMS_KEY, text)
    }

    pub fn bank_sms(&self) -> Result<Option<String>> {
        self.inner.load(BANK_SMS_KEY)
    }

    // ── Language ──────────────────────────────────────────────

    pub fn save_language(&mut self, language: &str) -> Result<()> {
        self.inner.save(LANGUAGE_KEY, language)
    }

    pub fn language(&self) -> Result<Option<String>> {
        self.inner.load(LANGUAGE_KEY)
    }

    /// Forget the applicant's data. The language preference survives.
    pub fn clear_all(&mut self) -> Result<()> {
        for key in [PROFILE_KEY, APPLICATION_KEY, PROGRESS_KEY, BANK_SMS_KEY] {
            self.inner.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
