#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{ApplicationStatus, Occupation};

fn make_profile() -> UserProfile {
    UserProfile::new(
        "Meena".into(),
        "46-60".into(),
        Occupation::Farmer,
        "Anand".into(),
        Some(dec!(8000)),
    )
}

fn exercise_store<S: KeyValueStore>(store: &mut S) {
    assert_eq!(store.load("missing").unwrap(), None);

    store.save("k", "v1").unwrap();
    assert_eq!(store.load("k").unwrap().as_deref(), Some("v1"));

    store.save("k", "v2").unwrap();
    assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));

    store.remove("k").unwrap();
    assert_eq!(store.load("k").unwrap(), None);

    // removing an absent key is not an error
    store.remove("k").unwrap();
}

// ── Backends ──────────────────────────────────────────────────

#[test]
fn test_memory_store_contract() {
    let mut store = MemoryStore::new();
    exercise_store(&mut store);
    assert!(store.is_empty());
}

#[test]
fn test_sqlite_store_contract() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    exercise_store(&mut store);
}

#[test]
fn test_sqlite_store_schema_version() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credflow.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.save(LANGUAGE_KEY, "hi").unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.load(LANGUAGE_KEY).unwrap().as_deref(), Some("hi"));
    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
}

// ── LoanStore ─────────────────────────────────────────────────

#[test]
fn test_profile_roundtrip() {
    let mut store = LoanStore::new(MemoryStore::new());
    assert!(store.profile().unwrap().is_none());

    let profile = make_profile();
    store.save_profile(&profile).unwrap();
    assert_eq!(store.profile().unwrap(), Some(profile));
}

#[test]
fn test_profile_stored_as_json() {
    let mut store = LoanStore::new(MemoryStore::new());
    store.save_profile(&make_profile()).unwrap();

    let raw = store.into_inner().load(PROFILE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["name"], "Meena");
    assert_eq!(json["occupation"], "farmer");
}

#[test]
fn test_corrupt_value_is_an_error() {
    let mut inner = MemoryStore::new();
    inner.save(PROFILE_KEY, "{not json").unwrap();
    let store = LoanStore::new(inner);

    let err = store.profile().unwrap_err();
    assert!(format!("{err:#}").contains("loan_profile"));
}

#[test]
fn test_progress_roundtrip() {
    let mut store = LoanStore::new(MemoryStore::new());
    store
        .save_progress("loan-selected", Some(serde_json::json!({ "tenure": 6 })))
        .unwrap();

    let progress = store.progress().unwrap().unwrap();
    assert_eq!(progress.current_step, "loan-selected");
    assert_eq!(progress.data.unwrap()["tenure"], 6);
    assert!(progress.timestamp > 0);
}

#[test]
fn test_progress_overwrites_previous_step() {
    let mut store = LoanStore::new(MemoryStore::new());
    store.save_progress("consent-given", None).unwrap();
    store.save_progress("profile-complete", None).unwrap();
    assert_eq!(
        store.progress().unwrap().unwrap().current_step,
        "profile-complete"
    );
}

#[test]
fn test_application_roundtrip_stamps_time() {
    let mut store = LoanStore::new(SqliteStore::open_in_memory().unwrap());
    let mut application = LoanApplication::new(make_profile());
    application.status = ApplicationStatus::Processing;
    application.bank_sms = Some("Credited INR 100".into());
    application.timestamp = 0;

    store.save_application(&application).unwrap();
    let loaded = store.application().unwrap().unwrap();
    assert_eq!(loaded.status, ApplicationStatus::Processing);
    assert_eq!(loaded.application_id, application.application_id);
    assert_eq!(loaded.bank_sms.as_deref(), Some("Credited INR 100"));
    assert!(loaded.timestamp > 0);
}

#[test]
fn test_clear_all_keeps_language() {
    let mut store = LoanStore::new(MemoryStore::new());
    store.save_profile(&make_profile()).unwrap();
    store.save_bank_sms("Credited INR 100").unwrap();
    store.save_progress("documents-sms", None).unwrap();
    store
        .save_application(&LoanApplication::new(make_profile()))
        .unwrap();
    store.save_language("ta").unwrap();

    store.clear_all().unwrap();

    assert!(store.profile().unwrap().is_none());
    assert!(store.bank_sms().unwrap().is_none());
    assert!(store.progress().unwrap().is_none());
    assert!(store.application().unwrap().is_none());
    assert_eq!(store.language().unwrap().as_deref(), Some("ta"));
    assert_eq!(store.into_inner().len(), 1);
}
