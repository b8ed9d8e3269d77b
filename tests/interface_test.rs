// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

mod common;

use common::modular_group;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use todd_coxeter::presentation::PresentationDescription;
use todd_coxeter::{enumerate, EnumerationError, EnumerationOptions, Enumerator, Presentation};

#[test]
fn test_abort_from_another_thread() {
    let flag = Arc::new(AtomicBool::new(false));
    let enumerator = Enumerator::new(&modular_group(), EnumerationOptions::default())
        .unwrap()
        .with_abort_flag(Arc::clone(&flag));
    let worker = thread::spawn(move || enumerator.run());
    thread::sleep(Duration::from_millis(20));
    flag.store(true, Ordering::Relaxed);
    let result = worker.join().unwrap();
    assert_eq!(result.unwrap_err(), EnumerationError::Aborted);
}

#[test]
fn test_presentation_from_json() {
    let json = r#"{
        "generators": [{"name": "a"}, {"name": "b", "inverse": "B"}],
        "relators": ["a^2", "b^3", "(ab)^5"],
        "subgroup": ["b"]
    }"#;
    let description: PresentationDescription = serde_json::from_str(json).unwrap();
    let presentation = Presentation::from_description(&description).unwrap();
    let enumeration = enumerate(&presentation, EnumerationOptions::default()).unwrap();
    assert_eq!(enumeration.index(), 20);

    let table = serde_json::to_value(&enumeration.table).unwrap();
    assert_eq!(table["generators"], serde_json::json!(["a", "b", "B"]));
    assert_eq!(table["rows"].as_array().unwrap().len(), 20);
}

#[test]
fn test_options_from_json() {
    let options = EnumerationOptions::from_strategy_str("hard").unwrap();
    let json = serde_json::to_string(&options).unwrap();
    let parsed: EnumerationOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, options);
}

#[test]
fn test_invalid_strategy_string() {
    assert!(EnumerationOptions::from_strategy_str("no_such_strategy").is_err());
    assert!(EnumerationOptions::from_strategy_str("/hq:z").is_err());
}

#[test]
fn test_invalid_options_are_rejected() {
    let mut options = EnumerationOptions::default();
    options.max_hole_percentage = 101;
    assert!(matches!(
        enumerate(&modular_group(), options),
        Err(EnumerationError::Options(_))
    ));
}
