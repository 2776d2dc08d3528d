//! Integration tests for facility lookup by name
//!
//! Covers the built-in clinics, the defaults warning, overriding definitions,
//! and the lookup error message.

use clinic_facility::*;
use std::collections::BTreeMap;

fn silent_defaults() -> FacilityRegistry {
    let config = FacilityConfig { use_defaults_silently: true, ..FacilityConfig::default() };
    FacilityRegistry::new(&config).unwrap()
}

fn custom_definitions() -> BTreeMap<String, DefinitionConfig> {
    let mut definitions = BTreeMap::new();
    definitions.insert(
        "weekend-clinic".to_string(),
        DefinitionConfig::new(vec![Weekday::Saturday, Weekday::Sunday], vec![20, 10]),
    );
    definitions.insert(
        "monday-clinic".to_string(),
        DefinitionConfig::new(vec![Weekday::Monday], vec![5]).best_effort(),
    );
    definitions
}

/// The 7-day clinic is open every weekday with 100 slots each
#[test]
fn test_seven_day_clinic_defaults() {
    let registry = silent_defaults();
    let clinic = registry.get_facility("7-day-clinic").unwrap();

    assert_eq!(clinic.days(), &Weekday::ALL);
    for day in Weekday::ALL {
        assert!(clinic.is_open_on(day));
        assert_eq!(clinic.capacity_for(day), Some(100));
    }
    assert!(!clinic.best_effort());
}

/// The 5-day and 3-day clinics match their schedules
#[test]
fn test_other_default_clinics() {
    let registry = silent_defaults();

    let five = registry.get_facility("5-day-clinic").unwrap();
    assert_eq!(five.days(), &Weekday::WORKWEEK);
    assert!(!five.is_open_on(Weekday::Saturday));
    assert!(!five.best_effort());

    let three = registry.get_facility("3-day-clinic").unwrap();
    assert_eq!(three.days(), &[Weekday::Tuesday, Weekday::Wednesday, Weekday::Thursday]);
    assert_eq!(three.slots(), &[100, 100, 100]);
    assert!(three.best_effort());
}

/// Unknown names fail and the message lists every configured facility
#[test]
fn test_unknown_facility_lists_available_names() {
    let registry = silent_defaults();
    let err = registry.get_facility("unknown").unwrap_err();

    assert!(matches!(err, FacilityError::NotFound { .. }));
    let msg = err.to_string();
    assert!(msg.contains("unknown"));
    assert!(msg.contains("7-day-clinic"));
    assert!(msg.contains("5-day-clinic"));
    assert!(msg.contains("3-day-clinic"));
}

/// Custom definitions replace the defaults instead of merging with them
#[test]
fn test_custom_definitions_replace_defaults() {
    let registry =
        FacilityRegistry::new(&FacilityConfig::with_definitions(custom_definitions())).unwrap();

    assert!(!registry.using_defaults());
    assert_eq!(registry.names(), vec!["monday-clinic".to_string(), "weekend-clinic".to_string()]);
    assert!(registry.get_facility("weekend-clinic").is_ok());

    let err = registry.get_facility("7-day-clinic").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("weekend-clinic"));
    assert!(!msg.contains("5-day-clinic"));
}

/// The defaults warning appears only when definitions are absent and not silenced
#[test]
fn test_defaults_advisory() {
    let warned = FacilityRegistry::new(&FacilityConfig::default()).unwrap();
    assert!(warned.advisory().is_some());

    let silenced = silent_defaults();
    assert!(silenced.advisory().is_none());

    let custom =
        FacilityRegistry::new(&FacilityConfig::with_definitions(custom_definitions())).unwrap();
    assert!(custom.advisory().is_none());

    // Silencing has no effect on custom definitions either way
    let custom_silenced = FacilityRegistry::new(&FacilityConfig {
        use_defaults_silently: true,
        ..FacilityConfig::with_definitions(custom_definitions())
    })
    .unwrap();
    assert!(custom_silenced.advisory().is_none());
}

/// An empty definitions mapping falls back to the defaults
#[test]
fn test_empty_definitions_use_defaults() {
    let registry =
        FacilityRegistry::new(&FacilityConfig::with_definitions(BTreeMap::new())).unwrap();

    assert!(registry.using_defaults());
    assert!(registry.advisory().is_some());
    assert_eq!(registry.len(), 3);
}

/// Mismatched slot and day counts are rejected when the registry is built
#[test]
fn test_mismatched_definition_rejected() {
    let mut definitions = custom_definitions();
    definitions.insert(
        "broken".to_string(),
        DefinitionConfig::new(vec![Weekday::Monday, Weekday::Tuesday, Weekday::Friday], vec![1, 2]),
    );

    let err = FacilityRegistry::new(&FacilityConfig::with_definitions(definitions)).unwrap_err();
    assert!(matches!(err, FacilityError::Configuration(_)));
    assert!(err.to_string().contains("broken"));
}

/// Every accepted definition keeps one slot count per open day
#[test]
fn test_slot_count_matches_day_count() {
    let custom =
        FacilityRegistry::new(&FacilityConfig::with_definitions(custom_definitions())).unwrap();

    for registry in [silent_defaults(), custom] {
        for facility in registry.facilities().values() {
            assert_eq!(facility.days().len(), facility.slots().len(), "{}", facility.name());
        }
    }
}

/// Repeated calls to `facilities` return the same definitions
#[test]
fn test_facilities_idempotent() {
    let registry = silent_defaults();

    let first: Vec<(String, FacilityDefinition)> = registry
        .facilities()
        .into_iter()
        .map(|(name, facility)| (name, facility.definition().clone()))
        .collect();
    let second: Vec<(String, FacilityDefinition)> = registry
        .facilities()
        .into_iter()
        .map(|(name, facility)| (name, facility.definition().clone()))
        .collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

/// The registry can be shared across threads
#[test]
fn test_registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FacilityRegistry>();
    assert_send_sync::<Facility>();
}
