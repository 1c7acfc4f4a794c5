//! Unit tests for monkeycam-core.

#[test]
fn test_crate_structure() {
    // Smoke test - verifies the module structure compiles
    use crate::{AppState, MonkeycamConfig, TimeSlot, Verdict, View, Warning};

    let config = MonkeycamConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.site.default_slot, TimeSlot::Am9);

    let _state = AppState::new();
    let _view = View::default();
    let _verdict = Verdict::NoMonkeys;
    let _warning = Warning::NoSlotSelected { used: TimeSlot::Am9 };
}
