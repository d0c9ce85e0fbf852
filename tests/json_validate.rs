use cineplan::model::{ElementKind, VideoPlan};

const SIMPLE_PLAN: &str = include_str!("data/simple_plan.json");

#[test]
fn fixture_parses_and_validates() {
    let plan: VideoPlan = serde_json::from_str(SIMPLE_PLAN).unwrap();
    plan.validate().unwrap();
    assert_eq!(plan.scenes.len(), 3);
    assert_eq!(plan.total_frames(), 300);
    assert_eq!(plan.scenes[0].elements[0].kind, ElementKind::Text);
}

#[test]
fn roundtrip_preserves_validation() {
    let plan: VideoPlan = serde_json::from_str(SIMPLE_PLAN).unwrap();
    let json = serde_json::to_string(&plan).unwrap();
    let again: VideoPlan = serde_json::from_str(&json).unwrap();
    again.validate().unwrap();
}

#[test]
fn gapped_timeline_rejected() {
    let mut plan: VideoPlan = serde_json::from_str(SIMPLE_PLAN).unwrap();
    plan.scenes[1].start_time_s = 3.0;
    assert!(plan.validate().is_err());
}

#[test]
fn duration_mismatch_rejected() {
    let mut plan: VideoPlan = serde_json::from_str(SIMPLE_PLAN).unwrap();
    plan.duration_s = 12.0;
    assert!(plan.validate().is_err());
}
