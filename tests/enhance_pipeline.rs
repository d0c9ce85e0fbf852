use cineplan::model::{ProductionGrade, VideoPlan};
use cineplan::orchestrate::{Orchestrator, ProductionOptions};

const SIMPLE_PLAN: &str = include_str!("data/simple_plan.json");

fn fixture() -> VideoPlan {
    init_tracing();
    serde_json::from_str(SIMPLE_PLAN).unwrap()
}

fn init_tracing() {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    });
}

#[test]
fn full_pipeline_end_to_end() {
    let plan = fixture();
    let (enhanced, report) = Orchestrator::new(ProductionOptions::full_production())
        .produce(&plan, "e2e")
        .unwrap();

    enhanced.plan.validate().unwrap();
    assert_eq!(enhanced.metadata.subsystems.len(), 4);
    assert!(enhanced.camera_path.is_some());
    assert!(enhanced.color_grading.is_some());
    // One motion path and one parallax layer per element.
    assert_eq!(enhanced.character_paths.len(), 5);
    assert_eq!(enhanced.parallax.len(), 5);
    assert!(report.quality_score >= 70);
    assert!(matches!(
        enhanced.metadata.grade,
        ProductionGrade::Professional | ProductionGrade::Cinematic
    ));
}

#[test]
fn enhanced_plan_json_is_deterministic() {
    let plan = fixture();
    let orchestrator = Orchestrator::default();
    let (a, _) = orchestrator.produce(&plan, "stable").unwrap();
    let (b, _) = orchestrator.produce(&plan, "stable").unwrap();
    assert_eq!(
        serde_json::to_string_pretty(&a).unwrap(),
        serde_json::to_string_pretty(&b).unwrap()
    );
}

#[test]
fn enhanced_plan_survives_serde_roundtrip() {
    let plan = fixture();
    let (enhanced, _) = Orchestrator::default().produce(&plan, "roundtrip").unwrap();
    let json = serde_json::to_string(&enhanced).unwrap();
    let back: cineplan::model::EnhancedVideoPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(back.metadata.subsystems, enhanced.metadata.subsystems);
    assert_eq!(back.character_paths.len(), enhanced.character_paths.len());
}

#[test]
fn pipeline_leaves_scene_count_intact_for_sane_plans() {
    let plan = fixture();
    let (enhanced, _) = Orchestrator::default().produce(&plan, "scenes").unwrap();
    assert_eq!(enhanced.plan.scenes.len(), plan.scenes.len());
    // Every non-final scene got a transition from the planner.
    for scene in &enhanced.plan.scenes[..enhanced.plan.scenes.len() - 1] {
        assert!(scene.transition.is_some());
    }
}

#[test]
fn quality_gate_warns_on_unreachable_threshold() {
    let mut plan = fixture();
    plan.style.color_palette = vec![
        "rgb(90,90,90)".to_string(),
        "rgb(105,105,105)".to_string(),
    ];
    let options = ProductionOptions {
        quality_threshold: 100,
        ..ProductionOptions::default()
    };
    let (_, report) = Orchestrator::new(options).produce(&plan, "gate").unwrap();
    assert!(report.warnings.iter().any(|w| w.contains("below threshold")));
}
