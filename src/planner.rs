use crate::ease::Ease;
use crate::model::{
    AnimationKind, AnimationPattern, Scene, Transition, TransitionKind, VideoPlan,
};

/// Narrative position of a scene, keyed off where its midpoint lands in the
/// plan. Boundaries: hook < 0.15, setup < 0.25, build < 0.70, climax < 0.85.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcPhase {
    Hook,
    Setup,
    Build,
    Climax,
    Resolution,
}

impl ArcPhase {
    pub fn for_scene(scene: &Scene, plan_duration_s: f64) -> Self {
        let midpoint = scene.start_time_s + scene.duration_s / 2.0;
        Self::at_fraction(midpoint / plan_duration_s.max(f64::MIN_POSITIVE))
    }

    pub fn at_fraction(fraction: f64) -> Self {
        if fraction < 0.15 {
            Self::Hook
        } else if fraction < 0.25 {
            Self::Setup
        } else if fraction < 0.70 {
            Self::Build
        } else if fraction < 0.85 {
            Self::Climax
        } else {
            Self::Resolution
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rhythm {
    Fast,
    Moderate,
    Slow,
    Variable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacingProfile {
    pub avg_scene_s: f64,
    pub transition_s: f64,
    pub rhythm: Rhythm,
    pub energy: Energy,
}

/// What the video is about; drives the pacing profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Product,
    Saas,
    Lifestyle,
    Tech,
    Corporate,
    Social,
    Cinematic,
}

impl ContentType {
    pub fn pacing(self) -> PacingProfile {
        match self {
            Self::Product => PacingProfile {
                avg_scene_s: 3.0,
                transition_s: 0.4,
                rhythm: Rhythm::Fast,
                energy: Energy::High,
            },
            Self::Saas => PacingProfile {
                avg_scene_s: 3.5,
                transition_s: 0.5,
                rhythm: Rhythm::Moderate,
                energy: Energy::Medium,
            },
            Self::Lifestyle => PacingProfile {
                avg_scene_s: 4.0,
                transition_s: 0.6,
                rhythm: Rhythm::Slow,
                energy: Energy::Medium,
            },
            Self::Tech => PacingProfile {
                avg_scene_s: 2.5,
                transition_s: 0.3,
                rhythm: Rhythm::Fast,
                energy: Energy::High,
            },
            Self::Corporate => PacingProfile {
                avg_scene_s: 4.5,
                transition_s: 0.5,
                rhythm: Rhythm::Slow,
                energy: Energy::Low,
            },
            Self::Social => PacingProfile {
                avg_scene_s: 2.0,
                transition_s: 0.25,
                rhythm: Rhythm::Variable,
                energy: Energy::High,
            },
            Self::Cinematic => PacingProfile {
                avg_scene_s: 5.0,
                transition_s: 0.7,
                rhythm: Rhythm::Variable,
                energy: Energy::Medium,
            },
        }
    }

    /// Keyword sniff over scene descriptions. Matches whole words only, so
    /// "ai" never fires on "captain". First match in table order wins; no
    /// match defaults to `Product`.
    pub fn infer(plan: &VideoPlan) -> Self {
        const KEYWORDS: [(ContentType, &[&str]); 6] = [
            (ContentType::Saas, &["dashboard", "saas", "workflow", "platform"]),
            (ContentType::Tech, &["api", "code", "developer", "terminal", "ai"]),
            (ContentType::Lifestyle, &["travel", "food", "fitness", "lifestyle"]),
            (ContentType::Corporate, &["enterprise", "company", "corporate", "report"]),
            (ContentType::Social, &["tiktok", "reel", "shorts", "viral"]),
            (ContentType::Cinematic, &["cinematic", "film", "trailer", "story"]),
        ];
        let haystack = plan
            .scenes
            .iter()
            .map(|s| s.description.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        let words: Vec<&str> = haystack
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        for (content_type, keywords) in KEYWORDS {
            if keywords.iter().any(|k| words.contains(k)) {
                return content_type;
            }
        }
        Self::Product
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PlannerOptions {
    pub content_type: Option<ContentType>,
    pub assign_perspectives: bool,
    pub emphasize_hook: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            content_type: None,
            assign_perspectives: true,
            emphasize_hook: true,
        }
    }
}

/// Camera perspective per scene, stored as a style hint on each element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Dramatic,
    CloseUp,
    Wide,
    Aerial,
    Tracking,
    Inside,
    FirstPerson,
    Default,
}

impl Perspective {
    fn as_str(self) -> &'static str {
        match self {
            Self::Dramatic => "dramatic",
            Self::CloseUp => "close_up",
            Self::Wide => "wide",
            Self::Aerial => "aerial",
            Self::Tracking => "tracking",
            Self::Inside => "inside",
            Self::FirstPerson => "first_person",
            Self::Default => "default",
        }
    }
}

const MIN_SCENE_S: f64 = 1.0;
const HOOK_WINDOW_FRACTION: f64 = 0.15;
const HOOK_MAX_ANIM_S: f64 = 0.4;
const MAX_SCENE_ELEMENTS: usize = 6;
const EDGE_NUDGE_PCT: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityBucket {
    Sparse,
    Balanced,
    Dense,
    Overcrowded,
}

impl DensityBucket {
    pub fn for_count(elements: usize) -> Self {
        match elements {
            0..=2 => Self::Sparse,
            3..=5 => Self::Balanced,
            6..=8 => Self::Dense,
            _ => Self::Overcrowded,
        }
    }
}

/// Horizontal weight and density of one scene. Left is `x < 45`, right is
/// `x > 55`, everything between counts as center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositionAnalysis {
    pub left: usize,
    pub center: usize,
    pub right: usize,
    pub density: DensityBucket,
}

impl CompositionAnalysis {
    pub fn of(scene: &Scene) -> Self {
        let left = scene.elements.iter().filter(|e| e.position.x < 45.0).count();
        let right = scene.elements.iter().filter(|e| e.position.x > 55.0).count();
        Self {
            left,
            center: scene.elements.len() - left - right,
            right,
            density: DensityBucket::for_count(scene.elements.len()),
        }
    }

    pub fn imbalanced(&self) -> bool {
        self.left.abs_diff(self.right) >= 2
    }
}

/// Rewrites scene timing, transitions, perspectives and composition in a
/// fixed pass order so the result is a pure function of the input plan.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScenePlanner {
    pub options: PlannerOptions,
}

impl ScenePlanner {
    pub fn new(options: PlannerOptions) -> Self {
        Self { options }
    }

    pub fn plan(&self, plan: &mut VideoPlan) -> ContentType {
        let content_type = self
            .options
            .content_type
            .unwrap_or_else(|| ContentType::infer(plan));
        self.apply_pacing(plan, content_type);
        if self.options.assign_perspectives {
            self.assign_perspectives(plan);
        }
        self.choreograph_transitions(plan);
        self.rebalance_composition(plan);
        if self.options.emphasize_hook {
            self.emphasize_hook(plan);
        }
        content_type
    }

    /// Retimes every scene from the pacing profile, then stretches or clamps
    /// the last scene so the timeline fills the plan duration exactly.
    fn apply_pacing(&self, plan: &mut VideoPlan, content_type: ContentType) {
        let pacing = content_type.pacing();
        for (i, scene) in plan.scenes.iter_mut().enumerate() {
            let target = match pacing.rhythm {
                Rhythm::Fast => scene.duration_s * 0.8,
                Rhythm::Moderate => scene.duration_s,
                Rhythm::Slow => scene.duration_s * 1.2,
                Rhythm::Variable => {
                    if i % 2 == 0 {
                        pacing.avg_scene_s * 1.3
                    } else {
                        pacing.avg_scene_s * 0.7
                    }
                }
            };
            scene.duration_s = target.max(MIN_SCENE_S);
        }
        let total = plan.restamp();
        if let Some(last) = plan.scenes.last_mut() {
            let adjusted = last.duration_s + (plan.duration_s - total);
            last.duration_s = adjusted.max(MIN_SCENE_S);
        }
        // If the clamp above hit the floor the original duration is no
        // longer reachable; the timeline wins.
        plan.duration_s = plan.restamp();
    }

    fn assign_perspectives(&self, plan: &mut VideoPlan) {
        const BUILD_ROTATION: [Perspective; 4] = [
            Perspective::Wide,
            Perspective::Aerial,
            Perspective::Tracking,
            Perspective::Dramatic,
        ];
        let duration = plan.duration_s;
        let mut hook_count = 0usize;
        let mut build_count = 0usize;
        let mut climax_count = 0usize;
        for scene in &mut plan.scenes {
            let perspective = match ArcPhase::for_scene(scene, duration) {
                ArcPhase::Hook => {
                    hook_count += 1;
                    if hook_count % 2 == 1 {
                        Perspective::Dramatic
                    } else {
                        Perspective::CloseUp
                    }
                }
                ArcPhase::Setup => Perspective::Wide,
                ArcPhase::Build => {
                    let p = BUILD_ROTATION[build_count % BUILD_ROTATION.len()];
                    build_count += 1;
                    p
                }
                ArcPhase::Climax => {
                    climax_count += 1;
                    if climax_count % 2 == 1 {
                        Perspective::Inside
                    } else {
                        Perspective::FirstPerson
                    }
                }
                ArcPhase::Resolution => Perspective::Default,
            };
            for element in &mut scene.elements {
                element
                    .style
                    .insert("perspective".to_string(), perspective.as_str().to_string());
            }
        }
    }

    /// Transitions are set on every scene but the last, by the phase of the
    /// outgoing scene.
    fn choreograph_transitions(&self, plan: &mut VideoPlan) {
        const BUILD_ROTATION: [TransitionKind; 4] = [
            TransitionKind::Slide,
            TransitionKind::Wipe,
            TransitionKind::Zoom,
            TransitionKind::Fade,
        ];
        const CLIMAX_ALTERNATION: [TransitionKind; 2] =
            [TransitionKind::Zoom, TransitionKind::Wipe];
        let duration = plan.duration_s;
        let count = plan.scenes.len();
        let mut build_count = 0usize;
        let mut climax_count = 0usize;
        for scene in plan.scenes.iter_mut().take(count.saturating_sub(1)) {
            let (kind, transition_s) = match ArcPhase::for_scene(scene, duration) {
                ArcPhase::Hook => (TransitionKind::Cut, 0.2),
                ArcPhase::Setup => (TransitionKind::Fade, 0.5),
                ArcPhase::Build => {
                    let k = BUILD_ROTATION[build_count % BUILD_ROTATION.len()];
                    build_count += 1;
                    (k, 0.4)
                }
                ArcPhase::Climax => {
                    let k = CLIMAX_ALTERNATION[climax_count % CLIMAX_ALTERNATION.len()];
                    climax_count += 1;
                    (k, 0.6)
                }
                ArcPhase::Resolution => (TransitionKind::Fade, 0.7),
            };
            scene.transition = Some(Transition {
                kind,
                duration_s: transition_s,
            });
        }
    }

    /// Trims overcrowded scenes to the six highest-z elements (keeping their
    /// original order) and nudges a lopsided left/right split toward center.
    fn rebalance_composition(&self, plan: &mut VideoPlan) {
        for scene in &mut plan.scenes {
            if CompositionAnalysis::of(scene).density == DensityBucket::Overcrowded {
                let mut by_z: Vec<usize> = (0..scene.elements.len()).collect();
                by_z.sort_by(|&a, &b| {
                    scene.elements[b]
                        .position
                        .z
                        .total_cmp(&scene.elements[a].position.z)
                });
                let mut keep = vec![false; scene.elements.len()];
                for &i in by_z.iter().take(MAX_SCENE_ELEMENTS) {
                    keep[i] = true;
                }
                let mut idx = 0;
                scene.elements.retain(|_| {
                    let kept = keep[idx];
                    idx += 1;
                    kept
                });
            }

            // Re-analyze after the trim; the surviving set decides balance.
            let analysis = CompositionAnalysis::of(scene);
            if analysis.imbalanced() {
                let heavy_left = analysis.left > analysis.right;
                for element in &mut scene.elements {
                    let x = element.position.x;
                    if heavy_left && x < 45.0 {
                        element.position.x = (x + EDGE_NUDGE_PCT).min(50.0);
                    } else if !heavy_left && x > 55.0 {
                        element.position.x = (x - EDGE_NUDGE_PCT).max(50.0);
                    }
                }
            }
        }
    }

    /// Scenes that end inside the first 15% get punchier animations: spring
    /// easing, durations capped short, and a zoom-in for bare elements.
    fn emphasize_hook(&self, plan: &mut VideoPlan) {
        let window = plan.duration_s * HOOK_WINDOW_FRACTION;
        for scene in &mut plan.scenes {
            if scene.start_time_s + scene.duration_s > window {
                continue;
            }
            for (i, element) in scene.elements.iter_mut().enumerate() {
                match &mut element.animation {
                    Some(anim) => {
                        anim.duration_s = anim.duration_s.min(HOOK_MAX_ANIM_S);
                        anim.easing = Ease::Spring;
                    }
                    None => {
                        let mut properties = std::collections::BTreeMap::new();
                        properties.insert("from_scale".to_string(), serde_json::json!(0.8));
                        properties.insert("to_scale".to_string(), serde_json::json!(1.0));
                        element.animation = Some(AnimationPattern {
                            name: "hook-zoom-in".to_string(),
                            kind: AnimationKind::Scale,
                            duration_s: HOOK_MAX_ANIM_S,
                            delay_s: i as f64 * 0.1,
                            easing: Ease::Spring,
                            properties,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, ElementKind, Position, Resolution, Size, StyleGuide};
    use std::collections::BTreeMap;

    fn element(id: &str, x: f64, z: f64) -> Element {
        Element {
            id: id.to_string(),
            kind: ElementKind::Shape,
            position: Position { x, y: 50.0, z },
            size: Size { width: 10.0, height: 10.0 },
            style: BTreeMap::new(),
            animation: None,
        }
    }

    fn plan_with(scene_durations: &[f64]) -> VideoPlan {
        let mut start = 0.0;
        let scenes = scene_durations
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let scene = Scene {
                    id: format!("s{i}"),
                    start_time_s: start,
                    duration_s: d,
                    description: String::new(),
                    elements: vec![element("a", 30.0, 1.0)],
                    transition: None,
                    animations: Vec::new(),
                };
                start += d;
                scene
            })
            .collect();
        VideoPlan {
            duration_s: start,
            fps: 30.0,
            resolution: Resolution { width: 1920, height: 1080 },
            aspect_ratio: "16:9".to_string(),
            scenes,
            style: StyleGuide::default(),
        }
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(ArcPhase::at_fraction(0.0), ArcPhase::Hook);
        assert_eq!(ArcPhase::at_fraction(0.149), ArcPhase::Hook);
        assert_eq!(ArcPhase::at_fraction(0.15), ArcPhase::Setup);
        assert_eq!(ArcPhase::at_fraction(0.25), ArcPhase::Build);
        assert_eq!(ArcPhase::at_fraction(0.699), ArcPhase::Build);
        assert_eq!(ArcPhase::at_fraction(0.70), ArcPhase::Climax);
        assert_eq!(ArcPhase::at_fraction(0.85), ArcPhase::Resolution);
    }

    #[test]
    fn infer_matches_keywords_and_defaults_to_product() {
        let mut plan = plan_with(&[2.0]);
        assert_eq!(ContentType::infer(&plan), ContentType::Product);
        plan.scenes[0].description = "Dashboard onboarding for the platform".to_string();
        assert_eq!(ContentType::infer(&plan), ContentType::Saas);
    }

    #[test]
    fn infer_matches_whole_words_only() {
        let mut plan = plan_with(&[2.0]);
        // "captain" and "aircraft" must not fire the "ai" keyword.
        plan.scenes[0].description = "The captain boards the aircraft".to_string();
        assert_eq!(ContentType::infer(&plan), ContentType::Product);
        plan.scenes[0].description = "An AI assistant demo".to_string();
        assert_eq!(ContentType::infer(&plan), ContentType::Tech);
    }

    #[test]
    fn composition_analysis_counts_sides_and_density() {
        let mut plan = plan_with(&[3.0]);
        plan.scenes[0].elements = vec![
            element("l1", 10.0, 1.0),
            element("l2", 44.0, 1.0),
            element("c", 50.0, 1.0),
            element("r", 70.0, 1.0),
        ];
        let analysis = CompositionAnalysis::of(&plan.scenes[0]);
        assert_eq!(analysis.left, 2);
        assert_eq!(analysis.center, 1);
        assert_eq!(analysis.right, 1);
        assert_eq!(analysis.density, DensityBucket::Balanced);
        assert!(!analysis.imbalanced());
    }

    #[test]
    fn density_bucket_boundaries() {
        assert_eq!(DensityBucket::for_count(0), DensityBucket::Sparse);
        assert_eq!(DensityBucket::for_count(2), DensityBucket::Sparse);
        assert_eq!(DensityBucket::for_count(3), DensityBucket::Balanced);
        assert_eq!(DensityBucket::for_count(5), DensityBucket::Balanced);
        assert_eq!(DensityBucket::for_count(8), DensityBucket::Dense);
        assert_eq!(DensityBucket::for_count(9), DensityBucket::Overcrowded);
    }

    #[test]
    fn pacing_preserves_total_duration_and_contiguity() {
        let mut plan = plan_with(&[3.0, 3.0, 3.0, 3.0]);
        let total = plan.duration_s;
        ScenePlanner::default().plan(&mut plan);
        assert!(plan.validate().is_ok());
        assert!((plan.scenes.iter().map(|s| s.duration_s).sum::<f64>() - total).abs() < 1e-6);
    }

    #[test]
    fn variable_rhythm_alternates_long_short() {
        let mut plan = plan_with(&[3.0, 3.0, 3.0, 3.0, 3.0, 3.0]);
        plan.scenes[0].description = "cinematic trailer".to_string();
        let planner = ScenePlanner::new(PlannerOptions {
            assign_perspectives: false,
            emphasize_hook: false,
            ..PlannerOptions::default()
        });
        planner.plan(&mut plan);
        // Cinematic avg 5.0: even scenes 6.5s, odd 3.5s (last absorbs slack).
        assert!((plan.scenes[0].duration_s - 6.5).abs() < 1e-9);
        assert!((plan.scenes[1].duration_s - 3.5).abs() < 1e-9);
        assert!((plan.scenes[2].duration_s - 6.5).abs() < 1e-9);
    }

    #[test]
    fn transitions_set_on_all_but_last_scene() {
        let mut plan = plan_with(&[2.0; 5]);
        ScenePlanner::default().plan(&mut plan);
        let n = plan.scenes.len();
        for scene in &plan.scenes[..n - 1] {
            assert!(scene.transition.is_some());
        }
        assert!(plan.scenes[n - 1].transition.is_none());
    }

    #[test]
    fn hook_scene_gets_cut_transition() {
        let mut plan = plan_with(&[1.0, 4.0, 4.0, 4.0, 4.0]);
        let planner = ScenePlanner::new(PlannerOptions {
            content_type: Some(ContentType::Saas),
            ..PlannerOptions::default()
        });
        planner.plan(&mut plan);
        assert_eq!(plan.scenes[0].transition.as_ref().unwrap().kind, TransitionKind::Cut);
    }

    #[test]
    fn overcrowded_scene_trimmed_to_six_by_depth() {
        let mut plan = plan_with(&[3.0]);
        plan.scenes[0].elements = (0..10)
            .map(|i| element(&format!("e{i}"), 50.0, i as f64))
            .collect();
        ScenePlanner::default().plan(&mut plan);
        let ids: Vec<&str> = plan.scenes[0].elements.iter().map(|e| e.id.as_str()).collect();
        // Highest-z six survive, original order preserved.
        assert_eq!(ids, vec!["e4", "e5", "e6", "e7", "e8", "e9"]);
    }

    #[test]
    fn lopsided_scene_nudged_toward_center() {
        let mut plan = plan_with(&[3.0]);
        plan.scenes[0].elements = vec![
            element("l1", 20.0, 1.0),
            element("l2", 30.0, 1.0),
            element("l3", 48.0, 1.0),
        ];
        let planner = ScenePlanner::new(PlannerOptions {
            emphasize_hook: false,
            assign_perspectives: false,
            ..PlannerOptions::default()
        });
        planner.plan(&mut plan);
        assert!((plan.scenes[0].elements[0].position.x - 25.0).abs() < 1e-9);
        assert!((plan.scenes[0].elements[1].position.x - 35.0).abs() < 1e-9);
        // Center element untouched.
        assert!((plan.scenes[0].elements[2].position.x - 48.0).abs() < 1e-9);
    }

    #[test]
    fn hook_elements_get_spring_entrances() {
        let mut plan = plan_with(&[1.0, 9.0, 9.0]);
        let planner = ScenePlanner::new(PlannerOptions {
            content_type: Some(ContentType::Saas),
            assign_perspectives: false,
            ..PlannerOptions::default()
        });
        planner.plan(&mut plan);
        let anim = plan.scenes[0].elements[0].animation.as_ref().unwrap();
        assert_eq!(anim.name, "hook-zoom-in");
        assert_eq!(anim.easing, Ease::Spring);
        assert!(anim.duration_s <= 0.4);
    }

    #[test]
    fn perspectives_written_to_element_style() {
        let mut plan = plan_with(&[2.0; 10]);
        ScenePlanner::default().plan(&mut plan);
        for scene in &plan.scenes {
            for e in &scene.elements {
                assert!(e.style.contains_key("perspective"));
            }
        }
        // Resolution scenes use the default perspective.
        let last = plan.scenes.last().unwrap();
        assert_eq!(last.elements[0].style["perspective"], "default");
    }
}
