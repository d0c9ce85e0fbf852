use std::collections::BTreeMap;

use crate::math::{contrast_ratio, parse_rgb};
use crate::model::{Element, Scene, Transition, TransitionKind, VideoPlan};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl QualityIssue {
    fn plan(severity: Severity, category: &str, message: String) -> Self {
        Self {
            severity,
            category: category.to_string(),
            message,
            scene_id: None,
            element_id: None,
        }
    }

    fn scene(severity: Severity, category: &str, message: String, scene_id: &str) -> Self {
        Self {
            scene_id: Some(scene_id.to_string()),
            ..Self::plan(severity, category, message)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBucket {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityBucket {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..50 => Self::Poor,
            50..70 => Self::Fair,
            70..90 => Self::Good,
            _ => Self::Excellent,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct QualityReport {
    pub score: u32,
    pub overall: QualityBucket,
    pub issues: Vec<QualityIssue>,
    pub improvements: Vec<String>,
}

/// Score starts at 100; each critical issue costs 20 points and each warning
/// 10. Info issues are free.
pub fn score_from_issues(issues: &[QualityIssue]) -> u32 {
    let critical = issues.iter().filter(|i| i.severity == Severity::Critical).count() as i64;
    let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count() as i64;
    (100 - 20 * critical - 10 * warnings).max(0) as u32
}

const MIN_CONTRAST: f64 = 4.5;
const BODY_CRITICAL_PX: f64 = 14.0;
const BODY_WARNING_PX: f64 = 16.0;
const DENSE_ELEMENTS: usize = 8;
const DOMINANT_TRANSITION_SHARE: f64 = 0.6;

fn prominence(element: &Element) -> f64 {
    element.size.width * element.size.height * (1.0 - element.position.z / 6.0).max(0.0)
}

/// Static review of a plan: visual hierarchy, color, typography, scene
/// density, transition variety. Purely analytical; `auto_fix` repairs what
/// can be repaired mechanically.
#[derive(Clone, Copy, Debug, Default)]
pub struct QualityEngine;

impl QualityEngine {
    pub fn assess(&self, plan: &VideoPlan) -> QualityReport {
        let mut issues = Vec::new();
        let mut improvements = Vec::new();

        for scene in &plan.scenes {
            self.check_hierarchy(scene, &mut issues);
            self.check_density(scene, &mut issues);
        }
        self.check_color(plan, &mut issues, &mut improvements);
        self.check_typography(plan, &mut issues, &mut improvements);
        self.check_transition_variety(plan, &mut issues, &mut improvements);

        let score = score_from_issues(&issues);
        QualityReport {
            score,
            overall: QualityBucket::from_score(score),
            issues,
            improvements,
        }
    }

    /// A scene with two or more elements should have one primary element
    /// (prominence at least 1.5x the scene mean) and more than one depth
    /// level.
    fn check_hierarchy(&self, scene: &Scene, issues: &mut Vec<QualityIssue>) {
        if scene.elements.len() < 2 {
            return;
        }
        let mean: f64 = scene.elements.iter().map(prominence).sum::<f64>()
            / scene.elements.len() as f64;
        let has_primary = scene.elements.iter().any(|e| prominence(e) >= mean * 1.5);
        if !has_primary {
            issues.push(QualityIssue::scene(
                Severity::Warning,
                "hierarchy",
                "no clearly dominant element; sizes are too uniform".to_string(),
                &scene.id,
            ));
        }
        let mut levels: Vec<i64> = scene
            .elements
            .iter()
            .map(|e| (e.position.z * 1000.0).round() as i64)
            .collect();
        levels.sort_unstable();
        levels.dedup();
        if levels.len() < 2 {
            issues.push(QualityIssue::scene(
                Severity::Info,
                "hierarchy",
                "all elements share one depth level".to_string(),
                &scene.id,
            ));
        }
    }

    fn check_density(&self, scene: &Scene, issues: &mut Vec<QualityIssue>) {
        match scene.elements.len() {
            0 => issues.push(QualityIssue::scene(
                Severity::Critical,
                "density",
                "scene has no elements".to_string(),
                &scene.id,
            )),
            1 => issues.push(QualityIssue::scene(
                Severity::Info,
                "density",
                "single-element scene".to_string(),
                &scene.id,
            )),
            n if n > DENSE_ELEMENTS => issues.push(QualityIssue::scene(
                Severity::Warning,
                "density",
                format!("{n} elements; consider trimming to {DENSE_ELEMENTS} or fewer"),
                &scene.id,
            )),
            _ => {}
        }
    }

    fn check_color(
        &self,
        plan: &VideoPlan,
        issues: &mut Vec<QualityIssue>,
        improvements: &mut Vec<String>,
    ) {
        let palette = &plan.style.color_palette;
        if !(2..=5).contains(&palette.len()) {
            issues.push(QualityIssue::plan(
                Severity::Warning,
                "color",
                format!("palette has {} colors; 2 to 5 works best", palette.len()),
            ));
            improvements.push("restrict the palette to 2-5 colors".to_string());
        }
        let parsed: Vec<[u8; 3]> = palette.iter().filter_map(|c| parse_rgb(c)).collect();
        if parsed.len() >= 2 {
            let mut by_luma = parsed.clone();
            by_luma.sort_by(|a, b| {
                crate::math::relative_luminance(*a).total_cmp(&crate::math::relative_luminance(*b))
            });
            let ratio = contrast_ratio(by_luma[0], by_luma[by_luma.len() - 1]);
            if ratio < MIN_CONTRAST {
                issues.push(QualityIssue::plan(
                    Severity::Critical,
                    "color",
                    format!("palette contrast ratio {ratio:.2} is below {MIN_CONTRAST}"),
                ));
                improvements.push("darken or lighten the palette extremes".to_string());
            }
        }
    }

    fn check_typography(
        &self,
        plan: &VideoPlan,
        issues: &mut Vec<QualityIssue>,
        improvements: &mut Vec<String>,
    ) {
        let t = &plan.style.typography;
        if !(t.h1_px > t.h2_px && t.h2_px > t.body_px) {
            issues.push(QualityIssue::plan(
                Severity::Warning,
                "typography",
                format!(
                    "type scale is not strictly decreasing (h1 {} / h2 {} / body {})",
                    t.h1_px, t.h2_px, t.body_px
                ),
            ));
            improvements.push("use a strictly decreasing h1 > h2 > body scale".to_string());
        }
        if t.body_px < BODY_CRITICAL_PX {
            issues.push(QualityIssue::plan(
                Severity::Critical,
                "typography",
                format!("body text {}px is unreadable on video", t.body_px),
            ));
        } else if t.body_px < BODY_WARNING_PX {
            issues.push(QualityIssue::plan(
                Severity::Warning,
                "typography",
                format!("body text {}px is below the {BODY_WARNING_PX}px floor", t.body_px),
            ));
        }
    }

    fn check_transition_variety(
        &self,
        plan: &VideoPlan,
        issues: &mut Vec<QualityIssue>,
        improvements: &mut Vec<String>,
    ) {
        let mut counts: BTreeMap<TransitionKind, usize> = BTreeMap::new();
        let mut total = 0usize;
        for scene in &plan.scenes {
            if let Some(t) = &scene.transition {
                *counts.entry(t.kind).or_insert(0) += 1;
                total += 1;
            }
        }
        if total < 2 {
            return;
        }
        for (kind, count) in counts {
            if count as f64 / total as f64 > DOMINANT_TRANSITION_SHARE {
                issues.push(QualityIssue::plan(
                    Severity::Warning,
                    "transitions",
                    format!("{kind:?} makes up {count}/{total} transitions"),
                ));
                improvements.push("vary the transition kinds between scenes".to_string());
            }
        }
    }

    /// Mechanical repairs: truncate or pad the palette, rescue unreadable
    /// type, and assign round-robin transitions to scenes lacking one.
    /// Returns the repaired plan and a log line per fix applied.
    pub fn auto_fix(&self, plan: &VideoPlan) -> (VideoPlan, Vec<String>) {
        const FALLBACK_PALETTE: [&str; 2] = ["#1a1a2e", "#f5f5f5"];
        const ROTATION: [TransitionKind; 5] = [
            TransitionKind::Fade,
            TransitionKind::Slide,
            TransitionKind::Wipe,
            TransitionKind::Zoom,
            TransitionKind::Cut,
        ];
        let mut fixed = plan.clone();
        let mut applied = Vec::new();

        if fixed.style.color_palette.len() > 5 {
            fixed.style.color_palette.truncate(5);
            applied.push("truncated palette to 5 colors".to_string());
        }
        if fixed.style.color_palette.len() < 2 {
            for color in FALLBACK_PALETTE {
                if fixed.style.color_palette.len() >= 2 {
                    break;
                }
                fixed.style.color_palette.push(color.to_string());
            }
            applied.push("padded palette with fallback colors".to_string());
        }

        let t = &mut fixed.style.typography;
        if t.body_px < BODY_WARNING_PX {
            t.body_px = BODY_WARNING_PX;
            applied.push(format!("raised body text to {BODY_WARNING_PX}px"));
        }
        if t.h2_px <= t.body_px {
            t.h2_px = t.body_px * 1.5;
            applied.push("rescaled h2 above body".to_string());
        }
        if t.h1_px <= t.h2_px {
            t.h1_px = t.h2_px * 1.4;
            applied.push("rescaled h1 above h2".to_string());
        }

        let count = fixed.scenes.len();
        let mut rotation = 0usize;
        let mut assigned = 0usize;
        for scene in fixed.scenes.iter_mut().take(count.saturating_sub(1)) {
            if scene.transition.is_none() {
                scene.transition = Some(Transition {
                    kind: ROTATION[rotation % ROTATION.len()],
                    duration_s: 0.5,
                });
                rotation += 1;
                assigned += 1;
            }
        }
        if assigned > 0 {
            applied.push(format!("assigned transitions to {assigned} scenes"));
        }

        (fixed, applied)
    }
}
