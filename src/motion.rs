use std::collections::BTreeMap;

use crate::ease::Ease;
use crate::model::{AnimationKind, AnimationPattern, Element, ElementKind};

/// A house motion style: default timing plus one entrance pattern for text
/// and one for visual elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionStyle {
    Cinematic,
    Tech,
    Corporate,
    Creative,
    Social,
    Minimal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StylePreset {
    pub default_duration_s: f64,
    pub default_easing: Ease,
    /// `[text_entrance, visual_entrance]`.
    pub patterns: [AnimationPattern; 2],
}

fn pattern(
    name: &str,
    kind: AnimationKind,
    duration_s: f64,
    easing: Ease,
    props: &[(&str, serde_json::Value)],
) -> AnimationPattern {
    AnimationPattern {
        name: name.to_string(),
        kind,
        duration_s,
        delay_s: 0.0,
        easing,
        properties: props
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    }
}

impl MotionStyle {
    pub const ALL: [Self; 6] = [
        Self::Cinematic,
        Self::Tech,
        Self::Corporate,
        Self::Creative,
        Self::Social,
        Self::Minimal,
    ];

    pub fn preset(self) -> StylePreset {
        use serde_json::json;
        match self {
            Self::Cinematic => StylePreset {
                default_duration_s: 1.2,
                default_easing: Ease::InOut,
                patterns: [
                    pattern(
                        "cinematic-text-reveal",
                        AnimationKind::Fade,
                        1.2,
                        Ease::InOut,
                        &[("from_opacity", json!(0.0)), ("letter_stagger_s", json!(0.04))],
                    ),
                    pattern(
                        "cinematic-drift-in",
                        AnimationKind::Slide,
                        1.4,
                        Ease::Out,
                        &[("from_x_pct", json!(-6.0)), ("from_opacity", json!(0.0))],
                    ),
                ],
            },
            Self::Tech => StylePreset {
                default_duration_s: 0.5,
                default_easing: Ease::Out,
                patterns: [
                    pattern(
                        "tech-type-on",
                        AnimationKind::Custom,
                        0.5,
                        Ease::Linear,
                        &[("cursor", json!(true))],
                    ),
                    pattern(
                        "tech-snap-scale",
                        AnimationKind::Scale,
                        0.4,
                        Ease::Out,
                        &[("from_scale", json!(0.92))],
                    ),
                ],
            },
            Self::Corporate => StylePreset {
                default_duration_s: 0.8,
                default_easing: Ease::InOut,
                patterns: [
                    pattern(
                        "corporate-fade-up",
                        AnimationKind::Fade,
                        0.8,
                        Ease::InOut,
                        &[("from_y_pct", json!(4.0)), ("from_opacity", json!(0.0))],
                    ),
                    pattern(
                        "corporate-slide-in",
                        AnimationKind::Slide,
                        0.8,
                        Ease::InOut,
                        &[("from_x_pct", json!(8.0))],
                    ),
                ],
            },
            Self::Creative => StylePreset {
                default_duration_s: 0.9,
                default_easing: Ease::Spring,
                patterns: [
                    pattern(
                        "creative-bounce-in",
                        AnimationKind::Scale,
                        0.9,
                        Ease::Spring,
                        &[("from_scale", json!(0.6)), ("from_opacity", json!(0.0))],
                    ),
                    pattern(
                        "creative-spin-up",
                        AnimationKind::Rotate,
                        1.0,
                        Ease::Spring,
                        &[("from_rotation_deg", json!(-12.0)), ("from_scale", json!(0.8))],
                    ),
                ],
            },
            Self::Social => StylePreset {
                default_duration_s: 0.35,
                default_easing: Ease::Out,
                patterns: [
                    pattern(
                        "social-pop-text",
                        AnimationKind::Scale,
                        0.35,
                        Ease::Spring,
                        &[("from_scale", json!(0.5))],
                    ),
                    pattern(
                        "social-whip-in",
                        AnimationKind::Slide,
                        0.3,
                        Ease::Out,
                        &[("from_x_pct", json!(-15.0))],
                    ),
                ],
            },
            Self::Minimal => StylePreset {
                default_duration_s: 0.6,
                default_easing: Ease::InOut,
                patterns: [
                    pattern(
                        "minimal-fade",
                        AnimationKind::Fade,
                        0.6,
                        Ease::InOut,
                        &[("from_opacity", json!(0.0))],
                    ),
                    pattern(
                        "minimal-fade-soft",
                        AnimationKind::Fade,
                        0.8,
                        Ease::InOut,
                        &[("from_opacity", json!(0.0)), ("from_scale", json!(0.98))],
                    ),
                ],
            },
        }
    }
}

/// Entrance for an element: text elements take the text pattern, everything
/// else the visual pattern. Custom elements fall back to the text pattern.
pub fn entrance_for(element: &Element, style: MotionStyle) -> AnimationPattern {
    let preset = style.preset();
    let [text, visual] = preset.patterns;
    match element.kind {
        ElementKind::Text | ElementKind::Custom => text,
        ElementKind::Shape | ElementKind::Image | ElementKind::Video => visual,
    }
}

/// Exit is the entrance played backwards: `from_*` properties become `to_*`
/// and vice versa, and `-exit` is appended to the name.
pub fn exit_for(element: &Element, style: MotionStyle) -> AnimationPattern {
    let mut anim = entrance_for(element, style);
    anim.name.push_str("-exit");
    anim.properties = anim
        .properties
        .into_iter()
        .map(|(k, v)| {
            let flipped = if let Some(rest) = k.strip_prefix("from_") {
                format!("to_{rest}")
            } else if let Some(rest) = k.strip_prefix("to_") {
                format!("from_{rest}")
            } else {
                k
            };
            (flipped, v)
        })
        .collect::<BTreeMap<_, _>>();
    anim
}

/// How a group of entrances is spread over time. Delay adjustments are
/// applied in element order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choreography {
    Sequential,
    Parallel,
    Staggered,
    Wave,
}

const STAGGER_STEP_S: f64 = 0.1;
const WAVE_STEP_S: f64 = 0.08;

impl Choreography {
    pub fn apply(self, animations: &mut [AnimationPattern]) {
        match self {
            Self::Parallel => {}
            Self::Sequential => {
                let mut at = 0.0;
                for anim in animations.iter_mut() {
                    anim.delay_s = at;
                    at += anim.duration_s;
                }
            }
            Self::Staggered => {
                for (i, anim) in animations.iter_mut().enumerate() {
                    anim.delay_s += i as f64 * STAGGER_STEP_S;
                }
            }
            Self::Wave => {
                let mid = animations.len() / 2;
                for (i, anim) in animations.iter_mut().enumerate() {
                    anim.delay_s += (i as f64 - mid as f64).abs() * WAVE_STEP_S;
                }
            }
        }
    }
}
