use std::collections::BTreeMap;

use crate::{
    camera::CameraPath,
    curve::CurvedPathAnimation,
    ease::Ease,
    error::{CineplanError, CineplanResult},
    grade::ColorGrading,
    parallax::ParallaxConfig,
};

/// Timeline tolerance used when checking scene contiguity.
pub const TIMELINE_EPS: f64 = 1e-6;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VideoPlan {
    pub duration_s: f64,
    pub fps: f64,
    pub resolution: Resolution,
    pub aspect_ratio: String,
    pub scenes: Vec<Scene>,
    pub style: StyleGuide,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StyleGuide {
    pub color_palette: Vec<String>,
    pub typography: Typography,
    pub spacing_px: f64,
    pub border_radius_px: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Typography {
    pub h1_px: f64,
    pub h2_px: f64,
    pub body_px: f64,
    pub font_family: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            h1_px: 48.0,
            h2_px: 32.0,
            body_px: 16.0,
            font_family: "Inter".to_string(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub id: String,
    pub start_time_s: f64,
    pub duration_s: f64,
    #[serde(default)]
    pub description: String,
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    #[serde(default)]
    pub animations: Vec<AnimationPattern>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub position: Position,
    pub size: Size,
    #[serde(default)]
    pub style: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationPattern>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    Shape,
    Image,
    Video,
    Custom,
}

/// x/y are percentages of the frame; z is depth (higher z stacks closer to
/// the camera and drives parallax-layer inference).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration_s: f64,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Cut,
    Fade,
    Slide,
    Wipe,
    Zoom,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationPattern {
    pub name: String,
    pub kind: AnimationKind,
    pub duration_s: f64,
    #[serde(default)]
    pub delay_s: f64,
    #[serde(default)]
    pub easing: Ease,
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    Fade,
    Slide,
    Scale,
    Rotate,
    Custom,
}

impl VideoPlan {
    /// Caller pre-conditions per the input contract: positive duration and
    /// fps, at least one scene, and a contiguous scene timeline whose
    /// durations sum to the plan duration.
    pub fn validate(&self) -> CineplanResult<()> {
        if self.duration_s <= 0.0 {
            return Err(CineplanError::validation("plan duration must be > 0"));
        }
        if self.fps <= 0.0 {
            return Err(CineplanError::validation("fps must be > 0"));
        }
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(CineplanError::validation("resolution must be non-zero"));
        }
        if self.scenes.is_empty() {
            return Err(CineplanError::validation("plan must have at least one scene"));
        }

        let mut cursor = 0.0;
        for scene in &self.scenes {
            if scene.duration_s <= 0.0 {
                return Err(CineplanError::validation(format!(
                    "scene '{}' has non-positive duration",
                    scene.id
                )));
            }
            if (scene.start_time_s - cursor).abs() > TIMELINE_EPS {
                return Err(CineplanError::validation(format!(
                    "scene '{}' starts at {} but the timeline cursor is {}",
                    scene.id, scene.start_time_s, cursor
                )));
            }
            cursor += scene.duration_s;
        }
        if (cursor - self.duration_s).abs() > TIMELINE_EPS {
            return Err(CineplanError::validation(format!(
                "scene durations sum to {cursor} but plan duration is {}",
                self.duration_s
            )));
        }

        Ok(())
    }

    /// Re-derive contiguous `start_time_s` values from scene durations.
    /// Returns the resulting total. Every pass that edits durations calls
    /// this before handing the plan on.
    pub fn restamp(&mut self) -> f64 {
        let mut cursor = 0.0;
        for scene in &mut self.scenes {
            scene.start_time_s = cursor;
            cursor += scene.duration_s;
        }
        cursor
    }

    pub fn total_frames(&self) -> u64 {
        (self.duration_s * self.fps).round().max(1.0) as u64
    }
}

/// The optimized plan plus the optional enrichment subsystems, ready for a
/// frame-by-frame rendering surface.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EnhancedVideoPlan {
    pub plan: VideoPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_path: Option<CameraPath>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub character_paths: BTreeMap<String, CurvedPathAnimation>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parallax: BTreeMap<String, ParallaxConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_grading: Option<ColorGrading>,
    pub metadata: EnrichmentMetadata,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EnrichmentMetadata {
    /// Names of the enrichment subsystems that were applied.
    pub subsystems: Vec<String>,
    pub quality_score: u32,
    pub grade: ProductionGrade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionGrade {
    Basic,
    Enhanced,
    Professional,
    Cinematic,
}

impl EnrichmentMetadata {
    /// Base quality score plus +2 per active subsystem, +5 when all four
    /// enrichment subsystems are active, capped at 100.
    pub fn score(base: u32, subsystems: usize) -> u32 {
        let mut score = base + 2 * subsystems as u32;
        if subsystems >= 4 {
            score += 5;
        }
        score.min(100)
    }

    /// Grade is gated jointly on subsystem count and score.
    pub fn grade(subsystems: usize, score: u32) -> ProductionGrade {
        if subsystems >= 4 && score >= 90 {
            ProductionGrade::Cinematic
        } else if subsystems >= 3 && score >= 80 {
            ProductionGrade::Professional
        } else if subsystems >= 1 && score >= 65 {
            ProductionGrade::Enhanced
        } else {
            ProductionGrade::Basic
        }
    }
}
