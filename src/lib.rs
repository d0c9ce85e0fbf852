#![forbid(unsafe_code)]

pub mod camera;
pub mod curve;
pub mod dsl;
pub mod ease;
pub mod error;
pub mod grade;
pub mod math;
pub mod model;
pub mod motion;
pub mod orchestrate;
pub mod parallax;
pub mod planner;
pub mod quality;
pub mod seed;

pub use camera::{CameraPath, CameraShake, CameraState};
pub use curve::{BezierCurve, CurvedPathAnimation, MultiPathOrchestrator};
pub use dsl::{ElementBuilder, SceneBuilder, VideoPlanBuilder};
pub use ease::Ease;
pub use error::{CineplanError, CineplanResult};
pub use grade::{ColorGrade, ColorGrading, Mood};
pub use model::{EnhancedVideoPlan, ProductionGrade, VideoPlan};
pub use motion::{Choreography, MotionStyle};
pub use orchestrate::{Orchestrator, ProductionOptions, ProductionReport};
pub use parallax::{ParallaxConfig, ParallaxLayer};
pub use planner::{ContentType, ScenePlanner};
pub use quality::{QualityEngine, QualityReport};
pub use seed::SeedKey;
