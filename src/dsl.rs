//! Builder layer over the plan model. Builders collect fields permissively;
//! all validation happens once in [`VideoPlanBuilder::build`], which also
//! restamps scene start times so callers never supply them by hand.

use std::collections::BTreeMap;

use crate::ease::Ease;
use crate::error::CineplanResult;
use crate::model::{
    AnimationKind, AnimationPattern, Element, ElementKind, Position, Resolution, Scene, Size,
    StyleGuide, Transition, TransitionKind, VideoPlan,
};

#[derive(Clone, Debug)]
pub struct VideoPlanBuilder {
    fps: f64,
    resolution: Resolution,
    aspect_ratio: String,
    scenes: Vec<Scene>,
    style: StyleGuide,
}

impl Default for VideoPlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoPlanBuilder {
    pub fn new() -> Self {
        Self {
            fps: 30.0,
            resolution: Resolution {
                width: 1920,
                height: 1080,
            },
            aspect_ratio: "16:9".to_string(),
            scenes: Vec::new(),
            style: StyleGuide::default(),
        }
    }

    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Resolution { width, height };
        self
    }

    pub fn aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }

    pub fn style(mut self, style: StyleGuide) -> Self {
        self.style = style;
        self
    }

    pub fn palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style.color_palette = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn scene(mut self, scene: SceneBuilder) -> Self {
        self.scenes.push(scene.into_scene());
        self
    }

    /// Stamps scene start times, derives the plan duration from the scenes,
    /// and validates the result.
    pub fn build(self) -> CineplanResult<VideoPlan> {
        let mut plan = VideoPlan {
            duration_s: 0.0,
            fps: self.fps,
            resolution: self.resolution,
            aspect_ratio: self.aspect_ratio,
            scenes: self.scenes,
            style: self.style,
        };
        plan.duration_s = plan.restamp();
        plan.validate()?;
        Ok(plan)
    }
}

#[derive(Clone, Debug)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn new(id: impl Into<String>, duration_s: f64) -> Self {
        Self {
            scene: Scene {
                id: id.into(),
                start_time_s: 0.0,
                duration_s,
                description: String::new(),
                elements: Vec::new(),
                transition: None,
                animations: Vec::new(),
            },
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.scene.description = description.into();
        self
    }

    pub fn element(mut self, element: ElementBuilder) -> Self {
        self.scene.elements.push(element.into_element());
        self
    }

    pub fn transition(mut self, kind: TransitionKind, duration_s: f64) -> Self {
        self.scene.transition = Some(Transition { kind, duration_s });
        self
    }

    pub fn animation(mut self, animation: AnimationPattern) -> Self {
        self.scene.animations.push(animation);
        self
    }

    fn into_scene(self) -> Scene {
        self.scene
    }
}

#[derive(Clone, Debug)]
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            element: Element {
                id: id.into(),
                kind,
                position: Position {
                    x: 50.0,
                    y: 50.0,
                    z: 0.0,
                },
                size: Size {
                    width: 10.0,
                    height: 10.0,
                },
                style: BTreeMap::new(),
                animation: None,
            },
        }
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Text)
    }

    pub fn shape(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Shape)
    }

    pub fn image(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Image)
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.element.position.x = x;
        self.element.position.y = y;
        self
    }

    pub fn depth(mut self, z: f64) -> Self {
        self.element.position.z = z;
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.element.size = Size { width, height };
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.element.style.insert(key.into(), value.into());
        self
    }

    pub fn animate(
        mut self,
        name: impl Into<String>,
        kind: AnimationKind,
        duration_s: f64,
        easing: Ease,
    ) -> Self {
        self.element.animation = Some(AnimationPattern {
            name: name.into(),
            kind,
            duration_s,
            delay_s: 0.0,
            easing,
            properties: BTreeMap::new(),
        });
        self
    }

    fn into_element(self) -> Element {
        self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_contiguous_validated_plan() {
        let plan = VideoPlanBuilder::new()
            .fps(24.0)
            .palette(["#1a1a2e", "#f5f5f5"])
            .scene(
                SceneBuilder::new("intro", 3.0)
                    .describe("Opening")
                    .element(ElementBuilder::text("title").at(50.0, 40.0).sized(60.0, 20.0)),
            )
            .scene(
                SceneBuilder::new("body", 5.0)
                    .element(ElementBuilder::shape("bg").depth(4.0))
                    .transition(TransitionKind::Fade, 0.5),
            )
            .build()
            .unwrap();

        assert_eq!(plan.duration_s, 8.0);
        assert_eq!(plan.scenes[1].start_time_s, 3.0);
        assert_eq!(plan.fps, 24.0);
        assert_eq!(plan.total_frames(), 192);
    }

    #[test]
    fn empty_plan_fails_validation() {
        assert!(VideoPlanBuilder::new().build().is_err());
    }

    #[test]
    fn zero_duration_scene_fails_validation() {
        let result = VideoPlanBuilder::new()
            .scene(SceneBuilder::new("s", 0.0).element(ElementBuilder::text("t")))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn element_defaults_center_at_depth_zero() {
        let plan = VideoPlanBuilder::new()
            .scene(SceneBuilder::new("s", 2.0).element(ElementBuilder::image("img")))
            .build()
            .unwrap();
        let e = &plan.scenes[0].elements[0];
        assert_eq!(e.position.x, 50.0);
        assert_eq!(e.position.z, 0.0);
    }

    #[test]
    fn inline_animation_attaches_to_element() {
        let plan = VideoPlanBuilder::new()
            .scene(
                SceneBuilder::new("s", 2.0).element(
                    ElementBuilder::text("t").animate("fade-up", AnimationKind::Fade, 0.8, Ease::Out),
                ),
            )
            .build()
            .unwrap();
        let anim = plan.scenes[0].elements[0].animation.as_ref().unwrap();
        assert_eq!(anim.name, "fade-up");
        assert_eq!(anim.easing, Ease::Out);
    }
}
