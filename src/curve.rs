use std::collections::BTreeMap;

use kurbo::{CubicBez, ParamCurve, ParamCurveDeriv, Point, Vec2};

use crate::{
    ease::Ease,
    math::{direction_deg, lerp},
};

/// One immutable cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BezierCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

/// Control-point distance for a quarter-circle cubic approximation,
/// expressed as a fraction of the radius.
const CIRCLE_KAPPA: f64 = 0.552;

impl BezierCurve {
    pub fn new(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    pub fn line(start: Point, end: Point) -> Self {
        Self::new(start, start.lerp(end, 1.0 / 3.0), start.lerp(end, 2.0 / 3.0), end)
    }

    fn as_cubic(&self) -> CubicBez {
        CubicBez::new(self.start, self.control1, self.control2, self.end)
    }

    pub fn point_at(&self, t: f64) -> Point {
        self.as_cubic().eval(t.clamp(0.0, 1.0))
    }

    pub fn tangent_at(&self, t: f64) -> Vec2 {
        self.as_cubic().deriv().eval(t.clamp(0.0, 1.0)).to_vec2()
    }

    pub fn direction_deg_at(&self, t: f64) -> f64 {
        direction_deg(self.tangent_at(t))
    }

    /// Parabolic-looking arc: both control points are lifted perpendicular to
    /// the chord so the apex sits roughly `height` off the straight line.
    pub fn arc(from: Point, to: Point, height: f64) -> Self {
        let perp = chord_normal(from, to);
        Self::new(
            from,
            from.lerp(to, 1.0 / 3.0) + perp * height,
            from.lerp(to, 2.0 / 3.0) + perp * height,
            to,
        )
    }

    /// S-curve: opposed perpendicular control-point offsets.
    pub fn s_curve(from: Point, to: Point, offset: f64) -> Self {
        let perp = chord_normal(from, to);
        Self::new(
            from,
            from.lerp(to, 1.0 / 3.0) + perp * offset,
            from.lerp(to, 2.0 / 3.0) - perp * offset,
            to,
        )
    }

    /// Circular arc approximation with control-point distance
    /// `radius * 0.552` along the endpoint tangents.
    pub fn circular_arc(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> Self {
        let a0 = start_deg.to_radians();
        let a1 = end_deg.to_radians();
        let sweep = (a1 - a0).signum();
        let on = |a: f64| center + Vec2::new(radius * a.cos(), radius * a.sin());
        let tangent = |a: f64| Vec2::new(-a.sin(), a.cos()) * (radius * CIRCLE_KAPPA * sweep);
        Self::new(on(a0), on(a0) + tangent(a0), on(a1) - tangent(a1), on(a1))
    }

    /// Preset lookup by name with `magnitude` as the height/offset/amplitude
    /// argument. Unrecognized names fall back to a straight line.
    pub fn from_named(name: &str, from: Point, to: Point, magnitude: f64) -> Self {
        match name {
            "arc" => Self::arc(from, to, magnitude),
            "s_curve" => Self::s_curve(from, to, magnitude),
            "wave" => Self::wave(from, to, magnitude),
            _ => Self::line(from, to),
        }
    }

    /// A single wavelength unit; callers chain copies for longer waves.
    pub fn wave(from: Point, to: Point, amplitude: f64) -> Self {
        let perp = chord_normal(from, to);
        Self::new(
            from,
            from.lerp(to, 1.0 / 3.0) + perp * (2.0 * amplitude),
            from.lerp(to, 2.0 / 3.0) - perp * (2.0 * amplitude),
            to,
        )
    }
}

/// Unit normal of the chord, or zero for a degenerate chord.
fn chord_normal(from: Point, to: Point) -> Vec2 {
    let chord = to - from;
    let len = chord.hypot();
    if len == 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(-chord.y, chord.x) / len
}

/// Resolved per-frame state of an element riding a curved path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathState {
    pub position: Point,
    pub rotation_deg: f64,
    pub scale: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CurvedPathAnimation {
    pub curve: BezierCurve,
    pub start_frame: u64,
    pub duration_frames: u64,
    #[serde(default)]
    pub easing: Ease,
    #[serde(default = "default_true")]
    pub rotate_to_direction: bool,
    #[serde(default = "default_true")]
    pub scale_with_distance: bool,
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
}

fn default_true() -> bool {
    true
}

fn default_min_scale() -> f64 {
    0.5
}

fn default_max_scale() -> f64 {
    1.5
}

impl CurvedPathAnimation {
    pub fn new(curve: BezierCurve, start_frame: u64, duration_frames: u64) -> Self {
        Self {
            curve,
            start_frame,
            duration_frames,
            easing: Ease::InOut,
            rotate_to_direction: true,
            scale_with_distance: true,
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
        }
    }

    pub fn end_frame(&self) -> u64 {
        self.start_frame.saturating_add(self.duration_frames)
    }

    /// Frames before the window hold the curve start at `min_scale`; frames
    /// after hold the curve end at `max_scale`. A zero-length window
    /// degenerates to the end state.
    pub fn state_at(&self, frame: u64) -> PathState {
        if frame < self.start_frame {
            return self.state_for_t(0.0);
        }
        if self.duration_frames == 0 || frame >= self.end_frame() {
            return self.state_for_t(1.0);
        }
        let local = (frame - self.start_frame) as f64 / self.duration_frames as f64;
        self.state_for_t(self.easing.apply(local))
    }

    fn state_for_t(&self, t: f64) -> PathState {
        PathState {
            position: self.curve.point_at(t),
            rotation_deg: if self.rotate_to_direction {
                self.curve.direction_deg_at(t)
            } else {
                0.0
            },
            scale: if self.scale_with_distance {
                lerp(self.min_scale, self.max_scale, t)
            } else {
                1.0
            },
        }
    }
}

/// N independent curved paths keyed by element id. Paths never interact;
/// iteration order is the id order, which keeps output deterministic.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MultiPathOrchestrator {
    paths: BTreeMap<String, CurvedPathAnimation>,
}

impl MultiPathOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element_id: impl Into<String>, path: CurvedPathAnimation) {
        self.paths.insert(element_id.into(), path);
    }

    pub fn get(&self, element_id: &str) -> Option<&CurvedPathAnimation> {
        self.paths.get(element_id)
    }

    pub fn state_for(&self, element_id: &str, frame: u64) -> Option<PathState> {
        self.paths.get(element_id).map(|p| p.state_at(frame))
    }

    pub fn states_at(&self, frame: u64) -> BTreeMap<String, PathState> {
        self.paths
            .iter()
            .map(|(id, p)| (id.clone(), p.state_at(frame)))
            .collect()
    }

    pub fn into_paths(self) -> BTreeMap<String, CurvedPathAnimation> {
        self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_points_along_chord() {
        let c = BezierCurve::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(c.point_at(0.5), Point::new(5.0, 0.0));
        assert_eq!(c.direction_deg_at(0.5), 0.0);
    }

    #[test]
    fn arc_apex_lifts_off_the_chord() {
        let c = BezierCurve::arc(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 4.0);
        let apex = c.point_at(0.5);
        // Chord normal for a left-to-right horizontal chord points +y.
        assert!(apex.y > 2.0);
        assert!((apex.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn circular_arc_endpoints_sit_on_the_circle() {
        let c = BezierCurve::circular_arc(Point::new(0.0, 0.0), 5.0, 0.0, 90.0);
        assert!((c.start.x - 5.0).abs() < 1e-9);
        assert!(c.start.y.abs() < 1e-9);
        assert!(c.end.x.abs() < 1e-9);
        assert!((c.end.y - 5.0).abs() < 1e-9);
        // Quarter-circle midpoint should be close to the true circle.
        let mid = c.point_at(0.5);
        let r = (mid.x * mid.x + mid.y * mid.y).sqrt();
        assert!((r - 5.0).abs() < 0.05);
    }

    #[test]
    fn unknown_preset_name_falls_back_to_line() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(10.0, 10.0);
        let named = BezierCurve::from_named("zigzag", from, to, 5.0);
        assert_eq!(named, BezierCurve::line(from, to));
        assert_ne!(BezierCurve::from_named("arc", from, to, 5.0), named);
    }

    fn anim() -> CurvedPathAnimation {
        CurvedPathAnimation::new(
            BezierCurve::line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
            10,
            20,
        )
    }

    #[test]
    fn window_edges_clamp_to_endpoints() {
        let a = anim();
        let before = a.state_at(0);
        assert_eq!(before.position, Point::new(0.0, 0.0));
        assert_eq!(before.scale, 0.5);

        let after = a.state_at(30);
        assert_eq!(after.position, Point::new(100.0, 0.0));
        assert_eq!(after.scale, 1.5);
    }

    #[test]
    fn scale_and_rotation_flags_opt_out() {
        let mut a = anim();
        a.rotate_to_direction = false;
        a.scale_with_distance = false;
        let s = a.state_at(20);
        assert_eq!(s.rotation_deg, 0.0);
        assert_eq!(s.scale, 1.0);
    }

    #[test]
    fn orchestrator_keys_paths_independently() {
        let mut orch = MultiPathOrchestrator::new();
        orch.insert("hero", anim());
        let mut late = anim();
        late.start_frame = 100;
        orch.insert("logo", late);

        assert!(orch.state_for("missing", 0).is_none());
        let states = orch.states_at(30);
        assert_eq!(states.len(), 2);
        assert_eq!(states["hero"].position, Point::new(100.0, 0.0));
        assert_eq!(states["logo"].position, Point::new(0.0, 0.0));
    }
}
