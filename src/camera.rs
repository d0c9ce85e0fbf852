use std::f64::consts::TAU;

use crate::{
    ease::Ease,
    error::{CineplanError, CineplanResult},
    math::lerp,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraVec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CameraVec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraRotation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl CameraRotation {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        Self {
            pitch: lerp(a.pitch, b.pitch, t),
            yaw: lerp(a.yaw, b.yaw, t),
            roll: lerp(a.roll, b.roll, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraKeyframe {
    pub frame: u64,
    pub position: CameraVec3,
    #[serde(default)]
    pub rotation: CameraRotation,
    pub fov: f64,
    /// Easing applied over the segment arriving at this keyframe.
    #[serde(default)]
    pub easing: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraState {
    pub position: CameraVec3,
    pub rotation: CameraRotation,
    pub fov: f64,
}

/// Keyframe-based camera trajectory. Keyframes are kept sorted ascending by
/// frame; inserting at an occupied frame replaces the existing keyframe
/// (last wins).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CameraPath {
    keyframes: Vec<CameraKeyframe>,
}

impl CameraPath {
    pub fn new(keyframes: Vec<CameraKeyframe>) -> CineplanResult<Self> {
        if keyframes.is_empty() {
            return Err(CineplanError::animation(
                "camera path requires at least one keyframe",
            ));
        }
        let mut path = Self {
            keyframes: Vec::with_capacity(keyframes.len()),
        };
        for kf in keyframes {
            path.add_keyframe(kf);
        }
        Ok(path)
    }

    pub fn add_keyframe(&mut self, kf: CameraKeyframe) {
        match self.keyframes.binary_search_by_key(&kf.frame, |k| k.frame) {
            Ok(i) => self.keyframes[i] = kf,
            Err(i) => self.keyframes.insert(i, kf),
        }
    }

    pub fn keyframes(&self) -> &[CameraKeyframe] {
        &self.keyframes
    }

    /// No extrapolation: frames before the first keyframe return the first
    /// keyframe's raw values, frames after the last return the last's.
    pub fn state_at(&self, frame: u64) -> CameraState {
        let keys = &self.keyframes;
        let idx = keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return state_of(&keys[0]);
        }
        if idx >= keys.len() {
            return state_of(&keys[keys.len() - 1]);
        }

        let prev = &keys[idx - 1];
        let next = &keys[idx];
        let denom = next.frame - prev.frame;
        if denom == 0 {
            return state_of(prev);
        }
        let progress = (frame - prev.frame) as f64 / denom as f64;
        let t = next.easing.apply(progress);

        CameraState {
            position: CameraVec3::lerp(prev.position, next.position, t),
            rotation: CameraRotation::lerp(prev.rotation, next.rotation, t),
            fov: lerp(prev.fov, next.fov, t),
        }
    }

    pub fn state_with_shake(&self, frame: u64, shake: &CameraShake) -> CameraState {
        let mut state = self.state_at(frame);
        let jitter = shake.offset_at(frame);
        state.position.x += jitter.x;
        state.position.y += jitter.y;
        state.position.z += jitter.z;
        state
    }

    /// Orbit around `center` at `radius`, sweeping `theta0_deg` to
    /// `theta1_deg` over `frames`. Yaw counter-rotates so the camera keeps
    /// facing the center.
    pub fn orbital(
        center: CameraVec3,
        radius: f64,
        theta0_deg: f64,
        theta1_deg: f64,
        frames: u64,
    ) -> CineplanResult<Self> {
        if frames == 0 {
            return Err(CineplanError::animation("orbital sweep needs frames > 0"));
        }
        let at = |theta_deg: f64, frame: u64| {
            let theta = theta_deg.to_radians();
            CameraKeyframe {
                frame,
                position: CameraVec3::new(
                    center.x + radius * theta.cos(),
                    center.y,
                    center.z + radius * theta.sin(),
                ),
                rotation: CameraRotation {
                    pitch: 0.0,
                    yaw: -theta_deg,
                    roll: 0.0,
                },
                fov: DEFAULT_FOV,
                easing: Ease::InOut,
            }
        };
        Self::new(vec![at(theta0_deg, 0), at(theta1_deg, frames)])
    }

    /// Straight push from `z_start` to `z_end`. `variations` insert
    /// sub-keyframes that bias the local easing; `vertical_offsets`, when
    /// given, are applied per generated keyframe in order (extra entries are
    /// ignored, missing ones default to 0).
    pub fn forward_tracking(
        z_start: f64,
        z_end: f64,
        frames: u64,
        variations: &[SpeedVariation],
        vertical_offsets: &[f64],
    ) -> CineplanResult<Self> {
        if frames == 0 {
            return Err(CineplanError::animation(
                "forward tracking needs frames > 0",
            ));
        }

        let mut keys = Vec::with_capacity(variations.len() + 2);
        let mut push = |at: f64, easing: Ease| {
            let at = at.clamp(0.0, 1.0);
            let y = vertical_offsets.get(keys.len()).copied().unwrap_or(0.0);
            keys.push(CameraKeyframe {
                frame: (at * frames as f64).round() as u64,
                position: CameraVec3::new(0.0, y, lerp(z_start, z_end, at)),
                rotation: CameraRotation::default(),
                fov: DEFAULT_FOV,
                easing,
            });
        };

        push(0.0, Ease::InOut);
        for v in variations {
            push(v.at, v.easing);
        }
        push(1.0, Ease::InOut);
        Self::new(keys)
    }

    /// Hitchcock effect: z and fov interpolate in opposite senses, keeping
    /// the subject framed while the perspective stretches.
    pub fn dolly_zoom(
        z_start: f64,
        z_end: f64,
        fov_start: f64,
        fov_end: f64,
        frames: u64,
    ) -> CineplanResult<Self> {
        if frames == 0 {
            return Err(CineplanError::animation("dolly zoom needs frames > 0"));
        }
        let key = |frame: u64, z: f64, fov: f64| CameraKeyframe {
            frame,
            position: CameraVec3::new(0.0, 0.0, z),
            rotation: CameraRotation::default(),
            fov,
            easing: Ease::InOut,
        };
        Self::new(vec![
            key(0, z_start, fov_start),
            key(frames, z_end, fov_end),
        ])
    }
}

pub const DEFAULT_FOV: f64 = 60.0;

fn state_of(kf: &CameraKeyframe) -> CameraState {
    CameraState {
        position: kf.position,
        rotation: kf.rotation,
        fov: kf.fov,
    }
}

/// A point inside a forward-tracking sweep where the local easing changes,
/// given as a fraction of the total sweep.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct SpeedVariation {
    pub at: f64,
    pub easing: Ease,
}

/// Additive sinusoidal jitter with fixed frequency; amplitude decays by
/// `1 - OutCubic(frame / duration)` so the shake dies out completely.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct CameraShake {
    pub intensity: f64,
    pub duration_frames: u64,
}

const SHAKE_FREQUENCY: f64 = 20.0;

impl CameraShake {
    pub fn offset_at(&self, frame: u64) -> CameraVec3 {
        if self.duration_frames == 0 {
            return CameraVec3::default();
        }
        let t = (frame as f64 / self.duration_frames as f64).clamp(0.0, 1.0);
        let amp = self.intensity * (1.0 - Ease::Out.apply(t));
        let phase = TAU * SHAKE_FREQUENCY * t;
        CameraVec3::new(
            amp * phase.sin(),
            amp * phase.cos(),
            amp * 0.5 * (phase * 0.5).sin(),
        )
    }
}
