use crate::math::{kelvin_to_rgb, lerp, lerp_rgb};

/// A full color grade. Temperature in Kelvin (2000..=10000 useful range),
/// tint in -100..=100, saturation/contrast/brightness in 0..=200 with 100
/// neutral, tone colors as `rgb(r,g,b)` strings, vignette in 0..=1.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorGrade {
    pub temperature: f64,
    pub tint: f64,
    pub saturation: f64,
    pub contrast: f64,
    pub brightness: f64,
    pub shadows: String,
    pub midtones: String,
    pub highlights: String,
    pub vignette: f64,
}

impl ColorGrade {
    pub fn neutral() -> Self {
        Mood::Neutral.grade()
    }
}

/// Partial grade; unset fields resolve against the neutral preset through an
/// explicit merge so every defaulting rule is testable in isolation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorGradePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadows: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midtones: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vignette: Option<f64>,
}

impl ColorGradePatch {
    pub fn resolve(&self) -> ColorGrade {
        let neutral = ColorGrade::neutral();
        ColorGrade {
            temperature: self.temperature.unwrap_or(neutral.temperature),
            tint: self.tint.unwrap_or(neutral.tint),
            saturation: self.saturation.unwrap_or(neutral.saturation),
            contrast: self.contrast.unwrap_or(neutral.contrast),
            brightness: self.brightness.unwrap_or(neutral.brightness),
            shadows: self.shadows.clone().unwrap_or(neutral.shadows),
            midtones: self.midtones.clone().unwrap_or(neutral.midtones),
            highlights: self.highlights.clone().unwrap_or(neutral.highlights),
            vignette: self.vignette.unwrap_or(neutral.vignette),
        }
    }
}

impl From<ColorGrade> for ColorGradePatch {
    fn from(g: ColorGrade) -> Self {
        Self {
            temperature: Some(g.temperature),
            tint: Some(g.tint),
            saturation: Some(g.saturation),
            contrast: Some(g.contrast),
            brightness: Some(g.brightness),
            shadows: Some(g.shadows),
            midtones: Some(g.midtones),
            highlights: Some(g.highlights),
            vignette: Some(g.vignette),
        }
    }
}

/// The six mood presets; the only legal shorthand inputs to the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    SpaceBlue,
    WarmEnergy,
    GreenLandscape,
    DramaticDark,
    WarmFinale,
    Neutral,
}

impl Mood {
    pub fn grade(self) -> ColorGrade {
        match self {
            Self::SpaceBlue => ColorGrade {
                temperature: 8500.0,
                tint: -10.0,
                saturation: 110.0,
                contrast: 115.0,
                brightness: 95.0,
                shadows: "rgb(10,15,40)".to_string(),
                midtones: "rgb(90,110,160)".to_string(),
                highlights: "rgb(210,225,255)".to_string(),
                vignette: 0.35,
            },
            Self::WarmEnergy => ColorGrade {
                temperature: 4500.0,
                tint: 10.0,
                saturation: 125.0,
                contrast: 110.0,
                brightness: 108.0,
                shadows: "rgb(40,20,10)".to_string(),
                midtones: "rgb(180,130,90)".to_string(),
                highlights: "rgb(255,235,200)".to_string(),
                vignette: 0.15,
            },
            Self::GreenLandscape => ColorGrade {
                temperature: 5600.0,
                tint: -20.0,
                saturation: 115.0,
                contrast: 105.0,
                brightness: 102.0,
                shadows: "rgb(10,30,15)".to_string(),
                midtones: "rgb(110,150,110)".to_string(),
                highlights: "rgb(235,255,230)".to_string(),
                vignette: 0.2,
            },
            Self::DramaticDark => ColorGrade {
                temperature: 5200.0,
                tint: 0.0,
                saturation: 90.0,
                contrast: 135.0,
                brightness: 80.0,
                shadows: "rgb(5,5,10)".to_string(),
                midtones: "rgb(70,70,80)".to_string(),
                highlights: "rgb(220,220,230)".to_string(),
                vignette: 0.55,
            },
            Self::WarmFinale => ColorGrade {
                temperature: 3800.0,
                tint: 15.0,
                saturation: 120.0,
                contrast: 108.0,
                brightness: 105.0,
                shadows: "rgb(50,25,15)".to_string(),
                midtones: "rgb(200,150,100)".to_string(),
                highlights: "rgb(255,240,210)".to_string(),
                vignette: 0.25,
            },
            Self::Neutral => ColorGrade {
                temperature: 6500.0,
                tint: 0.0,
                saturation: 100.0,
                contrast: 100.0,
                brightness: 100.0,
                shadows: "rgb(0,0,0)".to_string(),
                midtones: "rgb(128,128,128)".to_string(),
                highlights: "rgb(255,255,255)".to_string(),
                vignette: 0.0,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorGradeKeyframe {
    pub frame: u64,
    pub grade: ColorGradePatch,
}

/// Keyframe timeline over color grades, same edge handling as the camera
/// path: clamp outside the keyframe range, linear interpolation inside.
/// Duplicate frames: last wins.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ColorGrading {
    keyframes: Vec<ColorGradeKeyframe>,
}

impl ColorGrading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_keyframe(&mut self, frame: u64, grade: ColorGradePatch) {
        let kf = ColorGradeKeyframe { frame, grade };
        match self.keyframes.binary_search_by_key(&frame, |k| k.frame) {
            Ok(i) => self.keyframes[i] = kf,
            Err(i) => self.keyframes.insert(i, kf),
        }
    }

    pub fn add_mood_keyframe(&mut self, frame: u64, mood: Mood) {
        self.add_keyframe(frame, mood.grade().into());
    }

    pub fn keyframes(&self) -> &[ColorGradeKeyframe] {
        &self.keyframes
    }

    /// Missing timeline or missing fields default to the neutral preset.
    pub fn grade_at(&self, frame: u64) -> ColorGrade {
        let keys = &self.keyframes;
        if keys.is_empty() {
            return ColorGrade::neutral();
        }
        let idx = keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return keys[0].grade.resolve();
        }
        if idx >= keys.len() {
            return keys[keys.len() - 1].grade.resolve();
        }

        let prev = &keys[idx - 1];
        let next = &keys[idx];
        let denom = next.frame - prev.frame;
        if denom == 0 {
            return prev.grade.resolve();
        }
        let t = (frame - prev.frame) as f64 / denom as f64;

        let a = prev.grade.resolve();
        let b = next.grade.resolve();
        ColorGrade {
            temperature: lerp(a.temperature, b.temperature, t),
            tint: lerp(a.tint, b.tint, t),
            saturation: lerp(a.saturation, b.saturation, t),
            contrast: lerp(a.contrast, b.contrast, t),
            brightness: lerp(a.brightness, b.brightness, t),
            shadows: lerp_rgb(&a.shadows, &b.shadows, t),
            midtones: lerp_rgb(&a.midtones, &b.midtones, t),
            highlights: lerp_rgb(&a.highlights, &b.highlights, t),
            vignette: lerp(a.vignette, b.vignette, t),
        }
    }

    /// Five-act mood arc at fixed duration fractions. The 0.29/0.30 pair is a
    /// deliberate hard cut between acts two and three.
    pub fn five_act_timeline(duration_frames: u64) -> Self {
        const ACTS: [(f64, Mood); 8] = [
            (0.00, Mood::SpaceBlue),
            (0.11, Mood::WarmEnergy),
            (0.29, Mood::WarmEnergy),
            (0.30, Mood::GreenLandscape),
            (0.48, Mood::DramaticDark),
            (0.72, Mood::DramaticDark),
            (0.87, Mood::WarmFinale),
            (1.00, Mood::WarmFinale),
        ];
        let mut grading = Self::new();
        for (fraction, mood) in ACTS {
            grading.add_mood_keyframe((fraction * duration_frames as f64).round() as u64, mood);
        }
        grading
    }
}

/// Only brightness/contrast/saturation become filter terms; temperature and
/// vignette are realized as overlay layers instead.
pub fn css_filter(grade: &ColorGrade) -> String {
    format!(
        "brightness({:.3}) contrast({:.3}) saturate({:.3})",
        grade.brightness / 100.0,
        grade.contrast / 100.0,
        grade.saturation / 100.0
    )
}

/// A translucent overlay layer: a flat color wash or gradient at an opacity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayLayer {
    pub background: String,
    pub opacity: f64,
}

const TEMPERATURE_DEADBAND_K: f64 = 50.0;
const TEMPERATURE_MAX_OPACITY: f64 = 0.35;

/// Temperature wash; `None` at (near-)neutral temperature. Opacity grows with
/// distance from 6500K.
pub fn temperature_overlay(grade: &ColorGrade) -> Option<OverlayLayer> {
    let delta = grade.temperature - 6500.0;
    if delta.abs() < TEMPERATURE_DEADBAND_K {
        return None;
    }
    Some(OverlayLayer {
        background: kelvin_to_rgb(grade.temperature),
        opacity: (delta.abs() / 6500.0 * TEMPERATURE_MAX_OPACITY).min(TEMPERATURE_MAX_OPACITY),
    })
}

pub fn vignette_overlay(grade: &ColorGrade) -> Option<OverlayLayer> {
    if grade.vignette <= 0.0 {
        return None;
    }
    Some(OverlayLayer {
        background: "radial-gradient(transparent 55%, rgb(0,0,0))".to_string(),
        opacity: grade.vignette.min(1.0),
    })
}
