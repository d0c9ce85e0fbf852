/// The six fixed depth tiers, ordered far to near. Paint order follows the
/// variant order, so `Ord` doubles as depth sorting.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ParallaxLayer {
    FarBackground,
    MidBackground,
    Environment,
    MidGround,
    Subject,
    Foreground,
}

impl ParallaxLayer {
    pub const ALL: [Self; 6] = [
        Self::FarBackground,
        Self::MidBackground,
        Self::Environment,
        Self::MidGround,
        Self::Subject,
        Self::Foreground,
    ];

    /// Camera-offset multiplier per tier.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::FarBackground => 0.1,
            Self::MidBackground => 0.3,
            Self::Environment => 0.6,
            Self::MidGround => 0.8,
            Self::Subject => 1.0,
            Self::Foreground => 1.5,
        }
    }

    /// Atmospheric rendering defaults; distant tiers fade, blur and cool.
    pub fn atmosphere(self) -> Atmosphere {
        match self {
            Self::FarBackground => Atmosphere {
                opacity: 0.65,
                blur_px: 4.0,
                color_shift: Some("rgb(185,200,225)".to_string()),
            },
            Self::MidBackground => Atmosphere {
                opacity: 0.8,
                blur_px: 2.0,
                color_shift: Some("rgb(205,215,230)".to_string()),
            },
            Self::Environment => Atmosphere {
                opacity: 0.92,
                blur_px: 0.5,
                color_shift: None,
            },
            Self::MidGround => Atmosphere {
                opacity: 1.0,
                blur_px: 0.0,
                color_shift: None,
            },
            Self::Subject => Atmosphere {
                opacity: 1.0,
                blur_px: 0.0,
                color_shift: None,
            },
            Self::Foreground => Atmosphere {
                opacity: 1.0,
                blur_px: 1.5,
                color_shift: None,
            },
        }
    }

    /// Map element depth onto a tier. z is a stacking order where higher
    /// values sit closer to the camera; anything at or below 0 is far
    /// background, 5 and above is foreground.
    pub fn infer_from_z(z: f64) -> Self {
        let idx = z.floor().clamp(0.0, 5.0) as usize;
        Self::ALL[idx]
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Atmosphere {
    pub opacity: f64,
    pub blur_px: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_shift: Option<String>,
}

/// Per-element parallax configuration. Unset fields fall back to the layer
/// tables above.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ParallaxConfig {
    pub layer: ParallaxLayer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_px: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_shift: Option<String>,
}

impl ParallaxConfig {
    pub fn for_layer(layer: ParallaxLayer) -> Self {
        Self {
            layer,
            multiplier: None,
            opacity: None,
            blur_px: None,
            color_shift: None,
        }
    }

    pub fn effective_multiplier(&self) -> f64 {
        self.multiplier.unwrap_or_else(|| self.layer.multiplier())
    }
}

/// Resolved 2.5D transform for one layer at one camera position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub offset_z: f64,
    pub scale: f64,
    pub opacity: f64,
    pub blur_px: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_shift: Option<String>,
}

/// Offsets scale with the layer multiplier; depth scale keeps near layers
/// rendering slightly larger: `1 - (1 - m) * 0.1`.
pub fn transform_for(config: &ParallaxConfig, camera: [f64; 3]) -> ParallaxTransform {
    let m = config.effective_multiplier();
    let atmosphere = config.layer.atmosphere();
    ParallaxTransform {
        offset_x: camera[0] * m,
        offset_y: camera[1] * m,
        offset_z: camera[2] * m,
        scale: depth_scale(m),
        opacity: config.opacity.unwrap_or(atmosphere.opacity),
        blur_px: config.blur_px.unwrap_or(atmosphere.blur_px),
        color_shift: config
            .color_shift
            .clone()
            .or(atmosphere.color_shift),
    }
}

pub fn depth_scale(multiplier: f64) -> f64 {
    1.0 - (1.0 - multiplier) * 0.1
}

/// Paint order: far background first, foreground last. Ties keep their
/// incoming order (stable sort) so output stays deterministic.
pub fn sort_by_depth<T>(items: &mut [T], layer_of: impl Fn(&T) -> ParallaxLayer) {
    items.sort_by_key(|item| layer_of(item));
}

const FOG_THRESHOLD: f64 = 0.1;

/// Linear depth-fog gradient whose intensity is `1 - multiplier`; layers at
/// or near subject depth get none.
pub fn depth_fog(config: &ParallaxConfig) -> String {
    let intensity = 1.0 - config.effective_multiplier();
    if intensity < FOG_THRESHOLD {
        return "none".to_string();
    }
    format!(
        "linear-gradient(rgba(200,215,235,{:.3}), rgba(200,215,235,0))",
        intensity
    )
}
