use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    In,
    Out,
    #[default]
    InOut,
    /// Closed-form spring approximation `1 - (1-t)^3 * cos(2πt)`, not a
    /// simulated mass-spring-damper. Overshoots slightly past 1 mid-curve.
    Spring,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::In => t * t * t,
            Self::Out => 1.0 - (1.0 - t).powi(3),
            Self::InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Spring => 1.0 - (1.0 - t).powi(3) * (TAU * t).cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [Ease::Linear, Ease::In, Ease::Out, Ease::InOut, Ease::Spring];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn input_is_clamped() {
        for ease in ALL {
            assert_eq!(ease.apply(-3.0), 0.0);
            assert_eq!(ease.apply(7.0), 1.0);
        }
    }

    #[test]
    fn cubic_monotonic_spot_check() {
        for ease in [Ease::Linear, Ease::In, Ease::Out, Ease::InOut] {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b);
            assert!(b < c);
        }
    }

    #[test]
    fn spring_overshoots_then_settles() {
        // The cosine term flips sign across the curve, producing the springy
        // wobble around the target value.
        let mid = Ease::Spring.apply(0.5);
        assert!(mid > 1.0);
        assert!((Ease::Spring.apply(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn serde_names_are_snake_case() {
        assert_eq!(serde_json::to_string(&Ease::InOut).unwrap(), "\"in_out\"");
        let e: Ease = serde_json::from_str("\"spring\"").unwrap();
        assert_eq!(e, Ease::Spring);
    }
}
