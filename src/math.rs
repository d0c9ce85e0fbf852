use kurbo::Vec2;

/// Linear map of `value` from `in_range` onto `out_range`, clamped at both
/// ends: inputs outside `in_range` are held at the corresponding output bound.
pub fn interpolate(value: f64, in_range: [f64; 2], out_range: [f64; 2]) -> f64 {
    let [in_min, in_max] = in_range;
    let [out_min, out_max] = out_range;
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    let t = ((value - in_min) / span).clamp(0.0, 1.0);
    out_min + (out_max - out_min) * t
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Angle of a tangent vector in degrees, `atan2(y, x)`.
pub fn direction_deg(tangent: Vec2) -> f64 {
    tangent.y.atan2(tangent.x).to_degrees()
}

/// Blackbody color temperature to an `rgb(r,g,b)` string, piecewise fit
/// (Tanner Helland). Valid roughly over 1000K..40000K; inputs are clamped to
/// that domain and channels to 0..=255.
pub fn kelvin_to_rgb(kelvin: f64) -> String {
    let k = kelvin.clamp(1000.0, 40000.0) / 100.0;

    let r = if k <= 66.0 {
        255.0
    } else {
        329.698_727_446 * (k - 60.0).powf(-0.133_204_759_2)
    };

    let g = if k <= 66.0 {
        99.470_802_586_1 * k.ln() - 161.119_568_166_1
    } else {
        288.122_169_528_3 * (k - 60.0).powf(-0.075_514_849_2)
    };

    let b = if k >= 66.0 {
        255.0
    } else if k <= 19.0 {
        0.0
    } else {
        138.517_731_223_1 * (k - 10.0).ln() - 305.044_792_730_7
    };

    format_rgb([clamp_channel(r), clamp_channel(g), clamp_channel(b)])
}

fn clamp_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

pub fn format_rgb(rgb: [u8; 3]) -> String {
    format!("rgb({},{},{})", rgb[0], rgb[1], rgb[2])
}

/// Parse `rgb(r,g,b)` or `#rrggbb`. Returns `None` for anything else.
pub fn parse_rgb(s: &str) -> Option<[u8; 3]> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some([r, g, b]);
    }
    let inner = s
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))?;
    let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>());
    let r = channels.next()?.ok()?;
    let g = channels.next()?.ok()?;
    let b = channels.next()?.ok()?;
    if channels.next().is_some() {
        return None;
    }
    Some([r, g, b])
}

const FALLBACK_GRAY: [u8; 3] = [128, 128, 128];

/// Per-channel interpolation between two color strings. Malformed inputs fall
/// back to neutral gray rather than erroring.
pub fn lerp_rgb(a: &str, b: &str, t: f64) -> String {
    let a = parse_rgb(a).unwrap_or(FALLBACK_GRAY);
    let b = parse_rgb(b).unwrap_or(FALLBACK_GRAY);
    let ch = |i: usize| clamp_channel(lerp(f64::from(a[i]), f64::from(b[i]), t));
    format_rgb([ch(0), ch(1), ch(2)])
}

/// WCAG relative luminance of an sRGB color.
pub fn relative_luminance(rgb: [u8; 3]) -> f64 {
    fn linearize(c: u8) -> f64 {
        let c = f64::from(c) / 255.0;
        if c <= 0.039_28 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linearize(rgb[0]) + 0.7152 * linearize(rgb[1]) + 0.0722 * linearize(rgb[2])
}

/// WCAG contrast ratio, in `[1, 21]`.
pub fn contrast_ratio(a: [u8; 3], b: [u8; 3]) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}
