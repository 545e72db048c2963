// ABOUTME: OKLCH <-> OKLab <-> linear sRGB conversions, gamut clamping, and luminance
// ABOUTME: WCAG relative luminance and contrast ratio used by the ink selector

use tinct_types::Oklch;

/// Tolerance on linear sRGB channels when testing gamut membership.
pub const GAMUT_EPSILON: f64 = 1e-7;

/// Bisection steps used when reducing chroma.
const CLAMP_ITERATIONS: usize = 32;

/// WCAG contrast thresholds plus the non-text floors for rules.
pub struct ContrastRatios;

impl ContrastRatios {
    pub const AA_NORMAL: f64 = 4.5;
    pub const AA_LARGE: f64 = 3.0;
    pub const BORDER: f64 = 1.5;
    pub const DIVIDER: f64 = 1.2;
}

/// OKLab color (L, a, b)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Linear-light sRGB triple, unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearRgb {
    fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

pub fn oklch_to_oklab(color: Oklch) -> Oklab {
    let h = color.hue_radians();
    Oklab {
        l: color.l,
        a: color.c * h.cos(),
        b: color.c * h.sin(),
    }
}

// OKLab -> LMS' -> LMS -> linear sRGB (D65), per the OKLab definition
pub fn oklab_to_linear_srgb(lab: Oklab) -> LinearRgb {
    let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
    let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
    let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

pub fn linear_srgb_to_oklab(rgb: LinearRgb) -> Oklab {
    let l = 0.4122214708 * rgb.r + 0.5363325363 * rgb.g + 0.0514459929 * rgb.b;
    let m = 0.2119034982 * rgb.r + 0.6806995451 * rgb.g + 0.1073969566 * rgb.b;
    let s = 0.0883024619 * rgb.r + 0.2817188376 * rgb.g + 0.6299787005 * rgb.b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab {
        l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    }
}

pub fn oklab_to_oklch(lab: Oklab) -> Oklch {
    let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
    let h = lab.b.atan2(lab.a).to_degrees();
    Oklch::new(lab.l, c, h)
}

pub fn oklch_to_linear_srgb(color: Oklch) -> LinearRgb {
    oklab_to_linear_srgb(oklch_to_oklab(color))
}

/// True when every linear sRGB channel is representable.
pub fn is_in_gamut(color: Oklch) -> bool {
    oklch_to_linear_srgb(color)
        .channels()
        .iter()
        .all(|&v| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&v))
}

/// Reduce chroma at fixed lightness and hue until the color fits sRGB.
///
/// Total and idempotent: an in-gamut (normalized) color comes back unchanged,
/// and chroma zero is always representable for lightness in [0, 1].
pub fn clamp_to_gamut(color: Oklch) -> Oklch {
    let color = color.normalized();
    if is_in_gamut(color) {
        return color;
    }

    let mut lo = 0.0;
    let mut hi = color.c;
    for _ in 0..CLAMP_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        if is_in_gamut(Oklch { c: mid, ..color }) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Oklch { c: lo, ..color }
}

/// WCAG 2.x relative luminance of the color's (clamped) linear sRGB value.
pub fn relative_luminance(color: Oklch) -> f64 {
    let rgb = oklch_to_linear_srgb(color);
    0.2126 * rgb.r.clamp(0.0, 1.0) + 0.7152 * rgb.g.clamp(0.0, 1.0) + 0.0722 * rgb.b.clamp(0.0, 1.0)
}

/// WCAG contrast ratio between two precomputed luminances, in [1, 21].
pub fn contrast_ratio_y(y1: f64, y2: f64) -> f64 {
    let lighter = y1.max(y2);
    let darker = y1.min(y2);
    (lighter + 0.05) / (darker + 0.05)
}

pub fn contrast_ratio(a: Oklch, b: Oklch) -> f64 {
    contrast_ratio_y(relative_luminance(a), relative_luminance(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Oklch> {
        let mut out = Vec::new();
        for li in 0..=10 {
            for ci in 0..=8 {
                for hi in 0..12 {
                    out.push(Oklch::new(
                        li as f64 / 10.0,
                        ci as f64 * 0.05,
                        hi as f64 * 30.0,
                    ));
                }
            }
        }
        out
    }

    #[test]
    fn test_white_and_black_extremes() {
        let white = oklch_to_linear_srgb(Oklch::WHITE);
        assert!((white.r - 1.0).abs() < 1e-6);
        assert!((white.g - 1.0).abs() < 1e-6);
        assert!((white.b - 1.0).abs() < 1e-6);
        assert!((relative_luminance(Oklch::WHITE) - 1.0).abs() < 1e-6);
        assert_eq!(relative_luminance(Oklch::BLACK), 0.0);

        let contrast = contrast_ratio(Oklch::WHITE, Oklch::BLACK);
        assert!((contrast - 21.0).abs() < 1e-3);
    }

    #[test]
    fn test_grays_are_always_in_gamut() {
        for i in 0..=100 {
            let gray = Oklch::new(i as f64 / 100.0, 0.0, 0.0);
            assert!(is_in_gamut(gray), "gray {gray} out of gamut");
        }
    }

    #[test]
    fn test_clamp_output_is_in_gamut() {
        for color in samples() {
            let clamped = clamp_to_gamut(color);
            assert!(is_in_gamut(clamped), "{color} clamped to {clamped}");
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        for color in samples() {
            let once = clamp_to_gamut(color);
            assert_eq!(clamp_to_gamut(once), once);
        }
    }

    #[test]
    fn test_clamp_preserves_lightness_and_hue() {
        for color in samples() {
            let clamped = clamp_to_gamut(color);
            assert_eq!(clamped.l, color.l);
            assert_eq!(clamped.h, color.h);
            assert!(clamped.c <= color.c);
        }
    }

    #[test]
    fn test_clamp_leaves_valid_colors_alone() {
        let valid = Oklch::new(0.6, 0.05, 140.0);
        assert!(is_in_gamut(valid));
        assert_eq!(clamp_to_gamut(valid), valid);
    }

    #[test]
    fn test_clamp_normalizes_raw_fields() {
        let raw = Oklch {
            l: 1.3,
            c: 0.1,
            h: -20.0,
        };
        let clamped = clamp_to_gamut(raw);
        assert_eq!(clamped.l, 1.0);
        assert_eq!(clamped.h, 340.0);
        assert!(clamped.c < 1e-6);
    }

    #[test]
    fn test_oklab_roundtrip() {
        let colors = [
            Oklch::new(0.55, 0.09, 220.0),
            Oklch::new(0.8, 0.1, 90.0),
            Oklch::new(0.3, 0.05, 300.0),
        ];
        for color in colors {
            let back = oklab_to_oklch(linear_srgb_to_oklab(oklch_to_linear_srgb(color)));
            assert!((back.l - color.l).abs() < 1e-6);
            assert!((back.c - color.c).abs() < 1e-6);
            assert!((back.h - color.h).abs() < 1e-4);
        }
    }

    #[test]
    fn test_luminance_monotonic_in_lightness_for_grays() {
        let mut last = -1.0;
        for i in 0..=50 {
            let y = relative_luminance(Oklch::new(i as f64 / 50.0, 0.0, 0.0));
            assert!(y > last);
            last = y;
        }
    }

    #[test]
    fn test_contrast_ratio_is_symmetric() {
        let a = Oklch::new(0.9, 0.02, 40.0);
        let b = Oklch::new(0.3, 0.08, 260.0);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
        assert!(contrast_ratio(a, a) - 1.0 < 1e-12);
    }
}
