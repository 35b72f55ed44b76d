//! Easing functions for animations

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseOutCubic,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// Cubic bezier easing calculation (matches CSS spec / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    // Solve for parameter `p` where bezier_x(p) == x using Newton-Raphson,
    // falling back to binary search if the slope is too flat.
    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    // Binary search fallback
    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    p = x;
    for _ in 0..32 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            break;
        }
        if err > 0.0 {
            hi = p;
        } else {
            lo = p;
        }
        p = (lo + hi) / 2.0;
    }

    bezier_sample(p, y1, y2) as f32
}

/// Sample a one-dimensional cubic bezier with control points (c1, c2)
fn bezier_sample(p: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - p;
    3.0 * inv * inv * p * c1 + 3.0 * inv * p * p * c2 + p * p * p
}

/// Derivative of `bezier_sample` with respect to `p`
fn bezier_slope(p: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - p;
    3.0 * inv * inv * c1 + 6.0 * inv * p * (c2 - c1) + 3.0 * p * p * (1.0 - c2)
}
