//! Cubic-bezier easing curves.

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

/// The site's in-out curve, `cubic-bezier(0.76, 0, 0.24, 1)`.
///
pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.76, 0.0, 0.24, 1.0);

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        CubicBezier { x1, y1, x2, y2 }
    }

    fn sample(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    fn slope(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    /// Curve parameter whose x coordinate is `x`.
    ///
    fn solve_parameter(&self, x: f32) -> f32 {
        let mut s = x;
        for _ in 0..8 {
            let error = Self::sample(self.x1, self.x2, s) - x;
            if error.abs() < 1e-5 {
                return s;
            }
            let slope = Self::slope(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
        }

        // Newton stalled on a flat stretch; bisect instead.
        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        s = x;
        for _ in 0..32 {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < 1e-5 {
                break;
            }
            if value < x {
                low = s;
            } else {
                high = s;
            }
            s = (low + high) / 2.0;
        }
        s
    }

    /// Eased progress for linear progress `t` in `[0, 1]`.
    ///
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.solve_parameter(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(EASE_IN_OUT.apply(0.0), 0.0);
        assert_eq!(EASE_IN_OUT.apply(1.0), 1.0);
        assert_eq!(EASE_IN_OUT.apply(-1.0), 0.0);
        assert_eq!(EASE_IN_OUT.apply(2.0), 1.0);
    }

    #[test]
    fn test_symmetric_curve_passes_midpoint() {
        assert!((EASE_IN_OUT.apply(0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_in_out_shape() {
        // Slow start, slow finish.
        assert!(EASE_IN_OUT.apply(0.2) < 0.1);
        assert!(EASE_IN_OUT.apply(0.8) > 0.9);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = EASE_IN_OUT.apply(step as f32 / 100.0);
            assert!(value + 1e-4 >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_linear_curve_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            assert!((linear.apply(t) - t).abs() < 1e-3);
        }
    }
}
