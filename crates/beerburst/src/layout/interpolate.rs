//! Extent interpolation for zoom transitions

use super::Extent;

/// Produces the extent between `from` and `to` at normalized time `t`.
pub trait Interpolate {
    /// `t` runs from 0 (start of the transition) to 1 (end).
    fn interpolate(&self, from: &Extent, to: &Extent, t: f64) -> Extent;

    /// Timing curve for scalar tweens (opacities) running alongside the
    /// geometry. Linear unless overridden.
    fn ease(&self, t: f64) -> f64 {
        t
    }
}

/// Easing curves applied to normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    /// Constant speed
    Linear,
    /// Slow start and end, symmetric cubic
    #[default]
    CubicInOut,
}

impl Ease {
    /// Map linear progress in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::CubicInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t * t * t / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * t + 2.0) / 2.0
                }
            }
        }
    }
}

/// Linear blend of extents over eased time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eased {
    /// The easing curve
    pub ease: Ease,
}

impl Eased {
    /// Interpolator with the given curve.
    pub fn new(ease: Ease) -> Self {
        Self { ease }
    }
}

impl Interpolate for Eased {
    fn interpolate(&self, from: &Extent, to: &Extent, t: f64) -> Extent {
        from.lerp(to, self.ease.apply(t))
    }

    fn ease(&self, t: f64) -> f64 {
        self.ease.apply(t)
    }
}
