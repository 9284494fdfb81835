//! Annular sector geometry as SVG path data
//!
//! Angles are measured clockwise from 12 o'clock, radii from the chart
//! center. Adjacent sectors are separated by a pad angle applied at a fixed
//! pad radius, so the gap has constant width across rings.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

use super::Extent;

const EPSILON: f64 = 1e-12;
const PATH_EPSILON: f64 = 1e-6;

/// Turns extents into sector outlines for a chart of a given ring radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGenerator {
    /// Pixels per ring
    pub radius: f64,
    /// Radius at which the pad angle is measured
    pub pad_radius: f64,
    /// Upper bound for the pad angle (radians)
    pub max_pad_angle: f64,
}

impl ArcGenerator {
    /// Generator with the pad radius at one and a half rings.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            pad_radius: radius * 1.5,
            max_pad_angle: 0.005,
        }
    }

    /// Inner radius in pixels.
    pub fn inner_radius(&self, e: &Extent) -> f64 {
        e.y0 * self.radius
    }

    /// Outer radius in pixels, one pixel short of the next ring.
    pub fn outer_radius(&self, e: &Extent) -> f64 {
        (e.y0 * self.radius).max(e.y1 * self.radius - 1.0)
    }

    /// Pad angle, at most half the sector width.
    pub fn pad_angle(&self, e: &Extent) -> f64 {
        (e.angular_width() / 2.0).min(self.max_pad_angle)
    }

    /// SVG path data for the sector covered by `e`.
    pub fn path(&self, e: &Extent) -> String {
        let mut r0 = self.inner_radius(e);
        let mut r1 = self.outer_radius(e);
        let a0 = e.x0 - FRAC_PI_2;
        let a1 = e.x1 - FRAC_PI_2;
        let da = (a1 - a0).abs();
        let cw = a1 > a0;
        if r1 < r0 {
            std::mem::swap(&mut r0, &mut r1);
        }

        let mut path = PathBuilder::default();

        if !(r1 > EPSILON) {
            path.move_to(0.0, 0.0);
        } else if da > TAU - EPSILON {
            // Full circle or annulus
            path.move_to(r1 * a0.cos(), r1 * a0.sin());
            path.arc(r1, a0, a1, !cw);
            if r0 > EPSILON {
                path.move_to(r0 * a1.cos(), r0 * a1.sin());
                path.arc(r0, a1, a0, cw);
            }
        } else {
            let (mut a01, mut a11, mut a00, mut a10) = (a0, a1, a0, a1);
            let (mut da0, mut da1) = (da, da);
            let ap = self.pad_angle(e) / 2.0;
            let rp = if ap > EPSILON { self.pad_radius } else { 0.0 };

            if rp > EPSILON {
                let sign = if cw { 1.0 } else { -1.0 };
                // NaN when a ring is too thin for the pad; treated as collapsed.
                let p0 = (rp / r0 * ap.sin()).asin();
                let p1 = (rp / r1 * ap.sin()).asin();

                da0 -= p0 * 2.0;
                if da0 > EPSILON {
                    a00 += p0 * sign;
                    a10 -= p0 * sign;
                } else {
                    da0 = 0.0;
                    a00 = (a0 + a1) / 2.0;
                    a10 = a00;
                }

                da1 -= p1 * 2.0;
                if da1 > EPSILON {
                    a01 += p1 * sign;
                    a11 -= p1 * sign;
                } else {
                    da1 = 0.0;
                    a01 = (a0 + a1) / 2.0;
                    a11 = a01;
                }
            }

            path.move_to(r1 * a01.cos(), r1 * a01.sin());
            if da1 > EPSILON {
                path.arc(r1, a01, a11, !cw);
            }

            if !(r0 > EPSILON) || !(da0 > EPSILON) {
                path.line_to(r0 * a10.cos(), r0 * a10.sin());
            } else {
                path.arc(r0, a10, a00, cw);
            }
        }

        path.close();
        path.finish()
    }
}

/// Minimal SVG path writer centered on the origin.
#[derive(Debug, Default)]
struct PathBuilder {
    out: String,
    current: Option<(f64, f64)>,
    subpath_start: Option<(f64, f64)>,
}

impl PathBuilder {
    fn move_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.out, "M{},{}", num(x), num(y));
        self.current = Some((x, y));
        self.subpath_start = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.out, "L{},{}", num(x), num(y));
        self.current = Some((x, y));
    }

    /// Circular arc of radius `r` from angle `a0` to `a1`.
    fn arc(&mut self, r: f64, a0: f64, a1: f64, ccw: bool) {
        let x0 = r * a0.cos();
        let y0 = r * a0.sin();
        let sweep = if ccw { 0 } else { 1 };
        let mut da = if ccw { a0 - a1 } else { a1 - a0 };

        let current = self.current;
        match current {
            None => self.move_to(x0, y0),
            Some((cx, cy)) if (cx - x0).abs() > PATH_EPSILON || (cy - y0).abs() > PATH_EPSILON => {
                self.line_to(x0, y0)
            }
            Some(_) => {}
        }

        if r == 0.0 {
            return;
        }
        if da < 0.0 {
            da = da % TAU + TAU;
        }

        if da > TAU - PATH_EPSILON {
            // Two half arcs; a single arc cannot end where it starts.
            let r = num(r);
            let _ = write!(
                self.out,
                "A{r},{r},0,1,{sweep},{},{}A{r},{r},0,1,{sweep},{},{}",
                num(-x0),
                num(-y0),
                num(x0),
                num(y0),
            );
            self.current = Some((x0, y0));
        } else if da > PATH_EPSILON {
            let x1 = r * a1.cos();
            let y1 = r * a1.sin();
            let large = if da >= PI { 1 } else { 0 };
            let _ = write!(
                self.out,
                "A{},{},0,{large},{sweep},{},{}",
                num(r),
                num(r),
                num(x1),
                num(y1)
            );
            self.current = Some((x1, y1));
        }
    }

    fn close(&mut self) {
        if self.current.is_some() {
            self.out.push('Z');
            self.current = self.subpath_start;
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 || !rounded.is_finite() {
        return "0".to_string();
    }
    let text = format!("{:.3}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
