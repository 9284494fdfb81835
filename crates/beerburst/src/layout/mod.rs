//! Layout and animation capabilities behind replaceable traits
//!
//! The sunburst never computes geometry itself. It asks a [`Layout`] for one
//! [`Extent`] per hierarchy node, and an [`Interpolate`] for the in-between
//! extents while a zoom transition runs. [`Partition`] and [`Eased`] are the
//! stock implementations; any other layout or easing can be swapped in
//! without touching tree construction or event handling.

pub mod arc;
mod interpolate;
mod partition;

pub use arc::ArcGenerator;
pub use interpolate::{Ease, Eased, Interpolate};
pub use partition::Partition;

use serde::Serialize;

use crate::hierarchy::Hierarchy;

/// Angular range `[x0, x1]` (radians) and radial range `[y0, y1]` (rings).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Extent {
    /// Start angle
    pub x0: f64,
    /// End angle
    pub x1: f64,
    /// Inner ring
    pub y0: f64,
    /// Outer ring
    pub y1: f64,
}

impl Extent {
    /// Create an extent.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// `x1 - x0`
    pub fn angular_width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// `y1 - y0`
    pub fn radial_depth(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Angular width times radial depth.
    pub fn area(&self) -> f64 {
        self.angular_width() * self.radial_depth()
    }

    /// Component-wise linear blend; `t = 0` is `self`, `t = 1` is `to`.
    pub fn lerp(&self, to: &Extent, t: f64) -> Extent {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Extent {
            x0: mix(self.x0, to.x0),
            x1: mix(self.x1, to.x1),
            y0: mix(self.y0, to.y0),
            y1: mix(self.y1, to.y1),
        }
    }
}

/// Assigns an extent to every node of a hierarchy.
pub trait Layout {
    /// Return one extent per node, indexed by [`HierarchyId::index`](crate::HierarchyId::index).
    fn layout(&self, hierarchy: &Hierarchy) -> Vec<Extent>;
}
