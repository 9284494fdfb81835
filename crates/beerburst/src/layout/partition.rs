//! Adjacency-diagram partition

use std::f64::consts::TAU;

use super::{Extent, Layout};
use crate::hierarchy::Hierarchy;

/// Space-filling partition of a hierarchy into nested bands.
///
/// The root spans the full width; every child receives a slice of its
/// parent's `[x0, x1]` proportional to its value, in sibling order. Each level
/// occupies one band of `height / (root height + 1)`.
///
/// The default size is `[2π, root height + 1]`, which gives angles in radians
/// and one ring per depth level: `y0 = depth`, `y1 = depth + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partition {
    /// Extent of the x axis
    pub width: f64,
    /// Extent of the y axis; `None` means one unit per level
    pub height: Option<f64>,
}

impl Default for Partition {
    fn default() -> Self {
        Self {
            width: TAU,
            height: None,
        }
    }
}

impl Partition {
    /// A partition over an explicit `[width, height]`.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }
}

impl Layout for Partition {
    fn layout(&self, hierarchy: &Hierarchy) -> Vec<Extent> {
        let root = hierarchy.root();
        let levels = (hierarchy.get(root).height + 1) as f64;
        let dy = self.height.unwrap_or(levels);

        let mut extents = vec![Extent::default(); hierarchy.len()];
        extents[root.index()] = Extent::new(0.0, self.width, 0.0, dy / levels);

        // Pre-order storage guarantees a parent is placed before its children.
        for id in hierarchy.ids() {
            let node = hierarchy.get(id);
            if !node.has_children() {
                continue;
            }
            let parent = extents[id.index()];
            let y0 = dy * (node.depth + 1) as f64 / levels;
            let y1 = dy * (node.depth + 2) as f64 / levels;
            let k = if node.value > 0 {
                parent.angular_width() / node.value as f64
            } else {
                0.0
            };

            let mut x = parent.x0;
            for &child in &node.children {
                let x0 = x;
                x += hierarchy.get(child).value as f64 * k;
                extents[child.index()] = Extent::new(x0, x, y0, y1);
            }
        }
        extents
    }
}
