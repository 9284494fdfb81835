//! Sunburst rendering configuration

use std::time::Duration;

use crate::hierarchy::DEFAULT_ROOT_LABEL;
use crate::layout::Extent;

/// Configuration for a [`Sunburst`](crate::Sunburst).
///
/// Passed once at construction; the chart never changes it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SunburstConfig {
    /// Side of the square chart in pixels
    pub width: f64,

    /// Name of the synthetic node holding the forest roots
    pub root_label: String,

    /// Length of a zoom transition
    pub duration: Duration,

    /// Outermost ring that is still drawn
    pub max_ring: f64,

    /// Minimum angular × radial area for a label to be shown
    pub label_min_area: f64,

    /// Fill opacity of visible arcs with children
    pub parent_opacity: f64,

    /// Fill opacity of visible leaf arcs
    pub leaf_opacity: f64,

    /// CSS font shorthand for labels
    pub font: String,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            width: 932.0,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            duration: Duration::from_millis(750),
            max_ring: 3.0,
            label_min_area: 0.03,
            parent_opacity: 0.6,
            leaf_opacity: 0.4,
            font: "12px Helvetica".to_string(),
        }
    }
}

impl SunburstConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with a custom chart width.
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Replace the root label.
    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Replace the transition duration.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Pixels per ring: the chart shows three rings around the center.
    pub fn radius(&self) -> f64 {
        self.width / 6.0
    }

    /// Whether an arc with this extent is drawn.
    pub fn arc_visible(&self, e: &Extent) -> bool {
        e.y1 <= self.max_ring && e.y0 >= 1.0 && e.x1 > e.x0
    }

    /// Whether the label of an arc with this extent is drawn.
    pub fn label_visible(&self, e: &Extent) -> bool {
        e.y1 <= self.max_ring && e.y0 >= 1.0 && e.area() > self.label_min_area
    }

    /// Fill opacity of an arc at rest on `e`.
    pub fn arc_opacity(&self, e: &Extent, has_children: bool) -> f64 {
        match (self.arc_visible(e), has_children) {
            (false, _) => 0.0,
            (true, true) => self.parent_opacity,
            (true, false) => self.leaf_opacity,
        }
    }
}
