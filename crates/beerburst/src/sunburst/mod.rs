//! Zoomable radial partition chart
//!
//! A [`Sunburst`] lays out a [`Hierarchy`] once, then keeps a side table of
//! [`ArcView`]s keyed by [`HierarchyId`]. Clicks retarget every arc relative
//! to the clicked node and start a [`Transition`]; the caller advances the
//! transition with elapsed time and renders the current state.
//!
//! ```text
//! click(p) → target per arc → advance(dt)… → current per arc → to_svg()
//! ```

mod state;
mod svg;

use state::Fade;
pub use state::{ArcView, Transition};

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::color::{OrdinalScale, Rgb};
use crate::config::SunburstConfig;
use crate::error::{BeerburstError, Result};
use crate::hierarchy::{Hierarchy, HierarchyId};
use crate::layout::arc::num;
use crate::layout::{ArcGenerator, Eased, Extent, Interpolate, Layout, Partition};
use crate::taxonomy::Taxonomy;

/// Result of a click on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomOutcome {
    /// Every arc was retargeted around `focus`; the center circle now
    /// stands for `center`.
    Zoomed {
        /// The clicked node, now filling the full circle
        focus: HierarchyId,
        /// Node the center circle zooms out to
        center: HierarchyId,
    },

    /// The clicked arc is a leaf and does not respond to clicks.
    Ignored,
}

/// Everything needed to draw one arc and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSnapshot {
    /// Node drawn by this arc
    pub id: HierarchyId,
    /// Label text
    pub name: String,
    /// SVG path data
    pub path: String,
    /// Branch color
    pub fill: Option<Rgb>,
    /// Arc fill opacity
    pub fill_opacity: f64,
    /// Whether the arc responds to clicks
    pub clickable: bool,
    /// Tooltip text
    pub title: String,
    /// Label fill opacity
    pub label_opacity: f64,
    /// Label SVG transform
    pub label_transform: String,
}

/// Interactive sunburst over a weighted hierarchy.
pub struct Sunburst {
    config: SunburstConfig,
    hierarchy: Hierarchy,
    layout: Vec<Extent>,
    views: Vec<ArcView>,
    fades: Vec<Fade>,
    colors: Vec<Option<Rgb>>,
    focus: HierarchyId,
    center: HierarchyId,
    interpolator: Box<dyn Interpolate>,
    transition: Option<Transition>,
}

impl fmt::Debug for Sunburst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sunburst")
            .field("nodes", &self.hierarchy.len())
            .field("focus", &self.focus)
            .field("center", &self.center)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

impl Sunburst {
    /// Chart with the stock [`Partition`] layout and [`Eased`] interpolation.
    pub fn new(hierarchy: Hierarchy, config: SunburstConfig) -> Self {
        Self::with_parts(hierarchy, config, &Partition::default(), Box::new(Eased::default()))
    }

    /// Reshape a taxonomy under `config.root_label` and chart it.
    pub fn from_taxonomy(taxonomy: &Taxonomy, config: SunburstConfig) -> Self {
        let hierarchy = Hierarchy::from_taxonomy(taxonomy, &config.root_label);
        Self::new(hierarchy, config)
    }

    /// Chart with explicit layout and interpolation capabilities.
    pub fn with_parts(
        hierarchy: Hierarchy,
        config: SunburstConfig,
        layout: &dyn Layout,
        interpolator: Box<dyn Interpolate>,
    ) -> Self {
        let layout = layout.layout(&hierarchy);
        let views = layout.iter().copied().map(ArcView::at_rest).collect();
        let fades = vec![Fade::default(); layout.len()];
        let colors = branch_colors(&hierarchy);
        let root = hierarchy.root();
        Self {
            config,
            hierarchy,
            layout,
            views,
            fades,
            colors,
            focus: root,
            center: root,
            interpolator,
            transition: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Clicks
    // ═══════════════════════════════════════════════════════════════════

    /// Click the arc of `id`. Leaf arcs are inert.
    pub fn click(&mut self, id: HierarchyId) -> ZoomOutcome {
        if !self.hierarchy.get(id).has_children() {
            debug!(node = %self.hierarchy.get(id).name, "ignoring click on leaf arc");
            return ZoomOutcome::Ignored;
        }
        self.zoom_to(id)
    }

    /// Click the arc of the first node named `name`.
    pub fn click_name(&mut self, name: &str) -> Result<ZoomOutcome> {
        let id = self
            .hierarchy
            .find(name)
            .ok_or_else(|| BeerburstError::UnknownDescription(name.to_string()))?;
        Ok(self.click(id))
    }

    /// Click the center circle: zoom out to the focus's parent, or stay on
    /// the root when already there.
    pub fn click_center(&mut self) -> ZoomOutcome {
        self.zoom_to(self.center)
    }

    fn zoom_to(&mut self, p: HierarchyId) -> ZoomOutcome {
        let node = self.hierarchy.get(p);
        let center = node.parent.unwrap_or_else(|| self.hierarchy.root());
        let depth = node.depth as f64;
        let pe = self.layout[p.index()];
        let span = pe.angular_width();
        let fraction = |x: f64| ((x - pe.x0) / span).max(0.0).min(1.0) * TAU;

        // Fades start from what is drawn, even mid-transition.
        let fades: Vec<Fade> = self
            .hierarchy
            .ids()
            .map(|id| Fade {
                fill: self.arc_opacity(id),
                label: self.label_opacity(id),
            })
            .collect();
        self.fades = fades;

        for (view, d) in self.views.iter_mut().zip(&self.layout) {
            view.retarget(Extent {
                x0: fraction(d.x0),
                x1: fraction(d.x1),
                y0: (d.y0 - depth).max(0.0),
                y1: (d.y1 - depth).max(0.0),
            });
        }

        debug!(
            focus = %node.name,
            center = %self.hierarchy.get(center).name,
            "zooming sunburst"
        );
        self.focus = p;
        self.center = center;
        self.transition = Some(Transition::new(self.config.duration));
        ZoomOutcome::Zoomed { focus: p, center }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Animation
    // ═══════════════════════════════════════════════════════════════════

    /// Advance the running transition by `dt`. Returns whether it is still
    /// running afterwards.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        let t = transition.advance(dt);
        let done = t >= 1.0;
        for view in &mut self.views {
            view.current = if done {
                view.target
            } else {
                self.interpolator.interpolate(&view.start, &view.target, t)
            };
        }
        if done {
            self.transition = None;
            return false;
        }
        true
    }

    /// Jump to the end of the running transition.
    pub fn finish(&mut self) {
        if let Some(transition) = self.transition {
            self.advance(transition.remaining());
        }
    }

    /// Whether a transition is running.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Linear progress of the running transition (1 when idle).
    pub fn progress(&self) -> f64 {
        self.transition.map_or(1.0, |t| t.progress())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// The chart configuration.
    pub fn config(&self) -> &SunburstConfig {
        &self.config
    }

    /// The charted hierarchy.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Extent assigned by the layout, before any zoom.
    pub fn layout_extent(&self, id: HierarchyId) -> Extent {
        self.layout[id.index()]
    }

    /// View state of `id`.
    pub fn view(&self, id: HierarchyId) -> &ArcView {
        &self.views[id.index()]
    }

    /// Extent drawn right now.
    pub fn current(&self, id: HierarchyId) -> Extent {
        self.view(id).current
    }

    /// Extent at the end of the running (or last) transition.
    pub fn target(&self, id: HierarchyId) -> Extent {
        self.view(id).target
    }

    /// Node filling the full circle.
    pub fn focus(&self) -> HierarchyId {
        self.focus
    }

    /// Node the center circle zooms out to.
    pub fn center(&self) -> HierarchyId {
        self.center
    }

    /// Branch color of `id` (`None` for the root).
    pub fn color(&self, id: HierarchyId) -> Option<Rgb> {
        self.colors[id.index()]
    }

    /// Arc fill opacity, eased across a running transition.
    pub fn arc_opacity(&self, id: HierarchyId) -> f64 {
        let has_children = self.hierarchy.get(id).has_children();
        let view = self.view(id);
        match self.transition {
            Some(t) => blend(
                self.fades[id.index()].fill,
                self.config.arc_opacity(&view.target, has_children),
                self.interpolator.ease(t.progress()),
            ),
            None => self.config.arc_opacity(&view.current, has_children),
        }
    }

    /// Label fill opacity, eased across a running transition.
    pub fn label_opacity(&self, id: HierarchyId) -> f64 {
        let view = self.view(id);
        let shown = |e: &Extent| if self.config.label_visible(e) { 1.0 } else { 0.0 };
        match self.transition {
            Some(t) => blend(
                self.fades[id.index()].label,
                shown(&view.target),
                self.interpolator.ease(t.progress()),
            ),
            None => shown(&view.current),
        }
    }

    /// SVG transform placing the label of `id` mid-arc, upright.
    pub fn label_transform(&self, id: HierarchyId) -> String {
        let e = self.current(id);
        let x = (e.x0 + e.x1) / 2.0 * 180.0 / PI;
        let y = (e.y0 + e.y1) / 2.0 * self.config.radius();
        let flip = if x < 180.0 { 0 } else { 180 };
        format!(
            "rotate({}) translate({},0) rotate({})",
            num(x - 90.0),
            num(y),
            flip
        )
    }

    /// Tooltip: the path from the root, then the weight.
    pub fn tooltip(&self, id: HierarchyId) -> String {
        format!(
            "{}\n{}",
            self.hierarchy.path(id),
            format_count(self.hierarchy.get(id).value)
        )
    }

    /// Drawable state of every arc except the root, in pre-order.
    pub fn arcs(&self) -> Vec<ArcSnapshot> {
        let arcs = ArcGenerator::new(self.config.radius());
        self.hierarchy
            .descendants()
            .map(|id| {
                let node = self.hierarchy.get(id);
                ArcSnapshot {
                    id,
                    name: node.name.clone(),
                    path: arcs.path(&self.current(id)),
                    fill: self.color(id),
                    fill_opacity: self.arc_opacity(id),
                    clickable: node.has_children(),
                    title: self.tooltip(id),
                    label_opacity: self.label_opacity(id),
                    label_transform: self.label_transform(id),
                }
            })
            .collect()
    }

    /// Render the current state as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        svg::render(self)
    }
}

fn blend(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Color each node after its top-level branch, assigned in branch order.
fn branch_colors(hierarchy: &Hierarchy) -> Vec<Option<Rgb>> {
    let branches = hierarchy.branches();
    let mut scale = OrdinalScale::rainbow_for(branches.len());
    for &branch in branches {
        scale.color(&hierarchy.get(branch).name);
    }
    hierarchy
        .ids()
        .map(|id| {
            hierarchy
                .branch_of(id)
                .and_then(|b| scale.color(&hierarchy.get(b).name))
        })
        .collect()
}

/// Integer with `,` thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
