//! Sunburst zoom and rendering tests

use std::f64::consts::TAU;
use std::time::Duration;

use beerburst::*;
use pretty_assertions::assert_eq;

fn taxonomy() -> Taxonomy {
    Taxonomy::from_records(&[
        DescriptionRecord::child("Pale Ale", "Ale"),
        DescriptionRecord::child("IPA", "Pale Ale"),
        DescriptionRecord::child("APA", "Pale Ale"),
        DescriptionRecord::child("Stout", "Ale"),
        DescriptionRecord::child("Pilsner", "Lager"),
        DescriptionRecord::child("Helles", "Lager"),
        DescriptionRecord::root("Cider"),
    ])
    .unwrap()
}

fn chart() -> Sunburst {
    Sunburst::from_taxonomy(&taxonomy(), SunburstConfig::default())
}

fn id(chart: &Sunburst, name: &str) -> HierarchyId {
    chart.hierarchy().find(name).unwrap()
}

fn targets(chart: &Sunburst) -> Vec<Extent> {
    chart
        .hierarchy()
        .ids()
        .map(|id| chart.target(id))
        .collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ═══════════════════════════════════════════════════════════════════════
// Initial State
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_initial_views_rest_on_layout() {
    let chart = chart();
    for id in chart.hierarchy().ids() {
        let view = chart.view(id);
        assert_eq!(view.current, chart.layout_extent(id));
        assert_eq!(view.target, chart.layout_extent(id));
    }
    assert_eq!(chart.focus(), chart.hierarchy().root());
    assert_eq!(chart.center(), chart.hierarchy().root());
    assert!(!chart.is_animating());
}

#[test]
fn test_only_first_two_rings_are_visible() {
    let chart = chart();
    let config = chart.config();
    assert!(config.arc_visible(&chart.current(id(&chart, "Ale"))));
    assert!(config.arc_visible(&chart.current(id(&chart, "Pale Ale"))));
    assert!(!config.arc_visible(&chart.current(id(&chart, "IPA"))));
    assert_eq!(chart.arc_opacity(id(&chart, "Ale")), 0.6);
    assert_eq!(chart.arc_opacity(id(&chart, "Stout")), 0.4);
    assert_eq!(chart.arc_opacity(id(&chart, "IPA")), 0.0);
}

#[test]
fn test_descendants_share_branch_color() {
    let chart = chart();
    let ale = chart.color(id(&chart, "Ale"));
    assert!(ale.is_some());
    assert_eq!(chart.color(id(&chart, "IPA")), ale);
    assert_eq!(chart.color(id(&chart, "Stout")), ale);
    assert_ne!(chart.color(id(&chart, "Lager")), ale);
    assert_eq!(chart.color(chart.hierarchy().root()), None);

    // Branches take the palette in order: Ale is the heaviest.
    assert_eq!(ale, Some(color::rainbow(0.0)));
}

#[test]
fn test_tooltip_has_path_and_weight() {
    let chart = chart();
    assert_eq!(
        chart.tooltip(id(&chart, "Pale Ale")),
        "Beer Descriptions/Ale/Pale Ale\n2"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Zooming
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_click_branch_fills_circle() {
    let mut chart = chart();
    let ale = id(&chart, "Ale");
    let outcome = chart.click(ale);
    assert_eq!(
        outcome,
        ZoomOutcome::Zoomed {
            focus: ale,
            center: chart.hierarchy().root()
        }
    );

    let target = chart.target(ale);
    assert!(close(target.x0, 0.0));
    assert!(close(target.x1, TAU));
    assert_eq!((target.y0, target.y1), (0.0, 1.0));

    let pale = chart.target(id(&chart, "Pale Ale"));
    assert_eq!((pale.y0, pale.y1), (1.0, 2.0));
    assert!(close(pale.angular_width(), TAU * 2.0 / 3.0));

    // Outside the focus collapses to zero width.
    let lager = chart.target(id(&chart, "Lager"));
    assert!(close(lager.x0, TAU));
    assert!(close(lager.x1, TAU));
    assert!(!chart.config().arc_visible(&lager));
}

#[test]
fn test_click_leaf_is_inert() {
    let mut chart = chart();
    let before = targets(&chart);
    assert_eq!(chart.click(id(&chart, "Cider")), ZoomOutcome::Ignored);
    assert_eq!(targets(&chart), before);
    assert!(!chart.is_animating());

    chart.click(id(&chart, "Ale"));
    chart.finish();
    let zoomed = targets(&chart);
    assert_eq!(chart.click(id(&chart, "IPA")), ZoomOutcome::Ignored);
    assert_eq!(targets(&chart), zoomed);
}

#[test]
fn test_center_click_at_root_retargets_root() {
    let mut chart = chart();
    let before = targets(&chart);
    let root = chart.hierarchy().root();
    assert_eq!(
        chart.click_center(),
        ZoomOutcome::Zoomed {
            focus: root,
            center: root
        }
    );
    chart.finish();
    for (id, extent) in chart.hierarchy().ids().zip(before) {
        let target = chart.target(id);
        assert!(close(target.x0, extent.x0), "{:?}", id);
        assert!(close(target.x1, extent.x1), "{:?}", id);
        assert_eq!((target.y0, target.y1), (extent.y0, extent.y1));
    }
}

#[test]
fn test_center_click_zooms_out_one_level() {
    let mut chart = chart();
    chart.click_name("Ale").unwrap();
    chart.finish();
    chart.click_name("Pale Ale").unwrap();
    chart.finish();
    assert_eq!(chart.center(), id(&chart, "Ale"));

    chart.click_center();
    chart.finish();
    assert_eq!(chart.focus(), id(&chart, "Ale"));
    assert_eq!(chart.center(), chart.hierarchy().root());
    let ale = chart.current(id(&chart, "Ale"));
    assert!(close(ale.angular_width(), TAU));
}

#[test]
fn test_click_unknown_name() {
    let mut chart = chart();
    assert!(matches!(
        chart.click_name("Porter"),
        Err(BeerburstError::UnknownDescription(_))
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Transitions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_advance_moves_current_towards_target() {
    let mut chart = chart();
    let lager = id(&chart, "Lager");
    let start = chart.current(lager);
    chart.click_name("Ale").unwrap();

    assert!(chart.advance(Duration::from_millis(375)));
    let mid = chart.current(lager);
    assert!(mid.x0 > start.x0 && mid.x0 < TAU);
    assert!(close(chart.progress(), 0.5));

    assert!(!chart.advance(Duration::from_millis(375)));
    assert!(!chart.is_animating());
    assert_eq!(chart.current(lager), chart.target(lager));
}

#[test]
fn test_interrupted_transition_starts_from_drawn_geometry() {
    let mut chart = chart();
    let lager = id(&chart, "Lager");
    chart.click_name("Ale").unwrap();
    chart.advance(Duration::from_millis(300));
    let drawn = chart.current(lager);

    chart.click_center();
    assert_eq!(chart.view(lager).start, drawn);
    assert_eq!(chart.current(lager), drawn);
    assert_eq!(chart.progress(), 0.0);

    chart.finish();
    let expected = chart.layout_extent(lager);
    let current = chart.current(lager);
    assert!(close(current.x0, expected.x0));
    assert!(close(current.x1, expected.x1));
}

#[test]
fn test_opacity_blends_during_transition() {
    let mut chart = chart();
    let ipa = id(&chart, "IPA");
    chart.click_name("Ale").unwrap();
    assert_eq!(chart.arc_opacity(ipa), 0.0);
    chart.advance(Duration::from_millis(375));
    assert!(close(chart.arc_opacity(ipa), 0.2));
    chart.finish();
    assert_eq!(chart.arc_opacity(ipa), 0.4);
}

#[test]
fn test_opacity_follows_eased_clock() {
    let mut chart = chart();
    let ipa = id(&chart, "IPA");
    chart.click_name("Ale").unwrap();
    chart.advance(Duration::from_micros(187_500));
    assert!(close(chart.progress(), 0.25));
    // Cubic in-out at a quarter of the way is 0.0625.
    assert!(close(chart.arc_opacity(ipa), 0.4 * 0.0625));
}

#[test]
fn test_interrupted_fade_starts_from_drawn_opacity() {
    let mut chart = chart();
    let ipa = id(&chart, "IPA");
    chart.click_name("Ale").unwrap();
    chart.advance(Duration::from_millis(375));
    let drawn = chart.arc_opacity(ipa);
    assert!(close(drawn, 0.2));

    chart.click_center();
    assert!(close(chart.arc_opacity(ipa), drawn));
    chart.finish();
    assert_eq!(chart.arc_opacity(ipa), 0.0);
}

#[test]
fn test_zero_duration_finishes_on_first_advance() {
    let config = SunburstConfig::default().duration(Duration::ZERO);
    let mut chart = Sunburst::from_taxonomy(&taxonomy(), config);
    chart.click_name("Lager").unwrap();
    assert!(!chart.advance(Duration::ZERO));
    let lager = id(&chart, "Lager");
    assert_eq!(chart.current(lager), chart.target(lager));
}

// ═══════════════════════════════════════════════════════════════════════
// Shared Descriptions
// ═══════════════════════════════════════════════════════════════════════

/// `S` sits under both `A` and `B`.
fn shared_chart() -> Sunburst {
    let t = Taxonomy::from_records(&[
        DescriptionRecord::child("S", "A"),
        DescriptionRecord::child("S", "B"),
        DescriptionRecord::child("X", "S"),
    ])
    .unwrap();
    Sunburst::from_taxonomy(&t, SunburstConfig::default())
}

#[test]
fn test_shared_description_gets_an_arc_per_parent() {
    let chart = shared_chart();
    let arcs = chart.arcs();
    let titles: Vec<_> = arcs
        .iter()
        .filter(|arc| arc.name == "S")
        .map(|arc| arc.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Beer Descriptions/A/S\n1", "Beer Descriptions/B/S\n1"]
    );
    assert_eq!(arcs.len(), 6);
    assert_eq!(chart.hierarchy().get(chart.hierarchy().root()).value, 2);
}

#[test]
fn test_click_name_on_shared_description_uses_first_arc() {
    let mut chart = shared_chart();
    let outcome = chart.click_name("S").unwrap();
    let first = id(&chart, "S");
    assert_eq!(
        outcome,
        ZoomOutcome::Zoomed {
            focus: first,
            center: id(&chart, "A")
        }
    );
    chart.finish();

    let copies: Vec<_> = chart
        .hierarchy()
        .ids()
        .filter(|&node| chart.hierarchy().get(node).name == "S")
        .collect();
    assert_eq!(copies.len(), 2);
    assert!(close(chart.current(copies[0]).angular_width(), TAU));
    assert!(close(chart.current(copies[1]).angular_width(), 0.0));
}

// ═══════════════════════════════════════════════════════════════════════
// Deep Inputs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_deep_chain_charts_without_recursion() {
    let records: Vec<_> = (1..2500)
        .map(|i| DescriptionRecord::child(format!("n{}", i), format!("n{}", i - 1)))
        .collect();
    let t = Taxonomy::from_records(&records).unwrap();
    let mut chart = Sunburst::from_taxonomy(&t, SunburstConfig::default());

    let hierarchy = chart.hierarchy();
    assert_eq!(hierarchy.len(), 2501);
    let root = hierarchy.get(hierarchy.root());
    assert_eq!((root.value, root.height), (1, 2500));
    let deepest = hierarchy.find("n2499").unwrap();
    assert_eq!(hierarchy.get(deepest).depth, 2500);

    chart.click_name("n1").unwrap();
    chart.finish();
    let n2 = chart.current(id(&chart, "n2"));
    assert_eq!((n2.y0, n2.y1), (1.0, 2.0));
}

// ═══════════════════════════════════════════════════════════════════════
// Replaceable Capabilities
// ═══════════════════════════════════════════════════════════════════════

/// Gives every node the full circle on its own ring.
struct Rings;

impl Layout for Rings {
    fn layout(&self, hierarchy: &Hierarchy) -> Vec<Extent> {
        hierarchy
            .ids()
            .map(|id| {
                let depth = hierarchy.get(id).depth as f64;
                Extent::new(0.0, TAU, depth, depth + 1.0)
            })
            .collect()
    }
}

/// Jumps straight to the target.
struct Snap;

impl Interpolate for Snap {
    fn interpolate(&self, _from: &Extent, to: &Extent, _t: f64) -> Extent {
        *to
    }
}

#[test]
fn test_custom_layout_and_interpolator() {
    let hierarchy = Hierarchy::from_taxonomy(&taxonomy(), "Styles");
    let mut chart =
        Sunburst::with_parts(hierarchy, SunburstConfig::default(), &Rings, Box::new(Snap));
    let ipa = id(&chart, "IPA");
    assert_eq!(chart.current(ipa), Extent::new(0.0, TAU, 3.0, 4.0));

    chart.click_name("Pale Ale").unwrap();
    chart.advance(Duration::from_millis(1));
    assert_eq!(chart.current(ipa), Extent::new(0.0, TAU, 1.0, 2.0));
}

// ═══════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_arcs_skip_root() {
    let chart = chart();
    let arcs = chart.arcs();
    assert_eq!(arcs.len(), chart.hierarchy().len() - 1);
    assert!(arcs.iter().all(|arc| arc.id != chart.hierarchy().root()));
    let clickable: Vec<_> = arcs
        .iter()
        .filter(|arc| arc.clickable)
        .map(|arc| arc.name.as_str())
        .collect();
    assert_eq!(clickable, vec!["Ale", "Pale Ale", "Lager"]);
}

#[test]
fn test_label_visibility_and_transform() {
    let chart = chart();
    let arcs = chart.arcs();
    let ale = arcs.iter().find(|arc| arc.name == "Ale").unwrap();
    assert_eq!(ale.label_opacity, 1.0);
    assert!(ale.label_transform.starts_with("rotate("));
    assert!(ale.label_transform.contains("translate(233,0)"));

    let ipa = arcs.iter().find(|arc| arc.name == "IPA").unwrap();
    assert_eq!(ipa.label_opacity, 0.0);
}

#[test]
fn test_svg_after_zoom_shows_deeper_ring() {
    let mut chart = chart();
    let before = chart.to_svg();
    chart.click_name("Ale").unwrap();
    chart.finish();
    let after = chart.to_svg();
    assert_ne!(before, after);
    let center = format!(r#"<circle data-node="{}""#, chart.hierarchy().root().index());
    assert!(after.contains(&center));
}

#[test]
fn test_hierarchy_json_roundtrips_through_serde_value() {
    let data = HierarchyData::from_taxonomy(&taxonomy(), DEFAULT_ROOT_LABEL);
    let value: serde_json::Value = serde_json::from_str(&data.to_json().unwrap()).unwrap();
    assert_eq!(value["name"], "Beer Descriptions");
    assert_eq!(value["children"].as_array().unwrap().len(), 3);
}
