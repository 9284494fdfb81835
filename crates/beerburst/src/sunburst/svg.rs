//! SVG rendering of the current chart state

use std::fmt::Write;

use super::Sunburst;
use crate::layout::arc::num;
use crate::markup::{escape_attr, escape_text};

pub(super) fn render(chart: &Sunburst) -> String {
    let config = chart.config();
    let width = num(config.width);
    let half = num(config.width / 2.0);
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0,0,{width},{width}" width="{width}" height="{width}" style="width: 100%; height: auto; font: {};">"#,
        escape_attr(&config.font)
    );
    let _ = writeln!(out, r#"<g transform="translate({half},{half})">"#);

    let arcs = chart.arcs();

    out.push_str("<g>\n");
    for arc in &arcs {
        let fill = arc
            .fill
            .map(|c| c.to_string())
            .unwrap_or_else(|| "none".to_string());
        let cursor = if arc.clickable {
            r#" style="cursor: pointer;""#
        } else {
            ""
        };
        let _ = writeln!(
            out,
            r#"<path data-node="{}" fill="{}" fill-opacity="{}" d="{}"{}><title>{}</title></path>"#,
            arc.id.index(),
            fill,
            num(arc.fill_opacity),
            arc.path,
            cursor,
            escape_text(&arc.title)
        );
    }
    out.push_str("</g>\n");

    out.push_str(
        r#"<g pointer-events="none" text-anchor="middle" style="user-select: none;">"#,
    );
    out.push('\n');
    for arc in &arcs {
        let _ = writeln!(
            out,
            r#"<text dy="0.35em" fill-opacity="{}" transform="{}">{}</text>"#,
            num(arc.label_opacity),
            arc.label_transform,
            escape_text(&arc.name)
        );
    }
    out.push_str("</g>\n");

    let _ = writeln!(
        out,
        r#"<circle data-node="{}" r="{}" fill="none" pointer-events="all"/>"#,
        chart.center().index(),
        num(config.radius())
    );
    out.push_str("</g>\n</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use crate::{DescriptionRecord, Sunburst, SunburstConfig, Taxonomy};

    #[test]
    fn test_svg_structure() {
        let t = Taxonomy::from_records(&[
            DescriptionRecord::child("IPA", "Ale"),
            DescriptionRecord::child("Märzen & Co", "Lager"),
        ])
        .unwrap();
        let chart = Sunburst::from_taxonomy(&t, SunburstConfig::with_width(600.0));
        let svg = chart.to_svg();

        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0,0,600,600""#));
        assert!(svg.contains(r#"<g transform="translate(300,300)">"#));
        assert_eq!(svg.matches("<path ").count(), 4);
        assert_eq!(svg.matches("<text ").count(), 4);
        assert_eq!(svg.matches(r#"style="cursor: pointer;""#).count(), 2);
        assert!(svg.contains(">Märzen &amp; Co</text>"));
        assert!(svg.contains(r#"<circle data-node="0" r="100""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
