//! Standalone HTML page combining both views

use std::fmt::Write;

use crate::list::ListView;
use crate::markup::escape_text;
use crate::sunburst::Sunburst;
use crate::taxonomy::Taxonomy;

/// Render a page with the list on one side and the chart in `#app`.
pub fn render_page(taxonomy: &Taxonomy, list: &ListView, chart: &Sunburst) -> String {
    let title = escape_text(&chart.config().root_label);
    let list_html = list
        .build(taxonomy)
        .map(|l| l.to_html())
        .unwrap_or_default();

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", title);
    out.push_str(
        "<style>\n\
         body { display: flex; font-family: Helvetica, sans-serif; }\n\
         #list { flex: 1; }\n\
         #app { flex: 2; }\n\
         .list-group { list-style: none; padding-left: 1em; }\n\
         .list-group-item { cursor: pointer; }\n\
         </style>\n</head>\n<body>\n",
    );
    let _ = writeln!(out, "<div id=\"list\">{}</div>", list_html);
    let _ = write!(out, "<div id=\"app\">\n{}</div>\n", chart.to_svg());
    out.push_str("</body>\n</html>\n");
    out
}
