//! # Beerburst
//!
//! Builds a taxonomy of beer style descriptions from flat `{name, parent}`
//! records and presents it two ways: a zoomable radial partition
//! ("sunburst") chart and a collapsible nested list.
//!
//! ## Architecture
//!
//! - **Records**: the JSON input, one `{name, parent?}` object per description
//! - **Taxonomy**: arena of descriptions with a flat name index and a root set
//! - **Hierarchy**: the forest under a synthetic root, weighted and sorted
//! - **Layout**: replaceable partition and interpolation capabilities
//! - **Views**: list expansion and sunburst zoom state, kept in side tables
//!   keyed by node id and rendered to HTML and SVG
//!
//! ```
//! use beerburst::{parse_records, Sunburst, SunburstConfig, Taxonomy};
//!
//! let records = parse_records(r#"[
//!     {"name": "IPA", "parent": "Ale"},
//!     {"name": "Stout", "parent": "Ale"}
//! ]"#).unwrap();
//! let taxonomy = Taxonomy::from_records(&records).unwrap();
//!
//! let mut chart = Sunburst::from_taxonomy(&taxonomy, SunburstConfig::default());
//! chart.click_name("Ale").unwrap();
//! chart.finish();
//! assert!(chart.to_svg().contains("<title>Beer Descriptions/Ale/IPA\n1</title>"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod list;
pub mod markup;
pub mod page;
pub mod record;
pub mod sunburst;
pub mod taxonomy;

// Re-export main types
pub use color::{OrdinalScale, Rgb};
pub use config::SunburstConfig;
pub use error::{BeerburstError, Result};
pub use hierarchy::{Hierarchy, HierarchyData, HierarchyId, HierarchyNode, DEFAULT_ROOT_LABEL};
pub use layout::{ArcGenerator, Ease, Eased, Extent, Interpolate, Layout, Partition};
pub use list::{ListElement, ListItem, ListView, Toggle};
pub use page::render_page;
pub use record::{load_records, parse_records, read_records, DescriptionRecord};
pub use sunburst::{format_count, ArcSnapshot, ArcView, Sunburst, Transition, ZoomOutcome};
pub use taxonomy::{Description, DescriptionId, ParentPolicy, Taxonomy, TaxonomyBuilder};

/// Beerburst version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
