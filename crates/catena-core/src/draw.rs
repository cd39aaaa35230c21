//! Diagram construction.
//!
//! Builders in this module turn coordinates and style parameters into
//! detached SVG trees:
//!
//! - [`build_arrow`] - a morphism arrow (straight or curved path plus an
//!   optional label) grouped under one `<g>`
//! - [`build_object_node`] - a category object (circle plus centered label)
//!   positioned by a single group translation
//! - [`build_arrowhead_marker`] - the shared `<defs>` entry every arrow path
//!   references through `marker-end`
//!
//! None of the builders fail. Malformed style input is replaced by defaults
//! during [style merging](ArrowStyle::merged).
mod arrow;
mod label;
mod marker;
mod node;
mod stroke;
mod style;

pub use arrow::{ArrowContainer, ArrowGeometry, build_arrow};
pub use label::{LabelDefinition, LabelPlacement};
pub use marker::{ARROWHEAD_MARKER_ID, MarkerDef, build_arrowhead_marker};
pub use node::{NodeContainer, build_object_node};
pub use stroke::StrokeDefinition;
pub use style::{ArrowStyle, ArrowStyleOverrides, NodeStyle, NodeStyleOverrides};

/// Class list carried by every built arrow group.
pub const ARROW_CLASSES: &str = "diagram-arrow morphism-arrow";

/// Class list carried by every built object node group.
pub const NODE_CLASSES: &str = "category-object diagram-node";

/// Class carried by arrow label text.
pub const LABEL_CLASS: &str = "diagram-label";
