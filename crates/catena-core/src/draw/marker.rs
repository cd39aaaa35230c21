//! The shared arrowhead marker.
//!
//! Every arrow path references the marker through
//! `marker-end="url(#arrowhead)"`. References are resolved by identifier, so
//! a document must contain exactly one definition: build it once and insert
//! it once. Building is side-effect free; each call returns a new,
//! structurally identical tree.

use svg::node::element as svg_element;

/// Identifier of the arrowhead marker.
pub const ARROWHEAD_MARKER_ID: &str = "arrowhead";

pub(crate) const ARROWHEAD_MARKER_URL: &str = "url(#arrowhead)";

const MARKER_FILL: &str = "#333";

/// A detached `<defs>` element containing the arrowhead marker.
#[derive(Debug, Clone)]
pub struct MarkerDef {
    definitions: svg_element::Definitions,
}

impl MarkerDef {
    /// Identifier arrows use to reference this marker.
    pub fn id(&self) -> &'static str {
        ARROWHEAD_MARKER_ID
    }

    pub fn definitions(&self) -> &svg_element::Definitions {
        &self.definitions
    }

    /// Consumes the definition, returning the `<defs>` element for insertion.
    pub fn into_definitions(self) -> svg_element::Definitions {
        self.definitions
    }
}

/// Builds the arrowhead marker definition.
///
/// # Examples
///
/// ```
/// use catena_core::draw::build_arrowhead_marker;
///
/// let marker = build_arrowhead_marker();
/// assert_eq!(marker.id(), "arrowhead");
/// assert!(marker.definitions().to_string().contains("<polygon"));
/// ```
pub fn build_arrowhead_marker() -> MarkerDef {
    let polygon = svg_element::Polygon::new()
        .set("points", "0 0, 10 3.5, 0 7")
        .set("fill", MARKER_FILL);

    let marker = svg_element::Marker::new()
        .set("id", ARROWHEAD_MARKER_ID)
        .set("markerWidth", 10)
        .set("markerHeight", 7)
        .set("refX", 9)
        .set("refY", 3.5)
        .set("orient", "auto")
        .add(polygon);

    MarkerDef {
        definitions: svg_element::Definitions::new().add(marker),
    }
}
