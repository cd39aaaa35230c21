//! Stroke definitions.
//!
//! A [`StrokeDefinition`] is the color and width pair shared by arrow paths
//! and node outlines. Apply it to any SVG element with
//! [`apply_stroke!`](crate::apply_stroke!).
//!
//! ```
//! use catena_core::draw::StrokeDefinition;
//! use catena_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("#333").unwrap(), 2.0);
//! let path = svg_element::Path::new().set("d", "M 0 0 L 10 0");
//! let path = catena_core::apply_stroke!(path, &stroke);
//! ```

use crate::color::Color;

/// Color and width of a stroked outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
        }
    }
}

/// Apply `stroke` and `stroke-width` attributes to an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-width", $stroke.width())
    }};
}
