//! Style defaults and per-field overrides.
//!
//! Every builder takes a fully resolved style. Callers start from the
//! defaults and layer an override set on top with [`ArrowStyle::merged`] or
//! [`NodeStyle::merged`]. Precedence is per field: an override replaces the
//! default only for the fields it sets, everything else keeps its default.
//!
//! Override values that cannot be used (a non-finite number, an unparsable
//! color) are dropped with a warning and the default is kept instead.
//! Configuration layers that prefer to reject bad colors up front call
//! [`ArrowStyleOverrides::validate`] and [`NodeStyleOverrides::validate`].
//!
//! # Default Values
//!
//! | Arrow field | Default | Node field | Default |
//! |-------------|---------|------------|---------|
//! | stroke color | `#333` | radius | `25` |
//! | stroke width | `2` | fill color | `#fff` |
//! | arrow head size | `8` | stroke color | `#6366f1` |
//! | label offset | `10` | stroke width | `2` |
//! | curved | `false` | font size | `16` |
//! | curvature | `0.2` | | |

use log::warn;
use serde::Deserialize;

use crate::{Error, color::Color, draw::StrokeDefinition};

const DEFAULT_ARROW_STROKE: &str = "#333";
const DEFAULT_NODE_FILL: &str = "#fff";
const DEFAULT_NODE_STROKE: &str = "#6366f1";

fn default_color(css: &str) -> Color {
    Color::new(css).expect("built-in default colors are valid CSS colors")
}

fn merge_number(field: &'static str, value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(value) if value.is_finite() => value,
        Some(value) => {
            warn!(field, value; "Ignoring non-finite style override");
            default
        }
        None => default,
    }
}

fn merge_color(field: &'static str, value: Option<&str>, default: Color) -> Color {
    match value.map(Color::new) {
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            warn!(field, err:%; "Ignoring invalid color override");
            default
        }
        None => default,
    }
}

fn check_color(value: Option<&str>) -> Result<(), Error> {
    value.map_or(Ok(()), |css| Color::new(css).map(|_| ()))
}

/// Resolved visual properties of a morphism arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    stroke: StrokeDefinition,
    arrow_head_size: f32,
    label_offset: f32,
    curved: bool,
    curvature: f32,
}

impl ArrowStyle {
    /// Returns the default style with `overrides` applied field by field.
    ///
    /// # Examples
    ///
    /// ```
    /// use catena_core::draw::{ArrowStyle, ArrowStyleOverrides};
    ///
    /// let style = ArrowStyle::merged(&ArrowStyleOverrides::new().with_stroke_width(4.0));
    /// assert_eq!(style.stroke().width(), 4.0);
    /// assert_eq!(style.label_offset(), 10.0);
    /// ```
    pub fn merged(overrides: &ArrowStyleOverrides) -> Self {
        Self::default().merge(overrides)
    }

    /// Applies `overrides` on top of this style.
    pub fn merge(self, overrides: &ArrowStyleOverrides) -> Self {
        let stroke = StrokeDefinition::new(
            merge_color(
                "stroke_color",
                overrides.stroke_color.as_deref(),
                self.stroke.color(),
            ),
            merge_number("stroke_width", overrides.stroke_width, self.stroke.width()),
        );

        Self {
            stroke,
            arrow_head_size: merge_number(
                "arrow_head_size",
                overrides.arrow_head_size,
                self.arrow_head_size,
            ),
            label_offset: merge_number("label_offset", overrides.label_offset, self.label_offset),
            curved: overrides.curved.unwrap_or(self.curved),
            curvature: merge_number("curvature", overrides.curvature, self.curvature),
        }
    }

    /// Returns the stroke used for the arrow path.
    pub fn stroke(&self) -> StrokeDefinition {
        self.stroke
    }

    /// Returns the arrow head size.
    ///
    /// All arrows share one marker definition, so this is informational for
    /// hosts that size their own markers.
    pub fn arrow_head_size(&self) -> f32 {
        self.arrow_head_size
    }

    /// Perpendicular distance between the chord midpoint and the label.
    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    /// Whether the path is a quadratic curve rather than a straight segment.
    pub fn curved(&self) -> bool {
        self.curved
    }

    /// Control point displacement as a fraction of the chord length.
    /// Ignored when [`curved`](Self::curved) is false.
    pub fn curvature(&self) -> f32 {
        self.curvature
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeDefinition::new(default_color(DEFAULT_ARROW_STROKE), 2.0),
            arrow_head_size: 8.0,
            label_offset: 10.0,
            curved: false,
            curvature: 0.2,
        }
    }
}

/// Optional per-field replacements for [`ArrowStyle`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrowStyleOverrides {
    stroke_color: Option<String>,
    stroke_width: Option<f32>,
    arrow_head_size: Option<f32>,
    label_offset: Option<f32>,
    curved: Option<bool>,
    curvature: Option<f32>,
}

impl ArrowStyleOverrides {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_arrow_head_size(mut self, size: f32) -> Self {
        self.arrow_head_size = Some(size);
        self
    }

    pub fn with_label_offset(mut self, offset: f32) -> Self {
        self.label_offset = Some(offset);
        self
    }

    pub fn with_curved(mut self, curved: bool) -> Self {
        self.curved = Some(curved);
        self
    }

    pub fn with_curvature(mut self, curvature: f32) -> Self {
        self.curvature = Some(curvature);
        self
    }

    /// Checks that every color override parses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for the first unparsable color.
    pub fn validate(&self) -> Result<(), Error> {
        check_color(self.stroke_color.as_deref())
    }

    /// Overlays `other` on top of `self`; fields set in `other` win.
    pub fn layered(mut self, other: &ArrowStyleOverrides) -> Self {
        if other.stroke_color.is_some() {
            self.stroke_color = other.stroke_color.clone();
        }
        self.stroke_width = other.stroke_width.or(self.stroke_width);
        self.arrow_head_size = other.arrow_head_size.or(self.arrow_head_size);
        self.label_offset = other.label_offset.or(self.label_offset);
        self.curved = other.curved.or(self.curved);
        self.curvature = other.curvature.or(self.curvature);
        self
    }
}

/// Resolved visual properties of a category object node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    radius: f32,
    fill_color: Color,
    stroke: StrokeDefinition,
    font_size: f32,
}

impl NodeStyle {
    /// Returns the default style with `overrides` applied field by field.
    pub fn merged(overrides: &NodeStyleOverrides) -> Self {
        Self::default().merge(overrides)
    }

    /// Applies `overrides` on top of this style.
    pub fn merge(self, overrides: &NodeStyleOverrides) -> Self {
        Self {
            radius: merge_number("radius", overrides.radius, self.radius),
            fill_color: merge_color(
                "fill_color",
                overrides.fill_color.as_deref(),
                self.fill_color,
            ),
            stroke: StrokeDefinition::new(
                merge_color(
                    "stroke_color",
                    overrides.stroke_color.as_deref(),
                    self.stroke.color(),
                ),
                merge_number("stroke_width", overrides.stroke_width, self.stroke.width()),
            ),
            font_size: merge_number("font_size", overrides.font_size, self.font_size),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke(&self) -> StrokeDefinition {
        self.stroke
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            radius: 25.0,
            fill_color: default_color(DEFAULT_NODE_FILL),
            stroke: StrokeDefinition::new(default_color(DEFAULT_NODE_STROKE), 2.0),
            font_size: 16.0,
        }
    }
}

/// Optional per-field replacements for [`NodeStyle`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeStyleOverrides {
    radius: Option<f32>,
    fill_color: Option<String>,
    stroke_color: Option<String>,
    stroke_width: Option<f32>,
    font_size: Option<f32>,
}

impl NodeStyleOverrides {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Checks that every color override parses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for the first unparsable color.
    pub fn validate(&self) -> Result<(), Error> {
        check_color(self.fill_color.as_deref())?;
        check_color(self.stroke_color.as_deref())
    }

    /// Overlays `other` on top of `self`; fields set in `other` win.
    pub fn layered(mut self, other: &NodeStyleOverrides) -> Self {
        self.radius = other.radius.or(self.radius);
        if other.fill_color.is_some() {
            self.fill_color = other.fill_color.clone();
        }
        if other.stroke_color.is_some() {
            self.stroke_color = other.stroke_color.clone();
        }
        self.stroke_width = other.stroke_width.or(self.stroke_width);
        self.font_size = other.font_size.or(self.font_size);
        self
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_arrow_defaults() {
        let style = ArrowStyle::default();

        assert_eq!(style.stroke().color(), Color::new("#333").unwrap());
        assert_approx_eq!(f32, style.stroke().width(), 2.0);
        assert_approx_eq!(f32, style.arrow_head_size(), 8.0);
        assert_approx_eq!(f32, style.label_offset(), 10.0);
        assert!(!style.curved());
        assert_approx_eq!(f32, style.curvature(), 0.2);
    }

    #[test]
    fn test_arrow_merge_is_per_field() {
        let overrides = ArrowStyleOverrides::new()
            .with_stroke_color("red")
            .with_curved(true);
        let style = ArrowStyle::merged(&overrides);

        assert_eq!(style.stroke().color(), Color::new("red").unwrap());
        assert!(style.curved());
        // Untouched fields keep their defaults
        assert_approx_eq!(f32, style.stroke().width(), 2.0);
        assert_approx_eq!(f32, style.curvature(), 0.2);
        assert_approx_eq!(f32, style.label_offset(), 10.0);
    }

    #[test]
    fn test_arrow_merge_ignores_malformed_values() {
        let overrides = ArrowStyleOverrides::new()
            .with_stroke_color("definitely not a color")
            .with_stroke_width(f32::NAN)
            .with_label_offset(f32::INFINITY)
            .with_curvature(0.5);
        let style = ArrowStyle::merged(&overrides);

        assert_eq!(style.stroke().color(), Color::new("#333").unwrap());
        assert_approx_eq!(f32, style.stroke().width(), 2.0);
        assert_approx_eq!(f32, style.label_offset(), 10.0);
        assert_approx_eq!(f32, style.curvature(), 0.5);
    }

    #[test]
    fn test_arrow_overrides_layered() {
        let base = ArrowStyleOverrides::new()
            .with_stroke_width(3.0)
            .with_stroke_color("blue");
        let top = ArrowStyleOverrides::new().with_stroke_color("green");

        let style = ArrowStyle::merged(&base.layered(&top));
        assert_eq!(style.stroke().color(), Color::new("green").unwrap());
        assert_approx_eq!(f32, style.stroke().width(), 3.0);
    }

    #[test]
    fn test_node_defaults() {
        let style = NodeStyle::default();

        assert_approx_eq!(f32, style.radius(), 25.0);
        assert_eq!(style.fill_color(), Color::new("#fff").unwrap());
        assert_eq!(style.stroke().color(), Color::new("#6366f1").unwrap());
        assert_approx_eq!(f32, style.stroke().width(), 2.0);
        assert_approx_eq!(f32, style.font_size(), 16.0);
    }

    #[test]
    fn test_node_merge_is_per_field() {
        let style = NodeStyle::merged(
            &NodeStyleOverrides::new()
                .with_radius(40.0)
                .with_font_size(f32::NEG_INFINITY),
        );

        assert_approx_eq!(f32, style.radius(), 40.0);
        assert_approx_eq!(f32, style.font_size(), 16.0);
        assert_eq!(style.fill_color(), Color::new("#fff").unwrap());
    }

    #[test]
    fn test_overrides_validate_colors() {
        assert!(ArrowStyleOverrides::new().validate().is_ok());
        assert!(
            ArrowStyleOverrides::new()
                .with_stroke_color("teal")
                .validate()
                .is_ok()
        );

        let err = NodeStyleOverrides::new()
            .with_stroke_color("#6366f1")
            .with_fill_color("not-a-color")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidColor { input, .. } if input == "not-a-color"));
    }
}
