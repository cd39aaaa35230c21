//! Morphism arrow construction.
//!
//! An arrow is a single path from `start` to `end` ending in the shared
//! arrowhead marker, plus an optional label next to the chord. The geometry
//! is computed first ([`ArrowGeometry`]) and then rendered, so the numbers
//! behind the SVG are available to callers and tests without reparsing path
//! data.
//!
//! # Curves
//!
//! A curved arrow is one quadratic Bézier segment. Its control point is the
//! chord midpoint displaced along the chord's perpendicular `(-dy, dx)` by
//! `curvature × chord length`. The perpendicular always has the same
//! handedness, so two arrows drawn in opposite directions between the same
//! points bow to opposite sides.
//!
//! # Labels
//!
//! Labels are placed at the chord midpoint, pushed `label_offset` away along
//! `(sin θ, -cos θ)` where `θ = atan2(dy, dx)`. Curved arrows use the chord
//! midpoint as well, not the curve midpoint.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{
        ARROW_CLASSES, ArrowStyle, LabelDefinition, LabelPlacement, StrokeDefinition,
        marker::ARROWHEAD_MARKER_URL,
    },
    geometry::Point,
};

/// Computed geometry of an arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    start: Point,
    end: Point,
    control: Option<Point>,
    label_position: Option<Point>,
}

impl ArrowGeometry {
    /// Computes the path and label geometry for an arrow.
    ///
    /// `with_label` controls whether a label position is produced.
    pub fn compute(start: Point, end: Point, style: &ArrowStyle, with_label: bool) -> Self {
        let chord = end.sub_point(start);
        let midpoint = start.midpoint(end);

        let control = style
            .curved()
            .then(|| midpoint.add_point(chord.perpendicular().scale(style.curvature())));

        let label_position = with_label.then(|| {
            let (sin, cos) = chord.angle().sin_cos();
            midpoint.add_point(Point::new(sin, -cos).scale(style.label_offset()))
        });

        Self {
            start,
            end,
            control,
            label_position,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Quadratic control point, present only for curved arrows.
    pub fn control(&self) -> Option<Point> {
        self.control
    }

    /// Label anchor, present only when the arrow has a label.
    pub fn label_position(&self) -> Option<Point> {
        self.label_position
    }

    /// Distance between start and end.
    pub fn chord_length(&self) -> f32 {
        self.end.sub_point(self.start).hypot()
    }

    /// Length of the drawn path.
    ///
    /// Straight arrows measure their chord. Curved arrows integrate the speed
    /// of the quadratic Bézier with composite Simpson's rule, which is well
    /// within a pixel for diagram-sized curves. Draw-in animations use this as
    /// the dash length.
    pub fn arc_length(&self) -> f32 {
        let Some(control) = self.control else {
            return self.chord_length();
        };

        let p0 = (self.start.x() as f64, self.start.y() as f64);
        let p1 = (control.x() as f64, control.y() as f64);
        let p2 = (self.end.x() as f64, self.end.y() as f64);

        // B'(t) = 2(1 - t)(p1 - p0) + 2t(p2 - p1)
        let speed = |t: f64| {
            let dx = 2.0 * (1.0 - t) * (p1.0 - p0.0) + 2.0 * t * (p2.0 - p1.0);
            let dy = 2.0 * (1.0 - t) * (p1.1 - p0.1) + 2.0 * t * (p2.1 - p1.1);
            dx.hypot(dy)
        };

        const SEGMENTS: usize = 64;
        let h = 1.0 / SEGMENTS as f64;
        let interior: f64 = (1..SEGMENTS)
            .map(|i| {
                let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
                weight * speed(i as f64 * h)
            })
            .sum();

        ((speed(0.0) + interior + speed(1.0)) * h / 3.0) as f32
    }

    /// SVG path data for this arrow.
    pub fn path_data(&self) -> String {
        match self.control {
            Some(control) => format!(
                "M {} {} Q {} {} {} {}",
                self.start.x(),
                self.start.y(),
                control.x(),
                control.y(),
                self.end.x(),
                self.end.y()
            ),
            None => format!(
                "M {} {} L {} {}",
                self.start.x(),
                self.start.y(),
                self.end.x(),
                self.end.y()
            ),
        }
    }
}

/// A built arrow: the detached SVG group plus the values it was built from.
#[derive(Debug, Clone)]
pub struct ArrowContainer {
    group: svg_element::Group,
    geometry: ArrowGeometry,
    stroke: StrokeDefinition,
    label: Option<String>,
}

impl ArrowContainer {
    /// The detached `<g>` holding the path and optional label.
    pub fn group(&self) -> &svg_element::Group {
        &self.group
    }

    /// Consumes the container, returning the SVG group for insertion.
    pub fn into_group(self) -> svg_element::Group {
        self.group
    }

    pub fn geometry(&self) -> &ArrowGeometry {
        &self.geometry
    }

    /// Stroke color the path was built with.
    ///
    /// Hover effects restore this color when the pointer leaves.
    pub fn original_stroke(&self) -> Color {
        self.stroke.color()
    }

    /// Full stroke (color and width) the path was built with.
    pub fn stroke(&self) -> StrokeDefinition {
        self.stroke
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Builds a morphism arrow from `start` to `end`.
///
/// An empty or missing `label` produces no text element. Zero-length arrows
/// are allowed and render as a point.
///
/// # Examples
///
/// ```
/// use catena_core::draw::{ArrowStyle, build_arrow};
/// use catena_core::geometry::Point;
///
/// let arrow = build_arrow(
///     Point::new(0.0, 0.0),
///     Point::new(100.0, 0.0),
///     Some("f"),
///     &ArrowStyle::default(),
/// );
/// assert_eq!(arrow.geometry().path_data(), "M 0 0 L 100 0");
/// ```
pub fn build_arrow(
    start: Point,
    end: Point,
    label: Option<&str>,
    style: &ArrowStyle,
) -> ArrowContainer {
    let label = label.filter(|label| !label.is_empty());
    let geometry = ArrowGeometry::compute(start, end, style, label.is_some());
    let stroke = style.stroke();

    let path = svg_element::Path::new().set("d", geometry.path_data());
    let path = crate::apply_stroke!(path, &stroke)
        .set("fill", "none")
        .set("marker-end", ARROWHEAD_MARKER_URL)
        .set("data-original-color", stroke.color());

    let mut group = svg_element::Group::new()
        .set("class", ARROW_CLASSES)
        .add(path);

    if let (Some(content), Some(position)) = (label, geometry.label_position()) {
        group = group.add(LabelDefinition::arrow().render(content, LabelPlacement::At(position)));
    }

    ArrowContainer {
        group,
        geometry,
        stroke,
        label: label.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::ArrowStyleOverrides;

    fn curved(curvature: f32) -> ArrowStyle {
        ArrowStyle::merged(
            &ArrowStyleOverrides::new()
                .with_curved(true)
                .with_curvature(curvature),
        )
    }

    #[test]
    fn test_straight_path_data() {
        let geometry = ArrowGeometry::compute(
            Point::new(10.0, 20.0),
            Point::new(100.0, 50.0),
            &ArrowStyle::default(),
            false,
        );

        assert_eq!(geometry.path_data(), "M 10 20 L 100 50");
        assert_eq!(geometry.control(), None);
        assert_eq!(geometry.label_position(), None);
    }

    #[test]
    fn test_curved_path_data() {
        let geometry = ArrowGeometry::compute(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            &curved(0.2),
            false,
        );

        // Midpoint (50, 0) displaced by 0.2 * (0, 100)
        assert_eq!(geometry.control(), Some(Point::new(50.0, 20.0)));
        assert_eq!(geometry.path_data(), "M 0 0 Q 50 20 100 0");
    }

    #[test]
    fn test_curvature_ignored_when_straight() {
        let style = ArrowStyle::merged(&ArrowStyleOverrides::new().with_curvature(0.9));
        let geometry =
            ArrowGeometry::compute(Point::new(0.0, 0.0), Point::new(10.0, 10.0), &style, false);

        assert_eq!(geometry.control(), None);
    }

    #[test]
    fn test_zero_curvature_matches_straight_chord() {
        let start = Point::new(5.0, 5.0);
        let end = Point::new(45.0, 35.0);
        let geometry = ArrowGeometry::compute(start, end, &curved(0.0), false);

        assert_eq!(geometry.control(), Some(start.midpoint(end)));
    }

    #[test]
    fn test_reversed_arrows_bow_to_opposite_sides() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);

        let forward = ArrowGeometry::compute(a, b, &curved(0.2), false);
        let backward = ArrowGeometry::compute(b, a, &curved(0.2), false);

        assert_approx_eq!(f32, forward.control().unwrap().y(), 20.0);
        assert_approx_eq!(f32, backward.control().unwrap().y(), -20.0);
    }

    #[test]
    fn test_label_position_horizontal_chord() {
        let geometry = ArrowGeometry::compute(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            &ArrowStyle::default(),
            true,
        );
        let label = geometry.label_position().unwrap();

        // θ = 0, so the label sits 10 units above the midpoint
        assert_approx_eq!(f32, label.x(), 50.0);
        assert_approx_eq!(f32, label.y(), -10.0);
    }

    #[test]
    fn test_curved_label_uses_chord_midpoint() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(100.0, 0.0);

        let straight = ArrowGeometry::compute(start, end, &ArrowStyle::default(), true);
        let bent = ArrowGeometry::compute(start, end, &curved(0.4), true);

        assert_eq!(straight.label_position(), bent.label_position());
    }

    #[test]
    fn test_arc_length_straight_is_chord() {
        let geometry = ArrowGeometry::compute(
            Point::new(0.0, 0.0),
            Point::new(30.0, 40.0),
            &ArrowStyle::default(),
            false,
        );

        assert_approx_eq!(f32, geometry.arc_length(), 50.0);
    }

    #[test]
    fn test_arc_length_zero_curvature_is_chord() {
        let geometry = ArrowGeometry::compute(
            Point::new(0.0, 0.0),
            Point::new(30.0, 40.0),
            &curved(0.0),
            false,
        );

        assert_approx_eq!(f32, geometry.arc_length(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_arc_length_curved_exceeds_chord() {
        let geometry = ArrowGeometry::compute(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            &curved(0.5),
            false,
        );

        // Parabola through (0,0), (50,25), (100,0): length ≈ 114.78
        assert!(geometry.arc_length() > 100.0);
        assert_approx_eq!(f32, geometry.arc_length(), 114.78, epsilon = 0.05);
    }

    #[test]
    fn test_zero_length_arrow() {
        let point = Point::new(7.0, 7.0);
        let arrow = build_arrow(point, point, Some("id"), &curved(0.3));
        let geometry = arrow.geometry();

        assert_approx_eq!(f32, geometry.chord_length(), 0.0);
        assert_eq!(geometry.control(), Some(point));
        assert_eq!(geometry.label_position(), Some(Point::new(7.0, -3.0)));
    }

    #[test]
    fn test_build_arrow_structure() {
        let arrow = build_arrow(
            Point::new(0.0, 0.0),
            Point::new(60.0, 80.0),
            Some("g"),
            &ArrowStyle::default(),
        );

        let rendered = arrow.group().to_string();
        assert_eq!(rendered.matches("<path").count(), 1);
        assert_eq!(rendered.matches("<text").count(), 1);
        assert!(rendered.contains(r#"class="diagram-arrow morphism-arrow""#));
        assert!(rendered.contains(r#"marker-end="url(#arrowhead)""#));
        assert!(rendered.contains(r#"fill="none""#));
        assert!(rendered.contains(r#"class="diagram-label""#));
        assert_eq!(arrow.label(), Some("g"));
    }

    #[test]
    fn test_build_arrow_without_label() {
        for label in [None, Some("")] {
            let arrow = build_arrow(
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                label,
                &ArrowStyle::default(),
            );

            let rendered = arrow.group().to_string();
            assert_eq!(rendered.matches("<path").count(), 1);
            assert_eq!(rendered.matches("<text").count(), 0);
            assert_eq!(arrow.geometry().label_position(), None);
            assert_eq!(arrow.label(), None);
        }
    }

    #[test]
    fn test_original_stroke_is_captured() {
        let style = ArrowStyle::merged(&ArrowStyleOverrides::new().with_stroke_color("#10b981"));
        let arrow = build_arrow(Point::new(0.0, 0.0), Point::new(1.0, 1.0), None, &style);

        assert_eq!(arrow.original_stroke(), Color::new("#10b981").unwrap());
        assert_eq!(arrow.stroke().width(), 2.0);
        assert!(
            arrow
                .group()
                .to_string()
                .contains("data-original-color=")
        );
    }
}
