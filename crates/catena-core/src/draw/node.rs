//! Category object node construction.

use svg::node::element as svg_element;

use crate::{
    draw::{LabelDefinition, LabelPlacement, NODE_CLASSES, NodeStyle},
    geometry::Point,
};

/// A built object node: the detached SVG group and its center.
#[derive(Debug, Clone)]
pub struct NodeContainer {
    group: svg_element::Group,
    center: Point,
}

impl NodeContainer {
    /// The detached `<g>` holding the circle and label.
    pub fn group(&self) -> &svg_element::Group {
        &self.group
    }

    /// Consumes the container, returning the SVG group for insertion.
    pub fn into_group(self) -> svg_element::Group {
        self.group
    }

    /// Center the group is translated to.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The group-level `transform` attribute value.
    pub fn transform(&self) -> String {
        translate(self.center)
    }
}

fn translate(center: Point) -> String {
    format!("translate({}, {})", center.x(), center.y())
}

/// Builds a category object node centered at `center`.
///
/// The circle and label are drawn at the group's local origin; the only
/// positioning is the group's `translate` transform, so scaling the group
/// (hover, entrance) scales around the node's center.
///
/// # Examples
///
/// ```
/// use catena_core::draw::{NodeStyle, build_object_node};
/// use catena_core::geometry::Point;
///
/// let node = build_object_node(Point::new(50.0, 50.0), "A", &NodeStyle::default());
/// assert_eq!(node.transform(), "translate(50, 50)");
/// ```
pub fn build_object_node(center: Point, label: &str, style: &NodeStyle) -> NodeContainer {
    let stroke = style.stroke();

    let circle = svg_element::Circle::new()
        .set("r", style.radius())
        .set("fill", style.fill_color());
    let circle = crate::apply_stroke!(circle, &stroke);

    let text = LabelDefinition::node(style.font_size()).render(label, LabelPlacement::Origin);

    let group = svg_element::Group::new()
        .set("class", NODE_CLASSES)
        .set("transform", translate(center))
        .add(circle)
        .add(text);

    NodeContainer { group, center }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::NodeStyleOverrides;

    #[test]
    fn test_object_node_structure() {
        let node = build_object_node(Point::new(50.0, 50.0), "A", &NodeStyle::default());
        let rendered = node.group().to_string();

        assert_eq!(rendered.matches("<g").count(), 1);
        assert_eq!(rendered.matches("<circle").count(), 1);
        assert_eq!(rendered.matches("<text").count(), 1);
        assert!(rendered.contains(r#"transform="translate(50, 50)""#));
        assert!(rendered.contains(r#"class="category-object diagram-node""#));
        assert!(rendered.contains(r#"r="25""#));
    }

    #[test]
    fn test_object_node_children_at_origin() {
        let node = build_object_node(Point::new(50.0, 50.0), "A", &NodeStyle::default());
        let rendered = node.group().to_string();

        // Only the group carries a position
        for attribute in [" cx=", " cy=", " x=", " y="] {
            assert!(!rendered.contains(attribute), "unexpected {attribute}");
        }
    }

    #[test]
    fn test_object_node_style_overrides() {
        let style = NodeStyle::merged(
            &NodeStyleOverrides::new()
                .with_radius(30.0)
                .with_stroke_width(4.0),
        );
        let rendered = build_object_node(Point::new(0.0, 0.0), "B", &style)
            .group()
            .to_string();

        assert!(rendered.contains(r#"r="30""#));
        assert!(rendered.contains(r#"stroke-width="4""#));
    }

    #[test]
    fn test_object_node_center() {
        let node = build_object_node(Point::new(-12.5, 80.0), "C", &NodeStyle::default());

        assert_eq!(node.center(), Point::new(-12.5, 80.0));
        assert_eq!(node.transform(), "translate(-12.5, 80)");
    }
}
