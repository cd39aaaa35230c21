//! Text labels for arrows and object nodes.
//!
//! A [`LabelDefinition`] describes how a label is typeset. Arrow labels sit
//! at an absolute position next to the chord; node labels sit at the local
//! origin of their node group and carry font settings instead.

use svg::node::element as svg_element;

use crate::{draw::LABEL_CLASS, geometry::Point};

const NODE_FONT_FAMILY: &str = "KaTeX_Math, Times New Roman, serif";

/// Where a label is anchored relative to its own element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelPlacement {
    /// Absolute `x`/`y` in the parent's coordinate space.
    At(Point),
    /// No position attributes; the parent group's transform positions it.
    Origin,
}

/// Typesetting settings for a label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDefinition {
    dominant_baseline: &'static str,
    class: Option<&'static str>,
    font_family: Option<&'static str>,
    font_size: Option<f32>,
    italic: bool,
}

impl LabelDefinition {
    /// Label style for arrows: centered on its point, tagged `diagram-label`.
    pub fn arrow() -> Self {
        Self {
            dominant_baseline: "middle",
            class: Some(LABEL_CLASS),
            font_family: None,
            font_size: None,
            italic: false,
        }
    }

    /// Label style for object nodes: italic math font at `font_size`.
    pub fn node(font_size: f32) -> Self {
        Self {
            dominant_baseline: "central",
            class: None,
            font_family: Some(NODE_FONT_FAMILY),
            font_size: Some(font_size),
            italic: true,
        }
    }

    /// Renders `content` as an SVG `<text>` element.
    pub fn render(&self, content: &str, placement: LabelPlacement) -> svg_element::Text {
        let mut text = svg_element::Text::new(content);

        if let LabelPlacement::At(position) = placement {
            text = text.set("x", position.x()).set("y", position.y());
        }

        text = text
            .set("text-anchor", "middle")
            .set("dominant-baseline", self.dominant_baseline);

        if let Some(size) = self.font_size {
            text = text.set("font-size", size);
        }
        if let Some(family) = self.font_family {
            text = text.set("font-family", family);
        }
        if self.italic {
            text = text.set("font-style", "italic");
        }
        if let Some(class) = self.class {
            text = text.set("class", class);
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_label_render() {
        let rendered = LabelDefinition::arrow()
            .render("f", LabelPlacement::At(Point::new(12.5, 40.0)))
            .to_string();

        assert!(rendered.contains(r#"x="12.5""#));
        assert!(rendered.contains(r#"y="40""#));
        assert!(rendered.contains(r#"dominant-baseline="middle""#));
        assert!(rendered.contains(r#"class="diagram-label""#));
        assert!(rendered.replace('\n', "").contains(">f</text>"));
    }

    #[test]
    fn test_node_label_render_has_no_position() {
        let rendered = LabelDefinition::node(16.0)
            .render("A", LabelPlacement::Origin)
            .to_string();

        assert!(!rendered.contains(" x="));
        assert!(!rendered.contains(" y="));
        assert!(rendered.contains(r#"font-style="italic""#));
        assert!(rendered.contains(r#"font-size="16""#));
        assert!(rendered.contains(r#"dominant-baseline="central""#));
    }
}
