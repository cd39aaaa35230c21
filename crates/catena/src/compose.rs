//! Timeline composition per diagram kind.
//!
//! Each function turns the parts found by the
//! [`ElementSelector`](crate::selector::ElementSelector) into a [`Timeline`]
//! with fixed timing. Gated kinds come back as a [`GatedTimeline`] carrying
//! the trigger the timeline waits for.
//!
//! A missing optional part removes exactly its own step; the remaining steps
//! keep their authored positions. Diagrams with nothing to animate produce
//! no timeline at all.

use log::debug;

use catena_core::color::Color;

use crate::{
    document::ElementId,
    selector::{
        AdjunctionParts, ArrowRef, CommutativeParts, CompositionParts, FunctorParts, MonadParts,
        NaturalTransformationParts, PathRef,
    },
    timeline::{Ease, Position, Properties, Property, Repeat, Step, Timeline, Tween, Value},
    visibility::{GateBinding, Threshold},
};

pub const ARROW_THRESHOLD: f64 = 0.8;
pub const ARROW_DRAW_DURATION: f64 = 1.2;
pub const ARROW_DRAW_DELAY: f64 = 0.3;

pub const NODE_THRESHOLD: f64 = 0.85;
pub const NODE_ENTRANCE_DURATION: f64 = 0.6;
pub const NODE_PULSE_DURATION: f64 = 1.5;
pub const NODE_PULSE_SHADOW: &str = "0 0 20px rgba(99, 102, 241, 0.6)";

pub const COMMUTATIVE_THRESHOLD: f64 = 0.75;
pub const COMMUTATIVE_DRAW_DURATION: f64 = 0.8;
pub const COMMUTATIVE_DRAW_INTERVAL: f64 = 0.2;
pub const COMMUTATIVE_LABEL_DURATION: f64 = 0.4;
pub const COMMUTATIVE_LABEL_STAGGER: f64 = 0.1;
pub const COMMUTATIVE_LABEL_OVERLAP: f64 = 0.3;

pub const FUNCTOR_THRESHOLD: f64 = 0.7;

pub const NT_THRESHOLD: f64 = 0.75;
pub const NT_COMPONENT_STAGGER: f64 = 0.15;
pub const NT_HIGHLIGHT: &str = "#6366f1";
pub const NT_SQUARE_FILL: &str = "rgba(99, 102, 241, 0.1)";

pub const MONAD_THRESHOLD: f64 = 0.7;
pub const MONAD_REPEAT_DELAY: f64 = 2.0;

pub const ADJUNCTION_THRESHOLD: f64 = 0.7;

pub const COMPOSITION_G_HIGHLIGHT: &str = "#10b981";
pub const COMPOSITION_F_HIGHLIGHT: &str = "#f59e0b";
pub const COMPOSITION_RESULT_HIGHLIGHT: &str = "#6366f1";
pub const COMPOSITION_HIGHLIGHT_WIDTH: f64 = 3.0;
pub const COMPOSITION_RESET_DELAY: f64 = 1.0;

/// A timeline that plays when its trigger crosses the viewport threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct GatedTimeline {
    timeline: Timeline,
    binding: GateBinding,
}

impl GatedTimeline {
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn binding(&self) -> &GateBinding {
        &self.binding
    }

    pub fn into_parts(self) -> (Timeline, GateBinding) {
        (self.timeline, self.binding)
    }
}

fn gated(
    timeline: Timeline,
    trigger: ElementId,
    threshold: f64,
    reversible: bool,
) -> Option<GatedTimeline> {
    if timeline.is_empty() {
        debug!(timeline = timeline.name(), trigger:%; "Nothing to animate");
        return None;
    }
    debug!(
        timeline = timeline.name(),
        steps = timeline.steps().len(),
        duration = timeline.duration();
        "Composed timeline"
    );
    Some(GatedTimeline {
        timeline,
        binding: GateBinding::new(trigger, Threshold::new(threshold), reversible),
    })
}

/// A CSS color literal as a property value.
fn css(color: &str) -> Value {
    Color::new(color)
        .map(Value::Color)
        .unwrap_or_else(|_| Value::Text(color.to_string()))
}

fn draw_in(length: f64) -> Tween {
    Tween::FromTo {
        from: Properties::new()
            .with(Property::StrokeDasharray, length)
            .with(Property::StrokeDashoffset, length),
        to: Properties::new().with(Property::StrokeDashoffset, 0.0),
    }
}

fn fade_from(property: Property, offset: f64) -> Tween {
    Tween::From(
        Properties::new()
            .with(Property::Opacity, 0.0)
            .with(property, offset),
    )
}

/// Draw-in of the `index`th morphism arrow on the page.
///
/// Later arrows start later, so arrows revealed together draw one after
/// another.
pub fn morphism_arrow(arrow: PathRef, index: usize) -> Option<GatedTimeline> {
    let timeline = Timeline::new("morphism-arrow").with_step(
        Step::new(vec![arrow.element], draw_in(arrow.length), ARROW_DRAW_DURATION)
            .with_ease(Ease::Power2InOut)
            .at(Position::Absolute(index as f64 * ARROW_DRAW_DELAY)),
    );
    gated(timeline, arrow.element, ARROW_THRESHOLD, true)
}

/// Fade and scale in of a category object.
pub fn object_entrance(node: ElementId) -> Option<GatedTimeline> {
    let timeline = Timeline::new("object-entrance").with_step(
        Step::new(
            vec![node],
            Tween::From(
                Properties::new()
                    .with(Property::Opacity, 0.0)
                    .with(Property::Scale, 0.5),
            ),
            NODE_ENTRANCE_DURATION,
        )
        .with_ease(Ease::BackOut(1.7)),
    );
    gated(timeline, node, NODE_THRESHOLD, false)
}

/// Endless glow pulse of a category object, independent of visibility.
pub fn object_pulse(node: ElementId) -> Timeline {
    Timeline::new("object-pulse")
        .with_step(
            Step::new(
                vec![node],
                Tween::To(Properties::new().with(Property::BoxShadow, NODE_PULSE_SHADOW)),
                NODE_PULSE_DURATION,
            )
            .with_ease(Ease::SineInOut),
        )
        .with_repeat(Repeat::Infinite)
        .with_yoyo(true)
}

/// Staggered draw-in of a commutative diagram's paths, then its labels.
pub fn commutative(parts: &CommutativeParts) -> Option<GatedTimeline> {
    let mut timeline = Timeline::new("commutative");
    for (i, path) in parts.paths.iter().enumerate() {
        timeline.push(
            Step::new(vec![path.element], draw_in(path.length), COMMUTATIVE_DRAW_DURATION)
                .with_ease(Ease::Power2Out)
                .at(Position::Absolute(i as f64 * COMMUTATIVE_DRAW_INTERVAL)),
        );
    }
    timeline.push(
        Step::new(
            parts.labels.clone(),
            fade_from(Property::Y, 10.0),
            COMMUTATIVE_LABEL_DURATION,
        )
        .with_stagger(COMMUTATIVE_LABEL_STAGGER)
        .at(Position::Relative(-COMMUTATIVE_LABEL_OVERLAP)),
    );
    gated(timeline, parts.diagram, COMMUTATIVE_THRESHOLD, true)
}

/// Source category, then the functor arrow growing, then the target category.
pub fn functor(parts: &FunctorParts) -> Option<GatedTimeline> {
    let mut timeline = Timeline::new("functor");
    if let Some(source) = parts.source {
        timeline.push(
            Step::new(vec![source], fade_from(Property::X, -50.0), 0.8).with_ease(Ease::Power2Out),
        );
    }
    if let Some(arrow) = parts.arrow {
        let grow = Tween::FromTo {
            from: Properties::new()
                .with(Property::ScaleX, 0.0)
                .with(Property::TransformOrigin, "left center"),
            to: Properties::new().with(Property::ScaleX, 1.0),
        };
        timeline.push(
            Step::new(vec![arrow], grow, 0.6)
                .with_ease(Ease::Power2InOut)
                .at(Position::Relative(-0.3)),
        );
    }
    if let Some(target) = parts.target {
        timeline.push(
            Step::new(vec![target], fade_from(Property::X, 50.0), 0.8)
                .with_ease(Ease::Power2Out)
                .at(Position::Relative(-0.4)),
        );
    }
    gated(timeline, parts.diagram, FUNCTOR_THRESHOLD, false)
}

/// Components popping in, then the naturality square highlighted.
pub fn natural_transformation(parts: &NaturalTransformationParts) -> Option<GatedTimeline> {
    let mut timeline = Timeline::new("natural-transformation");
    timeline.push(
        Step::new(
            parts.components.clone(),
            Tween::From(
                Properties::new()
                    .with(Property::Opacity, 0.0)
                    .with(Property::Scale, 0.0),
            ),
            0.5,
        )
        .with_stagger(NT_COMPONENT_STAGGER)
        .with_ease(Ease::BackOut(1.5)),
    );
    if let Some(square) = parts.square {
        let highlight = Properties::new()
            .with(Property::Fill, css(NT_SQUARE_FILL))
            .with(Property::Stroke, css(NT_HIGHLIGHT))
            .with(Property::StrokeWidth, 2.0);
        timeline.push(
            Step::new(vec![square], Tween::To(highlight), 0.8)
                .with_ease(Ease::Power2InOut)
                .at(Position::Relative(-0.2)),
        );
    }
    gated(timeline, parts.diagram, NT_THRESHOLD, true)
}

fn brighten() -> Tween {
    Tween::FromTo {
        from: Properties::new().with(Property::Opacity, 0.3),
        to: Properties::new().with(Property::Opacity, 1.0),
    }
}

/// Unit then multiplication brightening, repeating forever once revealed.
pub fn monad(parts: &MonadParts) -> Option<GatedTimeline> {
    let mut timeline = Timeline::new("monad")
        .with_repeat(Repeat::Infinite)
        .with_repeat_delay(MONAD_REPEAT_DELAY);
    if let Some(unit) = parts.unit {
        timeline.push(Step::new(vec![unit], brighten(), 0.6).with_ease(Ease::Power2InOut));
    }
    if let Some(multiplication) = parts.multiplication {
        timeline.push(
            Step::new(vec![multiplication], brighten(), 0.6)
                .with_ease(Ease::Power2InOut)
                .at(Position::Relative(-0.3)),
        );
    }
    gated(timeline, parts.diagram, MONAD_THRESHOLD, false)
}

/// Both adjoints rising in, then the bijection symbol spinning in.
///
/// The adjoints only animate as a pair: with either one missing their step
/// is dropped.
pub fn adjunction(parts: &AdjunctionParts) -> Option<GatedTimeline> {
    let mut timeline = Timeline::new("adjunction");
    if let (Some(left), Some(right)) = (parts.left, parts.right) {
        timeline.push(
            Step::new(vec![left, right], fade_from(Property::Y, 20.0), 0.6).with_stagger(0.2),
        );
    }
    if let Some(bijection) = parts.bijection {
        let spin = Tween::From(
            Properties::new()
                .with(Property::Scale, 0.0)
                .with(Property::Rotation, 180.0),
        );
        timeline.push(
            Step::new(vec![bijection], spin, 0.8)
                .with_ease(Ease::BackOut(1.7))
                .at(Position::Relative(-0.2)),
        );
    }
    gated(timeline, parts.diagram, ADJUNCTION_THRESHOLD, false)
}

fn highlight(arrow: &ArrowRef, color: &str) -> Step {
    Step::new(
        vec![arrow.element],
        Tween::To(
            Properties::new()
                .with(Property::Stroke, css(color))
                .with(Property::StrokeWidth, COMPOSITION_HIGHLIGHT_WIDTH),
        ),
        0.5,
    )
}

/// One run of the composition `f ∘ g`: highlight `g`, then `f`, reveal the
/// composed arrow, and after a pause return every arrow to its baseline
/// stroke.
///
/// Every call builds a fresh, independent timeline.
pub fn composition_run(parts: &CompositionParts) -> Timeline {
    let mut timeline = Timeline::new("composition");
    if let Some(g) = &parts.g {
        timeline.push(highlight(g, COMPOSITION_G_HIGHLIGHT));
    }
    if let Some(f) = &parts.f {
        timeline.push(highlight(f, COMPOSITION_F_HIGHLIGHT));
    }
    if let Some(composed) = &parts.composed {
        let reveal = Tween::FromTo {
            from: Properties::new()
                .with(Property::Opacity, 0.0)
                .with(Property::StrokeDashoffset, 100.0),
            to: Properties::new()
                .with(Property::Opacity, 1.0)
                .with(Property::StrokeDashoffset, 0.0)
                .with(Property::Stroke, css(COMPOSITION_RESULT_HIGHLIGHT))
                .with(Property::StrokeWidth, COMPOSITION_HIGHLIGHT_WIDTH),
        };
        timeline.push(Step::new(vec![composed.element], reveal, 0.8).with_ease(Ease::Power2InOut));
    }

    let arrows: Vec<&ArrowRef> = [&parts.f, &parts.g, &parts.composed]
        .into_iter()
        .flatten()
        .collect();
    let reset = Properties::new()
        .with(
            Property::Stroke,
            Value::PerTarget(
                arrows
                    .iter()
                    .map(|arrow| Value::Color(arrow.baseline.stroke))
                    .collect(),
            ),
        )
        .with(
            Property::StrokeWidth,
            Value::PerTarget(
                arrows
                    .iter()
                    .map(|arrow| Value::Number(arrow.baseline.width))
                    .collect(),
            ),
        );
    timeline.push(
        Step::new(
            arrows.iter().map(|arrow| arrow.element).collect(),
            Tween::To(reset),
            0.3,
        )
        .at(Position::Relative(COMPOSITION_RESET_DELAY)),
    );
    timeline
}
