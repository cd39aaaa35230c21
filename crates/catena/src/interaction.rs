//! Pointer and click handling.
//!
//! The [`InteractionLayer`] subscribes to events on diagram elements and
//! turns each event into at most one animation: a hover tween, a fresh
//! composition run, or a smooth scroll. Handlers are synchronous and never
//! debounce; a second click while a composition is still running starts a
//! second, independent run.

use indexmap::IndexMap;
use log::trace;

use catena_core::color::Color;

use crate::{
    compose,
    document::{Document, ElementId, EventKind, ListenerId},
    engine::{AnimationEngine, PlaybackId, ScrollRequest},
    selector::{ArrowRef, CompositionParts, LinkRef},
    timeline::{Ease, Properties, Property, Step, Timeline, Tween, Value},
};

pub const NODE_HOVER_SCALE: f64 = 1.1;
pub const NODE_HOVER_DURATION: f64 = 0.3;
pub const ARROW_HOVER_DURATION: f64 = 0.2;
pub const ARROW_HOVER_STROKE: &str = "#6366f1";

/// Pointer transitions over an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Enter,
    Leave,
}

impl Pointer {
    pub fn event_kind(self) -> EventKind {
        match self {
            Self::Enter => EventKind::PointerEnter,
            Self::Leave => EventKind::PointerLeave,
        }
    }
}

/// Result of routing a click.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClickOutcome {
    /// The host must suppress the click's default action.
    pub prevent_default: bool,
    /// Timeline started by the click.
    pub started: Option<PlaybackId>,
    /// Scroll requested by the click.
    pub scrolled: Option<ScrollRequest>,
}

/// Smooth scroll tuning for in-page links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSettings {
    /// Gap kept between the viewport top and the target.
    pub offset: f64,
    /// Scroll duration in seconds.
    pub duration: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            offset: 80.0,
            duration: 0.8,
        }
    }
}

#[derive(Debug, Clone)]
enum Handler {
    NodeHover,
    ArrowHover { original: Color },
    PlayComposition(CompositionParts),
    SmoothScroll { href: String },
}

#[derive(Debug, Clone)]
struct Binding {
    listener: ListenerId,
    handler: Handler,
}

/// Hover tween for a category object.
pub fn node_hover(node: ElementId, pointer: Pointer) -> Timeline {
    let scale = match pointer {
        Pointer::Enter => NODE_HOVER_SCALE,
        Pointer::Leave => 1.0,
    };
    Timeline::new("node-hover").with_step(
        Step::new(
            vec![node],
            Tween::To(Properties::new().with(Property::Scale, scale)),
            NODE_HOVER_DURATION,
        )
        .with_ease(Ease::Power2Out),
    )
}

/// Hover tween for an arrow.
///
/// Entering thickens the stroke and switches it to the highlight color;
/// leaving undoes the thickening and restores `original`.
pub fn arrow_hover(arrow: ElementId, pointer: Pointer, original: Color) -> Timeline {
    let (width, stroke) = match pointer {
        Pointer::Enter => (
            Value::Relative(1.0),
            Color::new(ARROW_HOVER_STROKE)
                .map(Value::Color)
                .unwrap_or_else(|_| Value::Text(ARROW_HOVER_STROKE.to_string())),
        ),
        Pointer::Leave => (Value::Relative(-1.0), Value::Color(original)),
    };
    Timeline::new("arrow-hover").with_step(Step::new(
        vec![arrow],
        Tween::To(
            Properties::new()
                .with(Property::StrokeWidth, width)
                .with(Property::Stroke, stroke),
        ),
        ARROW_HOVER_DURATION,
    ))
}

/// Event subscriptions and their handlers.
#[derive(Debug, Clone, Default)]
pub struct InteractionLayer {
    scroll: ScrollSettings,
    bindings: IndexMap<(ElementId, EventKind), Binding>,
}

impl InteractionLayer {
    pub fn new(scroll: ScrollSettings) -> Self {
        Self {
            scroll,
            bindings: IndexMap::new(),
        }
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Whether `element` has a handler for `kind`.
    pub fn is_bound(&self, element: ElementId, kind: EventKind) -> bool {
        self.bindings.contains_key(&(element, kind))
    }

    /// Scales `node` up while the pointer is over it.
    pub fn bind_node_hover<D: Document + ?Sized>(&mut self, document: &mut D, node: ElementId) {
        for pointer in [Pointer::Enter, Pointer::Leave] {
            self.bind(document, node, pointer.event_kind(), Handler::NodeHover);
        }
    }

    /// Highlights `arrow` while the pointer is over it.
    pub fn bind_arrow_hover<D: Document + ?Sized>(&mut self, document: &mut D, arrow: ArrowRef) {
        let handler = Handler::ArrowHover {
            original: arrow.baseline.stroke,
        };
        for pointer in [Pointer::Enter, Pointer::Leave] {
            self.bind(document, arrow.element, pointer.event_kind(), handler.clone());
        }
    }

    /// Plays a composition run whenever the diagram's play control is
    /// clicked. Diagrams without a play control are not bound.
    pub fn bind_composition<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        parts: CompositionParts,
    ) -> bool {
        let Some(play) = parts.play else {
            return false;
        };
        self.bind(document, play, EventKind::Click, Handler::PlayComposition(parts))
    }

    /// Scrolls smoothly to the link's fragment target when clicked.
    pub fn bind_link<D: Document + ?Sized>(&mut self, document: &mut D, link: LinkRef) -> bool {
        self.bind(
            document,
            link.element,
            EventKind::Click,
            Handler::SmoothScroll { href: link.href },
        )
    }

    fn bind<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        element: ElementId,
        kind: EventKind,
        handler: Handler,
    ) -> bool {
        if self.bindings.contains_key(&(element, kind)) {
            trace!(element:%, kind:%; "Element already bound, keeping first handler");
            return false;
        }
        let listener = document.listen(element, kind);
        self.bindings
            .insert((element, kind), Binding { listener, handler });
        true
    }

    /// Routes a pointer transition, starting the hover tween if `element`
    /// is bound.
    pub fn on_pointer<E: AnimationEngine + ?Sized>(
        &self,
        engine: &mut E,
        element: ElementId,
        pointer: Pointer,
    ) -> Option<PlaybackId> {
        let binding = self.bindings.get(&(element, pointer.event_kind()))?;
        let timeline = match &binding.handler {
            Handler::NodeHover => node_hover(element, pointer),
            Handler::ArrowHover { original } => arrow_hover(element, pointer, *original),
            Handler::PlayComposition(_) | Handler::SmoothScroll { .. } => return None,
        };
        trace!(element:%, pointer:?; "Hover");
        Some(engine.start(&timeline))
    }

    /// Routes a click.
    pub fn on_click<D, E>(&self, document: &D, engine: &mut E, element: ElementId) -> ClickOutcome
    where
        D: Document + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        let Some(binding) = self.bindings.get(&(element, EventKind::Click)) else {
            return ClickOutcome::default();
        };

        match &binding.handler {
            Handler::PlayComposition(parts) => {
                let timeline = compose::composition_run(parts);
                if timeline.is_empty() {
                    return ClickOutcome::default();
                }
                trace!(diagram:% = parts.diagram; "Playing composition");
                ClickOutcome {
                    prevent_default: false,
                    started: Some(engine.start(&timeline)),
                    scrolled: None,
                }
            }
            Handler::SmoothScroll { href } => self.scroll_to_fragment(document, engine, href),
            Handler::NodeHover | Handler::ArrowHover { .. } => ClickOutcome::default(),
        }
    }

    fn scroll_to_fragment<D, E>(&self, document: &D, engine: &mut E, href: &str) -> ClickOutcome
    where
        D: Document + ?Sized,
        E: AnimationEngine + ?Sized,
    {
        if href == "#" {
            return ClickOutcome::default();
        }

        let unhandled = ClickOutcome {
            prevent_default: true,
            ..ClickOutcome::default()
        };
        let Some(target) = href.strip_prefix('#').and_then(|id| document.find_by_id(id)) else {
            trace!(href; "Link target not found, not scrolling");
            return unhandled;
        };
        let Some(top) = document.element_top(target) else {
            trace!(href, target:%; "Link target has no position, not scrolling");
            return unhandled;
        };

        let request = ScrollRequest {
            y: (top - self.scroll.offset).max(0.0),
            duration: self.scroll.duration,
            ease: Ease::Power2InOut,
        };
        trace!(href, y = request.y; "Smooth scroll");
        engine.scroll_to(request);
        ClickOutcome {
            prevent_default: true,
            started: None,
            scrolled: Some(request),
        }
    }

    /// Removes every subscription from the document.
    pub fn detach<D: Document + ?Sized>(&mut self, document: &mut D) {
        for (_, binding) in self.bindings.drain(..) {
            document.unlisten(binding.listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::{ElementSpec, MemoryDocument},
        engine::{EngineCommand, RecordingEngine},
        selector::ArrowBaseline,
    };

    #[test]
    fn test_node_hover_timelines() {
        let node = ElementId::new(1);

        let enter = node_hover(node, Pointer::Enter);
        let leave = node_hover(node, Pointer::Leave);

        let scale = |timeline: &Timeline| {
            timeline.steps()[0]
                .tween()
                .end_values()
                .and_then(|values| values.get(Property::Scale))
                .cloned()
        };
        assert_eq!(scale(&enter), Some(Value::Number(1.1)));
        assert_eq!(scale(&leave), Some(Value::Number(1.0)));
        assert_eq!(enter.steps()[0].ease(), Ease::Power2Out);
    }

    #[test]
    fn test_arrow_hover_restores_original_stroke() {
        let arrow = ElementId::new(1);
        let original = Color::new("#10b981").unwrap();

        let leave = arrow_hover(arrow, Pointer::Leave, original);
        let values = leave.steps()[0].tween().end_values().unwrap();

        assert_eq!(values.get(Property::StrokeWidth), Some(&Value::Relative(-1.0)));
        assert_eq!(values.get(Property::Stroke), Some(&Value::Color(original)));

        let enter = arrow_hover(arrow, Pointer::Enter, original);
        let values = enter.steps()[0].tween().end_values().unwrap();
        assert_eq!(values.get(Property::StrokeWidth), Some(&Value::Relative(1.0)));
    }

    #[test]
    fn test_duplicate_bindings_keep_first_handler() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let element = document.append(root, ElementSpec::new("g"));
        let mut layer = InteractionLayer::default();

        layer.bind_node_hover(&mut document, element);
        layer.bind_arrow_hover(
            &mut document,
            ArrowRef {
                element,
                baseline: ArrowBaseline::default(),
            },
        );

        assert_eq!(layer.len(), 2);
        assert_eq!(document.listener_count(), 2);

        let mut engine = RecordingEngine::new();
        layer.on_pointer(&mut engine, element, Pointer::Enter);
        let (_, timeline) = engine.last_created().unwrap();
        assert_eq!(timeline.name(), "node-hover");
    }

    #[test]
    fn test_unbound_events_do_nothing() {
        let document = MemoryDocument::new();
        let layer = InteractionLayer::default();
        let mut engine = RecordingEngine::new();

        assert_eq!(layer.on_pointer(&mut engine, ElementId::new(3), Pointer::Enter), None);
        assert_eq!(
            layer.on_click(&document, &mut engine, ElementId::new(3)),
            ClickOutcome::default()
        );
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_link_click_scrolls_to_target() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        document.append(root, ElementSpec::new("section").id("monads").top(1200.0));
        let link = document.append(root, ElementSpec::new("a").attribute("href", "#monads"));
        let mut layer = InteractionLayer::new(ScrollSettings::default());
        layer.bind_link(
            &mut document,
            LinkRef {
                element: link,
                href: "#monads".to_string(),
            },
        );
        let mut engine = RecordingEngine::new();

        let outcome = layer.on_click(&document, &mut engine, link);

        let expected = ScrollRequest {
            y: 1120.0,
            duration: 0.8,
            ease: Ease::Power2InOut,
        };
        assert!(outcome.prevent_default);
        assert_eq!(outcome.scrolled, Some(expected));
        assert_eq!(engine.commands(), &[EngineCommand::ScrollTo(expected)]);
    }

    #[test]
    fn test_bare_hash_link_is_not_handled() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let link = document.append(root, ElementSpec::new("a").attribute("href", "#"));
        let mut layer = InteractionLayer::default();
        layer.bind_link(
            &mut document,
            LinkRef {
                element: link,
                href: "#".to_string(),
            },
        );
        let mut engine = RecordingEngine::new();

        let outcome = layer.on_click(&document, &mut engine, link);

        assert!(!outcome.prevent_default);
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_unresolvable_link_prevents_default_without_scrolling() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let link = document.append(root, ElementSpec::new("a").attribute("href", "#nowhere"));
        let mut layer = InteractionLayer::default();
        layer.bind_link(
            &mut document,
            LinkRef {
                element: link,
                href: "#nowhere".to_string(),
            },
        );
        let mut engine = RecordingEngine::new();

        let outcome = layer.on_click(&document, &mut engine, link);

        assert!(outcome.prevent_default);
        assert_eq!(outcome.scrolled, None);
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_unpositioned_link_target_prevents_default_without_scrolling() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        document.append(root, ElementSpec::new("section").id("functors"));
        let link = document.append(root, ElementSpec::new("a").attribute("href", "#functors"));
        let mut layer = InteractionLayer::default();
        layer.bind_link(
            &mut document,
            LinkRef {
                element: link,
                href: "#functors".to_string(),
            },
        );
        let mut engine = RecordingEngine::new();

        let outcome = layer.on_click(&document, &mut engine, link);

        assert!(outcome.prevent_default);
        assert_eq!(outcome.scrolled, None);
        assert!(engine.commands().is_empty());
    }

    #[test]
    fn test_detach_removes_listeners() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let node = document.append(root, ElementSpec::new("g"));
        let mut layer = InteractionLayer::default();
        layer.bind_node_hover(&mut document, node);

        layer.detach(&mut document);

        assert!(layer.is_empty());
        assert_eq!(document.listener_count(), 0);
    }
}
