//! Element discovery by semantic role.
//!
//! Host markup marks diagram elements with class names. The
//! [`ElementSelector`] turns those conventions into typed parts, one struct
//! per diagram kind, with optional sub-elements as `Option` and repeated
//! ones as `Vec` in document order.
//!
//! | Role | Selector |
//! |------|----------|
//! | morphism arrow | `.morphism-arrow` |
//! | object node | `.category-object` |
//! | hoverable node | `.category-object, .diagram-node` |
//! | hoverable arrow | `.morphism-arrow, .diagram-arrow` |
//! | commutative diagram | `.commutative-diagram` |
//! | functor diagram | `.functor-diagram` |
//! | natural transformation | `.natural-transformation` |
//! | monad diagram | `.monad-diagram` |
//! | adjunction diagram | `.adjunction-diagram` |
//! | composition diagram | `.composition-diagram` |
//! | in-page link | `a[href^="#"]` |

use std::{fmt, str::FromStr};

use log::debug;

use catena_core::color::Color;

use crate::document::{Document, ElementId, Selector};

pub const MORPHISM_ARROW: &str = "morphism-arrow";
pub const DIAGRAM_ARROW: &str = "diagram-arrow";
pub const CATEGORY_OBJECT: &str = "category-object";
pub const DIAGRAM_NODE: &str = "diagram-node";
pub const DIAGRAM_LABEL: &str = "diagram-label";

pub const COMMUTATIVE_DIAGRAM: &str = "commutative-diagram";

pub const FUNCTOR_DIAGRAM: &str = "functor-diagram";
pub const SOURCE_CATEGORY: &str = "source-category";
pub const FUNCTOR_ARROW: &str = "functor-arrow";
pub const TARGET_CATEGORY: &str = "target-category";

pub const NATURAL_TRANSFORMATION: &str = "natural-transformation";
pub const NT_COMPONENT: &str = "nt-component";
pub const NATURALITY_SQUARE: &str = "naturality-square";

pub const MONAD_DIAGRAM: &str = "monad-diagram";
pub const MONAD_UNIT: &str = "monad-unit";
pub const MONAD_MULT: &str = "monad-mult";

pub const ADJUNCTION_DIAGRAM: &str = "adjunction-diagram";
pub const LEFT_ADJOINT: &str = "left-adjoint";
pub const RIGHT_ADJOINT: &str = "right-adjoint";
pub const ADJUNCTION_BIJECTION: &str = "adjunction-bijection";

pub const COMPOSITION_DIAGRAM: &str = "composition-diagram";
pub const ARROW_F: &str = "arrow-f";
pub const ARROW_G: &str = "arrow-g";
pub const ARROW_COMPOSED: &str = "arrow-composed";
pub const PLAY_COMPOSITION: &str = "play-composition";

/// Length assumed for path-like elements that cannot be measured.
pub const DEFAULT_PATH_LENGTH: f64 = 100.0;

/// Stroke color assumed for arrows that carry none.
pub const DEFAULT_ARROW_STROKE: &str = "#333";

/// Stroke width assumed for arrows that carry none.
pub const DEFAULT_ARROW_STROKE_WIDTH: f64 = 2.0;

/// The composed diagram kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    Commutative,
    Functor,
    NaturalTransformation,
    Monad,
    Adjunction,
    Composition,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 6] = [
        Self::Commutative,
        Self::Functor,
        Self::NaturalTransformation,
        Self::Monad,
        Self::Adjunction,
        Self::Composition,
    ];

    /// Class carried by the diagram's container element.
    pub fn class(self) -> &'static str {
        match self {
            Self::Commutative => COMMUTATIVE_DIAGRAM,
            Self::Functor => FUNCTOR_DIAGRAM,
            Self::NaturalTransformation => NATURAL_TRANSFORMATION,
            Self::Monad => MONAD_DIAGRAM,
            Self::Adjunction => ADJUNCTION_DIAGRAM,
            Self::Composition => COMPOSITION_DIAGRAM,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Commutative => "commutative",
            Self::Functor => "functor",
            Self::NaturalTransformation => "natural-transformation",
            Self::Monad => "monad",
            Self::Adjunction => "adjunction",
            Self::Composition => "composition",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name || kind.class() == name)
            .or_else(|| (name == "nt").then_some(Self::NaturalTransformation))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|kind| kind.name()).collect();
                format!("unknown diagram kind `{s}`, expected one of: {}", known.join(", "))
            })
    }
}

/// A path-like element with its measured length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRef {
    pub element: ElementId,
    pub length: f64,
}

/// Stroke an arrow returns to after a highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowBaseline {
    pub stroke: Color,
    pub width: f64,
}

impl Default for ArrowBaseline {
    fn default() -> Self {
        Self {
            stroke: default_arrow_stroke(),
            width: DEFAULT_ARROW_STROKE_WIDTH,
        }
    }
}

/// An arrow element with the stroke it was found with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowRef {
    pub element: ElementId,
    pub baseline: ArrowBaseline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommutativeParts {
    pub diagram: ElementId,
    /// Every `path` and `line` inside the diagram.
    pub paths: Vec<PathRef>,
    /// Every `text` and `.diagram-label` inside the diagram.
    pub labels: Vec<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctorParts {
    pub diagram: ElementId,
    pub source: Option<ElementId>,
    pub arrow: Option<ElementId>,
    pub target: Option<ElementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NaturalTransformationParts {
    pub diagram: ElementId,
    pub components: Vec<ElementId>,
    pub square: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonadParts {
    pub diagram: ElementId,
    pub unit: Option<ElementId>,
    pub multiplication: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjunctionParts {
    pub diagram: ElementId,
    pub left: Option<ElementId>,
    pub right: Option<ElementId>,
    pub bijection: Option<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionParts {
    pub diagram: ElementId,
    pub f: Option<ArrowRef>,
    pub g: Option<ArrowRef>,
    pub composed: Option<ArrowRef>,
    pub play: Option<ElementId>,
}

/// An anchor pointing inside the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub element: ElementId,
    pub href: String,
}

fn default_arrow_stroke() -> Color {
    Color::new(DEFAULT_ARROW_STROKE).unwrap_or_default()
}

/// Typed queries over a [`Document`].
pub struct ElementSelector<'d, D: Document + ?Sized> {
    document: &'d D,
}

impl<'d, D: Document + ?Sized> ElementSelector<'d, D> {
    pub fn new(document: &'d D) -> Self {
        Self { document }
    }

    /// All morphism arrows, measured.
    pub fn morphism_arrows(&self) -> Vec<PathRef> {
        self.document
            .query_all(&Selector::Class(MORPHISM_ARROW))
            .into_iter()
            .map(|element| self.path_ref(element))
            .collect()
    }

    /// All category objects.
    pub fn object_nodes(&self) -> Vec<ElementId> {
        self.document.query_all(&Selector::Class(CATEGORY_OBJECT))
    }

    /// Nodes that scale on hover.
    pub fn hoverable_nodes(&self) -> Vec<ElementId> {
        self.document
            .query_all(&Selector::any_class(&[CATEGORY_OBJECT, DIAGRAM_NODE]))
    }

    /// Arrows that highlight on hover, with their current stroke.
    pub fn hoverable_arrows(&self) -> Vec<ArrowRef> {
        self.document
            .query_all(&Selector::any_class(&[MORPHISM_ARROW, DIAGRAM_ARROW]))
            .into_iter()
            .map(|element| self.arrow_ref(element))
            .collect()
    }

    pub fn commutative_diagrams(&self) -> Vec<CommutativeParts> {
        self.diagrams(DiagramKind::Commutative, |diagram| CommutativeParts {
            diagram,
            paths: self
                .document
                .query_within(diagram, &Selector::any_tag(&["path", "line"]))
                .into_iter()
                .map(|element| self.path_ref(element))
                .collect(),
            labels: self.document.query_within(
                diagram,
                &Selector::Any(vec![Selector::Tag("text"), Selector::Class(DIAGRAM_LABEL)]),
            ),
        })
    }

    pub fn functor_diagrams(&self) -> Vec<FunctorParts> {
        self.diagrams(DiagramKind::Functor, |diagram| FunctorParts {
            diagram,
            source: self.first(diagram, SOURCE_CATEGORY),
            arrow: self.first(diagram, FUNCTOR_ARROW),
            target: self.first(diagram, TARGET_CATEGORY),
        })
    }

    pub fn natural_transformations(&self) -> Vec<NaturalTransformationParts> {
        self.diagrams(DiagramKind::NaturalTransformation, |diagram| {
            NaturalTransformationParts {
                diagram,
                components: self
                    .document
                    .query_within(diagram, &Selector::Class(NT_COMPONENT)),
                square: self.first(diagram, NATURALITY_SQUARE),
            }
        })
    }

    pub fn monad_diagrams(&self) -> Vec<MonadParts> {
        self.diagrams(DiagramKind::Monad, |diagram| MonadParts {
            diagram,
            unit: self.first(diagram, MONAD_UNIT),
            multiplication: self.first(diagram, MONAD_MULT),
        })
    }

    pub fn adjunction_diagrams(&self) -> Vec<AdjunctionParts> {
        self.diagrams(DiagramKind::Adjunction, |diagram| AdjunctionParts {
            diagram,
            left: self.first(diagram, LEFT_ADJOINT),
            right: self.first(diagram, RIGHT_ADJOINT),
            bijection: self.first(diagram, ADJUNCTION_BIJECTION),
        })
    }

    pub fn composition_diagrams(&self) -> Vec<CompositionParts> {
        self.diagrams(DiagramKind::Composition, |diagram| CompositionParts {
            diagram,
            f: self.first(diagram, ARROW_F).map(|element| self.arrow_ref(element)),
            g: self.first(diagram, ARROW_G).map(|element| self.arrow_ref(element)),
            composed: self
                .first(diagram, ARROW_COMPOSED)
                .map(|element| self.arrow_ref(element)),
            play: self.first(diagram, PLAY_COMPOSITION),
        })
    }

    /// Anchors whose `href` starts with `#`.
    pub fn in_page_links(&self) -> Vec<LinkRef> {
        let selector = Selector::AttributePrefix {
            tag: "a",
            attribute: "href",
            prefix: "#",
        };
        self.document
            .query_all(&selector)
            .into_iter()
            .filter_map(|element| {
                let href = self.document.attribute(element, "href")?;
                Some(LinkRef { element, href })
            })
            .collect()
    }

    /// Measured length of a path-like element.
    ///
    /// Containers such as arrow groups are measured by their first `path` or
    /// `line` descendant. Unmeasurable elements report
    /// [`DEFAULT_PATH_LENGTH`].
    pub fn measure(&self, element: ElementId) -> f64 {
        self.document
            .path_length(element)
            .or_else(|| {
                self.document
                    .query_first_within(element, &Selector::any_tag(&["path", "line"]))
                    .and_then(|path| self.document.path_length(path))
            })
            .filter(|length| length.is_finite() && *length >= 0.0)
            .unwrap_or(DEFAULT_PATH_LENGTH)
    }

    /// Stroke an arrow returns to after being highlighted.
    ///
    /// Arrows inserted by the builders report the stroke they were built
    /// with, whatever their attributes say now. For arrows from host markup
    /// the color is read from `data-original-color`, then `stroke`; the width
    /// from `stroke-width`. Each is looked up on the element first and then
    /// on its first `path` descendant. Missing or malformed values fall back
    /// to the builder defaults.
    pub fn baseline(&self, element: ElementId) -> ArrowBaseline {
        if let Some(stroke) = self.document.built_arrow_stroke(element) {
            return ArrowBaseline {
                stroke: stroke.color(),
                width: f64::from(stroke.width()),
            };
        }

        let path = self
            .document
            .query_first_within(element, &Selector::Tag("path"));
        let lookup = |name: &str| {
            self.document
                .attribute(element, name)
                .or_else(|| path.and_then(|path| self.document.attribute(path, name)))
        };

        let stroke = lookup("data-original-color")
            .or_else(|| lookup("stroke"))
            .map(|css| Color::parse_or(&css, default_arrow_stroke()))
            .unwrap_or_else(default_arrow_stroke);
        let width = lookup("stroke-width")
            .and_then(|width| width.trim().parse::<f64>().ok())
            .filter(|width| width.is_finite() && *width >= 0.0)
            .unwrap_or(DEFAULT_ARROW_STROKE_WIDTH);

        ArrowBaseline { stroke, width }
    }

    fn path_ref(&self, element: ElementId) -> PathRef {
        PathRef {
            element,
            length: self.measure(element),
        }
    }

    fn arrow_ref(&self, element: ElementId) -> ArrowRef {
        ArrowRef {
            element,
            baseline: self.baseline(element),
        }
    }

    fn first(&self, scope: ElementId, class: &'static str) -> Option<ElementId> {
        self.document
            .query_first_within(scope, &Selector::Class(class))
    }

    fn diagrams<T>(&self, kind: DiagramKind, parts: impl Fn(ElementId) -> T) -> Vec<T> {
        let found: Vec<T> = self
            .document
            .query_all(&Selector::Class(kind.class()))
            .into_iter()
            .map(parts)
            .collect();
        if !found.is_empty() {
            debug!(kind = kind.name(), count = found.len(); "Found diagrams");
        }
        found
    }
}
