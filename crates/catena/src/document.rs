//! The host document surface.
//!
//! Catena never owns the nodes it animates. It finds them through a
//! [`Document`], reads a handful of presentation values from them and
//! subscribes to pointer events on them. Everything else (layout, painting,
//! event dispatch) belongs to the host.
//!
//! Elements are addressed by opaque [`ElementId`] handles and discovered with
//! [`Selector`]s, which also render to CSS selector strings for hosts backed
//! by a real DOM.
//!
//! [`MemoryDocument`] is a complete in-memory implementation used by tests and
//! by the command line preview.

mod memory;

use std::fmt;

use catena_core::draw::{MarkerDef, StrokeDefinition};

pub use memory::{ElementSpec, MemoryDocument};

/// Opaque handle to a host-owned element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Wraps a host-specific element index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to an event subscription returned by [`Document::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Pointer events Catena subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerEnter,
    PointerLeave,
    Click,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
            Self::Click => "click",
        };
        write!(f, "{name}")
    }
}

/// A structural element query.
///
/// Only the vocabulary Catena needs is supported: a single class, a tag
/// name, a tag whose attribute starts with a prefix, and a union of those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Elements carrying the class, `.name`.
    Class(&'static str),
    /// Elements with the tag name, `name`.
    Tag(&'static str),
    /// Elements with the tag whose attribute value starts with `prefix`,
    /// `tag[attribute^="prefix"]`.
    AttributePrefix {
        tag: &'static str,
        attribute: &'static str,
        prefix: &'static str,
    },
    /// Elements matching any of the selectors, `a, b`.
    Any(Vec<Selector>),
}

impl Selector {
    /// Union of several class selectors.
    pub fn any_class(classes: &[&'static str]) -> Self {
        Self::Any(classes.iter().copied().map(Self::Class).collect())
    }

    /// Union of several tag selectors.
    pub fn any_tag(tags: &[&'static str]) -> Self {
        Self::Any(tags.iter().copied().map(Self::Tag).collect())
    }

    /// Tests the selector against an element's tag, classes and attributes.
    pub fn matches<'a, A>(&self, tag: &str, classes: &[String], attribute: &A) -> bool
    where
        A: Fn(&str) -> Option<&'a str>,
    {
        match self {
            Self::Class(class) => classes.iter().any(|candidate| candidate == class),
            Self::Tag(name) => tag.eq_ignore_ascii_case(name),
            Self::AttributePrefix {
                tag: name,
                attribute: key,
                prefix,
            } => {
                tag.eq_ignore_ascii_case(name)
                    && attribute(key).is_some_and(|value| value.starts_with(prefix))
            }
            Self::Any(selectors) => selectors
                .iter()
                .any(|selector| selector.matches(tag, classes, attribute)),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => write!(f, ".{class}"),
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::AttributePrefix {
                tag,
                attribute,
                prefix,
            } => write!(f, "{tag}[{attribute}^=\"{prefix}\"]"),
            Self::Any(selectors) => {
                for (i, selector) in selectors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{selector}")?;
                }
                Ok(())
            }
        }
    }
}

/// Queryable tree of host elements.
///
/// Query results are always in document order. Lookups of elements that
/// no longer exist return `None` or nothing rather than failing: the host
/// may remove nodes at any time.
pub trait Document {
    /// All elements in the document matching `selector`.
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// All descendants of `scope` matching `selector`, excluding `scope`
    /// itself.
    fn query_within(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId>;

    /// First descendant of `scope` matching `selector`.
    fn query_first_within(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        self.query_within(scope, selector).into_iter().next()
    }

    /// The value of an attribute on `element`.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Measured length of a path-like element, `None` when the element is
    /// not measurable.
    fn path_length(&self, element: ElementId) -> Option<f64>;

    /// Absolute vertical offset of the element's top edge within the page.
    fn element_top(&self, element: ElementId) -> Option<f64>;

    /// The element whose `id` attribute equals `id`.
    fn find_by_id(&self, id: &str) -> Option<ElementId>;

    /// Stroke a built arrow was constructed with, recorded when the arrow
    /// was inserted as `element`.
    ///
    /// Arrows that come from host markup have no record.
    fn built_arrow_stroke(&self, _element: ElementId) -> Option<StrokeDefinition> {
        None
    }

    /// Whether a marker with the identifier is already defined.
    fn has_marker(&self, id: &str) -> bool;

    /// Inserts a marker definition at document level.
    fn install_marker(&mut self, marker: MarkerDef);

    /// Subscribes to `kind` events on `element`.
    fn listen(&mut self, element: ElementId, kind: EventKind) -> ListenerId;

    /// Removes a subscription. Unknown listeners are ignored.
    fn unlisten(&mut self, listener: ListenerId);
}
