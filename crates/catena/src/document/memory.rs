use indexmap::IndexMap;
use log::trace;

use catena_core::draw::{
    ARROW_CLASSES, ARROWHEAD_MARKER_ID, ArrowContainer, LABEL_CLASS, MarkerDef, NODE_CLASSES,
    NodeContainer, StrokeDefinition,
};

use super::{Document, ElementId, EventKind, ListenerId, Selector};

/// Description of an element to append to a [`MemoryDocument`].
///
/// # Examples
///
/// ```
/// use catena::document::{Document, ElementSpec, MemoryDocument, Selector};
///
/// let mut document = MemoryDocument::new();
/// let root = document.root();
/// let diagram = document.append(root, ElementSpec::new("svg").class("monad-diagram").top(400.0));
/// document.append(diagram, ElementSpec::new("path").class("monad-unit"));
///
/// assert_eq!(document.query_all(&Selector::Class("monad-unit")).len(), 1);
/// assert_eq!(document.element_top(diagram), Some(400.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    classes: Vec<String>,
    attributes: IndexMap<String, String>,
    path_length: Option<f64>,
    top: Option<f64>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds one or more whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attribute("id", id)
    }

    /// Sets the measured length reported for path-like elements.
    pub fn path_length(mut self, length: f64) -> Self {
        self.path_length = Some(length);
        self
    }

    /// Sets the absolute top offset of the element within the page.
    pub fn top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    spec: ElementSpec,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Listener {
    element: ElementId,
    kind: EventKind,
}

/// An in-memory [`Document`].
///
/// Elements live in an arena owned by the document. Queries walk the tree
/// depth first, so results come back in document order regardless of the
/// order elements were appended in.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    markers: Vec<MarkerDef>,
    listeners: IndexMap<ListenerId, Listener>,
    next_listener: u64,
    /// Construction strokes of inserted arrows, keyed by group and path.
    built_arrows: IndexMap<ElementId, StrokeDefinition>,
}

impl MemoryDocument {
    /// Creates a document holding only a `body` root element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                spec: ElementSpec::new("body"),
                parent: None,
                children: Vec::new(),
            }],
            markers: Vec::new(),
            listeners: IndexMap::new(),
            next_listener: 0,
            built_arrows: IndexMap::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId::new(0)
    }

    /// Appends a new element as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        assert!(
            parent.index() < self.nodes.len(),
            "parent {parent} is not part of this document"
        );
        let id = ElementId::new(self.nodes.len());
        self.nodes.push(Node {
            spec,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Inserts a built arrow: its group, the path and the optional label.
    ///
    /// The path is measured with the arrow's arc length and carries the
    /// stroke the arrow was built with. That stroke is also kept as the
    /// arrow's [built stroke](Document::built_arrow_stroke), so later edits
    /// to the path's attributes do not change it.
    pub fn append_arrow(&mut self, parent: ElementId, arrow: &ArrowContainer) -> ElementId {
        let geometry = arrow.geometry();
        let stroke = arrow.stroke();
        let group = self.append(parent, ElementSpec::new("g").class(ARROW_CLASSES));
        let path = self.append(
            group,
            ElementSpec::new("path")
                .attribute("d", geometry.path_data())
                .attribute("stroke", stroke.color().to_string())
                .attribute("stroke-width", stroke.width().to_string())
                .attribute("data-original-color", stroke.color().to_string())
                .attribute("fill", "none")
                .attribute("marker-end", format!("url(#{ARROWHEAD_MARKER_ID})"))
                .path_length(f64::from(geometry.arc_length())),
        );
        self.built_arrows.insert(group, stroke);
        self.built_arrows.insert(path, stroke);
        if let Some(label) = arrow.label() {
            self.append(
                group,
                ElementSpec::new("text")
                    .class(LABEL_CLASS)
                    .attribute("data-content", label),
            );
        }
        group
    }

    /// Inserts a built object node: its group, circle and label.
    pub fn append_node(&mut self, parent: ElementId, node: &NodeContainer) -> ElementId {
        let group = self.append(
            parent,
            ElementSpec::new("g")
                .class(NODE_CLASSES)
                .attribute("transform", node.transform()),
        );
        self.append(group, ElementSpec::new("circle"));
        self.append(group, ElementSpec::new("text"));
        group
    }

    /// Replaces or adds an attribute on an existing element.
    pub fn set_attribute(
        &mut self,
        element: ElementId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.spec.attributes.insert(name.into(), value.into());
        }
    }

    /// Moves an element to a new absolute top offset.
    pub fn set_top(&mut self, element: ElementId, top: f64) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.spec.top = Some(top);
        }
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.spec.tag.as_str())
    }

    pub fn classes(&self, element: ElementId) -> &[String] {
        self.node(element)
            .map(|node| node.spec.classes.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|node| node.parent)
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.node(element)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Marker definitions installed so far.
    pub fn markers(&self) -> &[MarkerDef] {
        &self.markers
    }

    /// Active subscriptions in the order they were made.
    pub fn listeners(&self) -> impl Iterator<Item = (ListenerId, ElementId, EventKind)> + '_ {
        self.listeners
            .iter()
            .map(|(id, listener)| (*id, listener.element, listener.kind))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Active subscriptions of `kind` on `element`.
    pub fn listeners_on(&self, element: ElementId, kind: EventKind) -> usize {
        self.listeners
            .values()
            .filter(|listener| listener.element == element && listener.kind == kind)
            .count()
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.index())
    }

    fn matches(&self, element: ElementId, selector: &Selector) -> bool {
        self.node(element).is_some_and(|node| {
            let attribute = |name: &str| node.spec.attributes.get(name).map(String::as_str);
            selector.matches(&node.spec.tag, &node.spec.classes, &attribute)
        })
    }

    /// Preorder walk of the descendants of `scope`, excluding `scope`.
    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut order = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(element) = stack.pop() {
            order.push(element);
            stack.extend(self.children(element).iter().rev().copied());
        }
        order
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.query_within(self.root(), selector)
    }

    fn query_within(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|element| self.matches(*element, selector))
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.node(element)
            .and_then(|node| node.spec.attributes.get(name))
            .cloned()
    }

    fn path_length(&self, element: ElementId) -> Option<f64> {
        self.node(element).and_then(|node| node.spec.path_length)
    }

    fn element_top(&self, element: ElementId) -> Option<f64> {
        self.node(element).and_then(|node| node.spec.top)
    }

    fn find_by_id(&self, id: &str) -> Option<ElementId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|element| self.attribute(*element, "id").as_deref() == Some(id))
    }

    fn built_arrow_stroke(&self, element: ElementId) -> Option<StrokeDefinition> {
        self.built_arrows.get(&element).copied()
    }

    fn has_marker(&self, id: &str) -> bool {
        self.markers.iter().any(|marker| marker.id() == id) || self.find_by_id(id).is_some()
    }

    fn install_marker(&mut self, marker: MarkerDef) {
        trace!(id = marker.id(); "Installing marker definition");
        self.markers.push(marker);
    }

    fn listen(&mut self, element: ElementId, kind: EventKind) -> ListenerId {
        let id = ListenerId::new(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, Listener { element, kind });
        id
    }

    fn unlisten(&mut self, listener: ListenerId) {
        self.listeners.shift_remove(&listener);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use catena_core::{
        draw::{ArrowStyle, NodeStyle, build_arrow, build_arrowhead_marker, build_object_node},
        geometry::Point,
    };

    use super::*;

    #[test]
    fn test_query_returns_document_order() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let first = document.append(root, ElementSpec::new("g"));
        let second = document.append(root, ElementSpec::new("g"));
        // Appended after `second`, but precedes it in document order.
        let nested = document.append(first, ElementSpec::new("path").class("morphism-arrow"));
        let late = document.append(second, ElementSpec::new("path").class("morphism-arrow"));

        assert_eq!(
            document.query_all(&Selector::Class("morphism-arrow")),
            vec![nested, late]
        );
        assert_eq!(document.query_all(&Selector::Tag("g")), vec![first, second]);
    }

    #[test]
    fn test_query_within_excludes_scope() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let outer = document.append(root, ElementSpec::new("g").class("commutative-diagram"));
        let inner = document.append(outer, ElementSpec::new("g").class("commutative-diagram"));

        let selector = Selector::Class("commutative-diagram");
        assert_eq!(document.query_within(outer, &selector), vec![inner]);
        assert_eq!(document.query_first_within(inner, &selector), None);
    }

    #[test]
    fn test_find_by_id_and_attributes() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let section = document.append(root, ElementSpec::new("section").id("intro").top(640.0));

        assert_eq!(document.find_by_id("intro"), Some(section));
        assert_eq!(document.find_by_id("missing"), None);
        assert_eq!(document.attribute(section, "id").as_deref(), Some("intro"));
        assert_eq!(document.element_top(section), Some(640.0));

        document.set_top(section, 700.0);
        document.set_attribute(section, "data-kind", "chapter");
        assert_eq!(document.element_top(section), Some(700.0));
        assert_eq!(document.attribute(section, "data-kind").as_deref(), Some("chapter"));
    }

    #[test]
    fn test_lookups_of_unknown_elements_are_empty() {
        let document = MemoryDocument::new();
        let unknown = ElementId::new(42);

        assert_eq!(document.attribute(unknown, "stroke"), None);
        assert_eq!(document.path_length(unknown), None);
        assert_eq!(document.element_top(unknown), None);
        assert!(document.children(unknown).is_empty());
        assert!(document.query_within(unknown, &Selector::Tag("path")).is_empty());
    }

    #[test]
    fn test_append_arrow_records_measured_path() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let arrow = build_arrow(
            Point::new(0.0, 0.0),
            Point::new(30.0, 40.0),
            Some("f"),
            &ArrowStyle::default(),
        );

        let group = document.append_arrow(root, &arrow);

        assert_eq!(document.query_all(&Selector::Class("morphism-arrow")), vec![group]);
        let path = document
            .query_first_within(group, &Selector::Tag("path"))
            .unwrap();
        assert_approx_eq!(f64, document.path_length(path).unwrap(), 50.0, epsilon = 1e-4);
        assert_eq!(
            document.attribute(path, "stroke"),
            Some(arrow.original_stroke().to_string())
        );
        assert_eq!(
            document.query_within(group, &Selector::Class("diagram-label")).len(),
            1
        );
        assert_eq!(document.built_arrow_stroke(group), Some(arrow.stroke()));
        assert_eq!(document.built_arrow_stroke(path), Some(arrow.stroke()));
        assert_eq!(document.built_arrow_stroke(root), None);
    }

    #[test]
    fn test_append_node() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let node = build_object_node(Point::new(50.0, 50.0), "A", &NodeStyle::default());

        let group = document.append_node(root, &node);

        assert_eq!(document.tag(group), Some("g"));
        assert_eq!(
            document.attribute(group, "transform").as_deref(),
            Some("translate(50, 50)")
        );
        assert_eq!(document.children(group).len(), 2);
        assert_eq!(
            document.query_all(&Selector::Class("category-object")),
            vec![group]
        );
    }

    #[test]
    fn test_markers_and_listeners() {
        let mut document = MemoryDocument::new();
        let root = document.root();
        let node = document.append(root, ElementSpec::new("g"));

        assert!(!document.has_marker("arrowhead"));
        document.install_marker(build_arrowhead_marker());
        assert!(document.has_marker("arrowhead"));
        assert_eq!(document.markers().len(), 1);

        let enter = document.listen(node, EventKind::PointerEnter);
        let click = document.listen(node, EventKind::Click);
        assert_eq!(document.listener_count(), 2);
        assert_eq!(document.listeners_on(node, EventKind::Click), 1);

        document.unlisten(enter);
        document.unlisten(enter);
        assert_eq!(
            document.listeners().collect::<Vec<_>>(),
            vec![(click, node, EventKind::Click)]
        );
    }
}
