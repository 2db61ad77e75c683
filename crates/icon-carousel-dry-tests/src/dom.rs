// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory DOM fake for exercising the carousel without a browser.

use icon_carousel::{DomError, DomPort, ItemMetrics};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Handle to an element in a [`FakeDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Event kinds the fake can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// `scroll` (always registered passive).
    Scroll,
    /// `click`.
    Click,
}

/// A recorded smooth `scrollTo` request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    /// Element asked to scroll.
    pub node: NodeId,
    /// Requested `left` offset.
    pub left: f64,
}

/// Structural snapshot of a subtree, for before/after comparisons.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSnapshot {
    /// Tag name.
    pub tag: String,
    /// Class list in insertion order.
    pub classes: Vec<String>,
    /// Attributes.
    pub attributes: BTreeMap<String, String>,
    /// Inline style properties.
    pub style: BTreeMap<String, String>,
    /// Child snapshots in order.
    pub children: Vec<NodeSnapshot>,
}

#[derive(Debug, Default)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    metrics: ItemMetrics,
    scroll_left: f64,
}

type Handler = Rc<RefCell<Box<dyn FnMut()>>>;

struct ListenerEntry {
    node: NodeId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: BTreeMap<u64, ListenerEntry>,
}

/// Listener handle returned by [`FakeDom`]; dropping it unregisters the handler.
pub struct FakeListener {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry.borrow_mut().entries.remove(&self.id);
            drop(removed);
        }
    }
}

/// In-memory implementation of [`DomPort`].
///
/// The document starts with a single `<body>` root. Selectors support a
/// single `.class` or a bare tag name, which is all the carousel uses.
/// Scroll requests are recorded and applied immediately but never dispatch
/// a `scroll` event; tests fire events explicitly with [`scroll`](Self::scroll)
/// and [`click`](Self::click).
///
/// # Example
///
/// ```
/// use icon_carousel::DomPort;
/// use icon_carousel_dry_tests::FakeDom;
///
/// let dom = FakeDom::new();
/// let list = dom.append(dom.body(), "div", &["icons"]);
/// dom.append(list, "div", &["icon"]);
/// assert_eq!(dom.query_selector(".icons"), Some(list));
/// assert_eq!(dom.query_selector_all(&list, ".icon").len(), 1);
/// ```
pub struct FakeDom {
    elements: RefCell<Vec<Element>>,
    listeners: Rc<RefCell<Registry>>,
    scroll_requests: RefCell<Vec<ScrollRequest>>,
    fail_create: RefCell<Option<String>>,
    create_count: Cell<usize>,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    /// Create a document holding only `<body>`.
    pub fn new() -> Self {
        Self {
            elements: RefCell::new(vec![Element {
                tag: "body".into(),
                ..Element::default()
            }]),
            listeners: Rc::new(RefCell::new(Registry::default())),
            scroll_requests: RefCell::new(Vec::new()),
            fail_create: RefCell::new(None),
            create_count: Cell::new(0),
        }
    }

    /// The document root.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Create an element with `classes` and append it to `parent`.
    pub fn append(&self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.alloc(tag);
        {
            let mut elements = self.elements.borrow_mut();
            elements[node.0].classes = classes.iter().map(|c| (*c).to_string()).collect();
        }
        self.link(parent, node, None);
        node
    }

    /// Set layout metrics reported for `node`.
    pub fn set_metrics(&self, node: NodeId, offset_left: f64, client_width: f64) {
        self.elements.borrow_mut()[node.0].metrics = ItemMetrics {
            offset_left,
            client_width,
        };
    }

    /// Set an inline style directly, as page markup would.
    pub fn set_inline_style(&self, node: NodeId, property: &str, value: &str) {
        self.elements.borrow_mut()[node.0]
            .style
            .insert(property.into(), value.into());
    }

    /// Make the next `create_element(tag)` fail.
    pub fn fail_create_element(&self, tag: &str) {
        *self.fail_create.borrow_mut() = Some(tag.into());
    }

    /// Number of successful `create_element` calls.
    pub fn create_count(&self) -> usize {
        self.create_count.get()
    }

    /// Set `scrollLeft` and dispatch a `scroll` event, like a user swipe.
    pub fn scroll(&self, node: NodeId, left: f64) {
        self.elements.borrow_mut()[node.0].scroll_left = left;
        self.dispatch(node, EventKind::Scroll);
    }

    /// Dispatch a `click` on `node`.
    pub fn click(&self, node: NodeId) {
        self.dispatch(node, EventKind::Click);
    }

    /// Run every handler registered for (`node`, `kind`).
    pub fn dispatch(&self, node: NodeId, kind: EventKind) {
        let handlers: Vec<Handler> = self
            .listeners
            .borrow()
            .entries
            .values()
            .filter(|e| e.node == node && e.kind == kind)
            .map(|e| Rc::clone(&e.handler))
            .collect();
        for handler in handlers {
            (*handler.borrow_mut())();
        }
    }

    /// Number of live listeners of `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .entries
            .values()
            .filter(|e| e.kind == kind)
            .count()
    }

    /// Every `scrollTo` request so far.
    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.scroll_requests.borrow().clone()
    }

    /// Class list of `node`.
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.elements.borrow()[node.0].classes.clone()
    }

    /// Inline style property of `node`.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.elements.borrow()[node.0].style.get(property).cloned()
    }

    /// Attribute of `node`.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.elements.borrow()[node.0].attributes.get(name).cloned()
    }

    /// Tag name of `node`.
    pub fn tag(&self, node: NodeId) -> String {
        self.elements.borrow()[node.0].tag.clone()
    }

    /// Children of `node`.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.elements.borrow()[node.0].children.clone()
    }

    /// Parent of `node`, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements.borrow()[node.0].parent
    }

    /// Sibling immediately after `node`.
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let elements = self.elements.borrow();
        let siblings = &elements[parent.0].children;
        let idx = siblings.iter().position(|&c| c == node)?;
        siblings.get(idx + 1).copied()
    }

    /// Deep structural snapshot of `node`.
    pub fn snapshot(&self, node: NodeId) -> NodeSnapshot {
        let elements = self.elements.borrow();
        snapshot_of(&elements, node)
    }

    /// Every element under the document root matching `selector`.
    pub fn find_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_selector_all(&self.body(), selector)
    }

    fn alloc(&self, tag: &str) -> NodeId {
        let mut elements = self.elements.borrow_mut();
        elements.push(Element {
            tag: tag.into(),
            ..Element::default()
        });
        NodeId(elements.len() - 1)
    }

    fn unlink(&self, node: NodeId) -> bool {
        let mut elements = self.elements.borrow_mut();
        let Some(parent) = elements[node.0].parent.take() else {
            return false;
        };
        elements[parent.0].children.retain(|&c| c != node);
        true
    }

    fn link(&self, parent: NodeId, node: NodeId, at: Option<usize>) {
        self.unlink(node);
        let mut elements = self.elements.borrow_mut();
        let children = &mut elements[parent.0].children;
        match at {
            Some(idx) if idx <= children.len() => children.insert(idx, node),
            _ => children.push(node),
        }
        elements[node.0].parent = Some(parent);
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let elements = self.elements.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = elements[scope.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(elements[node.0].children.iter().rev().copied());
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let elements = self.elements.borrow();
        let element = &elements[node.0];
        match selector.strip_prefix('.') {
            Some(class) => element.classes.iter().any(|c| c == class),
            None => element.tag.eq_ignore_ascii_case(selector),
        }
    }

    fn listen(&self, node: NodeId, kind: EventKind, handler: Box<dyn FnMut()>) -> FakeListener {
        let mut registry = self.listeners.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.entries.insert(
            id,
            ListenerEntry {
                node,
                kind,
                handler: Rc::new(RefCell::new(handler)),
            },
        );
        FakeListener {
            registry: Rc::downgrade(&self.listeners),
            id,
        }
    }
}

fn snapshot_of(elements: &[Element], node: NodeId) -> NodeSnapshot {
    let element = &elements[node.0];
    NodeSnapshot {
        tag: element.tag.clone(),
        classes: element.classes.clone(),
        attributes: element.attributes.clone(),
        style: element.style.clone(),
        children: element
            .children
            .iter()
            .map(|&c| snapshot_of(elements, c))
            .collect(),
    }
}

impl DomPort for FakeDom {
    type Node = NodeId;
    type Listener = FakeListener;

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.descendants(self.body())
            .into_iter()
            .find(|&n| self.matches(n, selector))
    }

    fn query_selector_all(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.descendants(*scope)
            .into_iter()
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.elements.borrow()[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut elements = self.elements.borrow_mut();
        let classes = &mut elements[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.into());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.elements.borrow_mut()[node.0]
            .classes
            .retain(|c| c != class);
    }

    fn inline_style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.style(*node, property)
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.set_inline_style(*node, property, value);
    }

    fn clear_style(&self, node: &NodeId, property: &str) {
        self.elements.borrow_mut()[node.0].style.remove(property);
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.elements.borrow_mut()[node.0]
            .attributes
            .insert(name.into(), value.into());
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        let failing = self.fail_create.borrow().as_deref() == Some(tag);
        if failing {
            *self.fail_create.borrow_mut() = None;
            return Err(DomError::CreateElement(tag.into()));
        }
        self.create_count.set(self.create_count.get() + 1);
        Ok(self.alloc(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.link(*parent, *child, None);
        Ok(())
    }

    fn insert_after(&self, reference: &NodeId, node: &NodeId) -> Result<(), DomError> {
        self.unlink(*node);
        let parent = self.parent(*reference).ok_or(DomError::Detached)?;
        let idx = self.elements.borrow()[parent.0]
            .children
            .iter()
            .position(|c| c == reference)
            .ok_or(DomError::Detached)?;
        self.link(parent, *node, Some(idx + 1));
        Ok(())
    }

    fn detach(&self, node: &NodeId) -> bool {
        self.unlink(*node)
    }

    fn scroll_left(&self, node: &NodeId) -> f64 {
        self.elements.borrow()[node.0].scroll_left
    }

    fn metrics(&self, node: &NodeId) -> ItemMetrics {
        self.elements.borrow()[node.0].metrics
    }

    fn smooth_scroll_to(&self, node: &NodeId, left: f64) {
        self.elements.borrow_mut()[node.0].scroll_left = left;
        self.scroll_requests
            .borrow_mut()
            .push(ScrollRequest { node: *node, left });
    }

    fn on_scroll(&self, node: &NodeId, handler: Box<dyn FnMut()>) -> FakeListener {
        self.listen(*node, EventKind::Scroll, handler)
    }

    fn on_click(&self, node: &NodeId, handler: Box<dyn FnMut()>) -> FakeListener {
        self.listen(*node, EventKind::Click, handler)
    }
}
