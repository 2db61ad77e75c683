// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! DOM port: the slice of the document API the carousel needs.

use core::fmt::Debug;
use thiserror::Error;

/// Error type for DOM mutations an adapter could not perform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// `createElement` failed.
    #[error("could not create <{0}>")]
    CreateElement(String),
    /// The reference node has no parent, so nothing can be inserted next to it.
    #[error("node is not attached to a parent")]
    Detached,
    /// A backend-specific error occurred.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Layout metrics of one item, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemMetrics {
    /// `offsetLeft` relative to the scroll container.
    pub offset_left: f64,
    /// `clientWidth` of the item.
    pub client_width: f64,
}

impl ItemMetrics {
    /// Scroll offset past which this item counts as current.
    pub fn activation_threshold(&self) -> f64 {
        self.offset_left - self.client_width / 2.0
    }
}

/// Document port implemented by the browser adapter and by test fakes.
///
/// All methods take `&self`; adapters use interior mutability, matching how
/// the DOM itself behaves. Listener handles are RAII: dropping one
/// unregisters the callback it was returned for.
pub trait DomPort: 'static {
    /// Handle to an element.
    type Node: Clone + PartialEq + Debug + 'static;
    /// Registration handle; dropping it removes the listener.
    type Listener: 'static;

    /// First element in the document matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;
    /// Descendants of `scope` matching `selector`, in document order.
    fn query_selector_all(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    /// Whether `node` carries `class`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// Add `class` to `node`.
    fn add_class(&self, node: &Self::Node, class: &str);
    /// Remove `class` from `node`.
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Inline style property of `node`, or `None` when it is not set inline.
    fn inline_style(&self, node: &Self::Node, property: &str) -> Option<String>;
    /// Set an inline style property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// Remove an inline style property, restoring the stylesheet value.
    fn clear_style(&self, node: &Self::Node, property: &str);
    /// Set an attribute.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;
    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;
    /// Insert `node` as the next sibling of `reference`.
    fn insert_after(&self, reference: &Self::Node, node: &Self::Node) -> Result<(), DomError>;
    /// Remove `node` from its parent. Returns `false` if it was already detached.
    fn detach(&self, node: &Self::Node) -> bool;

    /// Current horizontal scroll offset of `node`.
    fn scroll_left(&self, node: &Self::Node) -> f64;
    /// Layout metrics of `node`.
    fn metrics(&self, node: &Self::Node) -> ItemMetrics;
    /// Request an animated horizontal scroll of `node` to `left`. Not awaited.
    fn smooth_scroll_to(&self, node: &Self::Node, left: f64);

    /// Register a passive `scroll` listener on `node`.
    fn on_scroll(&self, node: &Self::Node, handler: Box<dyn FnMut()>) -> Self::Listener;
    /// Register a `click` listener on `node`.
    fn on_click(&self, node: &Self::Node, handler: Box<dyn FnMut()>) -> Self::Listener;
}
