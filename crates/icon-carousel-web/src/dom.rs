// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `DomPort` over `web-sys`.

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use icon_carousel::{DomError, DomPort, ItemMetrics};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions};

/// Document adapter. Listener handles are `gloo` [`EventListener`]s, which
/// remove themselves when dropped.
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// Wrap `document`.
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn backend(err: &JsValue) -> DomError {
    DomError::Backend(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

impl DomPort for WebDom {
    type Node = Element;
    type Listener = EventListener;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                warn!(selector, ?err, "querySelector rejected selector");
                None
            }
        }
    }

    fn query_selector_all(&self, scope: &Element, selector: &str) -> Vec<Element> {
        let list = match scope.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!(selector, ?err, "querySelectorAll rejected selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            warn!(class, ?err, "classList.add failed");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            warn!(class, ?err, "classList.remove failed");
        }
    }

    fn inline_style(&self, node: &Element, property: &str) -> Option<String> {
        let el = node.dyn_ref::<HtmlElement>()?;
        el.style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = el.style().set_property(property, value) {
            warn!(property, ?err, "style.setProperty failed");
        }
    }

    fn clear_style(&self, node: &Element, property: &str) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = el.style().remove_property(property) {
            warn!(property, ?err, "style.removeProperty failed");
        }
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            warn!(name, ?err, "setAttribute failed");
        }
    }

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(|_| DomError::CreateElement(tag.into()))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .append_child(child)
            .map(drop)
            .map_err(|err| backend(&err))
    }

    fn insert_after(&self, reference: &Element, node: &Element) -> Result<(), DomError> {
        let parent = reference.parent_node().ok_or(DomError::Detached)?;
        parent
            .insert_before(node, reference.next_sibling().as_ref())
            .map(drop)
            .map_err(|err| backend(&err))
    }

    fn detach(&self, node: &Element) -> bool {
        match node.parent_node() {
            Some(parent) => parent.remove_child(node).is_ok(),
            None => false,
        }
    }

    fn scroll_left(&self, node: &Element) -> f64 {
        f64::from(node.scroll_left())
    }

    fn metrics(&self, node: &Element) -> ItemMetrics {
        ItemMetrics {
            offset_left: node
                .dyn_ref::<HtmlElement>()
                .map_or(0.0, |el| f64::from(el.offset_left())),
            client_width: f64::from(node.client_width()),
        }
    }

    fn smooth_scroll_to(&self, node: &Element, left: f64) {
        let options = ScrollToOptions::new();
        options.set_left(left);
        options.set_behavior(ScrollBehavior::Smooth);
        node.scroll_to_with_scroll_to_options(&options);
    }

    fn on_scroll(&self, node: &Element, mut handler: Box<dyn FnMut()>) -> EventListener {
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        };
        EventListener::new_with_options(node, "scroll", options, move |_: &Event| handler())
    }

    fn on_click(&self, node: &Element, mut handler: Box<dyn FnMut()>) -> EventListener {
        EventListener::new(node, "click", move |_: &Event| handler())
    }
}
