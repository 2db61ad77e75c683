// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Browser tests for the `web-sys` port implementations.
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::rc::Rc;

use icon_carousel::{Carousel, CarouselConfig, ChangeRegistration, DomPort, ViewportSource};
use icon_carousel_web::{BrowserScheduler, MediaQueryViewport, WebDom};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Fresh `<section><div class="icons">…</div><footer/></section>` in `<body>`.
fn page(doc: &Document, count: usize) -> (Element, Element) {
    let section = doc.create_element("section").unwrap();
    let container = doc.create_element("div").unwrap();
    container.set_class_name("icons");
    for _ in 0..count {
        let item = doc.create_element("div").unwrap();
        item.set_class_name("icon");
        container.append_child(&item).unwrap();
    }
    section.append_child(&container).unwrap();
    let footer = doc.create_element("footer").unwrap();
    section.append_child(&footer).unwrap();
    doc.body().unwrap().append_child(&section).unwrap();
    (section, container)
}

#[wasm_bindgen_test]
fn activation_inserts_dots_after_container() {
    let doc = document();
    let (section, container) = page(&doc, 3);
    let dom = Rc::new(WebDom::new(doc.clone()));
    let config = Rc::new(CarouselConfig::default());

    let carousel =
        Carousel::activate(&dom, &Rc::new(BrowserScheduler), &config, container.clone()).unwrap();

    assert!(container.class_list().contains("carousel"));
    let controls = container.next_element_sibling().unwrap();
    assert!(controls.class_list().contains("carousel-controls"));
    assert_eq!(controls.child_element_count(), 3);
    let first = controls.first_element_child().unwrap();
    assert_eq!(first.tag_name(), "BUTTON");
    assert_eq!(
        first.get_attribute("aria-label").as_deref(),
        Some("Go to testimonial 1")
    );

    carousel.deactivate();
    assert!(!container.class_list().contains("carousel"));
    assert_eq!(
        container.next_element_sibling().unwrap().tag_name(),
        "FOOTER"
    );
    section.remove();
}

#[wasm_bindgen_test]
fn queries_are_scoped_to_the_container() {
    let doc = document();
    let (section, container) = page(&doc, 2);
    let dom = WebDom::new(doc);

    assert_eq!(dom.query_selector_all(&container, ".icon").len(), 2);
    assert!(dom.query_selector_all(&container, "[").is_empty());
    assert!(dom.query_selector("[").is_none());
    section.remove();
}

#[wasm_bindgen_test]
fn media_query_reports_a_registration() {
    let window = web_sys::window().unwrap();
    let viewport = MediaQueryViewport::new(&window, icon_carousel::Breakpoint::new(767)).unwrap();
    assert_ne!(viewport.probe(), ChangeRegistration::Unavailable);
    let subscription = viewport.subscribe(viewport.probe(), Box::new(|| {}));
    assert!(subscription.is_some());
}

fn viewport_is_mobile() -> bool {
    web_sys::window()
        .unwrap()
        .match_media("(max-width: 767px)")
        .unwrap()
        .unwrap()
        .matches()
}

#[wasm_bindgen_test]
fn refresh_follows_a_replaced_container() {
    let doc = document();
    let (section, old) = page(&doc, 2);
    let mut handle = icon_carousel_web::mount(JsValue::UNDEFINED).unwrap();
    let mobile = viewport_is_mobile();
    assert_eq!(handle.is_enabled(), mobile);

    let replacement = doc.create_element("div").unwrap();
    replacement.set_class_name("icons");
    for _ in 0..3 {
        let item = doc.create_element("div").unwrap();
        item.set_class_name("icon");
        replacement.append_child(&item).unwrap();
    }
    section.replace_child(&replacement, &old).unwrap();
    handle.refresh();

    assert_eq!(handle.is_enabled(), mobile);
    assert_eq!(replacement.class_list().contains("carousel"), mobile);
    assert!(!old.class_list().contains("carousel"));
    let panels = doc.query_selector_all(".carousel-controls").unwrap();
    assert_eq!(panels.length(), u32::from(mobile));

    handle.dispose();
    assert!(!replacement.class_list().contains("carousel"));
    section.remove();
}

#[wasm_bindgen_test]
fn mount_and_dispose_leave_the_page_clean() {
    let doc = document();
    let (section, container) = page(&doc, 2);

    let mut handle = icon_carousel_web::mount(JsValue::UNDEFINED).unwrap();
    handle.dispose();

    assert!(!handle.is_enabled());
    assert!(!container.class_list().contains("carousel"));
    assert_eq!(
        container.next_element_sibling().unwrap().tag_name(),
        "FOOTER"
    );
    section.remove();
}
