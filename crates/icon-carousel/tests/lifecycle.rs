// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Activation/deactivation behavior of a single carousel instance.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::rc::Rc;

use icon_carousel::{Carousel, CarouselConfig, DomPort};
use icon_carousel_dry_tests::{EventKind, FakeDom, IconPage, ManualScheduler, ScrollRequest};

struct Fixture {
    dom: Rc<FakeDom>,
    scheduler: Rc<ManualScheduler>,
    config: Rc<CarouselConfig>,
    page: IconPage,
}

impl Fixture {
    fn uniform(count: usize) -> Self {
        let dom = Rc::new(FakeDom::new());
        let page = IconPage::uniform(&dom, count);
        Self {
            dom,
            scheduler: Rc::new(ManualScheduler::new()),
            config: Rc::new(CarouselConfig::default()),
            page,
        }
    }

    fn activate(&self) -> Option<Carousel<FakeDom>> {
        Carousel::activate(&self.dom, &self.scheduler, &self.config, self.page.container)
    }

    fn active_dots(&self, carousel: &Carousel<FakeDom>) -> Vec<usize> {
        carousel
            .dots()
            .filter(|(_, node)| self.dom.classes(**node).contains(&"active".to_string()))
            .map(|(i, _)| i)
            .collect()
    }
}

#[test]
fn activation_decorates_container_and_inserts_controls() {
    let fx = Fixture::uniform(3);
    let carousel = fx.activate().expect("activates");

    assert!(fx.dom.has_class(&fx.page.container, "carousel"));
    assert_eq!(carousel.dot_count(), 3);
    assert_eq!(carousel.items(), fx.page.items.as_slice());

    let controls = *carousel.controls();
    assert_eq!(fx.dom.next_sibling(fx.page.container), Some(controls));
    assert_eq!(fx.dom.next_sibling(controls), Some(fx.page.footer));
    assert_eq!(fx.dom.tag(controls), "div");
    assert_eq!(fx.dom.classes(controls), vec!["carousel-controls"]);

    for item in &fx.page.items {
        assert_eq!(fx.dom.style(*item, "box-sizing").as_deref(), Some("border-box"));
    }
    assert_eq!(fx.active_dots(&carousel), vec![0]);
}

#[test]
fn dots_carry_button_type_index_and_label() {
    let fx = Fixture::uniform(3);
    let carousel = fx.activate().unwrap();

    for (index, dot) in carousel.dots() {
        assert_eq!(fx.dom.tag(*dot), "button");
        assert_eq!(fx.dom.attribute(*dot, "type").as_deref(), Some("button"));
        assert_eq!(
            fx.dom.attribute(*dot, "data-index"),
            Some(index.to_string())
        );
        assert_eq!(
            fx.dom.attribute(*dot, "aria-label"),
            Some(format!("Go to testimonial {}", index + 1))
        );
    }
    assert_eq!(
        fx.dom.children(*carousel.controls()),
        carousel.dots().map(|(_, n)| *n).collect::<Vec<_>>()
    );
}

#[test]
fn second_activation_is_a_noop() {
    let fx = Fixture::uniform(3);
    let _first = fx.activate().unwrap();
    let before = fx.dom.snapshot(fx.dom.body());

    assert!(fx.activate().is_none());
    assert_eq!(fx.dom.snapshot(fx.dom.body()), before);
    assert_eq!(fx.dom.find_all(".carousel-controls").len(), 1);
    assert_eq!(
        fx.dom
            .classes(fx.page.container)
            .iter()
            .filter(|c| *c == "carousel")
            .count(),
        1
    );
}

#[test]
fn deactivate_restores_the_undecorated_document() {
    let fx = Fixture::uniform(4);
    let before = fx.dom.snapshot(fx.dom.body());

    let carousel = fx.activate().unwrap();
    assert_ne!(fx.dom.snapshot(fx.dom.body()), before);
    carousel.deactivate();

    assert_eq!(fx.dom.snapshot(fx.dom.body()), before);
    assert_eq!(fx.dom.listener_count(EventKind::Scroll), 0);
    assert_eq!(fx.dom.listener_count(EventKind::Click), 0);
}

#[test]
fn deactivate_tolerates_controls_removed_by_the_page() {
    let fx = Fixture::uniform(2);
    let carousel = fx.activate().unwrap();
    fx.dom.detach(carousel.controls());

    carousel.deactivate();
    assert!(!fx.dom.has_class(&fx.page.container, "carousel"));
    assert_eq!(fx.dom.style(fx.page.items[0], "box-sizing"), None);
}

#[test]
fn empty_container_gets_empty_controls() {
    let fx = Fixture::uniform(0);
    let carousel = fx.activate().unwrap();

    assert_eq!(carousel.dot_count(), 0);
    assert!(fx.dom.children(*carousel.controls()).is_empty());
    assert_eq!(carousel.update_active_dot(), None);
    assert!(!carousel.scroll_to_index(0));
}

#[test]
fn clicking_a_dot_smooth_scrolls_to_its_item() {
    let dom = Rc::new(FakeDom::new());
    let page = IconPage::build(&dom, &[0.0, 240.0, 480.0], 200.0);
    let fx = Fixture {
        dom,
        scheduler: Rc::new(ManualScheduler::new()),
        config: Rc::new(CarouselConfig::default()),
        page,
    };
    let carousel = fx.activate().unwrap();

    let (_, dot) = carousel.dots().nth(2).unwrap();
    fx.dom.click(*dot);

    assert_eq!(
        fx.dom.scroll_requests(),
        vec![ScrollRequest {
            node: fx.page.container,
            left: 480.0,
        }]
    );
}

#[test]
fn scroll_to_out_of_range_index_is_a_noop() {
    let fx = Fixture::uniform(3);
    let carousel = fx.activate().unwrap();
    assert!(!carousel.scroll_to_index(3));
    assert!(fx.dom.scroll_requests().is_empty());
    assert!(carousel.scroll_to_index(1));
    assert_eq!(fx.dom.scroll_requests().len(), 1);
}

#[test]
fn scroll_to_reads_current_items_not_captured_ones() {
    let fx = Fixture::uniform(3);
    let carousel = fx.activate().unwrap();
    fx.dom.detach(&fx.page.items[2]);

    assert!(!carousel.scroll_to_index(2));
    // The click handler for dot 2 re-queries too.
    let (_, dot) = carousel.dots().nth(2).unwrap();
    fx.dom.click(*dot);
    assert!(fx.dom.scroll_requests().is_empty());
}

#[test]
fn scrolling_moves_the_active_dot() {
    let dom = Rc::new(FakeDom::new());
    let page = IconPage::build(&dom, &[0.0, 100.0, 200.0], 80.0);
    let fx = Fixture {
        dom,
        scheduler: Rc::new(ManualScheduler::new()),
        config: Rc::new(CarouselConfig::default()),
        page,
    };
    let carousel = fx.activate().unwrap();
    assert_eq!(fx.active_dots(&carousel), vec![0]);

    fx.dom.scroll(fx.page.container, 150.0);
    assert_eq!(fx.active_dots(&carousel), vec![1]);

    // Inside the throttle window: deferred to the trailing edge.
    fx.scheduler.advance_to(40.0);
    fx.dom.scroll(fx.page.container, 170.0);
    assert_eq!(fx.active_dots(&carousel), vec![1]);
    fx.scheduler.advance_to(140.0);
    assert_eq!(fx.active_dots(&carousel), vec![2]);
}

#[test]
fn deactivation_cancels_a_pending_trailing_update() {
    let fx = Fixture::uniform(3);
    let carousel = fx.activate().unwrap();
    fx.dom.scroll(fx.page.container, 10.0);
    fx.scheduler.advance_to(20.0);
    fx.dom.scroll(fx.page.container, 250.0);
    assert_eq!(fx.scheduler.pending(), 1);

    carousel.deactivate();
    assert_eq!(fx.scheduler.pending(), 0);
    fx.scheduler.advance_to(500.0);
    assert_eq!(fx.scheduler.fired(), 0);
}

#[test]
fn failed_dot_creation_rolls_back() {
    let fx = Fixture::uniform(3);
    let before = fx.dom.snapshot(fx.dom.body());
    fx.dom.fail_create_element("button");

    assert!(fx.activate().is_none());
    // Only the controls panel was created before the first dot failed.
    assert_eq!(fx.dom.create_count(), 1);
    assert_eq!(fx.dom.snapshot(fx.dom.body()), before);
    assert_eq!(fx.dom.listener_count(EventKind::Click), 0);
    assert_eq!(fx.dom.listener_count(EventKind::Scroll), 0);

    // Nothing sticky: the next attempt succeeds.
    assert!(fx.activate().is_some());
    assert_eq!(fx.dom.create_count(), 1 + 1 + 3);
}

#[test]
fn deactivate_restores_inline_box_sizing_set_by_the_page() {
    let fx = Fixture::uniform(3);
    fx.dom
        .set_inline_style(fx.page.items[0], "box-sizing", "content-box");
    let before = fx.dom.snapshot(fx.dom.body());

    let carousel = fx.activate().unwrap();
    assert_eq!(
        fx.dom.style(fx.page.items[0], "box-sizing").as_deref(),
        Some("border-box")
    );
    carousel.deactivate();

    assert_eq!(
        fx.dom.style(fx.page.items[0], "box-sizing").as_deref(),
        Some("content-box")
    );
    assert_eq!(fx.dom.style(fx.page.items[1], "box-sizing"), None);
    assert_eq!(fx.dom.snapshot(fx.dom.body()), before);
}

#[test]
fn rollback_restores_inline_box_sizing_set_by_the_page() {
    let fx = Fixture::uniform(2);
    fx.dom
        .set_inline_style(fx.page.items[1], "box-sizing", "padding-box");
    let before = fx.dom.snapshot(fx.dom.body());
    fx.dom.fail_create_element("button");

    assert!(fx.activate().is_none());
    assert_eq!(fx.dom.snapshot(fx.dom.body()), before);
}

#[test]
fn detached_container_cannot_host_controls() {
    let fx = Fixture::uniform(2);
    fx.dom.detach(&fx.page.container);

    assert!(fx.activate().is_none());
    assert!(!fx.dom.has_class(&fx.page.container, "carousel"));
    assert_eq!(fx.dom.style(fx.page.items[0], "box-sizing"), None);
}

#[test]
fn custom_classes_and_label_are_used() {
    let dom = Rc::new(FakeDom::new());
    let page = IconPage::uniform(&dom, 2);
    let config = CarouselConfig::from_json(
        r#"{"dotLabel": "Ir para depoimento {n}",
            "classes": {"carousel": "is-carousel", "dot": "pip", "active": "on"}}"#,
    )
    .unwrap();
    let fx = Fixture {
        dom,
        scheduler: Rc::new(ManualScheduler::new()),
        config: Rc::new(config),
        page,
    };
    let carousel = fx.activate().unwrap();

    assert!(fx.dom.has_class(&fx.page.container, "is-carousel"));
    let (_, first) = carousel.dots().next().unwrap();
    assert_eq!(fx.dom.classes(*first), vec!["pip", "on"]);
    assert_eq!(
        fx.dom.attribute(*first, "aria-label").as_deref(),
        Some("Ir para depoimento 1")
    );
}
