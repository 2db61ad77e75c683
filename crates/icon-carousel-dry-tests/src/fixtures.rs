// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Page fixtures and a ready-wired controller harness.

use crate::dom::{FakeDom, NodeId};
use crate::timer::ManualScheduler;
use crate::viewport::FakeViewport;
use icon_carousel::{
    bind_viewport, Breakpoint, CarouselConfig, CarouselController, ChangeRegistration,
    ViewportBinding,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Default item width used by [`IconPage::uniform`].
pub const ITEM_WIDTH: f64 = 100.0;

/// A testimonial section: `body > section > (h2, div.icons > div.icon*, footer)`.
#[derive(Clone, Debug)]
pub struct IconPage {
    /// The `<section>` wrapping the list.
    pub section: NodeId,
    /// The `.icons` container.
    pub container: NodeId,
    /// The `.icon` items, in order.
    pub items: Vec<NodeId>,
    /// Sibling that originally follows the container.
    pub footer: NodeId,
}

impl IconPage {
    /// Build a page whose items sit at `offsets` with a shared `client_width`.
    pub fn build(dom: &FakeDom, offsets: &[f64], client_width: f64) -> Self {
        let section = dom.append(dom.body(), "section", &["testimonials"]);
        dom.append(section, "h2", &[]);
        let container = dom.append(section, "div", &["icons"]);
        let items = offsets
            .iter()
            .map(|&offset| {
                let item = dom.append(container, "div", &["icon"]);
                dom.set_metrics(item, offset, client_width);
                item
            })
            .collect();
        let footer = dom.append(section, "footer", &[]);
        Self {
            section,
            container,
            items,
            footer,
        }
    }

    /// `count` back-to-back items of [`ITEM_WIDTH`].
    pub fn uniform(dom: &FakeDom, count: usize) -> Self {
        let offsets: Vec<f64> = (0..count)
            .map(|i| f64::from(u32::try_from(i).unwrap_or(u32::MAX)) * ITEM_WIDTH)
            .collect();
        Self::build(dom, &offsets, ITEM_WIDTH)
    }
}

/// Controller wired to fakes, the way a page bootstrap wires the real thing.
pub struct Harness {
    /// Fake document.
    pub dom: Rc<FakeDom>,
    /// Virtual clock.
    pub scheduler: Rc<ManualScheduler>,
    /// Fake media query.
    pub viewport: Rc<FakeViewport>,
    /// Controller under test.
    pub controller: Rc<RefCell<CarouselController<FakeDom, ManualScheduler>>>,
}

impl Harness {
    /// Harness with the default config and a viewport `width` px wide.
    pub fn new(width: u32) -> Self {
        Self::with_config(CarouselConfig::default(), width, ChangeRegistration::Modern)
    }

    /// Harness with explicit config and registration capability.
    pub fn with_config(
        config: CarouselConfig,
        width: u32,
        capability: ChangeRegistration,
    ) -> Self {
        let breakpoint = Breakpoint::new(config.max_mobile_width_px);
        let dom = Rc::new(FakeDom::new());
        let scheduler = Rc::new(ManualScheduler::new());
        let viewport = Rc::new(FakeViewport::with_capability(breakpoint, width, capability));
        let controller = Rc::new(RefCell::new(CarouselController::new(
            Rc::clone(&dom),
            Rc::clone(&scheduler),
            config,
        )));
        Self {
            dom,
            scheduler,
            viewport,
            controller,
        }
    }

    /// Fire page-ready: run the initial pass and subscribe to changes.
    pub fn page_ready(&self) -> ViewportBinding<FakeViewport> {
        bind_viewport(&self.controller, &self.viewport)
    }

    /// Whether the controller currently holds a carousel.
    pub fn is_enabled(&self) -> bool {
        self.controller.borrow().is_enabled()
    }

    /// Dots currently in the document.
    pub fn dots(&self) -> Vec<NodeId> {
        let selector = self.controller.borrow().config().dot_selector();
        self.dom.find_all(&selector)
    }

    /// Indices of dots carrying the active class.
    pub fn active_dots(&self) -> Vec<usize> {
        let active = self.controller.borrow().config().classes.active.clone();
        self.dots()
            .into_iter()
            .enumerate()
            .filter(|(_, dot)| self.dom.classes(*dot).contains(&active))
            .map(|(i, _)| i)
            .collect()
    }
}
