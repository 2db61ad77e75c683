// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lifecycle controller: keeps carousel attachment in step with the viewport.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::dom::DomPort;
use crate::timer::Scheduler;
use crate::viewport::{Breakpoint, ChangeRegistration, ViewportMode, ViewportSource};

/// Owns at most one [`Carousel`] and attaches or detaches it on viewport changes.
pub struct CarouselController<D: DomPort, S: Scheduler> {
    dom: Rc<D>,
    scheduler: Rc<S>,
    config: Rc<CarouselConfig>,
    active: Option<Carousel<D>>,
}

impl<D: DomPort, S: Scheduler> CarouselController<D, S> {
    /// Create a disabled controller.
    pub fn new(dom: Rc<D>, scheduler: Rc<S>, config: CarouselConfig) -> Self {
        Self {
            dom,
            scheduler,
            config: Rc::new(config),
            active: None,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Mobile breakpoint derived from the config.
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::new(self.config.max_mobile_width_px)
    }

    /// Whether a carousel is currently attached.
    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// The attached carousel, if any.
    pub fn carousel(&self) -> Option<&Carousel<D>> {
        self.active.as_ref()
    }

    /// React to the current viewport mode.
    ///
    /// The container is re-queried on every call. In mobile mode a found
    /// container is activated (a missing one leaves state untouched); in
    /// non-mobile mode the carousel is always deactivated.
    pub fn handle_viewport_change(&mut self, mode: ViewportMode) {
        debug!(?mode, "viewport change");
        match mode {
            ViewportMode::Mobile => {
                let container = self.dom.query_selector(&self.config.container_selector);
                if container.is_none() {
                    debug!(
                        selector = %self.config.container_selector,
                        "no container; waiting for the next change"
                    );
                }
                self.activate(container);
            }
            ViewportMode::NonMobile => {
                self.deactivate();
            }
        }
    }

    /// Attach to `container`. Returns whether a new carousel was attached.
    ///
    /// `None`, or a container already carrying the marker class, is a no-op.
    /// When the page swapped the container element, the instance attached to
    /// the old element is deactivated first.
    pub fn activate(&mut self, container: Option<D::Node>) -> bool {
        let Some(container) = container else {
            return false;
        };
        if let Some(current) = &self.active {
            if *current.container() == container {
                return false;
            }
            info!("container element replaced; detaching previous carousel");
            self.deactivate();
        }
        self.active = Carousel::activate(&self.dom, &self.scheduler, &self.config, container);
        self.active.is_some()
    }

    /// Detach the current carousel. Returns whether one was attached.
    pub fn deactivate(&mut self) -> bool {
        match self.active.take() {
            Some(carousel) => {
                carousel.deactivate();
                true
            }
            None => false,
        }
    }
}

/// Live subscription tying a controller to a [`ViewportSource`].
///
/// Dropping the binding unregisters the change listener.
pub struct ViewportBinding<V: ViewportSource> {
    registration: ChangeRegistration,
    subscription: Option<V::Subscription>,
}

impl<V: ViewportSource> ViewportBinding<V> {
    /// Registration API chosen by the startup probe.
    pub fn registration(&self) -> ChangeRegistration {
        self.registration
    }

    /// Whether later breakpoint crossings will be observed.
    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }
}

/// Run the page-ready pass and subscribe to breakpoint crossings.
///
/// The registration API is probed once here. When no API is available the
/// controller keeps whatever state the initial pass produced.
pub fn bind_viewport<D, S, V>(
    controller: &Rc<RefCell<CarouselController<D, S>>>,
    source: &Rc<V>,
) -> ViewportBinding<V>
where
    D: DomPort,
    S: Scheduler,
    V: ViewportSource,
{
    dispatch(&Rc::downgrade(controller), source.as_ref());

    let registration = source.probe();
    let handler: Box<dyn FnMut()> = {
        let controller = Rc::downgrade(controller);
        let source = Rc::downgrade(source);
        Box::new(move || {
            if let Some(source) = source.upgrade() {
                dispatch(&controller, source.as_ref());
            }
        })
    };
    let subscription = source.subscribe(registration, handler);
    if subscription.is_none() {
        warn!(
            ?registration,
            "viewport changes will not be observed after the initial pass"
        );
    }
    ViewportBinding {
        registration,
        subscription,
    }
}

fn dispatch<D, S, V>(controller: &Weak<RefCell<CarouselController<D, S>>>, source: &V)
where
    D: DomPort,
    S: Scheduler,
    V: ViewportSource,
{
    let Some(controller) = controller.upgrade() else {
        return;
    };
    let mode = source.mode();
    match controller.try_borrow_mut() {
        Ok(mut controller) => controller.handle_viewport_change(mode),
        Err(_) => warn!(?mode, "controller busy; viewport change dropped"),
    };
}
