// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Media-query fake with a resizable width.

use icon_carousel::{Breakpoint, ChangeRegistration, ViewportSource};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Handler = Rc<RefCell<Box<dyn FnMut()>>>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    handlers: BTreeMap<u64, (ChangeRegistration, Handler)>,
}

/// Subscription handle returned by [`FakeViewport`]; dropping it unsubscribes.
pub struct FakeSubscription {
    subscribers: Weak<RefCell<Subscribers>>,
    id: u64,
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            let removed = subscribers.borrow_mut().handlers.remove(&self.id);
            drop(removed);
        }
    }
}

/// [`ViewportSource`] for a viewport whose width tests set directly.
///
/// Like `matchMedia`, handlers only run when a resize crosses the breakpoint.
/// The fake accepts subscriptions only through the registration API it was
/// created with.
pub struct FakeViewport {
    breakpoint: Breakpoint,
    width: Cell<u32>,
    capability: ChangeRegistration,
    subscribers: Rc<RefCell<Subscribers>>,
}

impl FakeViewport {
    /// Viewport of `width` px supporting the modern `change` event.
    pub fn new(breakpoint: Breakpoint, width: u32) -> Self {
        Self::with_capability(breakpoint, width, ChangeRegistration::Modern)
    }

    /// Viewport of `width` px supporting only `capability`.
    pub fn with_capability(
        breakpoint: Breakpoint,
        width: u32,
        capability: ChangeRegistration,
    ) -> Self {
        Self {
            breakpoint,
            width: Cell::new(width),
            capability,
            subscribers: Rc::new(RefCell::new(Subscribers::default())),
        }
    }

    /// Current width.
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Number of live change subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().handlers.len()
    }

    /// Registration APIs used by live subscriptions.
    pub fn registrations(&self) -> Vec<ChangeRegistration> {
        self.subscribers
            .borrow()
            .handlers
            .values()
            .map(|(registration, _)| *registration)
            .collect()
    }

    /// Resize; notifies subscribers when the breakpoint is crossed.
    pub fn resize(&self, width: u32) {
        let before = self.matches();
        self.width.set(width);
        if before == self.matches() {
            return;
        }
        let handlers: Vec<Handler> = self
            .subscribers
            .borrow()
            .handlers
            .values()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            (*handler.borrow_mut())();
        }
    }
}

impl ViewportSource for FakeViewport {
    type Subscription = FakeSubscription;

    fn matches(&self) -> bool {
        self.width.get() <= self.breakpoint.max_width_px
    }

    fn probe(&self) -> ChangeRegistration {
        self.capability
    }

    fn subscribe(
        &self,
        registration: ChangeRegistration,
        handler: Box<dyn FnMut()>,
    ) -> Option<FakeSubscription> {
        if registration == ChangeRegistration::Unavailable || registration != self.capability {
            return None;
        }
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.next_id += 1;
        let id = subscribers.next_id;
        subscribers
            .handlers
            .insert(id, (registration, Rc::new(RefCell::new(handler))));
        Some(FakeSubscription {
            subscribers: Rc::downgrade(&self.subscribers),
            id,
        })
    }
}
