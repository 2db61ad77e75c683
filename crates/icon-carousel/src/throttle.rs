// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Leading + trailing throttle.
//!
//! A call is dispatched immediately when nothing has been accepted within the
//! last `wait_ms`. Otherwise it replaces the single pending trailing call,
//! which fires `wait_ms` after the most recent call with that call's
//! arguments. The pending timer is owned by the throttle: dropping the
//! throttle cancels it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::timer::Scheduler;

struct ThrottleState<T> {
    last_accepted: Option<f64>,
    pending: Option<T>,
}

/// Rate-limited wrapper around a handler taking `A`.
pub struct Throttle<S: Scheduler, A: 'static> {
    scheduler: Rc<S>,
    wait_ms: u32,
    handler: Rc<dyn Fn(A)>,
    state: Rc<RefCell<ThrottleState<S::Timer>>>,
}

impl<S: Scheduler, A: 'static> Throttle<S, A> {
    /// Wrap `handler` so it runs at most about once per `wait_ms`.
    pub fn new(scheduler: Rc<S>, wait_ms: u32, handler: impl Fn(A) + 'static) -> Self {
        Self {
            scheduler,
            wait_ms,
            handler: Rc::new(handler),
            state: Rc::new(RefCell::new(ThrottleState {
                last_accepted: None,
                pending: None,
            })),
        }
    }

    /// Configured window in milliseconds.
    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Invoke the throttled handler.
    pub fn call(&self, args: A) {
        let now = self.scheduler.now_ms();
        let leading = {
            let mut state = self.state.borrow_mut();
            match state.last_accepted {
                Some(last) if now - last < f64::from(self.wait_ms) => false,
                _ => {
                    state.last_accepted = Some(now);
                    true
                }
            }
        };
        if leading {
            (self.handler)(args);
            return;
        }

        let handler = Rc::clone(&self.handler);
        let scheduler = Rc::clone(&self.scheduler);
        let state = Rc::downgrade(&self.state);
        let timer = self.scheduler.set_timeout(
            self.wait_ms,
            Box::new(move || {
                let Some(state) = state.upgrade() else {
                    return;
                };
                state.borrow_mut().last_accepted = Some(scheduler.now_ms());
                handler(args);
            }),
        );
        // Replacing the handle drops (and so cancels) the superseded call.
        let superseded = self.state.borrow_mut().pending.replace(timer);
        drop(superseded);
    }
}
