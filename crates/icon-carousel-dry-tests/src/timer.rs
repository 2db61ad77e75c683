// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Virtual-clock scheduler fake.

use icon_carousel::Scheduler;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

struct PendingTimer {
    due: f64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct SchedulerInner {
    now: f64,
    next_id: u64,
    fired: usize,
    timers: BTreeMap<u64, PendingTimer>,
}

/// [`Scheduler`] driven by explicit [`advance_to`](Self::advance_to) calls.
///
/// Time starts at 0 ms. Timers due at the same instant fire in creation order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

/// Timer handle returned by [`ManualScheduler`]; dropping it cancels the timer.
pub struct ManualTimer {
    inner: Weak<RefCell<SchedulerInner>>,
    id: u64,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let removed = inner.borrow_mut().timers.remove(&self.id);
            drop(removed);
        }
    }
}

impl ManualScheduler {
    /// Create a scheduler at t = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> f64 {
        self.inner.borrow().now
    }

    /// Timers scheduled but not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Timers that have fired so far.
    pub fn fired(&self) -> usize {
        self.inner.borrow().fired
    }

    /// Advance by `ms`, firing every timer that comes due on the way.
    pub fn advance_by(&self, ms: f64) {
        let target = self.now() + ms;
        self.advance_to(target);
    }

    /// Advance to absolute time `t`, firing due timers in order.
    ///
    /// The clock reads each timer's due time while its callback runs.
    pub fn advance_to(&self, t: f64) {
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.due <= t)
                    .min_by(|a, b| a.1.due.total_cmp(&b.1.due).then(a.0.cmp(b.0)))
                    .map(|(&id, _)| id);
                due.and_then(|id| inner.timers.remove(&id)).map(|timer| {
                    inner.now = inner.now.max(timer.due);
                    inner.fired += 1;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(t);
    }
}

impl Scheduler for ManualScheduler {
    type Timer = ManualTimer;

    fn now_ms(&self) -> f64 {
        self.now()
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let due = inner.now + f64::from(delay_ms);
        inner.timers.insert(id, PendingTimer { due, callback });
        ManualTimer {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }
}
