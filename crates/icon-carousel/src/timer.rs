// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Clock and one-shot timer port.

/// Time source plus one-shot timers.
///
/// No time ownership in the core: the browser adapter reads `Date.now()` and
/// uses `setTimeout`; tests drive a virtual clock.
pub trait Scheduler: 'static {
    /// Pending-timer handle. Dropping it before it fires cancels the callback.
    type Timer: 'static;

    /// Milliseconds on a monotonic-enough wall clock.
    fn now_ms(&self) -> f64;

    /// Run `callback` once, `delay_ms` from now.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;
}
