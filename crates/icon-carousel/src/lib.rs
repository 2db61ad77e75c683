// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mobile-only carousel for a horizontal list of icon items.
//!
//! While the viewport is at or below the mobile breakpoint, the container is
//! turned into a scroll-snapping carousel with one navigation dot per item;
//! above it, every DOM change is reverted.
//!
//! # Ports
//!
//! The crate never touches a browser API directly. It is written against:
//!
//! - [`DomPort`] - element queries, class/style/attribute mutation, scroll
//!   metrics and listener registration,
//! - [`Scheduler`] - a clock and one-shot timers for the scroll throttle,
//! - [`ViewportSource`] - the breakpoint media query.
//!
//! `icon-carousel-web` implements them on `web-sys`; `icon-carousel-dry-tests`
//! implements them in memory.
//!
//! Every listener and timer is an RAII handle, so detaching a carousel is just
//! dropping what it owns.

pub mod carousel;
pub mod config;
pub mod controller;
pub mod dom;
pub mod throttle;
pub mod timer;
pub mod viewport;

pub use carousel::{active_index, scroll_to_index, update_active_dot, Carousel};
pub use config::{CarouselConfig, ConfigError, MarkerClasses, DOT_LABEL_PLACEHOLDER};
pub use controller::{bind_viewport, CarouselController, ViewportBinding};
pub use dom::{DomError, DomPort, ItemMetrics};
pub use throttle::Throttle;
pub use timer::Scheduler;
pub use viewport::{Breakpoint, ChangeRegistration, ViewportMode, ViewportSource};
