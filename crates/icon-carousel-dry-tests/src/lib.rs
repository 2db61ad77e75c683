// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for the icon carousel crates.
//!
//! # Modules
//!
//! - [`dom`] - In-memory DOM implementing `DomPort`, with event dispatch
//! - [`timer`] - Virtual-clock `Scheduler`
//! - [`viewport`] - Resizable media-query `ViewportSource`
//! - [`fixtures`] - Testimonial page builder and a wired controller harness
#![forbid(unsafe_code)]

pub mod dom;
pub mod fixtures;
pub mod timer;
pub mod viewport;

// Re-export commonly used items at crate root for convenience
pub use dom::{EventKind, FakeDom, FakeListener, NodeId, NodeSnapshot, ScrollRequest};
pub use fixtures::{Harness, IconPage, ITEM_WIDTH};
pub use timer::{ManualScheduler, ManualTimer};
pub use viewport::{FakeSubscription, FakeViewport};
