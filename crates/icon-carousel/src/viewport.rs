// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Viewport mode, breakpoint and the media-query port.

/// Layout mode derived from the mobile breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportMode {
    /// Viewport at or below the breakpoint; the carousel should be attached.
    Mobile,
    /// Viewport wider than the breakpoint; the static list is shown.
    NonMobile,
}

impl ViewportMode {
    /// Map a media-query `matches` flag to a mode.
    pub fn from_matches(matches: bool) -> Self {
        if matches {
            Self::Mobile
        } else {
            Self::NonMobile
        }
    }
}

/// Inclusive upper bound of the mobile width range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    /// Widest viewport, in CSS pixels, that still counts as mobile.
    pub max_width_px: u32,
}

impl Breakpoint {
    /// Create a breakpoint at `max_width_px`.
    pub fn new(max_width_px: u32) -> Self {
        Self { max_width_px }
    }

    /// Media query string for `matchMedia`.
    pub fn media_query(&self) -> String {
        format!("(max-width: {}px)", self.max_width_px)
    }

    /// Mode for a viewport `width` in CSS pixels.
    pub fn mode_for_width(&self, width: u32) -> ViewportMode {
        ViewportMode::from_matches(width <= self.max_width_px)
    }
}

/// How change notifications can be registered on the host's media query.
///
/// Probed once when binding, so the subscription path is a plain match
/// rather than a try/fallback at every call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeRegistration {
    /// `addEventListener("change", ..)`.
    Modern,
    /// Legacy `addListener(..)`.
    Legacy,
    /// Neither is available; only the initial mode is ever observed.
    Unavailable,
}

/// Media-query port for the mobile breakpoint.
pub trait ViewportSource: 'static {
    /// Registration handle; dropping it removes the change listener.
    type Subscription: 'static;

    /// Whether the breakpoint query currently matches.
    fn matches(&self) -> bool;

    /// Current mode.
    fn mode(&self) -> ViewportMode {
        ViewportMode::from_matches(self.matches())
    }

    /// Which registration API the host supports.
    fn probe(&self) -> ChangeRegistration;

    /// Register `handler` for breakpoint crossings using `registration`.
    ///
    /// Returns `None` when `registration` is [`ChangeRegistration::Unavailable`]
    /// or the host rejects the listener.
    fn subscribe(
        &self,
        registration: ChangeRegistration,
        handler: Box<dyn FnMut()>,
    ) -> Option<Self::Subscription>;
}
