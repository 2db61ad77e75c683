// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `ViewportSource` over `matchMedia`, with the legacy `addListener` fallback.

use gloo_events::EventListener;
use icon_carousel::{Breakpoint, ChangeRegistration, ViewportSource};
use js_sys::Reflect;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, MediaQueryList, Window};

/// Breakpoint media query.
pub struct MediaQueryViewport {
    query: MediaQueryList,
}

impl MediaQueryViewport {
    /// `window.matchMedia(breakpoint.media_query())`, if the browser supports it.
    pub fn new(window: &Window, breakpoint: Breakpoint) -> Option<Self> {
        match window.match_media(&breakpoint.media_query()) {
            Ok(query) => query.map(|query| Self { query }),
            Err(err) => {
                warn!(?err, "matchMedia failed");
                None
            }
        }
    }
}

/// Change listener registered through `addListener`; removed on drop.
pub struct LegacyListener {
    query: MediaQueryList,
    callback: Closure<dyn FnMut(JsValue)>,
}

impl Drop for LegacyListener {
    fn drop(&mut self) {
        let callback = self.callback.as_ref().unchecked_ref();
        if let Err(err) = self.query.remove_listener_with_opt_callback(Some(callback)) {
            warn!(?err, "removeListener failed");
        }
    }
}

/// Live change subscription on a [`MediaQueryViewport`].
pub enum MediaQuerySubscription {
    /// Registered via `addEventListener("change", ..)`.
    Modern(EventListener),
    /// Registered via `addListener(..)`.
    Legacy(LegacyListener),
}

fn has_method(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(name))
        .map(|value| value.is_function())
        .unwrap_or(false)
}

impl ViewportSource for MediaQueryViewport {
    type Subscription = MediaQuerySubscription;

    fn matches(&self) -> bool {
        self.query.matches()
    }

    fn probe(&self) -> ChangeRegistration {
        if has_method(&self.query, "addEventListener") {
            ChangeRegistration::Modern
        } else if has_method(&self.query, "addListener") {
            ChangeRegistration::Legacy
        } else {
            ChangeRegistration::Unavailable
        }
    }

    fn subscribe(
        &self,
        registration: ChangeRegistration,
        mut handler: Box<dyn FnMut()>,
    ) -> Option<MediaQuerySubscription> {
        match registration {
            ChangeRegistration::Modern => Some(MediaQuerySubscription::Modern(
                EventListener::new(&self.query, "change", move |_: &Event| handler()),
            )),
            ChangeRegistration::Legacy => {
                let callback = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| handler());
                match self
                    .query
                    .add_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref()))
                {
                    Ok(()) => Some(MediaQuerySubscription::Legacy(LegacyListener {
                        query: self.query.clone(),
                        callback,
                    })),
                    Err(err) => {
                        warn!(?err, "addListener failed");
                        None
                    }
                }
            }
            ChangeRegistration::Unavailable => None,
        }
    }
}
