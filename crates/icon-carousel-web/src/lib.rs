// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! wasm-bindgen bridge for the icon carousel.
//!
//! Implements the `icon-carousel` ports on `web-sys` and exports [`mount`],
//! which a page calls once:
//!
//! ```js
//! import init, { mount } from "./icon_carousel_web.js";
//! await init();
//! const carousel = mount({ dotLabel: "Ir para depoimento {n}" });
//! ```
//!
//! Mounting waits for `DOMContentLoaded` when the document is still loading,
//! then runs the initial viewport pass and subscribes to breakpoint
//! crossings.

pub mod dom;
pub mod logging;
pub mod timer;
pub mod viewport;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use icon_carousel::{
    bind_viewport, Breakpoint, CarouselConfig, CarouselController, ViewportBinding, ViewportSource,
};
use serde::Deserialize;
use tracing::{info, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

pub use dom::WebDom;
pub use timer::BrowserScheduler;
pub use viewport::{MediaQuerySubscription, MediaQueryViewport};

type WebController = CarouselController<WebDom, BrowserScheduler>;
type BindingSlot = Rc<RefCell<Option<ViewportBinding<MediaQueryViewport>>>>;

#[cfg(feature = "console-panic")]
#[wasm_bindgen(start)]
/// Route Rust panics to `console.error`.
pub fn init_console_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Options accepted by [`mount`]: the carousel config plus a log level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MountOptions {
    /// Carousel configuration (flattened, so JS passes its fields directly).
    #[serde(flatten)]
    pub carousel: CarouselConfig,
    /// `error`, `warn`, `info`, `debug` or `trace`. Defaults to `warn`.
    pub log_level: Option<String>,
}

impl MountOptions {
    /// Decode options from JS. `undefined` and `null` mean defaults.
    pub fn from_js(value: JsValue) -> Result<Self, JsValue> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let options: Self = serde_wasm_bindgen::from_value(value)?;
        options
            .carousel
            .validate()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(options)
    }

    /// Parsed log level; unknown names fall back to `warn`.
    pub fn level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(|name| name.parse().ok())
            .unwrap_or(Level::WARN)
    }
}

/// Handle returned by [`mount`].
#[wasm_bindgen]
pub struct CarouselHandle {
    controller: Rc<RefCell<WebController>>,
    viewport: Rc<MediaQueryViewport>,
    binding: BindingSlot,
    ready: Option<EventListener>,
}

#[wasm_bindgen]
impl CarouselHandle {
    /// Whether the carousel is currently attached.
    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.controller.borrow().is_enabled()
    }

    /// Re-run the viewport pass, e.g. after the page replaced the container.
    pub fn refresh(&self) {
        let mode = self.viewport.mode();
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.handle_viewport_change(mode),
            Err(_) => warn!("refresh ignored: controller busy"),
        }
    }

    /// Stop observing the viewport and revert every DOM change.
    pub fn dispose(&mut self) {
        self.ready = None;
        self.binding.borrow_mut().take();
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.deactivate();
        }
        info!("carousel disposed");
    }
}

fn document_is_loading(document: &web_sys::Document) -> bool {
    document.ready_state() == "loading"
}

/// Wire the carousel into the current page.
///
/// `options` may be `undefined`; see [`MountOptions`].
#[wasm_bindgen]
pub fn mount(options: JsValue) -> Result<CarouselHandle, JsValue> {
    let options = MountOptions::from_js(options)?;
    logging::init(options.level());

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let breakpoint = Breakpoint::new(options.carousel.max_mobile_width_px);
    let viewport = MediaQueryViewport::new(&window, breakpoint)
        .map(Rc::new)
        .ok_or_else(|| JsValue::from_str("matchMedia unavailable"))?;

    let controller = Rc::new(RefCell::new(CarouselController::new(
        Rc::new(WebDom::new(document.clone())),
        Rc::new(BrowserScheduler),
        options.carousel,
    )));
    let binding: BindingSlot = Rc::new(RefCell::new(None));

    let on_ready = {
        let controller = Rc::clone(&controller);
        let viewport = Rc::clone(&viewport);
        let binding = Rc::clone(&binding);
        move || {
            let bound = bind_viewport(&controller, &viewport);
            info!(registration = ?bound.registration(), "carousel bound to viewport");
            *binding.borrow_mut() = Some(bound);
        }
    };
    let ready = if document_is_loading(&document) {
        Some(EventListener::once(&document, "DOMContentLoaded", move |_| {
            on_ready();
        }))
    } else {
        on_ready();
        None
    };

    Ok(CarouselHandle {
        controller,
        viewport,
        binding,
        ready,
    })
}
