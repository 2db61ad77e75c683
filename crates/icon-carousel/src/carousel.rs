// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! An attached carousel instance.
//!
//! [`Carousel::activate`] decorates a container and returns the instance that
//! owns every DOM mutation and listener it made; [`Carousel::deactivate`]
//! consumes it and reverts all of them.

use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::config::CarouselConfig;
use crate::dom::{DomError, DomPort, ItemMetrics};
use crate::throttle::Throttle;
use crate::timer::Scheduler;

const BOX_SIZING: &str = "box-sizing";

/// Index of the current item for a given scroll offset.
///
/// The last item whose left-half midpoint (`offset_left - client_width / 2`)
/// has been scrolled past wins; with no such item the first one is current.
/// It is not a nearest-midpoint search.
pub fn active_index(scroll_left: f64, items: &[ItemMetrics]) -> usize {
    items
        .iter()
        .enumerate()
        .filter(|(_, m)| scroll_left >= m.activation_threshold())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

/// Recompute which dot is active from the container's scroll position.
///
/// Items and dots are re-queried, so markup changes made while the carousel
/// is attached are picked up. Returns the index that was marked, or `None`
/// when there is no controls panel or no dot at the computed index.
pub fn update_active_dot<D: DomPort>(
    dom: &D,
    container: &D::Node,
    controls: Option<&D::Node>,
    config: &CarouselConfig,
) -> Option<usize> {
    let controls = controls?;
    let metrics: Vec<ItemMetrics> = dom
        .query_selector_all(container, &config.item_selector)
        .iter()
        .map(|item| dom.metrics(item))
        .collect();
    let scroll_left = dom.scroll_left(container);
    let active = active_index(scroll_left, &metrics);

    let dots = dom.query_selector_all(controls, &config.dot_selector());
    for dot in &dots {
        dom.remove_class(dot, &config.classes.active);
    }
    let dot = dots.get(active)?;
    dom.add_class(dot, &config.classes.active);
    debug!(scroll_left, active, "active dot updated");
    Some(active)
}

/// Smooth-scroll `container` so the item at `index` sits at its left edge.
///
/// Returns `false` (and does nothing) when no item exists at `index`.
pub fn scroll_to_index<D: DomPort>(
    dom: &D,
    container: &D::Node,
    index: usize,
    config: &CarouselConfig,
) -> bool {
    let items = dom.query_selector_all(container, &config.item_selector);
    let Some(item) = items.get(index) else {
        debug!(index, available = items.len(), "scroll target out of range");
        return false;
    };
    let left = dom.metrics(item).offset_left;
    dom.smooth_scroll_to(container, left);
    true
}

/// One navigation dot.
struct Dot<D: DomPort> {
    index: usize,
    node: D::Node,
    _click: D::Listener,
}

/// A container currently decorated as a carousel.
///
/// Dropping an instance without calling [`deactivate`](Self::deactivate)
/// releases its listeners but leaves the DOM decorated.
pub struct Carousel<D: DomPort> {
    dom: Rc<D>,
    config: Rc<CarouselConfig>,
    container: D::Node,
    items: Vec<D::Node>,
    saved_box_sizing: Vec<Option<String>>,
    controls: D::Node,
    dots: Vec<Dot<D>>,
    scroll_listener: D::Listener,
}

impl<D: DomPort> Carousel<D> {
    /// Attach carousel behavior to `container`.
    ///
    /// Returns `None` without touching the DOM when the container already
    /// carries the carousel marker class. A DOM failure part-way through is
    /// rolled back and also yields `None`.
    pub fn activate<S: Scheduler>(
        dom: &Rc<D>,
        scheduler: &Rc<S>,
        config: &Rc<CarouselConfig>,
        container: D::Node,
    ) -> Option<Self> {
        if dom.has_class(&container, &config.classes.carousel) {
            debug!(?container, "container already decorated; skipping activation");
            return None;
        }
        dom.add_class(&container, &config.classes.carousel);
        let items = dom.query_selector_all(&container, &config.item_selector);
        let saved_box_sizing: Vec<Option<String>> = items
            .iter()
            .map(|item| dom.inline_style(item, BOX_SIZING))
            .collect();

        let (controls, dots) = match build_controls(dom, config, &container, &items) {
            Ok(built) => built,
            Err(err) => {
                warn!(%err, "carousel activation rolled back");
                revert(
                    dom.as_ref(),
                    config,
                    &container,
                    &items,
                    &saved_box_sizing,
                    None,
                );
                return None;
            }
        };

        update_active_dot(dom.as_ref(), &container, Some(&controls), config);

        let on_scroll = {
            let dom = Rc::downgrade(dom);
            let config = Rc::clone(config);
            let container = container.clone();
            let controls = controls.clone();
            Throttle::new(Rc::clone(scheduler), config.scroll_throttle_ms, move |()| {
                if let Some(dom) = dom.upgrade() {
                    update_active_dot(dom.as_ref(), &container, Some(&controls), &config);
                }
            })
        };
        let scroll_listener = dom.on_scroll(&container, Box::new(move || on_scroll.call(())));

        info!(items = items.len(), "carousel activated");
        Some(Self {
            dom: Rc::clone(dom),
            config: Rc::clone(config),
            container,
            items,
            saved_box_sizing,
            controls,
            dots,
            scroll_listener,
        })
    }

    /// Detach everything [`activate`](Self::activate) attached.
    pub fn deactivate(self) {
        let Self {
            dom,
            config,
            container,
            items,
            saved_box_sizing,
            controls,
            dots,
            scroll_listener,
        } = self;
        drop(scroll_listener);
        drop(dots);
        revert(
            dom.as_ref(),
            &config,
            &container,
            &items,
            &saved_box_sizing,
            Some(&controls),
        );
        info!(items = items.len(), "carousel deactivated");
    }

    /// The decorated container.
    pub fn container(&self) -> &D::Node {
        &self.container
    }

    /// Items captured at activation, in document order.
    pub fn items(&self) -> &[D::Node] {
        &self.items
    }

    /// The inserted dot panel.
    pub fn controls(&self) -> &D::Node {
        &self.controls
    }

    /// Dot elements paired with the item index they navigate to.
    pub fn dots(&self) -> impl Iterator<Item = (usize, &D::Node)> + '_ {
        self.dots.iter().map(|dot| (dot.index, &dot.node))
    }

    /// Number of dots; equals the number of items captured at activation.
    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    /// Recompute and mark the active dot now, bypassing the scroll throttle.
    pub fn update_active_dot(&self) -> Option<usize> {
        update_active_dot(
            self.dom.as_ref(),
            &self.container,
            Some(&self.controls),
            &self.config,
        )
    }

    /// Smooth-scroll to the item at `index`. See [`scroll_to_index`].
    pub fn scroll_to_index(&self, index: usize) -> bool {
        scroll_to_index(self.dom.as_ref(), &self.container, index, &self.config)
    }
}

/// Build the dot panel and insert it after the container.
fn build_controls<D: DomPort>(
    dom: &Rc<D>,
    config: &Rc<CarouselConfig>,
    container: &D::Node,
    items: &[D::Node],
) -> Result<(D::Node, Vec<Dot<D>>), DomError> {
    let controls = dom.create_element("div")?;
    dom.add_class(&controls, &config.classes.controls);

    let mut dots = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        dom.set_style(item, BOX_SIZING, "border-box");

        let node = dom.create_element("button")?;
        dom.add_class(&node, &config.classes.dot);
        dom.set_attribute(&node, "type", "button");
        dom.set_attribute(&node, "aria-label", &config.dot_label_for(index));
        dom.set_attribute(&node, "data-index", &index.to_string());
        let click = dom.on_click(&node, click_handler(dom, config, container, index));
        dom.append_child(&controls, &node)?;
        dots.push(Dot {
            index,
            node,
            _click: click,
        });
    }

    dom.insert_after(container, &controls)?;
    Ok((controls, dots))
}

fn click_handler<D: DomPort>(
    dom: &Rc<D>,
    config: &Rc<CarouselConfig>,
    container: &D::Node,
    index: usize,
) -> Box<dyn FnMut()> {
    let dom: Weak<D> = Rc::downgrade(dom);
    let config = Rc::clone(config);
    let container = container.clone();
    Box::new(move || {
        if let Some(dom) = dom.upgrade() {
            scroll_to_index(dom.as_ref(), &container, index, &config);
        }
    })
}

/// Undo the marker class, item style overrides and controls insertion.
///
/// `saved_box_sizing[i]` is the inline value `items[i]` carried before
/// activation; `None` means the property was not set inline.
fn revert<D: DomPort>(
    dom: &D,
    config: &CarouselConfig,
    container: &D::Node,
    items: &[D::Node],
    saved_box_sizing: &[Option<String>],
    controls: Option<&D::Node>,
) {
    dom.remove_class(container, &config.classes.carousel);
    for (item, saved) in items.iter().zip(saved_box_sizing) {
        match saved {
            Some(value) => dom.set_style(item, BOX_SIZING, value),
            None => dom.clear_style(item, BOX_SIZING),
        }
    }
    if let Some(controls) = controls {
        dom.detach(controls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(offsets: &[f64], width: f64) -> Vec<ItemMetrics> {
        offsets
            .iter()
            .map(|&offset_left| ItemMetrics {
                offset_left,
                client_width: width,
            })
            .collect()
    }

    #[test]
    fn picks_last_item_past_its_left_half() {
        let items = metrics(&[0.0, 100.0, 200.0], 80.0);
        assert_eq!(active_index(150.0, &items), 1);
        assert_eq!(active_index(170.0, &items), 2);
        assert_eq!(active_index(160.0, &items), 2);
        assert_eq!(active_index(59.9, &items), 0);
        assert_eq!(active_index(60.0, &items), 1);
    }

    #[test]
    fn defaults_to_first_item() {
        assert_eq!(active_index(0.0, &[]), 0);
        let items = metrics(&[500.0, 600.0], 80.0);
        assert_eq!(active_index(0.0, &items), 0);
    }

    #[test]
    fn later_item_wins_even_when_an_earlier_one_fails() {
        // Non-monotonic offsets: only the last qualifying index counts.
        let items = metrics(&[0.0, 400.0, 100.0], 80.0);
        assert_eq!(active_index(150.0, &items), 2);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn index_stays_in_bounds(
                widths in prop::collection::vec(1.0f64..400.0, 0..12),
                scroll in -100.0f64..5000.0,
            ) {
                let mut offset = 0.0;
                let items: Vec<ItemMetrics> = widths
                    .iter()
                    .map(|&w| {
                        let m = ItemMetrics { offset_left: offset, client_width: w };
                        offset += w;
                        m
                    })
                    .collect();
                let idx = active_index(scroll, &items);
                prop_assert!((items.is_empty() && idx == 0) || idx < items.len());
            }

            #[test]
            fn monotonic_in_scroll_for_laid_out_rows(
                widths in prop::collection::vec(1.0f64..400.0, 1..12),
                a in 0.0f64..5000.0,
                b in 0.0f64..5000.0,
            ) {
                let mut offset = 0.0;
                let items: Vec<ItemMetrics> = widths
                    .iter()
                    .map(|&w| {
                        let m = ItemMetrics { offset_left: offset, client_width: w };
                        offset += w;
                        m
                    })
                    .collect();
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(active_index(lo, &items) <= active_index(hi, &items));
            }
        }
    }
}
