// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Carousel configuration: selectors, marker classes, breakpoint and timing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder replaced by the 1-based dot position in [`CarouselConfig::dot_label`].
pub const DOT_LABEL_PLACEHOLDER: &str = "{n}";

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A selector was empty or whitespace only.
    #[error("selector `{field}` must not be empty")]
    EmptySelector {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A marker class was empty or contained whitespace.
    #[error("class `{field}` must be a single non-empty token, got {value:?}")]
    InvalidClass {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// CSS marker classes written to the DOM while the carousel is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerClasses {
    /// Added to the container; enables the scroll-snap stylesheet rules.
    pub carousel: String,
    /// Class of the dot panel inserted after the container.
    pub controls: String,
    /// Class of each dot button.
    pub dot: String,
    /// Marks the dot matching the current scroll position.
    pub active: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            carousel: "carousel".into(),
            controls: "carousel-controls".into(),
            dot: "carousel-dot".into(),
            active: "active".into(),
        }
    }
}

/// Full configuration for one carousel controller.
///
/// Every field has a default, so an empty JSON object (or `undefined` from JS)
/// yields the stock `.icons` / `.icon` testimonial carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Selector for the container, re-queried on every viewport change.
    pub container_selector: String,
    /// Selector for the items inside the container.
    pub item_selector: String,
    /// Widest viewport (CSS px, inclusive) still considered mobile.
    pub max_mobile_width_px: u32,
    /// Throttle window for scroll-driven dot updates.
    pub scroll_throttle_ms: u32,
    /// `aria-label` template for dots; `{n}` is replaced by the 1-based position.
    pub dot_label: String,
    /// Marker classes.
    pub classes: MarkerClasses,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            container_selector: ".icons".into(),
            item_selector: ".icon".into(),
            max_mobile_width_px: 767,
            scroll_throttle_ms: 100,
            dot_label: "Go to testimonial {n}".into(),
            classes: MarkerClasses::default(),
        }
    }
}

impl CarouselConfig {
    /// Parse and validate a JSON config blob.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that would produce invalid selectors or class tokens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("containerSelector", &self.container_selector),
            ("itemSelector", &self.item_selector),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptySelector { field });
            }
        }
        for (field, value) in [
            ("classes.carousel", &self.classes.carousel),
            ("classes.controls", &self.classes.controls),
            ("classes.dot", &self.classes.dot),
            ("classes.active", &self.classes.active),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidClass {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Selector matching the dots inside the controls panel.
    pub fn dot_selector(&self) -> String {
        format!(".{}", self.classes.dot)
    }

    /// Accessible label for the dot at zero-based `index`.
    pub fn dot_label_for(&self, index: usize) -> String {
        self.dot_label
            .replace(DOT_LABEL_PLACEHOLDER, &(index + 1).to_string())
    }
}
