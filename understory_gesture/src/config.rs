// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification thresholds.

/// Default distance in pixels a touch must travel from its anchor to become a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 30.0;

/// Default change in two-contact distance below which pinch motion is ignored.
pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.5;

/// Default distance in pixels the pointer must travel with the left button held to become a drag.
pub const DEFAULT_MOUSE_DRAG_THRESHOLD: f64 = 5.0;

/// Default magnitude at or below which a wheel delta is reported as zero.
pub const DEFAULT_SCROLL_DEADZONE: f64 = 1e-6;

/// Thresholds used by [`GestureClassifier`](crate::GestureClassifier).
///
/// Every threshold is a strict lower bound: a movement of exactly the
/// threshold does not trigger.
///
/// ```
/// use understory_gesture::GestureConfig;
///
/// let config = GestureConfig::default().with_drag_threshold(12.0);
/// assert_eq!(config.drag_threshold, 12.0);
/// assert_eq!(config.pinch_threshold, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GestureConfig {
    /// Touch drag threshold in pixels.
    pub drag_threshold: f64,
    /// Pinch threshold in distance units.
    pub pinch_threshold: f64,
    /// Mouse drag threshold in pixels.
    pub mouse_drag_threshold: f64,
    /// Wheel deadzone.
    pub scroll_deadzone: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            mouse_drag_threshold: DEFAULT_MOUSE_DRAG_THRESHOLD,
            scroll_deadzone: DEFAULT_SCROLL_DEADZONE,
        }
    }
}

impl GestureConfig {
    /// Returns a copy with the touch drag threshold replaced.
    #[must_use]
    pub fn with_drag_threshold(mut self, px: f64) -> Self {
        self.drag_threshold = px;
        self
    }

    /// Returns a copy with the pinch threshold replaced.
    #[must_use]
    pub fn with_pinch_threshold(mut self, amount: f64) -> Self {
        self.pinch_threshold = amount;
        self
    }

    /// Returns a copy with the mouse drag threshold replaced.
    #[must_use]
    pub fn with_mouse_drag_threshold(mut self, px: f64) -> Self {
        self.mouse_drag_threshold = px;
        self
    }

    /// Returns a copy with the scroll deadzone replaced.
    #[must_use]
    pub fn with_scroll_deadzone(mut self, amount: f64) -> Self {
        self.scroll_deadzone = amount;
        self
    }

    /// Checks that every threshold is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("drag_threshold", self.drag_threshold),
            ("pinch_threshold", self.pinch_threshold),
            ("mouse_drag_threshold", self.mouse_drag_threshold),
            ("scroll_deadzone", self.scroll_deadzone),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }
}

/// A rejected [`GestureConfig`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A threshold was negative.
    #[error("{name} must not be negative (got {value})")]
    Negative {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A threshold was NaN or infinite.
    #[error("{name} must be finite")]
    NonFinite {
        /// Field name.
        name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = GestureConfig::default();
        assert_eq!(config.drag_threshold, DEFAULT_DRAG_THRESHOLD);
        assert_eq!(config.pinch_threshold, DEFAULT_PINCH_THRESHOLD);
        assert_eq!(config.mouse_drag_threshold, DEFAULT_MOUSE_DRAG_THRESHOLD);
        assert_eq!(config.scroll_deadzone, DEFAULT_SCROLL_DEADZONE);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn setters_are_independent() {
        let config = GestureConfig::default().with_mouse_drag_threshold(9.0);
        assert_eq!(config.mouse_drag_threshold, 9.0);
        assert_eq!(config.drag_threshold, DEFAULT_DRAG_THRESHOLD);
        assert_eq!(config.pinch_threshold, DEFAULT_PINCH_THRESHOLD);
    }

    #[test]
    fn zero_thresholds_are_allowed() {
        let config = GestureConfig::default()
            .with_drag_threshold(0.0)
            .with_pinch_threshold(0.0)
            .with_scroll_deadzone(0.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let config = GestureConfig::default().with_pinch_threshold(-0.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                name: "pinch_threshold",
                value: -0.5
            })
        );
    }

    #[test]
    fn non_finite_threshold_is_rejected() {
        let config = GestureConfig::default().with_drag_threshold(f64::NAN);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                name: "drag_threshold"
            })
        );
    }
}
