// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-contact pinch tracking.
//!
//! The tracker remembers a baseline distance between the primary and
//! secondary contacts. Each frame it reports how far the current distance has
//! moved from that baseline, suppressing changes at or below the threshold.
//! When a change is reported the baseline moves to the current distance, so
//! the threshold applies to incremental motion rather than to the total
//! motion since the pinch started.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::pinch::PinchTracker;
//!
//! let mut pinch = PinchTracker::default();
//!
//! // Secondary contact lands 100px from the primary: establishes the baseline.
//! assert_eq!(pinch.update(Point::new(0.0, 0.0), Point::new(100.0, 0.0), true, 0.5), 0.0);
//!
//! // Fingers spread by 10px.
//! assert_eq!(pinch.update(Point::new(0.0, 0.0), Point::new(110.0, 0.0), false, 0.5), 10.0);
//! assert_eq!(pinch.baseline(), 110.0);
//! ```

use kurbo::Point;

/// Retained pinch baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchTracker {
    baseline: f64,
}

impl PinchTracker {
    /// Feed one frame with two contacts and return the reported pinch delta.
    ///
    /// `secondary_began` must be `true` on the frame the secondary contact
    /// touched down; that frame resets the baseline and always reports `0`.
    pub fn update(
        &mut self,
        primary: Point,
        secondary: Point,
        secondary_began: bool,
        threshold: f64,
    ) -> f64 {
        let distance = primary.distance(secondary);
        if secondary_began {
            self.baseline = distance;
            return 0.0;
        }

        let delta = distance - self.baseline;
        if delta.abs() <= threshold {
            return 0.0;
        }
        self.baseline = distance;
        delta
    }

    /// The distance further deltas are measured against.
    ///
    /// Only meaningful while two contacts are down.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.baseline
    }
}
