// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch press/drag/tap state machine for the primary contact.
//!
//! ## Usage
//!
//! 1) Call [`TouchGesture::begin`] when the primary contact goes down.
//! 2) On each move call [`TouchGesture::update`]; it latches the drag flag once
//!    the contact strays further than the threshold from where it began.
//! 3) Call [`TouchGesture::end`] when the contact lifts. A gesture that never
//!    became a drag is a tap: its position is recorded and a one-shot flag is
//!    raised until [`TouchGesture::take_tap`] consumes it.
//!
//! Every press/release cycle ends as a tap or as a drag, never both.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::touch::TouchGesture;
//!
//! let mut touch = TouchGesture::default();
//!
//! touch.begin(Point::new(10.0, 10.0));
//! touch.update(Point::new(12.0, 11.0), 30.0);
//! assert!(!touch.is_dragging());
//!
//! assert_eq!(touch.end(Point::new(12.0, 11.0)), Some(Point::new(12.0, 11.0)));
//! assert_eq!(touch.take_tap(), Some(Point::new(12.0, 11.0)));
//! assert_eq!(touch.take_tap(), None);
//! ```

use kurbo::Point;

use crate::sample::{Contact, TouchPhase};

/// What a single call into [`TouchGesture`] changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchTransition {
    /// Nothing observable changed.
    None,
    /// A new gesture started at the given anchor.
    Pressed(Point),
    /// The gesture crossed the drag threshold.
    DragStarted,
    /// The gesture ended without dragging and was classified as a tap.
    Tap(Point),
    /// The gesture ended after dragging.
    DragEnded,
    /// The gesture was aborted by the platform.
    Canceled,
}

/// Retained drag/tap state for the primary contact.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchGesture {
    anchor: Point,
    tracking: bool,
    dragging: bool,
    last_tap: Point,
    tap_pending: bool,
}

impl TouchGesture {
    /// Start a new gesture at `pos`, discarding any drag in progress.
    pub fn begin(&mut self, pos: Point) {
        self.anchor = pos;
        self.tracking = true;
        self.dragging = false;
    }

    /// Feed a move. Returns `true` if this move started the drag.
    ///
    /// Once dragging, the flag stays set until the gesture ends, even if the
    /// contact wanders back inside the threshold.
    pub fn update(&mut self, pos: Point, threshold: f64) -> bool {
        if !self.tracking || self.dragging {
            return false;
        }
        if self.anchor.distance(pos) > threshold {
            self.dragging = true;
            return true;
        }
        false
    }

    /// End the gesture at `pos`. Returns the tap position if the gesture was a tap.
    ///
    /// An end without a preceding [`begin`](Self::begin) is not a tap.
    pub fn end(&mut self, pos: Point) -> Option<Point> {
        let tap = self.tracking && !self.dragging;
        self.tracking = false;
        self.dragging = false;
        if tap {
            self.last_tap = pos;
            self.tap_pending = true;
            Some(pos)
        } else {
            None
        }
    }

    /// Abort the gesture without classifying it.
    pub fn cancel(&mut self) {
        self.tracking = false;
        self.dragging = false;
    }

    /// Drive the state machine from one frame's primary contact.
    pub fn apply(&mut self, contact: &Contact, threshold: f64) -> TouchTransition {
        match contact.phase {
            TouchPhase::Began => {
                self.begin(contact.position);
                TouchTransition::Pressed(contact.position)
            }
            TouchPhase::Moved => {
                if self.update(contact.position, threshold) {
                    TouchTransition::DragStarted
                } else {
                    TouchTransition::None
                }
            }
            TouchPhase::Stationary => TouchTransition::None,
            TouchPhase::Ended => {
                let was_dragging = self.dragging;
                match self.end(contact.position) {
                    Some(pos) => TouchTransition::Tap(pos),
                    None if was_dragging => TouchTransition::DragEnded,
                    None => TouchTransition::None,
                }
            }
            TouchPhase::Canceled => {
                let was_tracking = self.tracking;
                self.cancel();
                if was_tracking {
                    TouchTransition::Canceled
                } else {
                    TouchTransition::None
                }
            }
        }
    }

    /// Returns `true` while the current gesture has crossed the drag threshold.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns `true` between a [`begin`](Self::begin) and the matching end or cancel.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Position where the most recent gesture began.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Position of the most recent tap. Retained until a newer tap replaces it.
    #[must_use]
    pub fn last_tap_position(&self) -> Point {
        self.last_tap
    }

    /// Returns `true` if a tap has been detected and not yet consumed.
    #[must_use]
    pub fn tap_pending(&self) -> bool {
        self.tap_pending
    }

    /// Consume the pending tap, if any.
    pub fn take_tap(&mut self) -> Option<Point> {
        if core::mem::take(&mut self.tap_pending) {
            Some(self.last_tap)
        } else {
            None
        }
    }

    /// Drop an unconsumed tap without reading it.
    pub fn clear_pending(&mut self) {
        self.tap_pending = false;
    }
}
