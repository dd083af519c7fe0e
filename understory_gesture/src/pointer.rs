// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse button edges, mouse drag and wheel handling.
//!
//! The sampler reports button levels; [`PointerGesture`] keeps the previous
//! left-button level so it can tell the press and release edges apart from
//! the held state. A mouse drag starts on the press edge, latches once the
//! pointer moves further than the threshold while the button is held, and
//! clears on the release edge.

use kurbo::Point;

use crate::sample::PointerState;

/// Per-frame pointer readings derived by [`PointerGesture::apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerFrame {
    /// Left button went down this frame.
    pub left_pressed_edge: bool,
    /// Left button went up this frame.
    pub left_released_edge: bool,
    /// A drag crossed the threshold this frame.
    pub drag_started: bool,
    /// A drag ended this frame.
    pub drag_ended: bool,
    /// Wheel delta after applying the deadzone.
    pub scroll: f64,
}

/// Retained mouse drag state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerGesture {
    anchor: Point,
    dragging: bool,
    left_was_pressed: bool,
}

impl PointerGesture {
    /// Feed one frame of pointer state.
    pub fn apply(&mut self, pointer: &PointerState, threshold: f64, deadzone: f64) -> PointerFrame {
        let mut frame = PointerFrame {
            scroll: if pointer.wheel_delta_y.abs() <= deadzone {
                0.0
            } else {
                pointer.wheel_delta_y
            },
            ..PointerFrame::default()
        };

        match (self.left_was_pressed, pointer.left_pressed) {
            (false, true) => {
                frame.left_pressed_edge = true;
                self.anchor = pointer.position;
                self.dragging = false;
            }
            (true, true) => {
                if !self.dragging && self.anchor.distance(pointer.position) > threshold {
                    self.dragging = true;
                    frame.drag_started = true;
                }
            }
            (true, false) => {
                frame.left_released_edge = true;
                frame.drag_ended = self.dragging;
                self.dragging = false;
            }
            (false, false) => {}
        }
        self.left_was_pressed = pointer.left_pressed;
        frame
    }

    /// Forget all pointer state, as when the device is unplugged.
    ///
    /// No release edge is reported for a button that was held.
    pub fn disconnect(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a mouse drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Position where the left button was last pressed.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}
