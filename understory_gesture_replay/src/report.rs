// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame output lines.

use std::fmt;

use kurbo::Point;
use serde::Serialize;
use understory_gesture::GestureSignals;

/// What the driver observed after evaluating one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct FrameReport {
    pub(crate) frame: usize,
    pub(crate) touch_pressed_down: bool,
    pub(crate) touch_released: bool,
    pub(crate) is_touch_dragging: bool,
    pub(crate) tap: Option<[f64; 2]>,
    pub(crate) last_tap_position: [f64; 2],
    pub(crate) drag_anchor: [f64; 2],
    pub(crate) touch_count: usize,
    pub(crate) pinch_delta: f64,
    pub(crate) mouse_position: [f64; 2],
    pub(crate) mouse_left_pressed: bool,
    pub(crate) mouse_right_pressed: bool,
    pub(crate) mouse_left_released: bool,
    pub(crate) mouse_scroll_delta: f64,
    pub(crate) is_mouse_dragging: bool,
}

fn xy(p: Point) -> [f64; 2] {
    [p.x, p.y]
}

impl FrameReport {
    pub(crate) fn new(frame: usize, signals: &GestureSignals, tap: Option<Point>) -> Self {
        Self {
            frame,
            touch_pressed_down: signals.touch_pressed_down,
            touch_released: signals.touch_released,
            is_touch_dragging: signals.is_touch_dragging,
            tap: tap.map(xy),
            last_tap_position: xy(signals.last_tap_position),
            drag_anchor: xy(signals.drag_anchor),
            touch_count: signals.touch_count,
            pinch_delta: signals.pinch_delta,
            mouse_position: xy(signals.mouse_position),
            mouse_left_pressed: signals.mouse_left_pressed,
            mouse_right_pressed: signals.mouse_right_pressed,
            mouse_left_released: signals.mouse_left_released,
            mouse_scroll_delta: signals.mouse_scroll_delta,
            is_mouse_dragging: signals.is_mouse_dragging,
        }
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<4} touches={}", self.frame, self.touch_count)?;
        for (on, name) in [
            (self.touch_pressed_down, "down"),
            (self.touch_released, "up"),
            (self.is_touch_dragging, "drag"),
        ] {
            if on {
                write!(f, " {name}")?;
            }
        }
        if let Some([x, y]) = self.tap {
            write!(f, " tap@({x}, {y})")?;
        }
        if self.pinch_delta != 0.0 {
            write!(f, " pinch={:+.2}", self.pinch_delta)?;
        }

        let [mx, my] = self.mouse_position;
        write!(f, " | mouse@({mx}, {my})")?;
        for (on, name) in [
            (self.mouse_left_pressed, "L"),
            (self.mouse_right_pressed, "R"),
            (self.mouse_left_released, "L-up"),
            (self.is_mouse_dragging, "drag"),
        ] {
            if on {
                write!(f, " {name}")?;
            }
        }
        if self.mouse_scroll_delta != 0.0 {
            write!(f, " scroll={}", self.mouse_scroll_delta)?;
        }
        Ok(())
    }
}
