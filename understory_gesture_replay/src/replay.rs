// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives a classifier through a scenario, one frame per tick.

use tracing::{debug, info};
use understory_gesture::GestureClassifier;
use understory_gesture::source::{PointerSource, TouchSource, capabilities, sample_frame};

use crate::report::FrameReport;
use crate::scenario::Scenario;

/// Evaluates every frame and consumes each tap exactly once.
pub(crate) fn replay(gestures: &mut GestureClassifier, scenario: &Scenario) -> Vec<FrameReport> {
    let mut reports = Vec::with_capacity(scenario.frames.len());

    for (index, frame) in scenario.frames.iter().enumerate() {
        let touch = scenario
            .devices
            .touch
            .then_some(frame as &dyn TouchSource);
        let pointer = scenario
            .devices
            .pointer
            .then_some(frame as &dyn PointerSource);

        if index == 0 {
            info!(devices = ?scenario.devices, caps = ?capabilities(touch, pointer), "replay starting");
        }

        let signals = *gestures.evaluate(&sample_frame(touch, pointer));
        let tap = gestures.take_tap();
        debug!(frame = index, ?signals, ?tap, "evaluated");
        reports.push(FrameReport::new(index, &signals, tap));
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<FrameReport> {
        let scenario = Scenario::from_toml_str(text).unwrap();
        let mut gestures = GestureClassifier::with_config(scenario.config.clone()).unwrap();
        replay(&mut gestures, &scenario)
    }

    #[test]
    fn tap_is_reported_on_release_frame_only() {
        let reports = run(r#"
            [[frames]]
            contacts = [{ x = 10.0, y = 10.0, phase = "began" }]
            [[frames]]
            contacts = [{ x = 10.0, y = 10.0, phase = "ended" }]
            [[frames]]
        "#);

        assert_eq!(reports.len(), 3);
        assert!(reports[0].touch_pressed_down);
        assert_eq!(reports[0].tap, None);
        assert_eq!(reports[1].tap, Some([10.0, 10.0]));
        assert_eq!(reports[2].tap, None);
        assert_eq!(reports[2].last_tap_position, [10.0, 10.0]);
    }

    #[test]
    fn bundled_tap_then_drag() {
        let reports = run(include_str!("../scenarios/tap_then_drag.toml"));

        let taps: Vec<_> = reports.iter().filter_map(|r| r.tap).collect();
        assert_eq!(taps, vec![[10.0, 10.0]]);
        assert!(reports[5].is_touch_dragging);
        assert!(reports[6].touch_released);
        assert_eq!(reports[6].drag_anchor, [0.0, 0.0]);
    }

    #[test]
    fn bundled_pinch_and_mouse() {
        let reports = run(include_str!("../scenarios/pinch_and_mouse.toml"));

        assert_eq!(reports[1].pinch_delta, 0.0);
        assert_eq!(reports[2].pinch_delta, 0.0);
        assert_eq!(reports[3].pinch_delta, 40.0);
        assert!(!reports[2].is_mouse_dragging);
        assert!(reports[3].is_mouse_dragging);
        assert_eq!(reports[3].mouse_scroll_delta, -1.0);
        assert!(reports[4].mouse_left_released);
        assert!(!reports[4].is_mouse_dragging);
    }

    #[test]
    fn scenario_thresholds_apply() {
        let reports = run(r#"
            [config]
            drag_threshold = 5.0

            [[frames]]
            contacts = [{ x = 0.0, y = 0.0, phase = "began" }]
            [[frames]]
            contacts = [{ x = 6.0, y = 0.0, phase = "moved" }]
            [[frames]]
            contacts = [{ x = 6.0, y = 0.0, phase = "ended" }]
        "#);

        assert!(reports[1].is_touch_dragging);
        assert_eq!(reports[2].tap, None);
    }

    #[test]
    fn absent_pointer_device_hides_pointer_frames() {
        let reports = run(r#"
            devices = { pointer = false }

            [[frames]]
            pointer = { x = 4.0, y = 4.0, left = true }
        "#);

        assert!(!reports[0].mouse_left_pressed);
        assert_eq!(reports[0].mouse_position, [0.0, 0.0]);
    }

    #[test]
    fn absent_touch_device_hides_contacts() {
        let reports = run(r#"
            devices = { touch = false }

            [[frames]]
            contacts = [{ x = 1.0, y = 1.0, phase = "began" }]
            pointer = { x = 4.0, y = 4.0, wheel = 1.0 }
        "#);

        assert!(!reports[0].touch_pressed_down);
        assert_eq!(reports[0].touch_count, 0);
        assert_eq!(reports[0].mouse_scroll_delta, 1.0);
    }
}
