// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use tracing::{debug, warn};

use crate::config::{ConfigError, GestureConfig};
use crate::pinch::PinchTracker;
use crate::pointer::PointerGesture;
use crate::sample::{Contact, FrameSample, PointerState, SampleError, TouchPhase};
use crate::touch::{TouchGesture, TouchTransition};

/// Signals derived for one frame.
///
/// Every field is an idempotent read: it keeps its value until the next
/// evaluation replaces the whole snapshot. The one-shot tap signal is not part
/// of the snapshot; read it with [`GestureClassifier::touch_tap_detected`] or
/// [`GestureClassifier::take_tap`].
///
/// When touch support is disabled every touch-derived field is `false`/zero
/// apart from the sticky positions. When no pointer device is present every
/// pointer-derived field is `false`/zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSignals {
    /// Some contact began this frame.
    pub touch_pressed_down: bool,
    /// Some contact ended this frame.
    pub touch_released: bool,
    /// The primary contact's gesture has crossed the drag threshold.
    pub is_touch_dragging: bool,
    /// Position of the most recent tap; sticky across frames.
    pub last_tap_position: Point,
    /// Position where the most recent primary gesture began; sticky across frames.
    pub drag_anchor: Point,
    /// The primary contact is present and still on the surface.
    pub primary_contact_active: bool,
    /// Position of the primary contact this frame.
    pub primary_position: Option<Point>,
    /// Position of the secondary contact this frame.
    pub secondary_position: Option<Point>,
    /// Number of contacts this frame.
    pub touch_count: usize,
    /// Change in two-contact distance, or `0` below threshold or with fewer than two contacts.
    pub pinch_delta: f64,
    /// Left mouse button level.
    pub mouse_left_pressed: bool,
    /// Right mouse button level.
    pub mouse_right_pressed: bool,
    /// Left mouse button was released this frame.
    pub mouse_left_released: bool,
    /// Pointer position, or the origin with no pointer device.
    pub mouse_position: Point,
    /// Wheel delta after the deadzone.
    pub mouse_scroll_delta: f64,
    /// A mouse drag is in progress.
    pub is_mouse_dragging: bool,
}

/// State the classifier retains between frames.
///
/// Each logical input scope owns one of these; nothing is shared between
/// instances. [`GestureClassifier`] bundles one with its config, but the state
/// can also be driven directly through [`GestureState::evaluate`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    /// Primary-contact drag/tap machine.
    pub touch: TouchGesture,
    /// Two-contact pinch baseline.
    pub pinch: PinchTracker,
    /// Mouse button edges and drag.
    pub pointer: PointerGesture,
}

impl GestureState {
    /// Classify one frame and advance the retained state.
    ///
    /// A tap detected by a previous call and never consumed is dropped here.
    pub fn evaluate(&mut self, config: &GestureConfig, frame: &FrameSample<'_>) -> GestureSignals {
        self.touch.clear_pending();
        let mut signals = GestureSignals::default();

        if !frame.touch_enabled {
            self.touch.cancel();
        } else if accept(frame.validate_touches()) {
            self.evaluate_touch(config, frame.touches(), &mut signals);
        }
        signals.last_tap_position = self.touch.last_tap_position();
        signals.drag_anchor = self.touch.anchor();

        match &frame.pointer {
            None => self.pointer.disconnect(),
            Some(pointer) => {
                if accept(frame.validate_pointer()) {
                    self.evaluate_pointer(config, pointer, &mut signals);
                }
            }
        }

        signals
    }

    fn evaluate_touch(
        &mut self,
        config: &GestureConfig,
        contacts: &[Contact],
        signals: &mut GestureSignals,
    ) {
        signals.touch_count = contacts.len();
        signals.touch_pressed_down = contacts.iter().any(|c| c.phase == TouchPhase::Began);
        signals.touch_released = contacts.iter().any(|c| c.phase == TouchPhase::Ended);

        if let Some(primary) = contacts.first() {
            match self.touch.apply(primary, config.drag_threshold) {
                TouchTransition::DragStarted => {
                    debug!(anchor = ?self.touch.anchor(), position = ?primary.position, "touch drag started");
                }
                TouchTransition::Tap(position) => debug!(?position, "tap"),
                TouchTransition::DragEnded => debug!(position = ?primary.position, "touch drag ended"),
                TouchTransition::Canceled => debug!("touch gesture canceled"),
                TouchTransition::Pressed(_) | TouchTransition::None => {}
            }
            signals.primary_contact_active = primary.phase.in_progress();
            signals.primary_position = Some(primary.position);
        }
        signals.is_touch_dragging = self.touch.is_dragging();

        if let [primary, secondary, ..] = contacts {
            signals.secondary_position = Some(secondary.position);
            let began = secondary.phase == TouchPhase::Began;
            signals.pinch_delta = self.pinch.update(
                primary.position,
                secondary.position,
                began,
                config.pinch_threshold,
            );
            if began {
                debug!(baseline = self.pinch.baseline(), "pinch started");
            } else if signals.pinch_delta != 0.0 {
                debug!(
                    delta = signals.pinch_delta,
                    baseline = self.pinch.baseline(),
                    "pinch rebased"
                );
            }
        }
    }

    fn evaluate_pointer(
        &mut self,
        config: &GestureConfig,
        pointer: &PointerState,
        signals: &mut GestureSignals,
    ) {
        let frame = self
            .pointer
            .apply(pointer, config.mouse_drag_threshold, config.scroll_deadzone);
        if frame.drag_started {
            debug!(anchor = ?self.pointer.anchor(), position = ?pointer.position, "mouse drag started");
        }
        if frame.drag_ended {
            debug!(position = ?pointer.position, "mouse drag ended");
        }

        signals.mouse_position = pointer.position;
        signals.mouse_left_pressed = pointer.left_pressed;
        signals.mouse_right_pressed = pointer.right_pressed;
        signals.mouse_left_released = frame.left_released_edge;
        signals.mouse_scroll_delta = frame.scroll;
        signals.is_mouse_dragging = self.pointer.is_dragging();
    }
}

/// Malformed samples are a sampler bug: fatal in debug builds, skipped in release.
fn accept(result: Result<(), SampleError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            if cfg!(debug_assertions) {
                panic!("malformed frame sample: {err}");
            }
            warn!(%err, "ignoring malformed frame sample");
            false
        }
    }
}

/// Turns per-frame touch and pointer samples into gesture signals.
///
/// Construct one per input scope and call [`evaluate`](Self::evaluate) once
/// per frame. Signals stay readable until the next call.
///
/// ```
/// use kurbo::Point;
/// use understory_gesture::{Contact, ContactId, FrameSample, GestureClassifier, TouchPhase};
///
/// let mut gestures = GestureClassifier::new();
/// let at = Point::new(10.0, 10.0);
///
/// let down = [Contact::new(ContactId(0), at, TouchPhase::Began)];
/// assert!(gestures.evaluate(&FrameSample::new(&down)).touch_pressed_down);
///
/// let up = [Contact::new(ContactId(0), at, TouchPhase::Ended)];
/// assert!(gestures.evaluate(&FrameSample::new(&up)).touch_released);
///
/// assert!(gestures.touch_tap_detected());
/// assert!(!gestures.touch_tap_detected());
/// assert_eq!(gestures.signals().last_tap_position, at);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
    state: GestureState,
    signals: GestureSignals,
}

impl GestureClassifier {
    /// Creates a classifier with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier with the given thresholds.
    pub fn with_config(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Returns the construction-time thresholds.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the thresholds used by later [`evaluate`](Self::evaluate) calls.
    pub fn set_config(&mut self, config: GestureConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Classify one frame using the configured thresholds.
    pub fn evaluate(&mut self, frame: &FrameSample<'_>) -> &GestureSignals {
        self.signals = self.state.evaluate(&self.config, frame);
        &self.signals
    }

    /// Classify one frame using `config` in place of the configured thresholds.
    ///
    /// `config` must pass [`GestureConfig::validate`]. An invalid override
    /// panics in debug builds; in release builds it is logged and the
    /// configured thresholds are used instead.
    pub fn evaluate_with(
        &mut self,
        frame: &FrameSample<'_>,
        config: &GestureConfig,
    ) -> &GestureSignals {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                if cfg!(debug_assertions) {
                    panic!("invalid per-call gesture config: {err}");
                }
                warn!(%err, "ignoring invalid per-call gesture config");
                &self.config
            }
        };
        self.signals = self.state.evaluate(config, frame);
        &self.signals
    }

    /// Signals from the most recent evaluation.
    #[must_use]
    pub fn signals(&self) -> &GestureSignals {
        &self.signals
    }

    /// Returns whether a tap was detected by the latest evaluation, consuming it.
    ///
    /// Only the first read after the tap sees `true`.
    pub fn touch_tap_detected(&mut self) -> bool {
        self.take_tap().is_some()
    }

    /// Consumes the pending tap and returns its position.
    pub fn take_tap(&mut self) -> Option<Point> {
        self.state.touch.take_tap()
    }

    /// Retained state, for inspection.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Forget all retained state and signals, keeping the thresholds.
    pub fn reset(&mut self) {
        self.state = GestureState::default();
        self.signals = GestureSignals::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ContactId;

    fn touch(x: f64, y: f64, phase: TouchPhase) -> Contact {
        Contact::new(ContactId(0), Point::new(x, y), phase)
    }

    fn second(x: f64, y: f64, phase: TouchPhase) -> Contact {
        Contact::new(ContactId(1), Point::new(x, y), phase)
    }

    #[test]
    fn empty_frame_is_all_zero() {
        let mut gestures = GestureClassifier::new();
        assert_eq!(
            *gestures.evaluate(&FrameSample::empty()),
            GestureSignals::default()
        );
    }

    #[test]
    fn pressed_and_released_consider_every_contact() {
        let mut gestures = GestureClassifier::new();
        let frame = [
            touch(0.0, 0.0, TouchPhase::Stationary),
            second(50.0, 0.0, TouchPhase::Ended),
        ];
        let signals = gestures.evaluate(&FrameSample::new(&frame));
        assert!(!signals.touch_pressed_down);
        assert!(signals.touch_released);
        assert_eq!(signals.touch_count, 2);
    }

    #[test]
    fn only_primary_contact_drives_drag() {
        let mut gestures = GestureClassifier::new();
        gestures.evaluate(&FrameSample::new(&[
            touch(0.0, 0.0, TouchPhase::Began),
            second(0.0, 0.0, TouchPhase::Began),
        ]));
        let signals = gestures.evaluate(&FrameSample::new(&[
            touch(0.0, 0.0, TouchPhase::Stationary),
            second(200.0, 0.0, TouchPhase::Moved),
        ]));
        assert!(!signals.is_touch_dragging);
    }

    #[test]
    fn unconsumed_tap_expires_on_next_evaluation() {
        let mut gestures = GestureClassifier::new();
        gestures.evaluate(&FrameSample::new(&[touch(1.0, 1.0, TouchPhase::Began)]));
        gestures.evaluate(&FrameSample::new(&[touch(1.0, 1.0, TouchPhase::Ended)]));
        gestures.evaluate(&FrameSample::empty());

        assert!(!gestures.touch_tap_detected());
        assert_eq!(gestures.signals().last_tap_position, Point::new(1.0, 1.0));
    }

    #[test]
    fn promoted_secondary_does_not_tap() {
        let mut gestures = GestureClassifier::new();
        gestures.evaluate(&FrameSample::new(&[touch(0.0, 0.0, TouchPhase::Began)]));
        gestures.evaluate(&FrameSample::new(&[
            touch(0.0, 0.0, TouchPhase::Ended),
            second(9.0, 9.0, TouchPhase::Began),
        ]));
        assert!(gestures.touch_tap_detected());

        // The remaining contact is now primary but never began as primary.
        gestures.evaluate(&FrameSample::new(&[second(9.0, 9.0, TouchPhase::Ended)]));
        assert!(!gestures.touch_tap_detected());
    }

    #[test]
    fn disabled_touch_cancels_gesture_and_reports_nothing() {
        let mut gestures = GestureClassifier::new();
        gestures.evaluate(&FrameSample::new(&[touch(0.0, 0.0, TouchPhase::Began)]));
        gestures.evaluate(&FrameSample::new(&[touch(90.0, 0.0, TouchPhase::Moved)]));
        assert!(gestures.signals().is_touch_dragging);

        let contacts = [touch(0.0, 0.0, TouchPhase::Ended)];
        let signals = *gestures.evaluate(&FrameSample::new(&contacts).with_touch_enabled(false));
        assert!(!signals.is_touch_dragging);
        assert!(!signals.touch_released);
        assert!(!signals.primary_contact_active);
        assert_eq!(signals.touch_count, 0);
        assert!(!gestures.touch_tap_detected());
    }

    #[test]
    fn pinch_zero_with_single_contact_and_baseline_kept() {
        let mut gestures = GestureClassifier::new();
        gestures.evaluate(&FrameSample::new(&[
            touch(0.0, 0.0, TouchPhase::Stationary),
            second(100.0, 0.0, TouchPhase::Began),
        ]));
        let signals = gestures.evaluate(&FrameSample::new(&[touch(0.0, 0.0, TouchPhase::Stationary)]));
        assert_eq!(signals.pinch_delta, 0.0);
        assert_eq!(gestures.state().pinch.baseline(), 100.0);
    }

    #[test]
    fn evaluate_with_overrides_for_one_call() {
        let mut gestures = GestureClassifier::new();
        let tight = GestureConfig::default().with_drag_threshold(2.0);

        gestures.evaluate(&FrameSample::new(&[touch(0.0, 0.0, TouchPhase::Began)]));
        let frame = [touch(5.0, 0.0, TouchPhase::Moved)];
        assert!(!gestures.evaluate(&FrameSample::new(&frame)).is_touch_dragging);
        assert!(gestures.evaluate_with(&FrameSample::new(&frame), &tight).is_touch_dragging);
        assert_eq!(gestures.config().drag_threshold, 30.0);
    }

    #[test]
    fn with_config_rejects_invalid_thresholds() {
        let err = GestureClassifier::with_config(GestureConfig::default().with_drag_threshold(-1.0))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Negative {
                name: "drag_threshold",
                value: -1.0
            }
        );

        let mut gestures = GestureClassifier::new();
        assert!(gestures.set_config(GestureConfig::default().with_pinch_threshold(f64::INFINITY)).is_err());
        assert_eq!(gestures.config(), &GestureConfig::default());
    }

    #[test]
    fn pointer_signals_follow_device() {
        let mut gestures = GestureClassifier::new();
        let pointer = PointerState::at(Point::new(4.0, 2.0))
            .with_left(true)
            .with_right(true)
            .with_wheel(3.0);
        let signals = *gestures.evaluate(&FrameSample::pointer_only(pointer));
        assert!(signals.mouse_left_pressed);
        assert!(signals.mouse_right_pressed);
        assert_eq!(signals.mouse_position, Point::new(4.0, 2.0));
        assert_eq!(signals.mouse_scroll_delta, 3.0);

        let signals = *gestures.evaluate(&FrameSample::empty());
        assert_eq!(signals.mouse_position, Point::ZERO);
        assert!(!signals.mouse_left_pressed);
        assert!(!signals.mouse_left_released);
    }

    #[test]
    fn reset_keeps_config() {
        let config = GestureConfig::default().with_mouse_drag_threshold(1.0);
        let mut gestures = GestureClassifier::with_config(config.clone()).unwrap();
        gestures.evaluate(&FrameSample::new(&[touch(0.0, 0.0, TouchPhase::Began)]));

        gestures.reset();
        assert_eq!(gestures.state(), &GestureState::default());
        assert_eq!(gestures.config(), &config);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "malformed frame sample")]
    fn non_finite_contact_is_fatal_in_debug() {
        let mut gestures = GestureClassifier::new();
        gestures.evaluate(&FrameSample::new(&[touch(f64::NAN, 0.0, TouchPhase::Began)]));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "invalid per-call gesture config")]
    fn invalid_override_is_fatal_in_debug() {
        let mut gestures = GestureClassifier::new();
        let bad = GestureConfig::default().with_pinch_threshold(f64::NAN);
        gestures.evaluate_with(&FrameSample::empty(), &bad);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn malformed_touch_during_drag_reports_nothing_and_keeps_drag() {
        let mut gestures = GestureClassifier::new();
        gestures.evaluate(&FrameSample::new(&[touch(0.0, 0.0, TouchPhase::Began)]));
        gestures.evaluate(&FrameSample::new(&[touch(90.0, 0.0, TouchPhase::Moved)]));
        assert!(gestures.signals().is_touch_dragging);
        let before = gestures.state().touch;

        let signals = *gestures.evaluate(&FrameSample::new(&[touch(f64::NAN, 0.0, TouchPhase::Moved)]));
        assert!(!signals.is_touch_dragging);
        assert!(!signals.primary_contact_active);
        assert_eq!(signals.touch_count, 0);
        assert_eq!(gestures.state().touch, before);
        assert!(gestures.state().touch.is_dragging());

        // The drag resumes on the next well-formed frame and ends without a tap.
        let signals = *gestures.evaluate(&FrameSample::new(&[touch(95.0, 0.0, TouchPhase::Moved)]));
        assert!(signals.is_touch_dragging);
        gestures.evaluate(&FrameSample::new(&[touch(95.0, 0.0, TouchPhase::Ended)]));
        assert!(!gestures.touch_tap_detected());
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn malformed_pointer_keeps_button_state() {
        let mut gestures = GestureClassifier::new();
        let held = |x: f64| FrameSample::pointer_only(PointerState::at(Point::new(x, 0.0)).with_left(true));

        gestures.evaluate(&held(0.0));
        let before = gestures.state().pointer;

        let signals = *gestures.evaluate(&held(f64::NAN));
        assert!(!signals.mouse_left_pressed);
        assert_eq!(signals.mouse_position, Point::ZERO);
        assert_eq!(gestures.state().pointer, before);

        // Still held from the original press: moving drags from its anchor.
        let signals = *gestures.evaluate(&held(10.0));
        assert!(signals.is_mouse_dragging);
        assert_eq!(gestures.state().pointer.anchor(), Point::ZERO);

        let released = FrameSample::pointer_only(PointerState::at(Point::new(10.0, 0.0)));
        let signals = *gestures.evaluate(&released);
        assert!(signals.mouse_left_released);
        assert!(!signals.is_mouse_dragging);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn invalid_override_falls_back_to_configured_thresholds() {
        let mut gestures = GestureClassifier::new();
        let bad = GestureConfig::default().with_pinch_threshold(f64::NAN);

        gestures.evaluate(&FrameSample::new(&[
            touch(0.0, 0.0, TouchPhase::Stationary),
            second(10.0, 0.0, TouchPhase::Began),
        ]));
        let frame = [
            touch(0.0, 0.0, TouchPhase::Stationary),
            second(10.25, 0.0, TouchPhase::Moved),
        ];
        let signals = gestures.evaluate_with(&FrameSample::new(&frame), &bad);
        assert_eq!(signals.pinch_delta, 0.0);
        assert_eq!(gestures.state().pinch.baseline(), 10.0);
    }
}
