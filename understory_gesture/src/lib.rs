// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: per-frame gesture classification for touch and pointer input.
//!
//! This crate turns raw per-frame device samples into debounced gesture
//! signals. Once per frame the caller hands a [`FrameSample`] (the active
//! touch contacts plus an optional pointer snapshot) to a
//! [`GestureClassifier`], which updates the state it retains from earlier
//! frames and produces [`GestureSignals`] that stay readable until the next
//! frame.
//!
//! The building blocks are small state machines that can also be used on
//! their own:
//!
//! - [`touch`]: press/drag/tap classification for the primary contact
//! - [`pinch`]: incremental pinch distance across two contacts
//! - [`pointer`]: mouse button edges, mouse drag and wheel deadzone
//! - [`source`]: composing independent touch and pointer devices into one frame
//!
//! ## Classification rules
//!
//! - A primary-contact gesture becomes a drag once it moves strictly further
//!   than [`GestureConfig::drag_threshold`] from where it began, and stays a
//!   drag until the contact lifts. A gesture that lifts without dragging is a
//!   tap. A press/release cycle is a tap or a drag, never both.
//! - Taps are one-shot: [`GestureClassifier::touch_tap_detected`] returns
//!   `true` for the first read after the tap and clears it. The position is
//!   kept in [`GestureSignals::last_tap_position`] until the next tap.
//! - Pinch deltas are measured against a baseline reset whenever the
//!   secondary contact begins. Changes at or below
//!   [`GestureConfig::pinch_threshold`] report `0` and keep the baseline;
//!   larger changes are reported and move the baseline.
//! - A mouse drag starts on the left-button press edge and latches once the
//!   pointer moves strictly further than
//!   [`GestureConfig::mouse_drag_threshold`]; it clears on release.
//!
//! Missing devices are not errors: without a pointer, or with touch
//! disabled, the corresponding signals are `false`/zero.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{Contact, ContactId, FrameSample, GestureClassifier, TouchPhase};
//!
//! let mut gestures = GestureClassifier::new();
//! let id = ContactId(0);
//!
//! let frame = [Contact::new(id, Point::new(0.0, 0.0), TouchPhase::Began)];
//! let signals = gestures.evaluate(&FrameSample::new(&frame));
//! assert!(signals.touch_pressed_down);
//! assert!(!signals.is_touch_dragging);
//!
//! let frame = [Contact::new(id, Point::new(50.0, 0.0), TouchPhase::Moved)];
//! assert!(gestures.evaluate(&FrameSample::new(&frame)).is_touch_dragging);
//!
//! let frame = [Contact::new(id, Point::new(50.0, 0.0), TouchPhase::Ended)];
//! assert!(gestures.evaluate(&FrameSample::new(&frame)).touch_released);
//! assert!(!gestures.touch_tap_detected()); // it was a drag
//! ```
//!
//! ## Threading
//!
//! A classifier is evaluated from one thread, once per frame. Separate input
//! scopes (for example two halves of a split screen) each own their own
//! [`GestureClassifier`]; there is no shared global state.
//!
//! ## Features
//!
//! - `std` (default): build Kurbo, `thiserror` and `tracing` against the standard library
//! - `libm`: use `libm` for float math in `no_std` builds
//! - `serde`: derive `Serialize`/`Deserialize` for [`GestureConfig`]
//!
//! The crate logs gesture transitions through `tracing` at `debug` level and
//! never installs a subscriber.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod classifier;
mod config;
pub mod pinch;
pub mod pointer;
mod sample;
pub mod source;
pub mod touch;

pub use classifier::{GestureClassifier, GestureSignals, GestureState};
pub use config::{
    ConfigError, DEFAULT_DRAG_THRESHOLD, DEFAULT_MOUSE_DRAG_THRESHOLD, DEFAULT_PINCH_THRESHOLD,
    DEFAULT_SCROLL_DEADZONE, GestureConfig,
};
pub use sample::{Contact, ContactId, FrameSample, PointerState, SampleError, TouchPhase};
