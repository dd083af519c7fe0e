// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composing touch and pointer devices into one frame sample.
//!
//! A platform layer usually has a touch surface, a pointer device, both or
//! neither, and which ones exist is only known at runtime. Each device is
//! exposed through its own trait and [`sample_frame`] merges whatever is
//! present into a single [`FrameSample`] for one classifier.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::source::{capabilities, sample_frame};
//! use understory_gesture::{Contact, ContactId, PointerState, TouchPhase};
//!
//! let touches = vec![Contact::new(ContactId(3), Point::new(1.0, 2.0), TouchPhase::Began)];
//! let mouse = PointerState::at(Point::new(5.0, 5.0));
//!
//! let caps = capabilities(Some(&touches), Some(&mouse));
//! assert!(caps.touch && caps.pointer);
//!
//! let frame = sample_frame(Some(&touches), Some(&mouse));
//! assert_eq!(frame.contacts.len(), 1);
//! assert_eq!(frame.pointer, Some(mouse));
//!
//! // No touch surface: touch-derived signals will be reported as disabled.
//! let frame = sample_frame(None, Some(&mouse));
//! assert!(!frame.touch_enabled);
//! ```

use alloc::vec::Vec;

use crate::sample::{Contact, FrameSample, PointerState};

/// A touch surface.
pub trait TouchSource {
    /// Whether touch support is currently active.
    fn touch_enabled(&self) -> bool {
        true
    }

    /// Active contacts for this frame in arrival order.
    fn contacts(&self) -> &[Contact];
}

/// A pointer (mouse) device.
pub trait PointerSource {
    /// Current pointer state, or `None` when no device is attached.
    fn pointer(&self) -> Option<PointerState>;
}

impl TouchSource for Vec<Contact> {
    fn contacts(&self) -> &[Contact] {
        self
    }
}

impl PointerSource for PointerState {
    fn pointer(&self) -> Option<PointerState> {
        Some(*self)
    }
}

impl PointerSource for Option<PointerState> {
    fn pointer(&self) -> Option<PointerState> {
        *self
    }
}

/// Which input devices are available right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCapabilities {
    /// A touch source is present and enabled.
    pub touch: bool,
    /// A pointer source is present and reports a device.
    pub pointer: bool,
}

/// Detect the available devices from the given sources.
#[must_use]
pub fn capabilities(
    touch: Option<&dyn TouchSource>,
    pointer: Option<&dyn PointerSource>,
) -> InputCapabilities {
    InputCapabilities {
        touch: touch.is_some_and(|t| t.touch_enabled()),
        pointer: pointer.and_then(|p| p.pointer()).is_some(),
    }
}

/// Merge the given sources into one frame sample.
///
/// A missing touch source yields a touch-disabled frame; a missing pointer
/// source yields a frame without a pointer.
#[must_use]
pub fn sample_frame<'a>(
    touch: Option<&'a dyn TouchSource>,
    pointer: Option<&dyn PointerSource>,
) -> FrameSample<'a> {
    let (touch_enabled, contacts) = match touch {
        Some(t) => (t.touch_enabled(), t.contacts()),
        None => (false, &[][..]),
    };
    FrameSample {
        touch_enabled,
        contacts,
        pointer: pointer.and_then(|p| p.pointer()),
    }
}
