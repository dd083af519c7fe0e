// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame input snapshots consumed by the classifier.
//!
//! A [`FrameSample`] is a read-only view of everything the devices reported
//! for one frame: the ordered list of active touch [`Contact`]s and, if a
//! pointer device is attached, its [`PointerState`]. The classifier never
//! mutates a sample and never keeps a reference to it past
//! [`GestureClassifier::evaluate`](crate::GestureClassifier::evaluate).
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::{Contact, ContactId, FrameSample, PointerState, TouchPhase};
//!
//! let contacts = [Contact::new(ContactId(7), Point::new(10.0, 10.0), TouchPhase::Began)];
//! let frame = FrameSample::new(&contacts).with_pointer(PointerState::at(Point::new(3.0, 4.0)));
//!
//! assert!(frame.touch_enabled);
//! assert_eq!(frame.primary().map(|c| c.phase), Some(TouchPhase::Began));
//! assert!(frame.validate().is_ok());
//! ```

use kurbo::Point;

/// Opaque device identifier for a touch, stable across frames for the same finger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u64);

/// Lifecycle phase of a touch contact for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The finger touched the surface this frame.
    Began,
    /// The finger moved since the previous frame.
    Moved,
    /// The finger is down but did not move.
    Stationary,
    /// The finger was lifted this frame.
    Ended,
    /// The platform aborted the touch (palm rejection, focus loss, ...).
    Canceled,
}

impl TouchPhase {
    /// Returns `true` for phases in which the contact is still on the surface.
    #[must_use]
    pub fn in_progress(self) -> bool {
        matches!(self, Self::Began | Self::Moved | Self::Stationary)
    }
}

/// One active touch point in the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Device identifier; only ordinal position in the frame is used for classification.
    pub id: ContactId,
    /// Screen-space position in pixels.
    pub position: Point,
    /// Lifecycle phase for this frame.
    pub phase: TouchPhase,
}

impl Contact {
    /// Creates a contact.
    #[must_use]
    pub fn new(id: ContactId, position: Point, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            phase,
        }
    }
}

/// Snapshot of the pointer (mouse) device for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Screen-space position in pixels.
    pub position: Point,
    /// Whether the left button is currently held.
    pub left_pressed: bool,
    /// Whether the right button is currently held.
    pub right_pressed: bool,
    /// Vertical wheel movement reported this frame.
    pub wheel_delta_y: f64,
}

impl PointerState {
    /// A pointer at `position` with no buttons held and no wheel movement.
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Returns a copy with the left button level set.
    #[must_use]
    pub fn with_left(mut self, pressed: bool) -> Self {
        self.left_pressed = pressed;
        self
    }

    /// Returns a copy with the right button level set.
    #[must_use]
    pub fn with_right(mut self, pressed: bool) -> Self {
        self.right_pressed = pressed;
        self
    }

    /// Returns a copy with the given wheel delta.
    #[must_use]
    pub fn with_wheel(mut self, delta_y: f64) -> Self {
        self.wheel_delta_y = delta_y;
        self
    }
}

/// Everything the devices reported for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSample<'a> {
    /// Whether touch support is active. When `false`, every touch-derived
    /// signal reports `false`/zero and `contacts` is not read.
    pub touch_enabled: bool,
    /// Active contacts in device arrival order. Index 0 is the primary contact.
    pub contacts: &'a [Contact],
    /// Pointer device state, or `None` when no pointer device is attached.
    pub pointer: Option<PointerState>,
}

impl Default for FrameSample<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> FrameSample<'a> {
    /// A frame with touch enabled, no contacts and no pointer.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            touch_enabled: true,
            contacts: &[],
            pointer: None,
        }
    }

    /// A touch-only frame with the given contacts.
    #[must_use]
    pub fn new(contacts: &'a [Contact]) -> Self {
        Self {
            contacts,
            ..Self::empty()
        }
    }

    /// A pointer-only frame.
    #[must_use]
    pub fn pointer_only(pointer: PointerState) -> Self {
        Self::empty().with_pointer(pointer)
    }

    /// Returns a copy with the pointer state set.
    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerState) -> Self {
        self.pointer = Some(pointer);
        self
    }

    /// Returns a copy with touch support switched on or off.
    #[must_use]
    pub fn with_touch_enabled(mut self, enabled: bool) -> Self {
        self.touch_enabled = enabled;
        self
    }

    /// The primary (index 0) contact, if touch is enabled and one is present.
    #[must_use]
    pub fn primary(&self) -> Option<&'a Contact> {
        self.touches().first()
    }

    /// The secondary (index 1) contact, if touch is enabled and one is present.
    #[must_use]
    pub fn secondary(&self) -> Option<&'a Contact> {
        self.touches().get(1)
    }

    /// Contacts visible to the classifier: empty while touch is disabled.
    #[must_use]
    pub fn touches(&self) -> &'a [Contact] {
        if self.touch_enabled { self.contacts } else { &[] }
    }

    /// Checks the touch half of the sample.
    ///
    /// Contacts are only checked while touch is enabled.
    pub fn validate_touches(&self) -> Result<(), SampleError> {
        match self
            .touches()
            .iter()
            .position(|c| !is_finite_point(c.position))
        {
            Some(index) => Err(SampleError::NonFiniteContact { index }),
            None => Ok(()),
        }
    }

    /// Checks the pointer half of the sample.
    pub fn validate_pointer(&self) -> Result<(), SampleError> {
        match self.pointer {
            Some(p) if !is_finite_point(p.position) || !p.wheel_delta_y.is_finite() => {
                Err(SampleError::NonFinitePointer)
            }
            _ => Ok(()),
        }
    }

    /// Checks that every coordinate in the sample is finite.
    ///
    /// Returns the first violation found, touches before pointer.
    pub fn validate(&self) -> Result<(), SampleError> {
        self.validate_touches()?;
        self.validate_pointer()
    }
}

fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// A frame sample that breaks the sampler's contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    /// A contact position had a NaN or infinite coordinate.
    #[error("contact {index} has a non-finite position")]
    NonFiniteContact {
        /// Ordinal position of the contact in the frame.
        index: usize,
    },
    /// The pointer position or wheel delta was NaN or infinite.
    #[error("pointer state has a non-finite position or wheel delta")]
    NonFinitePointer,
}
