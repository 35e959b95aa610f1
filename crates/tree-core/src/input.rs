//! Input plumbing shared by the tick and the external producers.
//!
//! The camera/gesture recognizer runs independently of the frame loop. It
//! writes the latest 2D interaction vector into an [`InteractionSlot`]
//! (last write wins) and pushes classified gestures into a [`GestureInbox`]
//! that the tick drains at its start.

use crate::error::InputError;
use crate::interaction::Gesture;
use glam::Vec2;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Mutex;

/// Which producer feeds the interaction vector. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputSource {
    #[default]
    Pointer,
    Camera,
}

/// Single-slot holder for the latest interaction vector.
///
/// Both components are packed into one `u64`, so a reader never observes an
/// `x` from one write paired with a `y` from another.
#[derive(Debug, Default)]
pub struct InteractionSlot {
    bits: AtomicU64,
}

impl InteractionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored vector. Non-finite input is dropped.
    pub fn store(&self, v: Vec2) {
        if !v.is_finite() {
            return;
        }
        let packed = ((v.x.to_bits() as u64) << 32) | v.y.to_bits() as u64;
        self.bits.store(packed, Ordering::Release);
    }

    pub fn load(&self) -> Vec2 {
        let packed = self.bits.load(Ordering::Acquire);
        Vec2::new(
            f32::from_bits((packed >> 32) as u32),
            f32::from_bits(packed as u32),
        )
    }
}

pub type GestureBatch = SmallVec<[Gesture; 4]>;

/// Gestures emitted since the last tick.
#[derive(Debug, Default)]
pub struct GestureInbox {
    pending: Mutex<GestureBatch>,
}

impl GestureInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, gesture: Gesture) {
        self.lock().push(gesture);
    }

    pub fn drain(&self) -> GestureBatch {
        std::mem::take(&mut *self.lock())
    }

    // A panicking producer must not stall the tick.
    fn lock(&self) -> std::sync::MutexGuard<'_, GestureBatch> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

const SOURCE_POINTER: u8 = 0;
const SOURCE_CAMERA: u8 = 1;

/// Everything the producers share with the frame loop.
///
/// Writes from the inactive source are ignored, which enforces the
/// one-source-at-a-time policy without any coordination between producers.
#[derive(Debug, Default)]
pub struct InputHub {
    source: AtomicU8,
    vector: InteractionSlot,
    gestures: GestureInbox,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> InputSource {
        match self.source.load(Ordering::Acquire) {
            SOURCE_CAMERA => InputSource::Camera,
            _ => InputSource::Pointer,
        }
    }

    pub fn set_source(&self, source: InputSource) {
        let raw = match source {
            InputSource::Pointer => SOURCE_POINTER,
            InputSource::Camera => SOURCE_CAMERA,
        };
        let prev = self.source.swap(raw, Ordering::AcqRel);
        if prev != raw {
            log::info!("[input] source -> {:?}", source);
            // stale gestures from the old source must not fire
            self.gestures.drain();
        }
    }

    /// Disable the camera path after a failure and fall back to pointer input.
    pub fn report_failure(&self, err: &InputError) {
        log::warn!("[input] {err}; falling back to pointer input");
        self.set_source(InputSource::Pointer);
    }

    /// Pointer/touch position, already normalized to [-1, 1]².
    pub fn pointer_moved(&self, v: Vec2) {
        if self.source() == InputSource::Pointer {
            self.vector.store(v);
        }
    }

    /// Landmark-derived vector from the camera producer.
    pub fn hand_moved(&self, v: Vec2) {
        if self.source() == InputSource::Camera {
            self.vector.store(v);
        }
    }

    pub fn gesture(&self, gesture: Gesture) {
        if self.source() == InputSource::Camera {
            self.gestures.push(gesture);
        }
    }

    pub fn interaction_vector(&self) -> Vec2 {
        self.vector.load()
    }

    pub fn take_gestures(&self) -> GestureBatch {
        self.gestures.drain()
    }
}

/// Viewport pixel coordinates to [-1, 1]², y up. A degenerate viewport maps to
/// the centre.
#[inline]
pub fn normalize_viewport_point(client: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client.x / viewport.x) * 2.0 - 1.0,
        -(client.y / viewport.y) * 2.0 + 1.0,
    )
}

/// Hand landmark in normalized image coordinates to an interaction vector.
/// The camera preview is mirrored, so x is flipped.
#[inline]
pub fn hand_landmark_to_vector(landmark: Vec2) -> Vec2 {
    let x = (landmark.x - 0.5) * 2.0;
    let y = -(landmark.y - 0.5) * 2.0;
    Vec2::new(-x, y)
}
