//! One-dimensional inertial scroller behind the photo gallery.
//!
//! `progress` is a fractional card index. Dragging moves it directly; once
//! released, friction and a spring toward the nearest integer settle it on a
//! card. Past either end a constant nudge pushes it back. The position is
//! never hard-clamped.

use crate::constants::*;

/// Where one card sits in the film strip for the current progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPlacement {
    pub index: usize,
    /// `index - progress`.
    pub offset: f32,
    /// Lateral position, pixels.
    pub x: f32,
    /// Depth, pixels. Zero for the focused card, negative behind it.
    pub z: f32,
    pub yaw_degrees: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Stacking order; larger draws on top.
    pub z_index: i32,
}

impl CardPlacement {
    pub fn for_offset(index: usize, offset: f32) -> Self {
        let dist = offset.abs();
        Self {
            index,
            offset,
            x: offset * CARD_SPACING,
            z: -dist * CARD_DEPTH,
            yaw_degrees: offset * CARD_YAW_DEGREES,
            scale: (1.0 - dist * CARD_SCALE_FALLOFF).max(CARD_SCALE_MIN),
            opacity: (1.0 - dist * CARD_OPACITY_FALLOFF).max(CARD_OPACITY_MIN),
            z_index: CARD_Z_INDEX_BASE - dist.round() as i32,
        }
    }

    /// CSS transform for a card whose origin is the strip centre.
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.2}px, 0, {:.2}px) rotateY({:.2}deg) scale({:.4})",
            self.x, self.z, self.yaw_degrees, self.scale
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Carousel {
    count: usize,
    progress: f32,
    velocity: f32,
    dragging: bool,
    last_x: Option<f32>,
}

impl Carousel {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// With no images there is nothing to scroll; every operation is a no-op.
    pub fn is_enabled(&self) -> bool {
        self.count > 0
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Back to the first card, at rest. Called whenever the gallery opens.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.velocity = 0.0;
        self.dragging = false;
        self.last_x = None;
    }

    /// Only meaningful for tests and restoring state; non-finite values are ignored.
    pub fn set_state(&mut self, progress: f32, velocity: f32) {
        if progress.is_finite() && velocity.is_finite() {
            self.progress = progress;
            self.velocity = velocity;
        }
    }

    pub fn begin_drag(&mut self, pointer_x: f32) {
        if !self.is_enabled() {
            return;
        }
        self.dragging = true;
        self.velocity = 0.0;
        self.last_x = pointer_x.is_finite().then_some(pointer_x);
    }

    /// Pointer moved to `pointer_x` (pixels) while dragging.
    pub fn drag_to(&mut self, pointer_x: f32) {
        if !self.dragging || !pointer_x.is_finite() {
            return;
        }
        if let Some(last) = self.last_x.replace(pointer_x) {
            self.drag_by(pointer_x - last);
        }
    }

    /// Apply a horizontal pointer delta (pixels). Dragging left advances.
    pub fn drag_by(&mut self, delta_x: f32) {
        if !self.dragging || !delta_x.is_finite() {
            return;
        }
        self.progress += -(delta_x / DRAG_SCALE);
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.last_x = None;
    }

    /// One animation tick.
    pub fn step(&mut self) {
        if !self.is_enabled() {
            return;
        }
        if !self.dragging {
            self.velocity *= CAROUSEL_FRICTION;
            let target = self.progress.round();
            let diff = target - self.progress;
            self.velocity += diff * CAROUSEL_SPRING;
            self.progress += self.velocity;
            if self.velocity.abs() < SETTLE_EPSILON && diff.abs() < SETTLE_EPSILON {
                self.progress = target;
                self.velocity = 0.0;
            }
        }

        let last = self.count as f32 - 0.5;
        if self.progress < -0.5 {
            self.velocity += CAROUSEL_BOUNCE;
        } else if self.progress > last {
            self.velocity -= CAROUSEL_BOUNCE;
        }
        self.velocity = self
            .velocity
            .clamp(-CAROUSEL_MAX_VELOCITY, CAROUSEL_MAX_VELOCITY);
    }

    /// At rest on a valid card.
    pub fn is_settled(&self) -> bool {
        !self.dragging
            && self.velocity == 0.0
            && self.progress.fract() == 0.0
            && self.progress >= 0.0
            && self.progress <= self.count.saturating_sub(1) as f32
    }

    /// Index of the card closest to the centre.
    pub fn focused_index(&self) -> Option<usize> {
        if !self.is_enabled() {
            return None;
        }
        let max = (self.count - 1) as f32;
        Some(self.progress.round().clamp(0.0, max) as usize)
    }

    pub fn placement(&self, index: usize) -> Option<CardPlacement> {
        (index < self.count).then(|| CardPlacement::for_offset(index, index as f32 - self.progress))
    }

    pub fn placements(&self) -> impl Iterator<Item = CardPlacement> + '_ {
        (0..self.count).map(move |i| CardPlacement::for_offset(i, i as f32 - self.progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_card_is_centred_and_opaque() {
        let p = CardPlacement::for_offset(2, 0.0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.z, 0.0);
        assert_eq!(p.scale, 1.0);
        assert_eq!(p.opacity, 1.0);
        assert_eq!(p.z_index, CARD_Z_INDEX_BASE);
    }

    #[test]
    fn far_cards_hit_the_floors() {
        let p = CardPlacement::for_offset(0, -4.0);
        assert_eq!(p.scale, CARD_SCALE_MIN);
        assert_eq!(p.opacity, CARD_OPACITY_MIN);
        assert_eq!(p.x, -4.0 * CARD_SPACING);
        assert_eq!(p.yaw_degrees, 100.0);
    }

    #[test]
    fn css_transform_mentions_every_component() {
        let css = CardPlacement::for_offset(1, 1.0).css_transform();
        assert!(css.starts_with("translate3d(260.00px, 0, -150.00px)"));
        assert!(css.contains("rotateY(-25.00deg)"));
        assert!(css.contains("scale(0.8000)"));
    }
}
