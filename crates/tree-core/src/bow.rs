//! The bow on top of the tree and the parallax tilt of the whole tree group.

use crate::constants::*;
use crate::interaction::InteractionMode;
use crate::particles::{lerp_rate, FrameClock, InstanceTransform};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Single decorated object: grows in when the tree forms, shrinks and lifts
/// away when it scatters.
#[derive(Clone, Debug, PartialEq)]
pub struct TopBow {
    pub scale: f32,
    pub y: f32,
    pub yaw: f32,
}

impl Default for TopBow {
    fn default() -> Self {
        Self {
            scale: 0.0,
            y: BOW_START_Y,
            yaw: 0.0,
        }
    }
}

impl TopBow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, mode: InteractionMode, clock: FrameClock) {
        let delta = clock.safe_delta();
        let (target_scale, target_y) = match mode {
            InteractionMode::TreeShape => (BOW_TREE_SCALE, BOW_TREE_Y),
            InteractionMode::Scattered => (0.0, BOW_SCATTER_Y),
        };
        self.scale += (target_scale - self.scale) * lerp_rate(BOW_SCALE_RATE, delta);
        self.y += (target_y - self.y) * lerp_rate(BOW_Y_RATE, delta);
        if mode == InteractionMode::TreeShape {
            self.yaw = (clock.safe_elapsed() * BOW_SWAY_FREQ).sin() * BOW_SWAY_AMPLITUDE;
        }
    }

    pub fn transform(&self) -> InstanceTransform {
        InstanceTransform::new(
            Vec3::new(0.0, self.y, 0.0),
            Vec3::new(0.0, self.yaw, 0.0),
            Vec3::splat(self.scale),
        )
    }
}

/// Tree-group rotation that follows the interaction vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TreeParallax {
    /// Rotation about x, radians.
    pub pitch: f32,
    /// Rotation about y, radians.
    pub yaw: f32,
}

impl TreeParallax {
    pub fn update(&mut self, interaction: Vec2, clock: FrameClock) {
        let interaction = if interaction.is_finite() {
            interaction
        } else {
            Vec2::ZERO
        };
        let rate = lerp_rate(PARALLAX_RATE, clock.safe_delta());
        self.yaw += (interaction.x * PARALLAX_YAW - self.yaw) * rate;
        self.pitch += (interaction.y * PARALLAX_PITCH - self.pitch) * rate;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation())
    }
}
