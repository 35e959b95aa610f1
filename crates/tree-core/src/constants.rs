use glam::Vec3;

// Shared layout/animation tuning constants used by the simulation and both frontends.

// Tree envelope
pub const TREE_HEIGHT: f32 = 14.0; // cone height, centred on the origin
pub const MAX_RADIUS: f32 = 6.0; // cone radius at the base
pub const FOLIAGE_HEIGHT_EXPONENT: f32 = 0.8; // < 1 pushes foliage toward the wide lower section

// Ambient sparkle cloud (loose cylinder around the cone)
pub const CLOUD_RADIUS_PAD: f32 = 2.0;
pub const CLOUD_HEIGHT_PAD: f32 = 4.0;
pub const CLOUD_Y_SHIFT: f32 = 1.0;

// Scatter sphere
pub const SCATTER_RADIUS: f32 = 30.0;
pub const SCATTER_Y_OFFSET: f32 = 5.0; // keeps the cloud around eye level

// Default instance counts per group
pub const FOLIAGE_COUNT: usize = 2500;
pub const ORNAMENT_COUNT: usize = 150;
pub const GIFT_COUNT: usize = 60;
pub const BAUBLE_COUNT: usize = 80;
pub const SPARKLE_COUNT: usize = 3000;
pub const MAX_INSTANCES_PER_GROUP: usize = 65_536;

// Informational per-particle speed
pub const BASE_SPEED_MIN: f32 = 0.02;
pub const BASE_SPEED_MAX: f32 = 0.05;

// Per-group lerp speed multipliers
pub const FOLIAGE_SPEED: f32 = 1.5;
pub const ORNAMENT_SPEED: f32 = 2.0;
pub const GIFT_SPEED: f32 = 1.8;
pub const BAUBLE_SPEED: f32 = 2.2;
pub const SPARKLE_SPEED: f32 = 0.5;
pub const TREE_MODE_FACTOR: f32 = 2.0; // assembling is snappier than dispersing

// Secondary motion
pub const FLOAT_FREQ: f32 = 1.0;
pub const FLOAT_AMPLITUDE: f32 = 0.001;
pub const SPARKLE_FLOAT_FREQ: f32 = 0.5;
pub const SPARKLE_FLOAT_AMPLITUDE: f32 = 0.02;
pub const TUMBLE_RATE_X: f32 = 0.2; // radians per second
pub const TUMBLE_RATE_Y: f32 = 0.1;
pub const UPRIGHT_TILT_FRACTION: f32 = 0.1;
pub const SPARKLE_PULSE_FREQ: f32 = 2.0;
pub const SPARKLE_PULSE_DEPTH: f32 = 0.3;
pub const SPARKLE_PULSE_BASE: f32 = 0.7;

// Ribbon bands around gift boxes
pub const RIBBON_THIN: f32 = 0.2;
pub const RIBBON_WRAP: f32 = 1.01; // slightly larger than the box so bands sit on its faces

// Top bow
pub const BOW_TREE_SCALE: f32 = 1.5;
pub const BOW_TREE_Y: f32 = 7.2;
pub const BOW_SCATTER_Y: f32 = 15.0;
pub const BOW_START_Y: f32 = 7.5;
pub const BOW_SCALE_RATE: f32 = 3.0;
pub const BOW_Y_RATE: f32 = 2.0;
pub const BOW_SWAY_FREQ: f32 = 0.5;
pub const BOW_SWAY_AMPLITUDE: f32 = 0.05;

// Tree parallax
pub const PARALLAX_YAW: f32 = 0.5;
pub const PARALLAX_PITCH: f32 = 0.2;
pub const PARALLAX_RATE: f32 = 2.0;

// Gestures
pub const GESTURE_CONFIDENCE_MIN: f32 = 0.5;

// Carousel physics
pub const DRAG_SCALE: f32 = 300.0; // pixels per card
pub const CAROUSEL_FRICTION: f32 = 0.92;
pub const CAROUSEL_SPRING: f32 = 0.05;
pub const CAROUSEL_BOUNCE: f32 = 0.05;
pub const CAROUSEL_MAX_VELOCITY: f32 = 0.5; // cards per tick
pub const SETTLE_EPSILON: f32 = 0.001;

// Carousel card placement (film strip)
pub const CARD_SPACING: f32 = 260.0;
pub const CARD_DEPTH: f32 = 150.0;
pub const CARD_YAW_DEGREES: f32 = -25.0;
pub const CARD_SCALE_FALLOFF: f32 = 0.2;
pub const CARD_SCALE_MIN: f32 = 0.6;
pub const CARD_OPACITY_FALLOFF: f32 = 0.4;
pub const CARD_OPACITY_MIN: f32 = 0.3;
pub const CARD_Z_INDEX_BASE: i32 = 100;
pub const DEFAULT_IMAGE_COUNT: usize = 5;

// Camera
pub const CAMERA_POSITION: [f32; 3] = [0.0, 4.0, 20.0];
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Palettes (sRGB hex)
pub const GIFT_PALETTE: [u32; 6] = [0xE63946, 0x2A9D8F, 0xF4A261, 0x457B9D, 0xD62828, 0x8338EC];
pub const BAUBLE_PALETTE: [u32; 4] = [0xF1FAEE, 0xA8DADC, 0xFFD700, 0xFF69B4];

#[inline]
pub fn camera_position_vec3() -> Vec3 {
    Vec3::new(CAMERA_POSITION[0], CAMERA_POSITION[1], CAMERA_POSITION[2])
}

/// Split a `0xRRGGBB` value into normalized channels.
#[inline]
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}
