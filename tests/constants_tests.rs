// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust constants directly.

#![allow(dead_code)]
mod constants {
    include!("../crates/tree-core/src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Tree envelope
    assert!(TREE_HEIGHT > 0.0);
    assert!(MAX_RADIUS > 0.0);
    assert!(FOLIAGE_HEIGHT_EXPONENT > 0.0 && FOLIAGE_HEIGHT_EXPONENT < 1.0);

    // The scatter sphere should enclose the tree
    assert!(SCATTER_RADIUS > TREE_HEIGHT);
    assert!(SCATTER_RADIUS > MAX_RADIUS + CLOUD_RADIUS_PAD);

    // Speeds should be positive
    for s in [FOLIAGE_SPEED, ORNAMENT_SPEED, GIFT_SPEED, BAUBLE_SPEED, SPARKLE_SPEED] {
        assert!(s > 0.0);
    }
    assert!(TREE_MODE_FACTOR > 1.0);
    assert!(BASE_SPEED_MIN > 0.0 && BASE_SPEED_MIN < BASE_SPEED_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn default_counts_fit_the_instance_limit() {
    for c in [FOLIAGE_COUNT, ORNAMENT_COUNT, GIFT_COUNT, BAUBLE_COUNT, SPARKLE_COUNT] {
        assert!(c > 0 && c <= MAX_INSTANCES_PER_GROUP);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn carousel_physics_is_damped() {
    // Friction must bleed velocity, spring and bounce must be gentle
    assert!(CAROUSEL_FRICTION > 0.0 && CAROUSEL_FRICTION < 1.0);
    assert!(CAROUSEL_SPRING > 0.0 && CAROUSEL_SPRING < 1.0);
    assert!(CAROUSEL_BOUNCE > 0.0 && CAROUSEL_BOUNCE < CAROUSEL_MAX_VELOCITY);
    assert!(SETTLE_EPSILON > 0.0 && SETTLE_EPSILON < 0.01);
    assert!(DRAG_SCALE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn card_floors_are_reachable() {
    assert!(CARD_SCALE_MIN > 0.0 && CARD_SCALE_MIN < 1.0);
    assert!(CARD_OPACITY_MIN > 0.0 && CARD_OPACITY_MIN < 1.0);
    // Two cards away should already be at the opacity floor
    assert!(1.0 - 2.0 * CARD_OPACITY_FALLOFF <= CARD_OPACITY_MIN);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn sparkle_pulse_never_inverts() {
    assert!(SPARKLE_PULSE_BASE - SPARKLE_PULSE_DEPTH > 0.0);
    assert!(SPARKLE_PULSE_BASE + SPARKLE_PULSE_DEPTH <= 1.0 + f32::EPSILON);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn bow_sits_on_the_apex_and_lifts_away() {
    let apex = TREE_HEIGHT / 2.0;
    assert!(BOW_TREE_Y >= apex);
    assert!(BOW_SCATTER_Y > BOW_TREE_Y);
    assert!(BOW_START_Y > BOW_TREE_Y && BOW_START_Y < BOW_SCATTER_Y);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_sees_the_tree() {
    let eye = camera_position_vec3();
    assert!(eye.z > MAX_RADIUS);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < CAMERA_ZFAR);
    assert!(CAMERA_FOV_DEGREES > 0.0 && CAMERA_FOV_DEGREES < 180.0);
    assert!(GESTURE_CONFIDENCE_MIN > 0.0 && GESTURE_CONFIDENCE_MIN < 1.0);
}

#[test]
fn palette_channels_are_normalized() {
    for hex in GIFT_PALETTE.iter().chain(BAUBLE_PALETTE.iter()) {
        for c in rgb_from_hex(*hex) {
            assert!((0.0..=1.0).contains(&c));
        }
    }
    assert_eq!(rgb_from_hex(0xFFD700), [1.0, 215.0 / 255.0, 0.0]);
}
