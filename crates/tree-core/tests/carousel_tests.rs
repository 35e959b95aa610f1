// Host-side tests for the gallery's inertial scroller.

use tree_core::*;

fn settle(c: &mut Carousel, max_ticks: usize) -> usize {
    for n in 0..max_ticks {
        if c.is_settled() {
            return n;
        }
        c.step();
    }
    panic!(
        "carousel did not settle: progress={} velocity={}",
        c.progress(),
        c.velocity()
    );
}

#[test]
fn two_left_drags_advance_two_cards_and_settle_there() {
    let mut c = Carousel::new(5);
    c.begin_drag(600.0);
    c.drag_by(-300.0);
    c.drag_by(-300.0);
    assert!((c.progress() - 2.0).abs() < 1e-6);
    c.end_drag();
    settle(&mut c, 100);
    assert_eq!(c.progress(), 2.0);
    assert_eq!(c.velocity(), 0.0);
    assert_eq!(c.focused_index(), Some(2));
}

#[test]
fn pointer_positions_drive_the_same_deltas() {
    let mut c = Carousel::new(5);
    c.begin_drag(900.0);
    c.drag_to(750.0);
    c.drag_to(600.0);
    assert!((c.progress() - 1.0).abs() < 1e-6);
    c.drag_to(900.0);
    assert!(c.progress().abs() < 1e-6);
}

#[test]
fn zero_sum_drag_leaves_no_drag_contribution() {
    let mut c = Carousel::new(5);
    c.set_state(1.0, 0.0);
    c.begin_drag(0.0);
    for d in [-120.0, 45.0, -10.0, 200.0, -115.0] {
        c.drag_by(d);
    }
    assert!((c.progress() - 1.0).abs() < 1e-5);
    c.end_drag();
    settle(&mut c, 100);
    assert_eq!(c.progress(), 1.0);
}

#[test]
fn drags_are_ignored_when_not_dragging() {
    let mut c = Carousel::new(5);
    c.drag_by(-300.0);
    c.drag_to(10.0);
    assert_eq!(c.progress(), 0.0);
}

#[test]
fn begin_drag_zeroes_velocity_and_freezes_integration() {
    let mut c = Carousel::new(5);
    c.set_state(1.3, 0.2);
    c.begin_drag(0.0);
    assert_eq!(c.velocity(), 0.0);
    for _ in 0..10 {
        c.step();
    }
    assert_eq!(c.progress(), 1.3);
}

#[test]
fn release_between_cards_snaps_to_nearest() {
    let mut c = Carousel::new(5);
    c.begin_drag(0.0);
    c.drag_by(-0.6 * DRAG_SCALE);
    c.end_drag();
    settle(&mut c, 2000);
    assert_eq!(c.progress(), 1.0);

    c.begin_drag(0.0);
    c.drag_by(0.4 * DRAG_SCALE);
    c.end_drag();
    settle(&mut c, 2000);
    assert_eq!(c.progress(), 1.0);
}

#[test]
fn settles_on_a_valid_card_from_any_state() {
    for count in [1usize, 2, 5] {
        for i in 0..=54 {
            let p0 = -12.0 + i as f32 * 0.5;
            for j in 0..=8 {
                let v0 = -2.0 + j as f32 * 0.5;
                let mut c = Carousel::new(count);
                c.set_state(p0, v0);
                settle(&mut c, 2000);
                let p = c.progress();
                assert_eq!(p.fract(), 0.0);
                assert!(p >= 0.0 && p <= (count - 1) as f32, "settled at {p}");
                assert_eq!(c.velocity(), 0.0);
            }
        }
    }
}

#[test]
fn overscroll_is_pushed_back_without_clamping() {
    let mut c = Carousel::new(3);
    c.set_state(-4.0, 0.0);
    c.step();
    assert!(c.velocity() > 0.0);
    assert!(c.progress() < -0.5, "position is not clamped");

    let mut c = Carousel::new(3);
    c.set_state(6.0, 0.0);
    c.step();
    assert!(c.velocity() < 0.0);
}

#[test]
fn velocity_never_exceeds_the_cap() {
    let mut c = Carousel::new(4);
    c.set_state(-30.0, 0.0);
    for _ in 0..500 {
        c.step();
        assert!(c.velocity().abs() <= CAROUSEL_MAX_VELOCITY);
        assert!(c.progress().is_finite());
    }
}

#[test]
fn empty_gallery_is_inert() {
    let mut c = Carousel::new(0);
    assert!(!c.is_enabled());
    c.begin_drag(0.0);
    c.drag_by(-300.0);
    for _ in 0..10 {
        c.step();
    }
    assert_eq!(c.progress(), 0.0);
    assert!(c.progress().is_finite());
    assert_eq!(c.placements().count(), 0);
    assert_eq!(c.focused_index(), None);
    assert!(c.placement(0).is_none());
}

#[test]
fn non_finite_input_is_discarded() {
    let mut c = Carousel::new(3);
    c.begin_drag(f32::NAN);
    c.drag_to(100.0);
    c.drag_by(f32::INFINITY);
    c.drag_by(f32::NAN);
    assert_eq!(c.progress(), 0.0);
    c.set_state(f32::NAN, 0.0);
    assert_eq!(c.progress(), 0.0);
}

#[test]
fn reset_returns_to_first_card_at_rest() {
    let mut c = Carousel::new(5);
    c.begin_drag(0.0);
    c.drag_by(-700.0);
    c.reset();
    assert_eq!(c.progress(), 0.0);
    assert_eq!(c.velocity(), 0.0);
    assert!(!c.is_dragging());
}

#[test]
fn film_strip_is_symmetric_around_the_focused_card() {
    let mut c = Carousel::new(5);
    c.set_state(2.0, 0.0);
    let cards: Vec<CardPlacement> = c.placements().collect();
    assert_eq!(cards.len(), 5);
    assert_eq!(cards[2].x, 0.0);
    assert_eq!(cards[2].scale, 1.0);
    for k in 1..=2 {
        let left = cards[2 - k];
        let right = cards[2 + k];
        assert_eq!(left.x, -right.x);
        assert_eq!(left.z, right.z);
        assert_eq!(left.yaw_degrees, -right.yaw_degrees);
        assert_eq!(left.scale, right.scale);
        assert_eq!(left.opacity, right.opacity);
        assert_eq!(left.z_index, right.z_index);
        assert!(left.z_index < cards[2].z_index);
    }
    assert!((cards[3].scale - 0.8).abs() < 1e-6);
    assert!((cards[3].opacity - 0.6).abs() < 1e-6);
    assert!((cards[4].opacity - CARD_OPACITY_MIN).abs() < 1e-6);
}

#[test]
fn fractional_progress_places_cards_between_slots() {
    let mut c = Carousel::new(3);
    c.set_state(0.5, 0.0);
    let p = c.placement(1).expect("card 1");
    assert!((p.offset - 0.5).abs() < 1e-6);
    assert!((p.x - 130.0).abs() < 1e-3);
    assert!((p.z + 75.0).abs() < 1e-3);
    assert!((p.yaw_degrees + 12.5).abs() < 1e-3);
}
