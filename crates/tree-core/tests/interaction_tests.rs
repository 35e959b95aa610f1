// Host-side tests for the mode/overlay state machine.

use tree_core::*;

fn fist(confidence: f32) -> InteractionEvent {
    InteractionEvent::Gesture(Gesture::new(GestureLabel::ClosedFist, confidence))
}

fn palm(confidence: f32) -> InteractionEvent {
    InteractionEvent::Gesture(Gesture::new(GestureLabel::OpenPalm, confidence))
}

fn all_states() -> Vec<InteractionState> {
    let mut out = Vec::new();
    for mode in [InteractionMode::TreeShape, InteractionMode::Scattered] {
        for overlay_open in [false, true] {
            out.push(InteractionState { mode, overlay_open });
        }
    }
    out
}

#[test]
fn starts_as_a_closed_tree() {
    let s = InteractionState::new();
    assert_eq!(s.mode, InteractionMode::TreeShape);
    assert!(!s.overlay_open);
}

#[test]
fn pointer_press_forms_and_release_scatters() {
    let mut s = InteractionState::new();
    assert!(s.apply(InteractionEvent::PointerUp, InputSource::Pointer));
    assert_eq!(s.mode, InteractionMode::Scattered);
    assert!(s.apply(InteractionEvent::PointerDown, InputSource::Pointer));
    assert_eq!(s.mode, InteractionMode::TreeShape);
    assert!(!s.apply(InteractionEvent::PointerDown, InputSource::Pointer));
}

#[test]
fn pointer_is_suppressed_while_camera_drives() {
    let mut s = InteractionState::new();
    assert!(!s.apply(InteractionEvent::PointerUp, InputSource::Camera));
    assert_eq!(s.mode, InteractionMode::TreeShape);
}

#[test]
fn pointer_is_suppressed_while_overlay_is_open() {
    let mut s = InteractionState {
        mode: InteractionMode::TreeShape,
        overlay_open: true,
    };
    s.apply(InteractionEvent::PointerUp, InputSource::Pointer);
    assert_eq!(s.mode, InteractionMode::TreeShape);
    assert!(s.overlay_open);
}

#[test]
fn open_palm_scatters_only_with_overlay_closed() {
    let mut s = InteractionState::new();
    s.apply(palm(0.8), InputSource::Camera);
    assert_eq!(s.mode, InteractionMode::Scattered);

    let mut s = InteractionState {
        mode: InteractionMode::TreeShape,
        overlay_open: true,
    };
    assert!(!s.apply(palm(0.99), InputSource::Camera));
    assert_eq!(s.mode, InteractionMode::TreeShape);
}

#[test]
fn low_confidence_gestures_are_ignored() {
    for state in all_states() {
        let mut s = state;
        assert!(!s.apply(palm(0.5), InputSource::Camera));
        assert!(!s.apply(fist(0.2), InputSource::Camera));
        assert!(!s.apply(fist(f32::NAN), InputSource::Camera));
        assert_eq!(s, state);
    }
}

#[test]
fn closed_fist_always_resets() {
    for state in all_states() {
        let mut s = state;
        for _ in 0..3 {
            s.apply(fist(0.9), InputSource::Camera);
            assert_eq!(s.mode, InteractionMode::TreeShape);
            assert!(!s.overlay_open);
        }
    }
}

#[test]
fn tree_click_opens_overlay_and_forms_tree() {
    let mut s = InteractionState {
        mode: InteractionMode::Scattered,
        overlay_open: false,
    };
    let before = s;
    assert!(s.apply(InteractionEvent::TreeClicked, InputSource::Pointer));
    assert!(s.overlay_open);
    assert_eq!(s.mode, InteractionMode::TreeShape);
    assert!(before.opens_overlay(&s));

    // a second click while open changes nothing
    assert!(!s.apply(InteractionEvent::TreeClicked, InputSource::Pointer));
}

#[test]
fn close_request_only_closes() {
    let mut s = InteractionState {
        mode: InteractionMode::TreeShape,
        overlay_open: true,
    };
    assert!(s.apply(InteractionEvent::CloseOverlay, InputSource::Pointer));
    assert!(!s.overlay_open);
    assert_eq!(s.mode, InteractionMode::TreeShape);
    assert!(!s.apply(InteractionEvent::CloseOverlay, InputSource::Pointer));
}

#[test]
fn open_overlay_is_always_a_tree() {
    let events = [
        InteractionEvent::PointerDown,
        InteractionEvent::PointerUp,
        palm(0.9),
        fist(0.9),
        InteractionEvent::TreeClicked,
        InteractionEvent::CloseOverlay,
    ];
    for state in all_states().into_iter().filter(|s| !s.overlay_open) {
        for a in events {
            for b in events {
                for source in [InputSource::Pointer, InputSource::Camera] {
                    let mut s = state;
                    s.apply(a, source);
                    s.apply(b, source);
                    if s.overlay_open {
                        assert_eq!(s.mode, InteractionMode::TreeShape, "{a:?} then {b:?}");
                    }
                }
            }
        }
    }
}
