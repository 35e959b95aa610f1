//! Scene mode and gallery overlay state, driven by discrete input events.

use crate::constants::GESTURE_CONFIDENCE_MIN;
use crate::input::InputSource;

/// Which layout every particle group converges toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    #[default]
    TreeShape,
    Scattered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    OpenPalm,
    ClosedFist,
}

impl GestureLabel {
    /// Map a recognizer category name. Categories outside the vocabulary
    /// (`"None"`, `"Thumb_Up"`, ...) yield `None`.
    pub fn from_category(name: &str) -> Option<Self> {
        match name {
            "Open_Palm" => Some(GestureLabel::OpenPalm),
            "Closed_Fist" => Some(GestureLabel::ClosedFist),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    pub label: GestureLabel,
    /// Classifier score in [0, 1].
    pub confidence: f32,
}

impl Gesture {
    pub fn new(label: GestureLabel, confidence: f32) -> Self {
        Self { label, confidence }
    }

    /// Strictly above the threshold; NaN never qualifies.
    #[inline]
    pub fn is_confident(&self) -> bool {
        self.confidence > GESTURE_CONFIDENCE_MIN
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionEvent {
    /// Pointer press or touch start.
    PointerDown,
    /// Pointer release or touch end.
    PointerUp,
    Gesture(Gesture),
    /// Click or tap that landed on the tree hit region.
    TreeClicked,
    /// Close request from the gallery UI.
    CloseOverlay,
}

/// Mode × overlay. Opening the overlay forces `TreeShape`; that constraint
/// is applied by the transitions themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub mode: InteractionMode,
    pub overlay_open: bool,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. `source` is the active input source: while the camera
    /// drives the scene, pointer presses do not change the mode.
    /// Returns whether anything changed.
    pub fn apply(&mut self, event: InteractionEvent, source: InputSource) -> bool {
        let before = *self;
        let pointer_allowed = !self.overlay_open && source == InputSource::Pointer;
        match event {
            InteractionEvent::PointerDown if pointer_allowed => {
                self.mode = InteractionMode::TreeShape;
            }
            InteractionEvent::PointerUp if pointer_allowed => {
                self.mode = InteractionMode::Scattered;
            }
            InteractionEvent::PointerDown | InteractionEvent::PointerUp => {}
            InteractionEvent::Gesture(g) if g.is_confident() => match g.label {
                GestureLabel::OpenPalm => {
                    if !self.overlay_open {
                        self.mode = InteractionMode::Scattered;
                    }
                }
                GestureLabel::ClosedFist => {
                    self.overlay_open = false;
                    self.mode = InteractionMode::TreeShape;
                }
            },
            InteractionEvent::Gesture(_) => {}
            InteractionEvent::TreeClicked => {
                if !self.overlay_open {
                    self.overlay_open = true;
                    self.mode = InteractionMode::TreeShape;
                }
            }
            InteractionEvent::CloseOverlay => {
                self.overlay_open = false;
            }
        }

        let changed = *self != before;
        if changed {
            log::info!(
                "[interaction] {:?} -> mode={:?} overlay_open={}",
                event,
                self.mode,
                self.overlay_open
            );
        }
        changed
    }

    /// True when this state was closed and `next` is open.
    #[inline]
    pub fn opens_overlay(&self, next: &InteractionState) -> bool {
        !self.overlay_open && next.overlay_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_map_to_vocabulary() {
        assert_eq!(
            GestureLabel::from_category("Open_Palm"),
            Some(GestureLabel::OpenPalm)
        );
        assert_eq!(
            GestureLabel::from_category("Closed_Fist"),
            Some(GestureLabel::ClosedFist)
        );
        assert_eq!(GestureLabel::from_category("Thumb_Up"), None);
        assert_eq!(GestureLabel::from_category("open_palm"), None);
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!Gesture::new(GestureLabel::OpenPalm, 0.5).is_confident());
        assert!(Gesture::new(GestureLabel::OpenPalm, 0.51).is_confident());
        assert!(!Gesture::new(GestureLabel::OpenPalm, f32::NAN).is_confident());
    }
}
