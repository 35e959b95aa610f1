use crate::layout::ParticleKind;
use thiserror::Error;

/// Reasons a scene configuration is rejected at construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("{kind:?} group requests {count} instances, limit is {limit}")]
    InvalidCount {
        kind: ParticleKind,
        count: usize,
        limit: usize,
    },
    #[error("camera field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),
    #[error("camera needs 0 < znear < zfar and an eye distinct from its target")]
    InvalidCamera,
}

/// Failures reported by an external input source. None of these are fatal:
/// the camera path is switched off and pointer input takes over.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("gesture model failed to load: {0}")]
    GestureModelUnavailable(String),
}
