use std::fmt;

use crate::prim::PrimError;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// `restore` without a matching `save`.
    StackUnbalanced,
    /// `pop_clip` with no clip pushed.
    ClipStackEmpty,
    /// Depth step must be finite and positive.
    InvalidDepthStep(f32),
    Prim(PrimError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::StackUnbalanced => write!(f, "restore called without matching save"),
            SceneError::ClipStackEmpty => write!(f, "pop_clip called without matching push_clip"),
            SceneError::InvalidDepthStep(step) => write!(f, "invalid depth step {step}"),
            SceneError::Prim(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Prim(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PrimError> for SceneError {
    fn from(err: PrimError) -> Self {
        SceneError::Prim(err)
    }
}
