use std::fmt;

/// Producer-side contract violations detected while building or encoding a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimError {
    /// A primitive index past the end of the batch.
    PrimitiveOutOfRange { index: usize, len: usize },
    /// A primitive references an arena slot that does not exist.
    HandleOutOfRange { handle: u32, len: usize },
    /// Shadow radius is negative or not finite.
    InvalidBlurRadius { index: usize, radius: f32 },
    /// Stroke width is negative or not finite.
    InvalidStrokeWidth { index: usize, width: f32 },
    /// The arena holds more entries than a `u32` handle can address.
    ArenaFull,
}

impl fmt::Display for PrimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimError::PrimitiveOutOfRange { index, len } => {
                write!(f, "primitive index {index} out of range (batch has {len} primitives)")
            }
            PrimError::HandleOutOfRange { handle, len } => {
                write!(f, "primitive handle {handle} out of range (arena has {len} entries)")
            }
            PrimError::InvalidBlurRadius { index, radius } => {
                write!(f, "primitive {index}: invalid blur radius {radius}")
            }
            PrimError::InvalidStrokeWidth { index, width } => {
                write!(f, "primitive {index}: invalid stroke width {width}")
            }
            PrimError::ArenaFull => write!(f, "primitive arena exceeds u32 addressing"),
        }
    }
}

impl std::error::Error for PrimError {}
