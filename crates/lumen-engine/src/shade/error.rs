use std::fmt;

/// Rejected per-frame inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadeError {
    /// Resolution must be positive and finite on both axes.
    InvalidResolution { width: f32, height: f32 },
    /// Device-pixel scale must be positive and finite.
    InvalidScale(f32),
    /// `max_depth` must be positive and finite.
    InvalidMaxDepth(f32),
    /// Texel buffer length does not match `width × height × channels`.
    TextureDataLength { expected: usize, actual: usize },
}

impl fmt::Display for ShadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadeError::InvalidResolution { width, height } => {
                write!(f, "invalid resolution {width}x{height}")
            }
            ShadeError::InvalidScale(s) => write!(f, "invalid scale factor {s}"),
            ShadeError::InvalidMaxDepth(d) => write!(f, "invalid max depth {d}"),
            ShadeError::TextureDataLength { expected, actual } => {
                write!(f, "texture data has {actual} bytes, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ShadeError {}
