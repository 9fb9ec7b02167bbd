use crate::coords::{Affine, Bounds, Vec2};

use super::PrimError;

/// Parameters shared by every primitive recorded under the same state.
///
/// Vertex stage order: `transform` (if any) → `+ translate` → `× frame scale`.
/// The clip rect lives in the same pre-translate space as the geometry and is
/// moved by the same translate/scale, so it lines up with fragment positions.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PrimitiveParams {
    pub transform: Option<Affine>,
    pub translate: Vec2,
    pub clip: Option<Bounds>,
}

impl PrimitiveParams {
    #[inline]
    pub fn translated(translate: Vec2) -> Self {
        Self { translate, ..Self::default() }
    }

    #[inline]
    pub fn with_clip(mut self, clip: Bounds) -> Self {
        self.clip = Some(clip);
        self
    }

    #[inline]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = (!transform.is_identity()).then_some(transform);
        self
    }
}

/// Index of a [`PrimitiveParams`] entry inside a [`PrimitiveArena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct PrimHandle(pub u32);

impl PrimHandle {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only table of shared primitive parameters.
///
/// Many instances (a run of glyphs, the four sides of a stroked rect) point at
/// one entry instead of each carrying its own transform and clip.
#[derive(Debug, Default, Clone)]
pub struct PrimitiveArena {
    entries: Vec<PrimitiveParams>,
}

impl PrimitiveArena {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all entries. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[PrimitiveParams] {
        &self.entries
    }

    /// Appends `params` unconditionally.
    pub fn push(&mut self, params: PrimitiveParams) -> Result<PrimHandle, PrimError> {
        let index = u32::try_from(self.entries.len()).map_err(|_| PrimError::ArenaFull)?;
        self.entries.push(params);
        Ok(PrimHandle(index))
    }

    /// Returns the handle of the last entry when it equals `params`, otherwise appends.
    ///
    /// Recorders emit runs of primitives under unchanged state, so comparing
    /// against the tail catches nearly all sharing without a hash map.
    pub fn intern(&mut self, params: PrimitiveParams) -> Result<PrimHandle, PrimError> {
        if let Some(last) = self.entries.last() {
            if *last == params {
                return Ok(PrimHandle((self.entries.len() - 1) as u32));
            }
        }
        self.push(params)
    }

    /// Bounds-checked lookup.
    pub fn get(&self, handle: PrimHandle) -> Result<&PrimitiveParams, PrimError> {
        self.entries.get(handle.index()).ok_or(PrimError::HandleOutOfRange {
            handle: handle.0,
            len: self.entries.len(),
        })
    }
}
