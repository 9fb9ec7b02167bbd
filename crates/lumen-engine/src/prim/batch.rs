use super::{
    InstanceRecord, Primitive, PrimitiveArena, PrimitiveKind, PrimitiveRecord, PrimError,
};

/// A frame's worth of primitives plus the arena their handles point into.
///
/// Built by the host (usually through `scene::PrimitiveList`), validated once
/// by [`PrimitiveBatch::encode`], then read-only while a draw references it.
#[derive(Debug, Default, Clone)]
pub struct PrimitiveBatch {
    pub arena: PrimitiveArena,
    pub primitives: Vec<Primitive>,
}

/// Validated GPU-ready buffers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EncodedBatch {
    pub instances: Vec<InstanceRecord>,
    pub records: Vec<PrimitiveRecord>,
}

impl EncodedBatch {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl PrimitiveBatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.primitives.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Checks the producer contract for every primitive:
    /// - the arena handle is in range
    /// - shadow radii and stroke widths are finite and non-negative
    pub fn validate(&self) -> Result<(), PrimError> {
        for (index, p) in self.primitives.iter().enumerate() {
            self.arena.get(p.params)?;
            match p.kind {
                PrimitiveKind::Shadow { radius, .. } if !(radius >= 0.0 && radius.is_finite()) => {
                    return Err(PrimError::InvalidBlurRadius { index, radius });
                }
                PrimitiveKind::Line { width, .. } if !(width >= 0.0 && width.is_finite()) => {
                    return Err(PrimError::InvalidStrokeWidth { index, width });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validates and packs the batch into GPU records.
    pub fn encode(&self) -> Result<EncodedBatch, PrimError> {
        self.validate()?;

        let instances: Vec<InstanceRecord> =
            self.primitives.iter().map(InstanceRecord::encode).collect();
        let records: Vec<PrimitiveRecord> =
            self.arena.entries().iter().map(PrimitiveRecord::encode).collect();

        log::trace!(
            "encoded primitive batch: {} instances, {} arena records",
            instances.len(),
            records.len()
        );

        Ok(EncodedBatch { instances, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Bounds, Vec2};
    use crate::paint::Color;
    use crate::prim::{PrimHandle, PrimitiveParams, ShadowMode};

    fn rect_prim(handle: u32) -> Primitive {
        Primitive::new(
            PrimitiveKind::Rect { bounds: Bounds::new(0.0, 0.0, 10.0, 10.0) },
            Color::WHITE,
            0.0,
            PrimHandle(handle),
        )
    }

    #[test]
    fn encode_rejects_dangling_handle() {
        let mut batch = PrimitiveBatch::new();
        batch.arena.push(PrimitiveParams::default()).unwrap();
        batch.primitives.push(rect_prim(0));
        batch.primitives.push(rect_prim(3));
        assert_eq!(
            batch.encode(),
            Err(PrimError::HandleOutOfRange { handle: 3, len: 1 })
        );
    }

    #[test]
    fn encode_rejects_negative_radius() {
        let mut batch = PrimitiveBatch::new();
        let h = batch.arena.push(PrimitiveParams::default()).unwrap();
        batch.primitives.push(Primitive::new(
            PrimitiveKind::Shadow {
                bounds: Bounds::new(0.0, 0.0, 10.0, 10.0),
                caster: Bounds::new(2.0, 2.0, 8.0, 8.0),
                radius: -1.0,
                mode: ShadowMode::Full,
            },
            Color::BLACK,
            0.0,
            h,
        ));
        assert!(matches!(batch.encode(), Err(PrimError::InvalidBlurRadius { index: 0, .. })));
    }

    #[test]
    fn encode_rejects_nan_width() {
        let mut batch = PrimitiveBatch::new();
        let h = batch.arena.push(PrimitiveParams::default()).unwrap();
        batch.primitives.push(Primitive::new(
            PrimitiveKind::Line { from: Vec2::zero(), to: Vec2::new(1.0, 0.0), width: f32::NAN },
            Color::BLACK,
            0.0,
            h,
        ));
        assert!(matches!(batch.encode(), Err(PrimError::InvalidStrokeWidth { .. })));
    }

    #[test]
    fn encode_packs_all_records() {
        let mut batch = PrimitiveBatch::new();
        batch.arena.push(PrimitiveParams::default()).unwrap();
        batch.arena.push(PrimitiveParams::translated(Vec2::new(5.0, 5.0))).unwrap();
        batch.primitives.push(rect_prim(0));
        batch.primitives.push(rect_prim(1));
        batch.primitives.push(rect_prim(1));

        let encoded = batch.encode().unwrap();
        assert_eq!(encoded.instances.len(), 3);
        assert_eq!(encoded.records.len(), 2);
        assert_eq!(encoded.instances[2].prim, 1);
        assert_eq!(encoded.records[1].translate, [5.0, 5.0]);
    }
}
