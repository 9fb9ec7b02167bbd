use crate::coords::{Affine, Bounds, Rect, Vec2};
use crate::paint::Color;
use crate::prim::{
    GlyphMode, Primitive, PrimitiveBatch, PrimitiveKind, PrimitiveParams, ShadowMode,
};

use super::SceneError;

/// Depth added by every [`PrimitiveList::save`].
pub const DEFAULT_DEPTH_STEP: f32 = 1e-4;

#[derive(Debug, Copy, Clone)]
struct SavedState {
    transform: Affine,
    clips_pushed: usize,
}

/// Records primitives for one frame.
///
/// Drawing calls capture the current transform, clip and depth. The transform
/// is split into a linear part and a translation; clips only follow the
/// translation and stay axis-aligned.
///
/// ```ignore
/// list.save();
/// list.transform(Affine::translate(Vec2::new(8.0, 8.0)));
/// list.push_clip(Rect::new(0.0, 0.0, 200.0, 100.0));
/// list.fill_rect(Rect::new(0.0, 0.0, 50.0, 20.0), Color::WHITE)?;
/// list.restore()?;
/// let batch = list.finish()?;
/// ```
#[derive(Debug)]
pub struct PrimitiveList {
    batch: PrimitiveBatch,

    transform: Affine,
    depth: f32,
    depth_step: f32,
    max_depth: f32,

    state_stack: Vec<SavedState>,
    /// Effective clips in translated space, each already intersected with its parent.
    clip_stack: Vec<Bounds>,
}

impl Default for PrimitiveList {
    fn default() -> Self {
        Self {
            batch: PrimitiveBatch::new(),
            transform: Affine::IDENTITY,
            depth: 0.0,
            depth_step: DEFAULT_DEPTH_STEP,
            max_depth: 0.0,
            state_stack: Vec::new(),
            clip_stack: Vec::new(),
        }
    }
}

impl PrimitiveList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth_step(depth_step: f32) -> Result<Self, SceneError> {
        if !depth_step.is_finite() || depth_step <= 0.0 {
            return Err(SceneError::InvalidDepthStep(depth_step));
        }
        Ok(Self { depth_step, ..Self::default() })
    }

    /// Clears recorded primitives and all state. Keeps allocated capacity.
    pub fn clear(&mut self) {
        self.batch.clear();
        self.transform = Affine::IDENTITY;
        self.depth = 0.0;
        self.max_depth = 0.0;
        self.state_stack.clear();
        self.clip_stack.clear();
    }

    #[inline]
    pub fn batch(&self) -> &PrimitiveBatch {
        &self.batch
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Value for `FrameUniforms::max_depth`. Never zero.
    #[inline]
    pub fn max_depth(&self) -> f32 {
        self.max_depth.max(self.depth_step)
    }

    #[inline]
    pub fn current_transform(&self) -> Affine {
        self.transform
    }

    #[inline]
    pub fn current_clip(&self) -> Option<Bounds> {
        self.clip_stack.last().copied()
    }

    pub fn save(&mut self) {
        self.depth += self.depth_step;
        self.state_stack.push(SavedState { transform: self.transform, clips_pushed: 0 });
    }

    /// Restores the transform and pops every clip pushed since the matching `save`.
    /// The depth keeps increasing so later siblings still draw on top.
    pub fn restore(&mut self) -> Result<(), SceneError> {
        let state = self.state_stack.pop().ok_or(SceneError::StackUnbalanced)?;
        self.transform = state.transform;
        let keep = self.clip_stack.len().saturating_sub(state.clips_pushed);
        self.clip_stack.truncate(keep);
        Ok(())
    }

    /// Post-multiplies: `affine` applies to points before the current transform.
    pub fn transform(&mut self, affine: Affine) {
        self.transform = self.transform * affine;
    }

    /// Begins a clip region, intersected with the parent. Disjoint clips
    /// produce a zero-area region and drawing under it records nothing.
    pub fn push_clip(&mut self, rect: Rect) {
        let rect = rect.to_bounds().translate(self.transform.translation()).to_rect();
        let effective = match self.clip_stack.last() {
            None => rect.normalized(),
            Some(parent) => {
                parent.to_rect().intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
            }
        };
        self.clip_stack.push(effective.to_bounds());
        if let Some(state) = self.state_stack.last_mut() {
            state.clips_pushed += 1;
        }
    }

    pub fn pop_clip(&mut self) -> Result<(), SceneError> {
        self.clip_stack.pop().ok_or(SceneError::ClipStackEmpty)?;
        if let Some(state) = self.state_stack.last_mut() {
            state.clips_pushed = state.clips_pushed.saturating_sub(1);
        }
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SceneError> {
        self.record(PrimitiveKind::Rect { bounds: rect.to_bounds() }, color)
    }

    pub fn stroke_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    ) -> Result<(), SceneError> {
        self.record(PrimitiveKind::Line { from, to, width }, color)
    }

    /// Strokes the outline centered on the rect edge. Horizontal sides cover
    /// the corners, vertical sides stop short of them so nothing is blended twice.
    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) -> Result<(), SceneError> {
        let b = rect.to_bounds();
        let half = width * 0.5;
        let (l, t, r, btm) = (b.left, b.top, b.right, b.bottom);

        self.stroke_line(Vec2::new(l - half, t), Vec2::new(r + half, t), width, color)?;
        self.stroke_line(Vec2::new(l - half, btm), Vec2::new(r + half, btm), width, color)?;
        if btm - t > width {
            self.stroke_line(Vec2::new(l, t + half), Vec2::new(l, btm - half), width, color)?;
            self.stroke_line(Vec2::new(r, t + half), Vec2::new(r, btm - half), width, color)?;
        }
        Ok(())
    }

    /// Soft shadow of `rect`. The quad is grown by three radii so the Gaussian
    /// tail fits; the caster stays `rect`.
    pub fn blurred_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Color,
        mode: ShadowMode,
    ) -> Result<(), SceneError> {
        let spread = 3.0 * radius.max(0.0);
        let kind = PrimitiveKind::Shadow {
            bounds: rect.inflate(spread, spread).to_bounds(),
            caster: rect.to_bounds(),
            radius,
            mode,
        };
        self.record(kind, color)
    }

    /// `uv` is the normalized source rect inside the bound texture.
    pub fn draw_image(&mut self, rect: Rect, uv: Bounds, tint: Color) -> Result<(), SceneError> {
        self.record(PrimitiveKind::Image { bounds: rect.to_bounds(), uv }, tint)
    }

    pub fn draw_glyph(
        &mut self,
        rect: Rect,
        uv: Bounds,
        color: Color,
        mode: GlyphMode,
    ) -> Result<(), SceneError> {
        self.record(PrimitiveKind::Glyph { bounds: rect.to_bounds(), uv, mode }, color)
    }

    /// Validates and hands out the batch, leaving the list empty.
    pub fn finish(&mut self) -> Result<PrimitiveBatch, SceneError> {
        if !self.state_stack.is_empty() {
            log::warn!("finishing with {} unrestored save(s)", self.state_stack.len());
        }
        self.batch.validate()?;
        let batch = std::mem::take(&mut self.batch);
        self.clear();
        Ok(batch)
    }

    fn params(&self) -> PrimitiveParams {
        let translate = self.transform.translation();
        let mut params =
            PrimitiveParams::translated(translate).with_transform(self.transform.linear());
        params.clip = self.clip_stack.last().map(|c| c.translate(-translate));
        params
    }

    fn record(&mut self, kind: PrimitiveKind, color: Color) -> Result<(), SceneError> {
        if let Some(clip) = self.current_clip() {
            if clip.width() <= 0.0 || clip.height() <= 0.0 {
                log::trace!("skipping primitive under empty clip");
                return Ok(());
            }
        }

        let handle = self.batch.arena.intern(self.params())?;
        self.batch.primitives.push(Primitive::new(kind, color, self.depth, handle));
        self.max_depth = self.max_depth.max(self.depth);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_bumps_depth_and_restore_keeps_it() {
        let mut list = PrimitiveList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap();
        list.save();
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap();
        list.restore().unwrap();
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap();

        let depths: Vec<f32> = list.batch().primitives.iter().map(|p| p.depth).collect();
        assert_eq!(depths, vec![0.0, DEFAULT_DEPTH_STEP, DEFAULT_DEPTH_STEP]);
        assert_eq!(list.max_depth(), DEFAULT_DEPTH_STEP);
    }

    #[test]
    fn unbalanced_restore_is_an_error() {
        let mut list = PrimitiveList::new();
        assert_eq!(list.restore(), Err(SceneError::StackUnbalanced));
        assert_eq!(list.pop_clip(), Err(SceneError::ClipStackEmpty));
    }

    #[test]
    fn invalid_depth_step_rejected() {
        assert!(PrimitiveList::with_depth_step(0.0).is_err());
        assert!(PrimitiveList::with_depth_step(f32::NAN).is_err());
        assert!(PrimitiveList::with_depth_step(0.5).is_ok());
    }

    #[test]
    fn restore_pops_transform_and_clips() {
        let mut list = PrimitiveList::new();
        list.save();
        list.transform(Affine::translate(Vec2::new(10.0, 20.0)));
        list.push_clip(Rect::new(0.0, 0.0, 5.0, 5.0));
        list.push_clip(Rect::new(1.0, 1.0, 5.0, 5.0));
        assert_eq!(list.current_clip(), Some(Bounds::new(11.0, 21.0, 15.0, 25.0)));
        list.restore().unwrap();

        assert_eq!(list.current_transform(), Affine::IDENTITY);
        assert_eq!(list.current_clip(), None);
    }

    #[test]
    fn params_split_transform_and_localize_clip() {
        let mut list = PrimitiveList::new();
        list.transform(Affine::translate(Vec2::new(10.0, 0.0)));
        list.push_clip(Rect::new(0.0, 0.0, 50.0, 50.0));
        list.transform(Affine::rotate(0.5));
        list.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE).unwrap();

        let batch = list.finish().unwrap();
        let params = batch.arena.get(batch.primitives[0].params).unwrap();
        assert_eq!(params.translate, Vec2::new(10.0, 0.0));
        assert_eq!(params.transform, Some(Affine::rotate(0.5)));
        assert_eq!(params.clip, Some(Bounds::new(0.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn shared_state_interns_one_entry() {
        let mut list = PrimitiveList::new();
        for i in 0..5 {
            let x = i as f32 * 10.0;
            let rect = Rect::new(x, 0.0, 8.0, 12.0);
            list.draw_glyph(rect, Bounds::UNIT, Color::BLACK, GlyphMode::Grayscale).unwrap();
        }
        assert_eq!(list.batch().arena.len(), 1);
        assert_eq!(list.batch().len(), 5);
    }

    #[test]
    fn disjoint_clip_records_nothing() {
        let mut list = PrimitiveList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        assert_eq!(list.current_clip(), Some(Bounds::ZERO));
        list.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0), Color::WHITE).unwrap();
        assert!(list.batch().is_empty());

        list.pop_clip().unwrap();
        list.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0), Color::WHITE).unwrap();
        assert_eq!(list.batch().len(), 1);
    }

    #[test]
    fn blurred_rect_inflates_by_three_radii() {
        let mut list = PrimitiveList::new();
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        list.blurred_rect(rect, 2.0, Color::BLACK, ShadowMode::ExcludeCaster).unwrap();
        match list.batch().primitives[0].kind {
            PrimitiveKind::Shadow { bounds, caster, radius, mode } => {
                assert_eq!(bounds, Bounds::new(4.0, 4.0, 36.0, 36.0));
                assert_eq!(caster, Bounds::new(10.0, 10.0, 30.0, 30.0));
                assert_eq!(radius, 2.0);
                assert_eq!(mode, ShadowMode::ExcludeCaster);
            }
            ref other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn stroke_rect_emits_four_lines() {
        let mut list = PrimitiveList::new();
        list.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, Color::BLACK).unwrap();
        assert_eq!(list.batch().len(), 4);
        assert!(list
            .batch()
            .primitives
            .iter()
            .all(|p| matches!(p.kind, PrimitiveKind::Line { width, .. } if width == 2.0)));
    }

    #[test]
    fn finish_rejects_negative_radius() {
        let mut list = PrimitiveList::new();
        list.blurred_rect(Rect::new(0.0, 0.0, 1.0, 1.0), -1.0, Color::BLACK, ShadowMode::Full)
            .unwrap();
        assert!(matches!(
            list.finish(),
            Err(SceneError::Prim(crate::prim::PrimError::InvalidBlurRadius { index: 0, .. }))
        ));
    }
}
