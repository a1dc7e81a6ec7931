use super::ScreenShape;
use crate::display::PixelBuffer;

/// How overlapping plates combine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Mean of the covering colors, like mixing paint
    Average,
    /// Sum of the covering colors, like mixing light. Overflowing pixels are
    /// scaled down uniformly so the brightest channel lands on 255.
    Additive,
}

/// Per-pixel accumulators for one frame
struct Accumulator {
    rgb_sum: Vec<[f32; 3]>,
    count: Vec<u32>,
}

impl Accumulator {
    fn new(len: usize) -> Self {
        Self {
            rgb_sum: vec![[0.0; 3]; len],
            count: vec![0; len],
        }
    }

    /// Add every covered (alpha > 0) pixel of a rasterized shape
    fn add_coverage(&mut self, coverage: &PixelBuffer) -> usize {
        let mut covered = 0;
        for (i, (r, g, b, a)) in coverage.rgba_iter().enumerate() {
            if a == 0 {
                continue;
            }
            let sum = &mut self.rgb_sum[i];
            sum[0] += r as f32;
            sum[1] += g as f32;
            sum[2] += b as f32;
            self.count[i] += 1;
            covered += 1;
        }
        covered
    }

    /// Uncovered pixels divide by one and come out black
    fn average(&self, i: usize) -> (u8, u8, u8) {
        let n = self.count[i].max(1) as f32;
        let [r, g, b] = self.rgb_sum[i];
        (to_channel(r / n), to_channel(g / n), to_channel(b / n))
    }

    fn additive(&self, i: usize) -> (u8, u8, u8) {
        let [r, g, b] = self.rgb_sum[i];
        let max = r.max(g).max(b);
        if max <= 255.0 {
            return (to_channel(r), to_channel(g), to_channel(b));
        }
        // c * 255 / max keeps the brightest channel at exactly 255
        let scale = |c: f32| (c * 255.0 / max).round();
        (
            to_channel(scale(r)),
            to_channel(scale(g)),
            to_channel(scale(b)),
        )
    }
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Rasterize each shape on its own and combine them into an opaque
/// `width` x `height` buffer.
///
/// The result has no transparency: pixels no shape covers are black.
pub fn composite(
    shapes: &[ScreenShape],
    width: u32,
    height: u32,
    mode: CompositeMode,
) -> PixelBuffer {
    let mut coverage = PixelBuffer::with_size(width, height);
    let mut acc = Accumulator::new(coverage.len());
    let mut covered = 0;

    for shape in shapes {
        coverage.clear_rgba(0, 0, 0, 0);
        let c = shape.color;
        coverage.fill_polygon_rgba(&shape.vertices(), c.r, c.g, c.b, c.a);
        covered += acc.add_coverage(&coverage);
    }

    let mut out = PixelBuffer::with_size(width, height);
    match mode {
        CompositeMode::Average => out.fill_opaque_with(|i| acc.average(i)),
        CompositeMode::Additive => out.fill_opaque_with(|i| acc.additive(i)),
    }

    tracing::trace!(?mode, shapes = shapes.len(), covered, "composited frame");
    out
}
