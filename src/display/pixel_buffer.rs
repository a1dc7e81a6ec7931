use super::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

// ============================================================================
// Utility Functions
// ============================================================================

/// Alpha blend a single color channel
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], r: u8, g: u8, b: u8) {
    dest[0] = 255; // A
    dest[1] = b; // B
    dest[2] = g; // G
    dest[3] = r; // R
}

/// Write ABGR pixel with custom alpha (for coverage buffers)
#[inline]
fn write_pixel_rgba(dest: &mut [u8], r: u8, g: u8, b: u8, a: u8) {
    dest[0] = a; // A
    dest[1] = b; // B
    dest[2] = g; // G
    dest[3] = r; // R
}

/// Walk the horizontal spans covered by a polygon (even-odd rule).
///
/// A pixel is inside a span when its center lies in `[left, right)`, so
/// zero-area polygons and zero-width spans produce nothing. Calls
/// `span(y, x_start, x_end)` with an inclusive pixel range.
fn for_each_polygon_span(
    vertices: &[(f32, f32)],
    height: u32,
    mut span: impl FnMut(i32, i32, i32),
) {
    if vertices.len() < 3 {
        return;
    }

    // Find bounding box
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for (_, y) in vertices {
        min_y = min_y.min(*y);
        max_y = max_y.max(*y);
    }
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }

    let min_y = (min_y.floor() as i32).max(0);
    let max_y = (max_y.ceil() as i32).min(height as i32 - 1);

    // Preallocate intersection buffer (reused per scanline)
    let mut intersections: Vec<f32> = Vec::with_capacity(vertices.len());
    let n = vertices.len();

    for y in min_y..=max_y {
        intersections.clear();
        let yf = y as f32 + 0.5;

        for i in 0..n {
            let (x1, y1) = vertices[i];
            let (x2, y2) = vertices[(i + 1) % n];

            // Half-open crossing test, so y1 != y2 below
            if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                intersections.push(x1 + (yf - y1) / (y2 - y1) * (x2 - x1));
            }
        }

        intersections.sort_unstable_by(f32::total_cmp);
        for pair in intersections.chunks_exact(2) {
            let start = (pair[0] - 0.5).ceil() as i32;
            let end = (pair[1] - 0.5).ceil() as i32 - 1;
            if start <= end {
                span(y, start, end);
            }
        }
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering.
///
/// Both the flat board and the composited isometric views render into one of
/// these before it is uploaded to the SDL texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer with default resolution (800x600)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a new, fully transparent pixel buffer with custom resolution
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (width * height)
    #[inline]
    pub fn len(&self) -> usize {
        (self.width * self.height) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Clear to a solid color
    /// Optimized: uses u32 fill for maximum speed
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        self.clear_rgba(r, g, b, 255);
    }

    /// Clear to a solid color with custom alpha (for coverage buffers)
    pub fn clear_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        let pixel = u32::from_ne_bytes([a, b, g, r]);

        // Safety: pixels.len() is always divisible by 4 (width * height * 4).
        // We use write_unaligned to avoid assuming alignment of Vec<u8>.
        let ptr = self.pixels.as_mut_ptr() as *mut u32;
        let len = self.pixels.len() / 4;
        for i in 0..len {
            // Safety: i < len ensures we stay within bounds
            unsafe {
                ptr.add(i).write_unaligned(pixel);
            }
        }
    }

    /// Set a single opaque pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
        }
    }

    /// Set a single pixel with custom alpha (bounds checked)
    #[inline]
    pub fn set_pixel_rgba(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel_rgba(&mut self.pixels[idx..idx + 4], r, g, b, a);
        }
    }

    /// Set pixel with alpha blending
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            let alpha = a as u16;
            self.pixels[idx] = 255; // A - always opaque
            self.pixels[idx + 1] = blend_channel(b, self.pixels[idx + 1], alpha);
            self.pixels[idx + 2] = blend_channel(g, self.pixels[idx + 2], alpha);
            self.pixels[idx + 3] = blend_channel(r, self.pixels[idx + 3], alpha);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8)> {
        self.get_pixel_rgba(x, y).map(|(r, g, b, _)| (r, g, b))
    }

    /// Read all 4 channels of a pixel (bounds checked)
    /// Returns (r, g, b, a) or None if out of bounds
    #[inline]
    pub fn get_pixel_rgba(&self, x: i32, y: i32) -> Option<(u8, u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((
                self.pixels[idx + 3], // R
                self.pixels[idx + 2], // G
                self.pixels[idx + 1], // B
                self.pixels[idx],     // A
            ))
        } else {
            None
        }
    }

    /// Iterate all pixels in row-major order as (r, g, b, a)
    pub fn rgba_iter(&self) -> impl Iterator<Item = (u8, u8, u8, u8)> + '_ {
        self.pixels
            .chunks_exact(4)
            .map(|p| (p[3], p[2], p[1], p[0]))
    }

    /// Overwrite every pixel with an opaque color computed from its row-major index
    pub fn fill_opaque_with(&mut self, mut color_at: impl FnMut(usize) -> (u8, u8, u8)) {
        for (i, chunk) in self.pixels.chunks_exact_mut(4).enumerate() {
            let (r, g, b) = color_at(i);
            write_pixel(chunk, r, g, b);
        }
    }

    // ========================================================================
    // Spans
    // ========================================================================

    /// Clip an inclusive span to the buffer, returning the start byte index and pixel count
    #[inline]
    fn clip_span(&self, x1: i32, x2: i32, y: i32) -> Option<(usize, usize)> {
        if y < 0 || y >= self.height as i32 {
            return None;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return None;
        }
        Some((
            self.pixel_index(start as u32, y as u32),
            (end - start + 1) as usize,
        ))
    }

    /// Draw an opaque horizontal line
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8) {
        let Some((mut idx, count)) = self.clip_span(x1, x2, y) else {
            return;
        };
        for _ in 0..count {
            write_pixel(&mut self.pixels[idx..idx + 4], r, g, b);
            idx += 4;
        }
    }

    /// Draw a horizontal line that stores the alpha instead of blending with it
    pub fn hline_rgba(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        let Some((mut idx, count)) = self.clip_span(x1, x2, y) else {
            return;
        };
        for _ in 0..count {
            write_pixel_rgba(&mut self.pixels[idx..idx + 4], r, g, b, a);
            idx += 4;
        }
    }

    /// Draw a horizontal line with alpha blending
    pub fn hline_blend(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        let Some((mut idx, count)) = self.clip_span(x1, x2, y) else {
            return;
        };
        let alpha = a as u16;
        for _ in 0..count {
            self.pixels[idx] = 255;
            self.pixels[idx + 1] = blend_channel(b, self.pixels[idx + 1], alpha);
            self.pixels[idx + 2] = blend_channel(g, self.pixels[idx + 2], alpha);
            self.pixels[idx + 3] = blend_channel(r, self.pixels[idx + 3], alpha);
            idx += 4;
        }
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Draw an opaque line with Bresenham's algorithm.
    ///
    /// Off-buffer pixels are skipped one by one, which is fine for the short
    /// grid and outline strokes drawn here.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, r: u8, g: u8, b: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, r, g, b);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    // ========================================================================
    // Filled Shapes
    // ========================================================================

    /// Fill a rectangle
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, r: u8, g: u8, b: u8) {
        if w == 0 {
            return;
        }
        for row in 0..h as i32 {
            self.hline(x, x + w as i32 - 1, y + row, r, g, b);
        }
    }

    /// Fill a circle with alpha blending using midpoint spans
    pub fn fill_circle_blend(&mut self, cx: i32, cy: i32, radius: i32, r: u8, g: u8, b: u8, a: u8) {
        if radius <= 0 {
            if radius == 0 {
                self.blend_pixel(cx, cy, r, g, b, a);
            }
            return;
        }

        let mut xi = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while xi >= y {
            // Rows cy +- y are visited once each
            self.hline_blend(cx - xi, cx + xi, cy + y, r, g, b, a);
            if y != 0 {
                self.hline_blend(cx - xi, cx + xi, cy - y, r, g, b, a);
            }
            // Rows cy +- xi are revisited while xi holds; emit them once, at
            // their widest, just before xi steps down
            if err >= 0 && xi != y {
                self.hline_blend(cx - y, cx + y, cy + xi, r, g, b, a);
                self.hline_blend(cx - y, cx + y, cy - xi, r, g, b, a);
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                xi -= 1;
                err += 2 * (y - xi) + 1;
            }
        }
    }

    /// Fill a polygon, storing the color and alpha verbatim.
    ///
    /// Used on transparent coverage buffers: afterwards any pixel with
    /// alpha > 0 was covered by the polygon.
    pub fn fill_polygon_rgba(&mut self, vertices: &[(f32, f32)], r: u8, g: u8, b: u8, a: u8) {
        let height = self.height;
        for_each_polygon_span(vertices, height, |y, x1, x2| {
            self.hline_rgba(x1, x2, y, r, g, b, a);
        });
    }

    /// Fill a polygon with alpha blending
    pub fn fill_polygon_blend(&mut self, vertices: &[(f32, f32)], r: u8, g: u8, b: u8, a: u8) {
        let height = self.height;
        for_each_polygon_span(vertices, height, |y, x1, x2| {
            self.hline_blend(x1, x2, y, r, g, b, a);
        });
    }

    // ========================================================================
    // Buffer Operations
    // ========================================================================

    /// Copy `src` onto this buffer with its top-left corner at (x, y).
    /// Rows and columns falling outside are dropped.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        let x_start = x.max(0);
        let x_end = (x + src.width as i32).min(self.width as i32);
        if x_start >= x_end {
            return;
        }
        let row_bytes = ((x_end - x_start) * 4) as usize;
        let src_x = (x_start - x) as u32;

        for sy in 0..src.height as i32 {
            let dy = y + sy;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            let from = src.pixel_index(src_x, sy as u32);
            let to = self.pixel_index(x_start as u32, dy as u32);
            self.pixels[to..to + row_bytes].copy_from_slice(&src.pixels[from..from + row_bytes]);
        }
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(buffer: &PixelBuffer) -> usize {
        buffer.rgba_iter().filter(|p| p.3 > 0).count()
    }

    #[test]
    fn test_new_buffer_is_transparent() {
        let buffer = PixelBuffer::with_size(4, 3);
        assert_eq!(buffer.len(), 12);
        assert_eq!(covered(&buffer), 0);
    }

    #[test]
    fn test_pixel_roundtrip_keeps_channel_order() {
        let mut buffer = PixelBuffer::with_size(4, 4);
        buffer.set_pixel_rgba(1, 2, 10, 20, 30, 40);
        assert_eq!(buffer.get_pixel_rgba(1, 2), Some((10, 20, 30, 40)));
        assert_eq!(buffer.get_pixel(1, 2), Some((10, 20, 30)));
        assert_eq!(buffer.get_pixel(4, 0), None);
        assert_eq!(buffer.get_pixel(-1, 0), None);
    }

    #[test]
    fn test_fill_polygon_rgba_covers_pixel_centers() {
        let mut buffer = PixelBuffer::with_size(10, 10);
        let square = [(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)];
        buffer.fill_polygon_rgba(&square, 255, 0, 0, 128);

        assert_eq!(covered(&buffer), 16);
        assert_eq!(buffer.get_pixel_rgba(2, 2), Some((255, 0, 0, 128)));
        assert_eq!(buffer.get_pixel_rgba(5, 5), Some((255, 0, 0, 128)));
        assert_eq!(buffer.get_pixel_rgba(6, 5), Some((0, 0, 0, 0)));
        assert_eq!(buffer.get_pixel_rgba(1, 2), Some((0, 0, 0, 0)));
    }

    #[test]
    fn test_degenerate_polygons_are_noops() {
        let mut buffer = PixelBuffer::with_size(10, 10);
        buffer.fill_polygon_rgba(&[(5.0, 5.0); 60], 255, 255, 255, 255);
        buffer.fill_polygon_rgba(&[(3.0, 1.0), (3.0, 8.0), (3.0, 4.0)], 255, 255, 255, 255);
        buffer.fill_polygon_rgba(&[(1.0, 4.0), (8.0, 4.0), (5.0, 4.0)], 255, 255, 255, 255);
        buffer.fill_polygon_rgba(&[(1.0, 1.0), (8.0, 8.0)], 255, 255, 255, 255);
        assert_eq!(covered(&buffer), 0);
    }

    #[test]
    fn test_polygon_clipped_to_buffer() {
        let mut buffer = PixelBuffer::with_size(4, 4);
        let huge = [(-100.0, -100.0), (100.0, -100.0), (100.0, 100.0), (-100.0, 100.0)];
        buffer.fill_polygon_rgba(&huge, 1, 2, 3, 4);
        assert_eq!(covered(&buffer), 16);
    }

    #[test]
    fn test_blend_pixel_is_opaque_mix() {
        let mut buffer = PixelBuffer::with_size(2, 2);
        buffer.clear(0, 0, 0);
        buffer.blend_pixel(0, 0, 255, 255, 255, 255);
        assert_eq!(buffer.get_pixel_rgba(0, 0), Some((255, 255, 255, 255)));
        buffer.blend_pixel(1, 1, 200, 100, 0, 0);
        assert_eq!(buffer.get_pixel_rgba(1, 1), Some((0, 0, 0, 255)));
    }

    #[test]
    fn test_translucent_circle_blends_each_pixel_once() {
        let mut buffer = PixelBuffer::with_size(200, 200);
        buffer.clear(255, 255, 255);
        buffer.fill_circle_blend(100, 100, 30, 0, 0, 255, 128);

        let mut tints: Vec<(u8, u8, u8)> = (0..200)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .filter_map(|(x, y)| buffer.get_pixel(x, y))
            .filter(|&p| p != (255, 255, 255))
            .collect();
        tints.sort_unstable();
        tints.dedup();
        assert_eq!(tints, [(127, 127, 255)]);

        // Rows at the top and bottom of the circle are tinted too
        assert_eq!(buffer.get_pixel(100, 130), Some((127, 127, 255)));
        assert_eq!(buffer.get_pixel(100, 70), Some((127, 127, 255)));
        assert_eq!(buffer.get_pixel(100, 131), Some((255, 255, 255)));
    }

    #[test]
    fn test_line_is_clipped() {
        let mut buffer = PixelBuffer::with_size(8, 8);
        buffer.line(-10, 3, 20, 3, 9, 9, 9);
        for x in 0..8 {
            assert_eq!(buffer.get_pixel(x, 3), Some((9, 9, 9)));
        }
        buffer.line(-10, -10, -5, -5, 1, 1, 1);
    }

    #[test]
    fn test_blit_offsets_and_clips() {
        let mut src = PixelBuffer::with_size(2, 2);
        src.clear(50, 60, 70);
        let mut dst = PixelBuffer::with_size(3, 3);
        dst.blit(&src, 2, 2);
        assert_eq!(dst.get_pixel(2, 2), Some((50, 60, 70)));
        assert_eq!(dst.get_pixel(1, 1), Some((0, 0, 0)));

        let mut src = PixelBuffer::with_size(3, 1);
        src.set_pixel(2, 0, 1, 2, 3);
        dst.blit(&src, -2, 0);
        assert_eq!(dst.get_pixel(0, 0), Some((1, 2, 3)));
        dst.blit(&src, 5, 0);
        dst.blit(&src, -3, 0);
    }
}
