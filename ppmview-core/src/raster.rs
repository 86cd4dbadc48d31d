use crate::decoder::PixelStream;
use alloc::{boxed::Box, vec};

const BPP: usize = 4; // bytes per pixel
const CLEAR_COLOR: [u8; BPP] = [0xff, 0xff, 0xff, 0xff];

/// A surface that accepts colored points.
///
/// Drawing happens off screen until [`Canvas::present`] makes the accumulated
/// points visible at once.
pub trait Canvas {
    fn clear(&mut self);
    /// Sets the color of subsequent points, each channel in `0.0..=1.0`.
    fn set_color(&mut self, r: f32, g: f32, b: f32);
    fn draw_point(&mut self, x: u32, y: u32);
    fn present(&mut self);
}

/// Outcome of one decode pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassSummary {
    pub drawn: u32,
    pub expected: u32,
}

impl PassSummary {
    #[must_use]
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.drawn == self.expected
    }
}

/// Clears `canvas`, draws every pixel of `stream` and presents the result.
pub fn draw_pass<C: Canvas + ?Sized>(canvas: &mut C, stream: PixelStream<'_>) -> PassSummary {
    let max_color = stream.max_color();
    let expected = stream.pixel_count();

    canvas.clear();

    let mut drawn = 0;
    for pixel in stream {
        let [r, g, b] = pixel.color.normalized(max_color);
        canvas.set_color(r, g, b);
        canvas.draw_point(pixel.x, pixel.y);
        drawn += 1;
    }

    canvas.present();

    PassSummary { drawn, expected }
}

/// Double buffered RGBA8 raster.
///
/// Points are drawn into a back buffer; [`Canvas::present`] copies it to the
/// front buffer returned by [`RgbaBuf::pixel_data`].
#[derive(Clone, Debug)]
pub struct RgbaBuf {
    width: u32,
    height: u32,
    color: [u8; BPP],
    back: Box<[u8]>,
    front: Box<[u8]>,
    frames: u64,
}

impl RgbaBuf {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * BPP;
        let mut buf = Self {
            width,
            height,
            color: [0, 0, 0, 0xff],
            back: vec![0; size].into_boxed_slice(),
            front: vec![0; size].into_boxed_slice(),
            frames: 0,
        };
        buf.clear();
        buf.front.copy_from_slice(&buf.back);
        buf
    }

    #[must_use]
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The last presented frame.
    #[must_use]
    #[inline]
    pub fn pixel_data(&self) -> &[u8] {
        &self.front
    }

    /// Number of frames presented so far.
    #[must_use]
    #[inline]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Presented color at `(x, y)`, if inside the raster.
    #[must_use]
    pub fn px(&self, x: u32, y: u32) -> Option<[u8; BPP]> {
        let base = self.offset(x, y)?;
        let mut px = [0; BPP];
        px.copy_from_slice(&self.front[base..base + BPP]);
        Some(px)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * BPP)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Canvas for RgbaBuf {
    fn clear(&mut self) {
        for px in self.back.chunks_exact_mut(BPP) {
            px.copy_from_slice(&CLEAR_COLOR);
        }
    }

    fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.color = [quantize(r), quantize(g), quantize(b), 0xff];
    }

    fn draw_point(&mut self, x: u32, y: u32) {
        if let Some(base) = self.offset(x, y) {
            self.back[base..base + BPP].copy_from_slice(&self.color);
        }
    }

    fn present(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::TextBuffer;

    #[test]
    fn starts_white() {
        let buf = RgbaBuf::new(2, 2);
        assert_eq!(buf.pixel_data().len(), 16);
        assert!(buf.pixel_data().iter().all(|&b| b == 0xff));
        assert_eq!(buf.frames(), 0);
    }

    #[test]
    fn points_are_invisible_until_present() {
        let mut buf = RgbaBuf::new(2, 2);
        buf.set_color(1.0, 0.0, 0.0);
        buf.draw_point(1, 1);
        assert_eq!(buf.px(1, 1), Some([0xff; 4]));

        buf.present();
        assert_eq!(buf.px(1, 1), Some([0xff, 0, 0, 0xff]));
        assert_eq!(buf.frames(), 1);
    }

    #[test]
    fn out_of_bounds_points_are_ignored() {
        let mut buf = RgbaBuf::new(2, 2);
        buf.set_color(0.0, 0.0, 0.0);
        buf.draw_point(2, 0);
        buf.draw_point(0, 2);
        buf.present();
        assert!(buf.pixel_data().iter().all(|&b| b == 0xff));
        assert_eq!(buf.px(2, 0), None);
    }

    #[test]
    fn pass_clears_stale_content() {
        let mut buf = RgbaBuf::new(2, 1);
        buf.set_color(0.0, 0.0, 0.0);
        buf.draw_point(1, 0);

        let text = TextBuffer::from("0 0 255");
        let summary = draw_pass(&mut buf, PixelStream::new(text.cursor(), 2, 1, 255));

        assert_eq!(summary, PassSummary { drawn: 1, expected: 2 });
        assert!(!summary.is_complete());
        assert_eq!(buf.px(0, 0), Some([0, 0, 0xff, 0xff]));
        assert_eq!(buf.px(1, 0), Some([0xff; 4]));
    }

    #[test]
    fn quantizes_half_intensity() {
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(-1.0), 0);
        assert_eq!(quantize(2.0), 255);
    }
}
