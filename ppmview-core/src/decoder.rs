use crate::scanner::Cursor;

/// A color triplet already clamped to `0..=max_color`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u32,
    pub g: u32,
    pub b: u32,
}

impl Rgb {
    #[must_use]
    pub fn clamped(r: i64, g: i64, b: i64, max_color: u32) -> Self {
        Self {
            r: clamp_channel(r, max_color),
            g: clamp_channel(g, max_color),
            b: clamp_channel(b, max_color),
        }
    }

    /// Channel intensities in `0.0..=1.0`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn normalized(self, max_color: u32) -> [f32; 3] {
        let max = max_color.max(1) as f32;
        [
            (self.r as f32 / max).min(1.0),
            (self.g as f32 / max).min(1.0),
            (self.b as f32 / max).min(1.0),
        ]
    }
}

#[must_use]
#[inline]
pub fn clamp_channel(value: i64, max_color: u32) -> u32 {
    // fits in u32 after clamping
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = value.clamp(0, i64::from(max_color)) as u32;
    channel
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub index: u32,
    pub x: u32,
    pub y: u32,
    pub color: Rgb,
}

/// Decodes `(r, g, b)` triplets starting at a cursor.
///
/// Yields at most `width * height` pixels and ends early, without error, at
/// the first triplet that cannot be read completely.
#[derive(Clone, Debug)]
pub struct PixelStream<'a> {
    cursor: Cursor<'a>,
    width: u32,
    pixel_count: u32,
    max_color: u32,
    index: u32,
    exhausted: bool,
}

impl<'a> PixelStream<'a> {
    #[must_use]
    pub fn new(cursor: Cursor<'a>, width: u32, height: u32, max_color: u32) -> Self {
        Self {
            cursor,
            width,
            pixel_count: width.saturating_mul(height),
            max_color,
            index: 0,
            exhausted: false,
        }
    }

    /// `true` once a short read ended the stream before the pixel count.
    #[must_use]
    #[inline]
    pub const fn is_short(&self) -> bool {
        self.exhausted
    }

    #[must_use]
    #[inline]
    pub const fn pixel_count(&self) -> u32 {
        self.pixel_count
    }

    #[must_use]
    #[inline]
    pub const fn max_color(&self) -> u32 {
        self.max_color
    }

    #[must_use]
    #[inline]
    pub const fn decoded(&self) -> u32 {
        self.index
    }

    fn read_triplet(&mut self) -> Option<(i64, i64, i64)> {
        let (cursor, r) = self.cursor.next_integer();
        let (cursor, g) = cursor.next_integer();
        let (cursor, b) = cursor.next_integer();
        self.cursor = cursor;
        Some((r?, g?, b?))
    }
}

impl Iterator for PixelStream<'_> {
    type Item = Pixel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || self.index >= self.pixel_count {
            return None;
        }

        let Some((r, g, b)) = self.read_triplet() else {
            self.exhausted = true;
            return None;
        };

        let index = self.index;
        self.index += 1;

        let pixel = Pixel {
            index,
            x: index % self.width,
            y: index / self.width,
            color: Rgb::clamped(r, g, b, self.max_color),
        };

        tracing::trace!(
            target: "pixel_stream",
            index,
            x = pixel.x,
            y = pixel.y,
            r = pixel.color.r,
            g = pixel.color.g,
            b = pixel.color.b
        );

        Some(pixel)
    }
}
