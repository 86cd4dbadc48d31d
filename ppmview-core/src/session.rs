use crate::{
    Error,
    decoder::PixelStream,
    header::Header,
    raster::{Canvas, PassSummary, draw_pass},
    scanner::TextBuffer,
};

/// Lifecycle of a displayed image.
///
/// `Loading` only exists while the header is being read: a failed header
/// never produces a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    HeaderParsed,
    Rendered,
    Terminated,
}

/// A loaded image: the text buffer, its header and the replay anchor.
#[derive(Debug)]
pub struct Session {
    anchor: usize,
    buffer: TextBuffer,
    header: Header,
    passes: u64,
    phase: Phase,
}

impl Session {
    /// # Errors
    ///
    /// Returns the header error if the buffer does not start with a valid
    /// P3 header.
    pub fn new(buffer: TextBuffer) -> Result<Self, Error> {
        tracing::debug!(bytes = buffer.len(), phase = ?Phase::Loading, "loading image");

        let (header, anchor) = Header::parse(&buffer)?;

        Ok(Self {
            anchor,
            buffer,
            header,
            passes: 0,
            phase: Phase::HeaderParsed,
        })
    }

    #[must_use]
    #[inline]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    #[inline]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Offset of the first pixel value in the text buffer.
    #[must_use]
    #[inline]
    pub const fn anchor(&self) -> usize {
        self.anchor
    }

    /// Number of completed decode passes.
    #[must_use]
    #[inline]
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// A fresh pixel stream starting at the replay anchor.
    #[must_use]
    pub fn pixels(&self) -> PixelStream<'_> {
        PixelStream::new(
            self.buffer.cursor_at(self.anchor),
            self.header.width(),
            self.header.height(),
            self.header.max_color(),
        )
    }

    /// Runs one decode pass from the replay anchor onto `canvas`.
    ///
    /// Returns `None` once the session is terminated.
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Option<PassSummary> {
        if self.phase == Phase::Terminated {
            return None;
        }

        let summary = draw_pass(canvas, self.pixels());
        self.passes += 1;
        self.phase = Phase::Rendered;

        if summary.is_complete() {
            tracing::debug!(pass = self.passes, drawn = summary.drawn, "pass complete");
        } else {
            tracing::warn!(
                pass = self.passes,
                drawn = summary.drawn,
                expected = summary.expected,
                "pixel data ended early"
            );
        }

        Some(summary)
    }

    pub fn terminate(&mut self) {
        self.phase = Phase::Terminated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RgbaBuf;
    use tracing_test::traced_test;

    const TINY: &str = "P3\n32 32\n255\n";

    #[test]
    fn phases_follow_the_lifecycle() {
        let mut session = Session::new(TextBuffer::from(TINY)).unwrap();
        assert_eq!(session.phase(), Phase::HeaderParsed);

        let mut canvas = RgbaBuf::new(32, 32);
        assert!(session.render(&mut canvas).is_some());
        assert_eq!(session.phase(), Phase::Rendered);
        assert!(session.render(&mut canvas).is_some());
        assert_eq!(session.phase(), Phase::Rendered);
        assert_eq!(session.passes(), 2);

        session.terminate();
        assert_eq!(session.phase(), Phase::Terminated);
        assert_eq!(session.render(&mut canvas), None);
        assert_eq!(canvas.frames(), 2);
    }

    #[test]
    fn anchor_points_past_max_color() {
        let session = Session::new(TextBuffer::from(TINY)).unwrap();
        assert_eq!(session.anchor(), TINY.len() - 1);
    }

    #[test]
    fn header_errors_are_returned() {
        let err = Session::new(TextBuffer::from("P6 32 32 255")).unwrap_err();
        assert_eq!(err, Error::NotAscii);
    }

    #[test]
    #[traced_test]
    fn short_pass_is_logged() {
        let mut session = Session::new(TextBuffer::from("P3 32 32 255 1 2 3 4 5")).unwrap();
        let summary = session.render(&mut RgbaBuf::new(32, 32)).unwrap();

        assert_eq!(summary.drawn, 1);
        assert_eq!(summary.expected, 1024);
        assert!(logs_contain("pixel data ended early"));
    }
}
