use crate::{
    Error,
    error::HeaderField,
    scanner::{Cursor, TextBuffer},
};
use core::fmt::Display;

pub const MIN_WIDTH: u32 = 32;
pub const MIN_HEIGHT: u32 = 32;
pub const MAX_WIDTH: u32 = 1920;
pub const MAX_HEIGHT: u32 = 1080;

/// Marker of the ASCII RGB variant, compared case-insensitively.
const ASCII_MAGIC: &[u8] = b"P3";
const MAGIC_CAPACITY: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    width: u32,
    height: u32,
    max_color: u32,
}

impl Display for Header {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "P3 {}x{} - max color {}",
            self.width, self.height, self.max_color
        )
    }
}

impl Header {
    /// Parses the header at the start of `buffer`.
    ///
    /// On success also returns the buffer offset right after the max color
    /// value, where pixel data begins.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the tag is not `P3`, a field is missing, the size
    /// is out of bounds or the max color value is zero.
    pub fn parse(buffer: &TextBuffer) -> Result<(Self, usize), Error> {
        let (header, cursor) = Self::read(buffer.cursor())?;
        Ok((header, cursor.position()))
    }

    fn read(cursor: Cursor<'_>) -> Result<(Self, Cursor<'_>), Error> {
        let (cursor, tag) = cursor.next_word::<MAGIC_CAPACITY>();
        if !tag.is_some_and(|tag| tag.eq_ignore_ascii_case(ASCII_MAGIC)) {
            return Err(Error::NotAscii);
        }

        let (cursor, width) = cursor.next_integer();
        let width = width.ok_or(Error::MissingField {
            field: HeaderField::Width,
        })?;
        let (cursor, height) = cursor.next_integer();
        let height = height.ok_or(Error::MissingField {
            field: HeaderField::Height,
        })?;

        if width < i64::from(MIN_WIDTH) || height < i64::from(MIN_HEIGHT) {
            return Err(Error::TooSmall { width, height });
        }
        if width > i64::from(MAX_WIDTH) || height > i64::from(MAX_HEIGHT) {
            return Err(Error::TooLarge { width, height });
        }

        let (cursor, max_color) = cursor.next_integer();
        let max_color = max_color.ok_or(Error::MissingField {
            field: HeaderField::MaxColor,
        })?;
        if max_color == 0 {
            return Err(Error::ZeroMaxColor);
        }

        // bounds checked above
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let header = Self {
            width: width as u32,
            height: height as u32,
            max_color: u32::try_from(max_color).unwrap_or(u32::MAX),
        };

        tracing::debug!(
            width = header.width,
            height = header.height,
            max_color = header.max_color,
            anchor = cursor.position(),
            "parsed header"
        );

        Ok((header, cursor))
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

    #[must_use]
    #[inline]
    pub const fn max_color(&self) -> u32 {
        self.max_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn parse(text: &str) -> Result<(Header, usize), Error> {
        Header::parse(&TextBuffer::from(text))
    }

    #[test]
    fn parses_plain_header() {
        let (header, anchor) = parse("P3\n640 480\n255\n1 2 3").unwrap();
        assert_eq!(header.width(), 640);
        assert_eq!(header.height(), 480);
        assert_eq!(header.max_color(), 255);
        assert_eq!(anchor, "P3\n640 480\n255".len());
    }

    #[test]
    fn lowercase_tag_and_comments() {
        let (header, _) = parse("p3\n#comment\n32 32\n#another\n100\n50 50 50\n").unwrap();
        assert_eq!(
            (header.width(), header.height(), header.max_color()),
            (32, 32, 100)
        );
    }

    #[test]
    fn rejects_other_formats() {
        for text in ["P6\n32 32\n255\n", "P33\n32 32\n255\n", "", " P3 32 32 255"] {
            let err = parse(text).unwrap_err();
            assert_eq!(err, Error::NotAscii, "{text:?}");
            assert_eq!(err.kind(), ErrorKind::Format);
        }
    }

    #[test]
    fn missing_dimensions() {
        assert_eq!(
            parse("P3\n").unwrap_err(),
            Error::MissingField {
                field: HeaderField::Width
            }
        );
        let err = parse("P3\n64").unwrap_err();
        assert_eq!(
            err,
            Error::MissingField {
                field: HeaderField::Height
            }
        );
        assert_eq!(err.kind(), ErrorKind::Header);
    }

    #[test]
    fn size_bounds() {
        assert_eq!(
            parse("P3 31 32 255").unwrap_err(),
            Error::TooSmall {
                width: 31,
                height: 32
            }
        );
        assert_eq!(
            parse("P3 32 31 255").unwrap_err().kind(),
            ErrorKind::Size
        );
        assert!(parse("P3 32 32 255").is_ok());
        assert!(parse("P3 1920 1080 255").is_ok());
        assert_eq!(
            parse("P3 1921 1080 255").unwrap_err(),
            Error::TooLarge {
                width: 1921,
                height: 1080
            }
        );
        assert_eq!(
            parse("P3 1920 1081 255").unwrap_err().kind(),
            ErrorKind::Size
        );
    }

    #[test]
    fn size_is_checked_before_max_color() {
        assert_eq!(parse("P3 10 10").unwrap_err().kind(), ErrorKind::Size);
    }

    #[test]
    fn max_color_is_required_and_non_zero() {
        assert_eq!(
            parse("P3 32 32 # no max color\n").unwrap_err(),
            Error::MissingField {
                field: HeaderField::MaxColor
            }
        );
        assert_eq!(parse("P3 32 32 0").unwrap_err(), Error::ZeroMaxColor);
    }

    #[test]
    fn huge_max_color_saturates() {
        let (header, _) = parse("P3 32 32 99999999999").unwrap();
        assert_eq!(header.max_color(), u32::MAX);
    }
}
