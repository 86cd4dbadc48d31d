use crate::header::{MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use core::{error, fmt};
use fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderField {
    Width,
    Height,
    MaxColor,
}

impl Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
            Self::MaxColor => write!(f, "max color value"),
        }
    }
}

/// Coarse classification of header failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Header,
    Size,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingField { field: HeaderField },
    NotAscii,
    TooLarge { width: i64, height: i64 },
    TooSmall { width: i64, height: i64 },
    ZeroMaxColor,
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAscii => ErrorKind::Format,
            Self::MissingField { .. } | Self::ZeroMaxColor => ErrorKind::Header,
            Self::TooLarge { .. } | Self::TooSmall { .. } => ErrorKind::Size,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAscii => write!(f, "format is not ascii (P3), cannot read"),
            Self::MissingField {
                field: field @ (HeaderField::Width | HeaderField::Height),
            } => write!(f, "invalid input, could not read image size ({field})"),
            Self::MissingField {
                field: HeaderField::MaxColor,
            } => write!(f, "could not read max color value"),
            Self::TooSmall { width, height } => write!(
                f,
                "image too small: {width}x{height}, min width/height = ({MIN_WIDTH},{MIN_HEIGHT})"
            ),
            Self::TooLarge { width, height } => write!(
                f,
                "image too large: {width}x{height}, max width/height = ({MAX_WIDTH},{MAX_HEIGHT})"
            ),
            Self::ZeroMaxColor => write!(f, "max color value must be at least 1"),
        }
    }
}

impl error::Error for Error {}
