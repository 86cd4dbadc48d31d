//! # ppmview core
//!
//! Reading and drawing of ASCII PPM (`P3`) images.
//!
//! The text is scanned with value-type [`Cursor`]s over an immutable
//! [`TextBuffer`]. [`Header::parse`] reads and validates the four header
//! fields and returns the offset where pixel data begins; that offset is the
//! replay anchor a [`Session`] decodes from every time the image has to be
//! drawn again. Drawing goes through the [`Canvas`] trait, implemented here
//! by the software raster [`RgbaBuf`].
//!
//! ```rust
//! use ppmview_core::{RgbaBuf, Session, TextBuffer};
//!
//! let text = "P3\n32 32\n255\n".to_owned() + &"255 0 0 ".repeat(32 * 32);
//! let mut session = Session::new(TextBuffer::from(text.as_str())).unwrap();
//! let mut canvas = RgbaBuf::new(32, 32);
//!
//! let summary = session.render(&mut canvas).unwrap();
//! assert!(summary.is_complete());
//! assert_eq!(canvas.px(31, 31), Some([0xff, 0, 0, 0xff]));
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing`. Header fields and pass summaries are
//! emitted at `debug`, short pixel data at `warn` and every decoded pixel at
//! `trace` under the `pixel_stream` target.

extern crate alloc;

mod decoder;
mod error;
mod header;
mod raster;
mod scanner;
mod session;

pub use {
    decoder::{Pixel, PixelStream, Rgb, clamp_channel},
    error::{Error, ErrorKind, HeaderField},
    header::{Header, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH},
    raster::{Canvas, PassSummary, RgbaBuf, draw_pass},
    scanner::{Cursor, TextBuffer, Word},
    session::{Phase, Session},
};
