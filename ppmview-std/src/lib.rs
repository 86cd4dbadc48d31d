mod cli;
mod error;
mod image;
pub mod logging;

pub use cli::{Cli, PPMVIEW_STYLIZED};
pub use error::{Error, ErrorKind};
pub use image::open_session;
pub use ppmview_core::{Canvas, RgbaBuf, Session};
