use crate::Error;
use clap::{Parser, error::ErrorKind};
use std::path::{Path, PathBuf};

const PPMVIEW_BIN: &str = "ppmview";
pub const PPMVIEW_STYLIZED: &str = "PPM Viewer";
const ABOUT: &str = "Displays an ASCII PPM (P3) image in a window.";
const AFTER_HELP: &str = "The window is redrawn from the file contents whenever it becomes
visible again. Close the window to quit.

Set RUST_LOG (e.g. RUST_LOG=debug) to see diagnostic output on stderr.";

#[derive(clap::Parser, Debug)]
#[command(name = PPMVIEW_BIN, version, about = ABOUT, after_help = AFTER_HELP)]
pub struct Cli {
    #[arg(
        help = "ASCII PPM image to display.",
        long_help = "ASCII PPM image to display. Must start with the P3 tag, \
           followed by width (32..=1920), height (32..=1080), the max color value \
           and the RGB triplets. Comments start with '#' and run to the end of the line."
    )]
    file: PathBuf,
}

impl Cli {
    /// Parses the process arguments.
    ///
    /// `--help` and `--version` print and exit with status 0; every other
    /// problem is returned as [`Error::Usage`].
    pub fn from_args() -> Result<Self, Error> {
        Self::try_from_args(std::env::args_os())
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).or_else(|err| match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => Err(Error::Usage(err)),
        })
    }

    #[must_use]
    #[inline]
    pub fn file(&self) -> &Path {
        &self.file
    }
}
