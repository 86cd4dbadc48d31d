use std::path::PathBuf;

/// What went wrong, at the granularity the user cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Io,
    Subsystem,
    Format,
    Header,
    Size,
}

#[derive(Debug)]
pub enum Error {
    Image(ppmview_core::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Subsystem {
        context: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    Usage(clap::Error),
}

impl Error {
    pub fn subsystem(
        context: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Subsystem {
            context,
            source: source.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::Io { .. } => ErrorKind::Io,
            Self::Subsystem { .. } => ErrorKind::Subsystem,
            Self::Image(err) => match err.kind() {
                ppmview_core::ErrorKind::Format => ErrorKind::Format,
                ppmview_core::ErrorKind::Header => ErrorKind::Header,
                ppmview_core::ErrorKind::Size => ErrorKind::Size,
            },
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "unable to open input file {}: {source}", path.display())
            }
            Self::Subsystem { context, source } => write!(f, "{context}: {source}"),
            Self::Usage(err) => write!(f, "{err}"),
        }
    }
}

impl From<ppmview_core::Error> for Error {
    fn from(err: ppmview_core::Error) -> Self {
        Self::Image(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_errors_keep_their_kind() {
        let err = Error::from(ppmview_core::Error::TooSmall {
            width: 31,
            height: 32,
        });
        assert_eq!(err.kind(), ErrorKind::Size);
        assert!(err.to_string().starts_with("image too small"));

        assert_eq!(
            Error::from(ppmview_core::Error::NotAscii).kind(),
            ErrorKind::Format
        );
        assert_eq!(
            Error::from(ppmview_core::Error::ZeroMaxColor).kind(),
            ErrorKind::Header
        );
    }

    #[test]
    fn subsystem_error_mentions_context() {
        let err = Error::subsystem("could not create window", "no display");
        assert_eq!(err.kind(), ErrorKind::Subsystem);
        assert_eq!(err.to_string(), "could not create window: no display");
    }
}
