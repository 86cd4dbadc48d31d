use crate::Error;
use ppmview_core::{Session, TextBuffer};
use std::path::Path;

/// Reads the whole file at `path` into a [`TextBuffer`].
fn read_text_buffer(path: &Path) -> Result<TextBuffer, Error> {
    let data = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = data.len(), "read input file");

    Ok(TextBuffer::new(data))
}

/// Reads `path` and parses its header.
pub fn open_session(path: &Path) -> Result<Session, Error> {
    let buffer = read_text_buffer(path)?;
    let session = Session::new(buffer)?;

    tracing::info!(header = %session.header(), "opened image");

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn opens_valid_image() {
        let file = write_temp("P3\n# made by hand\n32 40\n15\n1 2 3\n");
        let session = open_session(file.path()).unwrap();
        assert_eq!(session.header().width(), 32);
        assert_eq!(session.header().height(), 40);
        assert_eq!(session.header().max_color(), 15);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_session(&dir.path().join("missing.ppm")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("missing.ppm"));
    }

    #[test]
    fn binary_ppm_is_format_error() {
        let file = write_temp("P6\n32 32\n255\n");
        assert_eq!(open_session(file.path()).unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn nul_terminates_the_text() {
        let file = write_temp("P3\n32 32\0\n255\n");
        assert_eq!(open_session(file.path()).unwrap_err().kind(), ErrorKind::Header);
    }
}
