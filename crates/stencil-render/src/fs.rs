//! File system access used by the renderer.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// The I/O boundary of a render.
///
/// Readers and writers are boxed so fakes can hand out in-memory streams.
/// Both are closed when dropped.
pub trait FileSystem {
    /// Open an existing file for reading.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>>;

    /// Create a file for writing, truncating it if it exists.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;
}

/// The real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(path)?))
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

/// Read everything from `reader` as UTF-8.
pub(crate) fn read_all(mut reader: impl Read) -> io::Result<String> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old content that is longer").unwrap();

        {
            let mut out = OsFileSystem.create(&path).unwrap();
            out.write_all(b"new").unwrap();
            out.flush().unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let err = OsFileSystem.open(&dir.path().join("missing")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_all_rejects_invalid_utf8() {
        let err = read_all(&[0xff, 0xfe, 0x00][..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
