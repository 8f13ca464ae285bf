// Byte source abstraction for tag parsing

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

/// Random-access byte source.
///
/// Tag scanning is implemented once against this trait; in-memory buffers
/// and files adapt to it at the edges.
pub trait ByteSource {
    /// Total number of bytes available
    fn len(&mut self) -> std::io::Result<u64>;

    /// Read exactly `buf.len()` bytes starting at `offset`
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<()>;
}

impl ByteSource for &[u8] {
    fn len(&mut self) -> std::io::Result<u64> {
        Ok(<[u8]>::len(self) as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<()> {
        let start = usize::try_from(offset).map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "offset out of range")
        })?;
        let end = start
            .checked_add(buf.len())
            .filter(|&end| end <= <[u8]>::len(self))
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "read past end of buffer")
            })?;
        buf.copy_from_slice(&self[start..end]);
        Ok(())
    }
}

impl ByteSource for File {
    fn len(&mut self) -> std::io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_read_at() {
        let mut source: &[u8] = &[1, 2, 3, 4, 5];
        assert_eq!(ByteSource::len(&mut source).unwrap(), 5);

        let mut buf = [0u8; 2];
        source.read_at(2, &mut buf).unwrap();
        assert_eq!(buf, [3, 4]);
    }

    #[test]
    fn test_slice_read_past_end() {
        let mut source: &[u8] = &[1, 2, 3];
        let mut buf = [0u8; 2];
        assert!(source.read_at(2, &mut buf).is_err());
        assert!(source.read_at(10, &mut buf).is_err());
    }
}
