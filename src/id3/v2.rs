// ID3v2 tag header parsing and frame scanning

use serde::Serialize;

use crate::id3::frames::frame_ids;
use crate::utils::io::ByteSource;

/// ID3v2 header structure
#[derive(Debug)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub flags: u8,
    pub size: u32,
}

impl Id3v2Header {
    pub const SIZE: usize = 10;
    const ID: [u8; 3] = [b'I', b'D', b'3'];
    const FLAG_EXTENDED_HEADER: u8 = 0x40;

    /// Read the tag header from the start of the source.
    ///
    /// Returns `None` when the magic bytes are missing or the major version
    /// is not 3 or 4.
    pub fn read<S: ByteSource + ?Sized>(source: &mut S) -> std::io::Result<Option<Self>> {
        if source.len()? < Self::SIZE as u64 {
            return Ok(None);
        }
        let mut buffer = [0u8; Self::SIZE];
        source.read_at(0, &mut buffer)?;

        if buffer[0..3] != Self::ID {
            return Ok(None);
        }

        let version = (buffer[3], buffer[4]);
        if version.0 != 3 && version.0 != 4 {
            return Ok(None);
        }

        let flags = buffer[5];
        // The tag size is synchsafe in both supported versions
        let size = parse_synchsafe(&buffer[6..10]);

        Ok(Some(Id3v2Header {
            version,
            flags,
            size,
        }))
    }

    pub fn has_extended_header(&self) -> bool {
        self.flags & Self::FLAG_EXTENDED_HEADER != 0
    }
}

/// Parse synchsafe integer (7 bits per byte)
pub(crate) fn parse_synchsafe(bytes: &[u8]) -> u32 {
    (((bytes[0] & 0x7F) as u32) << 21)
        | (((bytes[1] & 0x7F) as u32) << 14)
        | (((bytes[2] & 0x7F) as u32) << 7)
        | ((bytes[3] & 0x7F) as u32)
}

/// Parse plain big-endian 32-bit integer
pub(crate) fn parse_be_u32(bytes: &[u8]) -> u32 {
    ((bytes[0] as u32) << 24) | ((bytes[1] as u32) << 16) | ((bytes[2] as u32) << 8) | (bytes[3] as u32)
}

/// Frame and extended-header sizes are synchsafe in v2.4, plain big-endian
/// in v2.3.
fn parse_frame_size(bytes: &[u8], version: (u8, u8)) -> u32 {
    if version.0 >= 4 {
        parse_synchsafe(bytes)
    } else {
        parse_be_u32(bytes)
    }
}

/// ID3v2 frame
#[derive(Debug)]
pub struct Id3Frame {
    pub id: [u8; 4],
    pub data: Vec<u8>,
}

/// Sequential frame scanner, bounded by the declared tag size clamped to
/// the bytes actually available.
pub struct FrameScanner<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    version: (u8, u8),
    offset: u64,
    end: u64,
}

impl<'a, S: ByteSource + ?Sized> FrameScanner<'a, S> {
    const FRAME_HEADER_SIZE: u64 = 10;

    /// Position a scanner on the first frame, past the tag header and the
    /// extended header if its flag bit is set.
    pub fn new(source: &'a mut S) -> std::io::Result<Option<Self>> {
        let header = match Id3v2Header::read(source)? {
            Some(h) => h,
            None => return Ok(None),
        };

        let available = source.len()?;
        let end = (Id3v2Header::SIZE as u64 + header.size as u64).min(available);
        let mut offset = Id3v2Header::SIZE as u64;

        if header.has_extended_header() && offset + 4 <= end {
            let mut size_bytes = [0u8; 4];
            source.read_at(offset, &mut size_bytes)?;
            let ext_size = parse_frame_size(&size_bytes, header.version) as u64;
            // v2.4 counts the whole extended header in its size field,
            // v2.3 excludes the four size bytes
            offset += if header.version.0 >= 4 {
                ext_size
            } else {
                4 + ext_size
            };
        }

        Ok(Some(FrameScanner {
            source,
            version: header.version,
            offset,
            end,
        }))
    }

    pub fn version(&self) -> (u8, u8) {
        self.version
    }

    /// Read the next frame.
    ///
    /// Returns `None` once padding, a zero-sized frame, a frame running past
    /// the tag boundary, or the boundary itself is reached.
    pub fn next_frame(&mut self) -> std::io::Result<Option<Id3Frame>> {
        if self.offset + Self::FRAME_HEADER_SIZE > self.end {
            return Ok(None);
        }

        let mut buffer = [0u8; 10];
        self.source.read_at(self.offset, &mut buffer)?;

        // Two leading zero bytes in the id mark the start of padding
        if buffer[0] == 0 && buffer[1] == 0 {
            return Ok(None);
        }

        let size = parse_frame_size(&buffer[4..8], self.version) as u64;
        if size == 0 || self.offset + Self::FRAME_HEADER_SIZE + size > self.end {
            return Ok(None);
        }

        let mut data = vec![0u8; size as usize];
        self.source.read_at(self.offset + Self::FRAME_HEADER_SIZE, &mut data)?;
        self.offset += Self::FRAME_HEADER_SIZE + size;

        Ok(Some(Id3Frame {
            id: [buffer[0], buffer[1], buffer[2], buffer[3]],
            data,
        }))
    }
}

/// Find the payload of the first frame with the given id
pub fn find_frame<S: ByteSource + ?Sized>(
    source: &mut S,
    id: &[u8; 4],
) -> std::io::Result<Option<Vec<u8>>> {
    let mut scanner = match FrameScanner::new(source)? {
        Some(s) => s,
        None => return Ok(None),
    };

    while let Some(frame) = scanner.next_frame()? {
        if &frame.id == id {
            return Ok(Some(frame.data));
        }
    }

    Ok(None)
}

/// Tag version and lyric frame presence
#[derive(Debug, Serialize)]
pub struct TagProbe {
    pub version: String,
    pub has_unsync_lyrics: bool,
    pub has_sync_lyrics: bool,
}

/// Scan the whole tag and report which lyric frames it carries
pub fn probe<S: ByteSource + ?Sized>(source: &mut S) -> std::io::Result<Option<TagProbe>> {
    let mut scanner = match FrameScanner::new(source)? {
        Some(s) => s,
        None => return Ok(None),
    };

    let version = scanner.version();
    let mut result = TagProbe {
        version: format!("{}.{}", version.0, version.1),
        has_unsync_lyrics: false,
        has_sync_lyrics: false,
    };

    while let Some(frame) = scanner.next_frame()? {
        match &frame.id {
            id if id == frame_ids::UNSYNC_LYRICS => result.has_unsync_lyrics = true,
            id if id == frame_ids::SYNC_LYRICS => result.has_sync_lyrics = true,
            _ => {}
        }
    }

    Ok(Some(result))
}
