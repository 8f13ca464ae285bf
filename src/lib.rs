// Lyrix - embedded lyrics extraction
//
// Extracts USLT (unsynchronised) and SYLT (synchronised) lyrics frames from
// ID3v2.3/2.4 tags and converts synchronised lyrics to LRC-style text.

use std::fs::File;

use serde::Serialize;

pub mod id3;
pub mod lrc;
pub mod utils;

pub use id3::TagProbe;
pub use lrc::{parse_lrc, render_lrc, LyricsLine};
pub use utils::io::ByteSource;

use id3::frames::{self, frame_ids};

/// Extract unsynchronised lyrics (USLT) from a byte source.
///
/// Any structural problem — missing tag, truncated frame, malformed
/// payload — reads as "no lyrics".
pub fn extract_unsync_text<S: ByteSource + ?Sized>(source: &mut S) -> Option<String> {
    let data = id3::find_frame(source, frame_ids::UNSYNC_LYRICS).ok()??;
    frames::parse_unsync_lyrics(&data)
}

/// Extract synchronised lyrics (SYLT) from a byte source.
///
/// Only the millisecond timestamp format is supported; lines come back
/// sorted ascending by time with exact duplicates removed.
pub fn extract_sync_lines<S: ByteSource + ?Sized>(source: &mut S) -> Option<Vec<LyricsLine>> {
    let data = id3::find_frame(source, frame_ids::SYNC_LYRICS).ok()??;
    frames::parse_sync_lyrics(&data)
}

/// Embedded lyrics, synchronised when the tag carries them
#[derive(Debug, Serialize)]
pub enum Lyrics {
    Synced(Vec<LyricsLine>),
    Unsynced(String),
}

/// Audio file with (possibly) embedded lyrics
pub struct LyricsFile {
    pub path: String,
}

impl LyricsFile {
    pub fn new(path: impl Into<String>) -> Self {
        LyricsFile { path: path.into() }
    }

    fn open(&self) -> Option<File> {
        File::open(&self.path).ok()
    }

    /// Unsynchronised lyrics text, if present
    pub fn unsync_text(&self) -> Option<String> {
        let mut file = self.open()?;
        extract_unsync_text(&mut file)
    }

    /// Synchronised lyrics lines, if present
    pub fn sync_lines(&self) -> Option<Vec<LyricsLine>> {
        let mut file = self.open()?;
        extract_sync_lines(&mut file)
    }

    /// Embedded lyrics, preferring synchronised over unsynchronised
    pub fn lyrics(&self) -> Option<Lyrics> {
        if let Some(lines) = self.sync_lines() {
            return Some(Lyrics::Synced(lines));
        }
        self.unsync_text().map(Lyrics::Unsynced)
    }

    /// Synchronised lyrics rendered as LRC text
    pub fn to_lrc(&self) -> Option<String> {
        self.sync_lines().map(|lines| render_lrc(&lines))
    }

    /// Tag version and lyric frame presence
    pub fn probe(&self) -> Option<TagProbe> {
        let mut file = self.open()?;
        id3::probe(&mut file).ok()?
    }
}
