// USLT and SYLT frame payload parsers

use crate::lrc::LyricsLine;
use crate::utils::encoding::{decode_text, TextEncoding};

/// Lyric frame identifiers
pub mod frame_ids {
    /// Unsynchronised lyrics/text transcription
    pub const UNSYNC_LYRICS: &[u8; 4] = b"USLT";
    /// Synchronised lyrics/text
    pub const SYNC_LYRICS: &[u8; 4] = b"SYLT";
}

/// SYLT timestamp format byte for absolute milliseconds. The MPEG-frame
/// variant (1) is not supported; frames using it yield no lines.
pub const TIMESTAMP_FORMAT_MILLIS: u8 = 2;

/// Find a null terminator of the encoding's width, scanning on character
/// boundaries from `from`.
fn find_terminator(data: &[u8], from: usize, width: usize) -> Option<usize> {
    let mut pos = from;
    while pos + width <= data.len() {
        if data[pos..pos + width].iter().all(|&b| b == 0) {
            return Some(pos);
        }
        pos += width;
    }
    None
}

/// Strip trailing frame padding and surrounding whitespace
fn clean_text(text: &str) -> &str {
    text.trim_matches('\0').trim()
}

/// Parse a USLT payload into the lyrics text.
///
/// Layout: encoding byte, 3-byte language code, null-terminated content
/// description, then the lyrics text running to the end of the payload.
pub fn parse_unsync_lyrics(data: &[u8]) -> Option<String> {
    if data.len() < 4 {
        return None;
    }

    let encoding = TextEncoding::from_byte(data[0]);
    let width = encoding.terminator_width();

    // description starts after the language code
    let term = find_terminator(data, 4, width)?;
    let decoded = decode_text(&data[term + width..], encoding);
    let text = clean_text(&decoded);

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parse a SYLT payload into timed lyrics lines.
///
/// Layout: encoding byte, 3-byte language code, timestamp format byte,
/// content type byte, null-terminated content description, then repeating
/// (null-terminated text, 4-byte big-endian timestamp) pairs.
///
/// Lines come back trimmed, blank entries dropped, sorted ascending by
/// timestamp with exact duplicates removed.
pub fn parse_sync_lyrics(data: &[u8]) -> Option<Vec<LyricsLine>> {
    if data.len() < 6 {
        return None;
    }

    if data[4] != TIMESTAMP_FORMAT_MILLIS {
        return None;
    }

    let encoding = TextEncoding::from_byte(data[0]);
    let width = encoding.terminator_width();

    // description starts after language, timestamp format and content type
    let term = find_terminator(data, 6, width)?;
    let mut pos = term + width;

    let mut lines = Vec::new();
    while pos < data.len() {
        let term = match find_terminator(data, pos, width) {
            Some(t) => t,
            None => break,
        };
        let stamp_start = term + width;
        if stamp_start + 4 > data.len() {
            break;
        }

        let time_ms = u32::from_be_bytes([
            data[stamp_start],
            data[stamp_start + 1],
            data[stamp_start + 2],
            data[stamp_start + 3],
        ]);
        let decoded = decode_text(&data[pos..term], encoding);
        let text = clean_text(&decoded);
        if !text.is_empty() {
            lines.push(LyricsLine {
                time_ms,
                text: text.to_string(),
            });
        }

        pos = stamp_start + 4;
    }

    lines.sort();
    lines.dedup();

    if lines.is_empty() {
        None
    } else {
        Some(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16_le(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    fn utf16_be(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
    }

    fn uslt_payload(encoding: u8, description: &[u8], text: &[u8]) -> Vec<u8> {
        let mut payload = vec![encoding, b'e', b'n', b'g'];
        payload.extend_from_slice(description);
        let terminator: &[u8] = if encoding == 1 || encoding == 2 {
            &[0, 0]
        } else {
            &[0]
        };
        payload.extend_from_slice(terminator);
        payload.extend_from_slice(text);
        payload
    }

    fn sylt_payload(encoding: u8, format: u8, entries: &[(&[u8], u32)]) -> Vec<u8> {
        let mut payload = vec![encoding, b'e', b'n', b'g', format, 0x01];
        let terminator: &[u8] = if encoding == 1 || encoding == 2 {
            &[0, 0]
        } else {
            &[0]
        };
        payload.extend_from_slice(terminator);
        for (text, time_ms) in entries {
            payload.extend_from_slice(text);
            payload.extend_from_slice(terminator);
            payload.extend_from_slice(&time_ms.to_be_bytes());
        }
        payload
    }

    #[test]
    fn test_unsync_latin1() {
        let payload = uslt_payload(0, b"", b"hello world");
        assert_eq!(parse_unsync_lyrics(&payload).unwrap(), "hello world");
    }

    #[test]
    fn test_unsync_utf16_with_bom() {
        let mut text = vec![0xFF, 0xFE];
        text.extend(utf16_le("  héllo wörld  "));
        let payload = uslt_payload(1, &utf16_le("desc"), &text);
        assert_eq!(parse_unsync_lyrics(&payload).unwrap(), "héllo wörld");
    }

    #[test]
    fn test_unsync_utf16_be() {
        let payload = uslt_payload(2, &utf16_be("desc"), &utf16_be("héllo"));
        assert_eq!(parse_unsync_lyrics(&payload).unwrap(), "héllo");
    }

    #[test]
    fn test_unsync_utf8() {
        let payload = uslt_payload(3, "déscription".as_bytes(), "línea única".as_bytes());
        assert_eq!(parse_unsync_lyrics(&payload).unwrap(), "línea única");
    }

    #[test]
    fn test_unsync_missing_terminator() {
        // description never terminated
        let payload = [0, b'e', b'n', b'g', b'a', b'b', b'c'];
        assert_eq!(parse_unsync_lyrics(&payload), None);
    }

    #[test]
    fn test_unsync_blank_text() {
        let payload = uslt_payload(0, b"desc", b"   ");
        assert_eq!(parse_unsync_lyrics(&payload), None);
    }

    #[test]
    fn test_unsync_truncated_payload() {
        assert_eq!(parse_unsync_lyrics(&[0, b'e', b'n']), None);
        assert_eq!(parse_unsync_lyrics(&[]), None);
    }

    #[test]
    fn test_sync_sorted_by_time() {
        let payload = sylt_payload(0, 2, &[(b"line one", 1000), (b"line two", 500)]);
        let lines = parse_sync_lyrics(&payload).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], LyricsLine { time_ms: 500, text: "line two".into() });
        assert_eq!(lines[1], LyricsLine { time_ms: 1000, text: "line one".into() });
    }

    #[test]
    fn test_sync_duplicates_removed() {
        let payload = sylt_payload(0, 2, &[(b"same", 100), (b"same", 100), (b"other", 100)]);
        let lines = parse_sync_lyrics(&payload).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_sync_blank_entries_dropped() {
        let payload = sylt_payload(0, 2, &[(b"\n", 100), (b"kept", 200)]);
        let lines = parse_sync_lyrics(&payload).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "kept");
    }

    #[test]
    fn test_sync_rejects_mpeg_frame_format() {
        let payload = sylt_payload(0, 1, &[(b"line", 100)]);
        assert_eq!(parse_sync_lyrics(&payload), None);
    }

    #[test]
    fn test_sync_utf16_entries() {
        let payload = sylt_payload(
            2,
            2,
            &[(&utf16_be("första raden"), 0), (&utf16_be("andra raden"), 2500)],
        );
        let lines = parse_sync_lyrics(&payload).unwrap();
        assert_eq!(lines[0].text, "första raden");
        assert_eq!(lines[1].text, "andra raden");
        assert_eq!(lines[1].time_ms, 2500);
    }

    #[test]
    fn test_sync_truncated_trailing_entry() {
        let mut payload = sylt_payload(0, 2, &[(b"complete", 100)]);
        // a terminated text with only two timestamp bytes behind it
        payload.extend_from_slice(b"partial\x00\x00\x01");
        let lines = parse_sync_lyrics(&payload).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "complete");
    }

    #[test]
    fn test_sync_empty_payload() {
        assert_eq!(parse_sync_lyrics(&[]), None);
        assert_eq!(parse_sync_lyrics(&sylt_payload(0, 2, &[])), None);
    }
}
