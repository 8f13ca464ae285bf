// LRC timestamp-tagged text rendering and parsing

use serde::Serialize;

/// One synchronised lyrics line
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LyricsLine {
    pub time_ms: u32,
    pub text: String,
}

/// Render lines as LRC-style text, one `[mm:ss.hh]text` entry per line
pub fn render_lrc(lines: &[LyricsLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let minutes = line.time_ms / 60_000;
        let seconds = (line.time_ms / 1_000) % 60;
        let hundredths = (line.time_ms % 1_000) / 10;
        out.push_str(&format!(
            "[{:02}:{:02}.{:02}]{}\n",
            minutes, seconds, hundredths, line.text
        ));
    }
    out
}

/// Parse LRC-style text into timed lines.
///
/// Accepts `[mm:ss.hh]` and `[mm:ss]` stamps; lines without a leading stamp
/// (metadata tags, plain text) are skipped.
pub fn parse_lrc(content: &str) -> Vec<LyricsLine> {
    let mut lines = Vec::new();
    for raw in content.lines() {
        if let Some((time_ms, text)) = parse_line(raw.trim()) {
            lines.push(LyricsLine { time_ms, text });
        }
    }
    lines
}

fn parse_line(line: &str) -> Option<(u32, String)> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    let stamp = &rest[..end];
    let text = rest[end + 1..].trim().to_string();

    let (minutes_str, seconds_str) = stamp.split_once(':')?;
    let minutes: u32 = minutes_str.parse().ok()?;

    let (whole, frac) = match seconds_str.split_once('.') {
        Some((w, f)) => (w, f),
        None => (seconds_str, ""),
    };
    let seconds: u32 = whole.parse().ok()?;

    let millis = if frac.is_empty() {
        0
    } else {
        let digits: String = frac.chars().take(3).collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let value: u32 = digits.parse().ok()?;
        match digits.len() {
            1 => value * 100,
            2 => value * 10,
            _ => value,
        }
    };

    Some((minutes * 60_000 + seconds * 1_000 + millis, text))
}
