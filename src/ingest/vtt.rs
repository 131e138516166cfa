use crate::error::PipelineError;
use crate::models::Segment;
use crate::timecode::parse_timecode;

/// Parse VTT-style cue blocks (the shape of a Teams meeting export).
///
/// The header line is discarded, as are cue-id lines (a line is a cue id
/// when the line after it is a timing line). Each timing line
/// `HH:MM:SS.mmm --> HH:MM:SS.mmm` opens a pending cue whose text lines
/// accumulate until the next timing line or end of input; only then is a
/// segment emitted, so a multi-line cue yields exactly one segment. Only
/// the start time is kept, fractional seconds truncated.
pub fn parse_vtt(raw: &str) -> Result<Vec<Segment>, PipelineError> {
    let mut segments = Vec::new();
    let mut pending: Option<(u64, Vec<String>)> = None;

    // First line is the format header
    let mut lines = raw.lines().skip(1).peekable();
    while let Some(line) = lines.next() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(start) = cue_start(line) {
            if let Some((timestamp, texts)) = pending.take() {
                segments.push(Segment {
                    timestamp,
                    text: texts.join(" "),
                });
            }
            pending = Some((parse_timecode(start)?, Vec::new()));
        } else if lines.peek().is_some_and(|next| next.contains("-->")) {
            // cue identifier, discarded
        } else if let Some((_, texts)) = pending.as_mut() {
            texts.push(line.to_string());
        }
    }

    if let Some((timestamp, texts)) = pending.take() {
        segments.push(Segment {
            timestamp,
            text: texts.join(" "),
        });
    }

    Ok(segments)
}

/// The start timecode of a `start --> end` timing line, if this is one.
fn cue_start(line: &str) -> Option<&str> {
    let (start, _) = line.split_once("-->")?;
    Some(start.trim())
}
