use crate::error::PipelineError;
use crate::models::Segment;
use crate::timecode::parse_timecode;

/// Parse the caption-pair format: a timecode line followed by one text line,
/// repeated (the shape of a YouTube caption export).
///
/// A single trailing blank line is discarded. An odd number of remaining
/// lines means a timecode without its text line, which is `TruncatedInput`.
pub fn parse_captions(raw: &str) -> Result<Vec<Segment>, PipelineError> {
    let mut lines: Vec<&str> = raw.lines().collect();
    if lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    if lines.len() % 2 != 0 {
        return Err(PipelineError::TruncatedInput(format!(
            "{} lines remain after trailing-blank removal; expected timecode/text pairs",
            lines.len()
        )));
    }

    let mut segments = Vec::with_capacity(lines.len() / 2);
    for pair in lines.chunks(2) {
        segments.push(Segment {
            timestamp: parse_timecode(pair[0])?,
            text: pair[1].trim().to_string(),
        });
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_caption_pairs() {
        let raw = "0:00\nhello\n0:05\nworld\n";

        let segments = parse_captions(raw).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].timestamp, 0);
        assert_eq!(segments[0].text, "hello");
        assert_eq!(segments[1].timestamp, 5);
        assert_eq!(segments[1].text, "world");
    }

    #[test]
    fn test_trailing_blank_line_discarded() {
        let raw = "0:00\nhello\n0:05\nworld\n\n";

        let segments = parse_captions(raw).unwrap();

        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_odd_line_count_is_truncated_input() {
        let raw = "0:00\nhello\n0:05\n";

        assert!(matches!(
            parse_captions(raw),
            Err(PipelineError::TruncatedInput(_))
        ));
    }

    #[test]
    fn test_bad_timecode_propagates() {
        let raw = "not a time\nhello\n";

        assert!(matches!(
            parse_captions(raw),
            Err(PipelineError::MalformedTimecode(_))
        ));
    }

    #[test]
    fn test_empty_input_yields_no_segments() {
        assert!(parse_captions("").unwrap().is_empty());
    }
}
