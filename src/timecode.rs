use crate::error::PipelineError;

/// Parse a human timecode into integer seconds.
///
/// Accepts `MM:SS` and `HH:MM:SS`; a fractional-second suffix (`.mmm`, as in
/// VTT timing lines) is truncated, not rounded. Anything else is
/// `MalformedTimecode`.
pub fn parse_timecode(text: &str) -> Result<u64, PipelineError> {
    let malformed = || PipelineError::MalformedTimecode(text.to_string());

    let trimmed = text.trim();
    // Truncate the fractional part before splitting the clock fields
    let whole = trimmed.split('.').next().unwrap_or(trimmed);

    let fields = whole
        .split(':')
        .map(|field| field.parse::<u64>().map_err(|_| malformed()))
        .collect::<Result<Vec<u64>, PipelineError>>()?;

    match fields[..] {
        [minutes, seconds] => Ok(minutes * 60 + seconds),
        [hours, minutes, seconds] => Ok(hours * 3600 + minutes * 60 + seconds),
        _ => Err(malformed()),
    }
}

/// Format seconds as a canonical zero-padded `HH:MM:SS` string.
///
/// The hours field is always emitted, even when zero, so table and chart
/// labels line up.
pub fn format_timecode(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
