pub mod captions;
pub mod vtt;

pub use captions::parse_captions;
pub use vtt::parse_vtt;

use crate::error::PipelineError;
use crate::models::Segment;

/// Source format of a raw transcript file.
///
/// The two variants share nothing beyond the ordered-segment output
/// contract, so dispatch is a tag rather than a type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TranscriptFormat {
    /// Alternating timecode/text lines (YouTube caption export)
    Captions,
    /// VTT cue blocks (Teams meeting export)
    Vtt,
}

/// Parse raw transcript text into ordered segments and strip disfluencies.
pub fn parse_transcript(
    raw: &str,
    format: TranscriptFormat,
) -> Result<Vec<Segment>, PipelineError> {
    let mut segments = match format {
        TranscriptFormat::Captions => parse_captions(raw)?,
        TranscriptFormat::Vtt => parse_vtt(raw)?,
    };

    for segment in &mut segments {
        segment.text = strip_fillers(&segment.text);
    }

    Ok(segments)
}

/// Filler tokens dropped from segment text, matched case-insensitively
const FILLER_WORDS: &[&str] = &["um", "umm", "uh", "uhh", "oh", "ohh", "hmm", "hmmm"];

/// Drop filler tokens and normalize spacing to single spaces.
///
/// An utterance that was nothing but fillers becomes the empty string; the
/// segment itself is kept so the segment count stays aligned with the
/// timestamps.
pub fn strip_fillers(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| !FILLER_WORDS.iter().any(|filler| token.eq_ignore_ascii_case(filler)))
        .collect::<Vec<_>>()
        .join(" ")
}
