use serde::{Deserialize, Serialize};

/// One timestamped utterance from the source transcript.
///
/// Segments are produced in source order by the transcript parser and never
/// mutated afterwards; their order is the chronology of the recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Offset from the start of the recording, in seconds
    pub timestamp: u64,
    /// Utterance text, filler words stripped (may be empty after filtering)
    pub text: String,
}

/// A fixed-size window of consecutive segments treated as one analysis unit.
///
/// Also the record type of the intermediate chunk file, one JSON object per
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// First constituent segment's offset in seconds (the window anchor)
    pub timestamp: u64,
    /// Space-joined text of the constituent segments, in order
    pub text: String,
}
