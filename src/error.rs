use thiserror::Error;

/// Fatal pipeline errors. Any of these aborts the run; per-chunk extraction
/// failures are represented by the sentinel metrics record instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Timecode text matched neither `MM:SS` nor `HH:MM:SS`
    #[error("malformed timecode: {0:?}")]
    MalformedTimecode(String),

    /// Raw transcript input could not be split into complete records
    #[error("truncated transcript input: {0}")]
    TruncatedInput(String),

    /// Roll-up window size must be at least one segment
    #[error("invalid chunk window size: {0}")]
    InvalidWindowSize(usize),

    /// The completion service did not answer (transport, auth, or HTTP error)
    #[error("completion service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Chunk and result sequences diverged; emitting rows would misalign them
    #[error("chunk/result misalignment: {chunks} chunks, {results} results")]
    Alignment { chunks: usize, results: usize },
}

/// Recoverable failures while decoding the model's reply into the extraction
/// schema. These drive the one-shot corrective retry, not a run abort.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("reply is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} score {value} outside 0..={max}")]
    ScoreOutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },
}
