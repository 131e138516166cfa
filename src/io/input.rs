use std::path::Path;

use anyhow::{Context, Result};

use crate::ingest::{TranscriptFormat, parse_transcript};
use crate::models::{AnalyticsRow, Chunk, Segment};

/// Read and parse a raw transcript file into ordered segments.
pub fn read_transcript_file(path: &Path, format: TranscriptFormat) -> Result<Vec<Segment>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    Ok(parse_transcript(&raw, format)?)
}

/// Read a chunk file written by `ingest` (one JSON record per line).
pub fn read_chunks_file(path: &Path) -> Result<Vec<Chunk>> {
    read_ndjson(path)
}

/// Read an analytics file back (one JSON row per line).
pub fn read_rows_file(path: &Path) -> Result<Vec<AnalyticsRow>> {
    read_ndjson(path)
}

fn read_ndjson<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Bad record on line {} of {:?}", number + 1, path))
        })
        .collect()
}
