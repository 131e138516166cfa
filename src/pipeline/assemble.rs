use crate::error::PipelineError;
use crate::models::{AnalyticsRow, Chunk, ChunkMetrics, ScoreScale};

/// Merge each chunk with its extraction metrics into the final ordered row
/// sequence.
///
/// Metric fields win over chunk fields except `timestamp`, which is always
/// the chunk's. Star-scale scores are divided by 10 here so persisted rows
/// always carry the canonical 0..1 scale. A length mismatch between the two
/// sequences can only come from a dispatcher bug and aborts the run rather
/// than emitting misaligned rows.
pub fn assemble(
    chunks: Vec<Chunk>,
    results: Vec<ChunkMetrics>,
    scale: ScoreScale,
) -> Result<Vec<AnalyticsRow>, PipelineError> {
    if chunks.len() != results.len() {
        return Err(PipelineError::Alignment {
            chunks: chunks.len(),
            results: results.len(),
        });
    }

    let normalize = |score: Option<f64>| score.map(|value| value / scale.max_score());

    let rows = chunks
        .into_iter()
        .zip(results)
        .map(|(chunk, metrics)| AnalyticsRow {
            timestamp: chunk.timestamp,
            text: metrics.parsed.unwrap_or(chunk.text),
            topic: metrics.topic,
            tags: metrics.tags,
            sentiment: normalize(metrics.sentiment),
            urgency: normalize(metrics.urgency),
            descriptive_normative: normalize(metrics.descriptive_normative),
            questioning: normalize(metrics.questioning),
        })
        .collect();

    Ok(rows)
}
