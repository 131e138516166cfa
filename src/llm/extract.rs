use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::llm::client::Completer;
use crate::llm::decode::decode_metrics;
use crate::llm::prompts::{CORRECTION_DIRECTIVE, SYSTEM_PROMPT, build_chunk_prompt};
use crate::models::{ChunkMetrics, ScoreScale};

/// Produce exactly one metrics record for a chunk's text.
///
/// One request is sent; an undecodable reply gets a single corrective retry
/// carrying the same prompt plus the correction directive, and a second
/// decode failure yields the sentinel record. Transport errors propagate to
/// the caller unchanged — "the service did not answer" is never softened
/// into a sentinel.
pub async fn extract_chunk<C: Completer>(
    client: &C,
    chunk_index: usize,
    text: &str,
    scale: ScoreScale,
) -> Result<ChunkMetrics, PipelineError> {
    let prompt = build_chunk_prompt(text, scale);

    let reply = client.complete(SYSTEM_PROMPT, &prompt).await?;
    let first_failure = match decode_metrics(&reply, scale) {
        Ok(metrics) => return Ok(metrics),
        Err(e) => e,
    };

    debug!(
        "chunk {}: decode failed ({}), retrying with correction",
        chunk_index, first_failure
    );

    let corrected = format!("{}\n\n{}", prompt, CORRECTION_DIRECTIVE);
    let reply = client.complete(SYSTEM_PROMPT, &corrected).await?;
    match decode_metrics(&reply, scale) {
        Ok(metrics) => Ok(metrics),
        Err(e) => {
            warn!(
                "chunk {}: retry decode failed ({}), emitting sentinel result",
                chunk_index, e
            );
            Ok(ChunkMetrics::failed())
        }
    }
}
