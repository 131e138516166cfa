use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::llm::{Completer, extract_chunk};
use crate::models::{Chunk, ChunkMetrics, ScoreScale};

/// Knobs for the concurrent extraction run
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum in-flight completion requests. The service rate-limits
    /// somewhere above 60 concurrent requests.
    pub concurrency: usize,
    /// Score scale the extraction schema declares
    pub scale: ScoreScale,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 30,
            scale: ScoreScale::Unit,
        }
    }
}

/// Run the extraction client over every chunk with bounded parallelism.
///
/// Each worker writes its result into a slot vector addressed by the
/// chunk's original index, so output order equals input order no matter how
/// completions interleave. Sentinel failures are isolated per chunk; a
/// transport error is returned only after every in-flight sibling has
/// reached a terminal state — nothing is cancelled mid-run.
pub async fn run_extraction<C>(
    client: Arc<C>,
    chunks: &[Chunk],
    config: &DispatchConfig,
) -> Result<Vec<ChunkMetrics>, PipelineError>
where
    C: Completer + 'static,
{
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut workers = JoinSet::new();

    for (index, chunk) in chunks.iter().enumerate() {
        let client = Arc::clone(&client);
        let semaphore = Arc::clone(&semaphore);
        let text = chunk.text.clone();
        let scale = config.scale;

        workers.spawn(async move {
            // the semaphore is never closed while workers hold it
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            let outcome = extract_chunk(client.as_ref(), index, &text, scale).await;
            (index, outcome)
        });
    }

    let mut slots: Vec<Option<ChunkMetrics>> = vec![None; chunks.len()];
    let mut first_error: Option<PipelineError> = None;
    let mut completed = 0usize;

    while let Some(joined) = workers.join_next().await {
        let (index, outcome) = match joined {
            Ok(pair) => pair,
            Err(e) => {
                return Err(PipelineError::ServiceUnavailable(format!(
                    "extraction worker died: {}",
                    e
                )));
            }
        };

        match outcome {
            Ok(metrics) => slots[index] = Some(metrics),
            Err(e) => {
                warn!("chunk {}: {}", index, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        completed += 1;
        if completed % 25 == 0 {
            info!("{}/{} chunks extracted", completed, chunks.len());
        }
    }

    if let Some(error) = first_error {
        return Err(error);
    }

    let results: Vec<ChunkMetrics> = slots.into_iter().flatten().collect();
    if results.len() != chunks.len() {
        return Err(PipelineError::Alignment {
            chunks: chunks.len(),
            results: results.len(),
        });
    }

    Ok(results)
}
