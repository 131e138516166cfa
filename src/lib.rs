pub mod chunk;
pub mod error;
pub mod ingest;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod timecode;

pub use chunk::roll_up;
pub use error::{DecodeError, PipelineError};
pub use ingest::{TranscriptFormat, parse_transcript, strip_fillers};
pub use llm::{Completer, CompletionClient, CompletionConfig, decode_metrics, extract_chunk};
pub use models::{AnalyticsRow, Chunk, ChunkMetrics, MetricsPayload, ScoreScale, Segment};
pub use pipeline::{DispatchConfig, assemble, run_extraction};
pub use timecode::{format_timecode, parse_timecode};
