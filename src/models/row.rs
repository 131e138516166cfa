use serde::{Deserialize, Serialize};

/// One line of the pipeline's terminal output: a chunk merged with its
/// extraction metrics, at the chunk's original sequence position.
///
/// Serialized field names are the on-disk contract for the analytics file
/// and the dashboard boundary. Unknown scores serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRow {
    /// Window anchor offset in integer seconds (always from the chunk)
    pub timestamp: u64,
    /// Punctuation-restored text when the extraction supplied it, otherwise
    /// the raw chunk text
    pub text: String,
    pub topic: String,
    pub tags: Vec<String>,
    pub sentiment: Option<f64>,
    pub urgency: Option<f64>,
    pub descriptive_normative: Option<f64>,
    pub questioning: Option<f64>,
}
