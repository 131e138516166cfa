use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of tags kept per chunk; anything beyond is dropped
pub const MAX_TAGS: usize = 5;

/// Topic label carried by the sentinel result for a failed extraction
pub const FAILED_TOPIC: &str = "Failed to parse text";

/// Numeric scale the extraction schema declares for the four metric scores.
///
/// `Unit` is canonical; `Stars` output is divided by 10 when rows are
/// assembled, so persisted scores are always 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScoreScale {
    /// Continuous scores in 0.0..=1.0
    Unit,
    /// Integer "star" ratings in 0..=10
    Stars,
}

impl ScoreScale {
    /// Upper bound of a valid score under this scale
    pub fn max_score(self) -> f64 {
        match self {
            ScoreScale::Unit => 1.0,
            ScoreScale::Stars => 10.0,
        }
    }
}

/// Strict decode target for the model's reply.
///
/// All four scores are required here; a reply missing one is a schema
/// violation and goes through the corrective retry.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsPayload {
    /// Punctuation-restored rendering of the chunk text, when requested
    #[serde(default)]
    pub parsed: Option<String>,
    /// Short free-text topic label
    pub topic: String,
    /// Up to five short tags
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub sentiment: f64,
    pub urgency: f64,
    pub descriptive_normative: f64,
    pub questioning: f64,
}

/// The model sometimes returns the tags array as a JSON-encoded string
/// rather than a bare array; accept both shapes.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagField {
        List(Vec<String>),
        Encoded(String),
    }

    match TagField::deserialize(deserializer)? {
        TagField::List(tags) => Ok(tags),
        TagField::Encoded(text) => serde_json::from_str(&text).map_err(serde::de::Error::custom),
    }
}

/// Terminal analytics for exactly one chunk.
///
/// Either a validated payload or the sentinel emitted when extraction failed
/// after retry. Scores are `None` when unknown; zero is a valid score and is
/// never used as a failure marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetrics {
    pub parsed: Option<String>,
    pub topic: String,
    pub tags: Vec<String>,
    pub sentiment: Option<f64>,
    pub urgency: Option<f64>,
    pub descriptive_normative: Option<f64>,
    pub questioning: Option<f64>,
}

impl ChunkMetrics {
    /// Sentinel result for a chunk whose reply could not be decoded twice.
    ///
    /// Structurally identical to a successful result so downstream consumers
    /// never special-case it; the diagnostic topic and tags make it visible
    /// in any table or plot.
    pub fn failed() -> Self {
        Self {
            parsed: Some(
                "The completion service returned undecodable output for this chunk.".to_string(),
            ),
            topic: FAILED_TOPIC.to_string(),
            tags: vec!["NA".to_string()],
            sentiment: None,
            urgency: None,
            descriptive_normative: None,
            questioning: None,
        }
    }

    /// True for the sentinel emitted by [`ChunkMetrics::failed`]
    pub fn is_failed(&self) -> bool {
        self.sentiment.is_none()
            && self.urgency.is_none()
            && self.descriptive_normative.is_none()
            && self.questioning.is_none()
    }
}

impl From<MetricsPayload> for ChunkMetrics {
    fn from(payload: MetricsPayload) -> Self {
        let mut tags = payload.tags;
        tags.truncate(MAX_TAGS);
        Self {
            parsed: payload.parsed,
            topic: payload.topic,
            tags,
            sentiment: Some(payload.sentiment),
            urgency: Some(payload.urgency),
            descriptive_normative: Some(payload.descriptive_normative),
            questioning: Some(payload.questioning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_sentinel_shape() {
        let sentinel = ChunkMetrics::failed();

        assert!(sentinel.is_failed());
        assert_eq!(sentinel.topic, FAILED_TOPIC);
        assert_eq!(sentinel.tags, vec!["NA".to_string()]);
        assert_eq!(sentinel.sentiment, None);
        assert!(sentinel.parsed.is_some());
    }

    #[test]
    fn test_payload_conversion_caps_tags() {
        let payload = MetricsPayload {
            parsed: None,
            topic: "budget review".to_string(),
            tags: (0..8).map(|n| format!("tag{}", n)).collect(),
            sentiment: 0.5,
            urgency: 0.1,
            descriptive_normative: 0.9,
            questioning: 0.0,
        };

        let metrics = ChunkMetrics::from(payload);

        assert_eq!(metrics.tags.len(), MAX_TAGS);
        assert_eq!(metrics.sentiment, Some(0.5));
        // Zero is a real score, not an unknown marker
        assert_eq!(metrics.questioning, Some(0.0));
        assert!(!metrics.is_failed());
    }

    #[test]
    fn test_tags_accept_encoded_string() {
        let json = r#"{
            "topic": "roadmap",
            "tags": "[\"planning\", \"delivery\"]",
            "sentiment": 0.4,
            "urgency": 0.2,
            "descriptive_normative": 0.6,
            "questioning": 0.1
        }"#;

        let payload: MetricsPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.tags, vec!["planning", "delivery"]);
    }
}
