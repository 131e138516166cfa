use crate::error::DecodeError;
use crate::models::{ChunkMetrics, MetricsPayload, ScoreScale};

/// Decode the model's reply into validated chunk metrics.
///
/// The model tends to pretty-print JSON with arbitrary indentation, which
/// trips strict parsers; each line is stripped of leading and trailing
/// whitespace and the lines concatenated before structural parsing.
pub fn decode_metrics(raw: &str, scale: ScoreScale) -> Result<ChunkMetrics, DecodeError> {
    let flattened: String = raw.lines().map(str::trim).collect();
    let payload: MetricsPayload = serde_json::from_str(&flattened)?;
    validate_scores(&payload, scale)?;
    Ok(ChunkMetrics::from(payload))
}

/// A score outside the configured scale is a schema violation.
fn validate_scores(payload: &MetricsPayload, scale: ScoreScale) -> Result<(), DecodeError> {
    let max = scale.max_score();
    for (field, value) in [
        ("sentiment", payload.sentiment),
        ("urgency", payload.urgency),
        ("descriptive_normative", payload.descriptive_normative),
        ("questioning", payload.questioning),
    ] {
        if !(0.0..=max).contains(&value) {
            return Err(DecodeError::ScoreOutOfRange { field, value, max });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_compact_reply() {
        let raw = r#"{"parsed": "We begin.", "topic": "kick off", "tags": ["agenda"], "sentiment": 0.6, "urgency": 0.2, "descriptive_normative": 0.3, "questioning": 0.0}"#;

        let metrics = decode_metrics(raw, ScoreScale::Unit).unwrap();

        assert_eq!(metrics.topic, "kick off");
        assert_eq!(metrics.parsed.as_deref(), Some("We begin."));
        assert_eq!(metrics.sentiment, Some(0.6));
    }

    #[test]
    fn test_decode_survives_pretty_printed_reply() {
        let raw = "{\n    \"topic\": \"budget\",\n    \"tags\": [\n        \"costs\",\n        \"planning\"\n    ],\n    \"sentiment\": 0.4,\n    \"urgency\": 0.7,\n    \"descriptive_normative\": 0.5,\n    \"questioning\": 0.1\n}";

        let metrics = decode_metrics(raw, ScoreScale::Unit).unwrap();

        assert_eq!(metrics.tags, vec!["costs", "planning"]);
        assert_eq!(metrics.urgency, Some(0.7));
    }

    #[test]
    fn test_decode_star_scale() {
        let raw = r#"{"topic": "risks", "tags": ["risk"], "sentiment": 3, "urgency": 10, "descriptive_normative": 0, "questioning": 7}"#;

        let metrics = decode_metrics(raw, ScoreScale::Stars).unwrap();

        assert_eq!(metrics.urgency, Some(10.0));
        assert_eq!(metrics.descriptive_normative, Some(0.0));
    }

    #[test]
    fn test_score_out_of_range_is_rejected() {
        // Star-scale values against the unit schema must not slip through
        let raw = r#"{"topic": "risks", "tags": ["risk"], "sentiment": 7, "urgency": 0.1, "descriptive_normative": 0.2, "questioning": 0.3}"#;

        assert!(matches!(
            decode_metrics(raw, ScoreScale::Unit),
            Err(DecodeError::ScoreOutOfRange {
                field: "sentiment",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_score_is_schema_violation() {
        let raw = r#"{"topic": "risks", "tags": ["risk"], "sentiment": 0.5}"#;

        assert!(matches!(
            decode_metrics(raw, ScoreScale::Unit),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn test_prose_reply_is_rejected() {
        let raw = "Sure! Here is the JSON you asked for:";

        assert!(decode_metrics(raw, ScoreScale::Unit).is_err());
    }

    #[test]
    fn test_markdown_fenced_reply_is_rejected() {
        // Fences survive line-stripping; this is what the retry is for
        let raw = "```json\n{\"topic\": \"x\", \"tags\": [], \"sentiment\": 0.1, \"urgency\": 0.1, \"descriptive_normative\": 0.1, \"questioning\": 0.1}\n```";

        assert!(decode_metrics(raw, ScoreScale::Unit).is_err());
    }
}
