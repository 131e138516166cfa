use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::AnalyticsRow;
use crate::timecode::format_timecode;

/// Write records as newline-delimited JSON, one record per line.
pub fn write_ndjson<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;

    for record in records {
        let line = serde_json::to_string(record).context("Failed to serialize record")?;
        writeln!(file, "{}", line)?;
    }

    Ok(())
}

/// Render one analytics row as a fixed-layout summary line.
///
/// Unknown scores print as `--` so sentinel rows stand out in the listing.
pub fn render_row(row: &AnalyticsRow) -> String {
    let score = |value: Option<f64>| match value {
        Some(v) => format!("{:.2}", v),
        None => "--".to_string(),
    };

    format!(
        "{} | {} \t|| Sentiment: {} | Urgency: {} | Descriptive Normative: {} | Questioning: {}",
        format_timecode(row.timestamp),
        row.topic,
        score(row.sentiment),
        score(row.urgency),
        score(row.descriptive_normative),
        score(row.questioning),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::input::read_rows_file;
    use crate::models::ChunkMetrics;

    fn sample_row() -> AnalyticsRow {
        AnalyticsRow {
            timestamp: 3723,
            text: "We begin.".to_string(),
            topic: "kick off".to_string(),
            tags: vec!["agenda".to_string()],
            sentiment: Some(0.61),
            urgency: Some(0.2),
            descriptive_normative: Some(0.35),
            questioning: Some(0.0),
        }
    }

    #[test]
    fn test_ndjson_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.ndjson");
        let rows = vec![sample_row()];

        write_ndjson(&path, &rows).unwrap();
        let restored = read_rows_file(&path).unwrap();

        assert_eq!(restored, rows);
    }

    #[test]
    fn test_ndjson_is_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.ndjson");
        let rows = vec![sample_row(), sample_row()];

        write_ndjson(&path, &rows).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert_eq!(written.lines().count(), 2);
        assert!(written.lines().all(|line| line.starts_with('{')));
    }

    #[test]
    fn test_unknown_scores_serialize_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.ndjson");
        let row = AnalyticsRow {
            sentiment: None,
            ..sample_row()
        };

        write_ndjson(&path, &[row]).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert!(written.contains("\"sentiment\":null"));
    }

    #[test]
    fn test_render_row_layout() {
        let line = render_row(&sample_row());

        assert!(line.starts_with("01:02:03 | kick off"));
        assert!(line.contains("Sentiment: 0.61"));
        assert!(line.contains("Questioning: 0.00"));
    }

    #[test]
    fn test_render_sentinel_row_shows_unknown_scores() {
        let metrics = ChunkMetrics::failed();
        let row = AnalyticsRow {
            timestamp: 0,
            text: metrics.parsed.clone().unwrap_or_default(),
            topic: metrics.topic.clone(),
            tags: metrics.tags.clone(),
            sentiment: metrics.sentiment,
            urgency: metrics.urgency,
            descriptive_normative: metrics.descriptive_normative,
            questioning: metrics.questioning,
        };

        let line = render_row(&row);

        assert!(line.contains("Failed to parse text"));
        assert!(line.contains("Sentiment: --"));
    }
}
