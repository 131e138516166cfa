use crate::error::PipelineError;
use crate::models::{Chunk, Segment};

/// Roll consecutive segments up into fixed-size analysis windows.
///
/// Every `window_size` segments become one chunk anchored at its first
/// segment's timestamp; the final chunk may hold fewer. The chunk count is
/// always `ceil(segments / window_size)`, and a window size below one is
/// `InvalidWindowSize`.
pub fn roll_up(segments: &[Segment], window_size: usize) -> Result<Vec<Chunk>, PipelineError> {
    if window_size < 1 {
        return Err(PipelineError::InvalidWindowSize(window_size));
    }

    let chunks = segments
        .chunks(window_size)
        .map(|run| Chunk {
            timestamp: run[0].timestamp,
            text: run
                .iter()
                .map(|segment| segment.text.as_str())
                .filter(|text| !text.is_empty())
                .collect::<Vec<&str>>()
                .join(" "),
        })
        .collect();

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(timestamp: u64, text: &str) -> Segment {
        Segment {
            timestamp,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_roll_up_pairs() {
        let segments = vec![segment(0, "hello"), segment(5, "world")];

        let chunks = roll_up(&segments, 2).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].timestamp, 0);
        assert_eq!(chunks[0].text, "hello world");
    }

    #[test]
    fn test_chunk_count_is_ceiling() {
        let segments: Vec<Segment> = (0..7).map(|n| segment(n * 5, "word")).collect();

        for (window_size, expected) in [(1, 7), (2, 4), (3, 3), (7, 1), (10, 1)] {
            let chunks = roll_up(&segments, window_size).unwrap();
            assert_eq!(chunks.len(), expected, "window size {}", window_size);
        }
    }

    #[test]
    fn test_short_final_chunk_keeps_anchor() {
        let segments = vec![
            segment(0, "a"),
            segment(5, "b"),
            segment(10, "c"),
        ];

        let chunks = roll_up(&segments, 2).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].timestamp, 10);
        assert_eq!(chunks[1].text, "c");
    }

    #[test]
    fn test_window_size_one_maps_segments_directly() {
        let segments = vec![segment(0, "hello"), segment(5, "world")];

        let chunks = roll_up(&segments, 1).unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "hello");
        assert_eq!(chunks[1].timestamp, 5);
    }

    #[test]
    fn test_zero_window_size_rejected() {
        assert!(matches!(
            roll_up(&[], 0),
            Err(PipelineError::InvalidWindowSize(0))
        ));
    }

    #[test]
    fn test_empty_segment_text_does_not_double_space() {
        let segments = vec![segment(0, "start"), segment(5, ""), segment(10, "end")];

        let chunks = roll_up(&segments, 3).unwrap();

        assert_eq!(chunks[0].text, "start end");
    }

    #[test]
    fn test_no_segments_yield_no_chunks() {
        assert!(roll_up(&[], 4).unwrap().is_empty());
    }
}
