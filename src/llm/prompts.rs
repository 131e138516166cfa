use crate::models::{MAX_TAGS, ScoreScale};

/// System instruction, fixed by the extraction contract
pub const SYSTEM_PROMPT: &str = "You are an AI language model that parses and extracts information from text using the provided schema.";

/// Appended to the reissued prompt after a decode failure
pub const CORRECTION_DIRECTIVE: &str = "Your previous reply could not be decoded. Return valid JSON matching the schema only, with no markdown markup or surrounding text.";

/// Render a chunk's text into the user prompt carrying the extraction schema.
pub fn build_chunk_prompt(text: &str, scale: ScoreScale) -> String {
    let range = match scale {
        ScoreScale::Unit => "a number from 0.0 to 1.0",
        ScoreScale::Stars => "an integer star rating from 0 to 10",
    };

    let mut prompt = String::new();
    prompt.push_str(
        "Analyse the transcript excerpt below and reply with a single JSON object containing exactly these fields:\n\n",
    );
    prompt.push_str(
        "- \"parsed\": your best effort to put punctuation and structure into the text\n",
    );
    prompt.push_str("- \"topic\": a two or three word topic for the text\n");
    prompt.push_str(&format!(
        "- \"tags\": a JSON array of at most {} short tags for the text\n",
        MAX_TAGS
    ));
    prompt.push_str(&format!(
        "- \"sentiment\": {}, where the lowest value is negative and the highest is positive\n",
        range
    ));
    prompt.push_str(&format!(
        "- \"urgency\": {}, where the lowest value is not urgent and the highest is very urgent\n",
        range
    ));
    prompt.push_str(&format!(
        "- \"descriptive_normative\": {}, where the lowest value is descriptive (\"is\", \"are\") and the highest is normative (\"should\", \"ought\", \"must\")\n",
        range
    ));
    prompt.push_str(&format!(
        "- \"questioning\": {}, where the lowest value means no questions contained and the highest means many questions contained\n",
        range
    ));
    prompt.push_str("\nReply with the JSON object only.\n\nTranscript excerpt:\n");
    prompt.push_str(text);

    prompt
}
