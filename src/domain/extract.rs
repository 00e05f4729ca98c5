//! Extraction of structured output from free-form completion text.

const JSON_START_MARKER: &str = "```json";
const JSON_END_MARKER: &str = "```";

/// Extract the first fenced JSON block from completion text.
///
/// Returns `None` when the markers are missing or the interior is not valid
/// JSON; malformed model output is not an error at this layer.
pub fn extract_json_between_markers(llm_output: &str) -> Option<serde_json::Value> {
    let start = llm_output.find(JSON_START_MARKER)? + JSON_START_MARKER.len();
    let end = llm_output[start..].find(JSON_END_MARKER)? + start;

    let json_string = llm_output[start..end].trim();
    serde_json::from_str(json_string).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_fenced_json() {
        let output = "THOUGHT: done.\n```json\n{\"Query\": \"topic\"}\n```";
        let value = extract_json_between_markers(output).unwrap();
        assert_eq!(value["Query"], "topic");
    }

    #[test]
    fn test_missing_start_marker() {
        assert!(extract_json_between_markers("{\"Query\": \"topic\"}").is_none());
    }

    #[test]
    fn test_missing_end_marker() {
        assert!(extract_json_between_markers("```json\n{\"Query\": \"topic\"}").is_none());
    }

    #[test]
    fn test_invalid_json_interior() {
        assert!(extract_json_between_markers("```json\nnot json at all\n```").is_none());
    }
}
