//! Extraction of structured suggestions from model free text.
//!
//! Two strategies, matched to the upstream shape: strict (the whole
//! text must parse as JSON) and scan (first `[` through last `]`).
//! The bracket scan is a best-effort heuristic, not a grammar; it is
//! kept behind this one function so a structured-output upstream mode
//! can replace it without touching the rest of the daemon.

use serde_json::Value;
use sous_common::{RecipeSuggestion, SuggestError};

/// How to locate the JSON array inside the model's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Parse the entire text as JSON. For upstreams expected to
    /// return pure JSON (chat completions).
    Strict,
    /// Slice from the first `[` to the last `]` and parse that. For
    /// upstreams that wrap the array in explanatory prose.
    Scan,
}

/// Extract a non-empty list of suggestions from model output.
///
/// Never returns a partial result: any malformed element fails the
/// whole extraction.
pub fn extract_suggestions(
    text: &str,
    mode: ExtractionMode,
) -> Result<Vec<RecipeSuggestion>, SuggestError> {
    let candidate = match mode {
        ExtractionMode::Strict => text,
        ExtractionMode::Scan => scan_array(text)?,
    };

    let value: Value =
        serde_json::from_str(candidate).map_err(|e| SuggestError::Parse(e.to_string()))?;

    let items = value.as_array().ok_or(SuggestError::InvalidFormat)?;
    if items.is_empty() {
        return Err(SuggestError::InvalidFormat);
    }

    let mut suggestions = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_object() {
            return Err(SuggestError::InvalidFormat);
        }
        // Fields default when absent; only type mismatches fail here.
        let suggestion: RecipeSuggestion =
            serde_json::from_value(item.clone()).map_err(|e| SuggestError::Parse(e.to_string()))?;
        suggestions.push(suggestion);
    }

    Ok(suggestions)
}

/// Find the array slice between the first `[` and the last `]`.
fn scan_array(text: &str) -> Result<&str, SuggestError> {
    let start = text.find('[').ok_or(SuggestError::NoJsonFound)?;
    let end = text.rfind(']').ok_or(SuggestError::NoJsonFound)?;
    if end <= start {
        return Err(SuggestError::NoJsonFound);
    }
    Ok(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_RECIPE: &str =
        r#"[{"name":"X","description":"d","ingredients":["a"],"instructions":["b"]}]"#;

    #[test]
    fn test_strict_parses_pure_json() {
        let suggestions = extract_suggestions(ONE_RECIPE, ExtractionMode::Strict).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "X");
        assert_eq!(suggestions[0].ingredients, vec!["a"]);
    }

    #[test]
    fn test_strict_rejects_surrounding_prose() {
        let text = format!("Here you go: {}", ONE_RECIPE);
        let err = extract_suggestions(&text, ExtractionMode::Strict).unwrap_err();
        assert!(matches!(err, SuggestError::Parse(_)));
    }

    #[test]
    fn test_scan_extracts_array_embedded_in_prose() {
        let text = format!("Here are some ideas: {} Enjoy!", ONE_RECIPE);
        let suggestions = extract_suggestions(&text, ExtractionMode::Scan).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "X");
        assert_eq!(suggestions[0].description, "d");
        assert_eq!(suggestions[0].instructions, vec!["b"]);
    }

    #[test]
    fn test_scan_without_brackets_is_no_json() {
        let err = extract_suggestions("no recipes today, sorry", ExtractionMode::Scan).unwrap_err();
        assert!(matches!(err, SuggestError::NoJsonFound));
    }

    #[test]
    fn test_scan_with_only_opening_bracket_is_no_json() {
        let err = extract_suggestions("well [ this never closes", ExtractionMode::Scan).unwrap_err();
        assert!(matches!(err, SuggestError::NoJsonFound));
    }

    #[test]
    fn test_scan_with_closing_before_opening_is_no_json() {
        let err = extract_suggestions("] backwards [", ExtractionMode::Scan).unwrap_err();
        assert!(matches!(err, SuggestError::NoJsonFound));
    }

    #[test]
    fn test_empty_array_is_invalid_format() {
        let err = extract_suggestions("[]", ExtractionMode::Strict).unwrap_err();
        assert!(matches!(err, SuggestError::InvalidFormat));

        let err = extract_suggestions("Nothing found: []", ExtractionMode::Scan).unwrap_err();
        assert!(matches!(err, SuggestError::InvalidFormat));
    }

    #[test]
    fn test_non_array_is_invalid_format() {
        let err = extract_suggestions(r#"{"name":"X"}"#, ExtractionMode::Strict).unwrap_err();
        assert!(matches!(err, SuggestError::InvalidFormat));
    }

    #[test]
    fn test_non_object_element_is_invalid_format() {
        let err = extract_suggestions(r#"["just a string"]"#, ExtractionMode::Strict).unwrap_err();
        assert!(matches!(err, SuggestError::InvalidFormat));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let suggestions =
            extract_suggestions(r#"[{"name":"Toast"}]"#, ExtractionMode::Strict).unwrap();
        assert_eq!(suggestions[0].name, "Toast");
        assert!(suggestions[0].description.is_empty());
        assert!(suggestions[0].ingredients.is_empty());
    }

    #[test]
    fn test_garbled_json_is_parse_error() {
        let err = extract_suggestions("drop it [{oops]", ExtractionMode::Scan).unwrap_err();
        assert!(matches!(err, SuggestError::Parse(_)));
    }

    #[test]
    fn test_all_elements_preserved_in_order() {
        let text = r#"[
            {"name":"A","description":"1","ingredients":["x"],"instructions":["s"]},
            {"name":"B","description":"2","ingredients":["y"],"instructions":["t"]},
            {"name":"C","description":"3","ingredients":["z"],"instructions":["u"]}
        ]"#;
        let suggestions = extract_suggestions(text, ExtractionMode::Strict).unwrap();
        assert_eq!(suggestions.len(), 3);
        let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
