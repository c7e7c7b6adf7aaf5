//! Round-trip and defaulting tests for the suggestion wire types.

use sous_common::{ErrorBody, RecipeSuggestion, SuggestionResponse};

/// Helper to build a fully-populated suggestion
fn make_suggestion(name: &str) -> RecipeSuggestion {
    RecipeSuggestion {
        name: name.to_string(),
        description: format!("A test recipe called {}", name),
        ingredients: vec!["2 eggs".to_string(), "100g flour".to_string()],
        instructions: vec!["Mix.".to_string(), "Bake.".to_string()],
    }
}

#[test]
fn suggestion_response_round_trips() {
    let response = SuggestionResponse {
        suggestions: vec![make_suggestion("Omelette"), make_suggestion("Pancakes")],
    };

    let json = serde_json::to_string(&response).unwrap();
    let parsed: SuggestionResponse = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, response);
}

#[test]
fn round_trip_preserves_ingredient_and_instruction_order() {
    let suggestion = RecipeSuggestion {
        name: "Stew".to_string(),
        description: "Slow".to_string(),
        ingredients: vec!["c".into(), "a".into(), "b".into()],
        instructions: vec!["third".into(), "first".into(), "second".into()],
    };

    let json = serde_json::to_string(&suggestion).unwrap();
    let parsed: RecipeSuggestion = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.ingredients, vec!["c", "a", "b"]);
    assert_eq!(parsed.instructions, vec!["third", "first", "second"]);
}

#[test]
fn missing_fields_deserialize_as_empty() {
    let parsed: RecipeSuggestion = serde_json::from_str(r#"{"name":"Toast"}"#).unwrap();

    assert_eq!(parsed.name, "Toast");
    assert!(parsed.description.is_empty());
    assert!(parsed.ingredients.is_empty());
    assert!(parsed.instructions.is_empty());
}

#[test]
fn error_body_skips_absent_details() {
    let body = ErrorBody::new("boom");
    let json = serde_json::to_string(&body).unwrap();
    assert_eq!(json, r#"{"error":"boom"}"#);

    let body = ErrorBody::with_details("boom", "the fuse blew");
    let json = serde_json::to_string(&body).unwrap();
    assert!(json.contains(r#""details":"the fuse blew""#));
}
