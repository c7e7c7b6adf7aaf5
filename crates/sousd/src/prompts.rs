//! Fixed instruction preamble for the suggestion upstream call.
//!
//! The preamble is constant across requests and is never influenced by
//! caller input; the caller's prompt is appended verbatim as the task
//! content.

/// System/style instructions defining the required output shape.
pub const SUGGESTION_SYSTEM_PROMPT: &str = r#"You are a creative recipe assistant.

Given the user's available ingredients or cravings, suggest 3 recipes.

For each recipe provide:
- a creative name
- a brief description
- a list of ingredients
- step-by-step instructions

Respond ONLY with a JSON array of objects in this exact shape:
[
  {
    "name": "...",
    "description": "...",
    "ingredients": ["...", "..."],
    "instructions": ["...", "..."]
  }
]

Do not include any text outside the JSON array."#;

/// Build the user-side content for the upstream call.
pub fn build_user_prompt(prompt: &str) -> String {
    format!("Suggest recipes based on: {}", prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_echoes_caller_text() {
        let built = build_user_prompt("eggs, flour and too much basil");
        assert!(built.contains("eggs, flour and too much basil"));
    }
}
