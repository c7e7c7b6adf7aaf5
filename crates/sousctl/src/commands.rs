//! Command implementations for sousctl.

use anyhow::{anyhow, Result};
use console::style;
use sous_common::{ErrorBody, HealthResponse, PromptRequest, SuggestionResponse};

pub async fn suggest(url: &str, prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(anyhow!(
            "nothing to work with - try: sousctl suggest \"eggs, spinach, leftover rice\""
        ));
    }

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/v1/suggestions", url))
        .json(&PromptRequest {
            prompt: prompt.to_string(),
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let err: ErrorBody = response
            .json()
            .await
            .unwrap_or_else(|_| ErrorBody::new(format!("daemon returned {}", status)));
        let detail = err
            .details
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        return Err(anyhow!("{}{}", err.error, detail));
    }

    let suggestions: SuggestionResponse = response.json().await?;

    for (i, recipe) in suggestions.suggestions.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            style(format!("{}.", i + 1)).dim(),
            style(&recipe.name).bold().green()
        );
        if !recipe.description.is_empty() {
            println!("   {}", style(&recipe.description).italic());
        }
        if !recipe.ingredients.is_empty() {
            println!("   {}", style("Ingredients").bold());
            for ingredient in &recipe.ingredients {
                println!("   - {}", ingredient);
            }
        }
        if !recipe.instructions.is_empty() {
            println!("   {}", style("Steps").bold());
            for (n, step) in recipe.instructions.iter().enumerate() {
                println!("   {}. {}", n + 1, step);
            }
        }
    }
    println!();

    Ok(())
}

pub async fn health(url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let health: HealthResponse = client
        .get(format!("{}/v1/health", url))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!(
        "{} {} v{} (up {}s, upstream: {})",
        style("sousd:").bold(),
        health.status,
        health.version,
        health.uptime_seconds,
        health.upstream
    );

    Ok(())
}
