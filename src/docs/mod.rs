use crate::app_error::AppError;
use crate::config::Config;
use crate::context_builder;
use crate::github::GithubClient;
use crate::llm;
use crate::llm::api::GeminiClient;
use crate::logger::Logger;
use crate::prompt;

const DOCS_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Generates developer documentation for the repository from its README and
/// bounded structure snapshot. No individual files are fetched on this path.
pub async fn run(config: &Config, logger: &Logger) -> Result<(), AppError> {
    let fetcher = GithubClient::new(config.github_token.clone());
    let gemini = GeminiClient::new(config.gemini_api_key.clone(), &config.model);

    println!("Fetching repository structure for {}/{}...", config.owner, config.repo);
    let snapshot = match context_builder::acquire_snapshot(&fetcher, &config.owner, &config.repo).await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            println!("\n{}", e.to_user_markdown());
            return Ok(());
        }
    };

    let ctx = context_builder::build_docs_context(&config.owner, &config.repo, &snapshot);
    let prompt_text = prompt::build_docs_prompt(&ctx);

    match llm::query(&gemini, &prompt_text, DOCS_MAX_OUTPUT_TOKENS, logger, "docs").await {
        Ok(markdown) => {
            println!("\n{markdown}");
            logger.log_text("documentation.md", &markdown)?;
        }
        Err(e) => println!("\n{}", e.to_user_markdown()),
    }

    Ok(())
}
