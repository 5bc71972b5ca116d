use crate::app_error::AppError;
use crate::config::Config;
use crate::context_builder::{self, RepoSnapshot};
use crate::github::{ContentFetcher, GithubClient};
use crate::llm::{self, CompletionApi};
use crate::llm::api::GeminiClient;
use crate::logger::Logger;
use crate::prompt;
use crate::session::ChatSession;
use tokio::io::{AsyncBufReadExt, BufReader};

const ANSWER_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Answers a single question about the repository.
pub async fn run(config: &Config, logger: &Logger, question: &str) -> Result<(), AppError> {
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

    let markdown = answer_one(&fetcher, &gemini, config, logger, &snapshot, question, 1).await?;
    println!("\n{markdown}");
    Ok(())
}

/// Interactive session: one question per line on stdin, answered in turn.
/// Messages accumulate in an in-memory, append-only session and are written
/// to the log directory when the session ends.
pub async fn run_chat(config: &Config, logger: &Logger) -> Result<(), AppError> {
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

    println!("Ask about {}/{} (empty line or 'exit' to quit).", config.owner, config.repo);

    let mut session = ChatSession::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut round = 1;

    loop {
        println!();
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let question = line.trim();
        if question.is_empty() || question == "exit" {
            break;
        }

        session.push_user(question);
        let markdown =
            answer_one(&fetcher, &gemini, config, logger, &snapshot, question, round).await?;
        session.push_assistant(&markdown);
        println!("\n{markdown}");
        round += 1;
    }

    if !session.is_empty() {
        let transcript = serde_json::to_value(session.messages())?;
        logger.log_json("session.json", &transcript)?;
    }

    Ok(())
}

/// One question end to end: select and fetch context, assemble the prompt,
/// run the completion. Failures come back as user-facing markdown, never as
/// raw errors.
async fn answer_one(
    fetcher: &dyn ContentFetcher,
    gemini: &dyn CompletionApi,
    config: &Config,
    logger: &Logger,
    snapshot: &RepoSnapshot,
    question: &str,
    round: usize,
) -> Result<String, AppError> {
    let ctx = match context_builder::build_answer_context(
        fetcher,
        &config.owner,
        &config.repo,
        snapshot,
        question,
    )
    .await
    {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.to_user_markdown()),
    };

    let prompt_text = prompt::build_answer_prompt(&ctx, question);
    let log_prefix = format!("{round}-answer");

    match llm::query(gemini, &prompt_text, ANSWER_MAX_OUTPUT_TOKENS, logger, &log_prefix).await {
        Ok(text) => Ok(text),
        Err(e) => Ok(e.to_user_markdown()),
    }
}
