mod answer;
mod app_error;
mod cli;
mod config;
mod context_builder;
mod docs;
mod github;
mod llm;
mod logger;
mod prompt;
mod session;
mod tree;

#[cfg(test)]
mod session_test;

use crate::app_error::AppError;
use crate::cli::Workflow;
use std::process::exit;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => exit(0),
        Err(e) => {
            eprintln!("An error occurred: {e}");
            exit(1);
        }
    }
}

async fn run() -> Result<(), AppError> {
    let cli_args = cli::parse_cli_args()?;
    let config = config::Config::load(&cli_args)?;

    let logger_suffix = match cli_args.workflow {
        Workflow::Answer => "answer",
        Workflow::Chat => "chat",
        Workflow::Docs => "docs",
    };
    let logger = logger::Logger::new(logger_suffix)?;
    println!("Log directory: {}", logger.log_dir().display());

    let result = match cli_args.workflow {
        Workflow::Answer => {
            // parse_cli_args guarantees a question for this workflow.
            let question = cli_args.question.as_deref().unwrap_or_default();
            answer::run(&config, &logger, question).await
        }
        Workflow::Chat => answer::run_chat(&config, &logger).await,
        Workflow::Docs => docs::run(&config, &logger).await,
    };

    if let Err(e) = &result {
        let _ = logger.log_text("final_error.txt", &e.to_string());
    }

    result
}
