pub mod api;


use crate::app_error::AppError;
use crate::logger::Logger;
use api::GeminiClient;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

pub use api::DEFAULT_TEMPERATURE;

/// Seam over the completion service so workflows can be exercised with a
/// mock in tests.
pub trait CompletionApi: Send + Sync {
    fn model_name(&self) -> &str;
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Pin<Box<dyn Future<Output = Result<String, AppError>> + Send + 'a>>;
}

impl CompletionApi for GeminiClient {
    fn model_name(&self) -> &str {
        GeminiClient::model_name(self)
    }

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Pin<Box<dyn Future<Output = Result<String, AppError>> + Send + 'a>> {
        Box::pin(GeminiClient::complete(
            self,
            prompt,
            max_output_tokens,
            temperature,
        ))
    }
}

/// Runs one completion, logging the prompt and the outcome (with timing)
/// either way.
pub async fn query(
    api_client: &dyn CompletionApi,
    prompt: &str,
    max_output_tokens: u32,
    logger: &Logger,
    log_prefix: &str,
) -> Result<String, AppError> {
    logger.log_text(&format!("{log_prefix}-prompt.txt"), prompt)?;

    let start_time = Instant::now();
    let result = api_client
        .complete(prompt, max_output_tokens, DEFAULT_TEMPERATURE)
        .await;
    let duration = start_time.elapsed();

    println!(
        "LLM call to {} took {:.3}s",
        api_client.model_name(),
        duration.as_secs_f64()
    );

    match result {
        Ok(text) => {
            logger.log_text(&format!("{log_prefix}-response.txt"), &text)?;
            Ok(text)
        }
        Err(e) => {
            let error_json = json!({
                "error": e.to_string(),
                "totalResponseTime": duration.as_millis(),
            });
            logger.log_json(&format!("{log_prefix}-response.json"), &error_json)?;
            Err(e)
        }
    }
}
