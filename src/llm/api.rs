use crate::app_error::AppError;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Gemini API keys issued by Google AI Studio carry this fixed prefix. The
/// check runs before any network call so a malformed key fails fast.
pub const API_KEY_PREFIX: &str = "AIza";

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model_name: String,
    api_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model_name: &str) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .tcp_keepalive(Some(Duration::from_secs(30)))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .unwrap_or_else(|_| Client::new());
        let api_url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model_name}:generateContent"
        );
        Self {
            client,
            api_key,
            model_name: model_name.to_string(),
            api_url,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub(crate) fn validate_key(&self) -> Result<(), AppError> {
        if self.api_key.is_empty() {
            return Err(AppError::MissingApiKey);
        }
        if !self.api_key.starts_with(API_KEY_PREFIX) {
            return Err(AppError::InvalidApiKey);
        }
        Ok(())
    }

    pub(crate) fn build_request_body(
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_output_tokens
            }
        })
    }

    /// Single attempt, no retries; failures are for the caller to translate
    /// into user-facing markdown.
    pub async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, AppError> {
        self.validate_key()?;

        let request_body = Self::build_request_body(prompt, max_output_tokens, temperature);
        // The key travels as a query parameter, so every error path below
        // censors it out of anything that may be logged or displayed.
        let url = format!("{}?key={}", self.api_url, self.api_key);

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Network(censor_api_key(&e.to_string(), &self.api_key)))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| AppError::Network(censor_api_key(&e.to_string(), &self.api_key)))?;

        if !(200..300).contains(&status) {
            let body = censor_api_key(&text, &self.api_key);
            if crate::github::is_rate_limited(status, &body) || status == 429 {
                return Err(AppError::RateLimited(body));
            }
            return Err(AppError::Http { status, body });
        }

        let response_json: Value = serde_json::from_str(&text).map_err(|e| {
            AppError::ResponseParsing(format!("Invalid JSON in success response: {e}"))
        })?;

        extract_text(&response_json)
    }
}

/// Pulls the answer out of `candidates[0].content.parts[0].text`, joining
/// all parts when the model returns more than one.
pub(crate) fn extract_text(response: &Value) -> Result<String, AppError> {
    let parts_array = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or(AppError::EmptyResponse)?;

    let text_segments: Vec<&str> = parts_array
        .iter()
        .filter_map(|part| part.get("text"))
        .filter_map(|text_val| text_val.as_str())
        .collect();

    if text_segments.is_empty() {
        return Err(AppError::EmptyResponse);
    }

    Ok(text_segments.join(""))
}

pub(crate) fn censor_api_key(text: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return text.to_string();
    }
    // Only censor things that look like keys. Very short strings are unlikely to be keys.
    let censored_key = if api_key.len() > 8 {
        format!("...{}", &api_key[api_key.len() - 4..])
    } else {
        "...".to_string()
    };
    text.replace(api_key, &censored_key)
}
