use thiserror::Error;


#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No Gemini API key is configured.")]
    MissingApiKey,

    #[error("The configured Gemini API key is malformed.")]
    InvalidApiKey,

    #[error("HTTP Request Error: {0}")]
    Network(String),

    #[error("HTTP {status} with body:\n{body}")]
    Http { status: u16, body: String },

    #[error("Rate limited by the remote API: {0}")]
    RateLimited(String),

    #[error("JSON Serialization/Deserialization Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response Parsing Error: {0}")]
    ResponseParsing(String),

    #[error("The API call succeeded but the response contained no text.")]
    EmptyResponse,
}

impl AppError {
    /// Translates a failure into the markdown shown to the user. Raw errors
    /// never reach the user; every path degrades to an explanatory string.
    pub fn to_user_markdown(&self) -> String {
        match self {
            AppError::MissingApiKey => "**No API key configured.**\n\n\
                Set the `GEMINI_API_KEY` environment variable to a Google AI Studio key \
                and try again."
                .to_string(),
            AppError::InvalidApiKey => "**The configured API key looks invalid.**\n\n\
                Gemini API keys start with `AIza`. Double-check the value of \
                `GEMINI_API_KEY` for typos or stray whitespace."
                .to_string(),
            AppError::RateLimited(detail) => format!(
                "**Rate limited by the remote API.**\n\n\
                {detail}\n\n\
                Anonymous GitHub requests have a low hourly quota. Set `GITHUB_TOKEN` \
                to a personal access token to raise it, or wait and retry."
            ),
            AppError::Http { status, .. } => format!(
                "**The remote API returned HTTP {status}.**\n\n\
                This is usually transient. A 4xx may mean the repository name is wrong \
                or the key lacks access to it."
            ),
            AppError::Network(detail) => format!(
                "**Could not reach the remote API.**\n\n\
                {detail}\n\n\
                Check your network connection and try again."
            ),
            AppError::EmptyResponse => "**The model returned an empty response.**\n\n\
                This occasionally happens when the prompt trips a safety filter. \
                Try rephrasing the question."
                .to_string(),
            other => format!("**Something went wrong.**\n\n{other}"),
        }
    }
}
