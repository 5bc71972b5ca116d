use crate::app_error::AppError;
use crate::cli::CliArgs;

#[cfg(test)]
mod config_test;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Built once at startup and read-only thereafter. Both API clients take
/// their credentials from here; there is no global key state.
#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub model: String,
    pub gemini_api_key: String,
    pub github_token: Option<String>,
}

impl Config {
    pub fn load(args: &CliArgs) -> Result<Self, AppError> {
        let (owner, repo) = split_repo_arg(&args.repo)?;

        // A missing Gemini key is not a load failure. The completion client
        // reports it at call time so the user sees the explanatory markdown.
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .unwrap_or_default();

        let github_token = std::env::var("GITHUB_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            owner,
            repo,
            model: args
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_key,
            github_token,
        })
    }
}

pub(crate) fn split_repo_arg(arg: &str) -> Result<(String, String), AppError> {
    let mut parts = arg.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(AppError::Config(format!(
            "Repository must be given as 'owner/name', got '{arg}'."
        ))),
    }
}
