use crate::app_error::AppError;
use crate::tree::{EntryKind, FileEntry};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub mod structure;

#[cfg(test)]
mod api_test;

const GITHUB_API_BASE: &str = "https://api.github.com";
const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

// Raw-content fallback branches, tried in order after the contents API.
const FALLBACK_BRANCHES: &[&str] = &["main", "master"];

/// Seam over the hosting API so the context builder can be exercised without
/// the network. Every method returns `None` for "could not retrieve"; the one
/// error that propagates is `AppError::RateLimited`.
pub trait ContentFetcher: Send + Sync {
    fn fetch_repo_metadata<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>, AppError>> + Send + 'a>>;

    fn fetch_listing<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<FileEntry>>, AppError>> + Send + 'a>>;

    fn fetch_readme<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AppError>> + Send + 'a>>;

    fn fetch_file<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AppError>> + Send + 'a>>;
}

pub struct GithubClient {
    client: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token,
        }
    }

    /// GET a GitHub API URL as JSON. Transport and parse failures become
    /// `None` at this boundary; only rate limiting surfaces as an error.
    async fn get_json(&self, url: &str) -> Result<Option<Value>, AppError> {
        let mut request = self
            .client
            .get(url)
            .header("User-Agent", "repoqa")
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = match request.send().await {
            Ok(r) => r,
            Err(_) => return Ok(None),
        };

        let status = resp.status().as_u16();
        let text = match resp.text().await {
            Ok(t) => t,
            Err(_) => return Ok(None),
        };

        if is_rate_limited(status, &text) {
            return Err(AppError::RateLimited(first_line(&text)));
        }
        if !(200..300).contains(&status) {
            return Ok(None);
        }

        Ok(serde_json::from_str(&text).ok())
    }

    async fn get_raw(&self, url: &str) -> Result<Option<String>, AppError> {
        let resp = match self
            .client
            .get(url)
            .header("User-Agent", "repoqa")
            .send()
            .await
        {
            Ok(r) => r,
            Err(_) => return Ok(None),
        };
        if !resp.status().is_success() {
            return Ok(None);
        }
        Ok(resp.text().await.ok())
    }

    async fn metadata(&self, owner: &str, repo: &str) -> Result<Option<Value>, AppError> {
        let url = format!("{GITHUB_API_BASE}/repos/{owner}/{repo}");
        self.get_json(&url).await
    }

    async fn listing(
        &self,
        owner: &str,
        repo: &str,
        path: Option<&str>,
    ) -> Result<Option<Vec<FileEntry>>, AppError> {
        let url = match path {
            Some(p) => format!("{GITHUB_API_BASE}/repos/{owner}/{repo}/contents/{p}"),
            None => format!("{GITHUB_API_BASE}/repos/{owner}/{repo}/contents"),
        };
        let json = match self.get_json(&url).await? {
            Some(v) => v,
            None => return Ok(None),
        };
        Ok(parse_listing(&json))
    }

    async fn readme(&self, owner: &str, repo: &str) -> Result<Option<String>, AppError> {
        let url = format!("{GITHUB_API_BASE}/repos/{owner}/{repo}/readme");
        let json = match self.get_json(&url).await? {
            Some(v) => v,
            None => return Ok(None),
        };
        Ok(decode_content_payload(&json))
    }

    /// Tries the contents API for the exact path, then the raw-content URL
    /// against `main`, then `master`. First success wins; all-fail is `None`.
    async fn file(&self, owner: &str, repo: &str, path: &str) -> Result<Option<String>, AppError> {
        let url = format!("{GITHUB_API_BASE}/repos/{owner}/{repo}/contents/{path}");
        if let Some(json) = self.get_json(&url).await? {
            if let Some(content) = decode_content_payload(&json) {
                return Ok(Some(content));
            }
        }

        for branch in FALLBACK_BRANCHES {
            let raw_url = format!("{RAW_CONTENT_BASE}/{owner}/{repo}/{branch}/{path}");
            if let Some(content) = self.get_raw(&raw_url).await? {
                return Ok(Some(content));
            }
        }

        Ok(None)
    }
}

impl ContentFetcher for GithubClient {
    fn fetch_repo_metadata<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>, AppError>> + Send + 'a>> {
        Box::pin(self.metadata(owner, repo))
    }

    fn fetch_listing<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<FileEntry>>, AppError>> + Send + 'a>> {
        Box::pin(self.listing(owner, repo, path))
    }

    fn fetch_readme<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AppError>> + Send + 'a>> {
        Box::pin(self.readme(owner, repo))
    }

    fn fetch_file<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AppError>> + Send + 'a>> {
        Box::pin(self.file(owner, repo, path))
    }
}

/// Parses a contents-API directory listing. Non-array payloads (a file body,
/// an error object) and entry types other than file/dir are skipped.
pub(crate) fn parse_listing(json: &Value) -> Option<Vec<FileEntry>> {
    let items = json.as_array()?;
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let path = item.get("path").and_then(|v| v.as_str())?;
        let name = item.get("name").and_then(|v| v.as_str())?;
        let kind = match item.get("type").and_then(|v| v.as_str()) {
            Some("file") => EntryKind::File,
            Some("dir") => EntryKind::Dir,
            _ => continue,
        };
        let size = item.get("size").and_then(|v| v.as_u64());
        entries.push(FileEntry {
            path: path.to_string(),
            name: name.to_string(),
            kind,
            size,
        });
    }
    Some(entries)
}

/// Decodes a contents-API payload carrying `{content, encoding: "base64"}`.
/// GitHub wraps the base64 text with newlines, which are stripped first.
pub(crate) fn decode_content_payload(json: &Value) -> Option<String> {
    let content = json.get("content")?.as_str()?;
    match json.get("encoding").and_then(|v| v.as_str()) {
        Some("base64") => decode_base64_text(content),
        // The API always base64-encodes today; anything else passes through.
        _ => Some(content.to_string()),
    }
}

pub(crate) fn decode_base64_text(encoded: &str) -> Option<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact).ok()?;
    String::from_utf8(bytes).ok()
}

pub(crate) fn is_rate_limited(status: u16, body: &str) -> bool {
    matches!(status, 403 | 429) && body.to_lowercase().contains("rate limit")
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("").trim().to_string()
}

/// Heuristic, not a verified constraint: paths with bracket or parenthesis
/// segments (framework route groups like `[id]` or `(auth)`) were observed
/// to fail raw-content fetches more often than ordinary paths. Used only to
/// pick a better explanation for an absent file.
pub fn likely_blocked_by_route_naming(path: &str) -> bool {
    path.split('/')
        .any(|segment| segment.starts_with('[') || segment.starts_with('('))
}
