use super::{acquire_snapshot, build_answer_context, build_docs_context, RepoSnapshot};
use crate::app_error::AppError;
use crate::github::ContentFetcher;
use crate::prompt::build_answer_prompt;
use crate::tree::FileEntry;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

#[derive(Default)]
struct MockFetcher {
    metadata: Option<Value>,
    readme: Option<String>,
    root_listing: Option<Vec<FileEntry>>,
    files: HashMap<String, String>,
    file_calls: Mutex<Vec<String>>,
    rate_limited: bool,
}

impl ContentFetcher for MockFetcher {
    fn fetch_repo_metadata<'a>(
        &'a self,
        _owner: &'a str,
        _repo: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>, AppError>> + Send + 'a>> {
        let result = if self.rate_limited {
            Err(AppError::RateLimited("API rate limit exceeded".to_string()))
        } else {
            Ok(self.metadata.clone())
        };
        Box::pin(async move { result })
    }

    fn fetch_listing<'a>(
        &'a self,
        _owner: &'a str,
        _repo: &'a str,
        path: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<FileEntry>>, AppError>> + Send + 'a>> {
        let result = match path {
            None => self.root_listing.clone(),
            Some(_) => None,
        };
        Box::pin(async move { Ok(result) })
    }

    fn fetch_readme<'a>(
        &'a self,
        _owner: &'a str,
        _repo: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AppError>> + Send + 'a>> {
        let result = self.readme.clone();
        Box::pin(async move { Ok(result) })
    }

    fn fetch_file<'a>(
        &'a self,
        _owner: &'a str,
        _repo: &'a str,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, AppError>> + Send + 'a>> {
        self.file_calls.lock().unwrap().push(path.to_string());
        let result = self.files.get(path).cloned();
        Box::pin(async move { Ok(result) })
    }
}

#[tokio::test]
async fn test_snapshot_carries_description_readme_and_entries() {
    let fetcher = MockFetcher {
        metadata: Some(json!({ "description": "a widget library" })),
        readme: Some("# Widgets".to_string()),
        root_listing: Some(vec![FileEntry::file("package.json")]),
        ..Default::default()
    };

    let snapshot = acquire_snapshot(&fetcher, "alice", "widgets").await.unwrap();
    assert_eq!(snapshot.description.as_deref(), Some("a widget library"));
    assert_eq!(snapshot.readme.as_deref(), Some("# Widgets"));
    assert_eq!(snapshot.entries.len(), 1);
}

#[tokio::test]
async fn test_snapshot_tolerates_everything_absent() {
    let fetcher = MockFetcher::default();
    let snapshot = acquire_snapshot(&fetcher, "alice", "widgets").await.unwrap();
    assert!(snapshot.description.is_none());
    assert!(snapshot.readme.is_none());
    assert!(snapshot.entries.is_empty());
}

#[tokio::test]
async fn test_rate_limit_propagates_from_acquisition() {
    let fetcher = MockFetcher {
        rate_limited: true,
        ..Default::default()
    };
    let result = acquire_snapshot(&fetcher, "alice", "widgets").await;
    assert!(matches!(result, Err(AppError::RateLimited(_))));
}

#[tokio::test]
async fn test_explicit_file_question_fetches_exactly_that_path() {
    let mut files = HashMap::new();
    files.insert(
        "src/index.ts".to_string(),
        "export const answer = 42;".to_string(),
    );
    let fetcher = MockFetcher {
        root_listing: Some(vec![
            FileEntry::file("package.json"),
            FileEntry::file("src/index.ts"),
            FileEntry::file("src/app/page.tsx"),
        ]),
        files,
        ..Default::default()
    };

    let snapshot = acquire_snapshot(&fetcher, "alice", "widgets").await.unwrap();
    let ctx = build_answer_context(
        &fetcher,
        "alice",
        "widgets",
        &snapshot,
        "Show me the code in src/index.ts",
    )
    .await
    .unwrap();

    assert_eq!(
        *fetcher.file_calls.lock().unwrap(),
        vec!["src/index.ts".to_string()]
    );

    let prompt = build_answer_prompt(&ctx, "Show me the code in src/index.ts");
    assert!(prompt.contains("```typescript\nexport const answer = 42;\n```"));
}

#[tokio::test]
async fn test_unfetchable_selected_file_is_skipped() {
    let fetcher = MockFetcher {
        root_listing: Some(vec![
            FileEntry::file("src/index.ts"),
            FileEntry::file("src/app/[slug]/page.tsx"),
        ]),
        // No file bodies registered at all.
        ..Default::default()
    };

    let snapshot = acquire_snapshot(&fetcher, "alice", "widgets").await.unwrap();
    let ctx = build_answer_context(
        &fetcher,
        "alice",
        "widgets",
        &snapshot,
        "Show me the code in src/index.ts",
    )
    .await
    .unwrap();

    assert!(ctx.files.is_empty());
    assert_eq!(ctx.owner, "alice");
}

#[tokio::test]
async fn test_listing_is_rendered_from_snapshot() {
    let fetcher = MockFetcher {
        root_listing: Some(vec![
            FileEntry::file("README.md"),
            FileEntry::file("src/index.ts"),
        ]),
        ..Default::default()
    };

    let snapshot = acquire_snapshot(&fetcher, "alice", "widgets").await.unwrap();
    let ctx = build_docs_context("alice", "widgets", &snapshot);
    let listing = ctx.listing.unwrap();
    assert!(listing.contains("src/"));
    assert!(listing.contains("  index.ts"));
    assert!(listing.contains("README.md"));
    assert!(ctx.files.is_empty());
}

#[tokio::test]
async fn test_empty_snapshot_has_no_listing() {
    let snapshot = RepoSnapshot::default();
    let ctx = build_docs_context("alice", "widgets", &snapshot);
    assert!(ctx.listing.is_none());
}
