pub mod relevance;

#[cfg(test)]
mod context_assembly_test;

use crate::app_error::AppError;
use crate::github::{likely_blocked_by_route_naming, structure, ContentFetcher};
use crate::prompt::{PromptContext, SelectedFile};
use crate::tree::{build_hierarchy, file_paths, render_listing, FileEntry};

/// Everything fetched once per repository view: the bounded structure
/// snapshot, the README, and the repo description. Immutable after
/// acquisition; refreshing means fetching a whole new snapshot.
#[derive(Debug, Default)]
pub struct RepoSnapshot {
    pub entries: Vec<FileEntry>,
    pub readme: Option<String>,
    pub description: Option<String>,
}

pub async fn acquire_snapshot(
    fetcher: &dyn ContentFetcher,
    owner: &str,
    repo: &str,
) -> Result<RepoSnapshot, AppError> {
    let description = fetcher
        .fetch_repo_metadata(owner, repo)
        .await?
        .and_then(|m| {
            m.get("description")
                .and_then(|d| d.as_str())
                .map(|d| d.to_string())
        });

    let readme = fetcher.fetch_readme(owner, repo).await?;
    let entries = structure::fetch_structure(fetcher, owner, repo).await?;

    Ok(RepoSnapshot {
        entries,
        readme,
        description,
    })
}

/// Builds the prompt context for one question: runs the relevance selector
/// over the snapshot's file paths, then makes the second fetch pass for the
/// selected files. An unfetchable file is skipped with a note, never fatal.
pub async fn build_answer_context(
    fetcher: &dyn ContentFetcher,
    owner: &str,
    repo: &str,
    snapshot: &RepoSnapshot,
    question: &str,
) -> Result<PromptContext, AppError> {
    let paths = file_paths(&snapshot.entries);
    let selected = relevance::select_relevant_files(question, &paths);

    let mut files = Vec::new();
    for path in selected {
        match fetcher.fetch_file(owner, repo, &path).await? {
            Some(content) => files.push(SelectedFile { path, content }),
            None => {
                // Heuristic explanation only; absence is not an error.
                if likely_blocked_by_route_naming(&path) {
                    println!("  - Skipping {path} (route-group naming often blocks raw fetches)");
                } else {
                    println!("  - Skipping {path} (could not retrieve)");
                }
            }
        }
    }

    Ok(PromptContext {
        owner: owner.to_string(),
        repo: repo.to_string(),
        description: snapshot.description.clone(),
        readme: snapshot.readme.clone(),
        listing: listing_for(repo, snapshot),
        files,
    })
}

/// Prompt context for documentation generation: structure and README only,
/// no file fetches.
pub fn build_docs_context(owner: &str, repo: &str, snapshot: &RepoSnapshot) -> PromptContext {
    PromptContext {
        owner: owner.to_string(),
        repo: repo.to_string(),
        description: snapshot.description.clone(),
        readme: snapshot.readme.clone(),
        listing: listing_for(repo, snapshot),
        files: Vec::new(),
    }
}

fn listing_for(repo: &str, snapshot: &RepoSnapshot) -> Option<String> {
    if snapshot.entries.is_empty() {
        return None;
    }
    // The hierarchy is rebuilt from the flat set every time it is needed.
    let tree = build_hierarchy(repo, &snapshot.entries);
    Some(render_listing(&tree))
}
