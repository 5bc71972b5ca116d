use crate::app_error::AppError;
use crate::github::ContentFetcher;
use crate::tree::{EntryKind, FileEntry};
use std::future::Future;
use std::pin::Pin;

// Hard caps on the sequential expansion. Total requests per repository view
// stay a small constant, independent of repository size.
const MAX_EXPANDED_TOP_DIRS: usize = 2;
const MAX_EXPANDED_SUBDIRS: usize = 2;
const MAX_DEPTH: usize = 3;

// Top-level directories worth expanding, in priority order.
const IMPORTANT_DIRS: &[&str] = &["src", "app", "lib", "pages", "components", "server", "packages"];

/// Acquires a bounded snapshot of the repository's file structure: the root
/// listing plus a depth-first expansion of up to two important top-level
/// directories, two subdirectories each, to a fixed depth.
///
/// The result is one flat, authoritative entry set. Expansions append child
/// entries; the hierarchy is always rebuilt from the full set, never patched.
pub async fn fetch_structure(
    fetcher: &dyn ContentFetcher,
    owner: &str,
    repo: &str,
) -> Result<Vec<FileEntry>, AppError> {
    let root = match fetcher.fetch_listing(owner, repo, None).await? {
        Some(entries) => entries,
        None => return Ok(Vec::new()),
    };

    let mut entries = root.clone();

    let important: Vec<FileEntry> = IMPORTANT_DIRS
        .iter()
        .filter_map(|name| {
            root.iter()
                .find(|e| e.kind == EntryKind::Dir && e.name == *name)
                .cloned()
        })
        .take(MAX_EXPANDED_TOP_DIRS)
        .collect();

    for dir in important {
        expand_dir(fetcher, owner, repo, &dir.path, 1, &mut entries).await?;
    }

    Ok(entries)
}

// Boxed return type because the expansion recurses; depth is capped above.
fn expand_dir<'a>(
    fetcher: &'a dyn ContentFetcher,
    owner: &'a str,
    repo: &'a str,
    path: &'a str,
    depth: usize,
    entries: &'a mut Vec<FileEntry>,
) -> Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'a>> {
    Box::pin(async move {
        let listing = match fetcher.fetch_listing(owner, repo, Some(path)).await? {
            Some(listing) => listing,
            None => return Ok(()),
        };

        let subdirs: Vec<String> = listing
            .iter()
            .filter(|e| e.kind == EntryKind::Dir)
            .take(MAX_EXPANDED_SUBDIRS)
            .map(|e| e.path.clone())
            .collect();

        for entry in listing {
            if !entries.iter().any(|e| e.path == entry.path) {
                entries.push(entry);
            }
        }

        if depth < MAX_DEPTH {
            for subdir in subdirs {
                expand_dir(fetcher, owner, repo, &subdir, depth + 1, entries).await?;
            }
        }

        Ok(())
    })
}
