use regex::Regex;
use std::sync::OnceLock;

pub const MAX_SELECTED_FILES: usize = 5;

// Question phrasings that signal a GitHub-integration question.
const GITHUB_QUESTION_MARKERS: &[&str] = &[
    "github api",
    "fetch repo",
    "repository fetch",
    "github integration",
];

// Path keywords scored for GitHub-integration questions.
const GITHUB_PATH_KEYWORDS: &[&str] = &["github", "api", "repo", "fetch"];

const LIB_LIKE_DIRS: &[&str] = &["/lib/", "/utils/"];
const CODE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

// Topic table: a topic is active when any of its keywords appears in the
// question; active keywords then filter candidate paths.
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("authentication", &["auth", "login", "signin", "signup"]),
    ("styling", &["css", "style", "tailwind"]),
    ("components", &["component", "button", "modal", "layout"]),
    ("routing", &["route", "page", "navigation"]),
    ("configuration", &["config", "env", "settings"]),
    ("testing", &["test", "spec"]),
    ("data", &["database", "schema", "model", "query"]),
];

// Fallback directories used to pad a thin selection.
const FALLBACK_DIR_MARKERS: &[&str] = &["/lib/", "/utils/", "/api/"];

fn path_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Path-like tokens: at least one slash-separated segment ending in an
        // extension, e.g. `src/index.ts` or `src/app/[slug]/page.tsx`.
        Regex::new(r"[A-Za-z0-9_@.\-]+(?:/[A-Za-z0-9_@.\-\[\]()]+)+\.[A-Za-z0-9]+").unwrap()
    })
}

/// The one pattern-matching stage for explicit file mentions. Extracts
/// path-like tokens from the question and resolves them against the known
/// paths; a token matches on equality or as a path suffix.
pub fn detect_explicit_paths(question: &str, all_paths: &[String]) -> Vec<String> {
    let mut matches = Vec::new();
    for token in path_token_regex().find_iter(question) {
        let token = token.as_str();
        let resolved = all_paths
            .iter()
            .find(|p| p.as_str() == token)
            .or_else(|| all_paths.iter().find(|p| p.ends_with(&format!("/{token}"))));
        if let Some(path) = resolved {
            if !matches.contains(path) {
                matches.push(path.clone());
            }
        }
    }
    matches.truncate(MAX_SELECTED_FILES);
    matches
}

/// Heuristic chooser of which files to fetch for a question. Returns at most
/// five paths, each a member of `all_paths`. Keyword matching is a cheap,
/// explainable proxy for semantic relevance; there is no embedding index.
pub fn select_relevant_files(question: &str, all_paths: &[String]) -> Vec<String> {
    // Explicitly mentioned files win outright; no padding on this branch, so
    // a question about one file fetches exactly that file.
    let explicit = detect_explicit_paths(question, all_paths);
    if !explicit.is_empty() {
        return explicit;
    }

    let q = question.to_lowercase();

    let mut selected: Vec<String> = if GITHUB_QUESTION_MARKERS.iter().any(|m| q.contains(m)) {
        select_github_integration(all_paths)
    } else {
        select_by_topics(&q, all_paths)
    };

    if selected.len() < 3 {
        pad_selection(&mut selected, all_paths);
    }

    selected.truncate(MAX_SELECTED_FILES);
    selected
}

fn select_github_integration(all_paths: &[String]) -> Vec<String> {
    let mut scored: Vec<(usize, &String)> = all_paths
        .iter()
        .filter_map(|path| {
            let lower = path.to_lowercase();
            let score = GITHUB_PATH_KEYWORDS
                .iter()
                .filter(|k| lower.contains(*k))
                .count();
            if score > 0 {
                Some((score, path))
            } else if is_lib_like_code_file(&lower) {
                Some((0, path))
            } else {
                None
            }
        })
        .collect();

    // Stable sort: ties keep original listing order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SELECTED_FILES)
        .map(|(_, p)| p.clone())
        .collect()
}

fn is_lib_like_code_file(lower_path: &str) -> bool {
    LIB_LIKE_DIRS.iter().any(|d| lower_path.contains(d))
        && CODE_EXTENSIONS.iter().any(|e| lower_path.ends_with(e))
}

fn select_by_topics(lower_question: &str, all_paths: &[String]) -> Vec<String> {
    let active_keywords: Vec<&str> = TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower_question.contains(k)))
        .flat_map(|(_, keywords)| keywords.iter().copied())
        .collect();

    if active_keywords.is_empty() {
        return Vec::new();
    }

    all_paths
        .iter()
        .filter(|path| {
            let lower = path.to_lowercase();
            active_keywords.iter().any(|k| lower.contains(k))
        })
        .take(MAX_SELECTED_FILES)
        .cloned()
        .collect()
}

fn pad_selection(selected: &mut Vec<String>, all_paths: &[String]) {
    if selected.len() >= MAX_SELECTED_FILES {
        return;
    }

    if let Some(pkg) = all_paths.iter().find(|p| p.as_str() == "package.json") {
        if !selected.contains(pkg) {
            selected.push(pkg.clone());
        }
    }

    for path in all_paths {
        if selected.len() >= MAX_SELECTED_FILES {
            break;
        }
        if FALLBACK_DIR_MARKERS.iter().any(|m| path.contains(m)) && !selected.contains(path) {
            selected.push(path.clone());
        }
    }
}
