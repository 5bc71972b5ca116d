
pub const README_CHAR_CAP: usize = 2000;
pub const LISTING_CHAR_CAP: usize = 1000;
pub const FILE_CONTENT_CHAR_CAP: usize = 2000;

pub const TRUNCATION_MARKER: &str = "\n...[truncated]";

const NO_README_FALLBACK: &str = "No README found.";

/// A file fetched for context, keyed by its repository path.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub path: String,
    pub content: String,
}

/// Everything the assembler needs for one request. Assembled per request,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub owner: String,
    pub repo: String,
    pub description: Option<String>,
    pub readme: Option<String>,
    pub listing: Option<String>,
    pub files: Vec<SelectedFile>,
}

/// Caps `text` at `cap` characters, appending the truncation marker when
/// anything was cut. Operates on characters, not bytes, so multi-byte
/// content never splits mid-codepoint.
pub fn truncate_chars(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(cap).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

/// Fixed extension to fence-language table. Unknown extensions fall through
/// to the raw extension; no extension yields an unlabeled fence.
pub fn language_for_path(path: &str) -> String {
    let ext = path.rsplit('.').next().unwrap_or("");
    if ext == path {
        return String::new();
    }
    match ext {
        "js" | "jsx" => "javascript".to_string(),
        "ts" | "tsx" => "typescript".to_string(),
        "css" => "css".to_string(),
        "html" => "html".to_string(),
        "json" => "json".to_string(),
        "md" => "markdown".to_string(),
        "py" => "python".to_string(),
        other => other.to_string(),
    }
}

/// Prompt for answering one question. README, listing, and each file's
/// content are truncated; assembly is deterministic.
pub fn build_answer_prompt(ctx: &PromptContext, question: &str) -> String {
    let mut prompt = header(ctx);
    push_readme_section(&mut prompt, ctx);
    push_listing_section(&mut prompt, ctx);

    if !ctx.files.is_empty() {
        prompt.push_str("## Relevant files\n\n");
        for file in &ctx.files {
            push_file_block(
                &mut prompt,
                file,
                Some(FILE_CONTENT_CHAR_CAP),
            );
        }
    }

    prompt.push_str("## Question\n\n");
    prompt.push_str(question);
    prompt.push_str(
        "\n\nAnswer the question about this repository in markdown. \
        Ground the answer in the files shown above; say so when the context \
        is insufficient instead of guessing.\n",
    );
    prompt
}

/// Prompt for generating repository documentation. README and listing are
/// truncated; file contents (when present) are included verbatim.
pub fn build_docs_prompt(ctx: &PromptContext) -> String {
    let mut prompt = header(ctx);
    push_readme_section(&mut prompt, ctx);
    push_listing_section(&mut prompt, ctx);

    if !ctx.files.is_empty() {
        prompt.push_str("## Files\n\n");
        for file in &ctx.files {
            push_file_block(&mut prompt, file, None);
        }
    }

    prompt.push_str(
        "## Task\n\n\
        Write developer documentation for this repository in markdown: a short \
        overview, the project structure, how the main pieces fit together, and \
        how to get started. Base it only on the material above.\n",
    );
    prompt
}

fn header(ctx: &PromptContext) -> String {
    let mut prompt = format!(
        "You are helping a developer understand the GitHub repository {}/{}.\n\n",
        ctx.owner, ctx.repo
    );
    if let Some(description) = &ctx.description {
        if !description.is_empty() {
            prompt.push_str(&format!("Repository description: {description}\n\n"));
        }
    }
    prompt
}

fn push_readme_section(prompt: &mut String, ctx: &PromptContext) {
    prompt.push_str("## README\n\n");
    match &ctx.readme {
        Some(readme) => {
            prompt.push_str(&truncate_chars(readme, README_CHAR_CAP));
        }
        None => prompt.push_str(NO_README_FALLBACK),
    }
    prompt.push_str("\n\n");
}

fn push_listing_section(prompt: &mut String, ctx: &PromptContext) {
    if let Some(listing) = &ctx.listing {
        prompt.push_str("## File structure\n\n");
        prompt.push_str(&truncate_chars(listing, LISTING_CHAR_CAP));
        prompt.push_str("\n\n");
    }
}

fn push_file_block(prompt: &mut String, file: &SelectedFile, cap: Option<usize>) {
    let content = match cap {
        Some(cap) => truncate_chars(&file.content, cap),
        None => file.content.clone(),
    };
    prompt.push_str(&format!(
        "### {}\n\n```{}\n{}\n```\n\n",
        file.path,
        language_for_path(&file.path),
        content
    ));
}
