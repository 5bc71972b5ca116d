use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One row of a repository listing as returned by the hosting API. `path` is
/// slash-separated and unique within a snapshot; `name` is the final segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileEntry {
    pub fn file(path: &str) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn dir(path: &str) -> Self {
        Self::new(path, EntryKind::Dir)
    }

    fn new(path: &str, kind: EntryKind) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            path: path.to_string(),
            name,
            kind,
            size: None,
        }
    }
}

/// Derived, hierarchical view over a flat entry set. Rebuilt from scratch
/// whenever the entry set changes; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeNode {
    pub path: String,
    pub name: String,
    pub kind: EntryKind,
    pub children: Vec<FileTreeNode>,
}

impl FileTreeNode {
    fn dir(path: String, name: String) -> Self {
        Self {
            path,
            name,
            kind: EntryKind::Dir,
            children: Vec::new(),
        }
    }

    /// Children in display order: directories before files, then
    /// case-sensitive alphabetical by name. Display policy only; the stored
    /// child order is construction order.
    pub fn sorted_children(&self) -> Vec<&FileTreeNode> {
        let mut sorted: Vec<&FileTreeNode> = self.children.iter().collect();
        sorted.sort_by(|a, b| {
            let rank = |n: &FileTreeNode| match n.kind {
                EntryKind::Dir => 0u8,
                EntryKind::File => 1u8,
            };
            rank(a).cmp(&rank(b)).then_with(|| a.name.cmp(&b.name))
        });
        sorted
    }
}

/// Converts a flat listing into a nested tree rooted at `root_name`.
/// Intermediate directories are created on demand and reused, so files
/// sharing a prefix never produce duplicate folders.
pub fn build_hierarchy(root_name: &str, entries: &[FileEntry]) -> FileTreeNode {
    let mut root = FileTreeNode::dir(String::new(), root_name.to_string());

    for entry in entries {
        let segments: Vec<&str> = entry.path.split('/').collect();
        let mut current = &mut root;

        for segment in &segments[..segments.len() - 1] {
            let position = current
                .children
                .iter()
                .position(|c| c.kind == EntryKind::Dir && c.name == *segment);
            let index = match position {
                Some(i) => i,
                None => {
                    let child_path = join_path(&current.path, segment);
                    current
                        .children
                        .push(FileTreeNode::dir(child_path, segment.to_string()));
                    current.children.len() - 1
                }
            };
            current = &mut current.children[index];
        }

        let leaf_name = segments[segments.len() - 1];
        let already_present = current
            .children
            .iter()
            .any(|c| c.name == leaf_name && c.kind == entry.kind);
        if !already_present {
            current.children.push(FileTreeNode {
                path: entry.path.clone(),
                name: leaf_name.to_string(),
                kind: entry.kind,
                children: Vec::new(),
            });
        }
    }

    root
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Indented listing of the whole tree in display order, one node per line.
pub fn render_listing(root: &FileTreeNode) -> String {
    let mut out = String::new();
    for child in root.sorted_children() {
        render_node(child, 0, &mut out);
    }
    out
}

fn render_node(node: &FileTreeNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&node.name);
    if node.kind == EntryKind::Dir {
        out.push('/');
    }
    out.push('\n');
    for child in node.sorted_children() {
        render_node(child, depth + 1, out);
    }
}

/// Paths of all file entries, in original listing order.
pub fn file_paths(entries: &[FileEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .map(|e| e.path.clone())
        .collect()
}
