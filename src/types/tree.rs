//! Repository File Tree
//!
//! Immutable hierarchical representation of a repository's files and folders.
//!
//! ## Invariants
//!
//! - A child's path is always `parent.path + "/" + child.name`
//! - Root-level nodes have `path == name`
//! - Files never have children
//! - Paths are unique within a tree
//!
//! Trees built through [`FileNode::file`] and [`FileNode::folder`] satisfy these
//! by construction. Trees that arrive from elsewhere (JSON, a tree source) can
//! be checked with [`FileTree::validate`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Result, ValidationError, ValidationErrorKind};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    /// Creates a root-level file node. Wrapping it in [`FileNode::folder`]
    /// rebases its path under the folder.
    pub fn file(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Creates a root-level folder and rebases every descendant path under it
    pub fn folder(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        let name = name.into();
        let children = children
            .into_iter()
            .map(|child| child.rebase(&name))
            .collect();
        Self {
            path: name.clone(),
            name,
            kind: NodeKind::Folder,
            children,
        }
    }

    fn rebase(mut self, prefix: &str) -> Self {
        self.path = format!("{}/{}", prefix, self.path);
        self.children = self
            .children
            .into_iter()
            .map(|child| child.rebase(prefix))
            .collect();
        self
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

// =============================================================================
// Traversal
// =============================================================================

/// Every file path in depth-first, left-to-right order. Folders are expanded,
/// never emitted.
pub fn flatten(nodes: &[FileNode]) -> Vec<String> {
    let mut out = Vec::new();
    collect_files(nodes, &mut out);
    out
}

fn collect_files(nodes: &[FileNode], out: &mut Vec<String>) {
    for node in nodes {
        match node.kind {
            NodeKind::File => out.push(node.path.clone()),
            NodeKind::Folder => collect_files(&node.children, out),
        }
    }
}

/// Exact path lookup over files and folders
pub fn find<'a>(nodes: &'a [FileNode], path: &str) -> Option<&'a FileNode> {
    for node in nodes {
        if node.path == path {
            return Some(node);
        }
        // Only descend into the folder that prefixes the target path
        if node.is_folder()
            && path.len() > node.path.len()
            && path.starts_with(node.path.as_str())
            && path.as_bytes()[node.path.len()] == b'/'
            && let Some(found) = find(&node.children, path)
        {
            return Some(found);
        }
    }
    None
}

// =============================================================================
// File Tree
// =============================================================================

/// Ordered root-level siblings of a repository
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FileTree(Vec<FileNode>);

impl FileTree {
    pub fn new(nodes: Vec<FileNode>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[FileNode] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn flatten(&self) -> Vec<String> {
        flatten(&self.0)
    }

    pub fn find(&self, path: &str) -> Option<&FileNode> {
        find(&self.0, path)
    }

    /// Lookup restricted to file nodes
    pub fn find_file(&self, path: &str) -> Option<&FileNode> {
        self.find(path).filter(|node| node.is_file())
    }

    pub fn file_count(&self) -> usize {
        self.count(NodeKind::File)
    }

    pub fn folder_count(&self) -> usize {
        self.count(NodeKind::Folder)
    }

    fn count(&self, kind: NodeKind) -> usize {
        fn walk(nodes: &[FileNode], kind: NodeKind) -> usize {
            nodes
                .iter()
                .map(|n| usize::from(n.kind == kind) + walk(&n.children, kind))
                .sum()
        }
        walk(&self.0, kind)
    }

    /// Check the path, leaf and uniqueness invariants
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        validate_level(&self.0, None, &mut seen)
    }

    /// Indented outline, folders suffixed with `/`
    pub fn render_outline(&self) -> String {
        fn walk(nodes: &[FileNode], depth: usize, out: &mut String) {
            for node in nodes {
                out.push_str(&"  ".repeat(depth));
                out.push_str(&node.name);
                if node.is_folder() {
                    out.push('/');
                }
                out.push('\n');
                walk(&node.children, depth + 1, out);
            }
        }
        let mut out = String::new();
        walk(&self.0, 0, &mut out);
        out
    }

    /// The fixed structure attached to every mocked import
    pub fn sample() -> Self {
        Self(vec![
            FileNode::folder(
                "src",
                vec![
                    FileNode::folder(
                        "components",
                        vec![FileNode::file("Header.tsx"), FileNode::file("Footer.tsx")],
                    ),
                    FileNode::folder(
                        "pages",
                        vec![FileNode::file("index.tsx"), FileNode::file("about.tsx")],
                    ),
                    FileNode::file("App.tsx"),
                    FileNode::file("main.tsx"),
                ],
            ),
            FileNode::folder(
                "public",
                vec![FileNode::file("favicon.ico"), FileNode::file("robots.txt")],
            ),
            FileNode::file("package.json"),
            FileNode::file("README.md"),
        ])
    }
}

impl From<Vec<FileNode>> for FileTree {
    fn from(nodes: Vec<FileNode>) -> Self {
        Self(nodes)
    }
}

fn validate_level<'a>(
    nodes: &'a [FileNode],
    parent: Option<&str>,
    seen: &mut HashSet<&'a str>,
) -> Result<()> {
    for node in nodes {
        if node.name.is_empty() || node.name.contains('/') {
            return Err(structure_error(
                &node.path,
                format!("invalid node name '{}'", node.name),
            ));
        }

        let expected = match parent {
            Some(parent) => format!("{}/{}", parent, node.name),
            None => node.name.clone(),
        };
        if node.path != expected {
            return Err(structure_error(
                &node.path,
                format!("expected path '{}'", expected),
            ));
        }

        if node.is_file() && !node.children.is_empty() {
            return Err(structure_error(&node.path, "file nodes cannot have children"));
        }

        if !seen.insert(node.path.as_str()) {
            return Err(structure_error(&node.path, "duplicate path"));
        }

        validate_level(&node.children, Some(&node.path), seen)?;
    }
    Ok(())
}

fn structure_error(path: &str, message: impl Into<String>) -> crate::types::DocError {
    ValidationError::new(ValidationErrorKind::Structure, message)
        .with_field(path)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builders_derive_paths() {
        let node = FileNode::folder(
            "src",
            vec![FileNode::folder("a", vec![FileNode::file("b.rs")])],
        );
        assert_eq!(node.path, "src");
        assert_eq!(node.children[0].path, "src/a");
        assert_eq!(node.children[0].children[0].path, "src/a/b.rs");
    }

    #[test]
    fn test_flatten_sample() {
        let tree = FileTree::sample();
        assert_eq!(
            tree.flatten(),
            vec![
                "src/components/Header.tsx",
                "src/components/Footer.tsx",
                "src/pages/index.tsx",
                "src/pages/about.tsx",
                "src/App.tsx",
                "src/main.tsx",
                "public/favicon.ico",
                "public/robots.txt",
                "package.json",
                "README.md",
            ]
        );
        assert_eq!(tree.file_count(), 10);
        assert_eq!(tree.folder_count(), 4);
    }

    #[test]
    fn test_flatten_empty_and_empty_folder() {
        assert!(FileTree::default().flatten().is_empty());

        let tree = FileTree::new(vec![
            FileNode::folder("empty", vec![]),
            FileNode::file("a.txt"),
        ]);
        assert_eq!(tree.flatten(), vec!["a.txt"]);
    }

    #[test]
    fn test_find() {
        let tree = FileTree::sample();
        let node = tree.find("src/pages/about.tsx").unwrap();
        assert_eq!(node.name, "about.tsx");
        assert!(node.is_file());

        let folder = tree.find("src/pages").unwrap();
        assert!(folder.is_folder());

        assert!(tree.find("src/pages/missing.tsx").is_none());
        assert!(tree.find("sr").is_none());
        assert!(tree.find("").is_none());
    }

    #[test]
    fn test_find_file_rejects_folders() {
        let tree = FileTree::sample();
        assert!(tree.find_file("src/components").is_none());
        assert!(tree.find_file("README.md").is_some());
    }

    #[test]
    fn test_validate_sample() {
        assert!(FileTree::sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_path() {
        let mut folder = FileNode::folder("src", vec![FileNode::file("a.rs")]);
        folder.children[0].path = "lib/a.rs".to_string();
        let err = FileTree::new(vec![folder]).validate().unwrap_err();
        assert!(err.to_string().contains("expected path 'src/a.rs'"));
    }

    #[test]
    fn test_validate_rejects_file_with_children() {
        let mut file = FileNode::file("a.rs");
        file.children.push(FileNode::file("b.rs"));
        assert!(FileTree::new(vec![file]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let tree = FileTree::new(vec![FileNode::file("a.rs"), FileNode::file("a.rs")]);
        let err = tree.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate path"));
    }

    #[test]
    fn test_render_outline() {
        let tree = FileTree::new(vec![
            FileNode::folder("src", vec![FileNode::file("main.rs")]),
            FileNode::file("Cargo.toml"),
        ]);
        assert_eq!(tree.render_outline(), "src/\n  main.rs\nCargo.toml\n");
    }

    #[test]
    fn test_json_shape() {
        let tree = FileTree::new(vec![FileNode::folder("src", vec![FileNode::file("a.rs")])]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json[0]["type"], "folder");
        assert_eq!(json[0]["children"][0]["path"], "src/a.rs");
        assert!(json[0]["children"][0].get("children").is_none());

        let back: FileTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }

    #[derive(Debug, Clone)]
    enum Shape {
        File,
        Folder(Vec<Shape>),
    }

    fn shape() -> impl Strategy<Value = Shape> {
        Just(Shape::File).prop_recursive(4, 48, 5, |inner| {
            prop_oneof![
                Just(Shape::File),
                prop::collection::vec(inner, 0..5).prop_map(Shape::Folder),
            ]
        })
    }

    fn build(shapes: &[Shape]) -> Vec<FileNode> {
        shapes
            .iter()
            .enumerate()
            .map(|(i, s)| match s {
                Shape::File => FileNode::file(format!("f{}.rs", i)),
                Shape::Folder(children) => FileNode::folder(format!("d{}", i), build(children)),
            })
            .collect()
    }

    /// Pre-order walk with an explicit stack, independent of `flatten`
    fn expected_files(nodes: &[FileNode]) -> (Vec<String>, Vec<String>) {
        let mut files = Vec::new();
        let mut folders = Vec::new();
        let mut stack: Vec<&FileNode> = nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.is_file() {
                files.push(node.path.clone());
            } else {
                folders.push(node.path.clone());
                stack.extend(node.children.iter().rev());
            }
        }
        (files, folders)
    }

    proptest! {
        #[test]
        fn prop_flatten_is_preorder_files_only(shapes in prop::collection::vec(shape(), 0..6)) {
            let tree = FileTree::new(build(&shapes));
            prop_assert!(tree.validate().is_ok());

            let flat = tree.flatten();
            let (files, folders) = expected_files(tree.nodes());
            prop_assert_eq!(&flat, &files);
            for folder in &folders {
                prop_assert!(!flat.contains(folder));
            }
            for path in &flat {
                prop_assert!(tree.find_file(path).is_some());
            }
        }
    }
}
