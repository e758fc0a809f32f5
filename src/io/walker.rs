//! Recursive file enumeration with extension filtering and glob exclusion.
//!
//! Shared by the extraction engine (CSS modules) and the import rewriter
//! (JavaScript files). Results are sorted so downstream output is stable
//! within one filesystem snapshot; no semantic ordering beyond that is
//! guaranteed.

use crate::errors::CompileError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<&'static str>,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_extension(mut self, extension: &'static str) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>, CompileError> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(false)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| CompileError::Walk {
                root: self.root.clone(),
                source: e,
            })?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let matches_extension = match path.extension() {
            Some(ext) => self
                .extensions
                .iter()
                .any(|e| ext.to_string_lossy().as_ref() == *e),
            None => false,
        };
        if !matches_extension {
            return false;
        }

        !is_excluded(path, &self.root, &self.ignore_patterns)
    }
}

/// A pattern excludes a file when it matches the working-dir-relative path
/// or the bare file name, so `*.ignore.css` works at any depth.
pub fn is_excluded(path: &Path, root: &Path, patterns: &[String]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    patterns.iter().any(|pattern| {
        glob::Pattern::new(pattern)
            .map(|p| p.matches(&relative) || p.matches(&file_name))
            .unwrap_or(false)
    })
}
