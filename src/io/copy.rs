//! Source-tree duplication for copy-then-compile mode.

use crate::errors::CompileError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// OS metadata artifacts never worth carrying into the working copy.
const OS_ARTIFACTS: &[&str] = &[".DS_Store", "Thumbs.db", "desktop.ini"];

/// Duplicate `source` into `target` and return the directory the pipeline
/// should operate on.
///
/// With no target, or a target equal to the source, no filesystem copy
/// occurs and the source itself becomes the working directory (in-place
/// mode). Otherwise the tree is copied recursively, overwriting anything
/// already present at the destination. A failed copy aborts the whole
/// pipeline.
pub fn copy_source_folder(source: &Path, target: Option<&Path>) -> Result<PathBuf, CompileError> {
    let target = match target {
        Some(t) if t != source => t,
        _ => return Ok(source.to_path_buf()),
    };

    let copy_err = |e: std::io::Error| CompileError::Copy {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    };

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| CompileError::Copy {
            from: source.to_path_buf(),
            to: target.to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        if is_os_artifact(path) {
            continue;
        }

        let relative = path.strip_prefix(source).expect("walked under source");
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination).map_err(copy_err)?;
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(copy_err)?;
            }
            fs::copy(path, &destination).map_err(copy_err)?;
        }
    }

    Ok(target.to_path_buf())
}

fn is_os_artifact(path: &Path) -> bool {
    path.file_name()
        .map(|name| OS_ARTIFACTS.iter().any(|a| name.to_string_lossy().as_ref() == *a))
        .unwrap_or(false)
}
