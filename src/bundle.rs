//! Fragment cleanup and stylesheet concatenation.

use crate::errors::CompileError;
use crate::io;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Delete every extracted fragment file under the working directory.
///
/// All deletions are attempted (settle-all) before the first failure, if
/// any, is reported.
pub fn clean_css(working_dir: &Path, files: &[PathBuf]) -> Result<(), CompileError> {
    let mut failures: Vec<CompileError> = files
        .par_iter()
        .filter_map(|file| io::remove_file(&working_dir.join(file)).err())
        .collect();

    match failures.is_empty() {
        true => Ok(()),
        false => Err(failures.remove(0)),
    }
}

/// Write the assembled CSS text to `<target_folder>/<target_name>`,
/// unconditionally overwriting any existing file, and return the bundle
/// path.
pub fn concatenate_css(
    target_folder: &Path,
    target_name: &str,
    styles: &str,
) -> Result<PathBuf, CompileError> {
    let css_output = target_folder.join(target_name);
    io::write_file(&css_output, styles)?;
    Ok(css_output)
}
