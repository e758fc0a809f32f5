pub mod copy;
pub mod walker;

pub use copy::copy_source_folder;
pub use walker::FileWalker;

use crate::errors::CompileError;
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String, CompileError> {
    fs::read_to_string(path).map_err(|e| CompileError::io("read", path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<(), CompileError> {
    fs::write(path, content).map_err(|e| CompileError::io("write", path, e))
}

pub fn remove_file(path: &Path) -> Result<(), CompileError> {
    fs::remove_file(path).map_err(|e| CompileError::io("delete", path, e))
}

pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}
