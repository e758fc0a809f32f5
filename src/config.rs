//! Compile options: documented defaults, field-by-field overrides, and
//! one-time validation.

use crate::core::PluginRef;
use crate::errors::CompileError;
use std::path::PathBuf;

pub const DEFAULT_TARGET_NAME: &str = "styles.css";

/// Options accepted by `compile`. Construct with [`CompileOptions::default`]
/// and override the fields that matter; unset fields keep their defaults.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Plugin tokens handed to the extraction boundary, in order.
    pub plugins: Vec<PluginRef>,
    /// Folder to copy the source tree into before compiling. `None`
    /// compiles in place.
    pub target_folder: Option<PathBuf>,
    /// File name of the bundled stylesheet, written into the working
    /// directory.
    pub target_name: String,
    /// Glob patterns excluding CSS modules from extraction.
    pub blacklist: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
            target_folder: None,
            target_name: DEFAULT_TARGET_NAME.to_string(),
            blacklist: Vec::new(),
        }
    }
}

impl CompileOptions {
    pub fn with_plugins(mut self, plugins: Vec<PluginRef>) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_target_folder(mut self, target_folder: impl Into<PathBuf>) -> Self {
        self.target_folder = Some(target_folder.into());
        self
    }

    pub fn with_target_name(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = target_name.into();
        self
    }

    pub fn with_blacklist(mut self, blacklist: Vec<String>) -> Self {
        self.blacklist = blacklist;
        self
    }

    /// Validate once, before any filesystem operation.
    pub fn validate(&self) -> Result<(), CompileError> {
        if self.target_name.trim().is_empty() {
            return Err(CompileError::Config(
                "target name must not be empty".to_string(),
            ));
        }
        for pattern in &self.blacklist {
            glob::Pattern::new(pattern).map_err(|e| {
                CompileError::Config(format!("invalid blacklist pattern '{pattern}': {e}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let options = CompileOptions::default();
        assert!(options.plugins.is_empty());
        assert_eq!(options.target_folder, None);
        assert_eq!(options.target_name, "styles.css");
        assert!(options.blacklist.is_empty());
    }

    #[test]
    fn overrides_apply_field_by_field() {
        let options = CompileOptions::default()
            .with_target_folder(".build")
            .with_target_name("my-styles.css");
        assert_eq!(options.target_folder, Some(PathBuf::from(".build")));
        assert_eq!(options.target_name, "my-styles.css");
        assert!(options.blacklist.is_empty());
    }

    #[test]
    fn empty_target_name_is_rejected() {
        let err = CompileOptions::default()
            .with_target_name("  ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, CompileError::Config(_)));
    }

    #[test]
    fn malformed_blacklist_pattern_is_rejected() {
        let err = CompileOptions::default()
            .with_blacklist(vec!["[".to_string()])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("blacklist"));
    }
}
