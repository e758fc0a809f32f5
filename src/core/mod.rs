//! Core data model shared by every pipeline stage.
//!
//! The compile pipeline threads a single [`PipelineState`] accumulator
//! through its stages. State is append-only: each stage extends it and no
//! stage may read a field an earlier stage has not produced — the accessors
//! return [`CompileError::MissingStageInput`] instead of panicking.

use crate::errors::CompileError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Maps a local import key to a space-separated string of global class-name
/// tokens, e.g. `"btn" -> "btn btn--wide"`.
pub type LocalImportMap = BTreeMap<String, String>;

/// Maps a module identifier (CSS module path relative to the working
/// directory) to its [`LocalImportMap`].
///
/// Born from extraction, replaced exactly once by selector pruning, then
/// read-only for import rewriting. Pruning may shrink or empty a value's
/// token list but never removes a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassMap(BTreeMap<String, LocalImportMap>);

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: impl Into<String>, locals: LocalImportMap) {
        self.0.insert(module.into(), locals);
    }

    pub fn get(&self, module: &str) -> Option<&LocalImportMap> {
        self.0.get(module)
    }

    pub fn contains_module(&self, module: &str) -> bool {
        self.0.contains_key(module)
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LocalImportMap)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, LocalImportMap)> for ClassMap {
    fn from_iter<T: IntoIterator<Item = (String, LocalImportMap)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Opaque plugin token. The pipeline passes these through to the extraction
/// boundary unexamined; only the extraction engine interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRef(String);

impl PluginRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// What the extraction boundary returns: the class map, the fragment files
/// to delete after bundling (paths relative to the working directory), and
/// the already-concatenated CSS text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub map: ClassMap,
    pub files: Vec<PathBuf>,
    pub styles: String,
}

/// Accumulator threaded through the compile pipeline.
///
/// Created per `compile` invocation with the resolved source path, then
/// extended in stage order: `working_dir` after source copying, the
/// extraction triple after extraction, `css_output` after concatenation,
/// and the pruned map after selector pruning.
#[derive(Debug, Clone)]
pub struct PipelineState {
    source_path: PathBuf,
    working_dir: Option<PathBuf>,
    map: Option<ClassMap>,
    files: Option<Vec<PathBuf>>,
    styles: Option<String>,
    css_output: Option<PathBuf>,
}

impl PipelineState {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            working_dir: None,
            map: None,
            files: None,
            styles: None,
            css_output: None,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn working_dir(&self) -> Result<&Path, CompileError> {
        self.working_dir
            .as_deref()
            .ok_or(CompileError::MissingStageInput("working_dir"))
    }

    pub fn with_extraction(mut self, extraction: Extraction) -> Self {
        self.map = Some(extraction.map);
        self.files = Some(extraction.files);
        self.styles = Some(extraction.styles);
        self
    }

    pub fn map(&self) -> Result<&ClassMap, CompileError> {
        self.map
            .as_ref()
            .ok_or(CompileError::MissingStageInput("map"))
    }

    pub fn files(&self) -> Result<&[PathBuf], CompileError> {
        self.files
            .as_deref()
            .ok_or(CompileError::MissingStageInput("files"))
    }

    pub fn styles(&self) -> Result<&str, CompileError> {
        self.styles
            .as_deref()
            .ok_or(CompileError::MissingStageInput("styles"))
    }

    pub fn with_css_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.css_output = Some(path.into());
        self
    }

    pub fn css_output(&self) -> Result<&Path, CompileError> {
        self.css_output
            .as_deref()
            .ok_or(CompileError::MissingStageInput("css_output"))
    }

    /// The one mutation the class map sees after extraction: selector
    /// pruning replaces it with the narrowed map.
    pub fn replace_map(mut self, map: ClassMap) -> Self {
        self.map = Some(map);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_fail_before_their_stage_ran() {
        let state = PipelineState::new("/src");
        assert!(matches!(
            state.working_dir(),
            Err(CompileError::MissingStageInput("working_dir"))
        ));
        assert!(matches!(
            state.map(),
            Err(CompileError::MissingStageInput("map"))
        ));
        assert!(matches!(
            state.css_output(),
            Err(CompileError::MissingStageInput("css_output"))
        ));
    }

    #[test]
    fn extraction_populates_map_files_and_styles() {
        let mut map = ClassMap::new();
        map.insert(
            "Button.css",
            LocalImportMap::from([("btn".to_string(), "btn".to_string())]),
        );
        let state = PipelineState::new("/src").with_extraction(Extraction {
            map: map.clone(),
            files: vec![PathBuf::from("Button.css")],
            styles: ".btn { color: red; }\n".to_string(),
        });

        assert_eq!(state.map().unwrap(), &map);
        assert_eq!(state.files().unwrap(), [PathBuf::from("Button.css")]);
        assert!(state.styles().unwrap().contains(".btn"));
    }

    #[test]
    fn class_map_round_trips_through_json() {
        let mut map = ClassMap::new();
        map.insert(
            "app/Button.css",
            LocalImportMap::from([("btn".to_string(), "btn wide".to_string())]),
        );
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"app/Button.css":{"btn":"btn wide"}}"#);
        let back: ClassMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
