//! Default import transformer built on tree-sitter.
//!
//! A CSS-module import is replaced by a plain object binding carrying the
//! pruned class map for that module, so the compiled tree no longer
//! depends on any CSS loader:
//!
//! ```text
//! import css from 'Button.css'   =>   const css = { title: "title" };
//! const s = require('./a.css')   =>   const s = { box: "box" };
//! import './global.css'          =>   (statement removed)
//! ```
//!
//! Imports of modules absent from the map are left untouched.

use super::{AstMap, ImportTransformer};
use crate::errors::CompileError;
use crate::io;
use crate::js::{self, CssImportKind};
use crate::paths;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub struct TreeSitterTransformer {
    working_dir: PathBuf,
}

impl TreeSitterTransformer {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Exact module-identifier match first, then an unambiguous file-name
    /// fallback for specifiers resolved through bundler conventions the
    /// path join cannot reproduce.
    fn lookup<'m>(
        &self,
        ast_map: &'m AstMap,
        file_path: &Path,
        specifier: &str,
    ) -> Option<&'m BTreeMap<String, String>> {
        if let Some(module_id) = paths::module_id(file_path, specifier, &self.working_dir) {
            if let Some(locals) = ast_map.get(&module_id) {
                return Some(locals);
            }
        }

        let wanted = Path::new(specifier).file_name()?;
        let mut matches = ast_map
            .iter()
            .filter(|(module, _)| Path::new(module).file_name() == Some(wanted));
        match (matches.next(), matches.next()) {
            (Some((_, locals)), None) => Some(locals),
            _ => None,
        }
    }
}

impl ImportTransformer for TreeSitterTransformer {
    fn update_css_imports(
        &self,
        file_path: &Path,
        ast_map: &AstMap,
    ) -> Result<Option<String>, CompileError> {
        let source = io::read_file(file_path)?;
        let tree = js::parse(&source, file_path)?;

        let mut edits: Vec<(usize, usize, String)> = Vec::new();
        for import in js::find_css_imports(&tree, &source) {
            let Some(locals) = self.lookup(ast_map, file_path, &import.specifier) else {
                continue;
            };

            let replacement = match (import.kind, &import.binding) {
                (CssImportKind::Import, Some(binding)) => {
                    format!("const {} = {};", binding, object_literal(locals))
                }
                (CssImportKind::Import, None) => String::new(),
                (CssImportKind::Require, _) => object_literal(locals),
            };
            edits.push((import.start, import.end, replacement));
        }

        if edits.is_empty() {
            return Ok(None);
        }

        let mut code = source.clone();
        edits.sort_by(|a, b| b.0.cmp(&a.0));
        for (start, end, replacement) in edits {
            code.replace_range(start..end, &replacement);
        }

        if code == source {
            Ok(None)
        } else {
            Ok(Some(code))
        }
    }
}

/// Render a local-import map as a JavaScript object literal. Keys that are
/// valid identifiers stay bare; everything else is JSON-quoted, as are all
/// values.
fn object_literal(locals: &BTreeMap<String, String>) -> String {
    if locals.is_empty() {
        return "{}".to_string();
    }

    let properties: Vec<String> = locals
        .iter()
        .map(|(key, value)| {
            let value = serde_json::to_string(value).expect("strings serialize");
            if is_js_identifier(key) {
                format!("{key}: {value}")
            } else {
                let key = serde_json::to_string(key).expect("strings serialize");
                format!("{key}: {value}")
            }
        })
        .collect();

    format!("{{ {} }}", properties.join(", "))
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
