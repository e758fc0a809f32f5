//! Import rewriting: synchronize JavaScript CSS imports with the pruned
//! class map.

mod transformer;

pub use transformer::TreeSitterTransformer;

use crate::core::ClassMap;
use crate::errors::CompileError;
use crate::io::{self, FileWalker};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Rewriter-shaped view of the class map: module identifiers normalized
/// for import-specifier resolution, locals ordered, values final
/// global-class strings.
pub type AstMap = BTreeMap<String, BTreeMap<String, String>>;

/// Convert the pruned class map into the shape the transformer consumes.
/// Module keys lose any leading `./` so resolved specifiers compare
/// exactly.
pub fn convert_css_map_to_ast_map(map: &ClassMap) -> AstMap {
    map.iter()
        .map(|(module, locals)| {
            let module = module.strip_prefix("./").unwrap_or(module).to_string();
            (module, locals.clone())
        })
        .collect()
}

/// The import-rewrite boundary: given a file path and the AST-shaped map,
/// return the full new content, or `None` when the file needs no change.
pub trait ImportTransformer: Sync {
    fn update_css_imports(
        &self,
        file_path: &Path,
        ast_map: &AstMap,
    ) -> Result<Option<String>, CompileError>;
}

/// Rewrite every JavaScript file under the working directory through the
/// transformer, writing back only files whose content changed. Transforms
/// run concurrently under a fail-fast join; files have no
/// cross-dependency, so order is irrelevant. Returns how many files were
/// rewritten.
pub fn rewrite_imports(
    working_dir: &Path,
    ast_map: &AstMap,
    transformer: &dyn ImportTransformer,
) -> Result<usize, CompileError> {
    let js_files = FileWalker::new(working_dir).with_extension("js").walk()?;

    let written: Vec<bool> = js_files
        .par_iter()
        .map(|file| match transformer.update_css_imports(file, ast_map)? {
            Some(code) => {
                io::write_file(file, &code)?;
                Ok(true)
            }
            None => Ok(false),
        })
        .collect::<Result<_, CompileError>>()?;

    Ok(written.into_iter().filter(|w| *w).count())
}
