//! Default extraction engine.
//!
//! Scans the JavaScript tree for CSS-module imports, processes each
//! referenced stylesheet (composes resolution, class-name scoping), and
//! assembles the class map plus the bundle text. The map is keyed by the
//! module's path relative to the working directory and covers the union of
//! CSS-defined locals and JS-referenced locals; references with no backing
//! rule get a generated global name that selector pruning later empties.

use super::Extractor;
use crate::core::{ClassMap, Extraction, LocalImportMap, PluginRef};
use crate::css::{self, Item};
use crate::errors::CompileError;
use crate::io::{self, walker, FileWalker};
use crate::js;
use crate::paths;
use crate::plugins::{PLUGIN_MINIFY, PLUGIN_SCOPED_NAMES};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub struct CssModulesExtractor;

impl Extractor for CssModulesExtractor {
    fn extract(
        &self,
        working_dir: &Path,
        blacklist: &[String],
        plugins: &[PluginRef],
    ) -> Result<Extraction, CompileError> {
        let scheme = if plugins.iter().any(|p| p.name() == PLUGIN_SCOPED_NAMES) {
            NameScheme::Scoped
        } else {
            NameScheme::Local
        };
        let minify = plugins.iter().any(|p| p.name() == PLUGIN_MINIFY);

        let referenced = collect_references(working_dir, blacklist)?;

        let mut map = ClassMap::new();
        let mut files = Vec::new();
        let mut styles = String::new();

        for (module_id, locals) in &referenced {
            let css_path = working_dir.join(module_id);
            let mut exports = LocalImportMap::new();

            if css_path.is_file() {
                let text = io::read_file(&css_path)?;
                let module = process_module(&text, module_id, scheme);
                exports = module.exports;
                styles.push_str(&module.fragment);
                files.push(PathBuf::from(module_id));
            } else {
                log::debug!("css module '{module_id}' is referenced but missing");
            }

            for local in locals {
                exports
                    .entry(local.clone())
                    .or_insert_with(|| scheme.global(module_id, local));
            }
            map.insert(module_id.clone(), exports);
        }

        if minify {
            styles = css::minify(&styles);
        }

        Ok(Extraction { map, files, styles })
    }
}

/// JS-referenced locals grouped by module identifier, blacklisted modules
/// already dropped. Sorted so fragment order is stable within a snapshot.
fn collect_references(
    working_dir: &Path,
    blacklist: &[String],
) -> Result<BTreeMap<String, BTreeSet<String>>, CompileError> {
    let js_files = FileWalker::new(working_dir).with_extension("js").walk()?;
    let mut referenced: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for js_file in &js_files {
        let source = io::read_file(js_file)?;
        let tree = js::parse(&source, js_file)?;

        for import in js::find_css_imports(&tree, &source) {
            let Some(module_id) = paths::module_id(js_file, &import.specifier, working_dir)
            else {
                log::debug!(
                    "skipping '{}' in {}: outside the working directory",
                    import.specifier,
                    js_file.display()
                );
                continue;
            };
            if walker::is_excluded(&working_dir.join(&module_id), working_dir, blacklist) {
                continue;
            }

            let locals = referenced.entry(module_id).or_default();
            if let Some(binding) = &import.binding {
                locals.extend(js::referenced_locals(&tree, &source, binding));
            }
        }
    }

    Ok(referenced)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum NameScheme {
    /// Global name equals the local name.
    Local,
    /// `<file-stem>__<local>`.
    Scoped,
}

impl NameScheme {
    fn global(self, module_id: &str, local: &str) -> String {
        match self {
            NameScheme::Local => local.to_string(),
            NameScheme::Scoped => format!("{}__{}", module_stem(module_id), local),
        }
    }
}

fn module_stem(module_id: &str) -> String {
    Path::new(module_id)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| module_id.to_string())
}

struct ProcessedModule {
    fragment: String,
    exports: LocalImportMap,
}

/// Process one CSS module: strip `composes:` declarations, rename class
/// selectors per the naming scheme, and compute the exported global-token
/// string per defined local.
fn process_module(text: &str, module_id: &str, scheme: NameScheme) -> ProcessedModule {
    let mut items = css::parse(text);
    let mut defined = BTreeSet::new();
    let mut composes: BTreeMap<String, Vec<String>> = BTreeMap::new();
    strip_composes(&mut items, &mut defined, &mut composes);

    if scheme == NameScheme::Scoped {
        css::rename_classes_in_items(&mut items, &mut |name| scheme.global(module_id, name));
    }

    let mut exports = LocalImportMap::new();
    for local in &defined {
        exports.insert(
            local.clone(),
            composed_tokens(local, &composes, module_id, scheme).join(" "),
        );
    }

    ProcessedModule {
        fragment: css::serialize(&items),
        exports,
    }
}

/// The local's own global name followed by the globals of everything it
/// composes, transitively, first-seen order, cycles ignored.
fn composed_tokens(
    local: &str,
    composes: &BTreeMap<String, Vec<String>>,
    module_id: &str,
    scheme: NameScheme,
) -> Vec<String> {
    let mut tokens = vec![scheme.global(module_id, local)];
    let mut visited = BTreeSet::from([local.to_string()]);
    let mut queue: Vec<String> = composes.get(local).cloned().unwrap_or_default();
    let mut index = 0;

    while index < queue.len() {
        let name = queue[index].clone();
        index += 1;
        if visited.insert(name.clone()) {
            tokens.push(scheme.global(module_id, &name));
            if let Some(next) = composes.get(&name) {
                queue.extend(next.iter().cloned());
            }
        }
    }

    tokens
}

fn strip_composes(
    items: &mut [Item],
    defined: &mut BTreeSet<String>,
    composes: &mut BTreeMap<String, Vec<String>>,
) {
    for item in items {
        match item {
            Item::Rule { prelude, body } => {
                let classes = css::prelude_classes(prelude);
                defined.extend(classes.iter().cloned());

                let mut kept = Vec::new();
                for declaration in css::split_declarations(body) {
                    match composes_value(&declaration) {
                        Some(value) => {
                            if value.contains(" from ") {
                                log::warn!(
                                    "'composes … from' is not supported, dropping '{declaration}'"
                                );
                                continue;
                            }
                            let names: Vec<String> =
                                value.split_whitespace().map(String::from).collect();
                            for class in &classes {
                                composes
                                    .entry(class.clone())
                                    .or_default()
                                    .extend(names.iter().cloned());
                            }
                        }
                        None => kept.push(declaration),
                    }
                }
                *body = kept
                    .iter()
                    .map(|d| format!("{d};"))
                    .collect::<Vec<_>>()
                    .join("\n");
            }
            Item::AtRule { items, .. } => strip_composes(items, defined, composes),
            Item::Statement(_) => {}
        }
    }
}

fn composes_value(declaration: &str) -> Option<&str> {
    let rest = declaration.strip_prefix("composes")?;
    let rest = rest.trim_start();
    rest.strip_prefix(':').map(str::trim)
}
