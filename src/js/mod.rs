//! JavaScript source scanning shared by the extraction engine and the
//! import rewriter.
//!
//! Both sides need the same facts about a file: which CSS modules it
//! imports (ES `import` or CommonJS `require`), under which binding, and
//! which locals it touches through that binding.

use crate::errors::CompileError;
use std::collections::BTreeSet;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// One CSS-module import found in a JavaScript file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssImport {
    /// Import specifier with quotes stripped, e.g. `./Button.css`.
    pub specifier: String,
    /// Default-import or `require` binding name; `None` for side-effect
    /// imports and destructuring patterns.
    pub binding: Option<String>,
    pub kind: CssImportKind,
    /// Byte span to replace when rewriting: the whole statement for ES
    /// imports, just the `require(...)` call for CommonJS.
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssImportKind {
    Import,
    Require,
}

pub fn parse(source: &str, path: &Path) -> Result<Tree, CompileError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|_| CompileError::JsParse {
            path: path.to_path_buf(),
        })?;
    parser.parse(source, None).ok_or(CompileError::JsParse {
        path: path.to_path_buf(),
    })
}

/// Find every import of a `.css` specifier in the file.
pub fn find_css_imports(tree: &Tree, source: &str) -> Vec<CssImport> {
    let mut imports = Vec::new();
    visit(tree.root_node(), &mut |node| {
        match node.kind() {
            "import_statement" => {
                if let Some(import) = css_import_statement(node, source) {
                    imports.push(import);
                }
            }
            "call_expression" => {
                if let Some(import) = css_require(node, source) {
                    imports.push(import);
                }
            }
            _ => {}
        }
    });
    imports
}

/// Collect the locals a file references through `binding`: member accesses
/// (`css.title`) and string subscripts (`css['title']`).
pub fn referenced_locals(tree: &Tree, source: &str, binding: &str) -> BTreeSet<String> {
    let mut locals = BTreeSet::new();
    visit(tree.root_node(), &mut |node| match node.kind() {
        "member_expression" => {
            if object_is(node, source, binding) {
                if let Some(property) = node.child_by_field_name("property") {
                    if let Ok(name) = property.utf8_text(source.as_bytes()) {
                        locals.insert(name.to_string());
                    }
                }
            }
        }
        "subscript_expression" => {
            if object_is(node, source, binding) {
                if let Some(index) = node.child_by_field_name("index") {
                    if index.kind() == "string" {
                        if let Ok(text) = index.utf8_text(source.as_bytes()) {
                            locals.insert(unquote(text).to_string());
                        }
                    }
                }
            }
        }
        _ => {}
    });
    locals
}

fn css_import_statement(node: Node, source: &str) -> Option<CssImport> {
    let source_node = node.child_by_field_name("source")?;
    let specifier = unquote(source_node.utf8_text(source.as_bytes()).ok()?);
    if !specifier.ends_with(".css") {
        return None;
    }

    let mut binding = None;
    for child in node.children(&mut node.walk()) {
        if child.kind() == "import_clause" {
            for clause_child in child.children(&mut child.walk()) {
                if clause_child.kind() == "identifier" {
                    binding = clause_child
                        .utf8_text(source.as_bytes())
                        .ok()
                        .map(String::from);
                }
            }
        }
    }

    Some(CssImport {
        specifier: specifier.to_string(),
        binding,
        kind: CssImportKind::Import,
        start: node.start_byte(),
        end: node.end_byte(),
    })
}

fn css_require(node: Node, source: &str) -> Option<CssImport> {
    let function = node.child_by_field_name("function")?;
    if function.utf8_text(source.as_bytes()).ok()? != "require" {
        return None;
    }

    let arguments = node.child_by_field_name("arguments")?;
    let mut specifier = None;
    for child in arguments.children(&mut arguments.walk()) {
        if child.kind() == "string" {
            specifier = child.utf8_text(source.as_bytes()).ok().map(unquote);
        }
    }
    let specifier = specifier?;
    if !specifier.ends_with(".css") {
        return None;
    }

    let binding = node.parent().filter(|p| p.kind() == "variable_declarator").and_then(|declarator| {
        let name = declarator.child_by_field_name("name")?;
        if name.kind() == "identifier" {
            name.utf8_text(source.as_bytes()).ok().map(String::from)
        } else {
            None
        }
    });

    Some(CssImport {
        specifier: specifier.to_string(),
        binding,
        kind: CssImportKind::Require,
        start: node.start_byte(),
        end: node.end_byte(),
    })
}

fn object_is(node: Node, source: &str, binding: &str) -> bool {
    node.child_by_field_name("object")
        .filter(|object| object.kind() == "identifier")
        .and_then(|object| object.utf8_text(source.as_bytes()).ok())
        .map(|name| name == binding)
        .unwrap_or(false)
}

fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

fn visit(node: Node, f: &mut impl FnMut(Node)) {
    f(node);
    for child in node.children(&mut node.walk()) {
        visit(child, f);
    }
}
