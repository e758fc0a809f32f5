//! Lean structural CSS handling.
//!
//! The extraction engine uses it to strip `composes:` declarations and
//! rename class selectors; the selector pruner uses it to list the class
//! selectors a bundled stylesheet actually defines. It is deliberately not
//! a general CSS preprocessor: rules, at-rules, and declaration bodies are
//! recognized structurally and everything inside bodies is carried
//! verbatim.

pub mod parser;
pub mod selectors;

pub use parser::{minify, parse, serialize, split_declarations, Item};
pub use selectors::{
    class_selectors, list_class_selectors, prelude_classes, rename_classes,
    rename_classes_in_items,
};
