//! Class-selector listing and renaming over parsed stylesheet items.

use super::parser::{parse, Item};
use std::collections::BTreeSet;

/// Collect every class name a stylesheet defines, with the leading `.`
/// stripped. This is the authoritative set the selector pruner checks
/// tokens against.
pub fn list_class_selectors(css: &str) -> BTreeSet<String> {
    class_selectors(&parse(css))
}

/// Collect class names from already-parsed items.
pub fn class_selectors(items: &[Item]) -> BTreeSet<String> {
    let mut classes = BTreeSet::new();
    collect(items, &mut classes);
    classes
}

fn collect(items: &[Item], classes: &mut BTreeSet<String>) {
    for item in items {
        match item {
            Item::Rule { prelude, .. } => scan_prelude(prelude, &mut |class| {
                classes.insert(class.to_string());
            }),
            Item::AtRule { items, .. } => collect(items, classes),
            Item::Statement(_) => {}
        }
    }
}

/// Class names of a single selector prelude.
pub fn prelude_classes(prelude: &str) -> BTreeSet<String> {
    let mut classes = BTreeSet::new();
    scan_prelude(prelude, &mut |class| {
        classes.insert(class.to_string());
    });
    classes
}

/// Rewrite class names in every rule prelude of `items` through `rename`.
pub fn rename_classes_in_items(items: &mut [Item], rename: &mut dyn FnMut(&str) -> String) {
    for item in items {
        match item {
            Item::Rule { prelude, .. } => *prelude = rename_classes(prelude, rename),
            Item::AtRule { items, .. } => rename_classes_in_items(items, rename),
            Item::Statement(_) => {}
        }
    }
}

/// Rewrite every class name in a selector prelude through `rename`,
/// leaving everything else (elements, ids, pseudos, attribute selectors)
/// untouched.
pub fn rename_classes(prelude: &str, rename: &mut dyn FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(prelude.len());
    walk_prelude(prelude, &mut |piece| match piece {
        Piece::Class(name) => {
            out.push('.');
            out.push_str(&rename(name));
        }
        Piece::Other(text) => out.push_str(text),
    });
    out
}

fn scan_prelude(prelude: &str, found: &mut dyn FnMut(&str)) {
    walk_prelude(prelude, &mut |piece| {
        if let Piece::Class(name) = piece {
            found(name);
        }
    });
}

enum Piece<'a> {
    Class(&'a str),
    Other(&'a str),
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii()
}

/// Walk a selector prelude emitting class names and verbatim spans.
/// Attribute selectors and quoted strings are opaque: a `.` inside them is
/// never a class.
fn walk_prelude(prelude: &str, emit: &mut dyn FnMut(Piece)) {
    let bytes = prelude.as_bytes();
    let mut pos = 0;
    let mut plain_start = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'[' => {
                pos = skip_bracketed(prelude, pos);
            }
            quote @ (b'"' | b'\'') => {
                pos = skip_string(prelude, pos, quote);
            }
            b'.' => {
                let name_start = pos + 1;
                let mut end = name_start;
                while end < bytes.len() {
                    let ch = prelude[end..].chars().next().expect("in bounds");
                    if is_ident_char(ch) {
                        end += ch.len_utf8();
                    } else {
                        break;
                    }
                }
                if end > name_start {
                    emit(Piece::Other(&prelude[plain_start..pos]));
                    emit(Piece::Class(&prelude[name_start..end]));
                    plain_start = end;
                }
                pos = end.max(name_start);
            }
            _ => pos += 1,
        }
    }
    if plain_start < prelude.len() {
        emit(Piece::Other(&prelude[plain_start..]));
    }
}

fn skip_bracketed(prelude: &str, mut pos: usize) -> usize {
    let bytes = prelude.as_bytes();
    pos += 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b']' => return pos + 1,
            quote @ (b'"' | b'\'') => pos = skip_string(prelude, pos, quote),
            _ => pos += 1,
        }
    }
    pos
}

fn skip_string(prelude: &str, mut pos: usize, quote: u8) -> usize {
    let bytes = prelude.as_bytes();
    pos += 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b if b == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    pos
}
