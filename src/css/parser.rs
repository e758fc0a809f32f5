//! Structural CSS parsing: rules, at-rules, and statements.

/// One structural item of a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// `prelude { body }` where the body is declaration text kept verbatim.
    Rule { prelude: String, body: String },
    /// `@prelude { items }` — conditional groups (`@media`, `@supports`)
    /// and any other block at-rule; inner items are parsed recursively.
    AtRule { prelude: String, items: Vec<Item> },
    /// A block-less statement such as `@import url(x)`.
    Statement(String),
}

/// Parse stylesheet text into structural items.
///
/// Comments are dropped, strings are carried verbatim, and unbalanced
/// input parses as far as it goes instead of failing: the pipeline treats
/// stylesheets it bundled itself as authoritative and has nothing better
/// to do with a malformed tail than ignore it.
pub fn parse(css: &str) -> Vec<Item> {
    let mut pos = 0;
    parse_items(css, &mut pos)
}

fn parse_items(src: &str, pos: &mut usize) -> Vec<Item> {
    let bytes = src.as_bytes();
    let mut items = Vec::new();
    let mut chunk = String::new();

    while *pos < bytes.len() {
        match bytes[*pos] {
            b'/' if bytes.get(*pos + 1) == Some(&b'*') => skip_comment(src, pos),
            quote @ (b'"' | b'\'') => copy_string(src, pos, quote, &mut chunk),
            b'{' => {
                *pos += 1;
                let prelude = chunk.trim().to_string();
                chunk.clear();
                if prelude.starts_with('@') {
                    let inner = parse_items(src, pos);
                    items.push(Item::AtRule {
                        prelude,
                        items: inner,
                    });
                } else {
                    let body = read_block_body(src, pos);
                    items.push(Item::Rule {
                        prelude,
                        body: body.trim().to_string(),
                    });
                }
            }
            b'}' => {
                *pos += 1;
                flush_statement(&mut chunk, &mut items);
                return items;
            }
            b';' => {
                *pos += 1;
                flush_statement(&mut chunk, &mut items);
            }
            _ => {
                let ch = src[*pos..].chars().next().expect("in bounds");
                chunk.push(ch);
                *pos += ch.len_utf8();
            }
        }
    }

    flush_statement(&mut chunk, &mut items);
    items
}

fn flush_statement(chunk: &mut String, items: &mut Vec<Item>) {
    let stmt = chunk.trim();
    if !stmt.is_empty() {
        items.push(Item::Statement(stmt.to_string()));
    }
    chunk.clear();
}

/// Consume a declaration block up to its matching `}`, returning the raw
/// body text. Nested braces, strings, and comments are honored.
fn read_block_body(src: &str, pos: &mut usize) -> String {
    let bytes = src.as_bytes();
    let mut body = String::new();
    let mut depth = 1usize;

    while *pos < bytes.len() {
        match bytes[*pos] {
            b'/' if bytes.get(*pos + 1) == Some(&b'*') => skip_comment(src, pos),
            quote @ (b'"' | b'\'') => copy_string(src, pos, quote, &mut body),
            b'{' => {
                depth += 1;
                body.push('{');
                *pos += 1;
            }
            b'}' => {
                depth -= 1;
                *pos += 1;
                if depth == 0 {
                    break;
                }
                body.push('}');
            }
            _ => {
                let ch = src[*pos..].chars().next().expect("in bounds");
                body.push(ch);
                *pos += ch.len_utf8();
            }
        }
    }

    body
}

fn skip_comment(src: &str, pos: &mut usize) {
    let bytes = src.as_bytes();
    *pos += 2;
    while *pos < bytes.len() {
        if bytes[*pos] == b'*' && bytes.get(*pos + 1) == Some(&b'/') {
            *pos += 2;
            return;
        }
        *pos += 1;
    }
}

fn copy_string(src: &str, pos: &mut usize, quote: u8, out: &mut String) {
    let bytes = src.as_bytes();
    out.push(quote as char);
    *pos += 1;
    while *pos < bytes.len() {
        let b = bytes[*pos];
        if b == b'\\' && *pos + 1 < bytes.len() {
            let escaped = &src[*pos..];
            let mut chars = escaped.chars();
            out.push(chars.next().expect("backslash"));
            let ch = chars.next().expect("escaped char");
            out.push(ch);
            *pos += 1 + ch.len_utf8();
            continue;
        }
        let ch = src[*pos..].chars().next().expect("in bounds");
        out.push(ch);
        *pos += ch.len_utf8();
        if b == quote {
            return;
        }
    }
}

/// Serialize items back to stylesheet text with two-space indentation.
pub fn serialize(items: &[Item]) -> String {
    let mut out = String::new();
    write_items(&mut out, items, 0);
    out
}

fn write_items(out: &mut String, items: &[Item], depth: usize) {
    let indent = "  ".repeat(depth);
    for item in items {
        match item {
            Item::Statement(stmt) => {
                out.push_str(&indent);
                out.push_str(stmt);
                out.push_str(";\n");
            }
            Item::Rule { prelude, body } => {
                out.push_str(&indent);
                out.push_str(prelude);
                out.push_str(" {\n");
                for line in body.lines() {
                    let line = line.trim();
                    if !line.is_empty() {
                        out.push_str(&indent);
                        out.push_str("  ");
                        out.push_str(line);
                        out.push('\n');
                    }
                }
                out.push_str(&indent);
                out.push_str("}\n");
            }
            Item::AtRule { prelude, items } => {
                out.push_str(&indent);
                out.push_str(prelude);
                out.push_str(" {\n");
                write_items(out, items, depth + 1);
                out.push_str(&indent);
                out.push_str("}\n");
            }
        }
    }
}

/// Collapse a stylesheet to a compact single-line form: comments removed,
/// whitespace runs squeezed, no spaces around structural punctuation.
pub fn minify(css: &str) -> String {
    let bytes = css.as_bytes();
    let mut pos = 0;
    let mut out = String::with_capacity(css.len());
    let mut pending_space = false;

    while pos < bytes.len() {
        match bytes[pos] {
            b'/' if bytes.get(pos + 1) == Some(&b'*') => skip_comment(css, &mut pos),
            quote @ (b'"' | b'\'') => {
                if pending_space && needs_separator(&out) {
                    out.push(' ');
                }
                pending_space = false;
                copy_string(css, &mut pos, quote, &mut out);
            }
            b if (b as char).is_whitespace() => {
                pending_space = true;
                pos += 1;
            }
            b @ (b'{' | b'}' | b':' | b';' | b',' | b'>') => {
                while out.ends_with(' ') {
                    out.pop();
                }
                out.push(b as char);
                pending_space = false;
                pos += 1;
            }
            _ => {
                if pending_space && needs_separator(&out) {
                    out.push(' ');
                }
                pending_space = false;
                let ch = css[pos..].chars().next().expect("in bounds");
                out.push(ch);
                pos += ch.len_utf8();
            }
        }
    }

    out
}

fn needs_separator(out: &str) -> bool {
    !matches!(
        out.chars().next_back(),
        None | Some('{') | Some('}') | Some(':') | Some(';') | Some(',') | Some('>')
    )
}

/// Split a declaration body on `;`, honoring strings and parentheses.
/// Returned declarations are trimmed and non-empty.
pub fn split_declarations(body: &str) -> Vec<String> {
    let bytes = body.as_bytes();
    let mut pos = 0;
    let mut current = String::new();
    let mut declarations = Vec::new();
    let mut paren_depth = 0usize;

    while pos < bytes.len() {
        match bytes[pos] {
            b'/' if bytes.get(pos + 1) == Some(&b'*') => skip_comment(body, &mut pos),
            quote @ (b'"' | b'\'') => copy_string(body, &mut pos, quote, &mut current),
            b'(' => {
                paren_depth += 1;
                current.push('(');
                pos += 1;
            }
            b')' => {
                paren_depth = paren_depth.saturating_sub(1);
                current.push(')');
                pos += 1;
            }
            b';' if paren_depth == 0 => {
                pos += 1;
                let decl = current.trim();
                if !decl.is_empty() {
                    declarations.push(decl.to_string());
                }
                current.clear();
            }
            _ => {
                let ch = body[pos..].chars().next().expect("in bounds");
                current.push(ch);
                pos += ch.len_utf8();
            }
        }
    }
    let decl = current.trim();
    if !decl.is_empty() {
        declarations.push(decl.to_string());
    }

    declarations
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_rules_and_statements() {
        let items = parse(indoc! {"
            @import url('reset.css');
            .title { color: red; }
        "});
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Item::Statement("@import url('reset.css')".into()));
        assert_eq!(
            items[1],
            Item::Rule {
                prelude: ".title".into(),
                body: "color: red;".into()
            }
        );
    }

    #[test]
    fn parses_nested_at_rules() {
        let items = parse(".a { color: red; } @media (min-width: 600px) { .b { color: blue; } }");
        match &items[1] {
            Item::AtRule { prelude, items } => {
                assert_eq!(prelude, "@media (min-width: 600px)");
                assert_eq!(
                    items[0],
                    Item::Rule {
                        prelude: ".b".into(),
                        body: "color: blue;".into()
                    }
                );
            }
            other => panic!("expected at-rule, got {other:?}"),
        }
    }

    #[test]
    fn drops_comments_and_keeps_strings() {
        let items = parse(".a { /* brace { in comment */ content: \"};\"; }");
        assert_eq!(
            items[0],
            Item::Rule {
                prelude: ".a".into(),
                body: "content: \"};\";".into()
            }
        );
    }

    #[test]
    fn serializes_round_trippable_text() {
        let css = ".a {\n  color: red;\n}\n@media print {\n  .b {\n    display: none;\n  }\n}\n";
        let serialized = serialize(&parse(css));
        assert_eq!(serialized, css);
        assert_eq!(parse(&serialized), parse(css));
    }

    #[test]
    fn minify_collapses_whitespace_and_drops_comments() {
        let minified = minify(".a {\n  color: red; /* note */\n}\n\n.b > .c { margin: 0 auto; }\n");
        assert_eq!(minified, ".a{color:red;}.b>.c{margin:0 auto;}");
    }

    #[test]
    fn split_declarations_honors_strings_and_parens() {
        let decls = split_declarations(
            "background: url(data:image/png;base64,xyz); content: \"a;b\"; color: red",
        );
        assert_eq!(
            decls,
            [
                "background: url(data:image/png;base64,xyz)",
                "content: \"a;b\"",
                "color: red"
            ]
        );
    }
}
