//! Identifier conventions of prost-generated code.
//!
//! The emitted impls refer to structs, fields and oneof enums that prost
//! generated, so names must be derived exactly the way prost derives them
//! (heck-style word splitting, raw identifiers for keywords).

/// Split an identifier into words: `IOError` → `IO`, `Error`;
/// `config_error` → `config`, `error`; `Int32Value` → `Int32`, `Value`.
pub fn words(s: &str) -> Vec<&str> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mode {
        Boundary,
        Lowercase,
        Uppercase,
    }

    let mut out = Vec::new();
    for chunk in s.split(|c: char| !c.is_alphanumeric()) {
        if chunk.is_empty() {
            continue;
        }
        let mut start = 0;
        let mut mode = Mode::Boundary;
        let mut chars = chunk.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let next_mode = if c.is_lowercase() {
                Mode::Lowercase
            } else if c.is_uppercase() {
                Mode::Uppercase
            } else {
                mode
            };
            if let Some(&(j, next)) = chars.peek() {
                if next_mode == Mode::Lowercase && next.is_uppercase() {
                    // fooBar: end the word after `o`
                    out.push(&chunk[start..j]);
                    start = j;
                    mode = Mode::Boundary;
                    continue;
                }
                if mode == Mode::Uppercase && c.is_uppercase() && next.is_lowercase() {
                    // IOError: end the word before `E`
                    if start < i {
                        out.push(&chunk[start..i]);
                    }
                    start = i;
                }
            }
            mode = next_mode;
        }
        out.push(&chunk[start..]);
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn to_upper_camel(s: &str) -> String {
    words(s).into_iter().map(capitalize).collect()
}

pub fn to_snake(s: &str) -> String {
    words(s).into_iter().map(str::to_lowercase).collect::<Vec<_>>().join("_")
}

/// Snake case identifier for fields, oneof fields and modules.
pub fn snake_ident(s: &str) -> String {
    escape(to_snake(s))
}

/// UpperCamel identifier for types and oneof variants.
pub fn type_ident(s: &str) -> String {
    escape(to_upper_camel(s))
}

/// prost-build's sanitizing: most keywords become raw identifiers, the ones
/// that cannot be raw get a trailing `_`, and a leading digit gets a leading
/// `_`.
fn escape(ident: String) -> String {
    match ident.as_str() {
        "_" | "self" | "super" | "crate" | "Self" | "extern" => format!("{ident}_"),
        s if is_keyword(s) => format!("r#{ident}"),
        s if s.starts_with(|c: char| c.is_numeric()) => format!("_{ident}"),
        _ => ident,
    }
}

fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "abstract" | "as" | "async" | "await" | "become" | "box" | "break" | "const"
            | "continue" | "do" | "dyn" | "else" | "enum" | "false" | "final"
            | "fn" | "for" | "gen" | "if" | "impl" | "in" | "let" | "loop" | "macro" | "match"
            | "mod" | "move" | "mut" | "override" | "priv" | "pub" | "ref" | "return"
            | "static" | "struct" | "trait" | "true" | "try" | "type" | "typeof" | "unsafe"
            | "unsized" | "use" | "virtual" | "where" | "while" | "yield"
    )
}

/// Path of a message type as seen from the module prost generated for
/// `from_package`: shared package prefix dropped, `super::` for each remaining
/// local segment, then the target package, enclosing message modules and the
/// type itself.
pub fn type_path(from_package: &str, package: &str, parents: &[&str], name: &str) -> String {
    let split = |p: &str| -> Vec<String> {
        p.split('.').filter(|s| !s.is_empty()).map(str::to_string).collect()
    };
    let local = split(from_package);
    let target = split(package);
    let shared = local.iter().zip(&target).take_while(|(a, b)| a == b).count();

    let mut segments: Vec<String> = Vec::new();
    segments.extend(std::iter::repeat_n("super".to_string(), local.len() - shared));
    segments.extend(target[shared..].iter().map(|s| snake_ident(s)));
    segments.extend(parents.iter().map(|p| snake_ident(p)));
    segments.push(type_ident(name));
    segments.join("::")
}
