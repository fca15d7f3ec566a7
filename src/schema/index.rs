//! Read-only lookup of messages by fully qualified name across every loaded
//! unit.
use indexmap::IndexMap;

use super::{Message, SchemaUnit};

#[derive(Debug, Clone)]
pub struct MessageEntry<'a> {
    pub unit: &'a SchemaUnit,
    pub message: &'a Message,
    /// Enclosing messages, outermost first.
    pub parents: Vec<&'a str>,
}

/// Snapshot of all messages, keyed by full name without the leading dot
/// (`example.app.IOError`, `example.app.Outer.Inner`).
#[derive(Debug, Default)]
pub struct SchemaIndex<'a> {
    entries: IndexMap<String, MessageEntry<'a>>,
    packages: Vec<&'a str>,
}

impl<'a> SchemaIndex<'a> {
    pub fn build(units: &'a [SchemaUnit]) -> Self {
        let mut entries = IndexMap::new();
        let mut packages: Vec<&'a str> = Vec::new();
        for unit in units {
            if !unit.package.is_empty() && !packages.contains(&unit.package.as_str()) {
                packages.push(&unit.package);
            }
            for (parents, message) in unit.all_messages() {
                let full_name = full_name(&unit.package, &parents, &message.name);
                entries.insert(full_name, MessageEntry { unit, message, parents });
            }
        }
        Self { entries, packages }
    }

    /// Split a fully qualified type name (leading dot optional) into the
    /// longest loaded package and the remaining dotted path inside it.
    pub fn split_package<'n>(&self, type_name: &'n str) -> Option<(&'a str, &'n str)> {
        let name = type_name.strip_prefix('.').unwrap_or(type_name);
        self.packages
            .iter()
            .filter_map(|package| {
                let rest = name.strip_prefix(package)?.strip_prefix('.')?;
                Some((*package, rest))
            })
            .max_by_key(|(package, _)| package.len())
    }

    /// Resolve a type reference as written on a field. Fully qualified names
    /// (with or without the leading dot) are tried first, then the name
    /// relative to `package`.
    pub fn resolve(&self, type_name: &str, package: &str) -> Option<&MessageEntry<'a>> {
        let name = type_name.strip_prefix('.').unwrap_or(type_name);
        self.entries.get(name).or_else(|| {
            if package.is_empty() || type_name.starts_with('.') {
                None
            } else {
                self.entries.get(&format!("{package}.{name}"))
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn full_name(package: &str, parents: &[&str], name: &str) -> String {
    let mut out = String::new();
    for segment in std::iter::once(package).chain(parents.iter().copied()) {
        if !segment.is_empty() {
            out.push_str(segment);
            out.push('.');
        }
    }
    out.push_str(name);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_qualified_relative_and_nested_names() {
        let units: Vec<SchemaUnit> = serde_json::from_value(json!([
            {
                "file": "app.proto",
                "package": "example.app",
                "messages": [
                    {"name": "Outer", "nested": [{"name": "InnerError"}]}
                ]
            },
            {
                "file": "common.proto",
                "package": "example.common",
                "messages": [{"name": "NotFoundError"}]
            }
        ]))
        .unwrap();
        let index = SchemaIndex::build(&units);
        assert_eq!(index.len(), 3);

        let inner = index.resolve(".example.app.Outer.InnerError", "").unwrap();
        assert_eq!(inner.message.name, "InnerError");
        assert_eq!(inner.parents, ["Outer"]);

        let relative = index.resolve("Outer.InnerError", "example.app").unwrap();
        assert_eq!(relative.unit.file, "app.proto");

        let other = index.resolve("example.common.NotFoundError", "example.app").unwrap();
        assert_eq!(other.unit.package, "example.common");

        assert!(index.resolve(".Outer", "example.app").is_none());
    }

    #[test]
    fn splits_names_on_the_longest_loaded_package() {
        let units: Vec<SchemaUnit> = serde_json::from_value(json!([
            {"file": "a.proto", "package": "example"},
            {"file": "b.proto", "package": "example.app"}
        ]))
        .unwrap();
        let index = SchemaIndex::build(&units);
        assert_eq!(index.split_package(".example.app.Outer.Kind"), Some(("example.app", "Outer.Kind")));
        assert_eq!(index.split_package("example.Severity"), Some(("example", "Severity")));
        assert_eq!(index.split_package(".examples.Severity"), None);
    }

    #[test]
    fn full_name_skips_empty_package() {
        assert_eq!(full_name("", &[], "RootError"), "RootError");
        assert_eq!(full_name("a.b", &["Outer"], "Inner"), "a.b.Outer.Inner");
    }
}
