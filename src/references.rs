//! `{field}` placeholders inside display-format annotations.
//!
//! Grammar: `{` identifier `}` with identifier = `[A-Za-z0-9_]+`. Anything else
//! (stray braces, `{with space}`, `{}`) is plain text.
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex is valid")
});

/// One placeholder occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    pub name: &'a str,
    /// Byte span of the whole `{name}` token in the source.
    pub span: Range<usize>,
}

/// Every placeholder of a format string, left to right, repeats included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct References<'a> {
    source: &'a str,
    occurrences: Vec<Reference<'a>>,
}

impl<'a> References<'a> {
    pub fn scan(source: &'a str) -> Self {
        let occurrences = PLACEHOLDER
            .captures_iter(source)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?;
                Some(Reference { name: name.as_str(), span: whole.range() })
            })
            .collect();
        Self { source, occurrences }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn occurrences(&self) -> &[Reference<'a>] {
        &self.occurrences
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Distinct names in order of first occurrence.
    pub fn names(&self) -> Vec<&'a str> {
        let mut out: Vec<&'a str> = Vec::new();
        for r in &self.occurrences {
            if !out.contains(&r.name) {
                out.push(r.name);
            }
        }
        out
    }

    pub fn contains(&self, name: &str) -> bool {
        self.occurrences.iter().any(|r| r.name == name)
    }
}

/// Replace every placeholder of `source` with `lookup(name)` directly in the
/// original text. Names the lookup does not know are left untouched.
pub fn substitute<F>(source: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(source, |caps: &regex::Captures<'_>| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
