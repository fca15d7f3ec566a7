//! Display-format compiler.
//!
//! Rewrites `could not read {Path}: {Cause}` into a positional template
//! (`could not read {}: {}`) plus one accessor per placeholder occurrence.
//! Field lookup is a closure, so nothing here depends on the schema types.
use serde::Serialize;

use crate::references::References;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment {
    Text(String),
    /// Positional substitution point.
    Slot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledFormat<A> {
    pub segments: Vec<Segment>,
    /// One entry per slot, in slot order.
    pub accessors: Vec<A>,
}

/// A placeholder naming something the lookup does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

/// Compile `source`, resolving each placeholder name with `lookup`.
pub fn compile<A, F>(source: &str, mut lookup: F) -> Result<CompiledFormat<A>, UnknownField>
where
    A: Clone,
    F: FnMut(&str) -> Option<A>,
{
    let refs = References::scan(source);

    // 1) every distinct name must resolve
    let mut resolved: Vec<(&str, A)> = Vec::new();
    for name in refs.names() {
        match lookup(name) {
            Some(accessor) => resolved.push((name, accessor)),
            None => return Err(UnknownField(name.to_string())),
        }
    }

    // 2) one accessor per occurrence, 3) one slot per occurrence
    let mut segments = Vec::new();
    let mut accessors = Vec::with_capacity(refs.len());
    let mut cursor = 0;
    for occurrence in refs.occurrences() {
        if cursor < occurrence.span.start {
            segments.push(Segment::Text(source[cursor..occurrence.span.start].to_string()));
        }
        segments.push(Segment::Slot);
        let accessor = resolved
            .iter()
            .find(|(name, _)| *name == occurrence.name)
            .map(|(_, a)| a.clone())
            .ok_or_else(|| UnknownField(occurrence.name.to_string()))?;
        accessors.push(accessor);
        cursor = occurrence.span.end;
    }
    if cursor < source.len() {
        segments.push(Segment::Text(source[cursor..].to_string()));
    }

    Ok(CompiledFormat { segments, accessors })
}

impl<A> CompiledFormat<A> {
    pub fn slot_count(&self) -> usize {
        self.segments.iter().filter(|s| matches!(s, Segment::Slot)).count()
    }

    /// The template as a Rust format string: `{}` per slot, literal braces
    /// doubled.
    pub fn format_literal(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(&text.replace('{', "{{").replace('}', "}}")),
                Segment::Slot => out.push_str("{}"),
            }
        }
        out
    }

    /// Plain text of the template when it has no slots.
    pub fn literal_text(&self) -> Option<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot => return None,
            }
        }
        Some(out)
    }

    /// Fill the slots with `values`, in order.
    pub fn substitute<S: AsRef<str>>(&self, values: &[S]) -> String {
        let mut values = values.iter();
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot => {
                    if let Some(v) = values.next() {
                        out.push_str(v.as_ref());
                    }
                }
            }
        }
        out
    }

    pub fn map_accessors<B>(self, f: impl FnMut(A) -> B) -> CompiledFormat<B> {
        CompiledFormat {
            segments: self.segments,
            accessors: self.accessors.into_iter().map(f).collect(),
        }
    }
}
