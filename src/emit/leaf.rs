use super::{close_impl_fn, open_display, open_error, string_literal, DYN_ERROR};
use crate::plan::LeafPlan;

/// `Display` from the compiled format, `source()` from the cause field.
pub fn emit(out: &mut String, leaf: &LeafPlan) {
    open_display(out, &leaf.rust_type);
    match leaf.format.literal_text() {
        Some(text) => out.push_str(&format!("        f.write_str({})\n", string_literal(&text))),
        None => {
            let args: Vec<&str> = leaf.format.accessors.iter().map(|a| a.expr.as_str()).collect();
            out.push_str(&format!(
                "        ::std::write!(f, {}, {})\n",
                string_literal(&leaf.format.format_literal()),
                args.join(", ")
            ));
        }
    }
    close_impl_fn(out);

    open_error(out, &leaf.rust_type);
    match &leaf.cause {
        Some(cause) => out.push_str(&format!(
            "        self.{}.as_ref().map(|v| v as &{DYN_ERROR})\n",
            cause.ident
        )),
        None => out.push_str("        ::std::option::Option::None\n"),
    }
    close_impl_fn(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{CompiledFormat, Segment};
    use crate::plan::{Accessor, CauseField};
    use pretty_assertions::assert_eq;

    fn accessor(field: &str, expr: &str) -> Accessor {
        Accessor { field: field.into(), expr: expr.into() }
    }

    #[test]
    fn config_error_renders_fields_and_has_no_source() {
        let plan = LeafPlan {
            message: "ConfigError".into(),
            rust_type: "ConfigError".into(),
            format: CompiledFormat {
                segments: vec![
                    Segment::Text("invalid config: ".into()),
                    Segment::Slot,
                    Segment::Text("=".into()),
                    Segment::Slot,
                ],
                accessors: vec![accessor("Key", "self.key"), accessor("Value", "self.value")],
            },
            cause: None,
        };
        let mut out = String::new();
        emit(&mut out, &plan);
        assert_eq!(
            out,
            r#"
impl ::std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        ::std::write!(f, "invalid config: {}={}", self.key, self.value)
    }
}

impl ::std::error::Error for ConfigError {
    fn source(&self) -> ::std::option::Option<&(dyn ::std::error::Error + 'static)> {
        ::std::option::Option::None
    }
}
"#
        );
    }

    #[test]
    fn io_error_returns_its_cause() {
        let plan = LeafPlan {
            message: "IOError".into(),
            rust_type: "IoError".into(),
            format: CompiledFormat {
                segments: vec![Segment::Text("could not read ".into()), Segment::Slot],
                accessors: vec![accessor("Path", "self.path")],
            },
            cause: Some(CauseField { field: "Cause".into(), ident: "cause".into() }),
        };
        let mut out = String::new();
        emit(&mut out, &plan);
        assert!(out.contains("impl ::std::error::Error for IoError {"));
        assert!(out.contains("        self.cause.as_ref().map(|v| v as &(dyn ::std::error::Error + 'static))\n"));
    }

    #[test]
    fn plain_text_uses_write_str() {
        let plan = LeafPlan {
            message: "TimeoutError".into(),
            rust_type: "TimeoutError".into(),
            format: CompiledFormat { segments: vec![Segment::Text("timed {out}".into())], accessors: vec![] },
            cause: None,
        };
        let mut out = String::new();
        emit(&mut out, &plan);
        assert!(out.contains("        f.write_str(\"timed {out}\")\n"));
    }
}
