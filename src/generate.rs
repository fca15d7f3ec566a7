//! Orchestration: schema units in, one artifact per unit out.
use rayon::prelude::*;
use serde::Serialize;

use crate::emit;
use crate::error::UnitError;
use crate::plan::{plan_message, ErrorPlan, PlanContext};
use crate::postprocess::{Passthrough, PostProcessor};
use crate::schema::{Message, SchemaIndex, SchemaUnit};

pub const DEFAULT_MARKER_SUFFIX: &str = "Error";
pub const DEFAULT_DISPLAY_KEY: &str = "errors.display";
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".errors.rs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Only messages whose name ends with this are considered.
    pub marker_suffix: String,
    /// Option key holding the display format.
    pub display_key: String,
    /// Replaces `.proto` in the artifact name.
    pub output_suffix: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            marker_suffix: DEFAULT_MARKER_SUFFIX.to_string(),
            display_key: DEFAULT_DISPLAY_KEY.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn qualifies(&self, message: &Message) -> bool {
        !message.map_entry && message.name.ends_with(&self.marker_suffix)
    }

    /// `app/errors.proto` → `app/errors.errors.rs`.
    pub fn artifact_name(&self, unit: &SchemaUnit) -> String {
        let stem = unit.file.strip_suffix(".proto").unwrap_or(&unit.file);
        format!("{stem}{}", self.output_suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Relative output path.
    pub name: String,
    pub content: String,
}

/// Plans of one unit, for inspection.
#[derive(Debug, Clone, Serialize)]
pub struct UnitPlan {
    pub unit: String,
    pub package: String,
    pub plans: Vec<ErrorPlan>,
}

pub struct Generator {
    options: GeneratorOptions,
    post: Box<dyn PostProcessor>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options, post: Box::new(Passthrough) }
    }

    pub fn with_post_processor(mut self, post: impl PostProcessor + 'static) -> Self {
        self.post = Box::new(post);
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Plan every qualifying message of `unit`. The first malformed message
    /// aborts the unit.
    pub fn plan_unit(&self, unit: &SchemaUnit, index: &SchemaIndex<'_>) -> Result<UnitPlan, UnitError> {
        let span = tracing::debug_span!("unit", file = %unit.file);
        let _guard = span.enter();

        let mut plans = Vec::new();
        for (parents, message) in unit.all_messages() {
            if !self.options.qualifies(message) {
                continue;
            }
            let ctx = PlanContext {
                index,
                package: &unit.package,
                parents: &parents,
                options: &self.options,
            };
            let plan = plan_message(message, &ctx).map_err(|source| {
                tracing::debug!(error_message = source.message(), "planning failed");
                UnitError::Schema { unit: unit.file.clone(), source }
            })?;
            tracing::debug!(error_message = %message.name, kind = plan_kind(&plan), "planned");
            plans.push(plan);
        }
        Ok(UnitPlan { unit: unit.file.clone(), package: unit.package.clone(), plans })
    }

    /// Generate the artifact of one unit; `None` when nothing qualifies.
    pub fn generate_unit(&self, unit: &SchemaUnit, index: &SchemaIndex<'_>) -> Result<Option<Artifact>, UnitError> {
        let unit_plan = self.plan_unit(unit, index)?;
        if unit_plan.plans.is_empty() {
            tracing::debug!(file = %unit.file, "no error messages; skipping");
            return Ok(None);
        }

        let mut content = emit::header(unit);
        for plan in &unit_plan.plans {
            emit::plan(&mut content, plan);
        }

        let name = self.options.artifact_name(unit);
        let content = self.post.process(&name, content).map_err(|source| UnitError::PostProcess {
            unit: unit.file.clone(),
            source,
        })?;
        Ok(Some(Artifact { name, content }))
    }

    /// Generate every unit in parallel. The run fails if any unit does.
    pub fn generate(&self, units: &[SchemaUnit]) -> Result<Vec<Artifact>, UnitError> {
        let index = SchemaIndex::build(units);
        let artifacts = units
            .par_iter()
            .map(|unit| self.generate_unit(unit, &index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artifacts.into_iter().flatten().collect())
    }

    /// Plan every unit and report each outcome, without stopping at the
    /// first failure.
    pub fn check(&self, units: &[SchemaUnit]) -> Vec<Result<UnitPlan, UnitError>> {
        let index = SchemaIndex::build(units);
        units.par_iter().map(|unit| self.plan_unit(unit, &index)).collect()
    }
}

fn plan_kind(plan: &ErrorPlan) -> &'static str {
    match plan {
        ErrorPlan::Leaf(_) => "leaf",
        ErrorPlan::Sum(_) => "sum",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PostProcessError, SchemaError};
    use serde_json::json;

    fn units(value: serde_json::Value) -> Vec<SchemaUnit> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn artifact_is_named_after_the_unit() {
        let options = GeneratorOptions::default();
        let unit = units(json!([{"file": "app/errors.proto"}])).remove(0);
        assert_eq!(options.artifact_name(&unit), "app/errors.errors.rs");
    }

    #[test]
    fn only_marked_non_map_entry_messages_qualify() {
        let found = units(json!([{
            "file": "a.proto",
            "messages": [
                {"name": "PlainError", "options": {"errors.display": "plain"}},
                {"name": "Request", "nested": [
                    {"name": "InnerError", "options": {"errors.display": "inner"}},
                    {"name": "LabelsError", "map_entry": true}
                ]}
            ]
        }]));
        let index = SchemaIndex::build(&found);
        let plan = Generator::default().plan_unit(&found[0], &index).unwrap();
        let names: Vec<_> = plan.plans.iter().map(ErrorPlan::message).collect();
        assert_eq!(names, ["PlainError", "InnerError"]);
        let ErrorPlan::Leaf(inner) = &plan.plans[1] else { panic!("expected leaf") };
        assert_eq!(inner.rust_type, "request::InnerError");
    }

    #[test]
    fn units_without_errors_produce_nothing() {
        let found = units(json!([{"file": "a.proto", "messages": [{"name": "Request"}]}]));
        let artifacts = Generator::default().generate(&found).unwrap();
        assert!(artifacts.is_empty());
    }

    #[test]
    fn one_bad_message_aborts_its_unit() {
        let found = units(json!([
            {"file": "good.proto", "messages": [{"name": "GoodError", "options": {"errors.display": "ok"}}]},
            {"file": "bad.proto", "messages": [
                {"name": "FineError", "options": {"errors.display": "fine"}},
                {"name": "BrokenError"}
            ]}
        ]));
        let err = Generator::default().generate(&found).unwrap_err();
        assert_eq!(err.unit(), "bad.proto");
        assert!(matches!(
            err,
            UnitError::Schema { source: SchemaError::MissingDisplayFormat { ref message, .. }, .. } if message == "BrokenError"
        ));

        let outcomes = Generator::default().check(&found);
        assert!(outcomes[0].is_ok());
        assert!(outcomes[1].is_err());
    }

    #[test]
    fn cross_unit_causes_resolve_through_the_shared_index() {
        let found = units(json!([
            {"file": "common.proto", "package": "example.common", "messages": [
                {"name": "NotFoundError", "options": {"errors.display": "not found: {Entity}"},
                 "fields": [{"name": "Entity", "type": "string"}]}
            ]},
            {"file": "app.proto", "package": "example.app", "messages": [
                {"name": "LookupError", "options": {"errors.display": "lookup: {cause}"},
                 "fields": [{"name": "cause", "type": {"message": ".example.common.NotFoundError"}}]}
            ]}
        ]));
        let artifacts = Generator::default().generate(&found).unwrap();
        let names: Vec<_> = artifacts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["common.errors.rs", "app.errors.rs"]);
        assert!(artifacts[1].content.contains("self.cause.as_ref().map(|v| v as &(dyn ::std::error::Error + 'static))"));
    }

    struct Shout;

    impl PostProcessor for Shout {
        fn process(&self, _name: &str, content: String) -> Result<String, PostProcessError> {
            Ok(content.to_uppercase())
        }
    }

    #[test]
    fn post_processor_sees_the_whole_artifact() {
        let found = units(json!([
            {"file": "a.proto", "messages": [{"name": "AError", "options": {"errors.display": "a"}}]}
        ]));
        let artifacts = Generator::default().with_post_processor(Shout).generate(&found).unwrap();
        assert!(artifacts[0].content.starts_with("// CODE GENERATED BY PROTO-ERRGEN"));
    }
}
