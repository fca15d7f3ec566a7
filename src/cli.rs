//! Minimal CLI: schema JSON → (generate | check | plan)
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::generate::{Generator, GeneratorOptions, DEFAULT_DISPLAY_KEY, DEFAULT_MARKER_SUFFIX, DEFAULT_OUTPUT_SUFFIX};
use crate::postprocess::Rustfmt;
use crate::schema::{load, SchemaUnit};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Display / std::error::Error impls for prost messages from an error taxonomy schema
#[derive(Parser, Debug)]
#[command(name = "proto-errgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate one `<unit>.errors.rs` per schema unit
    Generate(GenerateOut),
    /// validate every unit and report per-unit results
    Check(CheckOut),
    /// print the per-message generation plans as JSON
    Plan(PlanOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more schema documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GeneratorSettings {
    /// only messages whose name ends with this are treated as errors
    #[arg(long, default_value = DEFAULT_MARKER_SUFFIX)]
    marker_suffix: String,

    /// message option holding the display format
    #[arg(long, default_value = DEFAULT_DISPLAY_KEY)]
    display_key: String,

    /// suffix replacing `.proto` in artifact names
    #[arg(long, default_value = DEFAULT_OUTPUT_SUFFIX)]
    output_suffix: String,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generator_settings: GeneratorSettings,

    /// output directory (stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// pipe every artifact through rustfmt
    #[arg(long)]
    rustfmt: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generator_settings: GeneratorSettings,
}

#[derive(clap::Parser, Debug)]
struct PlanOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generator_settings: GeneratorSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_units(&self) -> Result<Vec<SchemaUnit>> {
        let units = load::load_all(&self.input, self.jq_expr.as_deref())
            .context("failed to load schema units")?;
        tracing::info!(units = units.len(), "loaded schema");
        Ok(units)
    }
}

impl GeneratorSettings {
    fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            marker_suffix: self.marker_suffix.clone(),
            display_key: self.display_key.clone(),
            output_suffix: self.output_suffix.clone(),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Generate(target) => {
                let units = target.input_settings.load_units()?;
                let mut generator = Generator::new(target.generator_settings.options());
                if target.rustfmt {
                    generator = generator.with_post_processor(Rustfmt::default());
                }
                let artifacts = generator.generate(&units)?;
                for artifact in &artifacts {
                    match target.out_dir.as_ref() {
                        Some(out_dir) => {
                            let path = out_dir.join(&artifact.name);
                            write_file(&path, &artifact.content)?;
                            tracing::info!(path = %path.display(), "wrote artifact");
                        }
                        None => println!("{}", artifact.content),
                    }
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Check(target) => {
                let units = target.input_settings.load_units()?;
                let generator = Generator::new(target.generator_settings.options());
                let mut failed = 0usize;
                for (unit, outcome) in units.iter().zip(generator.check(&units)) {
                    match outcome {
                        Ok(plan) => {
                            eprintln!("{} {} ({} error messages)", "ok".green().bold(), unit.file, plan.plans.len());
                        }
                        Err(error) => {
                            failed += 1;
                            eprintln!("{} {error}", "FAILED".red().bold());
                        }
                    }
                }
                if failed > 0 {
                    eprintln!("{failed} of {} units failed", units.len());
                    return Ok(ExitCode::FAILURE);
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Plan(target) => {
                let units = target.input_settings.load_units()?;
                let generator = Generator::new(target.generator_settings.options());
                let plans = generator
                    .check(&units)
                    .into_iter()
                    .collect::<Result<Vec<_>, _>>()?;
                let plans_src = serde_json::to_string_pretty(&plans)?;
                match target.out.as_ref() {
                    Some(out) => write_file(out, &plans_src)?,
                    None => println!("{plans_src}"),
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
