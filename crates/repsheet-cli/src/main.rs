//! repsheet CLI - Bodyweight Progression Plan Generator
//!
//! Command-line interface for generating and inspecting progression plans.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repsheet_core::{Exercise, PlanLayout, PlanRow, ProgressionPlan, Renderer};
use repsheet_render::{ExcelRenderer, TextRenderer};

#[derive(Parser)]
#[command(name = "repsheet")]
#[command(author, version, about = "Bodyweight progression plan generator", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the progression workbook
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "Progression.xlsx")]
        output: PathBuf,

        /// Max pull-up PR written to the Settings sheet
        #[arg(long, default_value_t = 10)]
        pull_up_pr: u32,

        /// Max push-up PR written to the Settings sheet
        #[arg(long, default_value_t = 25)]
        push_up_pr: u32,

        /// Write precomputed values instead of formulas
        #[arg(long)]
        static_values: bool,
    },

    /// Print the training plan without writing a workbook
    Plan {
        /// Exercise to print (pull-up, push-up)
        #[arg(short, long, default_value = "pull-up")]
        exercise: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

/// JSON dump of one exercise's plan
#[derive(serde::Serialize)]
struct PlanDump<'a> {
    exercise: &'a Exercise,
    rows: &'a [PlanRow],
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            output,
            pull_up_pr,
            push_up_pr,
            static_values,
        }) => generate(&output, pull_up_pr, push_up_pr, static_values),
        Some(Commands::Plan { exercise, format }) => plan(&exercise, &format),
        None => {
            println!("repsheet - Bodyweight Progression Plan Generator");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}

fn generate(
    output: &std::path::Path,
    pull_up_pr: u32,
    push_up_pr: u32,
    static_values: bool,
) -> Result<()> {
    let plan = ProgressionPlan::new("Progression")
        .exercise(Exercise::pull_up().max_pr(pull_up_pr))
        .exercise(Exercise::push_up().max_pr(push_up_pr));

    let renderer = if static_values {
        ExcelRenderer::new().static_values()
    } else {
        ExcelRenderer::new()
    };

    tracing::debug!(
        exercises = plan.exercises.len(),
        formulas = !static_values,
        "rendering workbook"
    );

    renderer
        .save(&plan, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Created: {}", output.display());
    Ok(())
}

fn plan(exercise: &str, format: &str) -> Result<()> {
    let exercise = match exercise.to_ascii_lowercase().as_str() {
        "pull-up" | "pullup" => Exercise::pull_up(),
        "push-up" | "pushup" => Exercise::push_up(),
        other => bail!("unknown exercise: {other} (expected pull-up or push-up)"),
    };

    tracing::debug!(exercise = %exercise.name, format, "printing plan");

    match format {
        "text" => {
            let plan = ProgressionPlan::new("Progression").exercise(exercise);
            let text = TextRenderer::new().render(&plan)?;
            print!("{text}");
        }
        "json" => {
            let layout = PlanLayout::build();
            let dump = PlanDump {
                exercise: &exercise,
                rows: &layout.rows,
            };
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
        other => bail!("unsupported format: {other} (expected text or json)"),
    }

    Ok(())
}
