use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use cineplan::model::VideoPlan;
use cineplan::orchestrate::{Orchestrator, ProductionOptions};
use cineplan::quality::QualityEngine;

#[derive(Parser, Debug)]
#[command(name = "cineplan", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the production pipeline over a plan JSON.
    Enhance(EnhanceArgs),
    /// Assess a plan and print its quality report.
    Score(ScoreArgs),
}

#[derive(Parser, Debug)]
struct EnhanceArgs {
    /// Input plan JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output enhanced-plan JSON.
    #[arg(long)]
    out: PathBuf,

    /// Seed scope for the deterministic variation.
    #[arg(long, default_value = "cineplan")]
    seed: String,

    /// Use the full-production preset (stricter quality gate).
    #[arg(long, default_value_t = false)]
    full: bool,

    /// Skip the camera trajectory subsystem.
    #[arg(long, default_value_t = false)]
    no_camera: bool,

    /// Skip per-element motion paths.
    #[arg(long, default_value_t = false)]
    no_paths: bool,

    /// Skip parallax depth assignment.
    #[arg(long, default_value_t = false)]
    no_parallax: bool,

    /// Skip the color grading timeline.
    #[arg(long, default_value_t = false)]
    no_grading: bool,
}

#[derive(Parser, Debug)]
struct ScoreArgs {
    /// Input plan JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Enhance(args) => cmd_enhance(args),
        Command::Score(args) => cmd_score(args),
    }
}

fn read_plan(path: &PathBuf) -> anyhow::Result<VideoPlan> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read plan '{}'", path.display()))?;
    let plan: VideoPlan = serde_json::from_str(&text)
        .with_context(|| format!("parse plan '{}'", path.display()))?;
    Ok(plan)
}

fn cmd_enhance(args: EnhanceArgs) -> anyhow::Result<()> {
    let plan = read_plan(&args.in_path)?;

    let mut options = if args.full {
        ProductionOptions::full_production()
    } else {
        ProductionOptions::default()
    };
    options.camera = !args.no_camera;
    options.character_paths = !args.no_paths;
    options.parallax = !args.no_parallax;
    options.color_grading = !args.no_grading;

    let (enhanced, report) = Orchestrator::new(options).produce(&plan, &args.seed)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&enhanced)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write enhanced plan '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} (score {} / grade {:?}, {} optimizations, {}ms)",
        args.out.display(),
        report.quality_score,
        enhanced.metadata.grade,
        report.optimizations_applied.len(),
        report.processing_time_ms,
    );
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

fn cmd_score(args: ScoreArgs) -> anyhow::Result<()> {
    let plan = read_plan(&args.in_path)?;
    plan.validate()?;
    let report = QualityEngine.assess(&plan);

    println!("{}", serde_json::to_string_pretty(&report)?);
    eprintln!("score {} ({:?})", report.score, report.overall);
    Ok(())
}
