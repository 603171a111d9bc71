//! Command line entry point: run synthetic vaccine distribution scenarios
//! under all four policies and print the results as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use vaccine_planner::logging::init_logging;
use vaccine_planner::report::PolicySummary;
use vaccine_planner::{RunConfig, ScenarioReport, SolveOptions, run_scenario};

/// Allocate scarce vaccine doses to a synthetic population.
#[derive(Parser)]
#[command(name = "vaccine-planner")]
#[command(about = "Solves vaccine distribution scenarios under four ranking policies")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    output: OutputOptions,

    /// Compute reward tables sequentially
    #[arg(long, global = true)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run one scenario, from flags or a JSON config file
    Run(RunArgs),
    /// Run the three reference scenarios
    Presets,
}

#[derive(Args)]
struct RunArgs {
    /// JSON run config; overrides the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "100")]
    persons: usize,

    #[arg(long, default_value = "10")]
    hospitals: usize,

    #[arg(long, default_value = "80")]
    vaccines: i64,

    #[arg(long, default_value = "5")]
    centers: usize,

    #[arg(long, default_value = "42")]
    seed: u64,

    /// Base reward (default: persons / 4)
    #[arg(long)]
    alpha: Option<f64>,

    /// Priority weight (default: persons / 4)
    #[arg(long)]
    beta: Option<f64>,

    /// Distance penalty (default: 1.0)
    #[arg(long)]
    gamma: Option<f64>,
}

impl RunArgs {
    fn into_config(self) -> Result<RunConfig> {
        if let Some(path) = self.config {
            return RunConfig::from_path(path);
        }
        Ok(RunConfig {
            n_persons: self.persons,
            n_hospitals: self.hospitals,
            n_vaccines: self.vaccines,
            n_centers: self.centers,
            seed: self.seed,
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
        })
    }
}

#[derive(Args)]
struct OutputOptions {
    #[arg(long = "format", short = 'f', value_enum, default_value = "summary", global = true)]
    format: OutputFormat,

    /// Write results here instead of stdout
    #[arg(long = "output", short = 'o', global = true)]
    file: Option<PathBuf>,

    /// Mirror logs to this file as JSON lines
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Per-policy totals and distributions
    Summary,
    /// Every assignment of every policy
    Json,
}

#[derive(Serialize)]
struct ScenarioSummary<'a> {
    label: &'a str,
    config: &'a RunConfig,
    policies: Vec<PolicySummary>,
}

fn write_reports(reports: &[ScenarioReport], format: OutputFormat, mut out: impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(&mut out, reports)?,
        OutputFormat::Summary => {
            let summaries: Vec<ScenarioSummary<'_>> = reports
                .iter()
                .map(|report| ScenarioSummary {
                    label: &report.label,
                    config: &report.config,
                    policies: report.summaries(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut out, &summaries)?;
        }
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.output.log.as_ref())?;

    let configs = match cli.command {
        Command::Run(args) => vec![args.into_config()?],
        Command::Presets => RunConfig::presets(),
    };

    let options = SolveOptions {
        parallel_rewards: !cli.sequential,
    };

    let mut reports = Vec::with_capacity(configs.len());
    for config in &configs {
        info!(scenario = %config.label(), "running scenario");
        reports.push(run_scenario(config, &options)?);
    }

    match cli.output.file.as_ref() {
        Some(path) => write_reports(&reports, cli.output.format, BufWriter::new(File::create(path)?))?,
        None => write_reports(&reports, cli.output.format, io::stdout().lock())?,
    }

    Ok(())
}
