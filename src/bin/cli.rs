// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! citymesh CLI

use anyhow::Result;
use citymesh::cli::Reporter;
use citymesh::{export_json, import_citygml_file_with, MeshConfig, Session};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "citymesh")]
#[command(about = "CityGML to triangle mesh and wireframe edges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./citymesh.toml when present)
    #[arg(short, long, global = true, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Regenerate objects in parallel
    #[arg(long, global = true)]
    parallel: bool,

    /// Emit wireframe edges for holes too
    #[arg(long, global = true)]
    hole_edges: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a CityGML file and print mesh statistics
    Stats {
        /// Input CityGML file
        input: PathBuf,
    },

    /// Load a CityGML file and write its render buffers as JSON
    Export {
        /// Input CityGML file
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MeshConfig::from_file(path)?.with_env_overrides(),
        None => MeshConfig::load()?,
    };
    if cli.parallel {
        config.parallel = true;
    }
    if cli.hole_edges {
        config.hole_edges = true;
    }
    init_logging(&config, cli.verbose);

    match &cli.command {
        Commands::Stats { input } => stats_command(input, config, cli.verbose)?,
        Commands::Export { input, output } => export_command(input, output, config, cli.verbose)?,
        Commands::Version => {
            println!("citymesh v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_logging(config: &MeshConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &Path, config: MeshConfig, verbose: bool) -> Result<Session> {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }

    let progress = verbose.then(|| {
        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress
    });

    let mut session = Session::with_config(config);
    let summary = import_citygml_file_with(input, &mut session, |object, total| {
        if let Some(progress) = &progress {
            progress.set_length(total as u64);
            progress.set_message(object.id.clone());
            progress.inc(1);
        }
    })?;
    if let Some(progress) = &progress {
        progress.finish_with_message("ingested");
    }

    if summary.regeneration.skipped > 0 {
        Reporter::report_warning(&format!(
            "{} polygon(s) could not be tessellated",
            summary.regeneration.skipped
        ));
    }
    Ok(session)
}

fn stats_command(input: &Path, config: MeshConfig, verbose: bool) -> Result<()> {
    let start = Instant::now();
    let session = load(input, config, verbose)?;
    let elapsed = start.elapsed();

    Reporter::report_stats(&input.display().to_string(), &session.stats(), elapsed);
    Ok(())
}

fn export_command(input: &Path, output: &Path, config: MeshConfig, verbose: bool) -> Result<()> {
    let session = load(input, config, verbose)?;
    export_json(&session, output)?;

    Reporter::success(&format!(
        "Exported {} objects: {} -> {}",
        session.len(),
        input.display(),
        output.display()
    ));
    Ok(())
}
