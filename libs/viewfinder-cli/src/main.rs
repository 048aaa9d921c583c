// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Viewfinder CLI
//!
//! Replays recorded scenarios through the preview coordinator against a
//! simulated camera, so lens switches, focus timing and zoom can be inspected
//! without a device.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod scenario;

#[derive(Parser)]
#[command(name = "viewfinder")]
#[command(author, version, about = "Viewfinder scenario CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print the callback timeline
    Replay {
        /// Scenario file (YAML)
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Parse and validate a scenario without running it
    Validate {
        /// Scenario file (YAML)
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay { scenario, format } => commands::replay::run(&scenario, format),
        Commands::Validate { scenario } => commands::validate::run(&scenario),
    }
}
