// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays a scripted sequence of touch and pointer frames through a
//! `GestureClassifier` and prints the signals observed after every frame.

mod replay;
mod report;
mod scenario;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use understory_gesture::GestureClassifier;

use crate::scenario::{Scenario, load_config};

#[derive(Debug, Parser)]
#[command(name = "gesture-replay")]
#[command(about = "Replay scripted touch/pointer frames through a gesture classifier", long_about = None)]
struct Args {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Threshold file (TOML) overriding the scenario's `[config]` table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON object per frame
    #[arg(long)]
    json: bool,

    /// Enable verbose debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "debug"
    } else {
        "warn,understory_gesture=info,gesture_replay=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let scenario = Scenario::load(&args.scenario)?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => scenario.config.clone(),
    };
    let mut gestures =
        GestureClassifier::with_config(config).context("invalid gesture thresholds")?;
    info!(
        scenario = %args.scenario.display(),
        frames = scenario.frames.len(),
        config = ?gestures.config(),
        "loaded scenario"
    );

    let reports = replay::replay(&mut gestures, &scenario);

    let mut out = std::io::stdout().lock();
    for report in &reports {
        if args.json {
            serde_json::to_writer(&mut out, report)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{report}")?;
        }
    }
    let taps = reports.iter().filter(|r| r.tap.is_some()).count();
    info!(taps, "replay finished");

    Ok(())
}
