// View Simulator - Main Entry Point
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! View Simulator - runs one simulation in the terminal and reports the result.
//!
//! ```bash
//! view-simulator --target 20 --rate 60
//! view-simulator --target 5 --rate 30 --seed 7 --json
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use view_simulator::{
    EventFactory, Settings, SimulationConfig, SimulationController, SimulationEvent, Snapshot,
    TokioScheduler,
};

/// Number of countries listed in the report.
const TOP_COUNTRIES: usize = 5;

#[derive(Parser)]
#[command(name = "view-simulator")]
#[command(version)]
#[command(about = "Educational synthetic view-traffic simulator", long_about = None)]
struct Cli {
    /// Views to simulate (defaults to the saved setting)
    #[arg(long, short, env = "VIEW_SIM_TARGET")]
    target: Option<u32>,

    /// Views per minute, 1-60 recommended (defaults to the saved setting)
    #[arg(long, short, env = "VIEW_SIM_RATE")]
    rate: Option<u32>,

    /// Seed for reproducible views
    #[arg(long)]
    seed: Option<u64>,

    /// Number of recent views to list in the report
    #[arg(long, default_value_t = 10)]
    recent: usize,

    /// Save target and rate as the new defaults
    #[arg(long)]
    save: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::new();
    let saved = settings.config();
    let config = SimulationConfig::new(
        cli.target.unwrap_or(saved.target_views),
        cli.rate.unwrap_or(saved.views_per_minute),
    );

    let scheduler = Arc::new(TokioScheduler::current().context("No tokio runtime available")?);
    let controller = match cli.seed {
        Some(seed) => {
            SimulationController::with_factory(saved, scheduler, EventFactory::seeded(seed))
        }
        None => SimulationController::new(saved, scheduler),
    };
    controller
        .configure(config)
        .context("Invalid simulation settings")?;

    if cli.save {
        settings.set_config(config)?;
        info!("Saved defaults to {}", settings.path().display());
    }

    let mut events = controller.subscribe();
    if controller.start().running {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(event) => {
                        if !cli.json {
                            report_event(&event, &controller);
                        }
                        if matches!(event, SimulationEvent::Completed { .. }) {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        warn!("Missed {} notifications", missed);
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = &mut ctrl_c => {
                    controller.pause();
                    break;
                }
            }
        }
    } else {
        info!("Nothing to simulate");
    }

    let snapshot = controller.current_state();
    if cli.json {
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        println!("{}", json);
    } else {
        print_report(&snapshot, cli.recent);
    }
    Ok(())
}

fn report_event(event: &SimulationEvent, controller: &SimulationController) {
    match event {
        SimulationEvent::ViewGenerated { progress, .. } => {
            let target = controller.config().target_views;
            println!("[{}/{}] {}", progress, target, event.message());
        }
        _ => println!("{}: {}", event.title(), event.message()),
    }
}

fn print_report(snapshot: &Snapshot, recent: usize) {
    let state = &snapshot.state;
    let stats = &snapshot.stats;

    println!();
    println!(
        "Progress: {} / {} ({:.0}%)",
        state.progress,
        state.target,
        snapshot.progress_percent()
    );
    println!("Views in history: {}", stats.total);
    println!("Average watch time: {}s", stats.average_dwell_seconds());
    println!("Unique sources: {}", stats.unique_sources);

    println!();
    println!("Devices:");
    for (device, count) in &stats.devices {
        println!("  {:<8} {:>3} ({:.0}%)", device, count, stats.device_share(*device));
    }

    println!();
    println!("Top countries:");
    for (country, count) in stats.top_countries(TOP_COUNTRIES) {
        println!("  {:<15} {:>3} ({:.0}%)", country, count, stats.country_share(&country));
    }

    println!();
    println!("Recent views:");
    if snapshot.history.is_empty() {
        println!("  No views simulated yet.");
    }
    for view in snapshot.recent(recent) {
        println!(
            "  {}  {:<15} {:<8} {}",
            view.local_time(),
            view.country,
            view.device,
            view.summary_line()
        );
    }
}
