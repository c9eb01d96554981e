// src/main.rs - Interactive spooler host: stands in for the GUI shell

use std::env;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use printspool::config::{self, Config};
use printspool::emitter::FileEmitter;
use printspool::print_job::{JobController, JobStatus, PrintJobRequest};
use printspool::progress;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting printspool host");

    // Get configuration file path
    let args: Vec<String> = env::args().collect();
    let config_path = if args.len() > 1 { &args[1] } else { "spool.toml" };

    // Load configuration, falling back to defaults when no file is present
    let config = if Path::new(config_path).exists() {
        config::load_config(config_path).map_err(|e| {
            tracing::error!("Failed to load config from '{}': {}", config_path, e);
            Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
        })?
    } else {
        tracing::info!("No config at '{}', using defaults", config_path);
        Config::default()
    };

    tracing::info!(
        "Output directory: {} ({} ms per copy)",
        config.spool.output_dir,
        config.spool.copy_interval_ms
    );

    let (status_tx, mut status_rx) = mpsc::channel::<JobStatus>(config.spool.status_buffer);
    let controller = JobController::new(
        FileEmitter::new(&config.spool.output_dir),
        Duration::from_millis(config.spool.copy_interval_ms),
        status_tx,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Document text:");
    let document = lines.next_line().await?;
    println!("Copies:");
    let copies = lines.next_line().await?.unwrap_or_default();

    let request = PrintJobRequest::parse(document.as_deref(), &copies)?;
    controller.start(request).await?;
    println!("Type 'cancel' to stop printing.");

    loop {
        tokio::select! {
            status = status_rx.recv() => {
                match status {
                    Some(JobStatus::Running(percent)) => {
                        println!("{}", progress::format_percent(percent));
                    }
                    Some(JobStatus::Completed) => {
                        println!("Finished printing");
                        break;
                    }
                    Some(JobStatus::Cancelled) => {
                        println!("Printing cancelled");
                        break;
                    }
                    Some(JobStatus::Failed(msg)) => {
                        println!("{}", msg);
                        break;
                    }
                    Some(JobStatus::Idle) | None => break,
                }
            }
            line = lines.next_line() => {
                if let Ok(Some(line)) = line {
                    if line.trim().eq_ignore_ascii_case("cancel") {
                        controller.request_cancel();
                    }
                }
            }
        }
    }

    Ok(())
}
