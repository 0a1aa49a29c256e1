//! Walks the managed job flow lifecycle against the in-memory provider.
//!
//! Usage: `flowkeep-dryrun [--config config.json] [--log-level filter]`. The optional
//! file is a serialized `Configuration`; missing fields take their defaults.
mod args;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use flowkeep_core::prelude::*;
use flowkeep_model::{JobState, JobType, StepConfig};
use flowkeep_observe::{LoggerConfig, LoggerLevel, init_logger};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let args = args::Args::parse();

    // 1) logger
    let cfg = LoggerConfig {
        level: LoggerLevel::new(args.log_level.as_str())?,
        ..Default::default()
    };
    init_logger(&cfg)?;

    // 2) configuration
    let config: Configuration = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading configuration {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing configuration {}", path.display()))?
        }
        None => Configuration::default(),
    };
    info!(prefix = %config.name_prefix, name = %config.name, epoch = %config.epoch()?, "configuration loaded");

    // 3) registry over the in-memory provider
    let api = Arc::new(InMemoryJobFlows::new());
    let registry = JobRegistry::new(Arc::new(config), api.clone());

    // 4) one job flow per type; a second find_or_start reuses it
    let hive = registry.find_or_start(JobType::Hive).await?;
    let again = registry.find_or_start(JobType::Hive).await?;
    info!(first = hive.id(), second = again.id(), "hive job flow reused");

    if let Err(CoreError::DuplicateJob(t)) = registry.start(JobType::Hive).await {
        info!(job_type = %t, "duplicate start refused");
    }

    // 5) streaming work arrives as plain steps
    let streaming = registry.start_streaming().await?;
    registry
        .add_steps(
            streaming.id(),
            &[StepConfig::new(
                "word count",
                "/home/hadoop/contrib/streaming/hadoop-streaming.jar",
                ["-input", "s3://bucket/in/", "-output", "s3://bucket/out/"],
            )],
        )
        .await?;

    // 6) the provider brings the cluster up
    api.set_state(hive.id(), JobState::Waiting);
    let mut hive = hive;
    hive.refresh(&registry).await?;
    info!(
        job_flow_id = hive.id(),
        state = %hive.state(),
        ready = hive.is_ready(),
        dns = hive.public_dns().unwrap_or("-"),
        "hive job flow refreshed"
    );

    // 7) listing and cleanup
    for job in registry.list_active_managed(None).await? {
        info!(job_flow_id = job.id(), job_type = ?job.job_type(), state = %job.state(), "active");
    }
    let killed = registry.kill_all().await?;
    info!(killed, "managed job flows terminated");

    Ok(())
}
