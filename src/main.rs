//! Demo workload driver: floods two log streams from many concurrent
//! producers to exercise backpressure, rotation, and shutdown draining.
//! The engine itself lives in the library; main is just the harness.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;

use daylog::{LogStream, Registry, StreamConfig, emit};

#[derive(Parser, Debug)]
#[command(name = "daylog", version, about = "Async daily-rotating log writer demo")]
struct Args {
    /// Directory the log files are written to
    #[arg(long = "dir", default_value = "./logs")]
    dir: PathBuf,

    /// Retention window for the app stream, in days
    #[arg(long = "app-retention", default_value_t = 60)]
    app_retention: i32,

    /// Retention window for the comm stream, in days
    #[arg(long = "comm-retention", default_value_t = 30)]
    comm_retention: i32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut registry = Registry::new();
    registry.register(
        "app",
        LogStream::spawn(StreamConfig::new(&args.dir, "AppLog", args.app_retention)),
    );
    registry.register(
        "comm",
        LogStream::spawn(StreamConfig::new(&args.dir, "CommLog", args.comm_retention)),
    );
    let registry = Arc::new(registry);

    let mut tasks = Vec::new();

    // Scenario 1: database workers with irregular pacing on the app stream.
    for id in 1..=5 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move { db_worker(&registry, id).await }));
    }

    // Scenario 2: fast network chatter on the comm stream.
    for id in 1..=5 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move { net_worker(&registry, id).await }));
    }

    // Scenario 3: mixed producers touching both streams at once.
    for id in 1..=3 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move { mixed_worker(&registry, id).await }));
    }

    tokio::time::sleep(Duration::from_secs(1)).await;

    // Scenario 4: burst of one hundred producers at once.
    for idx in 0..100 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            if let Some(app) = registry.get("app") {
                emit!(app, "[BURST] load test #{idx}").await;
            }
        }));
    }

    for task in tasks {
        task.await.context("demo worker task failed")?;
    }

    registry.shutdown_all().await;
    Ok(())
}

async fn db_worker(registry: &Registry, id: usize) {
    let Some(app) = registry.get("app") else { return };
    for job in 0..5 {
        emit!(app, "[DB-{id:02}] transaction started (job {job})").await;

        let millis = rand::thread_rng().gen_range(10..100);
        tokio::time::sleep(Duration::from_millis(millis)).await;

        emit!(app, "[DB-{id:02}] query finished in {millis}ms").await;
    }
}

async fn net_worker(registry: &Registry, id: usize) {
    let Some(comm) = registry.get("comm") else { return };
    for seq in 0..10 {
        let size = rand::thread_rng().gen_range(0..1024);
        emit!(comm, "[NET-{id:02}] SEND packet seq={seq} size={size} bytes").await;

        let millis = rand::thread_rng().gen_range(0..20);
        tokio::time::sleep(Duration::from_millis(millis)).await;

        emit!(comm, "[NET-{id:02}] RECV ACK seq={seq}").await;
    }
}

async fn mixed_worker(registry: &Registry, id: usize) {
    let (Some(app), Some(comm)) = (registry.get("app"), registry.get("comm")) else {
        return;
    };
    for _ in 0..3 {
        emit!(app, "[MIX-{id:02}] handling user request").await;
        emit!(comm, "[API-{id:02}] GET /user/info").await;

        tokio::time::sleep(Duration::from_millis(50)).await;

        emit!(app, "[MIX-{id:02}] request done").await;
    }
}
