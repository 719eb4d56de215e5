//! Risk Gate Binary
//!
//! Dry-run evaluation of one order request against a snapshot file. Prints
//! the risk report as JSON and never submits anything.
//!
//! # Usage
//!
//! ```bash
//! risk-gate <request.json> [snapshot.json]
//! ```
//!
//! # Exit Codes
//!
//! - `0`: order approved (warnings may be present)
//! - `2`: order blocked
//! - `1`: no decision could be produced
//!
//! # Environment Variables
//!
//! - `RISK_GATE_CONFIG`: Config file path (default: config.yaml, built-in
//!   defaults when absent)
//! - `RUST_LOG`: Log filter (default: `observability.logging.level`)

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use risk_gate::config::{CONFIG_PATH_ENV, Config, DEFAULT_CONFIG_PATH, load_config};
use risk_gate::telemetry::init_tracing;
use risk_gate::{
    EvaluateOrderRequestDto, EvaluateOrderUseCase, FileSnapshotProvider, RiskEvaluationService,
    TracingAuditTrail,
};

/// Snapshot file used when none is given.
const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.json";

/// Exit code for a blocked order.
const BLOCKED_EXIT_CODE: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let mut args = std::env::args().skip(1);
    let Some(request_path) = args.next() else {
        bail!("usage: risk-gate <request.json> [snapshot.json]");
    };
    let snapshot_path = args
        .next()
        .unwrap_or_else(|| DEFAULT_SNAPSHOT_PATH.to_string());

    let config = read_config()?;
    init_tracing(&config.observability.logging);

    let risk_config = config.risk_config()?;
    tracing::info!(
        max_single_position_pct = %risk_config.max_single_position_pct,
        max_total_position_pct = %risk_config.max_total_position_pct,
        allow_margin = risk_config.allow_margin,
        require_stop_loss = risk_config.require_stop_loss,
        "Starting risk gate dry run"
    );

    let request = read_request(&request_path).await?;

    let use_case = EvaluateOrderUseCase::new(
        Arc::new(RiskEvaluationService::new(risk_config)?),
        Arc::new(FileSnapshotProvider::new(&snapshot_path)),
        Arc::new(TracingAuditTrail::new()),
    );

    let report = use_case.execute(request).await.inspect_err(|e| {
        tracing::error!(code = %e.code(), error = %e, "Risk evaluation failed");
    })?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.is_approved() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(BLOCKED_EXIT_CODE))
    }
}

/// Load the config file, falling back to built-in defaults when the default
/// path does not exist and no override is set.
fn read_config() -> anyhow::Result<Config> {
    let overridden = std::env::var_os(CONFIG_PATH_ENV).is_some();
    if !overridden && !Path::new(DEFAULT_CONFIG_PATH).exists() {
        return Ok(Config::default());
    }
    Ok(load_config(None)?)
}

async fn read_request(path: &str) -> anyhow::Result<EvaluateOrderRequestDto> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read order request '{path}'"))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid order request '{path}'"))
}
