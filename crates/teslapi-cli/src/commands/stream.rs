//! Stream command - live telemetry

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use teslapi_client::{TelemetryRecord, TeslaClient};
use teslapi_core::DEFAULT_COLUMNS;

use super::{vehicle_id, vehicle_summary};
use crate::output::{escape_csv, OutputContext, OutputFormat};

/// Stream telemetry until the server closes the stream or Ctrl+C
pub async fn stream(
    client: &TeslaClient,
    vehicle: Option<&str>,
    email: &str,
    columns: &[String],
    ctx: &OutputContext,
) -> Result<()> {
    let summary = vehicle_summary(client, vehicle).await?;

    // The streaming endpoint is keyed by `vehicle_id`, not the portal `id`
    let stream_id = summary
        .get("vehicle_id")
        .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
        .or_else(|| vehicle_id(&summary))
        .context("Vehicle summary has no id")?;
    let stream_token = summary
        .get("tokens")
        .and_then(|t| t.get(0))
        .and_then(|t| t.as_str())
        .context("Vehicle summary has no streaming token (is the vehicle asleep?)")?
        .to_string();

    let columns: Vec<&str> = if columns.is_empty() {
        DEFAULT_COLUMNS.to_vec()
    } else {
        columns.iter().map(|s| s.as_str()).collect()
    };

    ctx.info(&format!("Streaming {} column(s)...", columns.len()));
    ctx.info("Press Ctrl+C to stop");

    let mut telemetry = client
        .vehicle(stream_id)
        .stream(email, &stream_token, &columns)
        .await?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    if ctx.format == OutputFormat::Csv {
        let headers: Vec<&str> = std::iter::once("timestamp")
            .chain(columns.iter().copied())
            .collect();
        println!("{}", headers.join(","));
    }

    while running.load(Ordering::SeqCst) {
        tokio::select! {
            record = telemetry.next() => {
                match record {
                    Some(Ok(record)) => print_record(&record, &columns, ctx),
                    Some(Err(e)) => {
                        ctx.error(&format!("Stream error: {}", e));
                        break;
                    }
                    None => {
                        ctx.info("Stream ended");
                        break;
                    }
                }
            }
            _ = tokio::time::sleep(tokio::time::Duration::from_millis(100)) => {
                if !running.load(Ordering::SeqCst) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn print_record(record: &TelemetryRecord, columns: &[&str], ctx: &OutputContext) {
    match ctx.format {
        OutputFormat::Table => {
            let values: Vec<String> = columns
                .iter()
                .map(|c| format!("{}={}", c, record.get_str(c).unwrap_or("-")))
                .collect();
            println!("[{}] {}", record.timestamp, values.join(" "));
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(record) {
                println!("{}", json);
            }
        }
        OutputFormat::Csv => {
            let values: Vec<String> = std::iter::once(record.timestamp.to_string())
                .chain(columns.iter().map(|c| escape_csv(record.get_str(c).unwrap_or_default())))
                .collect();
            println!("{}", values.join(","));
        }
    }
}
