//! State commands - reads and wake

use anyhow::{bail, Result};
use teslapi_client::TeslaClient;
use teslapi_core::StateKind;

use super::resolve_vehicle;
use crate::output::OutputContext;

/// Read a state group; `data` reads all of them at once
pub async fn state(
    client: &TeslaClient,
    vehicle: Option<&str>,
    kind: &str,
    ctx: &OutputContext,
) -> Result<()> {
    let vehicle = resolve_vehicle(client, vehicle).await?;

    let body = match kind {
        "data" | "all" | "vehicle_data" => vehicle.vehicle_data().await?,
        "mobile" | "mobile_enabled" => vehicle.mobile_enabled().await?,
        "chargers" | "nearby_charging_sites" => vehicle.nearby_charging_sites().await?,
        other => match other.parse::<StateKind>() {
            Ok(kind) => vehicle.state(kind).await?,
            Err(_) => {
                let known: Vec<&str> = StateKind::ALL.iter().map(|k| k.as_str()).collect();
                bail!(
                    "Unknown state '{}'. Expected one of: data, mobile, chargers, {}",
                    other,
                    known.join(", ")
                );
            }
        },
    };

    ctx.print_value(&body);
    Ok(())
}

/// Wake the vehicle
pub async fn wake(client: &TeslaClient, vehicle: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let vehicle = resolve_vehicle(client, vehicle).await?;
    ctx.info(&format!("Waking vehicle {}...", vehicle.id()));

    let body = vehicle.wake_up().await?;
    let state = teslapi_core::response_of(&body)
        .get("state")
        .and_then(|s| s.as_str())
        .unwrap_or("unknown");
    ctx.success(&format!("Vehicle state: {}", state));
    Ok(())
}
