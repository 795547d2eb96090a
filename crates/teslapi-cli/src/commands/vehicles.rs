//! Vehicle commands - list and decoded details

use anyhow::Result;
use serde_json::Value;
use teslapi_client::TeslaClient;
use teslapi_core::paint::get_paint_color;
use teslapi_core::vin::{get_short_vin, get_vin};
use teslapi_core::VehicleModelInfo;

use super::{vehicle_id, vehicle_summary};
use crate::output::{format_json_value, OutputContext, VehicleRow};

fn text(summary: &Value, key: &str) -> String {
    summary.get(key).map(format_json_value).unwrap_or_else(|| "-".to_string())
}

/// List all vehicles on the account
pub async fn vehicles(client: &TeslaClient, ctx: &OutputContext) -> Result<()> {
    let body = client.vehicles().await?;
    let list = teslapi_core::response_of(&body)
        .as_array()
        .cloned()
        .unwrap_or_default();

    let rows: Vec<VehicleRow> = list
        .iter()
        .enumerate()
        .map(|(index, v)| VehicleRow {
            index,
            id: vehicle_id(v).unwrap_or_else(|| "-".to_string()),
            name: text(v, "display_name"),
            vin: text(v, "vin"),
            model: VehicleModelInfo::from_vehicle(v)
                .map(|m| m.car_type.to_string())
                .unwrap_or_else(|_| "-".to_string()),
            state: text(v, "state"),
        })
        .collect();

    ctx.print(&rows);
    Ok(())
}

/// Show the selected vehicle with its VIN decoded
pub async fn info(client: &TeslaClient, vehicle: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let summary = vehicle_summary(client, vehicle).await?;
    let model = VehicleModelInfo::from_vehicle(&summary)?;
    let vin = get_vin(&summary).unwrap_or("-");

    let pairs = vec![
        ("ID", vehicle_id(&summary).unwrap_or_else(|| "-".to_string())),
        ("Name", text(&summary, "display_name")),
        ("VIN", vin.to_string()),
        ("Short VIN", get_short_vin(&summary).unwrap_or("-").to_string()),
        ("Model", model.car_type.to_string()),
        ("Year", model.year.to_string()),
        ("AWD", if model.awd { "Yes" } else { "No" }.to_string()),
        ("Paint", get_paint_color(&summary).to_string()),
        ("State", text(&summary, "state")),
    ];

    ctx.print_kv(&pairs);
    Ok(())
}
