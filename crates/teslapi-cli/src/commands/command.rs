//! Command dispatch - catalogue and generic execution

use anyhow::Result;
use serde_json::Value;
use teslapi_client::TeslaClient;
use teslapi_core::commands::{self, COMMANDS};

use super::resolve_vehicle;
use crate::output::{CommandRow, OutputContext};

/// List every remote command with its usage
pub fn catalogue(filter: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let rows: Vec<CommandRow> = COMMANDS
        .iter()
        .filter(|c| filter.map_or(true, |f| c.name.contains(f)))
        .map(|c| CommandRow {
            name: c.name.to_string(),
            endpoint: c.endpoint.name().to_string(),
            usage: c.usage(),
            summary: c.summary.to_string(),
        })
        .collect();

    ctx.print(&rows);
    Ok(())
}

/// Run a command by name with textual arguments
pub async fn command(
    client: &TeslaClient,
    vehicle: Option<&str>,
    name: &str,
    args: &[String],
    ctx: &OutputContext,
) -> Result<()> {
    // Validate before any network round trip
    let spec = commands::find(name)?;
    spec.build_payload_from_strs(args)?;

    let vehicle = resolve_vehicle(client, vehicle).await?;
    let args: Vec<Value> = args.iter().map(|a| Value::String(a.clone())).collect();
    let body = vehicle.execute(spec, &args).await?;

    let response = teslapi_core::response_of(&body);
    match response.get("result").and_then(Value::as_bool) {
        Some(true) => ctx.success(&format!("{} succeeded", spec.name)),
        Some(false) => {
            let reason = response
                .get("reason")
                .and_then(Value::as_str)
                .filter(|r| !r.is_empty())
                .unwrap_or("no reason given");
            ctx.error(&format!("{} rejected: {}", spec.name, reason));
        }
        None => ctx.print_value(&body),
    }
    Ok(())
}
