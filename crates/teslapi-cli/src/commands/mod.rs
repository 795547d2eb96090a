//! Command implementations for teslapi

pub mod auth;
pub mod command;
pub mod state;
pub mod stream;
pub mod vehicles;

pub use auth::{login, refresh, revoke};
pub use command::{catalogue, command};
pub use state::{state, wake};
pub use stream::stream;
pub use vehicles::{info, vehicles};

use anyhow::{Context, Result};
use serde_json::Value;
use teslapi_client::{TeslaClient, Vehicle};

/// Vehicle id as a string; prefers the lossless `id_s`
pub(crate) fn vehicle_id(summary: &Value) -> Option<String> {
    match summary.get("id_s").or_else(|| summary.get("id"))? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Summary of the selected vehicle: by id when given, else the first one
pub(crate) async fn vehicle_summary(client: &TeslaClient, vehicle: Option<&str>) -> Result<Value> {
    match vehicle {
        Some(id) => {
            let body = client.vehicle_by_id(id).await?;
            Ok(teslapi_core::response_of(&body).clone())
        }
        None => client
            .vehicle_at(0)
            .await
            .context("No vehicle selected and none found on the account"),
    }
}

/// Resolve the vehicle handle without fetching when an id is given
pub(crate) async fn resolve_vehicle(
    client: &TeslaClient,
    vehicle: Option<&str>,
) -> Result<Vehicle> {
    if let Some(id) = vehicle {
        return Ok(client.vehicle(id));
    }
    let summary = vehicle_summary(client, None).await?;
    let id = vehicle_id(&summary).context("Vehicle summary has no id")?;
    Ok(client.vehicle(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vehicle_id() {
        let summary = json!({"id": 1.2345678901234568e16, "id_s": "12345678901234567"});
        assert_eq!(vehicle_id(&summary).as_deref(), Some("12345678901234567"));
        assert_eq!(vehicle_id(&json!({"id": 42})).as_deref(), Some("42"));
        assert_eq!(vehicle_id(&json!({"vin": "x"})), None);
        assert_eq!(vehicle_id(&json!({"id": [1]})), None);
    }
}
