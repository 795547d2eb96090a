//! Per-vehicle reads and commands

use bytes::Bytes;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use teslapi_core::commands::{self, CommandSpec};
use teslapi_core::StateKind;

use crate::client::TeslaClient;
use crate::error::{Result, TeslaClientError};
use crate::streaming::{self, TelemetryStream};

/// Handle bound to one vehicle id
///
/// Obtained through [`TeslaClient::vehicle`]. Every command method is a thin
/// wrapper over [`Vehicle::execute`] and returns the response body as-is,
/// typically `{"response": {"result": true, "reason": ""}}`.
#[derive(Debug, Clone)]
pub struct Vehicle {
    client: TeslaClient,
    id: String,
}

impl Vehicle {
    pub(crate) fn new(client: TeslaClient, id: String) -> Self {
        Self { client, id }
    }

    /// Vehicle id used in request paths
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client(&self) -> &TeslaClient {
        &self.client
    }

    async fn read(&self, resource: &str) -> Result<Value> {
        let path = format!("api/1/vehicles/{}/{}", self.id, resource);
        self.client
            .gateway()
            .get_resource(self.client.token()?, &path)
            .await
    }

    // =========================================================================
    // State Reads
    // =========================================================================

    /// All state groups in one response
    #[instrument(skip(self), fields(vehicle = %self.id))]
    pub async fn vehicle_data(&self) -> Result<Value> {
        self.read("vehicle_data").await
    }

    /// One `data_request/{kind}` state group
    #[instrument(skip(self), fields(vehicle = %self.id))]
    pub async fn state(&self, kind: StateKind) -> Result<Value> {
        self.read(&format!("data_request/{}", kind.as_str())).await
    }

    pub async fn vehicle_config(&self) -> Result<Value> {
        self.state(StateKind::VehicleConfig).await
    }

    pub async fn vehicle_state(&self) -> Result<Value> {
        self.state(StateKind::VehicleState).await
    }

    pub async fn climate_state(&self) -> Result<Value> {
        self.state(StateKind::ClimateState).await
    }

    pub async fn charge_state(&self) -> Result<Value> {
        self.state(StateKind::ChargeState).await
    }

    pub async fn drive_state(&self) -> Result<Value> {
        self.state(StateKind::DriveState).await
    }

    pub async fn gui_settings(&self) -> Result<Value> {
        self.state(StateKind::GuiSettings).await
    }

    /// Whether mobile access is enabled
    #[instrument(skip(self), fields(vehicle = %self.id))]
    pub async fn mobile_enabled(&self) -> Result<Value> {
        self.read("mobile_enabled").await
    }

    /// Superchargers and destination chargers near the vehicle
    #[instrument(skip(self), fields(vehicle = %self.id))]
    pub async fn nearby_charging_sites(&self) -> Result<Value> {
        self.read("nearby_charging_sites").await
    }

    // =========================================================================
    // Command Dispatch
    // =========================================================================

    /// Execute a command row with positional arguments
    #[instrument(skip(self, command, args), fields(vehicle = %self.id, command = command.name))]
    pub async fn execute(&self, command: &CommandSpec, args: &[Value]) -> Result<Value> {
        let payload = command.build_payload(args)?;
        let path = command.path(&self.id);
        self.client
            .gateway()
            .post_resource(self.client.token()?, &path, payload.as_ref())
            .await
    }

    /// Look up a command by name and execute it
    pub async fn execute_named(&self, name: &str, args: &[Value]) -> Result<Value> {
        let command = commands::find(name)?;
        self.execute(command, args).await
    }

    /// Run a command in the background, discarding its outcome.
    ///
    /// Failures are only logged at debug level. Must be called from within a
    /// tokio runtime.
    pub fn spawn_detached(&self, name: &str, args: Vec<Value>) -> JoinHandle<()> {
        let vehicle = self.clone();
        let name = name.to_string();
        tokio::spawn(async move {
            if let Err(e) = vehicle.execute_named(&name, &args).await {
                debug!("detached command {} failed: {}", name, e);
            }
        })
    }

    // =========================================================================
    // Telemetry Streaming
    // =========================================================================

    /// Open the telemetry stream.
    ///
    /// `username` is the account e-mail and `stream_token` the vehicle's
    /// streaming token (from the `tokens` array of the vehicle summary).
    /// Empty `columns` selects [`teslapi_core::DEFAULT_COLUMNS`].
    #[instrument(skip(self, stream_token), fields(vehicle = %self.id))]
    pub async fn stream(
        &self,
        username: &str,
        stream_token: &str,
        columns: &[&str],
    ) -> Result<TelemetryStream> {
        let url = streaming::stream_url(&self.client.streaming_url()?, &self.id, columns)?;
        TelemetryStream::connect(
            self.client.gateway().stream_client().clone(),
            url,
            username,
            stream_token,
            columns,
        )
        .await
        .map_err(|e| TeslaClientError::Stream(e.to_string()))
    }

    /// Open the telemetry stream and hand each raw chunk to `sink` until the
    /// server closes the connection
    #[instrument(skip(self, stream_token, sink), fields(vehicle = %self.id))]
    pub async fn stream_chunks<F>(
        &self,
        username: &str,
        stream_token: &str,
        columns: &[&str],
        sink: F,
    ) -> Result<()>
    where
        F: FnMut(Bytes),
    {
        let url = streaming::stream_url(&self.client.streaming_url()?, &self.id, columns)?;
        streaming::for_each_chunk(
            self.client.gateway().stream_client(),
            url,
            username,
            stream_token,
            sink,
        )
        .await
        .map_err(|e| TeslaClientError::Stream(e.to_string()))
    }

    // =========================================================================
    // Wake / Alerts
    // =========================================================================

    pub async fn wake_up(&self) -> Result<Value> {
        self.execute_named("wake_up", &[]).await
    }

    pub async fn honk_horn(&self) -> Result<Value> {
        self.execute_named("honk_horn", &[]).await
    }

    pub async fn flash_lights(&self) -> Result<Value> {
        self.execute_named("flash_lights", &[]).await
    }

    // =========================================================================
    // Charging
    // =========================================================================

    pub async fn start_charge(&self) -> Result<Value> {
        self.execute_named("start_charge", &[]).await
    }

    pub async fn stop_charge(&self) -> Result<Value> {
        self.execute_named("stop_charge", &[]).await
    }

    pub async fn open_charge_port(&self) -> Result<Value> {
        self.execute_named("open_charge_port", &[]).await
    }

    pub async fn close_charge_port(&self) -> Result<Value> {
        self.execute_named("close_charge_port", &[]).await
    }

    pub async fn charge_standard(&self) -> Result<Value> {
        self.execute_named("charge_standard", &[]).await
    }

    pub async fn charge_max_range(&self) -> Result<Value> {
        self.execute_named("charge_max_range", &[]).await
    }

    /// Set the charge limit; values outside 50-100 are clamped
    pub async fn set_charge_limit(&self, percent: i64) -> Result<Value> {
        self.execute_named("set_charge_limit", &[json!(percent)]).await
    }

    pub async fn set_charging_amps(&self, amps: i64) -> Result<Value> {
        self.execute_named("set_charging_amps", &[json!(amps)]).await
    }

    /// Schedule charging to start `minutes` after midnight
    pub async fn scheduled_charging(&self, enable: bool, minutes: i64) -> Result<Value> {
        self.execute_named("scheduled_charging", &[json!(enable), json!(minutes)])
            .await
    }

    // =========================================================================
    // Doors and Trunks
    // =========================================================================

    pub async fn door_lock(&self) -> Result<Value> {
        self.execute_named("door_lock", &[]).await
    }

    pub async fn door_unlock(&self) -> Result<Value> {
        self.execute_named("door_unlock", &[]).await
    }

    /// Actuate a trunk ([`teslapi_core::FRONT_TRUNK`] or [`teslapi_core::REAR_TRUNK`])
    pub async fn open_trunk(&self, which: &str) -> Result<Value> {
        self.execute_named("open_trunk", &[json!(which)]).await
    }

    // =========================================================================
    // Climate
    // =========================================================================

    pub async fn climate_start(&self) -> Result<Value> {
        self.execute_named("climate_start", &[]).await
    }

    pub async fn climate_stop(&self) -> Result<Value> {
        self.execute_named("climate_stop", &[]).await
    }

    /// Set cabin temperatures in °C; values outside 15-28 are clamped
    pub async fn set_temps(&self, driver: f64, passenger: f64) -> Result<Value> {
        self.execute_named("set_temps", &[json!(driver), json!(passenger)])
            .await
    }

    pub async fn max_defrost(&self, on: bool) -> Result<Value> {
        self.execute_named("max_defrost", &[json!(on)]).await
    }

    /// Set a seat heater (`SEAT_*` position, level 0-3)
    pub async fn seat_heater(&self, heater: i64, level: i64) -> Result<Value> {
        self.execute_named("seat_heater", &[json!(heater), json!(level)])
            .await
    }

    pub async fn seat_cooler(&self, seat: i64, level: i64) -> Result<Value> {
        self.execute_named("seat_cooler", &[json!(seat), json!(level)])
            .await
    }

    pub async fn steering_heater(&self, on: bool) -> Result<Value> {
        self.execute_named("steering_heater", &[json!(on)]).await
    }

    pub async fn set_bioweapon_mode(&self, on: bool) -> Result<Value> {
        self.execute_named("set_bioweapon_mode", &[json!(on)]).await
    }

    pub async fn set_cabin_overheat_protection(&self, on: bool, fan_only: bool) -> Result<Value> {
        self.execute_named("set_cabin_overheat_protection", &[json!(on), json!(fan_only)])
            .await
    }

    pub async fn set_climate_keeper_mode(&self, mode: i64) -> Result<Value> {
        self.execute_named("set_climate_keeper_mode", &[json!(mode)])
            .await
    }

    // =========================================================================
    // Sunroof and Windows
    // =========================================================================

    /// Vent or close the sunroof (`SUNROOF_VENT` / `SUNROOF_CLOSED`)
    pub async fn sun_roof_control(&self, state: &str) -> Result<Value> {
        self.execute_named("sun_roof_control", &[json!(state)]).await
    }

    pub async fn sun_roof_move(&self, percent: i64) -> Result<Value> {
        self.execute_named("sun_roof_move", &[json!(percent)]).await
    }

    /// Vent or close the windows; closing requires the phone's location
    pub async fn window_control(&self, command: &str, lat: f64, lon: f64) -> Result<Value> {
        self.execute_named("window_control", &[json!(command), json!(lat), json!(lon)])
            .await
    }

    // =========================================================================
    // Security
    // =========================================================================

    pub async fn set_sentry_mode(&self, on: bool) -> Result<Value> {
        self.execute_named("set_sentry_mode", &[json!(on)]).await
    }

    pub async fn set_valet_mode(&self, on: bool, pin: Option<&str>) -> Result<Value> {
        self.execute_named("set_valet_mode", &[json!(on), json!(pin)])
            .await
    }

    pub async fn reset_valet_pin(&self) -> Result<Value> {
        self.execute_named("reset_valet_pin", &[]).await
    }

    pub async fn remote_start(&self, password: Option<&str>) -> Result<Value> {
        self.execute_named("remote_start", &[json!(password)]).await
    }

    pub async fn set_vehicle_name(&self, name: &str) -> Result<Value> {
        self.execute_named("set_vehicle_name", &[json!(name)]).await
    }

    pub async fn guest_mode(&self, enable: bool) -> Result<Value> {
        self.execute_named("guest_mode", &[json!(enable)]).await
    }

    pub async fn speed_limit_activate(&self, pin: &str) -> Result<Value> {
        self.execute_named("speed_limit_activate", &[json!(pin)]).await
    }

    pub async fn speed_limit_deactivate(&self, pin: &str) -> Result<Value> {
        self.execute_named("speed_limit_deactivate", &[json!(pin)])
            .await
    }

    pub async fn speed_limit_clear_pin(&self, pin: &str) -> Result<Value> {
        self.execute_named("speed_limit_clear_pin", &[json!(pin)]).await
    }

    pub async fn speed_limit_set_limit(&self, mph: i64) -> Result<Value> {
        self.execute_named("speed_limit_set_limit", &[json!(mph)]).await
    }

    // =========================================================================
    // Media
    // =========================================================================

    pub async fn media_toggle_playback(&self) -> Result<Value> {
        self.execute_named("media_toggle_playback", &[]).await
    }

    pub async fn media_next_track(&self) -> Result<Value> {
        self.execute_named("media_next_track", &[]).await
    }

    pub async fn media_prev_track(&self) -> Result<Value> {
        self.execute_named("media_prev_track", &[]).await
    }

    pub async fn media_next_fav(&self) -> Result<Value> {
        self.execute_named("media_next_fav", &[]).await
    }

    pub async fn media_prev_fav(&self) -> Result<Value> {
        self.execute_named("media_prev_fav", &[]).await
    }

    pub async fn media_volume_up(&self) -> Result<Value> {
        self.execute_named("media_volume_up", &[]).await
    }

    pub async fn media_volume_down(&self) -> Result<Value> {
        self.execute_named("media_volume_down", &[]).await
    }

    pub async fn adjust_volume(&self, volume: f64) -> Result<Value> {
        self.execute_named("adjust_volume", &[json!(volume)]).await
    }

    pub async fn remote_boombox(&self, sound: i64) -> Result<Value> {
        self.execute_named("remote_boombox", &[json!(sound)]).await
    }

    // =========================================================================
    // Navigation, HomeLink, Calendar
    // =========================================================================

    /// Share a destination with the navigation system
    pub async fn navigation_request(
        &self,
        subject: &str,
        text: &str,
        locale: Option<&str>,
    ) -> Result<Value> {
        self.execute_named("navigation_request", &[json!(subject), json!(text), json!(locale)])
            .await
    }

    pub async fn homelink(&self, lat: f64, lon: f64, token: &str) -> Result<Value> {
        self.execute_named("homelink", &[json!(lat), json!(lon), json!(token)])
            .await
    }

    pub async fn calendar(&self, calendar_data: Value) -> Result<Value> {
        self.execute_named("calendar", &[calendar_data]).await
    }

    // =========================================================================
    // Software Updates
    // =========================================================================

    pub async fn schedule_software_update(&self, offset_sec: i64) -> Result<Value> {
        self.execute_named("schedule_software_update", &[json!(offset_sec)])
            .await
    }

    pub async fn cancel_software_update(&self) -> Result<Value> {
        self.execute_named("cancel_software_update", &[]).await
    }
}
