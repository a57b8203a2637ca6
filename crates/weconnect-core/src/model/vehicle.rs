// ── Vehicle domain types ──
//
// The typed vehicle: every capability the upstream source may or may
// not provide is an `Option<…>` field, resolved exactly once when the
// raw attribute tree is converted. Downstream code matches on fields
// instead of probing attribute paths.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use weconnect_garage::types::{
    ChargingState, ClimatizationState, ConnectorState, HeatingState, LightState, LockState,
    OpenState,
};

/// Propulsion class, derived from which drive branches the upstream
/// data carries (both present means hybrid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Electric,
    Combustion,
    Hybrid,
    Unknown,
}

/// How much of a vehicle's data an info projection carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Basic,
    #[default]
    Full,
    All,
}

/// Physical-status component selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Doors,
    Windows,
    Tyres,
    Lights,
}

/// Canonical vehicle with capabilities resolved to typed fields.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub vin: String,
    pub name: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub manufacturer: Option<String>,
    pub kind: VehicleKind,
    pub model_year: Option<i32>,
    pub software_version: Option<String>,
    pub lifecycle_state: Option<String>,
    pub connection_state: Option<String>,
    pub odometer_km: Option<f64>,
    pub total_range_km: Option<f64>,

    pub doors: Option<Doors>,
    pub windows: Option<Windows>,
    pub tyres: Option<Tyres>,
    pub lights: Option<Lights>,
    pub electric: Option<ElectricDrive>,
    pub combustion: Option<CombustionDrive>,
    pub charging: Option<Charging>,
    pub climatization: Option<Climatization>,
    pub window_heating: Option<WindowHeating>,
    pub locator: Option<Locator>,
    pub position: Option<VehiclePosition>,
    pub maintenance: Option<Maintenance>,
}

#[derive(Debug, Clone)]
pub struct Doors {
    pub lock_state: Option<LockState>,
    pub open_state: Option<OpenState>,
    pub doors: BTreeMap<String, Door>,
    pub supports_lock_unlock: bool,
}

#[derive(Debug, Clone)]
pub struct Door {
    pub lock_state: Option<LockState>,
    pub open_state: Option<OpenState>,
}

#[derive(Debug, Clone)]
pub struct Windows {
    pub windows: BTreeMap<String, Option<OpenState>>,
}

#[derive(Debug, Clone)]
pub struct Tyres {
    pub tyres: BTreeMap<String, Tyre>,
}

#[derive(Debug, Clone)]
pub struct Tyre {
    pub pressure_kpa: Option<f64>,
    pub temperature_kelvin: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Lights {
    pub lights: BTreeMap<String, Option<LightState>>,
}

#[derive(Debug, Clone)]
pub struct ElectricDrive {
    pub range_km: Option<f64>,
    pub battery_level_percent: Option<f64>,
    pub battery_temperature_kelvin: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CombustionDrive {
    pub range_km: Option<f64>,
    pub tank_level_percent: Option<f64>,
    pub fuel_type: Option<String>,
    pub adblue_range_km: Option<f64>,
    pub adblue_level_percent: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Charging {
    pub state: Option<ChargingState>,
    pub power_kw: Option<f64>,
    pub connector_state: Option<ConnectorState>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub target_soc_percent: Option<i32>,
    pub charge_mode: Option<String>,
    pub supports_start_stop: bool,
}

impl Charging {
    pub fn is_charging(&self) -> bool {
        self.state == Some(ChargingState::Charging)
    }

    pub fn is_plugged_in(&self) -> bool {
        self.connector_state == Some(ConnectorState::Connected)
    }
}

#[derive(Debug, Clone)]
pub struct Climatization {
    pub state: Option<ClimatizationState>,
    pub target_temperature_celsius: Option<f64>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub window_heating_enabled: Option<bool>,
    pub seat_heating_enabled: Option<bool>,
    pub climatization_at_unlock: Option<bool>,
    pub uses_external_power: Option<bool>,
    pub supports_start_stop: bool,
}

impl Climatization {
    /// Active means any reported mode other than an explicit off.
    /// Unknown upstream tokens count as active; the vocabulary grows and
    /// a mode this build doesn't know is still a running mode.
    pub fn is_active(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| *state != ClimatizationState::Off)
    }
}

#[derive(Debug, Clone)]
pub struct WindowHeating {
    pub windows: BTreeMap<String, Option<HeatingState>>,
    pub supports_start_stop: bool,
}

/// Locator controls (flash / honk-and-flash).
#[derive(Debug, Clone)]
pub struct Locator {
    pub supports_honk_and_flash: bool,
}

#[derive(Debug, Clone)]
pub struct VehiclePosition {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub heading: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Maintenance {
    pub inspection_due_at: Option<DateTime<Utc>>,
    pub inspection_due_after_km: Option<i64>,
    pub oil_service_due_at: Option<DateTime<Utc>>,
    pub oil_service_due_after_km: Option<i64>,
}

// ── List / info projections ─────────────────────────────────────────

/// One row of the fleet listing; also the resolver's search space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleListItem {
    pub vin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
}

/// Vehicle info at a chosen detail level. Fields beyond the basic
/// block are populated only at the matching level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub vin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    pub vehicle_type: VehicleKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatterySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climate: Option<ClimateSummary>,
}

/// Battery quick view, present at the `all` detail level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soc_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_km: Option<f64>,
    pub charging: bool,
    pub plugged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_power_kw: Option<f64>,
}

/// Climate quick view, present at the `all` detail level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateSummary {
    pub is_on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature_celsius: Option<f64>,
}
