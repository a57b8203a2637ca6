// ── Energy status projections ──

use serde::{Deserialize, Serialize};

use super::vehicle::VehicleKind;

/// Drive-train view: range plus whichever drive branches exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyStatus {
    pub vehicle_type: VehicleKind,
    pub range: RangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electric: Option<ElectricDriveInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combustion: Option<CombustionDriveInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electric_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combustion_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricDriveInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_temperature_kelvin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging: Option<ChargingStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingStatus {
    pub is_charging: bool,
    pub is_plugged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_power_kw: Option<f64>,
    /// Raw upstream state token (`charging`, `readyForCharging`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_state: Option<String>,
    /// Minutes until the target charge level, never negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_soc_percent: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_soc_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombustionDriveInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tank_level_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adblue_range_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adblue_level_percent: Option<f64>,
}
