// ── Climate status projections ──

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climatization: Option<ClimatizationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_heating: Option<WindowHeatingStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimatizationStatus {
    /// Raw upstream state token (`off`, `heating`, `cooling`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temperature_celsius: Option<f64>,
    /// Minutes until the climatization run finishes, never negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_remaining_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_heating_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_heating_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climatization_at_unlock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_external_power: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowHeatingStatus {
    /// Heating state tokens (`on` / `off`) per window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear: Option<String>,
}
