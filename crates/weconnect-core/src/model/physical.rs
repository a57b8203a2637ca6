// ── Physical status projections ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Doors, windows, tyres, and lights for one vehicle. Components the
/// caller didn't ask for, or the vehicle doesn't report, are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doors: Option<DoorsStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<WindowsStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tyres: Option<TyresStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lights: Option<LightsStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoorsStatus {
    /// Aggregate lock state token (`locked` / `unlocked`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_state: Option<String>,
    /// Aggregate open state token (`open` / `closed`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_state: Option<String>,
    pub doors: BTreeMap<String, DoorStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoorStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowsStatus {
    pub windows: BTreeMap<String, WindowStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TyresStatus {
    pub tyres: BTreeMap<String, TyreStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TyreStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_kpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_kelvin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightsStatus {
    /// Light state tokens keyed by side (`left` / `right`).
    pub lights: BTreeMap<String, String>,
}
