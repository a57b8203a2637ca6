// ── Raw vehicle attribute tree ──
//
// The shape of a garage snapshot as the upstream source reports it.
// Every branch below the VIN is optional: the upstream API omits whole
// sub-trees depending on vehicle model, trim, and privacy settings.
// State enumerations keep unknown upstream tokens as raw strings --
// the upstream vocabulary is expected to grow.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── State enumerations ──────────────────────────────────────────────

macro_rules! upstream_state {
    ($(#[$doc:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Token the upstream source reported but this build doesn't know.
            Other(String),
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($token => Self::$variant,)+
                    _ => Self::Other(raw),
                }
            }
        }

        impl From<$name> for String {
            fn from(state: $name) -> Self {
                match state {
                    $($name::$variant => $token.to_owned(),)+
                    $name::Other(raw) => raw,
                }
            }
        }

        impl $name {
            /// Stable lowercase token, or the raw upstream string for
            /// unknown values.
            pub fn as_token(&self) -> &str {
                match self {
                    $(Self::$variant => $token,)+
                    Self::Other(raw) => raw,
                }
            }
        }
    };
}

upstream_state! {
    /// Aggregate or per-door lock state.
    LockState {
        Locked => "locked",
        Unlocked => "unlocked",
    }
}

upstream_state! {
    /// Open/closed state for doors and windows.
    OpenState {
        Open => "open",
        Closed => "closed",
    }
}

upstream_state! {
    /// Charging session state.
    ChargingState {
        Charging => "charging",
        ReadyForCharging => "readyForCharging",
        Off => "off",
        Error => "error",
    }
}

upstream_state! {
    /// Charging-cable connector state.
    ConnectorState {
        Connected => "connected",
        Disconnected => "disconnected",
    }
}

upstream_state! {
    /// Climatization mode.
    ClimatizationState {
        Off => "off",
        Heating => "heating",
        Cooling => "cooling",
        Ventilation => "ventilation",
    }
}

upstream_state! {
    /// Window-defroster heating state.
    HeatingState {
        On => "on",
        Off => "off",
    }
}

upstream_state! {
    /// Exterior light state.
    LightState {
        On => "on",
        Off => "off",
    }
}

// ── Command surface ─────────────────────────────────────────────────

/// Commands a capability namespace accepts, as reported by the upstream
/// source (e.g. `"lock-unlock"`, `"start-stop"`, `"honk-and-flash"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandSurface(pub Vec<String>);

impl CommandSurface {
    pub fn supports(&self, command: &str) -> bool {
        self.0.iter().any(|c| c == command)
    }
}

impl<const N: usize> From<[&str; N]> for CommandSurface {
    fn from(commands: [&str; N]) -> Self {
        Self(commands.iter().map(|c| (*c).to_owned()).collect())
    }
}

// ── Attribute tree ──────────────────────────────────────────────────

/// Everything the upstream source knows, fetched in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GarageSnapshot {
    #[serde(default)]
    pub vehicles: Vec<RawVehicle>,
}

impl GarageSnapshot {
    /// Direct VIN lookup (exact, case-sensitive -- identifiers have
    /// already been resolved by the time this is called).
    pub fn vehicle(&self, vin: &str) -> Option<&RawVehicle> {
        self.vehicles.iter().find(|v| v.vin == vin)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVehicle {
    pub vin: String,
    pub name: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub manufacturer: Option<String>,
    /// Upstream-declared propulsion type ("electric", "combustion", ...).
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub model_year: Option<i32>,
    pub software_version: Option<String>,
    /// Lifecycle state ("parked", "driving", ...).
    pub state: Option<String>,
    pub connection_state: Option<String>,
    pub odometer_km: Option<f64>,

    pub doors: Option<RawDoors>,
    pub windows: Option<RawWindows>,
    pub tyres: Option<RawTyres>,
    pub lights: Option<RawLights>,
    pub drives: Option<RawDrives>,
    pub charging: Option<RawCharging>,
    pub climatization: Option<RawClimatization>,
    pub window_heating: Option<RawWindowHeating>,
    pub controls: Option<RawControls>,
    pub position: Option<RawPosition>,
    pub maintenance: Option<RawMaintenance>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDoors {
    pub lock_state: Option<LockState>,
    pub open_state: Option<OpenState>,
    /// Keyed by position: `frontLeft`, `frontRight`, `rearLeft`,
    /// `rearRight`, `trunk`, `bonnet`.
    #[serde(default)]
    pub doors: BTreeMap<String, RawDoor>,
    #[serde(default)]
    pub commands: CommandSurface,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDoor {
    pub lock_state: Option<LockState>,
    pub open_state: Option<OpenState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWindows {
    /// Keyed by position: `frontLeft`, `frontRight`, `rearLeft`, `rearRight`.
    #[serde(default)]
    pub windows: BTreeMap<String, RawWindow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWindow {
    pub open_state: Option<OpenState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTyres {
    #[serde(default)]
    pub tyres: BTreeMap<String, RawTyre>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTyre {
    pub pressure_kpa: Option<f64>,
    pub temperature_kelvin: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLights {
    /// Keyed by side: `left`, `right`.
    #[serde(default)]
    pub lights: BTreeMap<String, RawLight>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLight {
    pub state: Option<LightState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDrives {
    pub total_range_km: Option<f64>,
    pub electric: Option<RawElectricDrive>,
    pub combustion: Option<RawCombustionDrive>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawElectricDrive {
    pub range_km: Option<f64>,
    pub battery_level_percent: Option<f64>,
    pub battery_temperature_kelvin: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCombustionDrive {
    pub range_km: Option<f64>,
    pub tank_level_percent: Option<f64>,
    pub fuel_type: Option<String>,
    pub adblue_range_km: Option<f64>,
    pub adblue_level_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCharging {
    pub state: Option<ChargingState>,
    pub power_kw: Option<f64>,
    pub connector_state: Option<ConnectorState>,
    /// When the upstream source expects the target charge level to be reached.
    pub estimated_completion: Option<DateTime<Utc>>,
    pub target_soc_percent: Option<i32>,
    pub charge_mode: Option<String>,
    #[serde(default)]
    pub commands: CommandSurface,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClimatization {
    pub state: Option<ClimatizationState>,
    pub target_temperature_celsius: Option<f64>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub window_heating_enabled: Option<bool>,
    pub seat_heating_enabled: Option<bool>,
    pub climatization_at_unlock: Option<bool>,
    /// Upstream reports this inverted ("without external power").
    pub without_external_power: Option<bool>,
    #[serde(default)]
    pub commands: CommandSurface,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWindowHeating {
    /// Keyed by window: `front`, `rear`.
    #[serde(default)]
    pub windows: BTreeMap<String, RawWindowHeater>,
    #[serde(default)]
    pub commands: CommandSurface,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawWindowHeater {
    pub heating_state: Option<HeatingState>,
}

/// Locator controls (horn and exterior lights).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawControls {
    #[serde(default)]
    pub commands: CommandSurface,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPosition {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub heading: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMaintenance {
    pub inspection_due_at: Option<DateTime<Utc>>,
    pub inspection_due_after_km: Option<i64>,
    pub oil_service_due_at: Option<DateTime<Utc>>,
    pub oil_service_due_after_km: Option<i64>,
}
