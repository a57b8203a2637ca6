// Deterministic in-process garage with a fixed two-vehicle fleet.
//
// Backs `--demo` mode and the integration tests. One electric vehicle
// mid-charge with every capability branch populated, one combustion
// vehicle without any of the electric branches.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::command::CommandRequest;
use crate::error::GarageError;
use crate::source::GarageSource;
use crate::types::{
    ChargingState, ClimatizationState, CommandSurface, ConnectorState, GarageSnapshot,
    HeatingState, LightState, LockState, OpenState, RawCharging, RawClimatization,
    RawCombustionDrive, RawControls, RawDoor, RawDoors, RawDrives, RawElectricDrive, RawLight,
    RawLights, RawMaintenance, RawPosition, RawTyre, RawTyres, RawVehicle, RawWindow,
    RawWindowHeater, RawWindowHeating, RawWindows,
};

pub const DEMO_ELECTRIC_VIN: &str = "WVWZZZED4SE003938";
pub const DEMO_COMBUSTION_VIN: &str = "WV2ZZZSTZNH009136";

/// In-process garage source serving a fixed fleet and recording every
/// submitted command.
#[derive(Default)]
pub struct DemoGarage {
    sent: Mutex<Vec<(String, CommandRequest)>>,
}

impl DemoGarage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands submitted so far, in order.
    pub fn sent_commands(&self) -> Vec<(String, CommandRequest)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn known_vin(vin: &str) -> bool {
        vin == DEMO_ELECTRIC_VIN || vin == DEMO_COMBUSTION_VIN
    }
}

#[async_trait]
impl GarageSource for DemoGarage {
    async fn fetch_garage(&self) -> Result<GarageSnapshot, GarageError> {
        Ok(demo_snapshot())
    }

    async fn send_command(&self, vin: &str, request: CommandRequest) -> Result<(), GarageError> {
        if !Self::known_vin(vin) {
            return Err(GarageError::UnknownVehicle {
                vin: vin.to_owned(),
            });
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((vin.to_owned(), request));
        }
        Ok(())
    }

    async fn shutdown(&self) {}
}

/// The demo fleet: electric "ID7" mid-charge, combustion "T7".
pub fn demo_snapshot() -> GarageSnapshot {
    GarageSnapshot {
        vehicles: vec![demo_electric(), demo_combustion()],
    }
}

fn closed_door() -> RawDoor {
    RawDoor {
        lock_state: Some(LockState::Locked),
        open_state: Some(OpenState::Closed),
    }
}

fn closed_window() -> RawWindow {
    RawWindow {
        open_state: Some(OpenState::Closed),
    }
}

fn cold_tyre(pressure_kpa: f64) -> RawTyre {
    RawTyre {
        pressure_kpa: Some(pressure_kpa),
        temperature_kelvin: Some(293.15),
    }
}

fn demo_electric() -> RawVehicle {
    RawVehicle {
        vin: DEMO_ELECTRIC_VIN.to_owned(),
        name: Some("ID7".to_owned()),
        model: Some("ID.7 Tourer".to_owned()),
        license_plate: Some("M-XY 5678".to_owned()),
        manufacturer: Some("Volkswagen".to_owned()),
        vehicle_type: Some("electric".to_owned()),
        model_year: Some(2024),
        software_version: Some("3.7.1".to_owned()),
        state: Some("parked".to_owned()),
        connection_state: Some("online".to_owned()),
        odometer_km: Some(12842.0),
        doors: Some(RawDoors {
            lock_state: Some(LockState::Locked),
            open_state: Some(OpenState::Closed),
            doors: [
                ("frontLeft".to_owned(), closed_door()),
                ("frontRight".to_owned(), closed_door()),
                ("rearLeft".to_owned(), closed_door()),
                ("rearRight".to_owned(), closed_door()),
                ("trunk".to_owned(), closed_door()),
                ("bonnet".to_owned(), closed_door()),
            ]
            .into(),
            commands: CommandSurface::from(["lock-unlock"]),
        }),
        windows: Some(RawWindows {
            windows: [
                ("frontLeft".to_owned(), closed_window()),
                ("frontRight".to_owned(), closed_window()),
                ("rearLeft".to_owned(), closed_window()),
                ("rearRight".to_owned(), closed_window()),
            ]
            .into(),
        }),
        tyres: Some(RawTyres {
            tyres: [
                ("frontLeft".to_owned(), cold_tyre(270.0)),
                ("frontRight".to_owned(), cold_tyre(270.0)),
                ("rearLeft".to_owned(), cold_tyre(250.0)),
                ("rearRight".to_owned(), cold_tyre(250.0)),
            ]
            .into(),
        }),
        lights: Some(RawLights {
            lights: [
                (
                    "left".to_owned(),
                    RawLight {
                        state: Some(LightState::Off),
                    },
                ),
                (
                    "right".to_owned(),
                    RawLight {
                        state: Some(LightState::Off),
                    },
                ),
            ]
            .into(),
        }),
        drives: Some(RawDrives {
            total_range_km: Some(312.0),
            electric: Some(RawElectricDrive {
                range_km: Some(312.0),
                battery_level_percent: Some(77.0),
                battery_temperature_kelvin: Some(295.15),
            }),
            combustion: None,
        }),
        charging: Some(RawCharging {
            state: Some(ChargingState::Charging),
            power_kw: Some(11.0),
            connector_state: Some(ConnectorState::Connected),
            estimated_completion: Some(Utc::now() + Duration::minutes(95)),
            target_soc_percent: Some(80),
            charge_mode: Some("manual".to_owned()),
            commands: CommandSurface::from(["start-stop"]),
        }),
        climatization: Some(RawClimatization {
            state: Some(ClimatizationState::Off),
            target_temperature_celsius: Some(21.5),
            estimated_completion: None,
            window_heating_enabled: Some(true),
            seat_heating_enabled: Some(false),
            climatization_at_unlock: Some(false),
            without_external_power: Some(false),
            commands: CommandSurface::from(["start-stop"]),
        }),
        window_heating: Some(RawWindowHeating {
            windows: [
                (
                    "front".to_owned(),
                    RawWindowHeater {
                        heating_state: Some(HeatingState::Off),
                    },
                ),
                (
                    "rear".to_owned(),
                    RawWindowHeater {
                        heating_state: Some(HeatingState::Off),
                    },
                ),
            ]
            .into(),
            commands: CommandSurface::from(["start-stop"]),
        }),
        controls: Some(RawControls {
            commands: CommandSurface::from(["honk-and-flash"]),
        }),
        position: Some(RawPosition {
            latitude: Some(48.137),
            longitude: Some(11.576),
            heading: Some(214.0),
        }),
        maintenance: Some(RawMaintenance {
            inspection_due_at: Some(Utc::now() + Duration::days(310)),
            inspection_due_after_km: Some(17150),
            oil_service_due_at: None,
            oil_service_due_after_km: None,
        }),
    }
}

fn demo_combustion() -> RawVehicle {
    RawVehicle {
        vin: DEMO_COMBUSTION_VIN.to_owned(),
        name: Some("T7".to_owned()),
        model: Some("Multivan".to_owned()),
        license_plate: Some("M-AB 1234".to_owned()),
        manufacturer: Some("Volkswagen".to_owned()),
        vehicle_type: Some("combustion".to_owned()),
        model_year: Some(2022),
        software_version: Some("2.4.0".to_owned()),
        state: Some("parked".to_owned()),
        connection_state: Some("online".to_owned()),
        odometer_km: Some(48230.0),
        doors: Some(RawDoors {
            lock_state: Some(LockState::Unlocked),
            open_state: Some(OpenState::Closed),
            doors: [
                ("frontLeft".to_owned(), closed_door()),
                ("frontRight".to_owned(), closed_door()),
                ("rearLeft".to_owned(), closed_door()),
                ("rearRight".to_owned(), closed_door()),
                ("trunk".to_owned(), closed_door()),
            ]
            .into(),
            commands: CommandSurface::from(["lock-unlock"]),
        }),
        windows: Some(RawWindows {
            windows: [
                ("frontLeft".to_owned(), closed_window()),
                ("frontRight".to_owned(), closed_window()),
            ]
            .into(),
        }),
        tyres: None,
        lights: None,
        drives: Some(RawDrives {
            total_range_km: Some(650.0),
            electric: None,
            combustion: Some(RawCombustionDrive {
                range_km: Some(650.0),
                tank_level_percent: Some(68.0),
                fuel_type: Some("diesel".to_owned()),
                adblue_range_km: Some(4100.0),
                adblue_level_percent: Some(55.0),
            }),
        }),
        charging: None,
        climatization: Some(RawClimatization {
            state: Some(ClimatizationState::Off),
            target_temperature_celsius: Some(22.0),
            estimated_completion: None,
            window_heating_enabled: Some(false),
            seat_heating_enabled: Some(false),
            climatization_at_unlock: Some(false),
            without_external_power: Some(true),
            commands: CommandSurface::from(["start-stop"]),
        }),
        window_heating: None,
        controls: Some(RawControls {
            commands: CommandSurface::from(["honk-and-flash"]),
        }),
        position: Some(RawPosition {
            latitude: Some(48.177),
            longitude: Some(11.557),
            heading: None,
        }),
        maintenance: Some(RawMaintenance {
            inspection_due_at: Some(Utc::now() + Duration::days(120)),
            inspection_due_after_km: Some(1770),
            oil_service_due_at: Some(Utc::now() + Duration::days(120)),
            oil_service_due_after_km: Some(1770),
        }),
    }
}
