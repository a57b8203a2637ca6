// ── Raw-to-domain conversions ──
//
// Bridges the `weconnect_garage` attribute tree into canonical
// `weconnect_core::model` types. Capability resolution happens here,
// exactly once per snapshot: each optional upstream branch becomes a
// typed `Option<…>` field, and each command surface collapses into a
// `supports_…` flag on its capability.

use weconnect_garage::command::{HONK_AND_FLASH, LOCK_UNLOCK, START_STOP};
use weconnect_garage::types::{
    RawCharging, RawClimatization, RawControls, RawDoors, RawLights, RawMaintenance, RawPosition,
    RawTyres, RawVehicle, RawWindowHeating, RawWindows,
};

use crate::model::{
    Charging, Climatization, CombustionDrive, Door, Doors, ElectricDrive, Lights, Locator,
    Maintenance, Tyre, Tyres, Vehicle, VehicleKind, VehicleListItem, VehiclePosition,
    WindowHeating, Windows,
};

/// Derive the propulsion class. Drive branches win over the declared
/// type string; a vehicle with no drive data falls back to whatever the
/// upstream source declares.
fn derive_kind(raw: &RawVehicle) -> VehicleKind {
    let electric = raw.drives.as_ref().is_some_and(|d| d.electric.is_some());
    let combustion = raw.drives.as_ref().is_some_and(|d| d.combustion.is_some());

    match (electric, combustion) {
        (true, true) => VehicleKind::Hybrid,
        (true, false) => VehicleKind::Electric,
        (false, true) => VehicleKind::Combustion,
        (false, false) => raw
            .vehicle_type
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or(VehicleKind::Unknown),
    }
}

impl From<RawDoors> for Doors {
    fn from(raw: RawDoors) -> Self {
        Self {
            lock_state: raw.lock_state,
            open_state: raw.open_state,
            doors: raw
                .doors
                .into_iter()
                .map(|(position, door)| {
                    (
                        position,
                        Door {
                            lock_state: door.lock_state,
                            open_state: door.open_state,
                        },
                    )
                })
                .collect(),
            supports_lock_unlock: raw.commands.supports(LOCK_UNLOCK),
        }
    }
}

impl From<RawWindows> for Windows {
    fn from(raw: RawWindows) -> Self {
        Self {
            windows: raw
                .windows
                .into_iter()
                .map(|(position, window)| (position, window.open_state))
                .collect(),
        }
    }
}

impl From<RawTyres> for Tyres {
    fn from(raw: RawTyres) -> Self {
        Self {
            tyres: raw
                .tyres
                .into_iter()
                .map(|(position, tyre)| {
                    (
                        position,
                        Tyre {
                            pressure_kpa: tyre.pressure_kpa,
                            temperature_kelvin: tyre.temperature_kelvin,
                        },
                    )
                })
                .collect(),
        }
    }
}

impl From<RawLights> for Lights {
    fn from(raw: RawLights) -> Self {
        Self {
            lights: raw
                .lights
                .into_iter()
                .map(|(side, light)| (side, light.state))
                .collect(),
        }
    }
}

impl From<RawCharging> for Charging {
    fn from(raw: RawCharging) -> Self {
        Self {
            state: raw.state,
            power_kw: raw.power_kw,
            connector_state: raw.connector_state,
            estimated_completion: raw.estimated_completion,
            target_soc_percent: raw.target_soc_percent,
            charge_mode: raw.charge_mode,
            supports_start_stop: raw.commands.supports(START_STOP),
        }
    }
}

impl From<RawClimatization> for Climatization {
    fn from(raw: RawClimatization) -> Self {
        Self {
            state: raw.state,
            target_temperature_celsius: raw.target_temperature_celsius,
            estimated_completion: raw.estimated_completion,
            window_heating_enabled: raw.window_heating_enabled,
            seat_heating_enabled: raw.seat_heating_enabled,
            climatization_at_unlock: raw.climatization_at_unlock,
            // The upstream flag is inverted.
            uses_external_power: raw.without_external_power.map(|without| !without),
            supports_start_stop: raw.commands.supports(START_STOP),
        }
    }
}

impl From<RawWindowHeating> for WindowHeating {
    fn from(raw: RawWindowHeating) -> Self {
        Self {
            windows: raw
                .windows
                .into_iter()
                .map(|(window, heater)| (window, heater.heating_state))
                .collect(),
            supports_start_stop: raw.commands.supports(START_STOP),
        }
    }
}

impl From<RawControls> for Locator {
    fn from(raw: RawControls) -> Self {
        Self {
            supports_honk_and_flash: raw.commands.supports(HONK_AND_FLASH),
        }
    }
}

impl From<RawPosition> for VehiclePosition {
    fn from(raw: RawPosition) -> Self {
        Self {
            latitude: raw.latitude,
            longitude: raw.longitude,
            heading: raw.heading,
        }
    }
}

impl From<RawMaintenance> for Maintenance {
    fn from(raw: RawMaintenance) -> Self {
        Self {
            inspection_due_at: raw.inspection_due_at,
            inspection_due_after_km: raw.inspection_due_after_km,
            oil_service_due_at: raw.oil_service_due_at,
            oil_service_due_after_km: raw.oil_service_due_after_km,
        }
    }
}

impl From<RawVehicle> for Vehicle {
    fn from(raw: RawVehicle) -> Self {
        let kind = derive_kind(&raw);
        let (total_range_km, electric, combustion) = match raw.drives {
            Some(drives) => (
                drives.total_range_km,
                drives.electric.map(|e| ElectricDrive {
                    range_km: e.range_km,
                    battery_level_percent: e.battery_level_percent,
                    battery_temperature_kelvin: e.battery_temperature_kelvin,
                }),
                drives.combustion.map(|c| CombustionDrive {
                    range_km: c.range_km,
                    tank_level_percent: c.tank_level_percent,
                    fuel_type: c.fuel_type,
                    adblue_range_km: c.adblue_range_km,
                    adblue_level_percent: c.adblue_level_percent,
                }),
            ),
            None => (None, None, None),
        };

        Self {
            vin: raw.vin,
            name: raw.name,
            model: raw.model,
            license_plate: raw.license_plate,
            manufacturer: raw.manufacturer,
            kind,
            model_year: raw.model_year,
            software_version: raw.software_version,
            lifecycle_state: raw.state,
            connection_state: raw.connection_state,
            odometer_km: raw.odometer_km,
            total_range_km,
            doors: raw.doors.map(Into::into),
            windows: raw.windows.map(Into::into),
            tyres: raw.tyres.map(Into::into),
            lights: raw.lights.map(Into::into),
            electric,
            combustion,
            charging: raw.charging.map(Into::into),
            climatization: raw.climatization.map(Into::into),
            window_heating: raw.window_heating.map(Into::into),
            locator: raw.controls.map(Into::into),
            position: raw.position.map(Into::into),
            maintenance: raw.maintenance.map(Into::into),
        }
    }
}

impl Vehicle {
    pub fn list_item(&self) -> VehicleListItem {
        VehicleListItem {
            vin: self.vin.clone(),
            name: self.name.clone(),
            model: self.model.clone(),
            license_plate: self.license_plate.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use weconnect_garage::demo::{DEMO_COMBUSTION_VIN, DEMO_ELECTRIC_VIN, demo_snapshot};
    use weconnect_garage::types::{
        CommandSurface, RawCombustionDrive, RawDrives, RawElectricDrive,
    };

    use super::*;

    fn demo_vehicle(vin: &str) -> Vehicle {
        demo_snapshot()
            .vehicles
            .into_iter()
            .find(|v| v.vin == vin)
            .map(Vehicle::from)
            .unwrap()
    }

    #[test]
    fn kind_derived_from_drive_branches() {
        let raw = RawVehicle {
            vin: "X".into(),
            drives: Some(RawDrives {
                total_range_km: None,
                electric: Some(RawElectricDrive::default()),
                combustion: Some(RawCombustionDrive::default()),
            }),
            ..RawVehicle::default()
        };
        assert_eq!(derive_kind(&raw), VehicleKind::Hybrid);
    }

    #[test]
    fn kind_falls_back_to_declared_type_without_drive_data() {
        let raw = RawVehicle {
            vin: "X".into(),
            vehicle_type: Some("electric".into()),
            ..RawVehicle::default()
        };
        assert_eq!(derive_kind(&raw), VehicleKind::Electric);

        let raw = RawVehicle {
            vin: "X".into(),
            vehicle_type: Some("steam".into()),
            ..RawVehicle::default()
        };
        assert_eq!(derive_kind(&raw), VehicleKind::Unknown);
    }

    #[test]
    fn electric_demo_vehicle_resolves_capabilities() {
        let vehicle = demo_vehicle(DEMO_ELECTRIC_VIN);

        assert_eq!(vehicle.kind, VehicleKind::Electric);
        assert!(vehicle.doors.as_ref().unwrap().supports_lock_unlock);
        assert!(vehicle.charging.as_ref().unwrap().supports_start_stop);
        assert!(vehicle.charging.as_ref().unwrap().is_charging());
        assert!(vehicle.locator.as_ref().unwrap().supports_honk_and_flash);
        assert!(vehicle.combustion.is_none());
    }

    #[test]
    fn combustion_demo_vehicle_lacks_electric_branches() {
        let vehicle = demo_vehicle(DEMO_COMBUSTION_VIN);

        assert_eq!(vehicle.kind, VehicleKind::Combustion);
        assert!(vehicle.electric.is_none());
        assert!(vehicle.charging.is_none());
        assert!(vehicle.window_heating.is_none());
        assert_eq!(
            vehicle.combustion.as_ref().unwrap().fuel_type.as_deref(),
            Some("diesel")
        );
    }

    #[test]
    fn external_power_flag_is_inverted() {
        let vehicle = demo_vehicle(DEMO_ELECTRIC_VIN);
        assert_eq!(
            vehicle.climatization.as_ref().unwrap().uses_external_power,
            Some(true)
        );

        let vehicle = demo_vehicle(DEMO_COMBUSTION_VIN);
        assert_eq!(
            vehicle.climatization.as_ref().unwrap().uses_external_power,
            Some(false)
        );
    }

    #[test]
    fn missing_command_surface_means_unsupported() {
        let raw = RawVehicle {
            vin: "X".into(),
            doors: Some(RawDoors {
                commands: CommandSurface::default(),
                ..RawDoors::default()
            }),
            ..RawVehicle::default()
        };
        let vehicle = Vehicle::from(raw);
        assert!(!vehicle.doors.unwrap().supports_lock_unlock);
    }
}
