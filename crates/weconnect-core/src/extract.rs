// ── State extraction ──
//
// Pure projections from the typed [`Vehicle`] into the wire-facing
// status models. No I/O, no clock access: anything time-derived takes
// `now` from the caller. Missing data stays missing; nothing here
// invents defaults.

use chrono::{DateTime, Utc};

use crate::model::{
    BatterySummary, ChargingStatus, ClimateStatus, ClimateSummary, ClimatizationStatus,
    CombustionDriveInfo, Component, DetailLevel, DoorStatus, DoorsStatus, ElectricDriveInfo,
    EnergyStatus, LightsStatus, MaintenanceInfo, PhysicalStatus, Position, RangeStatus,
    TyreStatus, TyresStatus, Vehicle, VehicleInfo, WindowHeatingStatus, WindowStatus,
    WindowsStatus,
};
use weconnect_garage::types::{LockState, OpenState};

/// Whole minutes from `now` until `target`, `None` once the target has
/// passed or was never reported.
fn remaining_minutes(target: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    target
        .map(|t| (t - now).num_minutes())
        .filter(|minutes| *minutes >= 0)
}

fn wants(components: Option<&[Component]>, component: Component) -> bool {
    match components {
        // An empty filter means no restriction, same as a missing one.
        None => true,
        Some([]) => true,
        Some(list) => list.contains(&component),
    }
}

// ── Vehicle info ────────────────────────────────────────────────────

pub fn vehicle_info(vehicle: &Vehicle, detail: DetailLevel) -> VehicleInfo {
    let mut info = VehicleInfo {
        vin: vehicle.vin.clone(),
        name: vehicle.name.clone(),
        model: vehicle.model.clone(),
        license_plate: vehicle.license_plate.clone(),
        manufacturer: vehicle.manufacturer.clone(),
        vehicle_type: vehicle.kind,
        odometer_km: None,
        state: None,
        software_version: None,
        model_year: None,
        connection_state: None,
        battery: None,
        climate: None,
    };

    if matches!(detail, DetailLevel::Full | DetailLevel::All) {
        info.odometer_km = vehicle.odometer_km;
        info.state = vehicle.lifecycle_state.clone();
        info.software_version = vehicle.software_version.clone();
        info.model_year = vehicle.model_year;
        info.connection_state = vehicle.connection_state.clone();
    }

    if detail == DetailLevel::All {
        info.battery = battery_summary(vehicle);
        info.climate = vehicle.climatization.as_ref().map(|c| ClimateSummary {
            is_on: c.is_active(),
            target_temperature_celsius: c.target_temperature_celsius,
        });
    }

    info
}

/// Battery quick view; only for vehicles with an electric drive.
pub fn battery_summary(vehicle: &Vehicle) -> Option<BatterySummary> {
    let electric = vehicle.electric.as_ref()?;
    let charging = vehicle.charging.as_ref();
    let is_charging = charging.is_some_and(crate::model::Charging::is_charging);

    Some(BatterySummary {
        soc_percent: electric.battery_level_percent,
        range_km: electric.range_km,
        charging: is_charging,
        plugged_in: charging.is_some_and(crate::model::Charging::is_plugged_in),
        charging_power_kw: if is_charging {
            charging.and_then(|c| c.power_kw)
        } else {
            None
        },
    })
}

// ── Physical status ─────────────────────────────────────────────────

pub fn physical_status(vehicle: &Vehicle, components: Option<&[Component]>) -> PhysicalStatus {
    PhysicalStatus {
        doors: wants(components, Component::Doors)
            .then(|| doors_status(vehicle))
            .flatten(),
        windows: wants(components, Component::Windows)
            .then(|| windows_status(vehicle))
            .flatten(),
        tyres: wants(components, Component::Tyres)
            .then(|| tyres_status(vehicle))
            .flatten(),
        lights: wants(components, Component::Lights)
            .then(|| lights_status(vehicle))
            .flatten(),
    }
}

fn doors_status(vehicle: &Vehicle) -> Option<DoorsStatus> {
    let doors = vehicle.doors.as_ref()?;
    Some(DoorsStatus {
        lock_state: doors.lock_state.as_ref().map(|s| s.as_token().to_owned()),
        open_state: doors.open_state.as_ref().map(|s| s.as_token().to_owned()),
        doors: doors
            .doors
            .iter()
            .map(|(position, door)| {
                (
                    position.clone(),
                    DoorStatus {
                        locked: door.lock_state.as_ref().map(|s| *s == LockState::Locked),
                        open: door.open_state.as_ref().map(|s| *s == OpenState::Open),
                    },
                )
            })
            .collect(),
    })
}

fn windows_status(vehicle: &Vehicle) -> Option<WindowsStatus> {
    let windows = vehicle.windows.as_ref()?;
    Some(WindowsStatus {
        windows: windows
            .windows
            .iter()
            .map(|(position, state)| {
                (
                    position.clone(),
                    WindowStatus {
                        open: state.as_ref().map(|s| *s == OpenState::Open),
                    },
                )
            })
            .collect(),
    })
}

fn tyres_status(vehicle: &Vehicle) -> Option<TyresStatus> {
    let tyres = vehicle.tyres.as_ref()?;
    Some(TyresStatus {
        tyres: tyres
            .tyres
            .iter()
            .map(|(position, tyre)| {
                (
                    position.clone(),
                    TyreStatus {
                        pressure_kpa: tyre.pressure_kpa,
                        temperature_kelvin: tyre.temperature_kelvin,
                    },
                )
            })
            .collect(),
    })
}

fn lights_status(vehicle: &Vehicle) -> Option<LightsStatus> {
    let lights = vehicle.lights.as_ref()?;
    Some(LightsStatus {
        lights: lights
            .lights
            .iter()
            .filter_map(|(side, state)| {
                state
                    .as_ref()
                    .map(|s| (side.clone(), s.as_token().to_owned()))
            })
            .collect(),
    })
}

// ── Energy status ───────────────────────────────────────────────────

pub fn energy_status(vehicle: &Vehicle, now: DateTime<Utc>) -> EnergyStatus {
    EnergyStatus {
        vehicle_type: vehicle.kind,
        range: RangeStatus {
            total_km: vehicle.total_range_km,
            electric_km: vehicle.electric.as_ref().and_then(|e| e.range_km),
            combustion_km: vehicle.combustion.as_ref().and_then(|c| c.range_km),
        },
        electric: vehicle.electric.as_ref().map(|e| ElectricDriveInfo {
            battery_level_percent: e.battery_level_percent,
            battery_temperature_kelvin: e.battery_temperature_kelvin,
            charging: charging_status(vehicle, now),
        }),
        combustion: vehicle.combustion.as_ref().map(|c| CombustionDriveInfo {
            tank_level_percent: c.tank_level_percent,
            fuel_type: c.fuel_type.clone(),
            adblue_range_km: c.adblue_range_km,
            adblue_level_percent: c.adblue_level_percent,
        }),
    }
}

pub fn charging_status(vehicle: &Vehicle, now: DateTime<Utc>) -> Option<ChargingStatus> {
    let charging = vehicle.charging.as_ref()?;
    Some(ChargingStatus {
        is_charging: charging.is_charging(),
        is_plugged_in: charging.is_plugged_in(),
        charging_power_kw: charging.power_kw,
        charging_state: charging.state.as_ref().map(|s| s.as_token().to_owned()),
        remaining_time_minutes: remaining_minutes(charging.estimated_completion, now),
        target_soc_percent: charging.target_soc_percent,
        current_soc_percent: vehicle
            .electric
            .as_ref()
            .and_then(|e| e.battery_level_percent),
        charge_mode: charging.charge_mode.clone(),
    })
}

// ── Climate status ──────────────────────────────────────────────────

pub fn climate_status(vehicle: &Vehicle, now: DateTime<Utc>) -> ClimateStatus {
    ClimateStatus {
        climatization: vehicle.climatization.as_ref().map(|c| ClimatizationStatus {
            state: c.state.as_ref().map(|s| s.as_token().to_owned()),
            is_active: c.is_active(),
            target_temperature_celsius: c.target_temperature_celsius,
            estimated_remaining_minutes: remaining_minutes(c.estimated_completion, now),
            window_heating_enabled: c.window_heating_enabled,
            seat_heating_enabled: c.seat_heating_enabled,
            climatization_at_unlock: c.climatization_at_unlock,
            uses_external_power: c.uses_external_power,
        }),
        window_heating: vehicle.window_heating.as_ref().map(|w| WindowHeatingStatus {
            front: w
                .windows
                .get("front")
                .and_then(|s| s.as_ref().map(|s| s.as_token().to_owned())),
            rear: w
                .windows
                .get("rear")
                .and_then(|s| s.as_ref().map(|s| s.as_token().to_owned())),
        }),
    }
}

// ── Supporting ──────────────────────────────────────────────────────

pub fn maintenance_info(vehicle: &Vehicle) -> Option<MaintenanceInfo> {
    vehicle.maintenance.as_ref().map(|m| MaintenanceInfo {
        inspection_due_date: m.inspection_due_at,
        inspection_due_distance_km: m.inspection_due_after_km,
        oil_service_due_date: m.oil_service_due_at,
        oil_service_due_distance_km: m.oil_service_due_after_km,
    })
}

/// Position, only when at least one coordinate is known.
pub fn position(vehicle: &Vehicle) -> Option<Position> {
    let p = vehicle.position.as_ref()?;
    if p.latitude.is_none() && p.longitude.is_none() {
        return None;
    }
    Some(Position {
        latitude: p.latitude,
        longitude: p.longitude,
        heading: p.heading,
    })
}
