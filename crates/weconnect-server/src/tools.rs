//! Tool registry and dispatch.
//!
//! Tools are invoked with `POST /tools/{name}` and a JSON argument
//! object. Every tool answers HTTP 200 with a JSON value; adapter
//! failures become `{"error": …}` (reads) or an unsuccessful command
//! outcome (writes). The only protocol-level failures are an unknown
//! tool name (404) and a malformed argument object (400).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use weconnect_core::model::{Component, DetailLevel};
use weconnect_core::{VehicleAdapter, VehicleCommand};

use crate::state::AppState;

// ── Registry ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub read_only: bool,
}

const fn read_tool(name: &'static str, description: &'static str) -> ToolDescriptor {
    ToolDescriptor {
        name,
        description,
        read_only: true,
    }
}

const fn write_tool(name: &'static str, description: &'static str) -> ToolDescriptor {
    ToolDescriptor {
        name,
        description,
        read_only: false,
    }
}

pub const TOOLS: &[ToolDescriptor] = &[
    read_tool("list_vehicles", "List all vehicles in the account"),
    read_tool(
        "get_vehicle_info",
        "Get detailed information about a vehicle (by name, VIN, or license plate)",
    ),
    read_tool(
        "get_vehicle_state",
        "Get the complete current state of a vehicle",
    ),
    read_tool("get_vehicle_doors", "Get door lock and open states"),
    read_tool(
        "get_battery_status",
        "Get battery level, range, and charging state of an electric vehicle",
    ),
    read_tool(
        "get_climatization_status",
        "Get climatization and window heating status",
    ),
    read_tool("get_charging_status", "Get detailed charging status"),
    read_tool("get_vehicle_position", "Get the last known position"),
    read_tool(
        "get_maintenance_info",
        "Get inspection and oil service schedules",
    ),
    write_tool("lock_vehicle", "Lock the vehicle"),
    write_tool("unlock_vehicle", "Unlock the vehicle"),
    write_tool(
        "start_climatization",
        "Start climatization, optionally with a target temperature in Celsius",
    ),
    write_tool("stop_climatization", "Stop climatization"),
    write_tool("start_charging", "Start charging"),
    write_tool("stop_charging", "Stop charging"),
    write_tool(
        "flash_lights",
        "Flash the exterior lights to locate the vehicle",
    ),
    write_tool(
        "honk_and_flash",
        "Honk the horn and flash the lights to locate the vehicle",
    ),
    write_tool("start_window_heating", "Start window heating"),
    write_tool("stop_window_heating", "Stop window heating"),
];

// ── Argument shapes ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct VehicleArgs {
    vehicle_id: String,
}

#[derive(Debug, Deserialize)]
struct ClimatizationArgs {
    vehicle_id: String,
    #[serde(default)]
    target_temp_celsius: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SignalArgs {
    vehicle_id: String,
    #[serde(default)]
    duration_seconds: Option<u32>,
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list_tools() -> Json<Value> {
    Json(json!({ "tools": TOOLS }))
}

pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    args: Option<Json<Value>>,
) -> Response {
    let args = args.map_or_else(|| json!({}), |Json(v)| v);
    let adapter = state.adapter().await;

    match dispatch(adapter.as_ref(), &name, args).await {
        Ok(value) => Json(value).into_response(),
        Err(ToolCallError::UnknownTool) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown tool: {name}") })),
        )
            .into_response(),
        Err(ToolCallError::BadArguments(message)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
            .into_response(),
    }
}

enum ToolCallError {
    UnknownTool,
    BadArguments(String),
}

fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, ToolCallError> {
    serde_json::from_value(args).map_err(|e| ToolCallError::BadArguments(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| json!({ "error": format!("serialization failed: {e}") }))
}

fn not_found(vehicle_id: &str) -> Value {
    json!({ "error": format!("Vehicle {vehicle_id} not found") })
}

async fn dispatch(
    adapter: &dyn VehicleAdapter,
    name: &str,
    args: Value,
) -> Result<Value, ToolCallError> {
    match name {
        "list_vehicles" => Ok(list_vehicles(adapter).await),
        "get_vehicle_info" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(vehicle_info(adapter, &args.vehicle_id, DetailLevel::Full).await)
        }
        "get_vehicle_state" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(vehicle_info(adapter, &args.vehicle_id, DetailLevel::All).await)
        }
        "get_vehicle_doors" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(vehicle_doors(adapter, &args.vehicle_id).await)
        }
        "get_battery_status" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(battery_status(adapter, &args.vehicle_id).await)
        }
        "get_climatization_status" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(climatization_status(adapter, &args.vehicle_id).await)
        }
        "get_charging_status" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(charging_status(adapter, &args.vehicle_id).await)
        }
        "get_vehicle_position" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(vehicle_position(adapter, &args.vehicle_id).await)
        }
        "get_maintenance_info" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(maintenance_info(adapter, &args.vehicle_id).await)
        }
        "lock_vehicle" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(execute(adapter, &args.vehicle_id, VehicleCommand::Lock).await)
        }
        "unlock_vehicle" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(execute(adapter, &args.vehicle_id, VehicleCommand::Unlock).await)
        }
        "start_climatization" => {
            let args: ClimatizationArgs = parse_args(args)?;
            Ok(execute(
                adapter,
                &args.vehicle_id,
                VehicleCommand::StartClimatization {
                    target_temp_celsius: args.target_temp_celsius,
                },
            )
            .await)
        }
        "stop_climatization" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(execute(adapter, &args.vehicle_id, VehicleCommand::StopClimatization).await)
        }
        "start_charging" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(execute(adapter, &args.vehicle_id, VehicleCommand::StartCharging).await)
        }
        "stop_charging" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(execute(adapter, &args.vehicle_id, VehicleCommand::StopCharging).await)
        }
        "flash_lights" => {
            let args: SignalArgs = parse_args(args)?;
            Ok(execute(
                adapter,
                &args.vehicle_id,
                VehicleCommand::FlashLights {
                    duration_seconds: args.duration_seconds,
                },
            )
            .await)
        }
        "honk_and_flash" => {
            let args: SignalArgs = parse_args(args)?;
            Ok(execute(
                adapter,
                &args.vehicle_id,
                VehicleCommand::HonkAndFlash {
                    duration_seconds: args.duration_seconds,
                },
            )
            .await)
        }
        "start_window_heating" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(execute(adapter, &args.vehicle_id, VehicleCommand::StartWindowHeating).await)
        }
        "stop_window_heating" => {
            let args: VehicleArgs = parse_args(args)?;
            Ok(execute(adapter, &args.vehicle_id, VehicleCommand::StopWindowHeating).await)
        }
        _ => Err(ToolCallError::UnknownTool),
    }
}

// ── Read tools ──────────────────────────────────────────────────────

async fn list_vehicles(adapter: &dyn VehicleAdapter) -> Value {
    match adapter.list_vehicles().await {
        Ok(vehicles) => json!({ "count": vehicles.len(), "vehicles": vehicles }),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

async fn vehicle_info(adapter: &dyn VehicleAdapter, vehicle_id: &str, detail: DetailLevel) -> Value {
    match adapter.get_vehicle(vehicle_id, detail).await {
        Ok(Some(info)) => to_json(&info),
        Ok(None) => not_found(vehicle_id),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

async fn vehicle_doors(adapter: &dyn VehicleAdapter, vehicle_id: &str) -> Value {
    match adapter
        .get_physical_status(vehicle_id, Some(&[Component::Doors]))
        .await
    {
        Ok(Some(status)) => status.doors.as_ref().map_or_else(
            || json!({ "error": format!("Door status not available for vehicle {vehicle_id}") }),
            to_json,
        ),
        Ok(None) => not_found(vehicle_id),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

pub(crate) async fn battery_status(adapter: &dyn VehicleAdapter, vehicle_id: &str) -> Value {
    match adapter.get_energy_status(vehicle_id).await {
        Ok(Some(energy)) => match energy.electric {
            Some(electric) => {
                let charging = electric.charging.as_ref();
                let is_charging = charging.is_some_and(|c| c.is_charging);
                let mut view = json!({
                    "battery_level_percent": electric.battery_level_percent,
                    "range_km": energy.range.electric_km,
                    "is_charging": is_charging,
                });
                if is_charging {
                    if let Some(c) = charging {
                        view["charging_power_kw"] = to_json(&c.charging_power_kw);
                        view["estimated_charge_time_minutes"] =
                            to_json(&c.remaining_time_minutes);
                    }
                }
                view
            }
            None => {
                json!({ "error": format!("Vehicle {vehicle_id} doesn't support battery status") })
            }
        },
        Ok(None) => not_found(vehicle_id),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

async fn climatization_status(adapter: &dyn VehicleAdapter, vehicle_id: &str) -> Value {
    match adapter.get_climate_status(vehicle_id).await {
        Ok(Some(climate)) => to_json(&climate),
        Ok(None) => not_found(vehicle_id),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

pub(crate) async fn charging_status(adapter: &dyn VehicleAdapter, vehicle_id: &str) -> Value {
    match adapter.get_energy_status(vehicle_id).await {
        Ok(Some(energy)) => energy
            .electric
            .and_then(|e| e.charging)
            .as_ref()
            .map_or_else(
                || {
                    json!({
                        "error":
                            format!("Vehicle {vehicle_id} not found or doesn't support charging")
                    })
                },
                to_json,
            ),
        Ok(None) => {
            json!({ "error": format!("Vehicle {vehicle_id} not found or doesn't support charging") })
        }
        Err(e) => json!({ "error": e.to_string() }),
    }
}

async fn vehicle_position(adapter: &dyn VehicleAdapter, vehicle_id: &str) -> Value {
    match adapter.get_position(vehicle_id).await {
        Ok(Some(position)) => to_json(&position),
        Ok(None) => {
            json!({ "error": format!("Position not available for vehicle {vehicle_id}") })
        }
        Err(e) => json!({ "error": e.to_string() }),
    }
}

async fn maintenance_info(adapter: &dyn VehicleAdapter, vehicle_id: &str) -> Value {
    match adapter.get_maintenance_info(vehicle_id).await {
        Ok(Some(maintenance)) => to_json(&maintenance),
        Ok(None) => json!({
            "error": format!("Maintenance information not available for vehicle {vehicle_id}")
        }),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

// ── Write tools ─────────────────────────────────────────────────────

async fn execute(adapter: &dyn VehicleAdapter, vehicle_id: &str, command: VehicleCommand) -> Value {
    let outcome = adapter.execute(vehicle_id, command).await;
    to_json(&outcome)
}
