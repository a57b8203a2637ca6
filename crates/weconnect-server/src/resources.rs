//! Read-only resource tree mirroring the read tools.
//!
//! Every endpoint answers HTTP 200 with a JSON value; missing vehicles
//! or missing data branches come back as `{"error": …}` values, same
//! as the tools.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use weconnect_core::VehicleAdapter;
use weconnect_core::model::{Component, DetailLevel};

use crate::state::AppState;
use crate::tools;

pub async fn list_vehicles(State(state): State<AppState>) -> Json<Value> {
    let adapter = state.adapter().await;
    match adapter.list_vehicles().await {
        Ok(vehicles) => Json(json!({ "count": vehicles.len(), "vehicles": vehicles })),
        Err(e) => Json(json!({ "error": e.to_string() })),
    }
}

pub async fn vehicle_info(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(info_at(adapter.as_ref(), &id, DetailLevel::Full).await)
}

pub async fn vehicle_state(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(info_at(adapter.as_ref(), &id, DetailLevel::All).await)
}

async fn info_at(adapter: &dyn VehicleAdapter, id: &str, detail: DetailLevel) -> Value {
    match adapter.get_vehicle(id, detail).await {
        Ok(Some(info)) => to_json(&info),
        Ok(None) => not_found(id),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

pub async fn doors(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    Json(physical_component(&state, &id, Component::Doors).await)
}

pub async fn windows(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    Json(physical_component(&state, &id, Component::Windows).await)
}

pub async fn tyres(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    Json(physical_component(&state, &id, Component::Tyres).await)
}

pub async fn lights(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    Json(physical_component(&state, &id, Component::Lights).await)
}

async fn physical_component(state: &AppState, id: &str, component: Component) -> Value {
    let adapter = state.adapter().await;
    match adapter.get_physical_status(id, Some(&[component])).await {
        Ok(Some(status)) => {
            let value = match component {
                Component::Doors => status.doors.as_ref().map(to_json),
                Component::Windows => status.windows.as_ref().map(to_json),
                Component::Tyres => status.tyres.as_ref().map(to_json),
                Component::Lights => status.lights.as_ref().map(to_json),
            };
            value.unwrap_or_else(|| {
                json!({ "error": format!("{component} status not available for vehicle {id}") })
            })
        }
        Ok(None) => not_found(id),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

pub async fn vehicle_type(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(match adapter.get_energy_status(&id).await {
        Ok(Some(energy)) => json!({ "vehicle_type": energy.vehicle_type }),
        Ok(None) => not_found(&id),
        Err(e) => json!({ "error": e.to_string() }),
    })
}

pub async fn battery(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(tools::battery_status(adapter.as_ref(), &id).await)
}

pub async fn charging(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(tools::charging_status(adapter.as_ref(), &id).await)
}

pub async fn range(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(match adapter.get_energy_status(&id).await {
        Ok(Some(energy)) => to_json(&energy.range),
        Ok(None) => not_found(&id),
        Err(e) => json!({ "error": e.to_string() }),
    })
}

pub async fn climate(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(match adapter.get_climate_status(&id).await {
        Ok(Some(climate)) => to_json(&climate),
        Ok(None) => not_found(&id),
        Err(e) => json!({ "error": e.to_string() }),
    })
}

pub async fn window_heating(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(match adapter.get_climate_status(&id).await {
        Ok(Some(climate)) => climate.window_heating.as_ref().map_or_else(
            || json!({ "error": format!("Window heating not available for vehicle {id}") }),
            to_json,
        ),
        Ok(None) => not_found(&id),
        Err(e) => json!({ "error": e.to_string() }),
    })
}

pub async fn position(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(match adapter.get_position(&id).await {
        Ok(Some(position)) => to_json(&position),
        Ok(None) => json!({ "error": format!("Position not available for vehicle {id}") }),
        Err(e) => json!({ "error": e.to_string() }),
    })
}

pub async fn maintenance(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let adapter = state.adapter().await;
    Json(match adapter.get_maintenance_info(&id).await {
        Ok(Some(maintenance)) => to_json(&maintenance),
        Ok(None) => {
            json!({ "error": format!("Maintenance information not available for vehicle {id}") })
        }
        Err(e) => json!({ "error": e.to_string() }),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| json!({ "error": format!("serialization failed: {e}") }))
}

fn not_found(id: &str) -> Value {
    json!({ "error": format!("Vehicle {id} not found") })
}
