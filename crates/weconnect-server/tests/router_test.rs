#![allow(clippy::unwrap_used)]
// Router integration tests against the demo fleet.

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use weconnect_core::GarageAdapter;
use weconnect_garage::DemoGarage;
use weconnect_server::{AppState, create_router};

const TTL: Duration = Duration::from_secs(300);

async fn demo_state(api_key: Option<&str>) -> AppState {
    let adapter = GarageAdapter::connect(Arc::new(DemoGarage::new()), TTL)
        .await
        .unwrap();
    AppState::new(Arc::new(adapter), api_key.map(|key| key.to_owned().into()))
}

async fn demo_server() -> TestServer {
    TestServer::new(create_router(demo_state(None).await)).unwrap()
}

// ── Health and registry ─────────────────────────────────────────────

#[tokio::test]
async fn health_reports_readiness() {
    let server = demo_server().await;
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "weconnect-mcp");
    assert_eq!(body["ready"], true);

    let starting = TestServer::new(create_router(AppState::starting(None))).unwrap();
    let body: Value = starting.get("/health").await.json();
    assert_eq!(body["ready"], false);
}

#[tokio::test]
async fn tool_registry_lists_reads_and_writes() {
    let server = demo_server().await;
    let body: Value = server.get("/tools").await.json();

    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 19);
    let lock = tools
        .iter()
        .find(|t| t["name"] == "lock_vehicle")
        .unwrap();
    assert_eq!(lock["read_only"], false);
    let list = tools
        .iter()
        .find(|t| t["name"] == "list_vehicles")
        .unwrap();
    assert_eq!(list["read_only"], true);
}

// ── Read tools ──────────────────────────────────────────────────────

#[tokio::test]
async fn list_vehicles_returns_the_fleet() {
    let server = demo_server().await;
    let body: Value = server.post("/tools/list_vehicles").await.json();

    assert_eq!(body["count"], 2);
    assert_eq!(body["vehicles"][0]["name"], "ID7");
    assert_eq!(body["vehicles"][1]["license_plate"], "M-AB 1234");
}

#[tokio::test]
async fn vehicle_info_resolves_names() {
    let server = demo_server().await;
    let body: Value = server
        .post("/tools/get_vehicle_info")
        .json(&json!({ "vehicle_id": "id7" }))
        .await
        .json();

    assert_eq!(body["vin"], "WVWZZZED4SE003938");
    assert_eq!(body["model"], "ID.7 Tourer");
    assert_eq!(body["odometer_km"], 12842.0);
    // Full level carries no battery summary.
    assert!(body.get("battery").is_none());
}

#[tokio::test]
async fn vehicle_state_carries_summaries() {
    let server = demo_server().await;
    let body: Value = server
        .post("/tools/get_vehicle_state")
        .json(&json!({ "vehicle_id": "ID7" }))
        .await
        .json();

    assert_eq!(body["battery"]["soc_percent"], 77.0);
    assert_eq!(body["battery"]["charging"], true);
    assert_eq!(body["climate"]["is_on"], false);
}

#[tokio::test]
async fn battery_status_quick_view() {
    let server = demo_server().await;
    let body: Value = server
        .post("/tools/get_battery_status")
        .json(&json!({ "vehicle_id": "ID7" }))
        .await
        .json();

    assert_eq!(body["battery_level_percent"], 77.0);
    assert_eq!(body["range_km"], 312.0);
    assert_eq!(body["is_charging"], true);
    assert_eq!(body["charging_power_kw"], 11.0);
    assert!(body["estimated_charge_time_minutes"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn battery_status_errors_for_combustion_vehicle() {
    let server = demo_server().await;
    let response = server
        .post("/tools/get_battery_status")
        .json(&json!({ "vehicle_id": "T7" }))
        .await;

    // Adapter-level failures stay HTTP 200.
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Vehicle T7 doesn't support battery status"
    );
}

#[tokio::test]
async fn charging_status_errors_for_combustion_vehicle() {
    let server = demo_server().await;
    let body: Value = server
        .post("/tools/get_charging_status")
        .json(&json!({ "vehicle_id": "M-AB 1234" }))
        .await
        .json();

    assert_eq!(
        body["error"],
        "Vehicle M-AB 1234 not found or doesn't support charging"
    );
}

#[tokio::test]
async fn unknown_vehicle_is_an_error_value() {
    let server = demo_server().await;
    let response = server
        .post("/tools/get_vehicle_info")
        .json(&json!({ "vehicle_id": "Golf" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["error"], "Vehicle Golf not found");
}

// ── Write tools ─────────────────────────────────────────────────────

#[tokio::test]
async fn lock_vehicle_by_plate_succeeds() {
    let server = demo_server().await;
    let body: Value = server
        .post("/tools/lock_vehicle")
        .json(&json!({ "vehicle_id": "M-AB 1234" }))
        .await
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Vehicle locked");
}

#[tokio::test]
async fn start_climatization_carries_target_temperature() {
    let server = demo_server().await;
    let body: Value = server
        .post("/tools/start_climatization")
        .json(&json!({ "vehicle_id": "ID7", "target_temp_celsius": 21.5 }))
        .await
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Climatization started with target temperature 21.5\u{b0}C"
    );
}

#[tokio::test]
async fn unsupported_write_fails_as_a_value() {
    let server = demo_server().await;
    let response = server
        .post("/tools/start_charging")
        .json(&json!({ "vehicle_id": "T7" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Vehicle does not support charging commands");
}

// ── Protocol-level failures ─────────────────────────────────────────

#[tokio::test]
async fn unknown_tool_is_404() {
    let server = demo_server().await;
    let response = server.post("/tools/self_destruct").json(&json!({})).await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn missing_arguments_are_400() {
    let server = demo_server().await;
    let response = server.post("/tools/get_vehicle_info").json(&json!({})).await;
    response.assert_status_bad_request();
}

// ── Prompts ─────────────────────────────────────────────────────────

#[tokio::test]
async fn prompt_registry_lists_workflows() {
    let server = demo_server().await;
    let body: Value = server.get("/prompts").await.json();

    let prompts = body["prompts"].as_array().unwrap();
    assert_eq!(prompts.len(), 7);
    let departure = prompts
        .iter()
        .find(|p| p["name"] == "prepare_vehicle_for_departure")
        .unwrap();
    assert!(departure["description"].as_str().unwrap().contains("unlock"));
    assert_eq!(departure["arguments"][0]["name"], "vehicle_id");
    assert_eq!(departure["arguments"][0]["required"], true);
    assert_eq!(departure["arguments"][1]["required"], false);
}

#[tokio::test]
async fn prompt_renders_with_defaults_and_overrides() {
    let server = demo_server().await;

    let body: Value = server
        .get("/prompts/prepare_vehicle_for_departure?vehicle_id=ID7")
        .await
        .json();
    let text = body["text"].as_str().unwrap();
    assert!(text.contains("vehicle ID7"));
    assert!(text.contains("21\u{b0}C"));
    assert!(text.contains("start_climatization"));

    let body: Value = server
        .get("/prompts/prepare_vehicle_for_departure?vehicle_id=ID7&target_temp_celsius=18.5")
        .await
        .json();
    assert!(body["text"].as_str().unwrap().contains("18.5\u{b0}C"));

    let body: Value = server
        .get("/prompts/monitor_charging_session?vehicle_id=ID7&target_soc_percent=90")
        .await
        .json();
    assert!(body["text"].as_str().unwrap().contains("90% SOC"));
}

#[tokio::test]
async fn unknown_prompt_is_404() {
    let server = demo_server().await;
    let response = server.get("/prompts/plan_road_trip?vehicle_id=ID7").await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "Unknown prompt: plan_road_trip");
}

#[tokio::test]
async fn prompt_without_vehicle_id_is_400() {
    let server = demo_server().await;
    let response = server.get("/prompts/secure_vehicle").await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Missing required argument: vehicle_id");
}

// ── Resources ───────────────────────────────────────────────────────

#[tokio::test]
async fn resource_tree_mirrors_the_tools() {
    let server = demo_server().await;

    let body: Value = server.get("/vehicles").await.json();
    assert_eq!(body["count"], 2);

    let body: Value = server
        .get("/vehicles/WVWZZZED4SE003938/doors")
        .await
        .json();
    assert_eq!(body["lock_state"], "locked");
    assert_eq!(body["doors"]["frontLeft"]["locked"], true);

    let body: Value = server.get("/vehicles/ID7/type").await.json();
    assert_eq!(body["vehicle_type"], "electric");

    let body: Value = server.get("/vehicles/T7/range").await.json();
    assert_eq!(body["total_km"], 650.0);
    assert!(body.get("electric_km").is_none());

    let body: Value = server.get("/vehicles/ID7/window-heating").await.json();
    assert_eq!(body["front"], "off");

    let body: Value = server.get("/vehicles/T7/tyres").await.json();
    assert_eq!(body["error"], "tyres status not available for vehicle T7");

    let body: Value = server.get("/vehicles/ID7/position").await.json();
    assert_eq!(body["latitude"], 48.137);
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn api_key_guards_everything_but_health() {
    let state = demo_state(Some("sesame")).await;
    let server = TestServer::new(create_router(state)).unwrap();

    server.get("/health").await.assert_status_ok();
    server.get("/vehicles").await.assert_status_unauthorized();
    server.get("/prompts").await.assert_status_unauthorized();
    server
        .post("/tools/list_vehicles")
        .await
        .assert_status_unauthorized();

    let response = server
        .get("/vehicles")
        .authorization_bearer("sesame")
        .await;
    response.assert_status_ok();
}

// ── Bootstrap hot swap ──────────────────────────────────────────────

#[tokio::test]
async fn adapter_swap_brings_the_fleet_online() {
    let state = AppState::starting(None);
    let server = TestServer::new(create_router(state.clone())).unwrap();

    let body: Value = server.post("/tools/list_vehicles").await.json();
    assert_eq!(body["count"], 0);

    let body: Value = server
        .post("/tools/lock_vehicle")
        .json(&json!({ "vehicle_id": "ID7" }))
        .await
        .json();
    assert_eq!(body["success"], false);

    let adapter = GarageAdapter::connect(Arc::new(DemoGarage::new()), TTL)
        .await
        .unwrap();
    state.swap_adapter(Arc::new(adapter)).await;

    let body: Value = server.post("/tools/list_vehicles").await.json();
    assert_eq!(body["count"], 2);
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["ready"], true);
}
