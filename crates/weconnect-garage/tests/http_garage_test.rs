#![allow(clippy::unwrap_used)]
// Integration tests for `HttpGarage` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weconnect_garage::types::{ChargingState, LockState};
use weconnect_garage::{
    CommandRequest, GarageError, GarageSource, HttpGarage, LockAction, StartStop,
};

async fn setup() -> (MockServer, HttpGarage) {
    let server = MockServer::start().await;
    let garage = HttpGarage::new(&server.uri(), None).unwrap();
    (server, garage)
}

// ── Fetch tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_garage_parses_full_snapshot() {
    let (server, garage) = setup().await;

    Mock::given(method("GET"))
        .and(path("/garage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vehicles": [{
                "vin": "WVWZZZED4SE003938",
                "name": "ID7",
                "model": "ID.7 Tourer",
                "license_plate": "M-XY 5678",
                "type": "electric",
                "odometer_km": 12842.0,
                "doors": {
                    "lock_state": "locked",
                    "open_state": "closed",
                    "doors": {
                        "frontLeft": {"lock_state": "locked", "open_state": "closed"}
                    },
                    "commands": ["lock-unlock"]
                },
                "drives": {
                    "total_range_km": 312.0,
                    "electric": {
                        "range_km": 312.0,
                        "battery_level_percent": 77.0
                    }
                },
                "charging": {
                    "state": "charging",
                    "power_kw": 11.0,
                    "commands": ["start-stop"]
                }
            }]
        })))
        .mount(&server)
        .await;

    let snap = garage.fetch_garage().await.unwrap();
    let vehicle = snap.vehicle("WVWZZZED4SE003938").unwrap();

    assert_eq!(vehicle.name.as_deref(), Some("ID7"));
    let doors = vehicle.doors.as_ref().unwrap();
    assert_eq!(doors.lock_state, Some(LockState::Locked));
    assert!(doors.commands.supports("lock-unlock"));

    let charging = vehicle.charging.as_ref().unwrap();
    assert_eq!(charging.state, Some(ChargingState::Charging));
    assert_eq!(charging.power_kw, Some(11.0));
}

#[tokio::test]
async fn fetch_garage_keeps_unknown_state_tokens() {
    let (server, garage) = setup().await;

    Mock::given(method("GET"))
        .and(path("/garage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vehicles": [{
                "vin": "WVWZZZED4SE003938",
                "charging": {"state": "conservation"}
            }]
        })))
        .mount(&server)
        .await;

    let snap = garage.fetch_garage().await.unwrap();
    let charging = snap.vehicles[0].charging.as_ref().unwrap();
    assert_eq!(
        charging.state,
        Some(ChargingState::Other("conservation".into()))
    );
}

#[tokio::test]
async fn fetch_garage_maps_malformed_body_to_deserialization_error() {
    let (server, garage) = setup().await;

    Mock::given(method("GET"))
        .and(path("/garage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = garage.fetch_garage().await;
    assert!(
        matches!(result, Err(GarageError::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let (server, garage) = setup().await;

    Mock::given(method("GET"))
        .and(path("/garage"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "token expired"})),
        )
        .mount(&server)
        .await;

    let result = garage.fetch_garage().await;
    assert!(
        matches!(
            result,
            Err(GarageError::Authentication { ref message }) if message == "token expired"
        ),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let (server, garage) = setup().await;

    Mock::given(method("GET"))
        .and(path("/garage"))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({"message": "bridge offline"})),
        )
        .mount(&server)
        .await;

    let result = garage.fetch_garage().await;
    assert!(
        matches!(
            result,
            Err(GarageError::Api { status: 502, ref message }) if message == "bridge offline"
        ),
        "expected Api error, got: {result:?}"
    );
}

// ── Command tests ───────────────────────────────────────────────────

#[tokio::test]
async fn send_command_posts_tagged_payload() {
    let (server, garage) = setup().await;

    Mock::given(method("POST"))
        .and(path("/vehicles/WVWZZZED4SE003938/commands"))
        .and(body_partial_json(json!({
            "command": "climatization",
            "action": "start",
            "target_temperature_celsius": 21.0
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    garage
        .send_command(
            "WVWZZZED4SE003938",
            CommandRequest::Climatization {
                action: StartStop::Start,
                target_temperature_celsius: Some(21.0),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn send_command_maps_404_to_unknown_vehicle() {
    let (server, garage) = setup().await;

    Mock::given(method("POST"))
        .and(path("/vehicles/NOPE/commands"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = garage
        .send_command(
            "NOPE",
            CommandRequest::LockUnlock {
                action: LockAction::Lock,
            },
        )
        .await;

    assert!(
        matches!(result, Err(GarageError::UnknownVehicle { ref vin }) if vin == "NOPE"),
        "expected UnknownVehicle error, got: {result:?}"
    );
}

#[tokio::test]
async fn bearer_token_sent_when_configured() {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "s3cr3t".to_string().into();
    let garage = HttpGarage::new(&server.uri(), Some(&token)).unwrap();

    Mock::given(method("GET"))
        .and(path("/garage"))
        .and(header("authorization", "Bearer s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"vehicles": []})))
        .expect(1)
        .mount(&server)
        .await;

    let snap = garage.fetch_garage().await.unwrap();
    assert!(snap.vehicles.is_empty());
}
