//! Guided workflow prompts.
//!
//! Prompts are parameterized text templates walking an agent through a
//! multi-step workflow built from the tools. They render from their
//! arguments alone and never touch the adapter; the agent runs the
//! referenced tools itself. `GET /prompts` lists descriptors,
//! `GET /prompts/{name}?vehicle_id=…` renders one.

use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// ── Registry ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PromptDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [PromptArgument],
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub required: bool,
}

const VEHICLE_ID: PromptArgument = PromptArgument {
    name: "vehicle_id",
    required: true,
};

pub const PROMPTS: &[PromptDescriptor] = &[
    PromptDescriptor {
        name: "safe_start_charging",
        description: "Start vehicle charging with battery level and connection checks",
        arguments: &[VEHICLE_ID],
    },
    PromptDescriptor {
        name: "prepare_vehicle_for_departure",
        description: "Pre-heat the cabin and unlock the vehicle for immediate departure",
        arguments: &[
            VEHICLE_ID,
            PromptArgument {
                name: "target_temp_celsius",
                required: false,
            },
        ],
    },
    PromptDescriptor {
        name: "check_vehicle_health",
        description: "Comprehensive health check covering battery, doors, climate, and location",
        arguments: &[VEHICLE_ID],
    },
    PromptDescriptor {
        name: "safe_stop_charging_and_prepare",
        description: "Stop the charging session and immediately prepare the vehicle for departure",
        arguments: &[VEHICLE_ID],
    },
    PromptDescriptor {
        name: "monitor_charging_session",
        description: "Monitor charging progress until the target state of charge is reached",
        arguments: &[
            VEHICLE_ID,
            PromptArgument {
                name: "target_soc_percent",
                required: false,
            },
        ],
    },
    PromptDescriptor {
        name: "secure_vehicle",
        description: "Lock the vehicle and stop climate systems for safe parking",
        arguments: &[VEHICLE_ID],
    },
    PromptDescriptor {
        name: "locate_and_flash",
        description: "Get the vehicle position and flash the lights to help find it",
        arguments: &[
            VEHICLE_ID,
            PromptArgument {
                name: "duration_seconds",
                required: false,
            },
        ],
    },
];

// ── Handlers ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PromptQuery {
    vehicle_id: Option<String>,
    target_temp_celsius: Option<f64>,
    target_soc_percent: Option<i32>,
    duration_seconds: Option<u32>,
}

pub async fn list_prompts() -> Json<Value> {
    Json(json!({ "prompts": PROMPTS }))
}

pub async fn get_prompt(Path(name): Path<String>, Query(query): Query<PromptQuery>) -> Response {
    let Some(vehicle_id) = query.vehicle_id.as_deref() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required argument: vehicle_id" })),
        )
            .into_response();
    };

    match render(&name, vehicle_id, &query) {
        Some(text) => Json(json!({ "name": name, "text": text })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown prompt: {name}") })),
        )
            .into_response(),
    }
}

fn render(name: &str, vehicle_id: &str, query: &PromptQuery) -> Option<String> {
    let text = match name {
        "safe_start_charging" => format!(
            "Start charging for vehicle {vehicle_id} with the following steps:\n\
             \n\
             1. Get the current battery status using the get_battery_status tool\n\
             2. Check that the battery level is well below the target SOC (typically 80%); don't charge if already full\n\
             3. Check that the vehicle is plugged in using get_charging_status\n\
             4. If the checks pass, use the start_charging tool\n\
             5. Verify charging started by checking get_charging_status again\n\
             6. Report the final status to the user\n\
             \n\
             If any check fails, explain why charging cannot start and suggest next steps."
        ),
        "prepare_vehicle_for_departure" => {
            let temp = query.target_temp_celsius.unwrap_or(21.0);
            format!(
                "Prepare vehicle {vehicle_id} for departure with target temperature {temp}\u{b0}C:\n\
                 \n\
                 1. Check the current vehicle state using get_vehicle_state\n\
                 2. Verify the vehicle is locked\n\
                 3. Start climatization at {temp}\u{b0}C using start_climatization\n\
                 4. Allow a couple of minutes for the cabin to reach temperature\n\
                 5. Check progress with get_climatization_status\n\
                 6. Unlock the vehicle using unlock_vehicle\n\
                 7. Verify the unlock succeeded with get_vehicle_doors\n\
                 8. Report \"Vehicle ready for departure\" with the current climate and door status\n\
                 \n\
                 If any step fails, stop the workflow and report the issue to the user."
            )
        }
        "check_vehicle_health" => format!(
            "Perform a comprehensive health check for vehicle {vehicle_id}:\n\
             \n\
             1. Get basic vehicle info using get_vehicle_info\n\
             2. Get the current vehicle state using get_vehicle_state\n\
             3. Get the battery status using get_battery_status (electric vehicles only)\n\
             4. Get the door and lock status using get_vehicle_doors\n\
             5. Get the climatization status using get_climatization_status\n\
             6. Get the current position using get_vehicle_position\n\
             \n\
             Analyze the results and provide a structured summary:\n\
             - Overall health status (Good/Warning/Critical)\n\
             - Battery level and range (for electric vehicles)\n\
             - Security status (doors locked, windows closed)\n\
             - Active systems (climate, charging)\n\
             - Current location\n\
             - Any issues requiring attention"
        ),
        "safe_stop_charging_and_prepare" => format!(
            "Stop charging and prepare {vehicle_id} for immediate departure:\n\
             \n\
             1. Check whether the vehicle is currently charging using get_charging_status\n\
             2. If charging, stop it using the stop_charging tool\n\
             3. Verify charging stopped (plugged in but no longer charging)\n\
             4. Start climatization at 21\u{b0}C using start_climatization\n\
             5. Unlock the vehicle using unlock_vehicle\n\
             6. Report \"Vehicle ready: charging stopped, climate started, doors unlocked\"\n\
             \n\
             Skip steps whose preconditions are not met (e.g. not charging)."
        ),
        "monitor_charging_session" => {
            let target = query.target_soc_percent.unwrap_or(80);
            format!(
                "Monitor the charging session for {vehicle_id} until {target}% SOC:\n\
                 \n\
                 1. Check the initial charging status using get_charging_status\n\
                 2. Verify the vehicle is actively charging, not just plugged in\n\
                 3. Report the initial SOC and the estimated time to {target}%\n\
                 4. Poll get_charging_status every few minutes\n\
                 5. Report progress updates (current SOC, charging power, time remaining)\n\
                 6. Once the SOC reaches {target}%, use stop_charging\n\
                 7. Verify charging stopped and report the final status\n\
                 \n\
                 Note: this is a monitoring workflow; explain to the user that it \
                 requires periodic checks rather than continuous blocking."
            )
        }
        "secure_vehicle" => format!(
            "Secure vehicle {vehicle_id} before leaving it unattended:\n\
             \n\
             1. Check the current climatization status using get_climatization_status\n\
             2. If climate is running, stop it using stop_climatization\n\
             3. Lock the vehicle using lock_vehicle\n\
             4. Verify all doors are locked using get_vehicle_doors\n\
             5. Verify climate stopped using get_climatization_status again\n\
             6. Report \"Vehicle secured: all doors locked, climate off\"\n\
             \n\
             If the lock verification fails, retry once, then report a security issue to the user."
        ),
        "locate_and_flash" => {
            let duration = query.duration_seconds.unwrap_or(10);
            format!(
                "Help the user locate vehicle {vehicle_id}:\n\
                 \n\
                 1. Get the current position using get_vehicle_position\n\
                 2. Report the coordinates to the user\n\
                 3. Flash the lights for {duration} seconds using flash_lights\n\
                 4. Report \"Lights flashing for {duration}s\" together with the position\n\
                 5. Optionally suggest opening a maps app with the coordinates"
            )
        }
        _ => return None,
    };
    Some(text)
}
