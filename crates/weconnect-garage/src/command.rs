// Command payloads submitted to the upstream source.
//
// These mirror the upstream command vocabulary: a capability namespace
// accepts a fixed command id ("lock-unlock", "start-stop",
// "honk-and-flash") with a small argument object.

use serde::{Deserialize, Serialize};

/// Upstream command ids, matched against a capability's [`CommandSurface`].
///
/// [`CommandSurface`]: crate::types::CommandSurface
pub const LOCK_UNLOCK: &str = "lock-unlock";
pub const START_STOP: &str = "start-stop";
pub const HONK_AND_FLASH: &str = "honk-and-flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockAction {
    Lock,
    Unlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartStop {
    Start,
    Stop,
}

/// How the vehicle should signal its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalMode {
    Flash,
    HonkAndFlash,
}

/// A command request as posted to `POST /vehicles/{vin}/commands`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum CommandRequest {
    LockUnlock {
        action: LockAction,
    },
    Climatization {
        action: StartStop,
        #[serde(skip_serializing_if = "Option::is_none")]
        target_temperature_celsius: Option<f64>,
    },
    Charging {
        action: StartStop,
    },
    WindowHeating {
        action: StartStop,
    },
    HonkAndFlash {
        mode: SignalMode,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_seconds: Option<u32>,
    },
}

impl CommandRequest {
    /// Upstream command id this request resolves to.
    pub fn command_id(&self) -> &'static str {
        match self {
            Self::LockUnlock { .. } => LOCK_UNLOCK,
            Self::Climatization { .. } | Self::Charging { .. } | Self::WindowHeating { .. } => {
                START_STOP
            }
            Self::HonkAndFlash { .. } => HONK_AND_FLASH,
        }
    }
}
