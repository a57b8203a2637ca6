// ── Vehicle write operations ──
//
// One enum for everything that changes vehicle state. Validation runs
// against the typed vehicle before anything reaches the upstream
// source; refusals come back as plain messages for the outcome value.

use weconnect_garage::command::{CommandRequest, LockAction, SignalMode, StartStop};

use crate::model::Vehicle;

#[derive(Debug, Clone, PartialEq)]
pub enum VehicleCommand {
    Lock,
    Unlock,
    StartClimatization { target_temp_celsius: Option<f64> },
    StopClimatization,
    StartCharging,
    StopCharging,
    FlashLights { duration_seconds: Option<u32> },
    HonkAndFlash { duration_seconds: Option<u32> },
    StartWindowHeating,
    StopWindowHeating,
}

impl VehicleCommand {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::StartClimatization { .. } => "start_climatization",
            Self::StopClimatization => "stop_climatization",
            Self::StartCharging => "start_charging",
            Self::StopCharging => "stop_charging",
            Self::FlashLights { .. } => "flash_lights",
            Self::HonkAndFlash { .. } => "honk_and_flash",
            Self::StartWindowHeating => "start_window_heating",
            Self::StopWindowHeating => "stop_window_heating",
        }
    }

    /// Check that the vehicle carries the capability and that the
    /// capability accepts this command. Refusal messages feed the
    /// command outcome verbatim.
    pub fn validate(&self, vehicle: &Vehicle) -> Result<(), String> {
        match self {
            Self::Lock | Self::Unlock => {
                let supported = vehicle
                    .doors
                    .as_ref()
                    .is_some_and(|doors| doors.supports_lock_unlock);
                if supported {
                    Ok(())
                } else {
                    Err("Vehicle does not support lock/unlock commands".to_owned())
                }
            }
            Self::StartClimatization { .. } | Self::StopClimatization => {
                let supported = vehicle
                    .climatization
                    .as_ref()
                    .is_some_and(|c| c.supports_start_stop);
                if supported {
                    Ok(())
                } else {
                    Err("Vehicle does not support climatization commands".to_owned())
                }
            }
            Self::StartCharging | Self::StopCharging => {
                let supported = vehicle
                    .charging
                    .as_ref()
                    .is_some_and(|c| c.supports_start_stop);
                if supported {
                    Ok(())
                } else {
                    Err("Vehicle does not support charging commands".to_owned())
                }
            }
            Self::FlashLights { .. } | Self::HonkAndFlash { .. } => {
                let supported = vehicle
                    .locator
                    .as_ref()
                    .is_some_and(|l| l.supports_honk_and_flash);
                if supported {
                    Ok(())
                } else {
                    Err("Vehicle does not support honk and flash commands".to_owned())
                }
            }
            Self::StartWindowHeating | Self::StopWindowHeating => {
                let supported = vehicle
                    .window_heating
                    .as_ref()
                    .is_some_and(|w| w.supports_start_stop);
                if supported {
                    Ok(())
                } else {
                    Err("Vehicle does not support window heating commands".to_owned())
                }
            }
        }
    }

    /// Upstream payload for this command.
    pub fn to_request(&self) -> CommandRequest {
        match self {
            Self::Lock => CommandRequest::LockUnlock {
                action: LockAction::Lock,
            },
            Self::Unlock => CommandRequest::LockUnlock {
                action: LockAction::Unlock,
            },
            Self::StartClimatization { target_temp_celsius } => CommandRequest::Climatization {
                action: StartStop::Start,
                target_temperature_celsius: *target_temp_celsius,
            },
            Self::StopClimatization => CommandRequest::Climatization {
                action: StartStop::Stop,
                target_temperature_celsius: None,
            },
            Self::StartCharging => CommandRequest::Charging {
                action: StartStop::Start,
            },
            Self::StopCharging => CommandRequest::Charging {
                action: StartStop::Stop,
            },
            Self::FlashLights { duration_seconds } => CommandRequest::HonkAndFlash {
                mode: SignalMode::Flash,
                duration_seconds: *duration_seconds,
            },
            Self::HonkAndFlash { duration_seconds } => CommandRequest::HonkAndFlash {
                mode: SignalMode::HonkAndFlash,
                duration_seconds: *duration_seconds,
            },
            Self::StartWindowHeating => CommandRequest::WindowHeating {
                action: StartStop::Start,
            },
            Self::StopWindowHeating => CommandRequest::WindowHeating {
                action: StartStop::Stop,
            },
        }
    }

    /// Message for a successful outcome.
    pub fn success_message(&self) -> String {
        match self {
            Self::Lock => "Vehicle locked".to_owned(),
            Self::Unlock => "Vehicle unlocked".to_owned(),
            Self::StartClimatization {
                target_temp_celsius: Some(temp),
            } => {
                format!("Climatization started with target temperature {temp}\u{b0}C")
            }
            Self::StartClimatization {
                target_temp_celsius: None,
            } => "Climatization started".to_owned(),
            Self::StopClimatization => "Climatization stopped".to_owned(),
            Self::StartCharging => "Charging started".to_owned(),
            Self::StopCharging => "Charging stopped".to_owned(),
            Self::FlashLights { .. } => "Lights flashing".to_owned(),
            Self::HonkAndFlash { .. } => "Honking and flashing".to_owned(),
            Self::StartWindowHeating => "Window heating started".to_owned(),
            Self::StopWindowHeating => "Window heating stopped".to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use weconnect_garage::demo::{DEMO_COMBUSTION_VIN, DEMO_ELECTRIC_VIN, demo_snapshot};

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
    fn lock_validates_against_door_capability() {
        let electric = demo_vehicle(DEMO_ELECTRIC_VIN);
        assert!(VehicleCommand::Lock.validate(&electric).is_ok());

        let mut bare = electric.clone();
        bare.doors = None;
        assert_eq!(
            VehicleCommand::Lock.validate(&bare).unwrap_err(),
            "Vehicle does not support lock/unlock commands"
        );
    }

    #[test]
    fn charging_refused_for_combustion_vehicle() {
        let t7 = demo_vehicle(DEMO_COMBUSTION_VIN);
        assert_eq!(
            VehicleCommand::StartCharging.validate(&t7).unwrap_err(),
            "Vehicle does not support charging commands"
        );
        assert!(VehicleCommand::StopClimatization.validate(&t7).is_ok());
    }

    #[test]
    fn window_heating_refused_without_namespace() {
        let t7 = demo_vehicle(DEMO_COMBUSTION_VIN);
        assert!(VehicleCommand::StartWindowHeating.validate(&t7).is_err());

        let id7 = demo_vehicle(DEMO_ELECTRIC_VIN);
        assert!(VehicleCommand::StartWindowHeating.validate(&id7).is_ok());
    }

    #[test]
    fn requests_carry_arguments() {
        let request = VehicleCommand::StartClimatization {
            target_temp_celsius: Some(22.0),
        }
        .to_request();
        assert_eq!(
            request,
            CommandRequest::Climatization {
                action: StartStop::Start,
                target_temperature_celsius: Some(22.0),
            }
        );

        let request = VehicleCommand::FlashLights {
            duration_seconds: Some(15),
        }
        .to_request();
        assert_eq!(
            request,
            CommandRequest::HonkAndFlash {
                mode: SignalMode::Flash,
                duration_seconds: Some(15),
            }
        );
    }
}
