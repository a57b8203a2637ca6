// ── Upstream boundary error types ──
//
// Errors raised by garage sources. The core crate translates these into
// domain-appropriate variants; consumers never see reqwest internals.

use thiserror::Error;

/// Unified error type for the garage crate.
#[derive(Debug, Error)]
pub enum GarageError {
    #[error("authentication with the bridge failed: {message}")]
    Authentication { message: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid bridge URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("malformed upstream payload: {message}")]
    Deserialization { message: String },

    #[error("vehicle {vin} is unknown to the upstream source")]
    UnknownVehicle { vin: String },
}
