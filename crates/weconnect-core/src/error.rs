use thiserror::Error;

/// Unified error type for the core crate. Unresolvable identifiers are
/// not errors here; reads answer `Ok(None)` and writes answer an
/// unsuccessful outcome.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Upstream(#[from] weconnect_garage::GarageError),
}
