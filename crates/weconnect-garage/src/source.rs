use async_trait::async_trait;

use crate::command::CommandRequest;
use crate::error::GarageError;
use crate::types::GarageSnapshot;

/// An upstream vehicle-connectivity source.
///
/// The source is opaque: one call fetches the full garage (every vehicle,
/// every attribute branch), one call submits a command for a single VIN.
/// Callers own caching and rate limiting; implementations must not cache.
#[async_trait]
pub trait GarageSource: Send + Sync {
    /// Fetch the complete garage snapshot.
    async fn fetch_garage(&self) -> Result<GarageSnapshot, GarageError>;

    /// Submit a command for a vehicle. Returns once the upstream source
    /// has accepted the command; it does not wait for the vehicle.
    async fn send_command(&self, vin: &str, request: CommandRequest) -> Result<(), GarageError>;

    /// Release upstream resources. Safe to call more than once.
    async fn shutdown(&self);
}
