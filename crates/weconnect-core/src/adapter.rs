// ── Vehicle adapter facade ──
//
// `VehicleAdapter` is the single seam the protocol layer talks to.
// `GarageAdapter` is the real implementation: a cached snapshot of the
// upstream garage plus resolution, extraction, and command dispatch.
// `StartingAdapter` stands in while the upstream bootstrap runs.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use weconnect_garage::GarageSource;

use crate::cache::FreshnessCache;
use crate::command::VehicleCommand;
use crate::error::CoreError;
use crate::extract;
use crate::model::{
    ClimateStatus, CommandOutcome, Component, DetailLevel, EnergyStatus, MaintenanceInfo,
    PhysicalStatus, Position, Vehicle, VehicleInfo, VehicleListItem,
};
use crate::resolve::resolve_vin;

/// Facade over one fleet of vehicles. Reads refresh the snapshot when
/// stale; writes validate, submit, and invalidate.
#[async_trait]
pub trait VehicleAdapter: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<VehicleListItem>, CoreError>;

    async fn get_vehicle(
        &self,
        identifier: &str,
        detail: DetailLevel,
    ) -> Result<Option<VehicleInfo>, CoreError>;

    async fn get_physical_status(
        &self,
        identifier: &str,
        components: Option<&[Component]>,
    ) -> Result<Option<PhysicalStatus>, CoreError>;

    async fn get_energy_status(&self, identifier: &str) -> Result<Option<EnergyStatus>, CoreError>;

    async fn get_climate_status(&self, identifier: &str)
    -> Result<Option<ClimateStatus>, CoreError>;

    async fn get_maintenance_info(
        &self,
        identifier: &str,
    ) -> Result<Option<MaintenanceInfo>, CoreError>;

    async fn get_position(&self, identifier: &str) -> Result<Option<Position>, CoreError>;

    /// Execute a write command. Never fails at the call level; every
    /// problem becomes an unsuccessful outcome.
    async fn execute(&self, identifier: &str, command: VehicleCommand) -> CommandOutcome;

    async fn shutdown(&self);

    /// False while the upstream bootstrap is still in flight.
    fn is_ready(&self) -> bool;
}

// ── Garage-backed adapter ───────────────────────────────────────────

pub struct GarageAdapter {
    garage: Arc<dyn GarageSource>,
    snapshot: RwLock<Vec<Vehicle>>,
    cache: FreshnessCache,
}

impl GarageAdapter {
    /// Connect to the upstream source: fetch the initial snapshot so
    /// the adapter never serves an empty fleet by accident.
    pub async fn connect(
        garage: Arc<dyn GarageSource>,
        cache_ttl: Duration,
    ) -> Result<Self, CoreError> {
        let adapter = Self {
            garage,
            snapshot: RwLock::new(Vec::new()),
            cache: FreshnessCache::new(cache_ttl),
        };
        adapter.refresh().await?;
        let vehicles = adapter.snapshot.read().await.len();
        info!(vehicles, "connected to vehicle source");
        Ok(adapter)
    }

    /// Fetch and convert the full garage, replacing the snapshot. The
    /// freshness timestamp advances only when the fetch succeeds.
    async fn refresh(&self) -> Result<(), CoreError> {
        let raw = self.garage.fetch_garage().await?;
        let vehicles: Vec<Vehicle> = raw.vehicles.into_iter().map(Vehicle::from).collect();
        debug!(vehicles = vehicles.len(), "garage snapshot refreshed");

        *self.snapshot.write().await = vehicles;
        self.cache.mark_fetched();
        Ok(())
    }

    async fn ensure_fresh(&self) -> Result<(), CoreError> {
        if self.cache.is_expired() {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Resolve an identifier against the current snapshot and clone the
    /// matching vehicle. No refresh: writes and already-fresh reads use
    /// the snapshot as-is.
    async fn find(&self, identifier: &str) -> Option<Vehicle> {
        let snapshot = self.snapshot.read().await;
        let items: Vec<VehicleListItem> = snapshot.iter().map(Vehicle::list_item).collect();
        let vin = resolve_vin(&items, identifier)?;
        snapshot.iter().find(|v| v.vin == vin).cloned()
    }

    async fn find_fresh(&self, identifier: &str) -> Result<Option<Vehicle>, CoreError> {
        self.ensure_fresh().await?;
        Ok(self.find(identifier).await)
    }
}

#[async_trait]
impl VehicleAdapter for GarageAdapter {
    async fn list_vehicles(&self) -> Result<Vec<VehicleListItem>, CoreError> {
        self.ensure_fresh().await?;
        Ok(self
            .snapshot
            .read()
            .await
            .iter()
            .map(Vehicle::list_item)
            .collect())
    }

    async fn get_vehicle(
        &self,
        identifier: &str,
        detail: DetailLevel,
    ) -> Result<Option<VehicleInfo>, CoreError> {
        Ok(self
            .find_fresh(identifier)
            .await?
            .map(|v| extract::vehicle_info(&v, detail)))
    }

    async fn get_physical_status(
        &self,
        identifier: &str,
        components: Option<&[Component]>,
    ) -> Result<Option<PhysicalStatus>, CoreError> {
        Ok(self
            .find_fresh(identifier)
            .await?
            .map(|v| extract::physical_status(&v, components)))
    }

    async fn get_energy_status(&self, identifier: &str) -> Result<Option<EnergyStatus>, CoreError> {
        Ok(self
            .find_fresh(identifier)
            .await?
            .map(|v| extract::energy_status(&v, Utc::now())))
    }

    async fn get_climate_status(
        &self,
        identifier: &str,
    ) -> Result<Option<ClimateStatus>, CoreError> {
        Ok(self
            .find_fresh(identifier)
            .await?
            .map(|v| extract::climate_status(&v, Utc::now())))
    }

    async fn get_maintenance_info(
        &self,
        identifier: &str,
    ) -> Result<Option<MaintenanceInfo>, CoreError> {
        Ok(self
            .find_fresh(identifier)
            .await?
            .and_then(|v| extract::maintenance_info(&v)))
    }

    async fn get_position(&self, identifier: &str) -> Result<Option<Position>, CoreError> {
        Ok(self
            .find_fresh(identifier)
            .await?
            .and_then(|v| extract::position(&v)))
    }

    async fn execute(&self, identifier: &str, command: VehicleCommand) -> CommandOutcome {
        let Some(vehicle) = self.find(identifier).await else {
            return CommandOutcome::err(format!("Vehicle {identifier} not found"));
        };

        if let Err(refusal) = command.validate(&vehicle) {
            debug!(vin = %vehicle.vin, command = command.name(), %refusal, "command refused");
            return CommandOutcome::err(refusal);
        }

        match self
            .garage
            .send_command(&vehicle.vin, command.to_request())
            .await
        {
            Ok(()) => {
                info!(vin = %vehicle.vin, command = command.name(), "command submitted");
                // The command changed vehicle state; the next read must
                // observe it.
                self.cache.invalidate();
                CommandOutcome::ok(command.success_message())
            }
            Err(e) => {
                warn!(vin = %vehicle.vin, command = command.name(), error = %e, "command failed");
                CommandOutcome::err(e.to_string())
            }
        }
    }

    async fn shutdown(&self) {
        self.garage.shutdown().await;
    }

    fn is_ready(&self) -> bool {
        true
    }
}

// ── Bootstrap stand-in ──────────────────────────────────────────────

const STARTING_MESSAGE: &str = "Server is still starting, please try again in a few seconds";

/// Adapter served while the upstream connection is being established.
/// Reads come back empty, writes come back unsuccessful, and nothing
/// errors: callers see a working but not-yet-ready service.
#[derive(Debug, Default, Clone, Copy)]
pub struct StartingAdapter;

#[async_trait]
impl VehicleAdapter for StartingAdapter {
    async fn list_vehicles(&self) -> Result<Vec<VehicleListItem>, CoreError> {
        Ok(Vec::new())
    }

    async fn get_vehicle(
        &self,
        _identifier: &str,
        _detail: DetailLevel,
    ) -> Result<Option<VehicleInfo>, CoreError> {
        Ok(None)
    }

    async fn get_physical_status(
        &self,
        _identifier: &str,
        _components: Option<&[Component]>,
    ) -> Result<Option<PhysicalStatus>, CoreError> {
        Ok(None)
    }

    async fn get_energy_status(
        &self,
        _identifier: &str,
    ) -> Result<Option<EnergyStatus>, CoreError> {
        Ok(None)
    }

    async fn get_climate_status(
        &self,
        _identifier: &str,
    ) -> Result<Option<ClimateStatus>, CoreError> {
        Ok(None)
    }

    async fn get_maintenance_info(
        &self,
        _identifier: &str,
    ) -> Result<Option<MaintenanceInfo>, CoreError> {
        Ok(None)
    }

    async fn get_position(&self, _identifier: &str) -> Result<Option<Position>, CoreError> {
        Ok(None)
    }

    async fn execute(&self, _identifier: &str, _command: VehicleCommand) -> CommandOutcome {
        CommandOutcome::err(STARTING_MESSAGE)
    }

    async fn shutdown(&self) {}

    fn is_ready(&self) -> bool {
        false
    }
}
