#![allow(clippy::unwrap_used)]
// Integration tests for `GarageAdapter`: freshness, resolution, and
// command dispatch against an instrumented garage source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use weconnect_core::model::{Component, DetailLevel, VehicleKind};
use weconnect_core::{GarageAdapter, VehicleAdapter, VehicleCommand};
use weconnect_garage::demo::{DEMO_COMBUSTION_VIN, DEMO_ELECTRIC_VIN, demo_snapshot};
use weconnect_garage::{CommandRequest, GarageError, GarageSnapshot, GarageSource};

const TTL: Duration = Duration::from_secs(300);

/// Demo fleet behind counters, so tests can assert how often the
/// adapter actually went upstream.
#[derive(Default)]
struct CountingGarage {
    fetches: AtomicUsize,
    commands: Mutex<Vec<(String, CommandRequest)>>,
}

impl CountingGarage {
    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn commands(&self) -> Vec<(String, CommandRequest)> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl GarageSource for CountingGarage {
    async fn fetch_garage(&self) -> Result<GarageSnapshot, GarageError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(demo_snapshot())
    }

    async fn send_command(&self, vin: &str, request: CommandRequest) -> Result<(), GarageError> {
        self.commands.lock().unwrap().push((vin.to_owned(), request));
        Ok(())
    }

    async fn shutdown(&self) {}
}

/// Source whose commands always fail, for outcome stringification.
struct BrokenCommandGarage;

#[async_trait]
impl GarageSource for BrokenCommandGarage {
    async fn fetch_garage(&self) -> Result<GarageSnapshot, GarageError> {
        Ok(demo_snapshot())
    }

    async fn send_command(&self, _vin: &str, _request: CommandRequest) -> Result<(), GarageError> {
        Err(GarageError::Api {
            status: 503,
            message: "vehicle asleep".to_owned(),
        })
    }

    async fn shutdown(&self) {}
}

async fn connected_adapter(garage: Arc<CountingGarage>) -> GarageAdapter {
    GarageAdapter::connect(garage, TTL).await.unwrap()
}

// ── Freshness ───────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn reads_within_ttl_reuse_the_snapshot() {
    let garage = Arc::new(CountingGarage::default());
    let adapter = connected_adapter(Arc::clone(&garage)).await;
    assert_eq!(garage.fetch_count(), 1);

    adapter.list_vehicles().await.unwrap();
    adapter
        .get_vehicle("ID7", DetailLevel::Full)
        .await
        .unwrap();
    adapter.get_energy_status("T7").await.unwrap();
    assert_eq!(garage.fetch_count(), 1);

    tokio::time::advance(TTL).await;
    adapter.list_vehicles().await.unwrap();
    assert_eq!(garage.fetch_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn successful_command_invalidates_the_snapshot() {
    let garage = Arc::new(CountingGarage::default());
    let adapter = connected_adapter(Arc::clone(&garage)).await;

    let outcome = adapter.execute("ID7", VehicleCommand::Lock).await;
    assert!(outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("Vehicle locked"));

    // Next read refetches even though the TTL hasn't elapsed.
    adapter.list_vehicles().await.unwrap();
    assert_eq!(garage.fetch_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn refused_command_does_not_invalidate() {
    let garage = Arc::new(CountingGarage::default());
    let adapter = connected_adapter(Arc::clone(&garage)).await;

    let outcome = adapter.execute("T7", VehicleCommand::StartCharging).await;
    assert!(!outcome.success);

    adapter.list_vehicles().await.unwrap();
    assert_eq!(garage.fetch_count(), 1);
}

// ── Resolution and dispatch ─────────────────────────────────────────

#[tokio::test]
async fn commands_resolve_names_plates_and_vins() {
    let garage = Arc::new(CountingGarage::default());
    let adapter = connected_adapter(Arc::clone(&garage)).await;

    assert!(adapter.execute("ID7", VehicleCommand::Lock).await.success);
    assert!(
        adapter
            .execute("M-AB 1234", VehicleCommand::Lock)
            .await
            .success
    );
    assert!(
        adapter
            .execute(DEMO_ELECTRIC_VIN, VehicleCommand::Unlock)
            .await
            .success
    );

    let sent = garage.commands();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].0, DEMO_ELECTRIC_VIN);
    assert_eq!(sent[1].0, DEMO_COMBUSTION_VIN);
    assert_eq!(sent[2].0, DEMO_ELECTRIC_VIN);
}

#[tokio::test]
async fn unresolvable_identifier_never_reaches_upstream() {
    let garage = Arc::new(CountingGarage::default());
    let adapter = connected_adapter(Arc::clone(&garage)).await;

    let outcome = adapter.execute("Golf", VehicleCommand::Lock).await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Vehicle Golf not found"));
    assert!(garage.commands().is_empty());
}

#[tokio::test]
async fn unsupported_command_never_reaches_upstream() {
    let garage = Arc::new(CountingGarage::default());
    let adapter = connected_adapter(Arc::clone(&garage)).await;

    let outcome = adapter
        .execute("T7", VehicleCommand::StartWindowHeating)
        .await;
    assert!(!outcome.success);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Vehicle does not support window heating commands")
    );
    assert!(garage.commands().is_empty());
}

#[tokio::test]
async fn upstream_command_failure_becomes_an_outcome() {
    let adapter = GarageAdapter::connect(Arc::new(BrokenCommandGarage), TTL)
        .await
        .unwrap();

    let outcome = adapter.execute("ID7", VehicleCommand::Lock).await;
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("vehicle asleep"));
}

// ── Read projections end to end ─────────────────────────────────────

#[tokio::test]
async fn fleet_reads_project_the_demo_vehicles() {
    let garage = Arc::new(CountingGarage::default());
    let adapter = connected_adapter(Arc::clone(&garage)).await;

    let fleet = adapter.list_vehicles().await.unwrap();
    assert_eq!(fleet.len(), 2);
    assert_eq!(fleet[0].name.as_deref(), Some("ID7"));

    let energy = adapter.get_energy_status("ID7").await.unwrap().unwrap();
    assert_eq!(energy.vehicle_type, VehicleKind::Electric);
    assert_eq!(energy.range.total_km, Some(312.0));
    assert!(energy.electric.unwrap().charging.unwrap().is_charging);

    let doors = adapter
        .get_physical_status("id7", Some(&[Component::Doors]))
        .await
        .unwrap()
        .unwrap();
    assert!(doors.doors.is_some());
    assert!(doors.windows.is_none());

    let maintenance = adapter.get_maintenance_info("T7").await.unwrap().unwrap();
    assert!(maintenance.inspection_due_date.is_some());

    let position = adapter.get_position("T7").await.unwrap().unwrap();
    assert_eq!(position.latitude, Some(48.177));

    assert!(
        adapter
            .get_vehicle("Golf", DetailLevel::Basic)
            .await
            .unwrap()
            .is_none()
    );
}
