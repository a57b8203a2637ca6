//! Domain layer between `weconnect-garage` and the protocol surface.
//!
//! This crate owns the business logic of the vehicle service:
//!
//! - **[`VehicleAdapter`]**: facade trait the protocol layer calls.
//!   [`GarageAdapter`] implements it over a cached garage snapshot;
//!   [`StartingAdapter`] stands in during the upstream bootstrap.
//!
//! - **[`FreshnessCache`]**: TTL tracking for the snapshot. Reads
//!   refetch when stale; write commands invalidate.
//!
//! - **[`resolve_vin`]**: vehicle identifier resolution (name
//!   substring, then exact VIN, then exact license plate).
//!
//! - **[`extract`]**: pure projections from the typed [`Vehicle`] into
//!   the wire-facing status models.
//!
//! - **[`VehicleCommand`]**: typed write operations with capability
//!   validation; results are always [`CommandOutcome`] values.
//!
//! - **Domain model** ([`model`]): the typed `Vehicle` with every
//!   upstream capability resolved to an `Option<…>` field once, at the
//!   [`convert`] boundary.

pub mod adapter;
pub mod cache;
pub mod command;
pub mod convert;
pub mod error;
pub mod extract;
pub mod model;
pub mod resolve;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapter::{GarageAdapter, StartingAdapter, VehicleAdapter};
pub use cache::{DEFAULT_TTL, FreshnessCache};
pub use command::VehicleCommand;
pub use error::CoreError;
pub use resolve::resolve_vin;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ClimateStatus, CommandOutcome, Component, DetailLevel, EnergyStatus, MaintenanceInfo,
    PhysicalStatus, Position, Vehicle, VehicleInfo, VehicleKind, VehicleListItem,
};
