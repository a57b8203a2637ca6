pub mod climate;
pub mod energy;
pub mod physical;
pub mod supporting;
pub mod vehicle;

pub use climate::{ClimateStatus, ClimatizationStatus, WindowHeatingStatus};
pub use energy::{
    ChargingStatus, CombustionDriveInfo, ElectricDriveInfo, EnergyStatus, RangeStatus,
};
pub use physical::{
    DoorStatus, DoorsStatus, LightsStatus, PhysicalStatus, TyreStatus, TyresStatus, WindowStatus,
    WindowsStatus,
};
pub use supporting::{CommandOutcome, MaintenanceInfo, Position};
pub use vehicle::{
    BatterySummary, Charging, ClimateSummary, Climatization, CombustionDrive, Component,
    DetailLevel, Door, Doors, ElectricDrive, Lights, Locator, Maintenance, Tyre, Tyres, Vehicle,
    VehicleInfo, VehicleKind, VehicleListItem, VehiclePosition, WindowHeating, Windows,
};
