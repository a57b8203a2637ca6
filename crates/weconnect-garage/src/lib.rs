// weconnect-garage: upstream vehicle-connectivity boundary
//
// Talks to a car-connectivity bridge over HTTP (or to the in-process
// demo garage) and exposes the raw attribute tree as-is. Caching,
// identifier resolution, and command validation live a layer up.

pub mod command;
pub mod demo;
pub mod error;
pub mod http;
pub mod source;
pub mod types;

pub use command::{CommandRequest, LockAction, SignalMode, StartStop};
pub use demo::{DEMO_COMBUSTION_VIN, DEMO_ELECTRIC_VIN, DemoGarage};
pub use error::GarageError;
pub use http::HttpGarage;
pub use source::GarageSource;
pub use types::{GarageSnapshot, RawVehicle};
