pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::FleetConfig;

pub use crate::core::{
    agency::{DuplicatePolicy, RentalAgency},
    notify::{NoopObserver, TracingObserver},
    shared::SharedAgency,
    Customer, CustomerId, RentalObserver, RentalRecord, Vehicle, VehicleId, VehicleKind,
};
pub use utils::error::{ErrorCategory, RentalError, Result};
