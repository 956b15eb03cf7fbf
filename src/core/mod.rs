pub mod agency;
pub mod notify;
pub mod shared;

pub use crate::domain::model::{
    Customer, CustomerId, RentalRecord, Vehicle, VehicleId, VehicleKind,
};
pub use crate::domain::ports::RentalObserver;
pub use crate::utils::error::Result;
