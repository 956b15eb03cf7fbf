use crate::core::RentalObserver;
use crate::domain::model::{Customer, Vehicle};

/// 以 tracing 事件輸出租借 / 歸還訊息
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RentalObserver for TracingObserver {
    fn on_rented(&self, vehicle: &Vehicle, customer: &Customer, days: u32) {
        tracing::info!(
            vehicle_id = %vehicle.id(),
            customer_id = %customer.id(),
            "{} rented by {} for {} days.",
            vehicle.kind().label(),
            customer.name(),
            days
        );
    }

    fn on_returned(&self, vehicle: &Vehicle) {
        tracing::info!(
            vehicle_id = %vehicle.id(),
            "{} has been returned.",
            vehicle.kind().label()
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RentalObserver for NoopObserver {
    fn on_rented(&self, _vehicle: &Vehicle, _customer: &Customer, _days: u32) {}

    fn on_returned(&self, _vehicle: &Vehicle) {}
}
