use crate::domain::model::{Customer, Vehicle};

/// 租借狀態轉換的通知掛鉤，由 `RentalAgency` 在轉換成功後呼叫
pub trait RentalObserver: Send + Sync {
    fn on_rented(&self, vehicle: &Vehicle, customer: &Customer, days: u32);
    fn on_returned(&self, vehicle: &Vehicle);
}
