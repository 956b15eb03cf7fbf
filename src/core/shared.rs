use crate::core::agency::RentalAgency;
use crate::core::{Customer, Result, VehicleId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 多執行緒共用的租車行。
///
/// `process_rental` 與 `return_vehicle` 都是「先讀可用狀態再寫入」，
/// 因此整個操作必須在同一次鎖定內完成。
#[derive(Debug, Clone)]
pub struct SharedAgency {
    inner: Arc<Mutex<RentalAgency>>,
}

impl SharedAgency {
    pub fn new(agency: RentalAgency) -> Self {
        Self {
            inner: Arc::new(Mutex::new(agency)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RentalAgency> {
        // 狀態旗標在通知前就已寫入，中毒後的資料仍然一致
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn process_rental(&self, customer: &mut Customer, vehicle_id: &str, days: u32) -> Result<()> {
        self.lock().process_rental(customer, vehicle_id, days)
    }

    pub fn return_vehicle(&self, vehicle_id: &str) -> Result<()> {
        self.lock().return_vehicle(vehicle_id)
    }

    pub fn quote(&self, vehicle_id: &str, days: u32) -> Result<f64> {
        self.lock().quote(vehicle_id, days)
    }

    pub fn available_vehicle_ids(&self) -> Vec<VehicleId> {
        self.lock()
            .available_vehicles()
            .into_iter()
            .map(|v| v.id().clone())
            .collect()
    }

    /// 在鎖定期間對租車行執行唯讀查詢
    pub fn with_agency<R>(&self, f: impl FnOnce(&RentalAgency) -> R) -> R {
        f(&self.lock())
    }
}
