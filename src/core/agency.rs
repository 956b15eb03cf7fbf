use crate::core::notify::TracingObserver;
use crate::core::{Customer, RentalObserver, Result, Vehicle};
use crate::utils::error::RentalError;
use crate::utils::validation::validate_positive_days;
use serde::{Deserialize, Serialize};

/// 車隊中出現重複車輛 ID 時的處理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    /// 允許重複，查詢時以第一筆符合者為準
    Allow,
}

pub struct RentalAgency {
    fleet: Vec<Vehicle>,
    policy: DuplicatePolicy,
    observer: Box<dyn RentalObserver>,
}

impl RentalAgency {
    pub fn new() -> Self {
        Self {
            fleet: Vec::new(),
            policy: DuplicatePolicy::default(),
            observer: Box::new(TracingObserver),
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn RentalObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn add_vehicle(&mut self, mut vehicle: Vehicle) -> Result<()> {
        if self.policy == DuplicatePolicy::Reject && self.vehicle(vehicle.id().as_str()).is_some() {
            tracing::warn!("Rejected duplicate vehicle ID {}", vehicle.id());
            return Err(RentalError::invalid_argument(
                "vehicle_id",
                format!("Vehicle ID '{}' is already registered", vehicle.id()),
            ));
        }

        // 車隊只增不減，位置可作為穩定的引用
        vehicle.assign_fleet_slot(self.fleet.len());
        tracing::debug!("Registered {} ({})", vehicle, vehicle.kind().label());
        self.fleet.push(vehicle);
        Ok(())
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.fleet
    }

    pub fn len(&self) -> usize {
        self.fleet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fleet.is_empty()
    }

    /// 線性搜尋，回傳第一筆符合的車輛
    pub fn vehicle(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.fleet.iter().find(|v| v.id() == vehicle_id)
    }

    pub fn available_vehicles(&self) -> Vec<&Vehicle> {
        self.fleet
            .iter()
            .filter(|v| v.is_available_for_rental())
            .collect()
    }

    /// 將顧客的租借紀錄對應回車隊中的車輛。
    ///
    /// 優先使用紀錄中的車隊位置，重複 ID 時才能指到正確的那台；
    /// 沒有位置 (或位置不屬於此車隊) 的紀錄退回以 ID 線性搜尋，都找不到則略過。
    pub fn rental_history_of(&self, customer: &Customer) -> Vec<&Vehicle> {
        customer
            .rental_history()
            .iter()
            .filter_map(|record| {
                record
                    .fleet_slot()
                    .and_then(|slot| self.fleet.get(slot))
                    .filter(|v| v.id() == record.vehicle_id())
                    .or_else(|| self.vehicle(record.vehicle_id().as_str()))
            })
            .collect()
    }

    pub fn quote(&self, vehicle_id: &str, days: u32) -> Result<f64> {
        validate_positive_days(days)?;
        self.vehicle(vehicle_id)
            .map(|v| v.calculate_rental_cost(days))
            .ok_or_else(|| RentalError::not_found(vehicle_id))
    }

    /// 租出車輛並寫入顧客的租借紀錄。
    ///
    /// 與舊版不同，`days == 0` 會以 `InvalidArgument` 拒絕，而不是直接租出。
    pub fn process_rental(
        &mut self,
        customer: &mut Customer,
        vehicle_id: &str,
        days: u32,
    ) -> Result<()> {
        validate_positive_days(days)?;

        let Some(vehicle) = self.fleet.iter_mut().find(|v| v.id() == vehicle_id) else {
            tracing::warn!("Rental requested for unknown vehicle {}", vehicle_id);
            return Err(RentalError::not_found(vehicle_id));
        };

        if !vehicle.is_available_for_rental() {
            tracing::warn!(
                "Customer {} requested vehicle {} which is already rented",
                customer.id(),
                vehicle_id
            );
            return Err(RentalError::invalid_state("Vehicle is not available"));
        }

        vehicle.rent(customer, days)?;
        customer.add_rental(vehicle);
        self.observer.on_rented(vehicle, customer, days);
        Ok(())
    }

    pub fn return_vehicle(&mut self, vehicle_id: &str) -> Result<()> {
        let Some(vehicle) = self.fleet.iter_mut().find(|v| v.id() == vehicle_id) else {
            tracing::warn!("Return requested for unknown vehicle {}", vehicle_id);
            return Err(RentalError::not_found(vehicle_id));
        };

        vehicle.return_vehicle();
        self.observer.on_returned(vehicle);
        Ok(())
    }
}

impl Default for RentalAgency {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RentalAgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RentalAgency")
            .field("fleet", &self.fleet)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingObserver {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl RentalObserver for RecordingObserver {
        fn on_rented(&self, vehicle: &Vehicle, customer: &Customer, days: u32) {
            self.events.lock().unwrap().push(format!(
                "{} rented by {} for {} days.",
                vehicle.kind().label(),
                customer.name(),
                days
            ));
        }

        fn on_returned(&self, vehicle: &Vehicle) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{} has been returned.", vehicle.kind().label()));
        }
    }

    fn agency_with(observer: RecordingObserver) -> RentalAgency {
        let mut agency = RentalAgency::new().with_observer(Box::new(observer));
        agency
            .add_vehicle(Vehicle::car("C1", "Civic", 30.0, true).unwrap())
            .unwrap();
        agency
            .add_vehicle(Vehicle::motorcycle("M1", "Ural", 20.0, true).unwrap())
            .unwrap();
        agency
            .add_vehicle(Vehicle::truck("T1", "F-150", 50.0, 10.0).unwrap())
            .unwrap();
        agency
    }

    #[test]
    fn test_process_rental_marks_vehicle_and_records_history() {
        let observer = RecordingObserver::default();
        let mut agency = agency_with(observer.clone());
        let mut alice = Customer::new("U1", "Alice").unwrap();

        assert_eq!(agency.quote("C1", 3).unwrap(), 105.0);
        agency.process_rental(&mut alice, "C1", 3).unwrap();

        assert!(!agency.vehicle("C1").unwrap().is_available_for_rental());
        assert_eq!(alice.rental_history().len(), 1);
        assert_eq!(
            alice.rental_history()[0].vehicle_id(),
            agency.vehicle("C1").unwrap().id()
        );
        assert_eq!(alice.rental_history()[0].fleet_slot(), Some(0));
        assert_eq!(observer.events(), vec!["Car rented by Alice for 3 days."]);
    }

    #[test]
    fn test_second_rental_is_invalid_state_and_history_unchanged() {
        let observer = RecordingObserver::default();
        let mut agency = agency_with(observer.clone());
        let mut alice = Customer::new("U1", "Alice").unwrap();
        let mut bob = Customer::new("U2", "Bob").unwrap();

        agency.process_rental(&mut alice, "C1", 3).unwrap();
        let err = agency.process_rental(&mut bob, "C1", 1).unwrap_err();

        assert!(matches!(err, RentalError::InvalidState { .. }));
        assert_eq!(err.to_string(), "Vehicle is not available");
        assert!(bob.rental_history().is_empty());
        assert_eq!(observer.events().len(), 1);
    }

    #[test]
    fn test_unknown_vehicle_is_not_found() {
        let mut agency = agency_with(RecordingObserver::default());
        let mut alice = Customer::new("U1", "Alice").unwrap();

        let err = agency.process_rental(&mut alice, "X9", 2).unwrap_err();
        assert!(matches!(err, RentalError::NotFound { .. }));
        assert!(alice.rental_history().is_empty());

        assert!(matches!(
            agency.return_vehicle("X9"),
            Err(RentalError::NotFound { .. })
        ));
        assert!(matches!(agency.quote("X9", 1), Err(RentalError::NotFound { .. })));
    }

    #[test]
    fn test_zero_days_rejected() {
        let mut agency = agency_with(RecordingObserver::default());
        let mut alice = Customer::new("U1", "Alice").unwrap();

        let err = agency.process_rental(&mut alice, "C1", 0).unwrap_err();
        assert!(matches!(err, RentalError::InvalidArgument { .. }));
        assert!(agency.vehicle("C1").unwrap().is_available_for_rental());
    }

    #[test]
    fn test_available_vehicles_excludes_rented_and_keeps_order() {
        let mut agency = agency_with(RecordingObserver::default());
        let mut alice = Customer::new("U1", "Alice").unwrap();

        agency.process_rental(&mut alice, "M1", 2).unwrap();
        let ids: Vec<&str> = agency
            .available_vehicles()
            .iter()
            .map(|v| v.id().as_str())
            .collect();
        assert_eq!(ids, vec!["C1", "T1"]);

        agency.return_vehicle("M1").unwrap();
        assert_eq!(agency.available_vehicles().len(), 3);
    }

    #[test]
    fn test_return_notifies_observer() {
        let observer = RecordingObserver::default();
        let mut agency = agency_with(observer.clone());
        let mut alice = Customer::new("U1", "Alice").unwrap();

        agency.process_rental(&mut alice, "T1", 1).unwrap();
        agency.return_vehicle("T1").unwrap();

        assert_eq!(
            observer.events(),
            vec!["Truck rented by Alice for 1 days.", "Truck has been returned."]
        );
        assert!(agency.vehicle("T1").unwrap().is_available_for_rental());
    }

    #[test]
    fn test_duplicate_ids_rejected_by_default() {
        let mut agency = RentalAgency::new();
        agency
            .add_vehicle(Vehicle::car("C1", "Civic", 30.0, true).unwrap())
            .unwrap();

        let err = agency
            .add_vehicle(Vehicle::car("C1", "Accord", 40.0, false).unwrap())
            .unwrap_err();
        assert!(matches!(err, RentalError::InvalidArgument { .. }));
        assert_eq!(agency.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_allowed_first_match_wins() {
        let mut agency = RentalAgency::new()
            .with_policy(DuplicatePolicy::Allow)
            .with_observer(Box::new(RecordingObserver::default()));
        agency
            .add_vehicle(Vehicle::car("C1", "Civic", 30.0, true).unwrap())
            .unwrap();
        agency
            .add_vehicle(Vehicle::car("C1", "Accord", 40.0, false).unwrap())
            .unwrap();
        let mut alice = Customer::new("U1", "Alice").unwrap();

        agency.process_rental(&mut alice, "C1", 1).unwrap();

        // 第一台已租出，第二台同 ID 的車不會被找到
        assert!(agency.process_rental(&mut alice, "C1", 1).is_err());
        let available: Vec<&str> = agency.available_vehicles().iter().map(|v| v.model()).collect();
        assert_eq!(available, vec!["Accord"]);
        assert_eq!(agency.rental_history_of(&alice)[0].model(), "Civic");
    }

    #[test]
    fn test_history_keeps_identity_of_duplicate_ids() {
        let mut agency = RentalAgency::new()
            .with_policy(DuplicatePolicy::Allow)
            .with_observer(Box::new(RecordingObserver::default()));
        agency
            .add_vehicle(Vehicle::car("C1", "Civic", 30.0, true).unwrap())
            .unwrap();
        agency
            .add_vehicle(Vehicle::car("C1", "Accord", 40.0, false).unwrap())
            .unwrap();
        let mut alice = Customer::new("U1", "Alice").unwrap();

        alice.add_rental(&agency.vehicles()[1]);
        alice.add_rental(&agency.vehicles()[0]);

        let models: Vec<&str> = agency
            .rental_history_of(&alice)
            .iter()
            .map(|v| v.model())
            .collect();
        assert_eq!(models, vec!["Accord", "Civic"]);
    }

    #[test]
    fn test_history_without_slot_falls_back_to_id() {
        let agency = agency_with(RecordingObserver::default());
        let mut alice = Customer::new("U1", "Alice").unwrap();

        // 尚未註冊到車隊的車輛沒有位置
        let loose = Vehicle::truck("T1", "Loose", 10.0, 1.0).unwrap();
        alice.add_rental(&loose);

        assert_eq!(agency.rental_history_of(&alice)[0].model(), "F-150");
    }

    #[test]
    fn test_rental_history_resolves_to_fleet_vehicles() {
        let mut agency = agency_with(RecordingObserver::default());
        let mut alice = Customer::new("U1", "Alice").unwrap();

        agency.process_rental(&mut alice, "C1", 1).unwrap();
        agency.return_vehicle("C1").unwrap();
        agency.process_rental(&mut alice, "T1", 1).unwrap();
        agency.process_rental(&mut alice, "C1", 2).unwrap();

        let models: Vec<&str> = agency
            .rental_history_of(&alice)
            .iter()
            .map(|v| v.model())
            .collect();
        assert_eq!(models, vec!["Civic", "F-150", "Civic"]);
    }
}
