use crate::utils::error::{RentalError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative_number, validate_positive_number,
    validate_range,
};
use serde::{Deserialize, Serialize};
use std::fmt;

const GPS_DAILY_SURCHARGE: f64 = 5.0;
const SIDECAR_DAILY_SURCHARGE: f64 = 10.0;
const CARGO_DAILY_RATE_PER_UNIT: f64 = 2.0;

// 上限讓租金在 u32::MAX 天內仍為有限值
pub const MAX_BASE_RATE: f64 = 1_000_000.0;
pub const MAX_CARGO_CAPACITY: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for VehicleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for VehicleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 各車種的附加費參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VehicleKind {
    Car { has_gps: bool },
    Motorcycle { has_sidecar: bool },
    Truck { cargo_capacity: f64 },
}

impl VehicleKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Car { .. } => "Car",
            Self::Motorcycle { .. } => "Motorcycle",
            Self::Truck { .. } => "Truck",
        }
    }

    /// 每日附加費
    pub fn daily_surcharge(&self) -> f64 {
        match *self {
            Self::Car { has_gps } => {
                if has_gps {
                    GPS_DAILY_SURCHARGE
                } else {
                    0.0
                }
            }
            Self::Motorcycle { has_sidecar } => {
                if has_sidecar {
                    SIDECAR_DAILY_SURCHARGE
                } else {
                    0.0
                }
            }
            Self::Truck { cargo_capacity } => cargo_capacity * CARGO_DAILY_RATE_PER_UNIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    id: VehicleId,
    model: String,
    base_rate: f64,
    available: bool,
    #[serde(flatten)]
    kind: VehicleKind,
    #[serde(skip)]
    fleet_slot: Option<usize>,
}

impl Vehicle {
    pub fn new(id: &str, model: &str, base_rate: f64, kind: VehicleKind) -> Result<Self> {
        validate_non_empty_string("vehicle_id", id)?;
        validate_non_empty_string("model", model)?;
        validate_positive_number("base_rate", base_rate)?;
        validate_range("base_rate", base_rate, 0.0, MAX_BASE_RATE)?;
        if let VehicleKind::Truck { cargo_capacity } = kind {
            validate_non_negative_number("cargo_capacity", cargo_capacity)?;
            validate_range("cargo_capacity", cargo_capacity, 0.0, MAX_CARGO_CAPACITY)?;
        }

        Ok(Self {
            id: VehicleId(id.to_string()),
            model: model.to_string(),
            base_rate,
            available: true,
            kind,
            fleet_slot: None,
        })
    }

    pub fn car(id: &str, model: &str, base_rate: f64, has_gps: bool) -> Result<Self> {
        Self::new(id, model, base_rate, VehicleKind::Car { has_gps })
    }

    pub fn motorcycle(id: &str, model: &str, base_rate: f64, has_sidecar: bool) -> Result<Self> {
        Self::new(id, model, base_rate, VehicleKind::Motorcycle { has_sidecar })
    }

    pub fn truck(id: &str, model: &str, base_rate: f64, cargo_capacity: f64) -> Result<Self> {
        Self::new(id, model, base_rate, VehicleKind::Truck { cargo_capacity })
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    pub fn kind(&self) -> &VehicleKind {
        &self.kind
    }

    /// 車輛在所屬車隊中的位置，尚未註冊時為 None
    pub fn fleet_slot(&self) -> Option<usize> {
        self.fleet_slot
    }

    pub(crate) fn assign_fleet_slot(&mut self, slot: usize) {
        self.fleet_slot = Some(slot);
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_availability(&mut self, available: bool) {
        self.available = available;
    }

    pub fn has_gps(&self) -> Option<bool> {
        match self.kind {
            VehicleKind::Car { has_gps } => Some(has_gps),
            _ => None,
        }
    }

    pub fn has_sidecar(&self) -> Option<bool> {
        match self.kind {
            VehicleKind::Motorcycle { has_sidecar } => Some(has_sidecar),
            _ => None,
        }
    }

    pub fn cargo_capacity(&self) -> Option<f64> {
        match self.kind {
            VehicleKind::Truck { cargo_capacity } => Some(cargo_capacity),
            _ => None,
        }
    }

    /// 租金 = 基本日租 * 天數 + 車種附加費 * 天數
    pub fn calculate_rental_cost(&self, days: u32) -> f64 {
        let days = f64::from(days);
        self.base_rate * days + self.kind.daily_surcharge() * days
    }

    pub fn is_available_for_rental(&self) -> bool {
        self.available
    }

    /// Available -> Rented。只做狀態轉換，不計算租金。
    pub fn rent(&mut self, customer: &Customer, days: u32) -> Result<()> {
        if !self.is_available_for_rental() {
            return Err(RentalError::invalid_state(format!(
                "{} is not available for rental",
                self.kind.label()
            )));
        }
        self.available = false;
        tracing::debug!(
            "{} {} rented by {} for {} days",
            self.kind.label(),
            self.id,
            customer.name(),
            days
        );
        Ok(())
    }

    pub fn return_vehicle(&mut self) {
        self.available = true;
        tracing::debug!("{} {} returned", self.kind.label(), self.id);
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle[ID={}, Model={}, Rate={:?}]",
            self.id, self.model, self.base_rate
        )
    }
}

/// 租借紀錄中的一筆，指回車隊中的某台車
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalRecord {
    vehicle_id: VehicleId,
    #[serde(skip_serializing_if = "Option::is_none")]
    fleet_slot: Option<usize>,
}

impl RentalRecord {
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    pub fn fleet_slot(&self) -> Option<usize> {
        self.fleet_slot
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    rental_history: Vec<RentalRecord>,
}

impl Customer {
    pub fn new(id: &str, name: &str) -> Result<Self> {
        validate_non_empty_string("customer_id", id)?;
        validate_non_empty_string("customer_name", name)?;

        Ok(Self {
            id: CustomerId(id.to_string()),
            name: name.to_string(),
            rental_history: Vec::new(),
        })
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 租借紀錄只保存車輛 ID 與車隊位置，車輛本身仍屬於車隊
    pub fn rental_history(&self) -> &[RentalRecord] {
        &self.rental_history
    }

    pub fn add_rental(&mut self, vehicle: &Vehicle) {
        self.rental_history.push(RentalRecord {
            vehicle_id: vehicle.id.clone(),
            fleet_slot: vehicle.fleet_slot,
        });
    }
}
