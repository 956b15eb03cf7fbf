use crate::core::agency::{DuplicatePolicy, RentalAgency};
use crate::core::{RentalObserver, Vehicle};
use crate::utils::error::{RentalError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    pub agency: AgencyConfig,
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgencyConfig {
    pub name: String,
    #[serde(default)]
    pub duplicate_ids: DuplicatePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VehicleConfig {
    Car {
        id: String,
        model: String,
        base_rate: f64,
        #[serde(default)]
        has_gps: bool,
    },
    Motorcycle {
        id: String,
        model: String,
        base_rate: f64,
        #[serde(default)]
        has_sidecar: bool,
    },
    Truck {
        id: String,
        model: String,
        base_rate: f64,
        cargo_capacity: f64,
    },
}

impl VehicleConfig {
    pub fn to_vehicle(&self) -> Result<Vehicle> {
        match self {
            Self::Car {
                id,
                model,
                base_rate,
                has_gps,
            } => Vehicle::car(id, model, *base_rate, *has_gps),
            Self::Motorcycle {
                id,
                model,
                base_rate,
                has_sidecar,
            } => Vehicle::motorcycle(id, model, *base_rate, *has_sidecar),
            Self::Truck {
                id,
                model,
                base_rate,
                cargo_capacity,
            } => Vehicle::truck(id, model, *base_rate, *cargo_capacity),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl FleetConfig {
    /// 未指定車隊檔時使用的示範車隊
    pub fn demo() -> Self {
        Self {
            agency: AgencyConfig {
                name: "Demo Rentals".to_string(),
                duplicate_ids: DuplicatePolicy::Reject,
            },
            vehicles: vec![
                VehicleConfig::Car {
                    id: "C1".to_string(),
                    model: "Civic".to_string(),
                    base_rate: 30.0,
                    has_gps: true,
                },
                VehicleConfig::Motorcycle {
                    id: "M1".to_string(),
                    model: "Ural".to_string(),
                    base_rate: 20.0,
                    has_sidecar: true,
                },
                VehicleConfig::Truck {
                    id: "T1".to_string(),
                    model: "F-150".to_string(),
                    base_rate: 50.0,
                    cargo_capacity: 10.0,
                },
            ],
        }
    }

    /// 從 TOML 檔案載入車隊
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析車隊
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RentalError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FLEET_NAME})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 依宣告順序建立車輛並註冊到新的租車行
    pub fn build_agency(&self) -> Result<RentalAgency> {
        self.validate()?;

        let mut agency = RentalAgency::new().with_policy(self.agency.duplicate_ids);
        for vehicle in &self.vehicles {
            agency.add_vehicle(vehicle.to_vehicle()?)?;
        }

        tracing::info!(
            "Loaded fleet '{}' with {} vehicles",
            self.agency.name,
            agency.len()
        );
        Ok(agency)
    }

    pub fn build_agency_with_observer(
        &self,
        observer: Box<dyn RentalObserver>,
    ) -> Result<RentalAgency> {
        Ok(self.build_agency()?.with_observer(observer))
    }
}

impl Validate for FleetConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("agency.name", &self.agency.name)?;

        if self.vehicles.is_empty() {
            return Err(RentalError::ConfigError {
                message: "Fleet must declare at least one [[vehicles]] entry".to_string(),
            });
        }

        Ok(())
    }
}
