use clap::Parser;
use rental_agency::config::OutputFormat;
use rental_agency::utils::logger;
use rental_agency::{CliConfig, Customer, ErrorCategory, FleetConfig, RentalAgency, RentalError};
use serde::Serialize;

#[derive(Serialize)]
struct RentalReport<'a> {
    customer: &'a Customer,
    rented: Option<RentalSummary>,
    returned: Option<String>,
    available: Vec<&'a rental_agency::Vehicle>,
}

#[derive(Serialize)]
struct RentalSummary {
    vehicle_id: String,
    days: u32,
    cost: f64,
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting rental-agency CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Rental operation failed: {} (Category: {:?})",
            e,
            e.category()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.category() {
            ErrorCategory::InvalidArgument | ErrorCategory::Config => 1,
            ErrorCategory::InvalidState => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::System => 4,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn load_agency(config: &CliConfig) -> Result<RentalAgency, RentalError> {
    let fleet = match &config.fleet {
        Some(path) => {
            tracing::info!("📁 Loading fleet from: {}", path);
            FleetConfig::from_file(path)?
        }
        None => {
            tracing::info!("Using built-in demo fleet");
            FleetConfig::demo()
        }
    };
    fleet.build_agency()
}

fn run(config: &CliConfig) -> Result<(), RentalError> {
    let mut agency = load_agency(config)?;
    let mut customer = Customer::new(&config.customer_id, &config.customer_name)?;

    let rented = match &config.rent {
        Some(vehicle_id) => {
            agency.process_rental(&mut customer, vehicle_id, config.days)?;
            let cost = agency.quote(vehicle_id, config.days)?;
            Some(RentalSummary {
                vehicle_id: vehicle_id.clone(),
                days: config.days,
                cost,
            })
        }
        None => None,
    };

    if let Some(vehicle_id) = &config.return_id {
        agency.return_vehicle(vehicle_id)?;
    }

    let report = RentalReport {
        customer: &customer,
        rented,
        returned: config.return_id.clone(),
        available: agency.available_vehicles(),
    };

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &RentalReport<'_>) {
    if let Some(rented) = &report.rented {
        println!(
            "✅ {} rented {} for {} days, cost: {:.2}",
            report.customer.name(),
            rented.vehicle_id,
            rented.days,
            rented.cost
        );
    }
    if let Some(vehicle_id) = &report.returned {
        println!("↩️  {} returned", vehicle_id);
    }

    println!("🚗 Available vehicles ({}):", report.available.len());
    for vehicle in &report.available {
        println!("  - {} [{}]", vehicle, vehicle.kind().label());
    }
}
