use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rental-agency")]
#[command(about = "Rent and return vehicles from an in-memory fleet")]
pub struct CliConfig {
    /// Path to a fleet TOML file; the built-in demo fleet is used when omitted
    #[arg(long)]
    pub fleet: Option<String>,

    #[arg(long, default_value = "U1")]
    pub customer_id: String,

    #[arg(long, default_value = "Guest")]
    pub customer_name: String,

    /// Vehicle ID to rent
    #[arg(long)]
    pub rent: Option<String>,

    #[arg(long, default_value = "1")]
    pub days: u32,

    /// Vehicle ID to return (applied after --rent)
    #[arg(long = "return")]
    pub return_id: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}
