use crate::utils::error::{RentalError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RentalError::invalid_argument(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RentalError::invalid_argument(
            field_name,
            format!("Value must be a positive number, got {}", value),
        ));
    }
    Ok(())
}

pub fn validate_non_negative_number(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RentalError::invalid_argument(
            field_name,
            format!("Value must be zero or greater, got {}", value),
        ));
    }
    Ok(())
}

pub fn validate_positive_days(days: u32) -> Result<()> {
    if days == 0 {
        return Err(RentalError::invalid_argument(
            "days",
            "Rental must last at least one day",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RentalError::invalid_argument(
            field_name,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
