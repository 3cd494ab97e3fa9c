//! Input checks run by callers before invoking a calculator.
//!
//! The calculators themselves assume their inputs passed these checks.

use thiserror::Error;

use super::types::{AmortizationInputs, Asset, GrowthInputs, PeriodUnit, RetirementInputs};

pub const MAX_GROWTH_MONTHS: u32 = 1_200;
pub const MAX_TERM_YEARS: u32 = 50;
pub const MAX_LIFE_EXPECTANCY: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be > 0")]
    NotPositive { field: &'static str },
    #[error("{field} must be >= 0")]
    Negative { field: &'static str },
    #[error("down payment must be less than the property value")]
    DownPaymentTooLarge,
    #[error("ages must satisfy 0 < current age < retirement age < life expectancy")]
    InconsistentAges,
    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u32 },
    #[error("portfolio must contain at least one asset with a name and a positive amount")]
    EmptyPortfolio,
    #[error("invalid request: {0}")]
    Malformed(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn finite(field: &'static str, value: f64) -> ValidationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> ValidationResult<()> {
    if finite(field, value)? <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> ValidationResult<()> {
    if finite(field, value)? < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

fn positive_count(field: &'static str, value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

fn at_most(field: &'static str, value: u32, max: u32) -> ValidationResult<()> {
    if value > max {
        return Err(ValidationError::TooLarge { field, max });
    }
    Ok(())
}

pub fn validate_growth(inputs: &GrowthInputs) -> ValidationResult<()> {
    non_negative("initial value", inputs.initial_value)?;
    non_negative("monthly contribution", inputs.monthly_contribution)?;
    positive("interest rate", inputs.rate_percent)?;
    positive_count("period", inputs.period_count)?;
    match inputs.period_unit {
        PeriodUnit::Months => at_most("period", inputs.period_count, MAX_GROWTH_MONTHS),
        PeriodUnit::Years => at_most("period", inputs.period_count, MAX_GROWTH_MONTHS / 12),
    }
}

/// Drops assets without a name or with a non-positive amount, then checks that
/// something is left to simulate.
pub fn retain_valid_assets(assets: Vec<Asset>) -> ValidationResult<Vec<Asset>> {
    let mut kept = Vec::with_capacity(assets.len());
    for mut asset in assets {
        let name = asset.name.trim();
        if name.is_empty() || !(asset.amount > 0.0) {
            continue;
        }
        finite("asset amount", asset.amount)?;
        non_negative("asset expected return", asset.expected_return)?;
        asset.name = name.to_string();
        kept.push(asset);
    }

    if kept.is_empty() {
        return Err(ValidationError::EmptyPortfolio);
    }
    Ok(kept)
}

pub fn validate_amortization(inputs: &AmortizationInputs) -> ValidationResult<()> {
    positive("property value", inputs.property_value)?;
    positive_count("term", inputs.term_years)?;
    at_most("term", inputs.term_years, MAX_TERM_YEARS)?;
    positive("interest rate", inputs.annual_rate_percent)?;
    non_negative("down payment", inputs.down_payment)?;
    if inputs.down_payment >= inputs.property_value {
        return Err(ValidationError::DownPaymentTooLarge);
    }
    Ok(())
}

pub fn validate_retirement(inputs: &RetirementInputs) -> ValidationResult<()> {
    if inputs.current_age == 0
        || inputs.retirement_age <= inputs.current_age
        || inputs.life_expectancy <= inputs.retirement_age
    {
        return Err(ValidationError::InconsistentAges);
    }
    at_most("life expectancy", inputs.life_expectancy, MAX_LIFE_EXPECTANCY)?;
    positive("desired monthly income", inputs.desired_monthly_income)?;
    positive("return rate", inputs.annual_return_percent)?;
    non_negative("current net worth", inputs.current_net_worth)?;
    non_negative("monthly contribution", inputs.monthly_contribution)?;
    non_negative("inflation rate", inputs.annual_inflation_percent)
}
