//! Defaults applied to any calculator field a request leaves out.

use crate::core::{
    AmortizationInputs, AmortizationMethod, GrowthInputs, PeriodUnit, RetirementInputs,
};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct CalculatorDefaults {
    pub growth: GrowthInputs,
    pub amortization: AmortizationInputs,
    pub retirement: RetirementInputs,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            growth: GrowthInputs {
                initial_value: 1_000.0,
                monthly_contribution: 100.0,
                rate_percent: 12.0,
                period_count: 1,
                period_unit: PeriodUnit::Years,
            },
            amortization: AmortizationInputs {
                property_value: 300_000.0,
                down_payment: 60_000.0,
                term_years: 30,
                annual_rate_percent: 9.5,
                method: AmortizationMethod::Price,
            },
            retirement: RetirementInputs {
                current_age: 30,
                retirement_age: 65,
                life_expectancy: 85,
                desired_monthly_income: 5_000.0,
                current_net_worth: 50_000.0,
                monthly_contribution: 1_000.0,
                annual_return_percent: 8.0,
                annual_inflation_percent: 4.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{validate_amortization, validate_growth, validate_retirement};

    #[test]
    fn defaults_pass_validation() {
        let defaults = CalculatorDefaults::default();

        assert_eq!(validate_growth(&defaults.growth), Ok(()));
        assert_eq!(validate_amortization(&defaults.amortization), Ok(()));
        assert_eq!(validate_retirement(&defaults.retirement), Ok(()));
    }
}
