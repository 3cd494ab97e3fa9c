use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Months,
    Years,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationMethod {
    /// Constant amortization: the principal portion is the same every month.
    Sac,
    /// Fixed installment: the annuity payment is the same every month.
    Price,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanStatus {
    OnTrack,
    NeedsMoreContribution,
    Depletes,
}

#[derive(Debug, Clone)]
pub struct GrowthInputs {
    pub initial_value: f64,
    pub monthly_contribution: f64,
    /// Percent per period unit, e.g. 12 for 12%.
    pub rate_percent: f64,
    pub period_count: u32,
    pub period_unit: PeriodUnit,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSeries {
    pub balance: Vec<f64>,
    pub contributed: Vec<f64>,
    pub interest: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub monthly_rate: f64,
    pub months: u32,
    pub final_balance: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub series: GrowthSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub name: String,
    pub category: String,
    pub amount: f64,
    /// Expected annual return in percent.
    pub expected_return: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetWeight {
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub expected_return: f64,
    pub weight_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    pub weight_percent: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionYear {
    pub year: u32,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAllocation {
    pub total_value: f64,
    pub weighted_return: f64,
    pub assets: Vec<AssetWeight>,
    pub category_totals: Vec<CategoryTotal>,
    pub projection: Vec<ProjectionYear>,
}

#[derive(Debug, Clone)]
pub struct AmortizationInputs {
    pub property_value: f64,
    pub down_payment: f64,
    pub term_years: u32,
    /// Nominal annual rate in percent.
    pub annual_rate_percent: f64,
    pub method: AmortizationMethod,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub number: u32,
    pub payment: f64,
    pub amortization: f64,
    pub interest: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub method: AmortizationMethod,
    pub property_value: f64,
    pub down_payment: f64,
    pub financed_amount: f64,
    pub monthly_rate: f64,
    pub total_installments: u32,
    pub installments: Vec<Installment>,
    pub total_paid: f64,
    pub total_interest: f64,
    pub first_payment: f64,
    pub last_payment: f64,
    pub effective_cost: f64,
}

#[derive(Debug, Clone)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub desired_monthly_income: f64,
    pub current_net_worth: f64,
    pub monthly_contribution: f64,
    pub annual_return_percent: f64,
    pub annual_inflation_percent: f64,
}

/// Month-end state of one phase of the retirement simulation.
///
/// `flow` is the contribution during accumulation and the inflation-adjusted
/// withdrawal during decumulation.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSnapshot {
    pub month: u32,
    pub age: u32,
    pub net_worth: f64,
    pub flow: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlan {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub months_to_retirement: u32,
    pub months_in_retirement: u32,
    pub desired_monthly_income: f64,
    pub adjusted_monthly_income: f64,
    pub current_net_worth: f64,
    pub required_net_worth: f64,
    pub projected_net_worth: f64,
    pub monthly_contribution: f64,
    pub required_contribution: f64,
    pub sufficient: bool,
    pub final_balance: f64,
    pub lasts_through_life_expectancy: bool,
    pub status: PlanStatus,
    pub accumulation: Vec<PhaseSnapshot>,
    pub decumulation: Vec<PhaseSnapshot>,
}
