mod amortization;
pub mod format;
mod growth;
mod portfolio;
mod retirement;
mod types;
pub mod validation;

pub use amortization::{annuity_payment, compute_amortization};
pub use growth::compute_compound_growth;
pub use portfolio::{PROJECTION_YEARS, compute_portfolio};
pub use retirement::compute_retirement_plan;
pub use types::{
    AmortizationInputs, AmortizationMethod, AmortizationSchedule, Asset, AssetWeight,
    CategoryTotal, GrowthInputs, GrowthProjection, GrowthSeries, Installment, PeriodUnit,
    PhaseSnapshot, PlanStatus, PortfolioAllocation, ProjectionYear, RetirementInputs,
    RetirementPlan,
};
pub use validation::{ValidationError, ValidationResult};
