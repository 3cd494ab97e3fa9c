use finproj::chart;
use finproj::core::format::format_currency;
use finproj::core::{
    AmortizationInputs, AmortizationMethod, GrowthInputs, PeriodUnit, RetirementInputs,
    compute_amortization, compute_compound_growth, compute_retirement_plan,
};

const EPS: f64 = 1e-6;

fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}, tolerance {tol}"
    );
}

fn mortgage(method: AmortizationMethod) -> AmortizationInputs {
    AmortizationInputs {
        property_value: 300_000.0,
        down_payment: 60_000.0,
        term_years: 30,
        annual_rate_percent: 9.5,
        method,
    }
}

fn retirement(annual_inflation_percent: f64) -> RetirementInputs {
    RetirementInputs {
        current_age: 30,
        retirement_age: 65,
        life_expectancy: 85,
        desired_monthly_income: 5_000.0,
        current_net_worth: 50_000.0,
        monthly_contribution: 1_000.0,
        annual_return_percent: 8.0,
        annual_inflation_percent,
    }
}

#[test]
fn one_year_of_growth_with_lump_sum_and_contributions() {
    let projection = compute_compound_growth(&GrowthInputs {
        initial_value: 1_000.0,
        monthly_contribution: 100.0,
        rate_percent: 12.0,
        period_count: 1,
        period_unit: PeriodUnit::Years,
    });

    assert_eq!(projection.months, 12);
    assert_approx_tol(projection.final_balance, 2_284.65, 0.01);
    assert_approx_tol(projection.total_contributed, 2_100.0, EPS);
    assert_approx_tol(
        projection.total_interest,
        projection.final_balance - projection.total_contributed,
        EPS,
    );
    assert_eq!(format_currency(projection.final_balance), "R$ 2.284,65");
}

#[test]
fn growth_without_contributions_matches_closed_form() {
    let projection = compute_compound_growth(&GrowthInputs {
        initial_value: 5_000.0,
        monthly_contribution: 0.0,
        rate_percent: 1.0,
        period_count: 24,
        period_unit: PeriodUnit::Months,
    });

    assert_approx_tol(projection.final_balance, 5_000.0 * 1.01_f64.powi(24), 1e-6);
}

#[test]
fn price_mortgage_has_level_payment_and_clears_balance() {
    let schedule = compute_amortization(&mortgage(AmortizationMethod::Price));

    assert_eq!(schedule.total_installments, 360);
    assert_approx_tol(schedule.first_payment, 2_018.05, 0.01);
    assert_approx_tol(schedule.last_payment, schedule.first_payment, 1e-6);
    let last = schedule.installments.last().expect("schedule has installments");
    assert_approx_tol(last.remaining_balance, 0.0, 1e-4);

    let chart = chart::amortization_chart(&schedule);
    assert_eq!(chart.labels.last().map(String::as_str), Some("Parcela 360"));
}

#[test]
fn sac_mortgage_amortizes_evenly_and_costs_less_interest() {
    let sac = compute_amortization(&mortgage(AmortizationMethod::Sac));
    let price = compute_amortization(&mortgage(AmortizationMethod::Price));

    let expected_amortization = 240_000.0 / 360.0;
    assert!(
        sac.installments
            .iter()
            .all(|i| (i.amortization - expected_amortization).abs() <= 1e-9)
    );
    let last = sac.installments.last().expect("schedule has installments");
    assert_approx_tol(last.remaining_balance, 0.0, 1e-6);
    assert!(sac.first_payment > sac.last_payment);
    assert!(sac.total_interest < price.total_interest);
}

#[test]
fn higher_inflation_raises_the_retirement_target() {
    let low = compute_retirement_plan(&retirement(2.0));
    let high = compute_retirement_plan(&retirement(6.0));

    assert!(high.adjusted_monthly_income > low.adjusted_monthly_income);
    assert!(high.required_net_worth > low.required_net_worth);
    assert_approx_tol(high.projected_net_worth, low.projected_net_worth, EPS);
    assert!(high.required_contribution >= low.required_contribution);
}
