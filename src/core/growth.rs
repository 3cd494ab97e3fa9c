use super::types::{GrowthInputs, GrowthProjection, GrowthSeries, PeriodUnit};

/// Converts the quoted rate and period count to a monthly rate and a month count.
fn monthly_terms(inputs: &GrowthInputs) -> (f64, u32) {
    let rate = inputs.rate_percent / 100.0;
    match inputs.period_unit {
        PeriodUnit::Months => (rate, inputs.period_count),
        PeriodUnit::Years => (
            (1.0 + rate).powf(1.0 / 12.0) - 1.0,
            inputs.period_count.saturating_mul(12),
        ),
    }
}

pub fn compute_compound_growth(inputs: &GrowthInputs) -> GrowthProjection {
    let (monthly_rate, months) = monthly_terms(inputs);

    let mut series = GrowthSeries {
        balance: Vec::with_capacity(months as usize),
        contributed: Vec::with_capacity(months as usize),
        interest: Vec::with_capacity(months as usize),
    };

    let mut balance = inputs.initial_value;
    let mut contributed = inputs.initial_value;
    let mut interest_total = 0.0;

    for month in 1..=months {
        // An initial lump sum stands in for the first month's contribution.
        if month > 1 || inputs.initial_value == 0.0 {
            balance += inputs.monthly_contribution;
            contributed += inputs.monthly_contribution;
        }

        let interest = balance * monthly_rate;
        balance += interest;
        interest_total += interest;

        series.balance.push(balance);
        series.contributed.push(contributed);
        series.interest.push(interest_total);
    }

    GrowthProjection {
        monthly_rate,
        months,
        final_balance: balance,
        total_contributed: contributed,
        total_interest: interest_total,
        series,
    }
}
