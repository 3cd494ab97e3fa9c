use super::types::{PhaseSnapshot, PlanStatus, RetirementInputs, RetirementPlan};

const MONTHS_PER_YEAR: u32 = 12;

fn is_snapshot_month(month: u32, last: u32) -> bool {
    month % MONTHS_PER_YEAR == 0 || month == last
}

/// Present value at retirement of the inflation-adjusted income stream.
fn required_net_worth(
    adjusted_income: f64,
    months: u32,
    monthly_return: f64,
    monthly_inflation: f64,
) -> f64 {
    (1..=months)
        .map(|month| {
            let income = adjusted_income * (1.0 + monthly_inflation).powi(month as i32);
            income / (1.0 + monthly_return).powi(month as i32)
        })
        .sum()
}

fn accumulate(
    inputs: &RetirementInputs,
    months: u32,
    monthly_return: f64,
) -> (f64, Vec<PhaseSnapshot>) {
    let mut balance = inputs.current_net_worth;
    let mut snapshots = vec![PhaseSnapshot {
        month: 0,
        age: inputs.current_age,
        net_worth: balance,
        flow: 0.0,
        growth: 0.0,
    }];

    for month in 1..=months {
        let growth = balance * monthly_return;
        balance += inputs.monthly_contribution + growth;
        if is_snapshot_month(month, months) {
            snapshots.push(PhaseSnapshot {
                month,
                age: inputs.current_age + month / MONTHS_PER_YEAR,
                net_worth: balance,
                flow: inputs.monthly_contribution,
                growth,
            });
        }
    }

    (balance, snapshots)
}

fn decumulate(
    opening: f64,
    start_age: u32,
    adjusted_income: f64,
    months: u32,
    monthly_return: f64,
    monthly_inflation: f64,
) -> (f64, Vec<PhaseSnapshot>) {
    let mut balance = opening;
    let mut snapshots = Vec::with_capacity((months / MONTHS_PER_YEAR + 1) as usize);

    for month in 1..=months {
        let withdrawal = adjusted_income * (1.0 + monthly_inflation).powi(month as i32);
        let growth = balance * monthly_return;
        balance = balance + growth - withdrawal;
        if is_snapshot_month(month, months) {
            snapshots.push(PhaseSnapshot {
                month,
                age: start_age + month / MONTHS_PER_YEAR,
                net_worth: balance,
                flow: withdrawal,
                growth,
            });
        }
    }

    (balance, snapshots)
}

/// Projects accumulation up to retirement and drawdown through life expectancy.
///
/// The required contribution spreads the shortfall linearly over the months
/// left to retirement and ignores the growth those extra contributions would
/// earn, so it overstates what is strictly needed.
pub fn compute_retirement_plan(inputs: &RetirementInputs) -> RetirementPlan {
    let monthly_return = inputs.annual_return_percent / 100.0 / 12.0;
    let monthly_inflation = inputs.annual_inflation_percent / 100.0 / 12.0;

    let months_to_retirement = inputs
        .retirement_age
        .saturating_sub(inputs.current_age)
        .saturating_mul(MONTHS_PER_YEAR);
    let months_in_retirement = inputs
        .life_expectancy
        .saturating_sub(inputs.retirement_age)
        .saturating_mul(MONTHS_PER_YEAR);

    let adjusted_monthly_income = inputs.desired_monthly_income
        * (1.0 + monthly_inflation).powi(months_to_retirement as i32);

    let required_net_worth = required_net_worth(
        adjusted_monthly_income,
        months_in_retirement,
        monthly_return,
        monthly_inflation,
    );

    let (projected_net_worth, accumulation) =
        accumulate(inputs, months_to_retirement, monthly_return);

    let sufficient = projected_net_worth >= required_net_worth;
    let required_contribution = if sufficient || months_to_retirement == 0 {
        inputs.monthly_contribution
    } else {
        let shortfall = required_net_worth - projected_net_worth;
        inputs.monthly_contribution + shortfall / months_to_retirement as f64
    };

    let (final_balance, decumulation) = decumulate(
        projected_net_worth,
        inputs.retirement_age,
        adjusted_monthly_income,
        months_in_retirement,
        monthly_return,
        monthly_inflation,
    );
    let lasts_through_life_expectancy = final_balance > 0.0;

    let status = if !lasts_through_life_expectancy {
        PlanStatus::Depletes
    } else if !sufficient {
        PlanStatus::NeedsMoreContribution
    } else {
        PlanStatus::OnTrack
    };

    RetirementPlan {
        current_age: inputs.current_age,
        retirement_age: inputs.retirement_age,
        life_expectancy: inputs.life_expectancy,
        months_to_retirement,
        months_in_retirement,
        desired_monthly_income: inputs.desired_monthly_income,
        adjusted_monthly_income,
        current_net_worth: inputs.current_net_worth,
        required_net_worth,
        projected_net_worth,
        monthly_contribution: inputs.monthly_contribution,
        required_contribution,
        sufficient,
        final_balance,
        lasts_through_life_expectancy,
        status,
        accumulation,
        decumulation,
    }
}
