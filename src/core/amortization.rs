use super::types::{AmortizationInputs, AmortizationMethod, AmortizationSchedule, Installment};

/// Level payment that retires `principal` over `periods` at `rate` per period.
pub fn annuity_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    let factor = (1.0 + rate).powi(i32::try_from(periods).unwrap_or(i32::MAX));
    principal * (factor * rate) / (factor - 1.0)
}

fn sac_installments(financed: f64, monthly_rate: f64, total: u32) -> Vec<Installment> {
    let amortization = financed / total as f64;
    (1..=total)
        .map(|number| {
            let opening_balance = financed - amortization * (number - 1) as f64;
            let interest = opening_balance * monthly_rate;
            Installment {
                number,
                payment: amortization + interest,
                amortization,
                interest,
                remaining_balance: opening_balance - amortization,
            }
        })
        .collect()
}

fn price_installments(financed: f64, monthly_rate: f64, total: u32) -> Vec<Installment> {
    let payment = annuity_payment(financed, monthly_rate, total);
    let mut balance = financed;
    (1..=total)
        .map(|number| {
            let interest = balance * monthly_rate;
            let amortization = payment - interest;
            balance -= amortization;
            Installment {
                number,
                payment,
                amortization,
                interest,
                remaining_balance: balance,
            }
        })
        .collect()
}

pub fn compute_amortization(inputs: &AmortizationInputs) -> AmortizationSchedule {
    let financed_amount = inputs.property_value - inputs.down_payment;
    let monthly_rate = inputs.annual_rate_percent / 100.0 / 12.0;
    let total_installments = inputs.term_years.saturating_mul(12);

    let installments = match inputs.method {
        AmortizationMethod::Sac => {
            sac_installments(financed_amount, monthly_rate, total_installments)
        }
        AmortizationMethod::Price => {
            price_installments(financed_amount, monthly_rate, total_installments)
        }
    };

    let total_paid: f64 = installments.iter().map(|i| i.payment).sum();
    let total_interest: f64 = installments.iter().map(|i| i.interest).sum();
    let first_payment = installments.first().map_or(0.0, |i| i.payment);
    let last_payment = installments.last().map_or(0.0, |i| i.payment);

    AmortizationSchedule {
        method: inputs.method,
        property_value: inputs.property_value,
        down_payment: inputs.down_payment,
        financed_amount,
        monthly_rate,
        total_installments,
        installments,
        total_paid,
        total_interest,
        first_payment,
        last_payment,
        effective_cost: total_paid + inputs.down_payment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_inputs(method: AmortizationMethod) -> AmortizationInputs {
        AmortizationInputs {
            property_value: 300_000.0,
            down_payment: 60_000.0,
            term_years: 30,
            annual_rate_percent: 9.5,
            method,
        }
    }

    #[test]
    fn price_scenario_matches_reference_payment() {
        let schedule = compute_amortization(&sample_inputs(AmortizationMethod::Price));

        assert_approx(schedule.financed_amount, 240_000.0);
        assert_eq!(schedule.total_installments, 360);
        assert_eq!(schedule.installments.len(), 360);
        assert_approx_tol(schedule.first_payment, 2_018.05, 0.01);
        assert_approx(schedule.first_payment, schedule.last_payment);
    }

    #[test]
    fn price_payment_is_constant_and_balance_reaches_zero() {
        let schedule = compute_amortization(&sample_inputs(AmortizationMethod::Price));
        let payment = schedule.installments[0].payment;

        assert!(schedule.installments.iter().all(|i| i.payment == payment));
        assert_approx_tol(schedule.installments[359].remaining_balance, 0.0, 1e-4);
        // Interest share falls while principal share rises.
        assert!(schedule.installments[0].interest > schedule.installments[359].interest);
        assert!(schedule.installments[0].amortization < schedule.installments[359].amortization);
    }

    #[test]
    fn sac_first_and_last_installments_match_hand_calculation() {
        let schedule = compute_amortization(&sample_inputs(AmortizationMethod::Sac));
        let amortization = 240_000.0 / 360.0;
        let rate = 0.095 / 12.0;

        assert_approx(schedule.first_payment, amortization + 240_000.0 * rate);
        assert_approx(schedule.last_payment, amortization + amortization * rate);
        assert_approx_tol(schedule.installments[359].remaining_balance, 0.0, 1e-6);
        assert!(
            schedule
                .installments
                .iter()
                .all(|i| (i.amortization - amortization).abs() <= EPS)
        );
    }

    #[test]
    fn sac_pays_less_total_interest_than_price() {
        let sac = compute_amortization(&sample_inputs(AmortizationMethod::Sac));
        let price = compute_amortization(&sample_inputs(AmortizationMethod::Price));

        assert!(sac.total_interest < price.total_interest);
        assert!(sac.first_payment > price.first_payment);
    }

    #[test]
    fn zero_down_payment_finances_full_value() {
        let mut inputs = sample_inputs(AmortizationMethod::Sac);
        inputs.down_payment = 0.0;
        let schedule = compute_amortization(&inputs);

        assert_approx(schedule.financed_amount, 300_000.0);
        assert_approx(schedule.effective_cost, schedule.total_paid);
    }

    #[test]
    fn effective_cost_adds_down_payment() {
        let schedule = compute_amortization(&sample_inputs(AmortizationMethod::Price));
        assert_approx(schedule.effective_cost, schedule.total_paid + 60_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_totals_reconcile_for_both_methods(
            property in 50_000u32..2_000_000,
            down_pct in 0u32..90,
            years in 1u32..36,
            rate_bp in 50u32..3_000,
            sac in proptest::bool::ANY
        ) {
            let property_value = property as f64;
            let inputs = AmortizationInputs {
                property_value,
                down_payment: property_value * down_pct as f64 / 100.0,
                term_years: years,
                annual_rate_percent: rate_bp as f64 / 100.0,
                method: if sac { AmortizationMethod::Sac } else { AmortizationMethod::Price },
            };
            let schedule = compute_amortization(&inputs);
            let tol = 1e-6 * schedule.financed_amount;

            let payments: f64 = schedule.installments.iter().map(|i| i.payment).sum();
            prop_assert!((schedule.total_paid - payments).abs() <= tol);
            prop_assert!(
                (schedule.total_interest - (schedule.total_paid - schedule.financed_amount)).abs() <= tol
            );
            let last = schedule.installments.last().map(|i| i.remaining_balance).unwrap_or(f64::NAN);
            prop_assert!(last.abs() <= tol);
            prop_assert!(schedule.installments.len() == (years * 12) as usize);
        }
    }
}
