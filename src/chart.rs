//! Label and series data for the page's charting library.
//!
//! Every builder returns an owned [`ChartData`]; replacing a chart on the page
//! is the caller's job.

use serde::Serialize;

use crate::core::{
    AmortizationSchedule, GrowthProjection, PortfolioAllocation, RetirementPlan, format,
};

const MAX_AMORTIZATION_POINTS: usize = 24;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Pie,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub fill: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

fn dataset(label: &str, data: Vec<f64>, fill: bool) -> Dataset {
    Dataset {
        label: label.to_string(),
        data,
        fill,
    }
}

pub fn growth_chart(projection: &GrowthProjection) -> ChartData {
    ChartData {
        kind: ChartKind::Line,
        labels: (1..=projection.months).map(|m| format!("Mês {m}")).collect(),
        datasets: vec![
            dataset("Montante Total", projection.series.balance.clone(), true),
            dataset("Total Investido", projection.series.contributed.clone(), true),
        ],
    }
}

pub fn portfolio_allocation_chart(allocation: &PortfolioAllocation) -> ChartData {
    let (labels, data): (Vec<String>, Vec<f64>) = allocation
        .category_totals
        .iter()
        .map(|c| (format::category_label(&c.category).to_string(), c.amount))
        .unzip();
    ChartData {
        kind: ChartKind::Pie,
        labels,
        datasets: vec![dataset("Distribuição", data, false)],
    }
}

pub fn portfolio_projection_chart(allocation: &PortfolioAllocation) -> ChartData {
    let mut labels = vec!["Hoje".to_string()];
    let mut data = vec![allocation.total_value];
    for year in &allocation.projection {
        labels.push(format!("Ano {}", year.year));
        data.push(year.value);
    }
    ChartData {
        kind: ChartKind::Line,
        labels,
        datasets: vec![dataset("Valor Projetado", data, true)],
    }
}

/// Samples the schedule so long terms stay readable, always keeping the last
/// installment.
pub fn amortization_chart(schedule: &AmortizationSchedule) -> ChartData {
    let installments = &schedule.installments;
    let step = (installments.len() / MAX_AMORTIZATION_POINTS).max(1);

    let mut sampled: Vec<_> = installments.iter().step_by(step).collect();
    if let Some(last) = installments.last() {
        if sampled.last().map(|i| i.number) != Some(last.number) {
            sampled.push(last);
        }
    }

    ChartData {
        kind: ChartKind::Line,
        labels: sampled
            .iter()
            .map(|i| format!("Parcela {}", i.number))
            .collect(),
        datasets: vec![
            dataset(
                "Valor da Parcela",
                sampled.iter().map(|i| i.payment).collect(),
                false,
            ),
            dataset(
                "Amortização",
                sampled.iter().map(|i| i.amortization).collect(),
                false,
            ),
            dataset("Juros", sampled.iter().map(|i| i.interest).collect(), false),
        ],
    }
}

pub fn retirement_chart(plan: &RetirementPlan) -> ChartData {
    let snapshots = plan.accumulation.iter().chain(plan.decumulation.iter());
    let (labels, data): (Vec<String>, Vec<f64>) = snapshots
        .map(|s| (format!("{} anos", s.age), s.net_worth))
        .unzip();
    ChartData {
        kind: ChartKind::Line,
        labels,
        datasets: vec![dataset("Patrimônio Projetado", data, true)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        AmortizationInputs, AmortizationMethod, Asset, GrowthInputs, PeriodUnit,
        RetirementInputs, compute_amortization, compute_compound_growth, compute_portfolio,
        compute_retirement_plan,
    };

    fn schedule(term_years: u32) -> AmortizationSchedule {
        compute_amortization(&AmortizationInputs {
            property_value: 300_000.0,
            down_payment: 60_000.0,
            term_years,
            annual_rate_percent: 9.5,
            method: AmortizationMethod::Price,
        })
    }

    #[test]
    fn amortization_chart_samples_every_fifteenth_installment_for_thirty_years() {
        let chart = amortization_chart(&schedule(30));

        // 360 / 24 = 15: installments 1, 16, ..., 346, then 360 appended.
        assert_eq!(chart.labels.first().map(String::as_str), Some("Parcela 1"));
        assert_eq!(chart.labels[1], "Parcela 16");
        assert_eq!(chart.labels.len(), 25);
        assert_eq!(chart.labels.last().map(String::as_str), Some("Parcela 360"));
        assert_eq!(chart.datasets.len(), 3);
        assert!(chart.datasets.iter().all(|d| d.data.len() == 25));
    }

    #[test]
    fn amortization_chart_keeps_every_installment_for_short_terms() {
        let chart = amortization_chart(&schedule(1));

        assert_eq!(chart.labels.len(), 12);
        assert_eq!(chart.labels[11], "Parcela 12");
    }

    #[test]
    fn growth_chart_has_one_label_per_month() {
        let projection = compute_compound_growth(&GrowthInputs {
            initial_value: 1_000.0,
            monthly_contribution: 100.0,
            rate_percent: 12.0,
            period_count: 2,
            period_unit: PeriodUnit::Years,
        });
        let chart = growth_chart(&projection);

        assert_eq!(chart.labels.len(), 24);
        assert_eq!(chart.labels[0], "Mês 1");
        assert_eq!(chart.datasets[0].label, "Montante Total");
        assert_eq!(chart.datasets[1].data.len(), 24);
    }

    #[test]
    fn portfolio_charts_use_category_labels_and_start_today() {
        let allocation = compute_portfolio(&[
            Asset {
                name: "HGLG11".to_string(),
                category: "fii".to_string(),
                amount: 1_000.0,
                expected_return: 8.0,
            },
            Asset {
                name: "LTN".to_string(),
                category: "renda-fixa".to_string(),
                amount: 3_000.0,
                expected_return: 10.0,
            },
        ]);

        let pie = portfolio_allocation_chart(&allocation);
        assert_eq!(pie.kind, ChartKind::Pie);
        assert_eq!(pie.labels, vec!["FII", "Renda Fixa"]);

        let line = portfolio_projection_chart(&allocation);
        assert_eq!(line.labels.first().map(String::as_str), Some("Hoje"));
        assert_eq!(line.labels.last().map(String::as_str), Some("Ano 5"));
        assert_eq!(line.datasets[0].data[0], 4_000.0);
    }

    #[test]
    fn retirement_chart_labels_ages_across_both_phases() {
        let plan = compute_retirement_plan(&RetirementInputs {
            current_age: 60,
            retirement_age: 62,
            life_expectancy: 64,
            desired_monthly_income: 1_000.0,
            current_net_worth: 100_000.0,
            monthly_contribution: 500.0,
            annual_return_percent: 6.0,
            annual_inflation_percent: 3.0,
        });
        let chart = retirement_chart(&plan);

        assert_eq!(chart.labels, vec!["60 anos", "61 anos", "62 anos", "63 anos", "64 anos"]);
        assert_eq!(chart.datasets[0].data.len(), 5);
    }
}
