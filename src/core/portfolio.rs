use super::types::{Asset, AssetWeight, CategoryTotal, PortfolioAllocation, ProjectionYear};

pub const PROJECTION_YEARS: u32 = 5;

fn percent_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 { amount / total * 100.0 } else { 0.0 }
}

/// Sums amounts per category, keeping categories in order of first appearance.
fn category_totals(assets: &[Asset], total: f64) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for asset in assets {
        match totals.iter_mut().find(|c| c.category == asset.category) {
            Some(existing) => existing.amount += asset.amount,
            None => totals.push(CategoryTotal {
                category: asset.category.clone(),
                amount: asset.amount,
                weight_percent: 0.0,
            }),
        }
    }
    for category in &mut totals {
        category.weight_percent = percent_of(category.amount, total);
    }
    totals
}

pub fn compute_portfolio(assets: &[Asset]) -> PortfolioAllocation {
    let total_value: f64 = assets.iter().map(|a| a.amount).sum();

    let weighted_return = if total_value > 0.0 {
        assets
            .iter()
            .map(|a| a.amount / total_value * a.expected_return)
            .sum()
    } else {
        0.0
    };

    let weights = assets
        .iter()
        .map(|a| AssetWeight {
            name: a.name.clone(),
            category: a.category.clone(),
            amount: a.amount,
            expected_return: a.expected_return,
            weight_percent: percent_of(a.amount, total_value),
        })
        .collect();

    let growth = 1.0 + weighted_return / 100.0;
    let mut value = total_value;
    let projection = (1..=PROJECTION_YEARS)
        .map(|year| {
            value *= growth;
            ProjectionYear { year, value }
        })
        .collect();

    PortfolioAllocation {
        total_value,
        weighted_return,
        assets: weights,
        category_totals: category_totals(assets, total_value),
        projection,
    }
}
