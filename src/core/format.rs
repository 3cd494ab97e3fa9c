//! pt-BR number formatting shared by every calculator's presentation.

use super::types::{AmortizationMethod, PlanStatus};

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Formats with two decimals, `.` between thousands and `,` before decimals.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{},{frac_part}", group_thousands(int_part))
}

pub fn format_currency(value: f64) -> String {
    let formatted = format_decimal(value);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-R$ {rest}"),
        None => format!("R$ {formatted}"),
    }
}

/// `value` is already in percent units: 12.5 renders as `12,50%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_decimal(value))
}

pub fn category_label(category: &str) -> &str {
    match category {
        "acao" => "Ação",
        "fii" => "FII",
        "renda-fixa" => "Renda Fixa",
        "outro" => "Outro",
        other => other,
    }
}

pub fn method_label(method: AmortizationMethod) -> &'static str {
    match method {
        AmortizationMethod::Sac => "SAC (Amortização Constante)",
        AmortizationMethod::Price => "Price (Parcelas Fixas)",
    }
}

pub fn status_message(status: PlanStatus) -> &'static str {
    match status {
        PlanStatus::OnTrack => "Seu planejamento está no caminho certo!",
        PlanStatus::NeedsMoreContribution => {
            "Você precisa aumentar seus aportes mensais para atingir sua meta."
        }
        PlanStatus::Depletes => {
            "Seu patrimônio não será suficiente para toda sua expectativa de vida."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_uses_comma_decimals() {
        assert_eq!(format_currency(2_018.0501), "R$ 2.018,05");
        assert_eq!(format_currency(1_234_567.891), "R$ 1.234.567,89");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(999.999), "R$ 1.000,00");
    }

    #[test]
    fn currency_places_sign_before_symbol() {
        assert_eq!(format_currency(-1_500.5), "-R$ 1.500,50");
        assert_eq!(format_currency(-0.001), "R$ 0,00");
    }

    #[test]
    fn percent_keeps_two_decimals() {
        assert_eq!(format_percent(9.9), "9,90%");
        assert_eq!(format_percent(1_250.0), "1.250,00%");
    }

    #[test]
    fn category_label_maps_known_keys_and_passes_others_through() {
        assert_eq!(category_label("acao"), "Ação");
        assert_eq!(category_label("renda-fixa"), "Renda Fixa");
        assert_eq!(category_label("cripto"), "cripto");
    }

    #[test]
    fn non_finite_values_render_verbatim() {
        assert_eq!(format_decimal(f64::INFINITY), "inf");
    }
}
