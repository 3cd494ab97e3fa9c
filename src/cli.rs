use std::io::Write;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;

use crate::api::run_http_server;
use crate::config::{CalculatorDefaults, DEFAULT_LOG_FILTER, DEFAULT_PORT};
use crate::core::format::{
    category_label, format_currency, format_percent, method_label, status_message,
};
use crate::core::validation::{
    retain_valid_assets, validate_amortization, validate_growth, validate_retirement,
};
use crate::core::{
    AmortizationInputs, AmortizationMethod, Asset, GrowthInputs, PeriodUnit, RetirementInputs,
    ValidationError, compute_amortization, compute_compound_growth, compute_portfolio,
    compute_retirement_plan,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(_) => 2,
            CliError::Json(_) | CliError::Io(_) => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliPeriodUnit {
    #[value(alias = "meses")]
    Months,
    #[value(alias = "anos")]
    Years,
}

impl From<CliPeriodUnit> for PeriodUnit {
    fn from(value: CliPeriodUnit) -> Self {
        match value {
            CliPeriodUnit::Months => PeriodUnit::Months,
            CliPeriodUnit::Years => PeriodUnit::Years,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliAmortizationMethod {
    Sac,
    Price,
}

impl From<CliAmortizationMethod> for AmortizationMethod {
    fn from(value: CliAmortizationMethod) -> Self {
        match value {
            CliAmortizationMethod::Sac => AmortizationMethod::Sac,
            CliAmortizationMethod::Price => AmortizationMethod::Price,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "finproj",
    version,
    about = "Compound growth, portfolio, mortgage and retirement projections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(
        long,
        global = true,
        env = "FINPROJ_LOG",
        default_value = DEFAULT_LOG_FILTER,
        help = "tracing filter directive, e.g. info or finproj=debug"
    )]
    pub log_level: String,
    #[arg(long, global = true, env = "FINPROJ_LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the calculators as a JSON HTTP API
    Serve(ServeArgs),
    /// Compound growth with monthly contributions
    Compound(CompoundArgs),
    /// Weighted return and five-year projection of a set of assets
    Portfolio(PortfolioArgs),
    /// Mortgage amortization schedule (SAC or Price)
    Mortgage(MortgageArgs),
    /// Retirement accumulation and drawdown plan
    Retirement(RetirementArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "FINPROJ_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Args, Debug)]
pub struct CompoundArgs {
    #[arg(long, default_value_t = 0.0)]
    initial_value: f64,
    #[arg(long, default_value_t = 0.0)]
    monthly_contribution: f64,
    #[arg(long, help = "Interest rate in percent per period unit, e.g. 12")]
    rate: f64,
    #[arg(long, help = "Number of periods")]
    period: u32,
    #[arg(long, value_enum, default_value_t = CliPeriodUnit::Years)]
    period_unit: CliPeriodUnit,
    #[arg(long, help = "Print the full result as JSON")]
    json: bool,
}

#[derive(Args, Debug)]
pub struct PortfolioArgs {
    #[arg(
        long = "asset",
        value_parser = parse_asset,
        help = "Asset as NAME:CATEGORY:AMOUNT:RETURN, e.g. PETR4:acao:6000:12 (repeatable)"
    )]
    assets: Vec<Asset>,
    #[arg(long, help = "Print the full result as JSON")]
    json: bool,
}

#[derive(Args, Debug)]
pub struct MortgageArgs {
    #[arg(long)]
    property_value: f64,
    #[arg(long, default_value_t = 0.0)]
    down_payment: f64,
    #[arg(long)]
    term_years: u32,
    #[arg(long, help = "Nominal annual interest rate in percent, e.g. 9.5")]
    rate: f64,
    #[arg(long, value_enum, default_value_t = CliAmortizationMethod::Price)]
    method: CliAmortizationMethod,
    #[arg(long, help = "Print the full result as JSON")]
    json: bool,
}

#[derive(Args, Debug)]
pub struct RetirementArgs {
    #[arg(long)]
    current_age: u32,
    #[arg(long)]
    retirement_age: u32,
    #[arg(long)]
    life_expectancy: u32,
    #[arg(long, help = "Desired monthly income in today's money")]
    desired_income: f64,
    #[arg(long, default_value_t = 0.0)]
    current_net_worth: f64,
    #[arg(long, default_value_t = 0.0)]
    monthly_contribution: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 8")]
    return_rate: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Expected annual inflation in percent"
    )]
    inflation_rate: f64,
    #[arg(long, help = "Print the full result as JSON")]
    json: bool,
}

fn parse_asset(raw: &str) -> Result<Asset, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [name, category, amount, expected_return] = parts.as_slice() else {
        return Err(format!(
            "expected NAME:CATEGORY:AMOUNT:RETURN, got `{raw}`"
        ));
    };
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid amount `{amount}`: {e}"))?;
    let expected_return = expected_return
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid return `{expected_return}`: {e}"))?;
    Ok(Asset {
        name: name.to_string(),
        category: category.trim().to_string(),
        amount,
        expected_return,
    })
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Runs one subcommand, writing calculator reports to `out`.
pub async fn run(command: Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Serve(args) => {
            Ok(run_http_server(args.port, CalculatorDefaults::default()).await?)
        }
        Command::Compound(args) => run_compound(args, out),
        Command::Portfolio(args) => run_portfolio(args, out),
        Command::Mortgage(args) => run_mortgage(args, out),
        Command::Retirement(args) => run_retirement(args, out),
    }
}

fn run_compound(args: CompoundArgs, out: &mut impl Write) -> Result<(), CliError> {
    let inputs = GrowthInputs {
        initial_value: args.initial_value,
        monthly_contribution: args.monthly_contribution,
        rate_percent: args.rate,
        period_count: args.period,
        period_unit: args.period_unit.into(),
    };
    validate_growth(&inputs)?;
    let projection = compute_compound_growth(&inputs);
    tracing::debug!(months = projection.months, "computed compound growth");

    if args.json {
        return write_json(out, &projection);
    }
    writeln!(out, "Montante Final:  {}", format_currency(projection.final_balance))?;
    writeln!(out, "Total Investido: {}", format_currency(projection.total_contributed))?;
    writeln!(out, "Total em Juros:  {}", format_currency(projection.total_interest))?;
    writeln!(
        out,
        "Taxa mensal:     {} over {} months",
        format_percent(projection.monthly_rate * 100.0),
        projection.months
    )?;
    Ok(())
}

fn run_portfolio(args: PortfolioArgs, out: &mut impl Write) -> Result<(), CliError> {
    let assets = retain_valid_assets(args.assets)?;
    let allocation = compute_portfolio(&assets);
    tracing::debug!(assets = assets.len(), "computed portfolio");

    if args.json {
        return write_json(out, &allocation);
    }
    writeln!(out, "Valor Total da Carteira: {}", format_currency(allocation.total_value))?;
    writeln!(out, "Retorno Médio Anual:     {}", format_percent(allocation.weighted_return))?;
    if let Some(last) = allocation.projection.last() {
        writeln!(out, "Projeção em {} anos:      {}", last.year, format_currency(last.value))?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{:<16} {:<12} {:>18} {:>10} {:>10}",
        "Ativo", "Tipo", "Valor", "Retorno", "Peso"
    )?;
    writeln!(out, "{}", "-".repeat(70))?;
    for asset in &allocation.assets {
        writeln!(
            out,
            "{:<16} {:<12} {:>18} {:>10} {:>10}",
            asset.name,
            category_label(&asset.category),
            format_currency(asset.amount),
            format_percent(asset.expected_return),
            format_percent(asset.weight_percent),
        )?;
    }
    Ok(())
}

fn run_mortgage(args: MortgageArgs, out: &mut impl Write) -> Result<(), CliError> {
    let inputs = AmortizationInputs {
        property_value: args.property_value,
        down_payment: args.down_payment,
        term_years: args.term_years,
        annual_rate_percent: args.rate,
        method: args.method.into(),
    };
    validate_amortization(&inputs)?;
    let schedule = compute_amortization(&inputs);
    tracing::debug!(installments = schedule.total_installments, "computed amortization");

    if args.json {
        return write_json(out, &schedule);
    }
    writeln!(out, "Sistema:          {}", method_label(schedule.method))?;
    writeln!(out, "Valor Financiado: {}", format_currency(schedule.financed_amount))?;
    match schedule.method {
        AmortizationMethod::Sac => {
            writeln!(out, "Primeira Parcela: {}", format_currency(schedule.first_payment))?;
            writeln!(out, "Última Parcela:   {}", format_currency(schedule.last_payment))?;
        }
        AmortizationMethod::Price => {
            writeln!(out, "Valor da Parcela: {}", format_currency(schedule.first_payment))?;
        }
    }
    writeln!(out, "Total Pago:       {}", format_currency(schedule.total_paid))?;
    writeln!(out, "Total de Juros:   {}", format_currency(schedule.total_interest))?;
    writeln!(out, "Custo Efetivo:    {}", format_currency(schedule.effective_cost))?;
    Ok(())
}

fn run_retirement(args: RetirementArgs, out: &mut impl Write) -> Result<(), CliError> {
    let inputs = RetirementInputs {
        current_age: args.current_age,
        retirement_age: args.retirement_age,
        life_expectancy: args.life_expectancy,
        desired_monthly_income: args.desired_income,
        current_net_worth: args.current_net_worth,
        monthly_contribution: args.monthly_contribution,
        annual_return_percent: args.return_rate,
        annual_inflation_percent: args.inflation_rate,
    };
    validate_retirement(&inputs)?;
    let plan = compute_retirement_plan(&inputs);
    tracing::debug!(status = ?plan.status, "computed retirement plan");

    if args.json {
        return write_json(out, &plan);
    }
    writeln!(out, "{}", status_message(plan.status))?;
    writeln!(out)?;
    writeln!(out, "Patrimônio Necessário:        {}", format_currency(plan.required_net_worth))?;
    writeln!(out, "Patrimônio Projetado:         {}", format_currency(plan.projected_net_worth))?;
    writeln!(out, "Tempo até Aposentadoria:      {} anos", plan.months_to_retirement / 12)?;
    writeln!(out, "Renda Mensal Desejada:        {}", format_currency(plan.desired_monthly_income))?;
    writeln!(
        out,
        "Renda Ajustada pela Inflação: {}",
        format_currency(plan.adjusted_monthly_income)
    )?;
    writeln!(out, "Aporte Mensal Atual:          {}", format_currency(plan.monthly_contribution))?;
    if !plan.sufficient {
        writeln!(
            out,
            "Aporte Mensal Necessário:     {}",
            format_currency(plan.required_contribution)
        )?;
    }
    Ok(())
}
