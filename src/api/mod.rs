use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::chart::{self, ChartData};
use crate::config::CalculatorDefaults;
use crate::core::validation::{
    retain_valid_assets, validate_amortization, validate_growth, validate_retirement,
};
use crate::core::{
    AmortizationInputs, AmortizationMethod, AmortizationSchedule, Asset, GrowthInputs,
    GrowthProjection, PeriodUnit, PortfolioAllocation, RetirementInputs, RetirementPlan,
    ValidationError, ValidationResult, compute_amortization, compute_compound_growth,
    compute_portfolio, compute_retirement_plan,
};

type AppState = Arc<CalculatorDefaults>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPeriodUnit {
    #[serde(alias = "meses", alias = "month")]
    Months,
    #[serde(alias = "anos", alias = "year")]
    Years,
}

impl From<ApiPeriodUnit> for PeriodUnit {
    fn from(value: ApiPeriodUnit) -> Self {
        match value {
            ApiPeriodUnit::Months => PeriodUnit::Months,
            ApiPeriodUnit::Years => PeriodUnit::Years,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiAmortizationMethod {
    #[serde(alias = "constant-amortization", alias = "SAC")]
    Sac,
    #[serde(alias = "fixed-installment", alias = "PRICE")]
    Price,
}

impl From<ApiAmortizationMethod> for AmortizationMethod {
    fn from(value: ApiAmortizationMethod) -> Self {
        match value {
            ApiAmortizationMethod::Sac => AmortizationMethod::Sac,
            ApiAmortizationMethod::Price => AmortizationMethod::Price,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GrowthPayload {
    initial_value: Option<f64>,
    monthly_contribution: Option<f64>,
    rate: Option<f64>,
    period: Option<u32>,
    period_unit: Option<ApiPeriodUnit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AssetPayload {
    name: Option<String>,
    #[serde(alias = "type")]
    category: Option<String>,
    #[serde(alias = "value")]
    amount: Option<f64>,
    #[serde(alias = "returnRate")]
    expected_return: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PortfolioPayload {
    assets: Vec<AssetPayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AmortizationPayload {
    property_value: Option<f64>,
    down_payment: Option<f64>,
    term_years: Option<u32>,
    rate: Option<f64>,
    method: Option<ApiAmortizationMethod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetirementPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    life_expectancy: Option<u32>,
    desired_income: Option<f64>,
    current_net_worth: Option<f64>,
    monthly_contribution: Option<f64>,
    return_rate: Option<f64>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculationResponse<T> {
    result: T,
    chart: ChartData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PortfolioResponse {
    result: PortfolioAllocation,
    allocation_chart: ChartData,
    projection_chart: ChartData,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn growth_inputs_from_payload(
    payload: GrowthPayload,
    defaults: &CalculatorDefaults,
) -> ValidationResult<GrowthInputs> {
    let mut inputs = defaults.growth.clone();
    if let Some(v) = payload.initial_value {
        inputs.initial_value = v;
    }
    if let Some(v) = payload.monthly_contribution {
        inputs.monthly_contribution = v;
    }
    if let Some(v) = payload.rate {
        inputs.rate_percent = v;
    }
    if let Some(v) = payload.period {
        inputs.period_count = v;
    }
    if let Some(v) = payload.period_unit {
        inputs.period_unit = v.into();
    }
    validate_growth(&inputs)?;
    Ok(inputs)
}

fn assets_from_payload(payload: PortfolioPayload) -> ValidationResult<Vec<Asset>> {
    let assets = payload
        .assets
        .into_iter()
        .map(|a| Asset {
            name: a.name.unwrap_or_default(),
            category: a.category.unwrap_or_else(|| "outro".to_string()),
            amount: a.amount.unwrap_or(0.0),
            expected_return: a.expected_return.unwrap_or(0.0),
        })
        .collect();
    retain_valid_assets(assets)
}

fn amortization_inputs_from_payload(
    payload: AmortizationPayload,
    defaults: &CalculatorDefaults,
) -> ValidationResult<AmortizationInputs> {
    let mut inputs = defaults.amortization.clone();
    if let Some(v) = payload.property_value {
        inputs.property_value = v;
    }
    if let Some(v) = payload.down_payment {
        inputs.down_payment = v;
    }
    if let Some(v) = payload.term_years {
        inputs.term_years = v;
    }
    if let Some(v) = payload.rate {
        inputs.annual_rate_percent = v;
    }
    if let Some(v) = payload.method {
        inputs.method = v.into();
    }
    validate_amortization(&inputs)?;
    Ok(inputs)
}

fn retirement_inputs_from_payload(
    payload: RetirementPayload,
    defaults: &CalculatorDefaults,
) -> ValidationResult<RetirementInputs> {
    let mut inputs = defaults.retirement.clone();
    if let Some(v) = payload.current_age {
        inputs.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        inputs.retirement_age = v;
    }
    if let Some(v) = payload.life_expectancy {
        inputs.life_expectancy = v;
    }
    if let Some(v) = payload.desired_income {
        inputs.desired_monthly_income = v;
    }
    if let Some(v) = payload.current_net_worth {
        inputs.current_net_worth = v;
    }
    if let Some(v) = payload.monthly_contribution {
        inputs.monthly_contribution = v;
    }
    if let Some(v) = payload.return_rate {
        inputs.annual_return_percent = v;
    }
    if let Some(v) = payload.inflation_rate {
        inputs.annual_inflation_percent = v;
    }
    validate_retirement(&inputs)?;
    Ok(inputs)
}

pub fn router(defaults: CalculatorDefaults) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/compound-growth",
            get(growth_get_handler).post(growth_post_handler),
        )
        .route("/api/portfolio", post(portfolio_handler))
        .route(
            "/api/amortization",
            get(amortization_get_handler).post(amortization_post_handler),
        )
        .route(
            "/api/retirement",
            get(retirement_get_handler).post(retirement_post_handler),
        )
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(defaults))
}

pub async fn run_http_server(port: u16, defaults: CalculatorDefaults) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(defaults);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "calculator HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/health");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn growth_get_handler(
    State(defaults): State<AppState>,
    payload: Result<Query<GrowthPayload>, QueryRejection>,
) -> Response {
    let payload = payload.map(|Query(payload)| payload).map_err(malformed_query);
    growth_handler_impl(&defaults, payload)
}

async fn growth_post_handler(
    State(defaults): State<AppState>,
    payload: Result<Json<GrowthPayload>, JsonRejection>,
) -> Response {
    let payload = payload.map(|Json(payload)| payload).map_err(malformed_body);
    growth_handler_impl(&defaults, payload)
}

fn growth_handler_impl(
    defaults: &CalculatorDefaults,
    payload: ValidationResult<GrowthPayload>,
) -> Response {
    let inputs = match payload.and_then(|p| growth_inputs_from_payload(p, defaults)) {
        Ok(inputs) => inputs,
        Err(err) => return rejection("compound-growth", &err),
    };
    let projection = compute_compound_growth(&inputs);
    tracing::debug!(
        months = projection.months,
        final_balance = projection.final_balance,
        "computed compound growth"
    );
    json_response(StatusCode::OK, growth_response(projection))
}

async fn portfolio_handler(payload: Result<Json<PortfolioPayload>, JsonRejection>) -> Response {
    let payload = payload.map(|Json(payload)| payload).map_err(malformed_body);
    let assets = match payload.and_then(assets_from_payload) {
        Ok(assets) => assets,
        Err(err) => return rejection("portfolio", &err),
    };
    let allocation = compute_portfolio(&assets);
    tracing::debug!(
        assets = assets.len(),
        weighted_return = allocation.weighted_return,
        "computed portfolio"
    );
    json_response(StatusCode::OK, portfolio_response(allocation))
}

async fn amortization_get_handler(
    State(defaults): State<AppState>,
    payload: Result<Query<AmortizationPayload>, QueryRejection>,
) -> Response {
    let payload = payload.map(|Query(payload)| payload).map_err(malformed_query);
    amortization_handler_impl(&defaults, payload)
}

async fn amortization_post_handler(
    State(defaults): State<AppState>,
    payload: Result<Json<AmortizationPayload>, JsonRejection>,
) -> Response {
    let payload = payload.map(|Json(payload)| payload).map_err(malformed_body);
    amortization_handler_impl(&defaults, payload)
}

fn amortization_handler_impl(
    defaults: &CalculatorDefaults,
    payload: ValidationResult<AmortizationPayload>,
) -> Response {
    let inputs = match payload.and_then(|p| amortization_inputs_from_payload(p, defaults)) {
        Ok(inputs) => inputs,
        Err(err) => return rejection("amortization", &err),
    };
    let schedule = compute_amortization(&inputs);
    tracing::debug!(
        installments = schedule.total_installments,
        total_paid = schedule.total_paid,
        "computed amortization schedule"
    );
    json_response(StatusCode::OK, amortization_response(schedule))
}

async fn retirement_get_handler(
    State(defaults): State<AppState>,
    payload: Result<Query<RetirementPayload>, QueryRejection>,
) -> Response {
    let payload = payload.map(|Query(payload)| payload).map_err(malformed_query);
    retirement_handler_impl(&defaults, payload)
}

async fn retirement_post_handler(
    State(defaults): State<AppState>,
    payload: Result<Json<RetirementPayload>, JsonRejection>,
) -> Response {
    let payload = payload.map(|Json(payload)| payload).map_err(malformed_body);
    retirement_handler_impl(&defaults, payload)
}

fn retirement_handler_impl(
    defaults: &CalculatorDefaults,
    payload: ValidationResult<RetirementPayload>,
) -> Response {
    let inputs = match payload.and_then(|p| retirement_inputs_from_payload(p, defaults)) {
        Ok(inputs) => inputs,
        Err(err) => return rejection("retirement", &err),
    };
    let plan = compute_retirement_plan(&inputs);
    tracing::debug!(
        required = plan.required_net_worth,
        projected = plan.projected_net_worth,
        status = ?plan.status,
        "computed retirement plan"
    );
    json_response(StatusCode::OK, retirement_response(plan))
}

fn growth_response(projection: GrowthProjection) -> CalculationResponse<GrowthProjection> {
    let chart = chart::growth_chart(&projection);
    CalculationResponse {
        result: projection,
        chart,
    }
}

fn portfolio_response(allocation: PortfolioAllocation) -> PortfolioResponse {
    PortfolioResponse {
        allocation_chart: chart::portfolio_allocation_chart(&allocation),
        projection_chart: chart::portfolio_projection_chart(&allocation),
        result: allocation,
    }
}

fn amortization_response(
    schedule: AmortizationSchedule,
) -> CalculationResponse<AmortizationSchedule> {
    let chart = chart::amortization_chart(&schedule);
    CalculationResponse {
        result: schedule,
        chart,
    }
}

fn retirement_response(plan: RetirementPlan) -> CalculationResponse<RetirementPlan> {
    let chart = chart::retirement_chart(&plan);
    CalculationResponse {
        result: plan,
        chart,
    }
}

fn malformed_body(rejection: JsonRejection) -> ValidationError {
    ValidationError::Malformed(rejection.body_text())
}

fn malformed_query(rejection: QueryRejection) -> ValidationError {
    ValidationError::Malformed(rejection.body_text())
}

fn rejection(calculator: &'static str, err: &ValidationError) -> Response {
    tracing::debug!(calculator, %err, "rejected calculator input");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
