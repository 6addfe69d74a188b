use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{Employee, EmployeeId, Role, RoleId};
use super::insights::{generate_insights, MatchInsights};
use super::orchestrator::BatchMatchReport;
use super::repository::{EmployeeDirectory, MatchSink, RoleCatalog};
use super::scoring::{MatchResult, SoftSkillMode};
use super::service::{MatchingService, MatchingServiceError};
use super::text::DEFAULT_KEY_PHRASES;

/// Router builder exposing the scoring, batch and text-signal endpoints.
pub fn matching_router<D, C, S>(service: Arc<MatchingService<D, C, S>>) -> Router
where
    D: EmployeeDirectory + 'static,
    C: RoleCatalog + 'static,
    S: MatchSink + 'static,
{
    Router::new()
        .route("/api/v1/matches/score", post(score_handler::<D, C, S>))
        .route("/api/v1/matches/batch", post(batch_handler::<D, C, S>))
        .route("/api/v1/matches/run", post(run_handler::<D, C, S>))
        .route(
            "/api/v1/matches/employees/:employee_id/roles/:role_id",
            get(pair_handler::<D, C, S>),
        )
        .route("/api/v1/text/signals", post(signals_handler::<D, C, S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub employee: Employee,
    pub role: Role,
    #[serde(default = "default_include_soft_skills")]
    pub include_soft_skills: bool,
}

fn default_include_soft_skills() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub employees: Vec<Employee>,
    pub roles: Vec<Role>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub report: BatchMatchReport,
    pub insights: MatchInsights,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunRequest {
    pub top_n: Option<usize>,
}

/// Condensed view of a persisted batch run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub records_saved: usize,
    pub employees: usize,
    pub roles: usize,
    pub top_matches: Vec<MatchResult>,
    pub insights: MatchInsights,
}

#[derive(Debug, Deserialize)]
pub struct SignalsRequest {
    pub text: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PairQuery {
    pub include_soft_skills: Option<bool>,
}

pub(crate) async fn score_handler<D, C, S>(
    State(service): State<Arc<MatchingService<D, C, S>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    D: EmployeeDirectory + 'static,
    C: RoleCatalog + 'static,
    S: MatchSink + 'static,
{
    let result = service.orchestrator().engine().score(
        &request.employee,
        &request.role,
        SoftSkillMode::from_flag(request.include_soft_skills),
    );
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn batch_handler<D, C, S>(
    State(service): State<Arc<MatchingService<D, C, S>>>,
    axum::Json(request): axum::Json<BatchRequest>,
) -> Response
where
    D: EmployeeDirectory + 'static,
    C: RoleCatalog + 'static,
    S: MatchSink + 'static,
{
    let top_n = request.top_n.unwrap_or_else(|| service.default_top_n());
    let task = tokio::task::spawn_blocking(move || {
        let report = service
            .orchestrator()
            .match_all(&request.employees, &request.roles, top_n);
        let insights = generate_insights(&report);
        BatchResponse { report, insights }
    });

    match task.await {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(join_error) => internal_error(join_error.to_string()),
    }
}

pub(crate) async fn run_handler<D, C, S>(
    State(service): State<Arc<MatchingService<D, C, S>>>,
    request: Option<axum::Json<RunRequest>>,
) -> Response
where
    D: EmployeeDirectory + 'static,
    C: RoleCatalog + 'static,
    S: MatchSink + 'static,
{
    let request = request.map(|axum::Json(inner)| inner).unwrap_or_default();
    let top_n = request.top_n.unwrap_or_else(|| service.default_top_n());
    let task = tokio::task::spawn_blocking(move || service.run_batch(top_n));

    match task.await {
        Ok(Ok(run)) => {
            let summary = RunSummary {
                started_at: run.started_at,
                records_saved: run.records_saved,
                employees: run.report.employee_to_role.len(),
                roles: run.report.role_to_employee.len(),
                top_matches: run.report.all_matches.iter().take(top_n).cloned().collect(),
                insights: generate_insights(&run.report),
            };
            (StatusCode::OK, axum::Json(summary)).into_response()
        }
        Ok(Err(service_error)) => service_error_response(service_error),
        Err(join_error) => internal_error(join_error.to_string()),
    }
}

pub(crate) async fn pair_handler<D, C, S>(
    State(service): State<Arc<MatchingService<D, C, S>>>,
    Path((employee_id, role_id)): Path<(String, String)>,
    query: Option<axum::extract::Query<PairQuery>>,
) -> Response
where
    D: EmployeeDirectory + 'static,
    C: RoleCatalog + 'static,
    S: MatchSink + 'static,
{
    let include_soft_skills = query
        .and_then(|axum::extract::Query(query)| query.include_soft_skills)
        .unwrap_or(true);
    let employee_id = EmployeeId(employee_id);
    let role_id = RoleId(role_id);

    match service.score_pair(&employee_id, &role_id, include_soft_skills) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(other) => service_error_response(other),
    }
}

pub(crate) async fn signals_handler<D, C, S>(
    State(service): State<Arc<MatchingService<D, C, S>>>,
    axum::Json(request): axum::Json<SignalsRequest>,
) -> Response
where
    D: EmployeeDirectory + 'static,
    C: RoleCatalog + 'static,
    S: MatchSink + 'static,
{
    let limit = request.limit.unwrap_or(DEFAULT_KEY_PHRASES);
    let report = service
        .orchestrator()
        .engine()
        .text()
        .report(&request.text, limit);
    (StatusCode::OK, axum::Json(report)).into_response()
}

fn service_error_response(service_error: MatchingServiceError) -> Response {
    if service_error.is_not_found() {
        let payload = json!({
            "error": "employee or role not found",
        });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    }
    internal_error(service_error.to_string())
}

fn internal_error(message: String) -> Response {
    error!(error = %message, "matching request failed");
    let payload = json!({
        "error": message,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
