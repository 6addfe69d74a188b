use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use role_match::matching::{
    matching_router, EmployeeDirectory, MatchSink, MatchingService, RoleCatalog,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_matching_routes<D, C, S>(
    service: Arc<MatchingService<D, C, S>>,
) -> axum::Router
where
    D: EmployeeDirectory + 'static,
    C: RoleCatalog + 'static,
    S: MatchSink + 'static,
{
    matching_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_employees, demo_roles};
    use crate::infra::{InMemoryEmployeeDirectory, InMemoryMatchSink, InMemoryRoleCatalog};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use role_match::matching::MatchOrchestrator;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<InMemoryMatchSink>) {
        let sink = Arc::new(InMemoryMatchSink::default());
        let service = Arc::new(MatchingService::new(
            Arc::new(InMemoryEmployeeDirectory::with_employees(demo_employees())),
            Arc::new(InMemoryRoleCatalog::with_roles(demo_roles())),
            sink.clone(),
            MatchOrchestrator::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let router = with_matching_routes(service).layer(Extension(state));
        (router, sink)
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_tracks_the_startup_flag() {
        let (router, _) = app(false);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(read_json(response).await["status"], json!("initializing"));

        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn matching_routes_share_the_router() {
        let (router, sink) = app(true);
        let response = router
            .oneshot(
                Request::post("/api/v1/matches/run")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"top_n": 1}"#))
                    .expect("request"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["records_saved"], json!(12));
        assert_eq!(sink.records().len(), 12);
    }
}
