use crate::infra::{AppState, JobData};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use job_insights::error::AppError;
use job_insights::postings::export::write_csv;
use job_insights::postings::report::{JobReport, JobReportSummary};
use job_insights::postings::{FilterParams, PostingFilter};
use serde_json::json;

pub(crate) fn job_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/jobs/report", axum::routing::get(report_endpoint))
        .route("/api/v1/jobs/export", axum::routing::get(export_endpoint))
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

pub(crate) async fn report_endpoint(
    Extension(data): Extension<JobData>,
    Query(params): Query<FilterParams>,
) -> Result<Json<JobReportSummary>, AppError> {
    let filter = PostingFilter::try_from(params)?;
    let view = data.table.filter(&filter);
    Ok(Json(JobReport::build(&view, &data.report)))
}

pub(crate) async fn export_endpoint(
    Extension(data): Extension<JobData>,
    Query(params): Query<FilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = PostingFilter::try_from(params)?;
    let view = data.table.filter(&filter);

    let mut body = Vec::new();
    write_csv(&view, data.table.columns(), &mut body)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"job_postings_cleaned.csv\"",
            ),
        ],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use job_insights::config::ReportConfig;
    use job_insights::postings::{Extractor, JobTable};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SAMPLE: &str = "title,company,description\n\
        Accounts Officer,ABC Ltd,\"Port Louis 15,000 - 25,000 Permanent Added 15/03/2023\"\n\
        Sales Executive,Beta,Moka Negotiable Permanent\n\
        Driver,Gamma,\"Flacq MUR 12,000 Contract\"\n";

    fn app(ready: bool) -> axum::Router {
        let table =
            JobTable::from_reader(SAMPLE.as_bytes(), &Extractor::default()).expect("table loads");
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        job_routes()
            .layer(Extension(JobData::new(table, ReportConfig::default())))
            .layer(Extension(state))
    }

    async fn get(router: axum::Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("router responds")
    }

    async fn read_body(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable")
            .to_vec()
    }

    #[tokio::test]
    async fn health_and_readiness() {
        let response = get(app(true), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(app(false), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = serde_json::from_slice(&read_body(response).await).expect("json body");
        assert_eq!(body["status"], "initializing");
    }

    #[tokio::test]
    async fn report_route_returns_full_report() {
        let response = get(app(true), "/api/v1/jobs/report").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&read_body(response).await).expect("json body");
        assert_eq!(body["overview"]["total_postings"], 3);
        assert_eq!(body["overview"]["salaried_postings"], 2);
        assert_eq!(body["salary"]["summary"]["max"], 20_000.0);
    }

    #[tokio::test]
    async fn report_route_applies_filters() {
        let response = get(
            app(true),
            "/api/v1/jobs/report?disclosure=numeric&location=port_louis",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&read_body(response).await).expect("json body");
        assert_eq!(body["overview"]["total_postings"], 1);
        assert_eq!(body["locations"][0]["location_label"], "Port Louis");
    }

    #[tokio::test]
    async fn report_route_rejects_unknown_filter_values() {
        let response = get(app(true), "/api/v1/jobs/report?job_type=freelance").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&read_body(response).await).expect("json body");
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("freelance"));
    }

    #[tokio::test]
    async fn export_route_streams_csv() {
        let response = get(app(true), "/api/v1/jobs/export?min_salary=15000").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );

        let body = String::from_utf8(read_body(response).await).expect("utf-8 csv");
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("title,company,description,salary_extracted"));
        assert!(lines[1].starts_with("Accounts Officer,ABC Ltd,"));
    }
}
