//! AWS Lambda HTTP entry point exposing both cores
//!
//! POST /projection    {principal, periodicRate | strategy, periods}
//! POST /records/page  {records: [...], query: {...}, searchFields?: [...]}

use lambda_http::http::{Method, StatusCode};
use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use quantdesk::config::ConsoleConfig;
use quantdesk::listing::{ListQuery, SearchScope, TabularListController};
use quantdesk::projection::{ProjectorConfig, ReturnProjector, StrategyPreset};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionRequest {
    principal: f64,
    #[serde(default)]
    periodic_rate: Option<f64>,
    #[serde(default)]
    strategy: Option<StrategyPreset>,
    periods: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRequestBody {
    records: Vec<Value>,
    query: ListQuery,
    #[serde(default)]
    search_fields: Option<Vec<String>>,
}

struct ApiState {
    projector: ReturnProjector,
    controller: TabularListController,
}

impl ApiState {
    fn from_config(config: &ConsoleConfig) -> Result<Self, Error> {
        Ok(Self {
            projector: ReturnProjector::new(ProjectorConfig::from_settings(&config.projector)),
            controller: TabularListController::from_settings(&config.listing)?,
        })
    }
}

fn error_body(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string() })
}

fn projection(state: &ApiState, body: &[u8]) -> (StatusCode, Value) {
    let request: ProjectionRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => return (StatusCode::BAD_REQUEST, error_body(err)),
    };
    let result = match (request.periodic_rate, request.strategy) {
        (Some(rate), None) => state.projector.project(request.principal, rate, request.periods),
        (None, Some(preset)) => state.projector.project_preset(request.principal, preset, request.periods),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                error_body("exactly one of periodicRate or strategy is required"),
            )
        }
    };
    match result {
        Ok(result) => (
            StatusCode::OK,
            json!({
                "trajectory": result.trajectory,
                "summary": result.summary,
                "averagePeriodicProfit": result.average_periodic_profit(),
            }),
        ),
        Err(err) => (StatusCode::BAD_REQUEST, error_body(err)),
    }
}

fn records_page(state: &ApiState, body: &[u8]) -> (StatusCode, Value) {
    let request: PageRequestBody = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => return (StatusCode::BAD_REQUEST, error_body(err)),
    };
    let controller = match request.search_fields {
        Some(fields) => state.controller.clone().with_scope(SearchScope::from_fields(&fields)),
        None => state.controller.clone(),
    };
    match controller.visible_page(&request.records, &request.query) {
        Ok(page) => (
            StatusCode::OK,
            json!({
                "records": page.records,
                "totalMatched": page.total_matched,
                "pageCount": page.page_count(request.query.page.size),
            }),
        ),
        Err(err) => (StatusCode::BAD_REQUEST, error_body(err)),
    }
}

fn route(state: &ApiState, method: &Method, path: &str, body: &[u8]) -> (StatusCode, Value) {
    let path = path.trim_end_matches('/');
    let handler: fn(&ApiState, &[u8]) -> (StatusCode, Value) = if path.ends_with("/projection") {
        projection
    } else if path.ends_with("/records/page") {
        records_page
    } else {
        return (StatusCode::NOT_FOUND, error_body(format!("no route for {}", path)));
    };
    if *method != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, error_body(format!("{} not allowed", method)));
    }
    handler(state, body)
}

fn handle(state: &ApiState, event: Request) -> Result<Response<Body>, Error> {
    let body: &[u8] = event.body().as_ref();
    let (status, payload) = route(state, event.method(), event.uri().path(), body);
    if status.is_success() {
        log::debug!("{} {} -> {}", event.method(), event.uri().path(), status);
    } else {
        log::warn!("{} {} -> {}: {}", event.method(), event.uri().path(), status, payload);
    }

    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let config = ConsoleConfig::from_env()?;
    let state = Arc::new(ApiState::from_config(&config)?);

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { handle(&state, event) }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ApiState {
        ApiState::from_config(&ConsoleConfig::default()).unwrap()
    }

    #[test]
    fn test_projection_route() {
        let body = br#"{ "principal": 10000, "periodicRate": 0.5, "periods": 12 }"#;
        let (status, payload) = route(&state(), &Method::POST, "/prod/projection", body);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["summary"]["finalBalance"], json!(1297463.38));
        assert_eq!(payload["trajectory"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_projection_by_strategy() {
        let body = br#"{ "principal": 1000, "strategy": "conservative", "periods": 1 }"#;
        let (status, payload) = route(&state(), &Method::POST, "/projection", body);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["summary"]["totalProfit"], json!(500.0));
    }

    #[test]
    fn test_projection_rejects_bad_input() {
        let negative = br#"{ "principal": -1, "periodicRate": 0.1, "periods": 5 }"#;
        assert_eq!(route(&state(), &Method::POST, "/projection", negative).0, StatusCode::BAD_REQUEST);

        let both = br#"{ "principal": 1, "periodicRate": 0.1, "strategy": "balanced", "periods": 5 }"#;
        assert_eq!(route(&state(), &Method::POST, "/projection", both).0, StatusCode::BAD_REQUEST);

        assert_eq!(route(&state(), &Method::POST, "/projection", b"nope").0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_records_page_route() {
        let body = br#"{
            "records": [
                { "id": 1, "status": "active" },
                { "id": 2, "status": "inactive" },
                { "id": 3, "status": "active" }
            ],
            "query": { "filters": { "status": "active" }, "page": { "index": 0, "size": 10 } }
        }"#;
        let (status, payload) = route(&state(), &Method::POST, "/records/page", body);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["totalMatched"], json!(2));
        assert_eq!(payload["records"][1]["id"], json!(3));
        assert_eq!(payload["pageCount"], json!(1));
    }

    #[test]
    fn test_records_page_zero_size() {
        let body = br#"{ "records": [], "query": { "page": { "index": 0, "size": 0 } } }"#;
        let (status, _) = route(&state(), &Method::POST, "/records/page", body);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_route_and_method() {
        assert_eq!(route(&state(), &Method::POST, "/users", b"{}").0, StatusCode::NOT_FOUND);
        assert_eq!(route(&state(), &Method::GET, "/projection", b"").0, StatusCode::METHOD_NOT_ALLOWED);
    }
}
