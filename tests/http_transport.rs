use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use intentlink_planner::oracle::{HttpTransport, OracleTransport};
use intentlink_planner::OracleError;

async fn echo_token(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"code": 1, "result": {"access_token": "tok", "echo": body}}))
}

async fn echo_token_security(
    Path(chain): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({"chain": chain, "query": query, "authorization": auth}))
}

async fn unavailable() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "oracle down")
}

/// Serves the oracle routes on an ephemeral port and returns the base URL,
/// with a trailing slash the transport has to strip.
async fn serve_oracle() -> String {
    let app = Router::new()
        .route("/api/v1/token", post(echo_token))
        .route("/api/v1/token_security/:chain", get(echo_token_security))
        .route("/api/v1/address_security/:addr", get(unavailable));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/v1/")
}

fn transport(base_url: String) -> HttpTransport {
    HttpTransport::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn post_joins_path_onto_trimmed_base_url() {
    let oracle = transport(serve_oracle().await);

    let body = oracle
        .post_json("/token", &json!({"app_key": "k", "app_secret": "s"}))
        .await
        .unwrap();
    assert_eq!(body["result"]["access_token"], "tok");
    assert_eq!(body["result"]["echo"], json!({"app_key": "k", "app_secret": "s"}));
}

#[tokio::test]
async fn get_encodes_query_and_bearer() {
    let oracle = transport(serve_oracle().await);

    let body = oracle
        .get_json(
            "/token_security/1043",
            &[("contract_addresses", "0xAbC&x=1")],
            Some("tok"),
        )
        .await
        .unwrap();
    assert_eq!(body["chain"], "1043");
    assert_eq!(body["query"]["contract_addresses"], "0xAbC&x=1");
    assert!(body["query"].get("x").is_none());
    assert_eq!(body["authorization"], "Bearer tok");
}

#[tokio::test]
async fn get_without_token_sends_no_authorization() {
    let oracle = transport(serve_oracle().await);

    let body = oracle
        .get_json("/token_security/1", &[("contract_addresses", "0x1")], None)
        .await
        .unwrap();
    assert!(body["authorization"].is_null());
}

#[tokio::test]
async fn non_success_status_keeps_code_and_body() {
    let oracle = transport(serve_oracle().await);

    let err = oracle
        .get_json("/address_security/0xdep", &[("chain_id", "1043")], None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OracleError::Status {
            status: 503,
            body: "oracle down".to_string()
        }
    );

    let err = oracle.post_json("/missing", &json!({})).await.unwrap_err();
    assert!(matches!(err, OracleError::Status { status: 404, .. }));
}
