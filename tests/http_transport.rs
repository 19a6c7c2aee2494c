// MCP JSON-RPC over HTTP: session lifecycle and tool calls

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use binance_mcp::transport::http::session::SessionStore;
use binance_mcp::transport::http::{router, AppState};
use common::MockExchange;
use serde_json::{json, Value};
use tower::ServiceExt;

const SESSION_HEADER: &str = "mcp-session-id";

fn app(mock: &MockExchange, max_sessions: usize) -> Router {
    router(AppState::new(SessionStore::new(max_sessions), mock.dispatcher()))
}

async fn post(
    app: &Router,
    session: Option<&str>,
    body: String,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json");
    if let Some(session) = session {
        builder = builder.header(SESSION_HEADER, session);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let session_id = response
        .headers()
        .get(SESSION_HEADER)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, session_id, body)
}

async fn rpc(
    app: &Router,
    session: Option<&str>,
    id: u64,
    method: &str,
    params: Value,
) -> (StatusCode, Value) {
    let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
    let (status, _, body) = post(app, session, body.to_string()).await;
    (status, body)
}

async fn initialize(app: &Router) -> String {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "clientInfo": { "name": "test", "version": "0" }
        }
    });
    let (status, header, body) = post(app, None, body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let session = header.expect("initialize must return Mcp-Session-Id");
    assert_eq!(body["result"]["sessionId"], session.as_str());
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(body["result"]["serverInfo"]["name"], "binance-mcp");
    assert!(body["result"]["capabilities"]["tools"].is_object());
    session
}

#[tokio::test]
async fn test_tools_list_requires_session() {
    let mock = MockExchange::start().await;
    let app = app(&mock, 10);

    let (status, body) = rpc(&app, None, 2, "tools/list", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], -32002);
    assert_eq!(body["id"], 2);

    let unknown = uuid::Uuid::new_v4().to_string();
    let (status, body) = rpc(&app, Some(&unknown), 3, "tools/list", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], -32002);
}

#[tokio::test]
async fn test_session_flow_lists_tools() {
    let mock = MockExchange::start().await;
    let app = app(&mock, 10);
    let session = initialize(&app).await;

    let (status, body) = rpc(&app, Some(&session), 2, "tools/list", json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let tools = body["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 17);
    let klines = tools.iter().find(|t| t["name"] == "get_klines").unwrap();
    assert_eq!(klines["inputSchema"]["type"], "object");
    assert!(klines["description"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn test_tools_call_success() {
    let mock = MockExchange::start().await;
    mock.respond(
        "/api/v3/ticker/price",
        200,
        json!({ "symbol": "BTCUSDT", "price": "43250.50" }),
    );
    let app = app(&mock, 10);
    let session = initialize(&app).await;

    let (status, body) = rpc(
        &app,
        Some(&session),
        5,
        "tools/call",
        json!({ "name": "get_price", "arguments": { "symbol": "BTCUSDT" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 5);
    assert_eq!(body["result"]["isError"], false);
    assert_eq!(body["result"]["content"][0]["type"], "text");

    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    let price: Value = serde_json::from_str(text).unwrap();
    assert_eq!(price["price"], "43250.50");
}

#[tokio::test]
async fn test_tools_call_failure_is_in_band() {
    let mock = MockExchange::start().await;
    let app = app(&mock, 10);
    let session = initialize(&app).await;

    let (status, body) = rpc(
        &app,
        Some(&session),
        6,
        "tools/call",
        json!({ "name": "get_funding_rate", "arguments": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("error").is_none());
    assert_eq!(body["result"]["isError"], true);
    assert!(body["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("Unknown tool: get_funding_rate"));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_tools_call_without_name_is_invalid_params() {
    let mock = MockExchange::start().await;
    let app = app(&mock, 10);
    let session = initialize(&app).await;

    let params = json!({ "arguments": {} });
    let (status, body) = rpc(&app, Some(&session), 7, "tools/call", params).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32602);
}

#[tokio::test]
async fn test_session_limit() {
    let mock = MockExchange::start().await;
    let app = app(&mock, 1);
    initialize(&app).await;

    let (status, body) = rpc(&app, None, 2, "initialize", json!({})).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], -32000);
    assert_eq!(body["error"]["data"]["max_sessions"], 1);
}

#[tokio::test]
async fn test_notification_and_ping() {
    let mock = MockExchange::start().await;
    let app = app(&mock, 10);

    let notification = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
    let (status, _, body) = post(&app, None, notification.to_string()).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(body.is_null());

    let (status, body) = rpc(&app, None, 9, "ping", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn test_null_id_gets_a_response() {
    let mock = MockExchange::start().await;
    let app = app(&mock, 10);

    let request = json!({ "jsonrpc": "2.0", "id": null, "method": "ping" });
    let (status, _, body) = post(&app, None, request.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert!(body["id"].is_null());
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn test_malformed_and_unknown_requests() {
    let mock = MockExchange::start().await;
    let app = app(&mock, 10);

    let (status, _, body) = post(&app, None, "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["id"].is_null());

    let (status, body) = rpc(&app, None, 4, "resources/list", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], -32601);
}
