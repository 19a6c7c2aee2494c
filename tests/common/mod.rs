//! Local stand-in for the Binance REST API
//!
//! Binds an axum server to an ephemeral loopback port, records every request
//! it receives and answers from a per-path table of canned responses.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use binance_mcp::binance::{BinanceClient, API_KEY_HEADER};
use binance_mcp::config::{Credentials, ExchangeConfig};
use binance_mcp::tools::ToolDispatcher;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "test-api-key";
pub const SECRET_KEY: &str = "test-secret-key";

/// One request as the exchange saw it
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl CapturedRequest {
    /// The parameter string, from the URL or the form body
    pub fn params(&self) -> String {
        match &self.query {
            Some(query) => query.clone(),
            None => self.body.clone(),
        }
    }

    /// Parameter names in wire order
    pub fn param_keys(&self) -> Vec<String> {
        url::form_urlencoded::parse(self.params().as_bytes())
            .map(|(k, _)| k.into_owned())
            .collect()
    }

    pub fn param(&self, key: &str) -> Option<String> {
        url::form_urlencoded::parse(self.params().as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
}

pub struct MockExchange {
    pub base_url: String,
    state: MockState,
}

impl MockExchange {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(capture).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Answers `path` with `status` and a JSON body
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.respond_raw(path, status, body.to_string());
    }

    pub fn respond_raw(&self, path: &str, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.into()));
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> CapturedRequest {
        self.requests().pop().expect("no request reached the mock exchange")
    }

    pub fn client(&self) -> BinanceClient {
        BinanceClient::new(
            ExchangeConfig::with_base_url(&self.base_url),
            Credentials::new(API_KEY, SECRET_KEY),
        )
        .unwrap()
    }

    pub fn dispatcher(&self) -> ToolDispatcher {
        ToolDispatcher::new(self.client())
    }
}

async fn capture(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let captured = CapturedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        api_key: header_value(API_KEY_HEADER),
        content_type: header_value(header::CONTENT_TYPE.as_str()),
        body,
    };

    let path = captured.path.clone();
    state.requests.lock().unwrap().push(captured);

    let (status, body) = state
        .responses
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or((StatusCode::OK, "{}".to_string()));

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from(body),
    )
        .into_response()
}
