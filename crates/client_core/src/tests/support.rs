//! In-process stand-in for the analysis service.

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

#[derive(Clone, Default)]
pub struct MockService {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<String, CannedResponse>>>,
}

impl MockService {
    pub async fn respond_json(&self, path: &str, status: StatusCode, body: Value) {
        self.responses.lock().await.insert(
            path.to_string(),
            CannedResponse {
                status,
                content_type: "application/json",
                body: body.to_string().into_bytes(),
            },
        );
    }

    pub async fn respond_raw(
        &self,
        path: &str,
        status: StatusCode,
        content_type: &'static str,
        body: &[u8],
    ) {
        self.responses.lock().await.insert(
            path.to_string(),
            CannedResponse {
                status,
                content_type,
                body: body.to_vec(),
            },
        );
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|request| request.path == path)
            .cloned()
            .collect()
    }
}

async fn handle(
    State(mock): State<MockService>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    mock.requests.lock().await.push(RecordedRequest {
        method,
        path: path.clone(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let canned = mock.responses.lock().await.get(&path).cloned();
    match canned {
        Some(canned) => (
            canned.status,
            [(header::CONTENT_TYPE, canned.content_type)],
            canned.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no canned response for {path}") })),
        )
            .into_response(),
    }
}

pub async fn spawn_mock_service() -> Result<(String, MockService)> {
    let mock = MockService::default();
    let app = Router::new().fallback(handle).with_state(mock.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((format!("http://{addr}"), mock))
}
