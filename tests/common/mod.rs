//! In-process stand-in for the MangaCat API used by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};

use mcmanager::Res;
use mcmanager::config::Config;
use mcmanager::credentials::Prompter;
use mcmanager::mangacat::ApiClient;
use mcmanager::sniff::{ImageFile, Sniffer};

pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x10";

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// 200 with an empty body
    Empty,
    Text(String),
    Status(u16, Value),
    /// Status without a body
    Bare(u16),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(body) => (StatusCode::OK, Json(body)).into_response(),
            Reply::Empty => StatusCode::OK.into_response(),
            Reply::Text(body) => (StatusCode::OK, body).into_response(),
            Reply::Status(code, body) => {
                let status = StatusCode::from_u16(code).unwrap();
                (status, Json(body)).into_response()
            }
            Reply::Bare(code) => StatusCode::from_u16(code).unwrap().into_response(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonRequest {
    pub path: String,
    pub body: Value,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Debug, Clone)]
pub struct Batch {
    pub chapter: u64,
    pub files: Vec<UploadedFile>,
    pub authorization: Option<String>,
}

/// Scripted replies and everything the fake API has received.
///
/// Replies are consumed in order; once a queue is empty the fake answers
/// with a small JSON object.
#[derive(Default)]
pub struct FakeApi {
    pub json_replies: Mutex<VecDeque<Reply>>,
    pub batch_replies: Mutex<VecDeque<Reply>>,
    pub json_requests: Mutex<Vec<JsonRequest>>,
    pub batches: Mutex<Vec<Batch>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply_json(&self, reply: Reply) {
        self.json_replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_batch(&self, reply: Reply) {
        self.batch_replies.lock().unwrap().push_back(reply);
    }

    pub fn json_requests(&self) -> Vec<JsonRequest> {
        self.json_requests.lock().unwrap().clone()
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches().iter().map(|b| b.files.len()).collect()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn json_endpoint(
    State(api): State<Arc<FakeApi>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    api.json_requests.lock().unwrap().push(JsonRequest {
        path: uri.path().to_string(),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
        authorization: header(&headers, "authorization"),
        user_agent: header(&headers, "user-agent"),
    });
    let reply = api.json_replies.lock().unwrap().pop_front();
    reply.unwrap_or(Reply::Json(json!({}))).into_response()
}

async fn upload_endpoint(
    State(api): State<Arc<FakeApi>>,
    Path(chapter): Path<u64>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut files = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
        files.push(UploadedFile {
            field: name,
            file_name,
            content_type,
            size,
        });
    }

    api.batches.lock().unwrap().push(Batch {
        chapter,
        files,
        authorization: header(&headers, "authorization"),
    });
    let reply = api.batch_replies.lock().unwrap().pop_front();
    reply.unwrap_or(Reply::Json(json!({"ok": true}))).into_response()
}

/// Serves `api` on a free local port and returns its base URL.
pub async fn spawn(api: Arc<FakeApi>) -> String {
    let app = Router::new()
        .route("/auth/login", post(json_endpoint))
        .route("/series_chapters", post(json_endpoint))
        .route("/series_chapters/{id}", post(upload_endpoint))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a local port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(api_url: &str, netrc_path: PathBuf) -> Config {
    Config {
        api_url: api_url.to_string(),
        netrc_path,
        user_agent: "mcmanager/test".to_string(),
    }
}

/// Client for `config` that never goes through a system proxy.
pub fn test_client(config: &Config) -> ApiClient {
    let client = reqwest::Client::builder()
        .no_proxy()
        .user_agent(&config.user_agent)
        .build()
        .unwrap();
    ApiClient::with_client(client, config)
}

/// Writes `count` small PNG files and returns their paths in order.
pub fn write_pages(dir: &tempfile::TempDir, count: usize) -> Vec<PathBuf> {
    (1..=count)
        .map(|n| {
            let path = dir.path().join(format!("page_{:02}.png", n));
            std::fs::write(&path, PNG).unwrap();
            path
        })
        .collect()
}

pub fn open_pages(paths: &[PathBuf]) -> Vec<ImageFile> {
    let sniffer = Sniffer::standard();
    paths
        .iter()
        .map(|p| ImageFile::open(p, &sniffer).unwrap())
        .collect()
}

/// Fails the test if anything is prompted for.
pub struct NoPrompter;

impl Prompter for NoPrompter {
    fn input(&mut self, prompt: &str) -> Res<String> {
        panic!("unexpected prompt: {}", prompt)
    }

    fn password(&mut self, prompt: &str) -> Res<String> {
        panic!("unexpected password prompt: {}", prompt)
    }
}
