//! In-process fake of the contents API for client tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use seminar_core::document::{decode_content, encode_content, VersionToken};

const OWNER: &str = "weizmann";
const REPO: &str = "seminar";
const DOCUMENT_PATH: &str = "data/schedule.json";

struct FakeRepo {
    content: String,
    revision: u32,
    last_message: Option<String>,
}

impl FakeRepo {
    fn sha(&self) -> String {
        format!("sha-{}", self.revision)
    }
}

#[derive(Clone)]
struct FakeState {
    repo: Arc<Mutex<FakeRepo>>,
}

#[derive(Deserialize)]
struct PutBody {
    message: String,
    content: String,
    sha: String,
}

/// A running fake serving one document at `data/schedule.json`.
pub struct FakeContentsApi {
    addr: SocketAddr,
    state: FakeState,
}

impl FakeContentsApi {
    pub const TOKEN: &'static str = "test-token";

    pub async fn start(content: &str) -> Self {
        let state = FakeState {
            repo: Arc::new(Mutex::new(FakeRepo {
                content: content.to_string(),
                revision: 1,
                last_message: None,
            })),
        };

        let app = Router::new()
            .route("/repos/{owner}/{repo}", get(repo_metadata))
            .route(
                "/repos/{owner}/{repo}/contents/{*path}",
                get(read_contents).put(update_contents),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn current_version(&self) -> VersionToken {
        VersionToken::new(self.state.repo.lock().unwrap().sha())
    }

    pub fn content(&self) -> String {
        self.state.repo.lock().unwrap().content.clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.state.repo.lock().unwrap().last_message.clone()
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", FakeContentsApi::TOKEN))
}

fn known_repo(owner: &str, repo: &str) -> bool {
    owner == OWNER && repo == REPO
}

async fn repo_metadata(
    State(_): State<FakeState>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Bad credentials");
    }
    if !known_repo(&owner, &repo) {
        return message(StatusCode::NOT_FOUND, "Not Found");
    }
    Json(json!({
        "full_name": format!("{owner}/{repo}"),
        "default_branch": "main",
        "private": false
    }))
    .into_response()
}

async fn read_contents(
    State(state): State<FakeState>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Bad credentials");
    }
    if !known_repo(&owner, &repo) || path != DOCUMENT_PATH {
        return message(StatusCode::NOT_FOUND, "Not Found");
    }

    let repo = state.repo.lock().unwrap();
    // The real API wraps base64 at 60 columns.
    let encoded = encode_content(&repo.content);
    let wrapped = encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join("\n");

    (
        [(header::LAST_MODIFIED, "Wed, 13 Mar 2024 10:00:00 GMT")],
        Json(json!({
            "type": "file",
            "encoding": "base64",
            "path": path,
            "sha": repo.sha(),
            "size": repo.content.len(),
            "content": wrapped
        })),
    )
        .into_response()
}

async fn update_contents(
    State(state): State<FakeState>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<PutBody>,
) -> Response {
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Bad credentials");
    }
    if !known_repo(&owner, &repo) || path != DOCUMENT_PATH {
        return message(StatusCode::NOT_FOUND, "Not Found");
    }

    let mut repo = state.repo.lock().unwrap();
    if body.sha != repo.sha() {
        return message(
            StatusCode::CONFLICT,
            &format!("{path} does not match {}", body.sha),
        );
    }

    let Ok(content) = decode_content(&body.content) else {
        return message(StatusCode::BAD_REQUEST, "content is not valid Base64");
    };
    repo.content = content;
    repo.revision += 1;
    repo.last_message = Some(body.message);

    Json(json!({
        "content": { "path": path, "sha": repo.sha() },
        "commit": { "sha": format!("commit-{}", repo.revision) }
    }))
    .into_response()
}
