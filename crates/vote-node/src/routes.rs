use crate::constants::INDEX_FILE;
use crate::mirror::MirrorHandle;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, sync::Arc};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::debug;
use vote_core::{Block, Election, IntakeError, ValidationFailure};

#[derive(Clone)]
pub struct AppState {
    pub election: Arc<Election>,
    pub mirror: MirrorHandle,
}

impl AppState {
    /// Mirrors the election's genesis first, so each node run in a shared mirror
    /// starts at its own genesis record.
    pub fn new(election: Arc<Election>, mirror: MirrorHandle) -> Self {
        mirror.submit(election.genesis());
        Self { election, mirror }
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Serialize)]
struct Head {
    height: u64,
    hash: String,
    voters: usize,
}

#[derive(Deserialize)]
struct RegisterIn {
    #[serde(default)]
    voter_id: String,
}

#[derive(Deserialize)]
struct VoteIn {
    #[serde(default)]
    voter_id: String,
    #[serde(default)]
    candidate: String,
}

#[derive(Serialize)]
struct Registered {
    message: &'static str,
    fingerprint: String,
}

#[derive(Serialize)]
struct VoteCast {
    message: &'static str,
    block: Block,
}

#[derive(Serialize)]
struct Verification {
    valid: bool,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<ValidationFailure>,
}

/// Request failures, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Intake(IntakeError),
    BadBody(String),
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        ApiError::Intake(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Intake(err) => {
                let status = match err {
                    IntakeError::MissingField(_) | IntakeError::AlreadyRegistered => {
                        StatusCode::BAD_REQUEST
                    }
                    IntakeError::NotRegistered | IntakeError::DuplicateVote => {
                        StatusCode::FORBIDDEN
                    }
                };
                (status, err.to_string())
            }
            ApiError::BadBody(text) => (StatusCode::BAD_REQUEST, text),
        };
        debug!(%status, %message, "request rejected");
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(Health { status: "ok" }) }))
        .route("/register", post(register))
        .route("/vote", post(vote))
        .route("/chain", get(chain))
        .route("/chain/head", get(head))
        .route("/chain/verify", get(verify))
        .route("/results", get(results))
        .route_service("/", ServeFile::new(public_dir.join(INDEX_FILE)))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterIn>, JsonRejection>,
) -> Result<(StatusCode, Json<Registered>), ApiError> {
    let Json(req) = body?;
    let fingerprint = state.election.register(&req.voter_id)?;
    Ok((
        StatusCode::CREATED,
        Json(Registered {
            message: "Voter registered successfully",
            fingerprint: fingerprint.to_string(),
        }),
    ))
}

async fn vote(
    State(state): State<AppState>,
    body: Result<Json<VoteIn>, JsonRejection>,
) -> Result<Json<VoteCast>, ApiError> {
    let Json(req) = body?;
    let block = state.election.cast_vote(&req.voter_id, &req.candidate)?;
    state.mirror.submit(block.clone());
    Ok(Json(VoteCast {
        message: "Vote cast successfully",
        block,
    }))
}

async fn chain(State(state): State<AppState>) -> Json<Vec<Block>> {
    Json(state.election.snapshot())
}

async fn head(State(state): State<AppState>) -> Json<Head> {
    let head = state.election.head();
    Json(Head {
        height: head.height,
        hash: head.hash,
        voters: state.election.voter_count(),
    })
}

async fn verify(State(state): State<AppState>) -> Json<Verification> {
    let status = state.election.status();
    Json(Verification {
        valid: status.failure.is_none(),
        length: status.length,
        failure: status.failure,
    })
}

async fn results(State(state): State<AppState>) -> Json<BTreeMap<String, u64>> {
    Json(state.election.results())
}
