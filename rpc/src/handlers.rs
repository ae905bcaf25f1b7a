//! RPC request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use journal_chain::{RawResource, TxHandle};
use journal_service::{IdeaService, NewIdea, Submission};
use journal_types::{Idea, IdeaId, TxHash};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RpcError;

pub type AppState = Arc<IdeaService>;

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub external_mode: bool,
}

/// GET /api/health
pub async fn health(State(service): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        external_mode: service.external_mode(),
    })
}

// ── Ideas ────────────────────────────────────────────────────────────────

/// Body of POST /api/ideas. Missing fields count as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateIdeaRequest {
    pub title: String,
    pub description: String,
    #[serde(alias = "journalOwner")]
    pub author_hint: Option<String>,
}

/// Acknowledgement of a ledger transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    pub ok: bool,
    pub tx_hash: TxHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl From<TxHandle> for TxResponse {
    fn from(handle: TxHandle) -> Self {
        Self {
            ok: true,
            tx_hash: handle.hash,
            version: handle.version,
        }
    }
}

/// An idea in local mode, a transaction acknowledgement in external mode.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SubmissionResponse {
    Idea(Idea),
    Tx(TxResponse),
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        match submission {
            Submission::Idea(idea) => SubmissionResponse::Idea(idea),
            Submission::Tx(handle) => SubmissionResponse::Tx(handle.into()),
        }
    }
}

fn parse_id(raw: &str) -> Result<IdeaId, RpcError> {
    raw.parse::<IdeaId>()
        .map_err(|e| RpcError::InvalidRequest(e.to_string()))
}

/// GET /api/ideas
pub async fn list_ideas(State(service): State<AppState>) -> Result<Json<Vec<Idea>>, RpcError> {
    debug!("API /ideas");
    Ok(Json(service.list_ideas()?))
}

/// POST /api/ideas
/// Request body: { "title": "...", "description": "...", "authorHint": "0x..." }
pub async fn create_idea(
    State(service): State<AppState>,
    body: Result<Json<CreateIdeaRequest>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, RpcError> {
    let Json(request) = body.map_err(|e| RpcError::InvalidRequest(e.body_text()))?;
    debug!(title = %request.title, "API create idea");

    let submission = service
        .submit_idea(NewIdea {
            title: request.title,
            description: request.description,
            author_hint: request.author_hint,
        })
        .await?;
    Ok(Json(submission.into()))
}

/// POST /api/ideas/:id/vote
pub async fn vote(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionResponse>, RpcError> {
    let id = parse_id(&id)?;
    debug!(%id, "API vote");
    Ok(Json(service.vote_for_idea(id).await?.into()))
}

/// GET /api/ideas/:id
pub async fn get_idea(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Idea>, RpcError> {
    let id = parse_id(&id)?;
    debug!(%id, "API get idea");
    Ok(Json(service.get_idea(id)?))
}

// ── Ledger ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LedgerResourceResponse {
    pub resource: RawResource,
}

/// GET /api/ledger/ideas/:id
pub async fn ledger_idea(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LedgerResourceResponse>, RpcError> {
    let id = parse_id(&id)?;
    debug!(%id, "API ledger read");
    let resource = service.read_journal(id).await?;
    Ok(Json(LedgerResourceResponse { resource }))
}
