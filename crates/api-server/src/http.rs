use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use facet_core::{EngineError, FactPatch, FactStore, NewFact};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<FactStore>>,
}

impl AppState {
    pub fn new(store: FactStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

/// Structured error body: every failure surfaces as title/code/detail.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub title: String,
    pub code: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/facts", post(insert_fact))
        .route("/facts/query", get(query_facts))
        .route("/facts/:id", patch(update_fact))
        .with_state(state)
}

fn engine_error(error: EngineError) -> ApiError {
    let status =
        StatusCode::from_u16(error.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorBody {
            title: error.title().to_string(),
            code: error.code().to_string(),
            detail: error.to_string(),
        }),
    )
}

async fn insert_fact(
    State(state): State<AppState>,
    Json(body): Json<NewFact>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = state.store.lock().await;
    let fact = store.insert_fact(body).map_err(engine_error)?;
    info!(fact_id = %fact.id, type_key = %fact.type_key, "fact created");
    Ok((StatusCode::CREATED, Json(DataBody { data: fact })))
}

async fn update_fact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<FactPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = state.store.lock().await;
    let fact = store.update_fact(id, body).map_err(engine_error)?;
    info!(fact_id = %fact.id, "fact updated");
    Ok(Json(DataBody { data: fact }))
}

async fn query_facts(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.lock().await;
    let records = store.query(&pairs).map_err(engine_error)?;
    Ok(Json(DataBody { data: records }))
}
