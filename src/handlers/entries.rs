use axum::{extract::State, Json};

use crate::error::{AppQuery, AppResult};
use crate::models::entry::{ClearResponse, Entry, HistoryQuery};
use crate::services::aggregate;
use crate::AppState;

pub async fn list_entries(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> AppResult<Json<Vec<Entry>>> {
    let entries = state.with_store(|store| store.load()).await?;
    Ok(Json(aggregate::history(&entries, query.username.trim())))
}

pub async fn clear_entries(State(state): State<AppState>) -> AppResult<Json<ClearResponse>> {
    state.with_store(|store| store.clear_all()).await?;
    Ok(Json(ClearResponse { cleared: true }))
}
