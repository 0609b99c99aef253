use axum::{extract::State, Json};

use crate::error::{AppQuery, AppResult};
use crate::models::entry::{Entry, OverviewQuery};
use crate::services::aggregate;
use crate::AppState;

/// Trailing window ending at `date` (today by default), oldest first.
pub async fn get_overview(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<OverviewQuery>,
) -> AppResult<Json<Vec<Entry>>> {
    let days = query.days.unwrap_or(state.config.overview_days);
    let username = query.username.as_deref().map(str::trim);

    let entries = state.with_store(|store| store.load()).await?;
    let window = match query.date {
        Some(end) => aggregate::last_n_days_from(&entries, days, username, end),
        None => aggregate::last_n_days(&entries, days, username),
    };
    Ok(Json(window))
}
