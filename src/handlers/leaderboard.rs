use axum::{extract::State, Json};

use crate::error::{AppQuery, AppResult};
use crate::models::leaderboard::{LeaderboardQuery, LeaderboardResponse};
use crate::services::aggregate;
use crate::AppState;

pub async fn get_leaderboard(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LeaderboardQuery>,
) -> AppResult<Json<LeaderboardResponse>> {
    let reference_date = query.date.unwrap_or_else(aggregate::today);
    let entries = state.with_store(|store| store.load()).await?;

    Ok(Json(LeaderboardResponse {
        period: query.period,
        reference_date,
        rows: aggregate::leaderboard(&entries, query.period, reference_date),
    }))
}
