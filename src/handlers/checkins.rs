use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::{AppError, AppJson, AppQuery, AppResult};
use crate::models::entry::{CheckInRequest, Entry, SnapshotQuery, SnapshotResponse, DAILY_GOALS};
use crate::services::aggregate;
use crate::services::score::Assessment;
use crate::AppState;

pub async fn create_checkin(
    State(state): State<AppState>,
    AppJson(mut body): AppJson<CheckInRequest>,
) -> AppResult<(StatusCode, Json<Entry>)> {
    body.username = body.username.trim().to_string();
    body.validate()?;

    let date = body.date.unwrap_or_else(aggregate::today);
    let mood = body.mood.as_str();
    let assessment = Assessment::of(body.sleep_hours, body.screen_time, body.stress_level, mood);

    let entry = Entry {
        username: body.username,
        date,
        sleep_hours: body.sleep_hours,
        screen_time: body.screen_time,
        stress_level: body.stress_level,
        mood: mood.to_string(),
        wellness_score: assessment.wellness_score,
        tip: assessment.tip,
        journal: body.journal,
    };

    let saved = {
        let entry = entry.clone();
        state.with_store(move |store| store.save(&entry)).await?
    };
    if !saved {
        return Err(AppError::Conflict(format!(
            "{} has already checked in for {}",
            entry.username, entry.date
        )));
    }

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_snapshot(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SnapshotQuery>,
) -> AppResult<Json<SnapshotResponse>> {
    let date = query.date.unwrap_or_else(aggregate::today);
    let entries = state.with_store(|store| store.load()).await?;

    let entry = aggregate::entry_on(&entries, query.username.trim(), date).ok_or_else(|| {
        AppError::NotFound(format!("No check-in for {} on {}", query.username, date))
    })?;

    Ok(Json(SnapshotResponse {
        entry,
        goals: DAILY_GOALS,
    }))
}
