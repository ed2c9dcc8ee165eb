use crate::errors::{AppError, StoreResult};
use crate::export::{encode_snapshot, export_file_name};
use crate::models::{
    CrampsLevel, CrampsLevelRequest, DateKey, DayRecord, DayView, FlowLevelRequest, LogDay,
    LogResponse, MoodRequest, ToggleRequest,
};
use crate::state::AppState;
use crate::storage::FileStorage;
use crate::store::CycleLogStore;
use crate::ui::render_index;
use crate::visuals::{pain_scale_for, tile_visual};
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::Local;
use std::sync::Arc;
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_index(today()))
}

pub async fn get_log(State(state): State<AppState>) -> Json<LogResponse> {
    let store = state.store.lock().await;
    let days = store
        .log()
        .iter()
        .map(|(date, record)| LogDay {
            date: *date,
            record: record.clone(),
            tile: tile_visual(record, state.tile_base_unit),
        })
        .collect();

    Json(LogResponse {
        revision: store.revision(),
        days,
    })
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let store = state.store.lock().await;
    let record = store.get(date).cloned();
    Ok(Json(day_view(&state, date, record)))
}

pub async fn ensure_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let record = run_command(&state, move |store| store.ensure_day(date)).await?;
    Ok(Json(day_view(&state, date, Some(record))))
}

pub async fn toggle(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let field = payload.field;
    let record = run_command(&state, move |store| store.toggle(date, field)).await?;
    Ok(Json(day_view(&state, date, Some(record))))
}

pub async fn set_flow(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<FlowLevelRequest>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let level = payload.level;
    let record = run_command(&state, move |store| store.set_flow_level(date, level)).await?;
    Ok(Json(day_view(&state, date, Some(record))))
}

pub async fn set_cramps(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<CrampsLevelRequest>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let level = CrampsLevel::try_from(payload.level)?;
    let record = run_command(&state, move |store| store.set_cramps_level(date, level)).await?;
    Ok(Json(day_view(&state, date, Some(record))))
}

pub async fn set_mood(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let mood = payload.mood;
    let record = run_command(&state, move |store| store.set_mood_type(date, mood)).await?;
    Ok(Json(day_view(&state, date, Some(record))))
}

pub async fn clear_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayView>, AppError> {
    let date = parse_date(&date)?;
    let record = run_command(&state, move |store| store.clear_day(date)).await?;
    Ok(Json(day_view(&state, date, Some(record))))
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.store.lock().await.export_snapshot();
    let body = encode_snapshot(&snapshot)?;
    let file_name = export_file_name(today());
    info!("exporting {} day(s) as {file_name}", snapshot.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}

/// Runs a store command on the blocking pool, since every mutation ends in
/// a synchronous file write.
async fn run_command<T, F>(state: &AppState, command: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&mut CycleLogStore<FileStorage>) -> StoreResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    let outcome = tokio::task::spawn_blocking(move || command(&mut store.blocking_lock()))
        .await
        .map_err(AppError::internal)?;
    Ok(outcome?)
}

fn day_view(state: &AppState, date: DateKey, record: Option<DayRecord>) -> DayView {
    let tile = tile_visual(&record.clone().unwrap_or_default(), state.tile_base_unit);
    DayView {
        date,
        pain_scale: pain_scale_for(record.as_ref()),
        tile,
        record,
    }
}

fn parse_date(raw: &str) -> Result<DateKey, AppError> {
    raw.parse().map_err(AppError::from)
}

fn today() -> DateKey {
    DateKey::new(Local::now().date_naive())
}
