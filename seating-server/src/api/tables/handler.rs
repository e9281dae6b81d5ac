//! Party Table API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{GuestsAtTable, PartyTable, PartyTableCreate, SeatsEmpty};

use crate::api::extract::{AppJson, AppPath};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/party_tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PartyTable>>> {
    let tables = state.run_seating(|s| s.list_tables()).await?;
    Ok(Json(tables))
}

/// POST /api/party_tables - 创建桌台
///
/// `number` 为空时自动分配最小的未使用编号
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<PartyTableCreate>,
) -> AppResult<(StatusCode, Json<PartyTable>)> {
    if payload.capacity.is_none() {
        return Err(AppError::required_field("capacity"));
    }
    let table = state.run_seating(move |s| s.create_table(payload)).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// DELETE /api/party_tables/:number - 删除桌台 (有人就座时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    AppPath(number): AppPath<i32>,
) -> AppResult<StatusCode> {
    state.run_seating(move |s| s.remove_table(number)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/party_tables/seats_empty - 所有桌台的空座总数
pub async fn seats_empty(State(state): State<ServerState>) -> AppResult<Json<SeatsEmpty>> {
    let seats_empty = state.run_seating(|s| s.total_free_seats()).await?;
    Ok(Json(SeatsEmpty { seats_empty }))
}

/// GET /api/party_tables/guests_at_table - 每张桌的在座宾客 (含空桌)
pub async fn guests_at_tables(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<GuestsAtTable>>> {
    let seating = state.run_seating(|s| s.guests_at_tables()).await?;
    Ok(Json(seating))
}

/// GET /api/party_tables/guests_at_table/:number - 单张桌的在座宾客
pub async fn guests_at_table(
    State(state): State<ServerState>,
    AppPath(number): AppPath<i32>,
) -> AppResult<Json<GuestsAtTable>> {
    let seating = state.run_seating(move |s| s.guests_at_table(number)).await?;
    Ok(Json(seating))
}
