//! Guest List API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::models::{Guest, GuestArrival, GuestCreate, GuestRename};

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/guest_list - 获取所有宾客
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Guest>>> {
    let guests = state.run_seating(|s| s.list_guests()).await?;
    Ok(Json(guests))
}

/// GET /api/guest_list/arrived - 已到场宾客
pub async fn list_arrived(State(state): State<ServerState>) -> AppResult<Json<Vec<Guest>>> {
    let guests = state.run_seating(|s| s.list_arrived_guests()).await?;
    Ok(Json(guests))
}

/// GET /api/guest_list/:name - 获取单个宾客
pub async fn get_by_name(
    State(state): State<ServerState>,
    AppPath(name): AppPath<String>,
) -> AppResult<Json<Guest>> {
    let guest = state.run_seating(move |s| s.find_guest(&name)).await?;
    Ok(Json(guest))
}

/// POST /api/guest_list - 添加宾客
///
/// `table` 为 0 或缺省时自动选桌
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<GuestCreate>,
) -> AppResult<(StatusCode, Json<Guest>)> {
    let guest = state.run_seating(move |s| s.add_guest(payload)).await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

/// PUT /api/guest_list/:name/name?new_name= - 宾客改名
pub async fn rename(
    State(state): State<ServerState>,
    AppPath(name): AppPath<String>,
    AppQuery(query): AppQuery<GuestRename>,
) -> AppResult<Json<Guest>> {
    let guest = state
        .run_seating(move |s| s.rename_guest(&name, &query.new_name))
        .await?;
    Ok(Json(guest))
}

/// PUT /api/guest_list/arrive - 记录到场 (可更新同行人数)
pub async fn arrive(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<GuestArrival>,
) -> AppResult<Json<Guest>> {
    let guest = state
        .run_seating(move |s| s.record_arrival(&payload.name, payload.accompanying_guests))
        .await?;
    Ok(Json(guest))
}

/// PATCH /api/guest_list/:name/leave - 记录离场，释放座位
pub async fn leave(
    State(state): State<ServerState>,
    AppPath(name): AppPath<String>,
) -> AppResult<Json<Guest>> {
    let guest = state.run_seating(move |s| s.record_departure(&name)).await?;
    Ok(Json(guest))
}

/// DELETE /api/guest_list/:name - 删除宾客
pub async fn delete(
    State(state): State<ServerState>,
    AppPath(name): AppPath<String>,
) -> AppResult<StatusCode> {
    state.run_seating(move |s| s.delete_guest(&name)).await?;
    Ok(StatusCode::NO_CONTENT)
}
