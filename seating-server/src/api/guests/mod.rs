//! Guest List API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/guest_list | POST | 添加宾客 (同名则更新座位) |
//! | /api/guest_list | GET | 所有宾客 |
//! | /api/guest_list/arrived | GET | 已到场且未离场的宾客 |
//! | /api/guest_list/arrive | PUT | 记录到场 |
//! | /api/guest_list/{name} | GET | 单个宾客 |
//! | /api/guest_list/{name} | DELETE | 删除宾客 |
//! | /api/guest_list/{name}/name?new_name= | PUT | 改名 |
//! | /api/guest_list/{name}/leave | PATCH | 记录离场 |

mod handler;

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/guest_list", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/arrived", get(handler::list_arrived))
        .route("/arrive", put(handler::arrive))
        .route("/{name}", get(handler::get_by_name).delete(handler::delete))
        .route("/{name}/name", put(handler::rename))
        .route("/{name}/leave", patch(handler::leave))
}
