//! Party Table API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/party_tables | POST | 创建桌台 |
//! | /api/party_tables | GET | 所有桌台 (按编号升序) |
//! | /api/party_tables/{number} | DELETE | 删除空桌 |
//! | /api/party_tables/seats_empty | GET | 空座总数 |
//! | /api/party_tables/guests_at_table | GET | 每张桌的在座宾客 |
//! | /api/party_tables/guests_at_table/{number} | GET | 单张桌的在座宾客 |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/party_tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{number}", delete(handler::delete))
        .route("/seats_empty", get(handler::seats_empty))
        .route("/guests_at_table", get(handler::guests_at_tables))
        .route("/guests_at_table/{number}", get(handler::guests_at_table))
}
