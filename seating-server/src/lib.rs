//! Seating Server - 派对座位管理服务
//!
//! # 架构概述
//!
//! 管理派对桌台和宾客名单，保证每张桌的已分配座位数始终等于
//! 坐在该桌、尚未离场的宾客人数之和。
//!
//! - **座位引擎** (`seating`): 桌台账本、宾客名录、座位分配、宾客生命周期
//! - **数据库** (`db`): 嵌入式 redb 存储，乐观版本号并发控制
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! seating-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── seating/       # 座位引擎
//! ├── db/            # redb 存储和仓库
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod seating;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::SeatingStorage;
pub use seating::{SeatingError, SeatingManager, SeatingService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 读取 `.env`，初始化日志
pub fn setup_environment() -> Config {
    // .env 文件不存在时忽略
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
   _____            __  _
  / ___/___  ____ _/ /_(_)___  ____ _
  \__ \/ _ \/ __ `/ __/ / __ \/ __ `/
 ___/ /  __/ /_/ / /_/ / / / / /_/ /
/____/\___/\__,_/\__/_/_/ /_/\__, /
                            /____/
    "#
    );
}
