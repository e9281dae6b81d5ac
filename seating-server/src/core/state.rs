use std::sync::Arc;

use anyhow::Context;

use crate::core::{Config, Result, ServerError};
use crate::db::SeatingStorage;
use crate::seating::{SeatingManager, SeatingResult, SeatingService};
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求 clone 一次的成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | seating | Arc<dyn SeatingService> | 座位引擎 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 座位引擎
    pub seating: Arc<dyn SeatingService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 测试中可以传入内存数据库上的引擎
    pub fn new(config: Config, seating: Arc<dyn SeatingService>) -> Self {
        Self { config, seating }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录
    /// 2. 打开 redb 数据库 (不存在则创建)
    /// 3. 构造座位引擎
    pub fn initialize(config: &Config) -> Result<Self> {
        if config.max_conflict_retries == 0 {
            return Err(ServerError::Config(
                "MAX_CONFLICT_RETRIES must be at least 1".to_string(),
            ));
        }

        std::fs::create_dir_all(&config.work_dir)
            .with_context(|| format!("Failed to create work dir {}", config.work_dir))?;

        let db_path = config.database_path();
        let storage = SeatingStorage::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Database opened");

        let manager = SeatingManager::with_max_attempts(storage, config.max_conflict_retries);
        Ok(Self::new(config.clone(), Arc::new(manager)))
    }

    /// 在阻塞线程池中执行座位操作
    ///
    /// redb 事务是同步的，不能直接在 async 上下文中执行。
    pub async fn run_seating<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&dyn SeatingService) -> SeatingResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let seating = self.seating.clone();
        tokio::task::spawn_blocking(move || f(seating.as_ref()))
            .await
            .map_err(|e| AppError::internal(format!("Seating task failed: {e}")))?
            .map_err(AppError::from)
    }
}
