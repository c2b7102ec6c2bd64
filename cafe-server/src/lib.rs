//! Café Server - 咖啡馆网站后端
//!
//! # 架构概述
//!
//! - **菜单** (`services::menu_cache`): 远端菜单缓存，定时刷新，空表时使用内置菜单
//! - **表单** (`services::gateway`): 预订 / 留言 / 订阅，本地校验后写入远端表
//! - **评价轮播** (`services::rotator`): 可取消的定时轮播
//! - **存储** (`store`): 远端 REST 表 (或内存实现)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! cafe-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── services/      # 菜单缓存、表单提交、评价轮播
//! ├── store/         # TableStore (REST / 内存)
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod core;
pub mod services;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{BackgroundTasks, Config, Server, ServerError, ServerState, build_app};
pub use store::{MemoryTableStore, RestTableStore, StoreError, Table, TableStore};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 加载 `.env` 并初始化日志
///
/// 生产环境输出 JSON，其它环境输出易读格式。
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   ______      ____
  / ____/___ _/ __/__
 / /   / __ `/ /_/ _ \
/ /___/ /_/ / __/  __/
\____/\__,_/_/  \___/
    "#
    );
}
