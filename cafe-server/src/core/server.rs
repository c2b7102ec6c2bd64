//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{Router, middleware};
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::api::middleware::{REQUEST_ID_HEADER, logging_middleware};
use crate::core::{BackgroundTasks, Config, Result, ServerError, ServerState, TaskKind};
use crate::utils::logger;

/// x-request-id 生成器 (uuid v4)
#[derive(Clone, Default)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// 注册所有路由 (无中间件、无状态)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(api::health::router())
        .merge(api::menu::router())
        .merge(api::gallery::router())
        .merge(api::testimonials::router())
        .merge(api::submissions::router())
        // Bearer token required
        .merge(api::admin::router())
}

/// 构建完整应用 (路由 + 中间件 + 状态)
///
/// HTTP 服务和集成测试 (`oneshot`) 共用
pub fn build_app(state: ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let request_timeout = state.config.request_timeout();

    build_router()
        .with_state(state)
        // ========== Tower HTTP Middleware ==========
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // Request logging
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        // ========== Request ID ==========
        // Propagate sits inside Set so generated ids reach the response too
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// 启动服务，直到收到 ctrl-c
    ///
    /// 1. 启动后台任务 (菜单刷新、评价轮播、日志清理)
    /// 2. 绑定端口并提供 HTTP 服务
    /// 3. 优雅关闭：停止接收请求 → 取消后台任务 → 等待退出 (超时则 abort)
    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)?,
        };

        api::health::mark_started();

        let mut tasks = BackgroundTasks::new();
        state.start_background_tasks(&mut tasks);

        if let Some(dir) = &self.config.log_dir {
            let cleanup = logger::periodic_cleanup(PathBuf::from(dir), tasks.shutdown_token());
            tasks.spawn("log_cleanup", TaskKind::Periodic, cleanup);
        }
        tasks.log_summary();

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                port: self.config.http_port,
                source,
            })?;
        tracing::info!("☕ Café server listening on {}", addr);

        let app = build_app(state);
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        tasks.shutdown(self.config.shutdown_timeout()).await;

        served.map_err(ServerError::Serve)
    }
}
