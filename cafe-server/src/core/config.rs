use std::str::FromStr;
use std::time::Duration;

use shared::catalog::{DEFAULT_PAGE_SIZE, ImageOverrides};

use crate::core::ServerError;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 会先被加载)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | BACKEND_URL | (未设置) | 远端 REST 后端，未设置时使用内存存储 |
/// | BACKEND_ANON_KEY | "" | 后端匿名 key |
/// | BACKEND_TIMEOUT_MS | 10000 | 后端请求超时(毫秒) |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP 请求处理超时(毫秒) |
/// | MENU_PAGE_SIZE | 8 | 每次"加载更多"显示的菜品数 |
/// | MENU_REFRESH_SECS | 300 | 菜单刷新间隔(秒) |
/// | TESTIMONIAL_INTERVAL_MS | 5000 | 评价轮播间隔(毫秒) |
/// | MENU_IMAGE_OVERRIDES | (未设置) | 菜品图片覆盖表 JSON 文件路径 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志目录，未设置时只输出到控制台 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// BACKEND_URL=https://xyz.example.co BACKEND_ANON_KEY=... HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub backend_url: Option<String>,
    pub backend_anon_key: String,
    pub backend_timeout_ms: u64,
    /// HTTP 请求超时 (毫秒)，超时返回 408
    pub request_timeout_ms: u64,
    pub menu_page_size: usize,
    pub menu_refresh_secs: u64,
    pub testimonial_interval_ms: u64,
    /// 图片覆盖表路径 (JSON object: 菜品名 -> 图片路径)
    pub menu_image_overrides: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let menu_page_size = match env_or("MENU_PAGE_SIZE", DEFAULT_PAGE_SIZE) {
            0 => {
                tracing::warn!("MENU_PAGE_SIZE must be positive, using {}", DEFAULT_PAGE_SIZE);
                DEFAULT_PAGE_SIZE
            }
            n => n,
        };

        Self {
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            backend_url: env_opt("BACKEND_URL"),
            backend_anon_key: std::env::var("BACKEND_ANON_KEY").unwrap_or_default(),
            backend_timeout_ms: env_or("BACKEND_TIMEOUT_MS", 10_000),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            menu_page_size,
            menu_refresh_secs: env_or("MENU_REFRESH_SECS", 300),
            testimonial_interval_ms: env_or("TESTIMONIAL_INTERVAL_MS", 5_000),
            menu_image_overrides: env_opt("MENU_IMAGE_OVERRIDES"),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10_000),
        }
    }

    /// 测试用配置：内存存储，不读环境变量
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            environment: "test".into(),
            backend_url: None,
            backend_anon_key: String::new(),
            backend_timeout_ms: 1_000,
            request_timeout_ms: 5_000,
            menu_page_size: DEFAULT_PAGE_SIZE,
            menu_refresh_secs: 300,
            testimonial_interval_ms: 5_000,
            menu_image_overrides: None,
            log_level: "debug".into(),
            log_dir: None,
            shutdown_timeout_ms: 1_000,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn menu_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.menu_refresh_secs.max(1))
    }

    pub fn testimonial_interval(&self) -> Duration {
        Duration::from_millis(self.testimonial_interval_ms.max(1))
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// 读取图片覆盖表；未配置时为空表
    pub fn load_image_overrides(&self) -> Result<ImageOverrides, ServerError> {
        let Some(path) = &self.menu_image_overrides else {
            return Ok(ImageOverrides::new());
        };

        let json = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("cannot read {path}: {e}")))?;
        let overrides = ImageOverrides::from_json_str(&json)
            .map_err(|e| ServerError::Config(format!("invalid image overrides in {path}: {e}")))?;
        tracing::info!(path = %path, count = overrides.len(), "Loaded menu image overrides");
        Ok(overrides)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_unset_is_empty() {
        let config = Config::for_tests();
        assert!(config.load_image_overrides().unwrap().is_empty());
    }

    #[test]
    fn test_overrides_loaded_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Masala Chai": "/assets/chai-special.jpg"}}"#).unwrap();

        let mut config = Config::for_tests();
        config.menu_image_overrides = Some(file.path().to_string_lossy().into_owned());

        assert_eq!(config.load_image_overrides().unwrap().len(), 1);
    }

    #[test]
    fn test_bad_overrides_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let mut config = Config::for_tests();
        config.menu_image_overrides = Some(file.path().to_string_lossy().into_owned());

        assert!(matches!(
            config.load_image_overrides(),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_intervals_never_zero() {
        let mut config = Config::for_tests();
        config.menu_refresh_secs = 0;
        config.testimonial_interval_ms = 0;
        assert!(!config.menu_refresh_interval().is_zero());
        assert!(!config.testimonial_interval().is_zero());
    }
}
