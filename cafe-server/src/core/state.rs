use std::sync::Arc;

use chrono::NaiveDate;
use shared::catalog::ImageOverrides;

use crate::core::{BackgroundTasks, Config, Result, TaskKind};
use crate::services::{
    MenuCache, MenuRefresher, SharedCarousel, SubmissionGateway, TestimonialRotator,
    testimonial_carousel,
};
use crate::store::{MemoryTableStore, RestTableStore, TableStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个 handler 拿到的都是同一份服务。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<dyn TableStore> | 远端表 (REST 或内存) |
/// | gateway | SubmissionGateway | 表单提交 |
/// | menu | MenuCache | 菜单缓存 |
/// | carousel | SharedCarousel | 评价轮播状态 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn TableStore>,
    pub gateway: SubmissionGateway,
    pub menu: MenuCache,
    pub carousel: SharedCarousel,
}

impl ServerState {
    /// 手动构造 (测试中直接注入 store)
    pub fn new(config: Config, store: Arc<dyn TableStore>, overrides: ImageOverrides) -> Self {
        Self {
            gateway: SubmissionGateway::new(store.clone()),
            menu: MenuCache::new(overrides),
            carousel: testimonial_carousel(),
            config,
            store,
        }
    }

    /// 初始化服务器状态
    ///
    /// `BACKEND_URL` 已配置时使用 REST 存储，否则使用内存存储。
    pub fn initialize(config: &Config) -> Result<Self> {
        let store: Arc<dyn TableStore> = match &config.backend_url {
            Some(url) => {
                tracing::info!(backend = %url, "Using REST table store");
                Arc::new(RestTableStore::new(
                    url.clone(),
                    config.backend_anon_key.clone(),
                    config.backend_timeout(),
                )?)
            }
            None => {
                tracing::warn!("BACKEND_URL not set, submissions are kept in memory only");
                Arc::new(MemoryTableStore::new())
            }
        };

        let overrides = config.load_image_overrides()?;
        Ok(Self::new(config.clone(), store, overrides))
    }

    /// 注册后台任务
    ///
    /// - 菜单定时刷新 (MenuRefresher)
    /// - 评价轮播 (TestimonialRotator)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let refresher = MenuRefresher::new(
            self.menu.clone(),
            self.store.clone(),
            self.config.menu_refresh_interval(),
            tasks.shutdown_token(),
        );
        tasks.spawn("menu_refresher", TaskKind::Periodic, refresher.run());

        let rotator = TestimonialRotator::new(
            self.carousel.clone(),
            self.config.testimonial_interval(),
            tasks.shutdown_token(),
        );
        tasks.spawn("testimonial_rotator", TaskKind::Worker, rotator.run());
    }

    /// 餐厅本地日期，用于"预订日期不能早于今天"
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
