//! Menu API Handlers

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::catalog::{CatalogPage, CatalogQuery};
use shared::models::MenuItem;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Query string of `GET /api/menu`
///
/// `page` stays a string so a malformed value reports `MenuPageInvalid`
/// instead of axum's generic query rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MenuParams {
    pub search: Option<String>,
    pub veg: bool,
    pub spicy: bool,
    pub page: Option<String>,
}

impl MenuParams {
    fn into_query(self, page_size: usize) -> AppResult<CatalogQuery> {
        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                AppError::with_message(ErrorCode::MenuPageInvalid, format!("Invalid page: {raw}"))
                    .with_detail("page", raw)
            })?,
        };

        Ok(CatalogQuery::new(page_size)
            .with_search(self.search.unwrap_or_default())
            .with_veg_only(self.veg)
            .with_spicy_only(self.spicy)
            .at_page(page))
    }
}

/// GET /api/menu - 获取菜单 (筛选 + 分组 + 分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<MenuParams>,
) -> AppResult<ApiResponse<CatalogPage>> {
    let query = params.into_query(state.config.menu_page_size)?;
    let page = state.menu.page(&query);

    tracing::debug!(
        search = %query.search,
        veg_only = query.veg_only,
        spicy_only = query.spicy_only,
        page = query.page,
        displayed = page.displayed,
        total = page.total_matching,
        "Menu page served"
    );

    Ok(ApiResponse::success(page))
}

/// GET /api/menu/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<MenuItem>> {
    let items = state.menu.items();
    let item = items.iter().find(|item| item.id == id).cloned().ok_or_else(|| {
        AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
            .with_detail("id", id.clone())
    })?;
    Ok(ApiResponse::success(item))
}
