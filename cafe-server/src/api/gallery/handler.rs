//! Gallery API Handlers

use axum::extract::State;
use shared::models::{GalleryImage, default_gallery, gallery_or_default};

use crate::core::ServerState;
use crate::store::{Table, decode_rows};
use crate::utils::{ApiResponse, AppResult};

/// GET /api/gallery - 获取图库
///
/// 按远端表原有顺序返回；远端为空或不可用时返回内置图片，图库从不报错。
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<GalleryImage>>> {
    let fetched = state
        .store
        .select_all(Table::Gallery)
        .await
        .and_then(decode_rows::<GalleryImage>);

    let images = match fetched {
        Ok(rows) => gallery_or_default(rows),
        Err(e) => {
            tracing::warn!(error = %e, "Gallery fetch failed, serving built-in images");
            default_gallery()
        }
    };

    Ok(ApiResponse::success(images))
}
