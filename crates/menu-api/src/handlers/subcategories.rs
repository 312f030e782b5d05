//! Admin subcategory endpoints addressed by the subcategory's own slug

use axum::extract::{Path, State};
use menu_core::domain::{Subcategory, SubcategoryFields};
use menu_core::slug;

use super::{Deleted, Slugged};
use crate::response::{ok, ApiJson, ApiResult};
use crate::state::AppState;

/// GET /api/v1/subcategories/{slug}
pub async fn get_subcategory(
    State(state): State<AppState>,
    Path(subcategory_slug): Path<String>,
) -> ApiResult<Slugged<Subcategory>> {
    ok(state.catalog.resolve_subcategory(&subcategory_slug).await?.into())
}

/// PUT /api/v1/subcategories/{slug}
pub async fn update_subcategory(
    State(state): State<AppState>,
    Path(subcategory_slug): Path<String>,
    ApiJson(fields): ApiJson<SubcategoryFields>,
) -> ApiResult<Slugged<Subcategory>> {
    let id = slug::decode(&subcategory_slug)?;
    ok(state.catalog.update_subcategory(id, fields).await?.into())
}

/// DELETE /api/v1/subcategories/{slug}
///
/// Items of the subcategory stay in the parent category.
pub async fn delete_subcategory(
    State(state): State<AppState>,
    Path(subcategory_slug): Path<String>,
) -> ApiResult<Deleted> {
    let id = slug::decode(&subcategory_slug)?;
    let detached = state.catalog.delete_subcategory(id).await?;
    ok(Deleted {
        id,
        detached_items: Some(detached),
    })
}
