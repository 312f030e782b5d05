//! Admin menu item endpoints

use axum::extract::{Path, State};
use menu_core::domain::{MenuItem, MenuItemFields};
use menu_core::repositories::{MenuItemFilter, MenuItemSort};
use menu_core::slug;
use menu_shared::EntityId;
use serde::Deserialize;

use super::{slugged, Deleted, Slugged};
use crate::response::{created, ok, ApiJson, ApiQuery, ApiResult, Created};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MenuItemQuery {
    pub category_id: Option<EntityId>,
    pub subcategory_id: Option<EntityId>,
    /// Defaults to creation order, which is what the admin list shows.
    pub sort: Option<MenuItemSort>,
}

/// GET /api/v1/menu-items
pub async fn list_menu_items(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MenuItemQuery>,
) -> ApiResult<Vec<Slugged<MenuItem>>> {
    let filter = MenuItemFilter {
        category_id: query.category_id,
        subcategory_id: query.subcategory_id,
    };
    let sort = query.sort.unwrap_or(MenuItemSort::CreatedAt);
    ok(slugged(state.catalog.list_menu_items(filter, sort).await?))
}

/// POST /api/v1/menu-items
pub async fn create_menu_item(
    State(state): State<AppState>,
    ApiJson(fields): ApiJson<MenuItemFields>,
) -> Created<Slugged<MenuItem>> {
    created(state.catalog.create_menu_item(fields).await?.into())
}

/// GET /api/v1/menu-items/{slug}
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(item_slug): Path<String>,
) -> ApiResult<Slugged<MenuItem>> {
    ok(state.catalog.resolve_menu_item(&item_slug).await?.into())
}

/// PUT /api/v1/menu-items/{slug}
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(item_slug): Path<String>,
    ApiJson(fields): ApiJson<MenuItemFields>,
) -> ApiResult<Slugged<MenuItem>> {
    let id = slug::decode(&item_slug)?;
    ok(state.catalog.update_menu_item(id, fields).await?.into())
}

/// DELETE /api/v1/menu-items/{slug}
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(item_slug): Path<String>,
) -> ApiResult<Deleted> {
    let id = slug::decode(&item_slug)?;
    state.catalog.delete_menu_item(id).await?;
    ok(Deleted {
        id,
        detached_items: None,
    })
}
