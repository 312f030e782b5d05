// ============================================================================
// Menu API - Category Handlers
// File: crates/menu-api/src/handlers/categories.rs
// ============================================================================
//! Admin category endpoints, the catalog tree, and category-scoped subcategory lists

use axum::extract::{Path, State};
use menu_core::domain::{
    Category, CategoryFields, CategoryNode, Subcategory, SubcategoryDraft, SubcategoryFields,
};
use menu_core::slug;
use serde::{Deserialize, Serialize};

use super::{slugged, Deleted, ReorderRequest, Slugged};
use crate::response::{created, ok, ApiJson, ApiResult, Created};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(flatten)]
    pub fields: CategoryFields,
    /// Initial subcategories in display order. Blank rows are ignored.
    #[serde(default)]
    pub subcategories: Vec<SubcategoryFields>,
}

#[derive(Debug, Serialize)]
pub struct CategoryCreated {
    pub category: Slugged<Category>,
    pub subcategories: Vec<Slugged<Subcategory>>,
}

/// GET /api/v1/catalog/tree
pub async fn catalog_tree(State(state): State<AppState>) -> ApiResult<Vec<CategoryNode>> {
    ok(state.tree.build().await?)
}

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Slugged<Category>>> {
    ok(slugged(state.catalog.list_categories().await?))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCategoryRequest>,
) -> Created<CategoryCreated> {
    let (category, subcategories) = if payload.subcategories.is_empty() {
        (state.catalog.create_category(payload.fields).await?, Vec::new())
    } else {
        state
            .catalog
            .create_category_with_subcategories(payload.fields, payload.subcategories)
            .await?
    };

    created(CategoryCreated {
        category: category.into(),
        subcategories: slugged(subcategories),
    })
}

/// GET /api/v1/categories/{slug}
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
) -> ApiResult<Slugged<Category>> {
    ok(state.catalog.resolve_category(&category_slug).await?.into())
}

/// PUT /api/v1/categories/{slug}
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
    ApiJson(fields): ApiJson<CategoryFields>,
) -> ApiResult<Slugged<Category>> {
    let id = slug::decode(&category_slug)?;
    ok(state.catalog.update_category(id, fields).await?.into())
}

/// DELETE /api/v1/categories/{slug}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
) -> ApiResult<Deleted> {
    let id = slug::decode(&category_slug)?;
    state.catalog.delete_category(id).await?;
    ok(Deleted {
        id,
        detached_items: None,
    })
}

/// POST /api/v1/categories/reorder
pub async fn reorder_categories(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReorderRequest>,
) -> ApiResult<Vec<Slugged<Category>>> {
    let categories = state
        .catalog
        .ordering()
        .reorder_categories(request.moved_id, request.from_index, request.to_index)
        .await?;
    ok(slugged(categories))
}

/// GET /api/v1/categories/{slug}/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
) -> ApiResult<Vec<Slugged<Subcategory>>> {
    let id = slug::decode(&category_slug)?;
    ok(slugged(state.catalog.list_subcategories(id).await?))
}

/// POST /api/v1/categories/{slug}/subcategories
pub async fn create_subcategory(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
    ApiJson(fields): ApiJson<SubcategoryFields>,
) -> Created<Slugged<Subcategory>> {
    let id = slug::decode(&category_slug)?;
    created(state.catalog.create_subcategory(id, fields).await?.into())
}

/// PUT /api/v1/categories/{slug}/subcategories
///
/// Saves the whole edited list: persisted rows are updated, pending rows inserted.
pub async fn save_subcategories(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
    ApiJson(drafts): ApiJson<Vec<SubcategoryDraft>>,
) -> ApiResult<Vec<Slugged<Subcategory>>> {
    let id = slug::decode(&category_slug)?;
    ok(slugged(state.catalog.save_subcategory_drafts(id, drafts).await?))
}

/// POST /api/v1/categories/{slug}/subcategories/reorder
pub async fn reorder_subcategories(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
    ApiJson(request): ApiJson<ReorderRequest>,
) -> ApiResult<Vec<Slugged<Subcategory>>> {
    let id = slug::decode(&category_slug)?;
    let subcategories = state
        .catalog
        .ordering()
        .reorder_subcategories(id, request.moved_id, request.from_index, request.to_index)
        .await?;
    ok(slugged(subcategories))
}
