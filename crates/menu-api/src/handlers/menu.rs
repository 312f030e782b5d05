// ============================================================================
// Menu API - Public Menu Handlers
// File: crates/menu-api/src/handlers/menu.rs
// ============================================================================
//! Guest-facing menu endpoints. Text is resolved to one language with fallback.

use axum::extract::{Path, State};
use menu_core::domain::{Bilingual, Category, MenuItem, Subcategory};
use menu_shared::{EntityId, Locale};
use serde::{Deserialize, Serialize};

use crate::response::{ok, ApiQuery, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub lang: Locale,
    pub category_id: Option<EntityId>,
    pub subcategory_id: Option<EntityId>,
}

#[derive(Debug, Serialize)]
pub struct PublicCategory {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl PublicCategory {
    fn new(category: &Category, locale: Locale) -> Self {
        Self {
            id: category.id,
            slug: category.slug(),
            name: category.name(locale).to_string(),
            image_url: category.image_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicSubcategory {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl PublicSubcategory {
    fn new(subcategory: &Subcategory, locale: Locale) -> Self {
        Self {
            id: subcategory.id,
            slug: subcategory.slug(),
            name: subcategory.name(locale).to_string(),
            description: subcategory.description(locale).map(str::to_string),
            image_url: subcategory.image_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicItem {
    pub id: EntityId,
    pub slug: String,
    pub category_id: EntityId,
    pub subcategory_id: Option<EntityId>,
    pub name: String,
    pub description: Option<String>,
    pub allergens: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
}

impl PublicItem {
    fn new(item: &MenuItem, locale: Locale) -> Self {
        Self {
            id: item.id,
            slug: item.slug(),
            category_id: item.category_id,
            subcategory_id: item.subcategory_id,
            name: item.name(locale).to_string(),
            description: item.description(locale).map(str::to_string),
            allergens: item.allergens(locale).map(str::to_string),
            price: item.price,
            image_url: item.image_url.clone(),
        }
    }

    fn list(items: &[MenuItem], locale: Locale) -> Vec<Self> {
        items.iter().map(|i| Self::new(i, locale)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub lang: Locale,
    pub categories: Vec<PublicCategory>,
    pub items: Vec<PublicItem>,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub lang: Locale,
    pub category: PublicCategory,
    pub subcategories: Vec<PublicSubcategory>,
    pub items: Vec<PublicItem>,
}

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub lang: Locale,
    pub item: PublicItem,
    pub category: PublicCategory,
    pub similar_items: Vec<PublicItem>,
}

/// GET /api/v1/menu
pub async fn home(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> ApiResult<HomeView> {
    let lang = query.lang;
    let page = state.menu.home(query.category_id).await?;
    ok(HomeView {
        lang,
        categories: page
            .categories
            .iter()
            .map(|c| PublicCategory::new(c, lang))
            .collect(),
        items: PublicItem::list(&page.items, lang),
    })
}

/// GET /api/v1/menu/categories/{slug}
pub async fn category_page(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> ApiResult<CategoryView> {
    let lang = query.lang;
    let page = state
        .menu
        .category_page(&category_slug, query.subcategory_id)
        .await?;
    ok(CategoryView {
        lang,
        category: PublicCategory::new(&page.category, lang),
        subcategories: page
            .subcategories
            .iter()
            .map(|s| PublicSubcategory::new(s, lang))
            .collect(),
        items: PublicItem::list(&page.items, lang),
    })
}

/// GET /api/v1/menu/items/{slug}
pub async fn item_page(
    State(state): State<AppState>,
    Path(item_slug): Path<String>,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> ApiResult<ItemView> {
    let lang = query.lang;
    let page = state.menu.item_page(&item_slug).await?;
    ok(ItemView {
        lang,
        item: PublicItem::new(&page.item, lang),
        category: PublicCategory::new(&page.category, lang),
        similar_items: PublicItem::list(&page.similar_items, lang),
    })
}
