//! Route table

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{categories, health, menu, menu_items, subcategories};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/catalog/tree", get(categories::catalog_tree))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/categories/reorder", post(categories::reorder_categories))
        .route(
            "/categories/{slug}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/categories/{slug}/subcategories",
            get(categories::list_subcategories)
                .post(categories::create_subcategory)
                .put(categories::save_subcategories),
        )
        .route(
            "/categories/{slug}/subcategories/reorder",
            post(categories::reorder_subcategories),
        )
        .route(
            "/subcategories/{slug}",
            get(subcategories::get_subcategory)
                .put(subcategories::update_subcategory)
                .delete(subcategories::delete_subcategory),
        )
        .route(
            "/menu-items",
            get(menu_items::list_menu_items).post(menu_items::create_menu_item),
        )
        .route(
            "/menu-items/{slug}",
            get(menu_items::get_menu_item)
                .put(menu_items::update_menu_item)
                .delete(menu_items::delete_menu_item),
        )
        .route("/menu", get(menu::home))
        .route("/menu/categories/{slug}", get(menu::category_page))
        .route("/menu/items/{slug}", get(menu::item_page));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .with_state(state)
}
