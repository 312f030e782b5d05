// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Item Queries
// File: crates/menu-infrastructure/src/database/postgres/menu_item_repo_impl.rs
// ============================================================================

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::info;

use menu_core::domain::{MenuItem, MenuItemFields};
use menu_core::error::{DomainError, EntityKind};
use menu_core::repositories::{MenuItemFilter, MenuItemSort};
use menu_shared::EntityId;

use super::PgCatalogStore;

const SELECT_MENU_ITEMS: &str = r#"
    SELECT id, category_id, subcategory_id, name_tr, name_en, description_tr, description_en,
           allergens_tr, allergens_en, price, image_url, created_at
    FROM menu_items
    WHERE ($1::BIGINT IS NULL OR category_id = $1)
      AND ($2::BIGINT IS NULL OR subcategory_id = $2)
"#;

#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: i64,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub name_tr: String,
    pub name_en: String,
    pub description_tr: Option<String>,
    pub description_en: Option<String>,
    pub allergens_tr: Option<String>,
    pub allergens_en: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            category_id: row.category_id,
            subcategory_id: row.subcategory_id,
            name_tr: row.name_tr,
            name_en: row.name_en,
            description_tr: row.description_tr,
            description_en: row.description_en,
            allergens_tr: row.allergens_tr,
            allergens_en: row.allergens_en,
            price: row.price,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

fn order_clause(sort: MenuItemSort) -> &'static str {
    match sort {
        MenuItemSort::Name => "ORDER BY name_tr ASC, id ASC",
        MenuItemSort::CreatedAt => "ORDER BY created_at ASC, id ASC",
    }
}

impl PgCatalogStore {
    pub(super) async fn find_menu_item_row(&self, id: EntityId) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = self
            .timed(
                "find_menu_item",
                sqlx::query_as(
                    r#"
                    SELECT id, category_id, subcategory_id, name_tr, name_en, description_tr,
                           description_en, allergens_tr, allergens_en, price, image_url, created_at
                    FROM menu_items
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(|r| r.into()))
    }

    pub(super) async fn list_menu_item_rows(
        &self,
        filter: &MenuItemFilter,
        sort: MenuItemSort,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let sql = format!("{} {}", SELECT_MENU_ITEMS, order_clause(sort));
        let rows: Vec<MenuItemRow> = self
            .timed(
                "list_menu_items",
                sqlx::query_as(&sql)
                    .bind(filter.category_id)
                    .bind(filter.subcategory_id)
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub(super) async fn count_menu_item_rows(&self, filter: &MenuItemFilter) -> Result<usize, DomainError> {
        let count: i64 = self
            .timed(
                "count_menu_items",
                sqlx::query_scalar(
                    r#"
                    SELECT COUNT(*)
                    FROM menu_items
                    WHERE ($1::BIGINT IS NULL OR category_id = $1)
                      AND ($2::BIGINT IS NULL OR subcategory_id = $2)
                    "#,
                )
                .bind(filter.category_id)
                .bind(filter.subcategory_id)
                .fetch_one(&self.pool),
            )
            .await?;

        Ok(count as usize)
    }

    pub(super) async fn insert_menu_item_row(&self, fields: &MenuItemFields) -> Result<MenuItem, DomainError> {
        let row: MenuItemRow = self
            .timed(
                "insert_menu_item",
                sqlx::query_as(
                    r#"
                    INSERT INTO menu_items
                        (category_id, subcategory_id, name_tr, name_en, description_tr, description_en,
                         allergens_tr, allergens_en, price, image_url)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    RETURNING id, category_id, subcategory_id, name_tr, name_en, description_tr,
                              description_en, allergens_tr, allergens_en, price, image_url, created_at
                    "#,
                )
                .bind(fields.category_id)
                .bind(fields.subcategory_id)
                .bind(&fields.name_tr)
                .bind(&fields.name_en)
                .bind(&fields.description_tr)
                .bind(&fields.description_en)
                .bind(&fields.allergens_tr)
                .bind(&fields.allergens_en)
                .bind(fields.price)
                .bind(&fields.image_url)
                .fetch_one(&self.pool),
            )
            .await?;

        info!("Menu item row inserted: {} (category {})", row.id, row.category_id);
        Ok(row.into())
    }

    pub(super) async fn update_menu_item_row(
        &self,
        id: EntityId,
        fields: &MenuItemFields,
    ) -> Result<MenuItem, DomainError> {
        let row: Option<MenuItemRow> = self
            .timed(
                "update_menu_item",
                sqlx::query_as(
                    r#"
                    UPDATE menu_items
                    SET category_id = $2, subcategory_id = $3, name_tr = $4, name_en = $5,
                        description_tr = $6, description_en = $7, allergens_tr = $8,
                        allergens_en = $9, price = $10, image_url = $11
                    WHERE id = $1
                    RETURNING id, category_id, subcategory_id, name_tr, name_en, description_tr,
                              description_en, allergens_tr, allergens_en, price, image_url, created_at
                    "#,
                )
                .bind(id)
                .bind(fields.category_id)
                .bind(fields.subcategory_id)
                .bind(&fields.name_tr)
                .bind(&fields.name_en)
                .bind(&fields.description_tr)
                .bind(&fields.description_en)
                .bind(&fields.allergens_tr)
                .bind(&fields.allergens_en)
                .bind(fields.price)
                .bind(&fields.image_url)
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(|r| r.into())
            .ok_or_else(|| DomainError::not_found(EntityKind::MenuItem, id))
    }

    pub(super) async fn delete_menu_item_row(&self, id: EntityId) -> Result<(), DomainError> {
        let done = self
            .timed(
                "delete_menu_item",
                sqlx::query("DELETE FROM menu_items WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::MenuItem, id));
        }
        Ok(())
    }

    pub(super) async fn detach_menu_item_rows(&self, subcategory_id: EntityId) -> Result<usize, DomainError> {
        let done = self
            .timed(
                "detach_subcategory_items",
                sqlx::query("UPDATE menu_items SET subcategory_id = NULL WHERE subcategory_id = $1")
                    .bind(subcategory_id)
                    .execute(&self.pool),
            )
            .await?;

        Ok(done.rows_affected() as usize)
    }
}
