// ============================================================================
// Menu Infrastructure - PostgreSQL Category Queries
// File: crates/menu-infrastructure/src/database/postgres/category_repo_impl.rs
// ============================================================================

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::{info, warn};

use menu_core::domain::{Category, CategoryFields};
use menu_core::error::{DomainError, EntityKind};
use menu_shared::EntityId;

use super::{is_foreign_key_violation, PgCatalogStore};

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CategoryRow {
    pub id: i64,
    pub name_tr: String,
    pub name_en: String,
    pub image_url: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name_tr: row.name_tr,
            name_en: row.name_en,
            image_url: row.image_url,
            order: row.order,
            created_at: row.created_at,
        }
    }
}

impl PgCatalogStore {
    pub(super) async fn find_category_row(&self, id: EntityId) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = self
            .timed(
                "find_category",
                sqlx::query_as(
                    r#"
                    SELECT id, name_tr, name_en, image_url, "order", created_at
                    FROM categories
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(|r| r.into()))
    }

    pub(super) async fn list_category_rows(&self) -> Result<Vec<Category>, DomainError> {
        let rows: Vec<CategoryRow> = self
            .timed(
                "list_categories",
                sqlx::query_as(
                    r#"
                    SELECT id, name_tr, name_en, image_url, "order", created_at
                    FROM categories
                    ORDER BY "order" ASC, id ASC
                    "#,
                )
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub(super) async fn insert_category_row(
        &self,
        fields: &CategoryFields,
        order: i32,
    ) -> Result<Category, DomainError> {
        let row: CategoryRow = self
            .timed(
                "insert_category",
                sqlx::query_as(
                    r#"
                    INSERT INTO categories (name_tr, name_en, image_url, "order")
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, name_tr, name_en, image_url, "order", created_at
                    "#,
                )
                .bind(&fields.name_tr)
                .bind(&fields.name_en)
                .bind(&fields.image_url)
                .bind(order)
                .fetch_one(&self.pool),
            )
            .await?;

        info!("Category row inserted: {}", row.id);
        Ok(row.into())
    }

    pub(super) async fn update_category_row(
        &self,
        id: EntityId,
        fields: &CategoryFields,
    ) -> Result<Category, DomainError> {
        let row: Option<CategoryRow> = self
            .timed(
                "update_category",
                sqlx::query_as(
                    r#"
                    UPDATE categories
                    SET name_tr = $2, name_en = $3, image_url = $4
                    WHERE id = $1
                    RETURNING id, name_tr, name_en, image_url, "order", created_at
                    "#,
                )
                .bind(id)
                .bind(&fields.name_tr)
                .bind(&fields.name_en)
                .bind(&fields.image_url)
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(|r| r.into())
            .ok_or_else(|| DomainError::not_found(EntityKind::Category, id))
    }

    pub(super) async fn delete_category_row(&self, id: EntityId) -> Result<(), DomainError> {
        let affected = self
            .timed("delete_category", async {
                match sqlx::query("DELETE FROM categories WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await
                {
                    Ok(done) => Ok(Some(done.rows_affected())),
                    Err(e) if is_foreign_key_violation(&e) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await?;

        match affected {
            Some(0) => Err(DomainError::not_found(EntityKind::Category, id)),
            Some(_) => Ok(()),
            None => {
                let (subcategories, items) = self.category_dependents(id).await?;
                warn!(
                    "Category {} still referenced: {} subcategories, {} items",
                    id, subcategories, items
                );
                Err(DomainError::HasDependents {
                    entity: EntityKind::Category,
                    id,
                    subcategories,
                    items,
                })
            }
        }
    }

    pub(super) async fn set_category_position(
        &self,
        id: EntityId,
        position: i32,
    ) -> Result<(), DomainError> {
        let done = self
            .timed(
                "set_category_position",
                sqlx::query(r#"UPDATE categories SET "order" = $2 WHERE id = $1"#)
                    .bind(id)
                    .bind(position)
                    .execute(&self.pool),
            )
            .await?;

        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Category, id));
        }
        Ok(())
    }

    async fn category_dependents(&self, id: EntityId) -> Result<(usize, usize), DomainError> {
        let (subcategories, items): (i64, i64) = self
            .timed(
                "count_category_dependents",
                sqlx::query_as(
                    r#"
                    SELECT
                        (SELECT COUNT(*) FROM subcategories WHERE category_id = $1),
                        (SELECT COUNT(*) FROM menu_items WHERE category_id = $1)
                    "#,
                )
                .bind(id)
                .fetch_one(&self.pool),
            )
            .await?;

        Ok((subcategories as usize, items as usize))
    }
}
