// ============================================================================
// Menu Infrastructure - PostgreSQL Subcategory Queries
// File: crates/menu-infrastructure/src/database/postgres/subcategory_repo_impl.rs
// ============================================================================

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::info;

use menu_core::domain::{Subcategory, SubcategoryFields};
use menu_core::error::{DomainError, EntityKind};
use menu_shared::EntityId;

use super::PgCatalogStore;

#[derive(Debug, FromRow)]
struct SubcategoryRow {
    pub id: i64,
    pub category_id: i64,
    pub name_tr: String,
    pub name_en: String,
    pub description_tr: Option<String>,
    pub description_en: Option<String>,
    pub image_url: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<SubcategoryRow> for Subcategory {
    fn from(row: SubcategoryRow) -> Self {
        Subcategory {
            id: row.id,
            category_id: row.category_id,
            name_tr: row.name_tr,
            name_en: row.name_en,
            description_tr: row.description_tr,
            description_en: row.description_en,
            image_url: row.image_url,
            order: row.order,
            created_at: row.created_at,
        }
    }
}

impl PgCatalogStore {
    pub(super) async fn find_subcategory_row(&self, id: EntityId) -> Result<Option<Subcategory>, DomainError> {
        let row: Option<SubcategoryRow> = self
            .timed(
                "find_subcategory",
                sqlx::query_as(
                    r#"
                    SELECT id, category_id, name_tr, name_en, description_tr, description_en,
                           image_url, "order", created_at
                    FROM subcategories
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(|r| r.into()))
    }

    pub(super) async fn list_subcategory_rows(
        &self,
        category_id: Option<EntityId>,
    ) -> Result<Vec<Subcategory>, DomainError> {
        let rows: Vec<SubcategoryRow> = self
            .timed(
                "list_subcategories",
                sqlx::query_as(
                    r#"
                    SELECT id, category_id, name_tr, name_en, description_tr, description_en,
                           image_url, "order", created_at
                    FROM subcategories
                    WHERE ($1::BIGINT IS NULL OR category_id = $1)
                    ORDER BY category_id ASC, "order" ASC, id ASC
                    "#,
                )
                .bind(category_id)
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub(super) async fn insert_subcategory_row(
        &self,
        category_id: EntityId,
        fields: &SubcategoryFields,
        order: i32,
    ) -> Result<Subcategory, DomainError> {
        let row: SubcategoryRow = self
            .timed(
                "insert_subcategory",
                sqlx::query_as(
                    r#"
                    INSERT INTO subcategories
                        (category_id, name_tr, name_en, description_tr, description_en, image_url, "order")
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING id, category_id, name_tr, name_en, description_tr, description_en,
                              image_url, "order", created_at
                    "#,
                )
                .bind(category_id)
                .bind(&fields.name_tr)
                .bind(&fields.name_en)
                .bind(&fields.description_tr)
                .bind(&fields.description_en)
                .bind(&fields.image_url)
                .bind(order)
                .fetch_one(&self.pool),
            )
            .await?;

        info!("Subcategory row inserted: {} (category {})", row.id, category_id);
        Ok(row.into())
    }

    pub(super) async fn update_subcategory_row(
        &self,
        id: EntityId,
        fields: &SubcategoryFields,
    ) -> Result<Subcategory, DomainError> {
        let row: Option<SubcategoryRow> = self
            .timed(
                "update_subcategory",
                sqlx::query_as(
                    r#"
                    UPDATE subcategories
                    SET name_tr = $2, name_en = $3, description_tr = $4, description_en = $5,
                        image_url = $6
                    WHERE id = $1
                    RETURNING id, category_id, name_tr, name_en, description_tr, description_en,
                              image_url, "order", created_at
                    "#,
                )
                .bind(id)
                .bind(&fields.name_tr)
                .bind(&fields.name_en)
                .bind(&fields.description_tr)
                .bind(&fields.description_en)
                .bind(&fields.image_url)
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(|r| r.into())
            .ok_or_else(|| DomainError::not_found(EntityKind::Subcategory, id))
    }

    /// Fails with `ValidationFailed` while menu items still reference the row.
    pub(super) async fn delete_subcategory_row(&self, id: EntityId) -> Result<(), DomainError> {
        let done = self
            .timed(
                "delete_subcategory",
                sqlx::query("DELETE FROM subcategories WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Subcategory, id));
        }
        Ok(())
    }

    pub(super) async fn set_subcategory_position(
        &self,
        category_id: EntityId,
        id: EntityId,
        position: i32,
    ) -> Result<(), DomainError> {
        let done = self
            .timed(
                "set_subcategory_position",
                sqlx::query(
                    r#"UPDATE subcategories SET "order" = $3 WHERE id = $1 AND category_id = $2"#,
                )
                .bind(id)
                .bind(category_id)
                .bind(position)
                .execute(&self.pool),
            )
            .await?;

        if done.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Subcategory, id));
        }
        Ok(())
    }
}
