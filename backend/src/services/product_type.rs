//! Product type management service

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validate_required_text;

/// Product type service for the kinds of produce traded
#[derive(Clone)]
pub struct ProductTypeService {
    db: PgPool,
}

/// Product type record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating a product type
#[derive(Debug, Deserialize)]
pub struct CreateProductTypeInput {
    pub name: String,
    pub description: Option<String>,
}

/// Input for updating a product type
#[derive(Debug, Deserialize)]
pub struct UpdateProductTypeInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Filter for product type listings
#[derive(Debug, Deserialize)]
pub struct ProductTypeFilter {
    /// Free-text match against name
    pub search: Option<String>,
}

impl ProductTypeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product type
    pub async fn create(&self, input: CreateProductTypeInput) -> AppResult<ProductType> {
        validate_required_text(&input.name).map_err(|message| AppError::Validation {
            entity: "ProductType",
            field: "name",
            message: message.to_string(),
        })?;

        let product_type = sqlx::query_as::<_, ProductType>(
            r#"
            INSERT INTO product_types (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(product_type)
    }

    /// Get a product type by id
    pub async fn get(&self, id: Uuid) -> AppResult<ProductType> {
        sqlx::query_as::<_, ProductType>(
            "SELECT id, name, description FROM product_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound {
            entity: "ProductType",
            id,
        })
    }

    /// List product types
    pub async fn list(&self, filter: ProductTypeFilter) -> AppResult<Vec<ProductType>> {
        let product_types = sqlx::query_as::<_, ProductType>(
            r#"
            SELECT id, name, description
            FROM product_types
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY name ASC
            "#,
        )
        .bind(&filter.search)
        .fetch_all(&self.db)
        .await?;

        Ok(product_types)
    }

    /// Update a product type
    pub async fn update(&self, id: Uuid, input: UpdateProductTypeInput) -> AppResult<ProductType> {
        let existing = self.get(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let description = input.description.or(existing.description);

        validate_required_text(&name).map_err(|message| AppError::Validation {
            entity: "ProductType",
            field: "name",
            message: message.to_string(),
        })?;

        let product_type = sqlx::query_as::<_, ProductType>(
            r#"
            UPDATE product_types
            SET name = $1, description = $2
            WHERE id = $3
            RETURNING id, name, description
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(product_type)
    }

    /// Delete a product type. Blocked while any purchase references it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let child_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM purchases WHERE product_type_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        super::ensure_no_children("ProductType", id, "Purchase", child_count)?;

        let result = sqlx::query("DELETE FROM product_types WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                entity: "ProductType",
                id,
            });
        }

        tx.commit().await?;
        Ok(())
    }
}
