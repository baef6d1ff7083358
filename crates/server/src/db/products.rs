//! Product repository for database operations.
//!
//! Queries are checked at runtime (`sqlx::query` + `Row::try_get`). SKU
//! uniqueness is left to the `UNIQUE` constraint on `products.sku`; a
//! violation comes back as [`RepositoryError::Conflict`] and no row changes.

use inventory_core::{Price, Product, ProductId, Size, Sku, ValidatedProduct};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{RepositoryError, conflict_on_unique};

/// Message carried by [`RepositoryError::Conflict`] for a taken SKU.
pub const DUPLICATE_SKU: &str = "SKU must be unique.";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, sku, price, size, color, quantity, brand, category
            FROM products
            ORDER BY id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(product_from_row).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, name, sku, price, size, color, quantity, brand, category
            FROM products
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        product_from_row(&row)
    }

    /// Insert a product and return it with its new ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the SKU is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, product: &ValidatedProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query(
            r"
            INSERT INTO products (name, sku, price, size, color, quantity, brand, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING id, name, sku, price, size, color, quantity, brand, category
            ",
        )
        .bind(&product.name)
        .bind(product.sku.as_str())
        .bind(product.price.to_f64())
        .bind(product.size.as_str())
        .bind(product.color.as_deref())
        .bind(product.quantity)
        .bind(product.brand.as_deref())
        .bind(product.category.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_SKU))?;

        let created = product_from_row(&row)?;
        tracing::info!(product_id = %created.id, sku = %created.sku, "Product created");
        Ok(created)
    }

    /// Replace every mutable field of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Conflict` if the SKU belongs to another product.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        product: &ValidatedProduct,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query(
            r"
            UPDATE products
            SET name = ?1, sku = ?2, price = ?3, size = ?4, color = ?5,
                quantity = ?6, brand = ?7, category = ?8
            WHERE id = ?9
            RETURNING id, name, sku, price, size, color, quantity, brand, category
            ",
        )
        .bind(&product.name)
        .bind(product.sku.as_str())
        .bind(product.price.to_f64())
        .bind(product.size.as_str())
        .bind(product.color.as_deref())
        .bind(product.quantity)
        .bind(product.brand.as_deref())
        .bind(product.category.as_deref())
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, DUPLICATE_SKU))?
        .ok_or(RepositoryError::NotFound)?;

        let updated = product_from_row(&row)?;
        tracing::info!(product_id = %updated.id, sku = %updated.sku, "Product updated");
        Ok(updated)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

fn product_from_row(row: &SqliteRow) -> Result<Product, RepositoryError> {
    let sku: String = row.try_get("sku")?;
    let price: f64 = row.try_get("price")?;
    let size: String = row.try_get("size")?;

    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        sku: Sku::parse(&sku)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid sku in database: {e}")))?,
        price: Price::from_f64(price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?,
        size: size.parse::<Size>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid size in database: {e}"))
        })?,
        color: row.try_get("color")?,
        quantity: row.try_get("quantity")?,
        brand: row.try_get("brand")?,
        category: row.try_get("category")?,
    })
}
