//! # PostgreSQL Product Tax Rate Repository
//!
//! PostgreSQL implementation of [`ProductTaxRateRepository`] using sqlx.
//!
//! Reads the `product_tax_rate` association table:
//!
//! ```sql
//! CREATE TABLE product_tax_rate (
//!     product_id VARCHAR NOT NULL,
//!     rate_id    VARCHAR NOT NULL,
//!     metadata   JSONB,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     PRIMARY KEY (product_id, rate_id)
//! );
//! ```

use crate::domain::entities::product_tax_rate::ProductTaxRate;
use crate::domain::value_objects::ids::{ProductId, TaxRateId};
use crate::infrastructure::persistence::traits::{
    ProductTaxRateFilter, ProductTaxRateRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// PostgreSQL implementation of [`ProductTaxRateRepository`].
///
/// # Examples
///
/// ```ignore
/// use tax_provider::infrastructure::persistence::postgres::PgProductTaxRateRepository;
///
/// let repo = PgProductTaxRateRepository::connect("postgres://...", 5).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PgProductTaxRateRepository {
    pool: PgPool,
}

impl PgProductTaxRateRepository {
    /// Creates a repository on an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the pool cannot connect.
    pub async fn connect(url: &str, max_connections: u32) -> RepositoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductTaxRateRepository for PgProductTaxRateRepository {
    async fn list(&self, filter: &ProductTaxRateFilter) -> RepositoryResult<Vec<ProductTaxRate>> {
        if filter.rate_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rate_ids: Vec<String> = filter
            .rate_ids
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();

        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT product_id, rate_id
            FROM product_tax_rate
            WHERE product_id = $1 AND rate_id = ANY($2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(filter.product_id.as_str())
        .bind(rate_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                RepositoryError::connection(e.to_string())
            }
            other => RepositoryError::query(other.to_string()),
        })?;

        rows.into_iter()
            .map(|(product_id, rate_id)| {
                let product_id = ProductId::new(product_id)
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                let rate_id = TaxRateId::new(rate_id)
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                Ok(ProductTaxRate::new(product_id, rate_id))
            })
            .collect()
    }
}
