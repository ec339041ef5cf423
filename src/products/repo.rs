use async_trait::async_trait;
use sqlx::MySqlPool;

use super::model::{Product, ProductInput};
use super::query::{FilterRequest, PageResult, Pagination, ProductQuery, PRODUCT_COLUMNS};

/// Product persistence. Every method is a single statement (create and
/// update re-read the row afterwards) and surfaces driver errors as-is.
#[async_trait]
pub trait ProductRepo: Send + Sync {
    async fn find_all(&self, filter: &FilterRequest) -> sqlx::Result<PageResult>;
    async fn find_by_id(&self, id: u64) -> sqlx::Result<Option<Product>>;
    async fn create(&self, input: &ProductInput) -> sqlx::Result<Product>;
    async fn update(&self, id: u64, input: &ProductInput) -> sqlx::Result<Option<Product>>;
    async fn delete(&self, id: u64) -> sqlx::Result<bool>;
    async fn categories(&self) -> sqlx::Result<Vec<String>>;
}

#[derive(Clone)]
pub struct MySqlProductRepo {
    pool: MySqlPool,
}

impl MySqlProductRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepo for MySqlProductRepo {
    async fn find_all(&self, filter: &FilterRequest) -> sqlx::Result<PageResult> {
        let query = ProductQuery::new(filter);

        let products = query
            .rows()
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = query
            .count()
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(PageResult {
            products,
            pagination: Pagination::for_filter(filter, total),
        })
    }

    async fn find_by_id(&self, id: u64) -> sqlx::Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create(&self, input: &ProductInput) -> sqlx::Result<Product> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, category, stock_quantity, image_url)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.category)
        .bind(input.stock_quantity)
        .bind(&input.image_url)
        .execute(&self.pool)
        .await?;

        // A concurrent delete between insert and re-read leaves nothing to return.
        self.find_by_id(result.last_insert_id())
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn update(&self, id: u64, input: &ProductInput) -> sqlx::Result<Option<Product>> {
        let result = sqlx::query(
            r#"
            UPDATE products
               SET name = ?, description = ?, price = ?, category = ?,
                   stock_quantity = ?, image_url = ?, updated_at = CURRENT_TIMESTAMP(3)
             WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.category)
        .bind(input.stock_quantity)
        .bind(&input.image_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: u64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn categories(&self) -> sqlx::Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category
              FROM products
             WHERE category IS NOT NULL
             ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
