//! In-memory [`ProductRepo`] with the same filter and ordering rules as the
//! MySQL statements. Used by router tests.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

use super::model::{Product, ProductInput};
use super::query::{FilterRequest, PageResult, Pagination};
use super::repo::ProductRepo;

#[derive(Default)]
pub struct InMemoryProductRepo {
    rows: Mutex<Vec<Product>>,
    fail: AtomicBool,
}

impl InMemoryProductRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent call returns a pool error.
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> sqlx::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Product>> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn matches(product: &Product, filter: &FilterRequest) -> bool {
    if let Some(category) = &filter.category {
        if product.category.as_deref() != Some(category.as_str()) {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let in_name = product.name.to_lowercase().contains(&needle);
        let in_description = product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle));
        if !in_name && !in_description {
            return false;
        }
    }
    true
}

#[async_trait]
impl ProductRepo for InMemoryProductRepo {
    async fn find_all(&self, filter: &FilterRequest) -> sqlx::Result<PageResult> {
        self.check()?;
        let mut hits: Vec<Product> = self
            .rows()
            .iter()
            .filter(|p| matches(p, filter))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = hits.len() as i64;
        let products = hits
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit as usize)
            .collect();
        Ok(PageResult {
            products,
            pagination: Pagination::for_filter(filter, total),
        })
    }

    async fn find_by_id(&self, id: u64) -> sqlx::Result<Option<Product>> {
        self.check()?;
        Ok(self.rows().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: &ProductInput) -> sqlx::Result<Product> {
        self.check()?;
        let mut rows = self.rows();
        let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let now = OffsetDateTime::now_utc();
        let product = Product {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            category: input.category.clone(),
            stock_quantity: input.stock_quantity,
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: u64, input: &ProductInput) -> sqlx::Result<Option<Product>> {
        self.check()?;
        let mut rows = self.rows();
        let Some(row) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        row.name = input.name.clone();
        row.description = input.description.clone();
        row.price = input.price;
        row.category = input.category.clone();
        row.stock_quantity = input.stock_quantity;
        row.image_url = input.image_url.clone();
        row.updated_at =
            OffsetDateTime::now_utc().max(row.updated_at + Duration::milliseconds(1));
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: u64) -> sqlx::Result<bool> {
        self.check()?;
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }

    async fn categories(&self) -> sqlx::Result<Vec<String>> {
        self.check()?;
        let set: BTreeSet<String> = self
            .rows()
            .iter()
            .filter_map(|p| p.category.clone())
            .collect();
        Ok(set.into_iter().collect())
    }
}
