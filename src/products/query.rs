//! Listing query construction.
//!
//! The row query and the count query are assembled from the same predicate
//! so that `totalItems` always describes the set the page is cut from.

use serde::Serialize;
use sqlx::{MySql, QueryBuilder};

use super::model::Product;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

pub(crate) const PRODUCT_COLUMNS: &str =
    "id, name, description, price, category, stock_quantity, image_url, created_at, updated_at";

/// Normalised listing parameters. `page` and `limit` are always >= 1 and
/// blank filters are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub page: i64,
    pub limit: i64,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: None,
            search: None,
        }
    }
}

impl FilterRequest {
    pub fn new(
        page: Option<i64>,
        limit: Option<i64>,
        category: Option<String>,
        search: Option<String>,
    ) -> Self {
        Self {
            page: page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_LIMIT),
            category: non_blank(category),
            search: non_blank(search),
        }
    }

    pub fn with_limit_cap(mut self, max: i64) -> Self {
        self.limit = self.limit.min(max.max(1));
        self
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Escapes LIKE wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// Builds the row and count statements for one [`FilterRequest`].
pub struct ProductQuery<'f> {
    filter: &'f FilterRequest,
}

impl<'f> ProductQuery<'f> {
    pub fn new(filter: &'f FilterRequest) -> Self {
        Self { filter }
    }

    /// `SELECT ... ORDER BY created_at DESC LIMIT ? OFFSET ?`
    pub fn rows(&self) -> QueryBuilder<'static, MySql> {
        let mut qb = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        self.push_predicate(&mut qb);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        qb.push_bind(self.filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(self.filter.offset());
        qb
    }

    /// `SELECT COUNT(*)` over the same predicate as [`Self::rows`].
    pub fn count(&self) -> QueryBuilder<'static, MySql> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
        self.push_predicate(&mut qb);
        qb
    }

    fn push_predicate(&self, qb: &mut QueryBuilder<'static, MySql>) {
        qb.push(" WHERE 1=1");
        if let Some(category) = &self.filter.category {
            qb.push(" AND category = ");
            qb.push_bind(category.clone());
        }
        if let Some(search) = &self.filter.search {
            let pattern = like_pattern(search);
            qb.push(" AND (name LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR description LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl Pagination {
    /// `total_pages = ceil(total_items / limit)`; an empty set has 0 pages.
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let limit = limit.max(1);
        let total_items = total_items.max(0);
        Self {
            current_page: page,
            total_pages: (total_items + limit - 1) / limit,
            total_items,
            items_per_page: limit,
        }
    }

    pub fn for_filter(filter: &FilterRequest, total_items: i64) -> Self {
        Self::new(filter.page, filter.limit, total_items)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}
