mod dto;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
mod model;
mod query;
mod repo;

pub use model::{Product, ProductInput};
pub use query::{FilterRequest, PageResult, Pagination, ProductQuery};
pub use repo::{MySqlProductRepo, ProductRepo};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::product_routes()
}
