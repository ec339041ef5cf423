use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::model::ProductInput;
use super::query::FilterRequest;
use crate::error::ApiError;

/// Raw `GET /products` query string. Everything arrives as text and is
/// coerced in [`ListParams::into_filter`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn into_filter(self, max_limit: i64) -> FilterRequest {
        FilterRequest::new(
            self.page.as_deref().and_then(parse_int),
            self.limit.as_deref().and_then(parse_int),
            self.category,
            self.search,
        )
        .with_limit_cap(max_limit)
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Loose create/update body; numbers may arrive as JSON numbers or strings.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub category: Option<String>,
    pub stock_quantity: Option<Value>,
    pub image_url: Option<String>,
}

impl ProductPayload {
    pub fn validate(self) -> Result<ProductInput, ApiError> {
        let name = optional_text(self.name);
        let price = self.price.filter(|v| !is_blank(v));
        let (Some(name), Some(price)) = (name, price) else {
            return Err(ApiError::validation("Name and price are required"));
        };

        let price = to_decimal(&price)
            .ok_or_else(|| ApiError::validation("Price must be a valid number"))?;
        if price < Decimal::ZERO {
            return Err(ApiError::validation("Price cannot be negative"));
        }

        let stock_quantity = match self.stock_quantity.filter(|v| !is_blank(v)) {
            None => 0,
            Some(v) => to_whole(&v).ok_or_else(|| {
                ApiError::validation("Stock quantity must be a whole number")
            })?,
        };
        if stock_quantity < 0 {
            return Err(ApiError::validation("Stock quantity cannot be negative"));
        }

        Ok(ProductInput {
            name,
            description: optional_text(self.description),
            price: price.round_dp(2),
            category: optional_text(self.category),
            stock_quantity,
            image_url: optional_text(self.image_url),
        })
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn to_whole(value: &Value) -> Option<i32> {
    let n = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(n).ok()
}
