//! Request bodies accepted by the HTTP API.

use serde::Deserialize;
use stockbook_domain::{Direction, StockMovement};

use super::responses::ApiFailure;

/// A JSON number, or a string holding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn to_f64(&self, field: &str) -> Result<f64, ApiFailure> {
        let value = match self {
            Numeric::Number(value) => *value,
            Numeric::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                ApiFailure::bad_request(format!("{field} must be a number (got `{text}`)"))
            })?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ApiFailure::bad_request(format!("{field} must be a finite number")))
        }
    }

    /// Whole units; decimals are truncated toward zero.
    pub fn to_quantity(&self) -> Result<i64, ApiFailure> {
        Ok(self.to_f64("quantity")?.trunc() as i64)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductBody {
    pub id: Option<String>,
    pub main_cat: Option<String>,
    pub sub_cat: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockBody {
    pub product_id: Option<String>,
    pub quantity: Option<Numeric>,
    pub price: Option<Numeric>,
}

impl StockBody {
    pub fn into_movement(self, direction: Direction) -> Result<StockMovement, ApiFailure> {
        let (Some(product_id), Some(quantity), Some(price)) =
            (self.product_id, self.quantity, self.price)
        else {
            return Err(ApiFailure::bad_request("Missing required stock fields"));
        };
        Ok(StockMovement::new(
            direction,
            product_id,
            quantity.to_quantity()?,
            price.to_f64("price")?,
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateReportBody {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryActionBody {
    pub action: Option<String>,
    pub product_id: Option<String>,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryDeleteBody {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub main_category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_body_accepts_numbers_and_numeric_strings() {
        let body: StockBody =
            serde_json::from_str(r#"{"productId":"A","quantity":"4.9","price":2}"#).unwrap();
        let movement = body.into_movement(Direction::In).unwrap();
        assert_eq!(movement.quantity, 4);
        assert_eq!(movement.unit_price, 2.0);
    }

    #[test]
    fn stock_body_rejects_missing_and_non_numeric_fields() {
        let body: StockBody = serde_json::from_str(r#"{"productId":"A","quantity":1}"#).unwrap();
        let err = body.into_movement(Direction::Out).unwrap_err();
        assert_eq!(err.message, "Missing required stock fields");

        let body: StockBody =
            serde_json::from_str(r#"{"productId":"A","quantity":"lots","price":1}"#).unwrap();
        assert_eq!(body.into_movement(Direction::Out).unwrap_err().status.as_u16(), 400);
    }
}
