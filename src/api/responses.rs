use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use stockbook_core::CoreError;
use stockbook_domain::{LedgerEntry, ProductStock};
use tracing::warn;

#[must_use]
pub fn core_error_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) | CoreError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::DuplicateProduct(_) => StatusCode::CONFLICT,
        CoreError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// `{"error": message}` with the given status.
#[must_use]
pub fn api_error_response(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({ "error": message }));
    let mut resp = (status, body).into_response();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        resp.headers_mut()
            .insert("retry-after", HeaderValue::from_static("5"));
    }
    resp
}

#[must_use]
pub fn message_response(message: impl Into<String>) -> Response {
    Json(json!({ "message": message.into() })).into_response()
}

/// Handler failure rendered as the standard error payload.
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ApiFailure {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.status == StatusCode::SERVICE_UNAVAILABLE
    }
}

impl From<CoreError> for ApiFailure {
    fn from(err: CoreError) -> Self {
        let status = core_error_status(&err);
        if status.is_server_error() {
            warn!(error = %err, status = status.as_u16(), "request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        ApiFailure::bad_request(format!("invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rejection: QueryRejection) -> Self {
        ApiFailure::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        api_error_response(self.status, &self.message)
    }
}

/// Row of `GET /api/products`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: String,
    pub main_cat: String,
    pub sub_cat: String,
    pub quantity: i64,
}

impl From<ProductStock> for ProductRow {
    fn from(level: ProductStock) -> Self {
        Self {
            sub_cat: level.product.sub_category_or_blank().to_string(),
            id: level.product.id,
            main_cat: level.product.main_category,
            quantity: level.current_stock,
        }
    }
}

/// Row of `GET /api/products-with-categories`.
#[derive(Debug, Serialize)]
pub struct CategorizedProductRow {
    pub id: String,
    pub main_category: String,
    pub sub_category: Option<String>,
    pub current_stock: i64,
}

impl From<ProductStock> for CategorizedProductRow {
    fn from(level: ProductStock) -> Self {
        Self {
            id: level.product.id,
            main_category: level.product.main_category,
            sub_category: level.product.sub_category,
            current_stock: level.current_stock,
        }
    }
}

/// Ledger row as listed by `GET /api/reports` and the movement views.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    #[serde(rename = "type")]
    pub kind: String,
    pub product_id: String,
    pub quantity: i64,
    pub price: f64,
    pub date: String,
    pub main_cat: String,
    pub sub_cat: String,
}

impl From<LedgerEntry> for LedgerRow {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            kind: entry.kind.to_string(),
            product_id: entry.product_id,
            quantity: entry.quantity,
            price: entry.unit_price,
            date: entry.recorded_at,
            main_cat: entry.main_category,
            sub_cat: entry.sub_category,
        }
    }
}
