use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stockbook_core::{CoreError, Inventory};
use stockbook_domain::{Direction, PeriodFilter, Product, Report, ReportKind};
use tracing::{info, warn};

use super::payloads::{
    CategoryActionBody, CategoryDeleteBody, GenerateReportBody, NewProductBody, StockBody,
};
use super::responses::{
    message_response, ApiFailure, CategorizedProductRow, LedgerRow, ProductRow,
};
use super::AppState;

type ApiResult = Result<Response, ApiFailure>;

/// Runs store-bound work off the async executor.
async fn blocking<T, F>(state: &AppState, work: F) -> Result<T, ApiFailure>
where
    F: FnOnce(&Inventory) -> Result<T, CoreError> + Send + 'static,
    T: Send + 'static,
{
    let inventory = state.inventory.clone();
    tokio::task::spawn_blocking(move || work(&inventory))
        .await
        .map_err(|err| ApiFailure::internal(format!("worker failed: {err}")))?
        .map_err(ApiFailure::from)
}

fn require(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn health_handler() -> Response {
    Json(json!({"status": "OK", "message": "Server is running"})).into_response()
}

pub async fn dashboard_stats_handler(State(state): State<AppState>) -> ApiResult {
    let (summary, failure) = blocking(&state, |inv| Ok(inv.dashboard_or_zeroed())).await?;
    let status = match failure {
        Some(err) => ApiFailure::from(err).status,
        None => StatusCode::OK,
    };
    Ok((status, Json(summary)).into_response())
}

pub async fn products_list_handler(State(state): State<AppState>) -> ApiResult {
    let levels = blocking(&state, |inv| inv.stock_levels()).await?;
    let rows: Vec<ProductRow> = levels.into_iter().map(ProductRow::from).collect();
    Ok(Json(rows).into_response())
}

pub async fn products_create_handler(
    State(state): State<AppState>,
    body: Result<Json<NewProductBody>, JsonRejection>,
) -> ApiResult {
    let Json(body) = body?;
    let (Some(id), Some(main_cat)) = (require(body.id), require(body.main_cat)) else {
        return Err(ApiFailure::bad_request("Missing required fields"));
    };
    let product = Product::new(id, main_cat, body.sub_cat);
    let added = blocking(&state, move |inv| inv.add_product(product)).await?;
    info!(product = %added.id, "product added via api");
    Ok(message_response("Product added successfully!"))
}

pub async fn products_delete_handler(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult {
    let Query(params) = params?;
    let Some(id) = require(params.get("id").cloned()) else {
        return Err(ApiFailure::bad_request("Missing product id"));
    };
    blocking(&state, move |inv| inv.delete_product(&id)).await?;
    Ok(message_response("Product deleted successfully!"))
}

pub async fn products_with_categories_handler(State(state): State<AppState>) -> ApiResult {
    let levels = blocking(&state, |inv| inv.products()).await?;
    let rows: Vec<CategorizedProductRow> =
        levels.into_iter().map(CategorizedProductRow::from).collect();
    Ok(Json(rows).into_response())
}

async fn record_movement(
    state: AppState,
    body: Result<Json<StockBody>, JsonRejection>,
    direction: Direction,
) -> ApiResult {
    let Json(body) = body?;
    let movement = body.into_movement(direction)?;
    blocking(&state, move |inv| inv.record_movement(&movement)).await?;
    Ok(message_response(match direction {
        Direction::In => "Stock In recorded successfully!",
        Direction::Out => "Stock Out recorded successfully!",
    }))
}

pub async fn stock_in_handler(
    State(state): State<AppState>,
    body: Result<Json<StockBody>, JsonRejection>,
) -> ApiResult {
    record_movement(state, body, Direction::In).await
}

pub async fn stock_out_handler(
    State(state): State<AppState>,
    body: Result<Json<StockBody>, JsonRejection>,
) -> ApiResult {
    record_movement(state, body, Direction::Out).await
}

async fn list_movements(state: AppState, direction: Direction) -> ApiResult {
    let entries = blocking(&state, move |inv| inv.movements(direction)).await?;
    let rows: Vec<LedgerRow> = entries.into_iter().map(LedgerRow::from).collect();
    Ok(Json(rows).into_response())
}

pub async fn stock_in_list_handler(State(state): State<AppState>) -> ApiResult {
    list_movements(state, Direction::In).await
}

pub async fn stock_out_list_handler(State(state): State<AppState>) -> ApiResult {
    list_movements(state, Direction::Out).await
}

pub async fn ledger_handler(State(state): State<AppState>) -> ApiResult {
    let entries = blocking(&state, |inv| inv.entries()).await?;
    let rows: Vec<LedgerRow> = entries.into_iter().map(LedgerRow::from).collect();
    Ok(Json(rows).into_response())
}

/// Report body; an unreachable store yields the empty report with 503.
fn report_response(result: Result<Report, ApiFailure>) -> ApiResult {
    match result {
        Ok(report) => Ok(Json(report).into_response()),
        Err(failure) if failure.is_unavailable() => {
            warn!(error = %failure.message, "report degraded");
            Ok((failure.status, Json(Report::default())).into_response())
        }
        Err(failure) => Err(failure),
    }
}

pub async fn simple_report_handler(State(state): State<AppState>) -> ApiResult {
    report_response(blocking(&state, |inv| inv.report(&PeriodFilter::All)).await)
}

async fn period_report(
    state: AppState,
    kind: ReportKind,
    period: Option<String>,
) -> ApiResult {
    report_response(
        blocking(&state, move |inv| {
            inv.report_for(kind, period.as_deref())
                .map(|(report, _)| report)
        })
        .await,
    )
}

pub async fn monthly_report_handler(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult {
    let Query(params) = params?;
    period_report(state, ReportKind::Monthly, params.get("month").cloned()).await
}

pub async fn daily_report_handler(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult {
    let Query(params) = params?;
    period_report(state, ReportKind::Daily, params.get("date").cloned()).await
}

pub async fn generate_report_handler(
    State(state): State<AppState>,
    body: Result<Json<GenerateReportBody>, JsonRejection>,
) -> ApiResult {
    let Json(body) = body?;
    let kind = body
        .kind
        .as_deref()
        .map(ReportKind::from_label)
        .unwrap_or_default();
    let period = body.period;
    let generated =
        blocking(&state, move |inv| inv.generate_report(kind, period.as_deref())).await?;
    Ok(Json(json!({
        "message": "Report generated and saved successfully",
        "reportId": generated.report_id,
        "type": generated.kind,
        "period": generated.period,
        "generatedAt": generated.generated_at,
        "data": generated.report,
    }))
    .into_response())
}

pub async fn categories_handler(State(state): State<AppState>) -> ApiResult {
    let tree = blocking(&state, |inv| inv.categories()).await?;
    Ok(Json(tree).into_response())
}

pub async fn categories_action_handler(
    State(state): State<AppState>,
    body: Result<Json<CategoryActionBody>, JsonRejection>,
) -> ApiResult {
    let Json(body) = body?;
    match body.action.as_deref().map(str::trim) {
        Some("update_product") => {
            let (Some(id), Some(main)) = (require(body.product_id), require(body.main_category))
            else {
                return Err(ApiFailure::bad_request(
                    "Product ID and main category are required",
                ));
            };
            let sub = body.sub_category;
            blocking(&state, move |inv| inv.update_categories(&id, &main, sub)).await?;
            Ok(message_response("Product categories updated successfully"))
        }
        Some("add_main") => Ok(message_response(
            "Main category will be created when used in products",
        )),
        Some("add_sub") => Ok(message_response(
            "Sub category will be created when used in products",
        )),
        _ => Err(ApiFailure::bad_request("Invalid action")),
    }
}

pub async fn categories_delete_handler(
    State(state): State<AppState>,
    body: Result<Json<CategoryDeleteBody>, JsonRejection>,
) -> ApiResult {
    let Json(body) = body?;
    let Some(name) = require(body.category) else {
        return Err(ApiFailure::bad_request("Missing category name"));
    };
    match body.kind.as_deref().map(str::trim) {
        Some("main") => {
            let count = blocking(&state, move |inv| inv.clear_main_category(&name)).await?;
            Ok(message_response(format!(
                "Main category removed from {count} products"
            )))
        }
        Some("sub") => {
            let main = body.main_category.unwrap_or_default();
            let count =
                blocking(&state, move |inv| inv.clear_sub_category(&main, &name)).await?;
            Ok(message_response(format!(
                "Sub category removed from {count} products"
            )))
        }
        _ => Err(ApiFailure::bad_request("Invalid category type")),
    }
}
