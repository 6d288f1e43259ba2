mod common;

use common::{get_json, send, send_json, spawn_server};
use serde_json::json;

async fn seeded_server() -> std::net::SocketAddr {
    let (inventory, _clock) = common::json_inventory();
    let addr = spawn_server(inventory).await;
    for (id, main, sub) in [("P-1", "Tools", "Hand"), ("P-2", "Paint", "")] {
        let (status, _) = send_json(
            addr,
            "POST",
            "/api/products",
            json!({"id": id, "mainCat": main, "subCat": sub}),
        )
        .await;
        assert_eq!(status, 200);
    }
    addr
}

#[tokio::test]
async fn health_reports_ok() {
    let (inventory, _) = common::json_inventory();
    let addr = spawn_server(inventory).await;
    let (status, body) = get_json(addr, "/api/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn product_lifecycle() {
    let addr = seeded_server().await;

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/products",
        json!({"id": "P-1", "mainCat": "Tools"}),
    )
    .await;
    assert_eq!(status, 409);
    assert!(body["error"].as_str().unwrap().contains("P-1"));

    let (status, body) = send_json(addr, "POST", "/api/products", json!({"id": "P-3"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required fields");

    let (status, products) = get_json(addr, "/api/products").await;
    assert_eq!(status, 200);
    assert_eq!(products.as_array().unwrap().len(), 2);
    assert_eq!(products[0]["mainCat"], "Tools");
    assert_eq!(products[0]["quantity"], 0);

    let (status, _, body) = send(addr, "DELETE", "/api/products?id=P-2", None).await;
    assert_eq!(status, 200);
    assert!(body.contains("Product deleted successfully!"));

    let (status, _, _) = send(addr, "DELETE", "/api/products?id=P-2", None).await;
    assert_eq!(status, 404);
    let (status, _, _) = send(addr, "DELETE", "/api/products", None).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn stock_flow_updates_levels_and_ledger() {
    let addr = seeded_server().await;

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/stockin",
        json!({"productId": "P-1", "quantity": "10", "price": 2.5}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Stock In recorded successfully!");

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/stockout",
        json!({"productId": "P-1", "quantity": 11, "price": 4}),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("Not enough stock"));

    let (status, _) = send_json(
        addr,
        "POST",
        "/api/stockout",
        json!({"productId": "P-1", "quantity": 4, "price": 4}),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/stockin",
        json!({"productId": "NOPE", "quantity": 1, "price": 1}),
    )
    .await;
    assert_eq!(status, 404);
    assert!(body["error"].is_string());

    let (_, products) = get_json(addr, "/api/products").await;
    assert_eq!(products[0]["quantity"], 6);

    let (_, ledger) = get_json(addr, "/api/reports").await;
    let rows = ledger.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["productId"], "P-1");
    assert_eq!(rows[0]["mainCat"], "Tools");
    assert_eq!(rows[0]["date"], "2024-03-15 10:00:00");

    let (_, outs) = get_json(addr, "/api/stockout").await;
    assert_eq!(outs.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_stock_fields_are_rejected() {
    let addr = seeded_server().await;
    let (status, body) = send_json(
        addr,
        "POST",
        "/api/stockin",
        json!({"productId": "P-1", "quantity": 3}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required stock fields");
}

#[tokio::test]
async fn oversized_quantities_are_rejected() {
    let addr = seeded_server().await;
    for quantity in [json!("1e30"), json!(9.3e18)] {
        let (status, body) = send_json(
            addr,
            "POST",
            "/api/stockin",
            json!({"productId": "P-1", "quantity": quantity, "price": 1}),
        )
        .await;
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("exceed"));
    }

    let (_, products) = get_json(addr, "/api/products").await;
    assert_eq!(products[0]["quantity"], 0);
}

#[tokio::test]
async fn reports_aggregate_and_filter_by_period() {
    let addr = seeded_server().await;
    send_json(
        addr,
        "POST",
        "/api/stockin",
        json!({"productId": "P-1", "quantity": 10, "price": 5}),
    )
    .await;
    send_json(
        addr,
        "POST",
        "/api/stockout",
        json!({"productId": "P-1", "quantity": 4, "price": 8}),
    )
    .await;

    let (status, report) = get_json(addr, "/api/simple-reports").await;
    assert_eq!(status, 200);
    assert_eq!(report["inventory"][0]["received"], 10);
    assert_eq!(report["inventory"][0]["sold"], 4);
    assert_eq!(report["inventory"][0]["remaining"], 6);
    assert_eq!(report["finance"]["purchases"], 50.0);
    assert_eq!(report["finance"]["sales"], 32.0);
    assert_eq!(report["finance"]["balance"], -18.0);

    let (_, march) = get_json(addr, "/api/monthly-report?month=2024-03").await;
    assert_eq!(march["inventory"].as_array().unwrap().len(), 1);
    let (_, april) = get_json(addr, "/api/monthly-report?month=2024-04").await;
    assert!(april["inventory"].as_array().unwrap().is_empty());

    let (_, day) = get_json(addr, "/api/daily-report?date=2024-03-15").await;
    assert_eq!(day["inventory"][0]["id"], "P-1");

    let (status, _) = get_json(addr, "/api/monthly-report?month=March").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn generate_report_returns_metadata() {
    let addr = seeded_server().await;
    send_json(
        addr,
        "POST",
        "/api/stockin",
        json!({"productId": "P-1", "quantity": 2, "price": 3}),
    )
    .await;

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/generate-report",
        json!({"type": "monthly", "period": "2024-03"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["type"], "monthly");
    assert_eq!(body["period"], "2024-03");
    assert!(body["reportId"].as_str().unwrap().len() >= 32);
    assert_eq!(body["data"]["inventory"][0]["received"], 2);
}

#[tokio::test]
async fn dashboard_counts_current_month() {
    let addr = seeded_server().await;
    send_json(
        addr,
        "POST",
        "/api/stockin",
        json!({"productId": "P-1", "quantity": 7, "price": 1}),
    )
    .await;

    let (status, body) = get_json(addr, "/api/dashboard-stats").await;
    assert_eq!(status, 200);
    assert_eq!(body["totalProducts"], 2);
    assert_eq!(body["monthlyStockIn"], 7);
    assert_eq!(body["monthlyStockOut"], 0);
    assert_eq!(body["totalPurchases"], 7.0);
}

#[tokio::test]
async fn categories_can_be_listed_updated_and_cleared() {
    let addr = seeded_server().await;

    let (_, tree) = get_json(addr, "/api/categories").await;
    assert_eq!(tree["main_categories"], json!(["Paint", "Tools"]));
    assert_eq!(tree["sub_categories"]["Tools"], json!(["Hand"]));

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/categories",
        json!({"action": "update_product", "product_id": "P-2", "main_category": "Tools", "sub_category": "Power"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Product categories updated successfully");

    let (status, _) = send_json(addr, "POST", "/api/categories", json!({"action": "rename"})).await;
    assert_eq!(status, 400);

    let (status, body) = send_json(
        addr,
        "DELETE",
        "/api/categories",
        json!({"type": "main", "category": "Tools"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Main category removed from 2 products");

    let (_, tree) = get_json(addr, "/api/categories").await;
    assert_eq!(tree["main_categories"], json!([]));
}

#[tokio::test]
async fn unavailable_store_degrades_dashboard_and_reports() {
    let addr = spawn_server(common::unavailable_inventory()).await;

    let (status, _, body) = send(addr, "GET", "/api/dashboard-stats", None).await;
    assert_eq!(status, 503);
    let summary: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(summary["totalProducts"], 0);

    let (status, report) = get_json(addr, "/api/simple-reports").await;
    assert_eq!(status, 503);
    assert!(report["inventory"].as_array().unwrap().is_empty());

    let (status, body) = get_json(addr, "/api/products").await;
    assert_eq!(status, 503);
    assert!(body["error"].is_string());
}
