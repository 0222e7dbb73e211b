//! # Routes
//!
//! HTTP handlers. Each one takes the ledger lock once, runs a single
//! [`CartLedger`](billing_core::CartLedger) operation and returns its bill.
//!
//! ## Request Flow
//! ```text
//! POST /cart/add {"product": "towel", "qty": 2}
//!      │
//!      ▼
//! add_to_cart ──► with_ledger_mut ──► CartLedger::add_item
//!      │                                   │
//!      │◄──────── Ok(Bill) ────────────────┤
//!      │◄──────── Err(ProductNotFound) ────┘ ──► ApiError 404
//!      ▼
//! 200 {"cart": [...], "subtotal": 300.0, ..., "grand_total": 336.0}
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use billing_core::{Bill, Catalog, LineItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use crate::error::ApiError;
use crate::{AppState, IndexPage, EMBEDDED_INDEX_HTML};

// =============================================================================
// Request / Response Bodies
// =============================================================================

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub product: String,
    pub qty: i64,
}

/// Body of `POST /cart/discount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRequest {
    #[serde(deserialize_with = "any_percent")]
    pub discount_percent: Decimal,
}

/// Reads any finite JSON number as a percentage. Numbers beyond
/// `Decimal`'s range clamp to `Decimal::MAX` / `Decimal::MIN`.
fn any_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(match value.to_string().parse::<Decimal>() {
        Ok(percent) => percent,
        Err(_) if value.abs() < 1.0 => Decimal::ZERO,
        Err(_) if value.is_sign_negative() => Decimal::MIN,
        Err(_) => Decimal::MAX,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsResponse {
    pub products: Catalog,
}

/// Body of `DELETE /cart`.
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
    pub cart: Vec<LineItem>,
    pub bill: Bill,
}

// =============================================================================
// Router
// =============================================================================

/// Builds the application router with CORS applied to every route.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/discount", post(apply_discount))
        .route("/cart/remove/{product}", delete(remove_from_cart))
        .layer(cors)
        .with_state(Arc::new(state))
}

// =============================================================================
// Handlers
// =============================================================================

async fn health() -> impl IntoResponse {
    "OK"
}

async fn index_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    match &state.index {
        IndexPage::Embedded => Ok(Html(EMBEDDED_INDEX_HTML.to_string())),
        IndexPage::File(path) => tokio::fs::read_to_string(path).await.map(Html).map_err(|e| {
            ApiError::internal(format!("Failed to read {}: {}", path.display(), e))
        }),
    }
}

async fn list_products(State(state): State<Arc<AppState>>) -> Json<ProductsResponse> {
    debug!(count = state.catalog.len(), "list_products");
    Json(ProductsResponse {
        products: Catalog::clone(&state.catalog),
    })
}

async fn get_cart(State(state): State<Arc<AppState>>) -> Json<Bill> {
    debug!("get_cart");
    Json(state.ledger.with_ledger(|l| l.compute_bill()))
}

async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<Bill>, ApiError> {
    debug!(product = %req.product, qty = req.qty, "add_to_cart");
    let bill = state
        .ledger
        .with_ledger_mut(|l| l.add_item(&req.product, req.qty))?;
    Ok(Json(bill))
}

async fn apply_discount(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DiscountRequest>,
) -> Json<Bill> {
    debug!(discount_percent = %req.discount_percent, "apply_discount");
    Json(state.ledger.with_ledger_mut(|l| l.set_discount(req.discount_percent)))
}

async fn remove_from_cart(
    State(state): State<Arc<AppState>>,
    Path(product): Path<String>,
) -> Result<Json<Bill>, ApiError> {
    debug!(product = %product, "remove_from_cart");
    let bill = state.ledger.with_ledger_mut(|l| l.remove_item(&product))?;
    Ok(Json(bill))
}

async fn clear_cart(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    debug!("clear_cart");
    let bill = state.ledger.with_ledger_mut(|l| l.clear());
    Json(ClearResponse {
        message: "Cart cleared",
        cart: Vec::new(),
        bill,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tokio::task::JoinSet;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Catalog::builtin(), IndexPage::Embedded))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn approx(value: &Value, expected: f64) -> bool {
        value.as_f64().is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_list_products() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/products", None).await;

        assert_eq!(status, StatusCode::OK);
        let products = body["products"].as_object().unwrap();
        assert_eq!(products.len(), 13);
        assert!(approx(&products["towel"], 150.0));
        assert!(approx(&products["gripe water 100ml"], 30.0));
    }

    #[tokio::test]
    async fn test_add_then_discount_scenario() {
        let app = app();

        let towels = json!({"product": "towel", "qty": 2});
        let (status, bill) = send(&app, Method::POST, "/cart/add", Some(towels)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(approx(&bill["subtotal"], 300.0));

        send(&app, Method::POST, "/cart/add", Some(json!({"product": "rubber", "qty": 1}))).await;

        let (status, bill) =
            send(&app, Method::POST, "/cart/discount", Some(json!({"discount_percent": 10}))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(approx(&bill["subtotal"], 330.0));
        assert!(approx(&bill["discount_amount"], 33.0));
        assert!(approx(&bill["discounted_subtotal"], 297.0));
        assert!(approx(&bill["cgst"], 17.82));
        assert!(approx(&bill["sgst"], 17.82));
        assert!(approx(&bill["grand_total"], 332.64));
        assert_eq!(bill["cart"].as_array().unwrap().len(), 2);

        let (_, viewed) = send(&app, Method::GET, "/cart", None).await;
        assert_eq!(viewed, bill);
    }

    #[tokio::test]
    async fn test_discount_beyond_decimal_range_is_clamped() {
        let app = app();
        send(&app, Method::POST, "/cart/add", Some(json!({"product": "towel", "qty": 1}))).await;

        let discount = json!({"discount_percent": 1e30});
        let (status, bill) = send(&app, Method::POST, "/cart/discount", Some(discount)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(bill["discount_percent"].as_f64().unwrap() > 7.9e28);
        assert!(bill["grand_total"].as_f64().unwrap() < 0.0);

        let discount = json!({"discount_percent": -1e30});
        let (status, bill) = send(&app, Method::POST, "/cart/discount", Some(discount)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(bill["discount_percent"].as_f64().unwrap() < -7.9e28);
        assert!(bill["grand_total"].as_f64().unwrap() > 0.0);

        let discount = json!({"discount_percent": 12.5});
        let (status, bill) = send(&app, Method::POST, "/cart/discount", Some(discount)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(approx(&bill["discount_percent"], 12.5));
        assert!(approx(&bill["discount_amount"], 18.75));
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_404() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/cart/add",
            Some(json!({"product": "unknown-product", "qty": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PRODUCT_NOT_FOUND");

        let (_, bill) = send(&app, Method::GET, "/cart", None).await;
        assert!(approx(&bill["subtotal"], 0.0));
        assert_eq!(bill["cart"], json!([]));
    }

    #[tokio::test]
    async fn test_remove_from_empty_cart_is_404() {
        let app = app();
        let (status, body) = send(&app, Method::DELETE, "/cart/remove/towel", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PRODUCT_NOT_IN_CART");
        assert_eq!(body["detail"], "Product not in cart: towel");
    }

    #[tokio::test]
    async fn test_remove_decodes_product_name() {
        let app = app();
        send(&app, Method::POST, "/cart/add", Some(json!({"product": "baby oil", "qty": 2}))).await;
        send(&app, Method::POST, "/cart/add", Some(json!({"product": "baby oil", "qty": 1}))).await;

        let (status, bill) = send(&app, Method::DELETE, "/cart/remove/baby%20oil", None).await;

        assert_eq!(status, StatusCode::OK);
        let cart = bill["cart"].as_array().unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0]["qty"], 1);
        assert!(approx(&bill["subtotal"], 250.0));
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let app = app();
        send(&app, Method::POST, "/cart/add", Some(json!({"product": "Toys", "qty": 3}))).await;
        send(&app, Method::POST, "/cart/discount", Some(json!({"discount_percent": 5.5}))).await;

        let (status, body) = send(&app, Method::DELETE, "/cart", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cart cleared");
        assert_eq!(body["cart"], json!([]));
        assert_eq!(body["bill"]["cart"], json!([]));
        assert!(approx(&body["bill"]["subtotal"], 0.0));
        assert!(approx(&body["bill"]["discount_percent"], 0.0));
        assert!(approx(&body["bill"]["grand_total"], 0.0));
    }

    #[tokio::test]
    async fn test_negative_qty_is_accepted() {
        let app = app();
        let returned = json!({"product": "socks", "qty": -2});
        let (status, bill) = send(&app, Method::POST, "/cart/add", Some(returned)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(approx(&bill["subtotal"], -120.0));
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let app = app();
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/cart/add")
            .header(header::ORIGIN, "http://till.local")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_index_page_embedded_and_from_file() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, EMBEDDED_INDEX_HTML.as_bytes());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<h1>Till 2</h1>").unwrap();
        let app = router(AppState::new(
            Catalog::builtin(),
            IndexPage::File(file.path().to_path_buf()),
        ));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Till 2</h1>");
    }

    #[test]
    fn test_embedded_page_sets_product_names_as_text() {
        assert!(!EMBEDDED_INDEX_HTML.contains("innerHTML"));
        assert!(EMBEDDED_INDEX_HTML.contains("textContent = text"));
        assert!(EMBEDDED_INDEX_HTML.contains("encodeURIComponent(product)"));
    }

    #[tokio::test]
    async fn test_missing_index_file_is_500() {
        let app = router(AppState::new(
            Catalog::builtin(),
            IndexPage::File("/nonexistent/billing/index.html".into()),
        ));
        let (status, body) = send(&app, Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL");
    }

    #[tokio::test]
    async fn test_concurrent_requests_keep_subtotal() {
        let app = app();
        let mut tasks = JoinSet::new();
        for _ in 0..50 {
            let app = app.clone();
            tasks.spawn(async move {
                let soap = json!({"product": "Baby Soap", "qty": 1});
                send(&app, Method::POST, "/cart/add", Some(soap)).await.0
            });
        }
        while let Some(status) = tasks.join_next().await {
            assert_eq!(status.unwrap(), StatusCode::OK);
        }

        let (_, bill) = send(&app, Method::GET, "/cart", None).await;
        assert_eq!(bill["cart"].as_array().unwrap().len(), 50);
        assert!(approx(&bill["subtotal"], 3000.0));
    }
}
