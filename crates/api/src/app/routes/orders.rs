use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use tuckshop_core::OrderId;
use tuckshop_orders::{CustomerDetails, OrderLineRequest, OrderStatus};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_active).post(create_order))
        .route("/:id", get(get_order))
        .route("/:id/status", patch(update_status))
}

pub async fn list_active(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.active_orders().await {
        Ok(orders) => {
            let orders: Vec<_> = orders.iter().map(dto::order_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "orders": orders }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.order(OrderId(id)).await {
        Ok(order) => (StatusCode::OK, Json(dto::order_to_json(&order))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateOrderRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let customer = CustomerDetails {
        name: body.customer_name,
        phone: body.phone,
    };
    let requests: Vec<OrderLineRequest> = body.items.iter().map(dto::OrderItemRequest::to_domain).collect();

    match services.place_order(&customer, &requests).await {
        Ok(order) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "ok": true, "orderId": order.id.0 })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    body: Result<Json<dto::UpdateStatusRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let status: OrderStatus = match body.status.parse() {
        Ok(status) => status,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.update_status(OrderId(id), status).await {
        Ok(order) => (
            StatusCode::OK,
            Json(serde_json::json!({ "ok": true, "status": order.status.as_str() })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
