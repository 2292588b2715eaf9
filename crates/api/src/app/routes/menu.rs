use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, put},
    Json, Router,
};

use tuckshop_catalog::{minor_units_from_major, MenuItemPatch, NewMenuItem};
use tuckshop_core::{CategoryId, ItemId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_menu).post(create_item))
        .route("/:id", put(update_item))
        .route("/:id/availability", patch(set_availability))
}

pub async fn get_menu(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.menu().await {
        Ok(menu) => (StatusCode::OK, Json(dto::menu_to_json(&menu))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateMenuItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let price_cents = match minor_units_from_major(body.price) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let new = NewMenuItem {
        category_id: CategoryId(body.category_id),
        name: body.name,
        description: body.description,
        price_cents,
        available: body.available,
    };

    match services.create_item(&new).await {
        Ok(id) => (StatusCode::CREATED, Json(serde_json::json!({ "id": id.0 }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    body: Result<Json<dto::UpdateMenuItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let price_cents = match body.price.map(minor_units_from_major).transpose() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let patch = MenuItemPatch {
        name: body.name,
        description: body.description,
        price_cents,
    };

    match services.update_item(ItemId(id), &patch).await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "ok": true }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn set_availability(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    body: Result<Json<dto::SetAvailabilityRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.set_availability(ItemId(id), body.available).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "ok": true }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
