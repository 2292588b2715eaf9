use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tuckshop_core::DomainError;
use tuckshop_store::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Sqlx(e) => {
            tracing::error!(error = %e, "store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "internal store failure",
            )
        }
    }
}

/// Bodies that fail to parse (missing fields, malformed JSON) never reach the
/// domain validators; give them the same `{error, message}` shape instead of
/// the extractor's plain-text 422.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "invalid_request",
        rejection.body_text(),
    )
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::ItemUnavailable(id) => json_error(
            StatusCode::BAD_REQUEST,
            "item_unavailable",
            format!("Item {id} unavailable"),
        ),
        DomainError::EmptyOrder => {
            json_error(StatusCode::BAD_REQUEST, "empty_order", "order has no items")
        }
        DomainError::InvalidStatus(status) => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_status",
            format!("Invalid status: {status}"),
        ),
        DomainError::InvalidTransition(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_transition", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
