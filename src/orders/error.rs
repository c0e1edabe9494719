//! Checkout error surface
//!
//! The two refusal shapes clients can act on keep their raw bodies:
//! field errors as `{ field: [messages] }`, line errors as
//! `{ items: [line errors] }`. Store failures fall through to the
//! generic [`AppError`] body.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use super::validate::FieldErrors;
use crate::db::repository::RepoError;
use crate::utils::AppError;

/// One failed cart line
#[derive(Debug, Clone, Serialize)]
pub struct LineError {
    pub product_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,
    pub detail: String,
}

impl LineError {
    pub fn not_found(product_id: i64) -> Self {
        Self {
            product_id,
            title: None,
            available: None,
            detail: "product not found".to_string(),
        }
    }

    /// `available` is the stock read under the write lock, so it is the
    /// authoritative value at decision time.
    pub fn insufficient(product_id: i64, title: &str, available: i64) -> Self {
        Self {
            product_id,
            title: Some(title.to_string()),
            available: Some(available),
            detail: "insufficient stock".to_string(),
        }
    }
}

/// Why a checkout was refused
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Shipping or cart-shape validation failed, before any I/O
    #[error("field validation failed")]
    Fields(FieldErrors),

    /// One or more cart lines failed; the transaction was rolled back
    #[error("cart line validation failed")]
    Lines(Vec<LineError>),

    /// The store failed underneath checkout
    #[error(transparent)]
    Store(#[from] RepoError),
}

/// A body that fails JSON extraction (bad syntax, type mismatch) is
/// reported in the same field-map shape as validation, under `body`.
impl From<JsonRejection> for CheckoutError {
    fn from(rejection: JsonRejection) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert("body".to_string(), vec![rejection.body_text()]);
        CheckoutError::Fields(errors)
    }
}

#[derive(Serialize)]
struct LineErrorBody {
    items: Vec<LineError>,
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        match self {
            CheckoutError::Fields(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            CheckoutError::Lines(items) => {
                (StatusCode::BAD_REQUEST, Json(LineErrorBody { items })).into_response()
            }
            CheckoutError::Store(err) => AppError::from(err).into_response(),
        }
    }
}
