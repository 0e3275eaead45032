//! Order routes.
//!
//! POST   /orders             - Validate and store a new order
//! GET    /orders             - List orders from every namespace
//! GET    /orders/{namespace} - List orders in one namespace
//! DELETE /orders             - Delete orders from every namespace
//! DELETE /orders/{namespace} - Delete orders in one namespace

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use tracing::{debug, error};

use crate::error::{ApiError, JSON_CONTENT_TYPE};
use crate::models::{CreateOrderRequest, Order};
use crate::repository::SharedRepository;

/// Build the orders router.
///
/// `/orders/` is routed to the namespaced handlers so that an empty
/// namespace segment is answered with 400 rather than 404.
pub fn router() -> Router {
    Router::new()
        .route(
            "/orders",
            get(get_orders).post(insert_order).delete(delete_orders),
        )
        .route(
            "/orders/",
            get(get_namespace_orders).delete(delete_namespace_orders),
        )
        .route(
            "/orders/{namespace}",
            get(get_namespace_orders).delete(delete_namespace_orders),
        )
}

/// Namespace taken from the `{namespace}` path segment.
///
/// Rejects with [`ApiError::MissingParameter`] when the segment is absent or
/// empty. Any other value, whitespace included, is passed through.
#[derive(Debug)]
pub struct Namespace(pub String);

impl<S> FromRequestParts<S> for Namespace
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Path(mut params)| params.remove("namespace"))
            .filter(|ns| !ns.is_empty())
            .map(Namespace)
            .ok_or(ApiError::MissingParameter("namespace"))
    }
}

/// Validate the payload, default its namespace, and store it.
async fn insert_order(
    Extension(repo): Extension<SharedRepository>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = body.map_err(|e| {
        error!("Error reading request body: {}", e);
        ApiError::Internal
    })?;
    let order = CreateOrderRequest::parse(&body)?.into_order()?;

    debug!("Inserting order: {:?}", order);
    repo.insert_order(&order).await.map_err(|e| {
        ApiError::from_repository(&format!("Error inserting order {:?}", order), e)
    })?;

    Ok(StatusCode::CREATED)
}

/// List orders from every namespace.
async fn get_orders(Extension(repo): Extension<SharedRepository>) -> Result<Response, ApiError> {
    debug!("Retrieving orders");

    let orders = repo
        .get_orders()
        .await
        .map_err(|e| ApiError::from_repository("Error retrieving orders", e))?;

    respond_orders(&orders)
}

/// List orders in the namespace given in the path.
async fn get_namespace_orders(
    Extension(repo): Extension<SharedRepository>,
    Namespace(namespace): Namespace,
) -> Result<Response, ApiError> {
    debug!("Retrieving orders for namespace: {}", namespace);

    let orders = repo
        .get_namespace_orders(&namespace)
        .await
        .map_err(|e| {
            ApiError::from_repository(
                &format!("Error retrieving orders for namespace {}", namespace),
                e,
            )
        })?;

    respond_orders(&orders)
}

/// Delete orders from every namespace.
async fn delete_orders(
    Extension(repo): Extension<SharedRepository>,
) -> Result<StatusCode, ApiError> {
    debug!("Deleting all orders");

    repo.delete_orders()
        .await
        .map_err(|e| ApiError::from_repository("Error deleting orders", e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete orders in the namespace given in the path.
async fn delete_namespace_orders(
    Extension(repo): Extension<SharedRepository>,
    Namespace(namespace): Namespace,
) -> Result<StatusCode, ApiError> {
    debug!("Deleting orders in namespace {}", namespace);

    repo.delete_namespace_orders(&namespace)
        .await
        .map_err(|e| {
            ApiError::from_repository(
                &format!("Error deleting orders in namespace {}", namespace),
                e,
            )
        })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Serialize an order list as a 200 JSON response.
fn respond_orders(orders: &[Order]) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(orders).map_err(|e| {
        error!("Error sending orders response: {}", e);
        ApiError::Internal
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        body,
    )
        .into_response())
}
