//! Order endpoints: checkout, cancellation, lookups.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{CartId, OrderId, Pagination};
use domain::{Order, Store};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth::Caller;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CompleteOrderRequest {
    pub cart_id: CartId,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub cart_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub total_cents: i64,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Serialize)]
pub struct OrderPageResponse {
    pub orders: Vec<OrderResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id().to_string(),
            cart_id: order.cart_id().to_string(),
            status: order.status().to_string(),
            created_at: order.created_at(),
            total_cents: order.total().cents(),
            items: order
                .items()
                .iter()
                .map(|item| OrderItemResponse {
                    id: item.id.to_string(),
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price.cents(),
                })
                .collect(),
        }
    }
}

fn parse_order_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid order id: {raw}")))
}

/// POST /orders — convert the caller's cart into an order.
#[tracing::instrument(skip(state, req))]
pub async fn complete<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Caller(principal): Caller,
    Json(req): Json<CompleteOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = state
        .checkout
        .complete_order(principal, req.cart_id)
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// POST /orders/{id}/cancel — reverse a completed order within the window.
#[tracing::instrument(skip(state))]
pub async fn cancel<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Caller(principal): Caller,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let order_id = parse_order_id(&id)?;
    state.checkout.cancel_order(principal, order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /orders/{id} — one of the caller's orders.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Caller(principal): Caller,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.checkout.get_order(principal, order_id).await?;
    Ok(Json(order.into()))
}

/// GET /orders — the caller's orders, newest first, paged.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Caller(principal): Caller,
    Query(params): Query<ListParams>,
) -> Result<Json<OrderPageResponse>, ApiError> {
    let pagination = match (params.page, params.per_page) {
        (None, None) => Pagination::default(),
        (page, per_page) => Pagination::new(
            page.unwrap_or(1),
            per_page.unwrap_or(Pagination::default().per_page),
        ),
    };

    let page = state.checkout.list_orders(principal, pagination).await?;
    Ok(Json(OrderPageResponse {
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        orders: page.items.into_iter().map(Into::into).collect(),
    }))
}
