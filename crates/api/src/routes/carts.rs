//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CartItemId, ProductId};
use domain::{Cart, Store};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth::Caller;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct CartItemResponse {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub id: String,
    pub status: String,
    pub items: Vec<CartItemResponse>,
    pub total_cents: i64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id().to_string(),
            status: cart.status().to_string(),
            total_cents: cart.total_price().cents(),
            items: cart
                .items()
                .iter()
                .map(|item| CartItemResponse {
                    id: item.id.to_string(),
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price.cents(),
                    line_total_cents: item.line_total().cents(),
                })
                .collect(),
        }
    }
}

fn parse_item_id(raw: &str) -> Result<CartItemId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid cart item id: {raw}")))
}

/// GET /cart — the caller's open cart, created on first access.
#[tracing::instrument(skip(state))]
pub async fn get_cart<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Caller(principal): Caller,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.carts.get_or_create_cart(principal).await?;
    Ok(Json(cart.into()))
}

/// POST /cart/items — add units of a product to the caller's cart.
#[tracing::instrument(skip(state, req))]
pub async fn add_item<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Caller(principal): Caller,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let cart = state
        .carts
        .add_item(principal, req.product_id, req.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(cart.into())))
}

/// PUT /cart/items/{id} — replace a line's quantity.
#[tracing::instrument(skip(state, req))]
pub async fn update_item<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Caller(principal): Caller,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let item_id = parse_item_id(&id)?;
    let cart = state
        .carts
        .update_item_quantity(principal, item_id, req.quantity)
        .await?;
    Ok(Json(cart.into()))
}

/// DELETE /cart/items/{id} — remove a line from the caller's cart.
#[tracing::instrument(skip(state))]
pub async fn remove_item<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Caller(principal): Caller,
    Path(id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let item_id = parse_item_id(&id)?;
    let cart = state.carts.remove_item(principal, item_id).await?;
    Ok(Json(cart.into()))
}
