//! Catalog endpoints. Thin pass-throughs; products are managed here only
//! so the rest of the API has something to sell.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use common::Money;
use domain::{DomainError, Product, Store, StoreTx};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth::Caller;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price_cents: i64,
    pub stock: u32,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub stock: u32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            price_cents: product.price.cents(),
            stock: product.stock,
        }
    }
}

/// GET /products — list the catalog.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let mut tx = state.store.begin().await.map_err(DomainError::from)?;
    let products = tx.products().await.map_err(DomainError::from)?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// POST /products — add a product to the catalog (admin only).
#[tracing::instrument(skip(state, req))]
pub async fn create<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    caller: Caller,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    caller.require_admin()?;
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("product name is required".to_string()));
    }
    if req.price_cents <= 0 {
        return Err(ApiError::BadRequest(
            "price must be greater than zero".to_string(),
        ));
    }

    let product = Product::new(req.name, Money::from_cents(req.price_cents), req.stock);
    let mut tx = state.store.begin().await.map_err(DomainError::from)?;
    tx.insert_product(&product).await.map_err(DomainError::from)?;
    tx.commit().await.map_err(DomainError::from)?;

    Ok((StatusCode::CREATED, Json(product.into())))
}
