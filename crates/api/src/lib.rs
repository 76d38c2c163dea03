//! HTTP API server for the storefront backend.
//!
//! Thin glue over the domain services: request parsing, caller
//! extraction, error-to-status mapping, structured logging (tracing) and
//! Prometheus metrics. No business logic lives here.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use domain::{CartService, CheckoutPolicy, CheckoutService, Store};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<S: Store> {
    pub carts: CartService<S>,
    pub checkout: CheckoutService<S>,
    /// Direct store handle for the thin catalog endpoints.
    pub store: S,
}

/// Builds the application state from one store handle.
pub fn create_state<S: Store + Clone>(store: S, policy: CheckoutPolicy) -> Arc<AppState<S>> {
    Arc::new(AppState {
        carts: CartService::new(store.clone()),
        checkout: CheckoutService::new(store.clone(), policy),
        store,
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products", get(routes::products::list::<S>))
        .route("/products", post(routes::products::create::<S>))
        .route("/cart", get(routes::carts::get_cart::<S>))
        .route("/cart/items", post(routes::carts::add_item::<S>))
        .route("/cart/items/{id}", put(routes::carts::update_item::<S>))
        .route("/cart/items/{id}", delete(routes::carts::remove_item::<S>))
        .route("/orders", post(routes::orders::complete::<S>))
        .route("/orders", get(routes::orders::list::<S>))
        .route("/orders/{id}", get(routes::orders::get::<S>))
        .route("/orders/{id}/cancel", post(routes::orders::cancel::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
