//! HTTP routes for the management API.
//!
//! Everything under `/api` expects a session cookie; the guards live on the
//! individual handlers as extractors. `/health` and `/health/ready` are
//! open for probes.

pub mod activity;
pub mod admins;
pub mod auth;
pub mod db;
pub mod shopify;
pub mod sync;
pub mod system;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Assemble the full route table.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Probes
        .route("/health", get(system::health))
        .route("/health/ready", get(system::ready))
        // Session
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        // Administrator accounts
        .route(
            "/api/administradores",
            get(admins::list).post(admins::create),
        )
        .route(
            "/api/administradores/{id}",
            get(admins::get_one)
                .patch(admins::update)
                .delete(admins::remove),
        )
        // Shopify proxy
        .route(
            "/api/shopify/products",
            get(shopify::list_products).post(shopify::create_product),
        )
        .route(
            "/api/shopify/products/{id}",
            get(shopify::get_product)
                .put(shopify::update_product)
                .delete(shopify::delete_product),
        )
        .route("/api/shopify/collections", get(shopify::list_collections))
        .route(
            "/api/shopify/collections/{id}",
            get(shopify::get_collection),
        )
        .route("/api/shopify/customers", get(shopify::list_customers))
        .route("/api/shopify/customers/{id}", get(shopify::get_customer))
        .route("/api/shopify/orders", get(shopify::list_orders))
        .route("/api/shopify/orders/{id}", get(shopify::get_order))
        .route(
            "/api/shopify/promotions",
            get(shopify::list_promotions).post(shopify::create_promotion),
        )
        .route(
            "/api/shopify/promotions/{id}/deactivate",
            post(shopify::deactivate_promotion),
        )
        // Mirror reads
        .route("/api/db/productos", get(db::list_productos))
        .route("/api/db/productos/{id}", get(db::get_producto))
        .route("/api/db/colecciones", get(db::list_colecciones))
        .route("/api/db/colecciones/{id}", get(db::get_coleccion))
        .route("/api/db/clientes", get(db::list_clientes))
        .route("/api/db/clientes/{id}", get(db::get_cliente))
        .route("/api/db/pedidos", get(db::list_pedidos))
        .route("/api/db/pedidos/{id}", get(db::get_pedido))
        .route("/api/db/promociones", get(db::list_promociones))
        .route("/api/db/promociones/{id}", get(db::get_promocion))
        // Replace syncs
        .route("/api/sync/products-replace", post(sync::products_replace))
        .route(
            "/api/sync/collections-replace",
            post(sync::collections_replace),
        )
        .route(
            "/api/sync/customers-replace",
            post(sync::customers_replace),
        )
        .route("/api/sync/orders-replace", post(sync::orders_replace))
        .route(
            "/api/sync/promotions-replace",
            post(sync::promotions_replace),
        )
        // Diagnostics
        .route("/api/activity", get(activity::recent))
        .route("/api/system/env", get(system::env_presence))
        .with_state(state)
}
