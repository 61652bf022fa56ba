//! Application router configuration.

use axum::{
    Json, Router,
    http::{HeaderValue, header},
    middleware,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

use crate::{
    AppState,
    dashboard::get_dashboard_endpoint,
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint,
        get_expenses_endpoint, update_expense_endpoint,
    },
    logging::logging_middleware,
    master_data::{
        create_master_data_endpoint, delete_master_data_endpoint, get_all_master_data_endpoint,
        get_master_data_endpoint, update_master_data_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
///
/// Every request and response is logged by [logging_middleware], CORS is
/// open to any origin, and every response carries the usual browser hardening
/// headers unless a handler already set them.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::EXPENSES,
            get(get_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(endpoints::DASHBOARD, get(get_dashboard_endpoint))
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint)
                .patch(update_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(
            endpoints::MASTER_DATA,
            get(get_all_master_data_endpoint).post(create_master_data_endpoint),
        )
        .route(
            endpoints::MASTER_DATA_ITEM,
            get(get_master_data_endpoint)
                .patch(update_master_data_endpoint)
                .put(update_master_data_endpoint)
                .delete(delete_master_data_endpoint),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "Server running .." }))
}
