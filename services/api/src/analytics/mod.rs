pub mod handlers;

use axum::routing::get;
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics/claims-dashboard", get(handlers::get_claims_dashboard))
        .route("/analytics/operational", get(handlers::get_operational_dashboard))
        .route("/analytics/quality-measures", get(handlers::get_quality_measures))
        .route("/analytics/financial", get(handlers::get_financial_dashboard))
}
