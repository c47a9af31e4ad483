use apex_analytics::{ClaimsDashboard, FinancialDashboard, OperationalDashboard, QualityMeasures};
use axum::extract::State;
use axum::Json;

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::extractors::Tenant;
use crate::AppState;

pub async fn get_claims_dashboard(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
) -> Result<Json<ApiResponse<ClaimsDashboard>>, ApiError> {
    let data = state.analytics.claims_dashboard(tenant).await?;
    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_operational_dashboard(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
) -> Result<Json<ApiResponse<OperationalDashboard>>, ApiError> {
    let data = state.analytics.operational_dashboard(tenant).await?;
    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_quality_measures(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
) -> Result<Json<ApiResponse<QualityMeasures>>, ApiError> {
    let data = state.analytics.quality_measures(tenant).await?;
    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_financial_dashboard(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
) -> Result<Json<ApiResponse<FinancialDashboard>>, ApiError> {
    let data = state.analytics.financial_dashboard(tenant).await?;
    Ok(Json(ApiResponse::success(data)))
}
