use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::analytics::models::{
    ClaimTotalsRow, DenialReasonRow, GroupCountRow, MonthlyClaimsRow, MonthlyFinancialsRow,
    RatioRow,
};
use apex_common::error::ApexResult;
use apex_common::types::TenantId;

/// Hands out one connection-scoped session per report.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    type Session: AnalyticsSession;

    /// Acquire a connection bound to `tenant`. Failure here is fatal for the
    /// report. The connection is returned when the session is dropped.
    async fn open_session(&self, tenant: TenantId) -> ApexResult<Self::Session>;
}

/// Aggregate statements for a single tenant. Each call is independent: an
/// error from one leaves the session usable for the next.
#[async_trait]
pub trait AnalyticsSession: Send {
    fn tenant(&self) -> TenantId;

    // claims
    async fn claim_totals(&mut self) -> ApexResult<ClaimTotalsRow>;
    async fn claims_by_status(&mut self) -> ApexResult<Vec<GroupCountRow>>;
    async fn claims_by_type(&mut self) -> ApexResult<Vec<GroupCountRow>>;
    async fn average_turnaround_days(&mut self) -> ApexResult<f64>;
    async fn auto_adjudication_counts(&mut self, confidence_threshold: f64)
        -> ApexResult<RatioRow>;
    async fn denial_counts(&mut self) -> ApexResult<RatioRow>;
    async fn monthly_claims(&mut self, since: NaiveDate) -> ApexResult<Vec<MonthlyClaimsRow>>;
    async fn top_denial_reasons(&mut self, limit: i64) -> ApexResult<Vec<DenialReasonRow>>;

    // operations
    async fn active_members(&mut self) -> ApexResult<i64>;
    async fn active_providers(&mut self) -> ApexResult<i64>;
    async fn pending_prior_auths(&mut self) -> ApexResult<i64>;
    async fn claims_in_queue(&mut self) -> ApexResult<i64>;
    async fn open_invoices(&mut self) -> ApexResult<i64>;
    async fn average_processing_days(&mut self, processed_since: NaiveDate) -> ApexResult<f64>;
    async fn phi_access_since(&mut self, since: DateTime<Utc>) -> ApexResult<i64>;

    // finance
    async fn paid_claims_total(&mut self) -> ApexResult<f64>;
    async fn premium_revenue_total(&mut self) -> ApexResult<f64>;
    async fn monthly_financials(&mut self, since: NaiveDate)
        -> ApexResult<Vec<MonthlyFinancialsRow>>;
}
