//! Response objects for the four dashboards. Built once per request and
//! serialized with camelCase keys.

use std::collections::BTreeMap;

use apex_db::analytics::models::{DenialReasonRow, MonthlyClaimsRow, MonthlyFinancialsRow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsDashboard {
    pub total_claims: i64,
    pub total_charged_amount: f64,
    pub total_paid_amount: f64,
    pub average_turnaround_days: f64,
    pub auto_adjudication_rate: f64,
    pub denial_rate: f64,
    pub by_status: BTreeMap<String, i64>,
    pub by_type: BTreeMap<String, i64>,
    pub monthly_trend: Vec<MonthlyClaimsPoint>,
    pub top_denial_reasons: Vec<DenialReason>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_metrics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyClaimsPoint {
    pub month: String,
    pub received: i64,
    pub processed: i64,
    pub paid: i64,
}

impl From<MonthlyClaimsRow> for MonthlyClaimsPoint {
    fn from(row: MonthlyClaimsRow) -> Self {
        Self {
            month: row.month,
            received: row.received,
            processed: row.processed,
            paid: row.paid,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DenialReason {
    pub reason: String,
    pub count: i64,
}

impl From<DenialReasonRow> for DenialReason {
    fn from(row: DenialReasonRow) -> Self {
        Self {
            reason: row.reason,
            count: row.count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalDashboard {
    pub active_member_count: i64,
    pub active_provider_count: i64,
    pub pending_prior_auths: i64,
    pub open_invoices: i64,
    pub claims_in_queue: i64,
    /// Days, over claims processed in the recent window.
    pub average_processing_time: f64,
    pub phi_access_today: i64,
    /// Seconds since the service started.
    pub system_uptime: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_metrics: Vec<String>,
}

/// Whether a dashboard's numbers come from the source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Computed,
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkStatus {
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedisScore {
    pub measure: String,
    pub rate: f64,
    pub benchmark: f64,
    pub status: BenchmarkStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarCategory {
    pub category: String,
    pub stars: u8,
    pub weight: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMeasures {
    pub provenance: Provenance,
    pub hedis_scores: Vec<HedisScore>,
    pub star_rating: Vec<StarCategory>,
    pub overall_star_rating: f64,
    pub care_gaps_closed: i64,
    pub care_gaps_open: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pmpm {
    pub medical: f64,
    pub admin: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinancialsPoint {
    pub month: String,
    pub revenue: f64,
    pub claims: f64,
    pub admin: f64,
}

impl From<MonthlyFinancialsRow> for MonthlyFinancialsPoint {
    fn from(row: MonthlyFinancialsRow) -> Self {
        Self {
            month: row.month,
            revenue: row.revenue,
            claims: row.claims,
            admin: row.admin,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDashboard {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    pub medical_loss_ratio: f64,
    pub admin_expense_ratio: f64,
    pub pmpm: Pmpm,
    pub monthly_financials: Vec<MonthlyFinancialsPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_metrics: Vec<String>,
}
