use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimTotalsRow {
    pub total_claims: i64,
    pub total_charged: f64,
    pub total_paid: f64,
}

/// One `group by` bucket: a status, a claim type, etc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupCountRow {
    pub key: String,
    pub count: i64,
}

/// Raw numerator/denominator pair behind a rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioRow {
    pub numerator: i64,
    pub denominator: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyClaimsRow {
    /// `YYYY-MM`
    pub month: String,
    pub received: i64,
    pub processed: i64,
    pub paid: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFinancialsRow {
    /// `YYYY-MM`
    pub month: String,
    pub revenue: f64,
    pub claims: f64,
    pub admin: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DenialReasonRow {
    pub reason: String,
    pub count: i64,
}
