use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Claims whose AI confidence exceeds this were adjudicated without review.
    pub auto_adjudication_threshold: f64,
    /// Calendar months in monthly series, current month included.
    pub trend_window_months: u32,
    pub top_denial_reasons: i64,
    /// Look-back for the operational average processing time.
    pub processing_window_days: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            auto_adjudication_threshold: 0.95,
            trend_window_months: 12,
            top_denial_reasons: 5,
            processing_window_days: 30,
        }
    }
}
