use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Days, NaiveTime, Utc};

use apex_common::error::ApexResult;
use apex_common::types::TenantId;
use apex_db::analytics::models::GroupCountRow;
use apex_db::analytics::repositories::{AnalyticsSession, AnalyticsStore};

use crate::compute::{
    medical_loss_ratio, net_income, normalize_series, per_member_per_month, rate, safe_ratio,
    trend_window_start,
};
use crate::config::AnalyticsConfig;
use crate::dashboards::{
    ClaimsDashboard, DenialReason, FinancialDashboard, MonthlyClaimsPoint, MonthlyFinancialsPoint,
    OperationalDashboard, Pmpm, QualityMeasures,
};
use crate::fallback::{Assembly, OrDegraded};
use crate::quality::placeholder_measures;

/// Builds dashboards from a fresh session per request. Holds no per-request
/// state, so one instance serves all tenants concurrently.
pub struct AnalyticsService<S: AnalyticsStore> {
    store: S,
    config: AnalyticsConfig,
    started_at: Instant,
}

impl<S: AnalyticsStore> AnalyticsService<S> {
    pub fn new(store: S, config: AnalyticsConfig) -> Self {
        Self {
            store,
            config,
            started_at: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub async fn claims_dashboard(&self, tenant: TenantId) -> ApexResult<ClaimsDashboard> {
        self.claims_dashboard_at(tenant, Utc::now()).await
    }

    /// Claims volume, adjudication and denial rates, and the monthly trend.
    ///
    /// Rates are computed over claims past intake (not `received` or
    /// `validated`). Only a failed connection acquire is an error.
    pub async fn claims_dashboard_at(
        &self,
        tenant: TenantId,
        now: DateTime<Utc>,
    ) -> ApexResult<ClaimsDashboard> {
        let today = now.date_naive();
        let window_start = trend_window_start(today, self.config.trend_window_months);

        let mut session = self.store.open_session(tenant).await?;
        let mut report = Assembly::new("claims", session.tenant());

        let totals = report.resolve(session.claim_totals().await.or_degraded("claim_totals"));
        let by_status =
            report.resolve(session.claims_by_status().await.or_degraded("claims_by_status"));
        let by_type = report.resolve(session.claims_by_type().await.or_degraded("claims_by_type"));
        let turnaround = report.resolve(
            session
                .average_turnaround_days()
                .await
                .or_degraded("average_turnaround_days"),
        );
        let auto = report.resolve(
            session
                .auto_adjudication_counts(self.config.auto_adjudication_threshold)
                .await
                .or_degraded("auto_adjudication_counts"),
        );
        let denials = report.resolve(session.denial_counts().await.or_degraded("denial_counts"));
        let monthly = report.resolve(
            session
                .monthly_claims(window_start)
                .await
                .or_degraded("monthly_claims"),
        );
        let reasons = report.resolve(
            session
                .top_denial_reasons(self.config.top_denial_reasons)
                .await
                .or_degraded("top_denial_reasons"),
        );
        drop(session);

        let monthly_trend = normalize_series(
            monthly.into_iter().map(MonthlyClaimsPoint::from).collect(),
            window_start,
            today,
            |p| p.month.as_str(),
        );

        Ok(ClaimsDashboard {
            total_claims: totals.total_claims,
            total_charged_amount: totals.total_charged,
            total_paid_amount: totals.total_paid,
            average_turnaround_days: finite_or_zero(turnaround),
            auto_adjudication_rate: rate(auto),
            denial_rate: rate(denials),
            by_status: group_map(by_status),
            by_type: group_map(by_type),
            monthly_trend,
            top_denial_reasons: reasons.into_iter().map(DenialReason::from).collect(),
            degraded_metrics: report.finish(),
        })
    }

    pub async fn operational_dashboard(&self, tenant: TenantId) -> ApexResult<OperationalDashboard> {
        self.operational_dashboard_at(tenant, Utc::now()).await
    }

    /// Point-in-time workload counts. "Today" starts at 00:00 UTC.
    pub async fn operational_dashboard_at(
        &self,
        tenant: TenantId,
        now: DateTime<Utc>,
    ) -> ApexResult<OperationalDashboard> {
        let today = now.date_naive();
        let start_of_day = today.and_time(NaiveTime::MIN).and_utc();
        let processed_since = today
            .checked_sub_days(Days::new(self.config.processing_window_days))
            .unwrap_or(today);

        let mut session = self.store.open_session(tenant).await?;
        let mut report = Assembly::new("operational", session.tenant());

        let members = report.resolve(session.active_members().await.or_degraded("active_members"));
        let providers =
            report.resolve(session.active_providers().await.or_degraded("active_providers"));
        let queue = report.resolve(session.claims_in_queue().await.or_degraded("claims_in_queue"));
        let invoices = report.resolve(session.open_invoices().await.or_degraded("open_invoices"));
        let phi = report.resolve(
            session
                .phi_access_since(start_of_day)
                .await
                .or_degraded("phi_access_today"),
        );
        let prior_auths = report.resolve(
            session
                .pending_prior_auths()
                .await
                .or_degraded("pending_prior_auths"),
        );
        let processing = report.resolve(
            session
                .average_processing_days(processed_since)
                .await
                .or_degraded("average_processing_days"),
        );
        drop(session);

        Ok(OperationalDashboard {
            active_member_count: members,
            active_provider_count: providers,
            pending_prior_auths: prior_auths,
            open_invoices: invoices,
            claims_in_queue: queue,
            average_processing_time: finite_or_zero(processing),
            phi_access_today: phi,
            system_uptime: self.uptime().as_secs(),
            degraded_metrics: report.finish(),
        })
    }

    /// Placeholder values; see [`crate::quality`].
    pub async fn quality_measures(&self, tenant: TenantId) -> ApexResult<QualityMeasures> {
        tracing::debug!(%tenant, "serving placeholder quality measures");
        Ok(placeholder_measures())
    }

    pub async fn financial_dashboard(&self, tenant: TenantId) -> ApexResult<FinancialDashboard> {
        self.financial_dashboard_at(tenant, Utc::now()).await
    }

    /// Revenue vs claims paid, plus the monthly split of completed payments.
    ///
    /// `adminExpenseRatio` and PMPM use the trailing window totals; PMPM divides
    /// by active members times the months that have payments.
    pub async fn financial_dashboard_at(
        &self,
        tenant: TenantId,
        now: DateTime<Utc>,
    ) -> ApexResult<FinancialDashboard> {
        let today = now.date_naive();
        let window_start = trend_window_start(today, self.config.trend_window_months);

        let mut session = self.store.open_session(tenant).await?;
        let mut report = Assembly::new("financial", session.tenant());

        let total_expenses =
            report.resolve(session.paid_claims_total().await.or_degraded("paid_claims_total"));
        let total_revenue = report.resolve(
            session
                .premium_revenue_total()
                .await
                .or_degraded("premium_revenue_total"),
        );
        let monthly = report.resolve(
            session
                .monthly_financials(window_start)
                .await
                .or_degraded("monthly_financials"),
        );
        let members = report.resolve(session.active_members().await.or_degraded("active_members"));
        drop(session);

        let monthly_financials = normalize_series(
            monthly
                .into_iter()
                .map(MonthlyFinancialsPoint::from)
                .collect(),
            window_start,
            today,
            |p| p.month.as_str(),
        );

        Ok(FinancialDashboard {
            total_revenue,
            total_expenses,
            net_income: net_income(total_revenue, total_expenses),
            medical_loss_ratio: medical_loss_ratio(total_expenses, total_revenue),
            admin_expense_ratio: admin_expense_ratio(&monthly_financials),
            pmpm: pmpm(&monthly_financials, members),
            monthly_financials,
            degraded_metrics: report.finish(),
        })
    }
}

fn group_map(rows: Vec<GroupCountRow>) -> BTreeMap<String, i64> {
    rows.into_iter().map(|r| (r.key, r.count)).collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn admin_expense_ratio(months: &[MonthlyFinancialsPoint]) -> f64 {
    let admin: f64 = months.iter().map(|m| m.admin).sum();
    let revenue: f64 = months.iter().map(|m| m.revenue).sum();
    safe_ratio(admin, revenue)
}

fn pmpm(months: &[MonthlyFinancialsPoint], members: i64) -> Pmpm {
    let claims: f64 = months.iter().map(|m| m.claims).sum();
    let admin: f64 = months.iter().map(|m| m.admin).sum();
    let medical = per_member_per_month(claims, members, months.len());
    let admin = per_member_per_month(admin, members, months.len());
    Pmpm {
        medical,
        admin,
        total: medical + admin,
    }
}
