use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row};

use crate::analytics::models::{
    ClaimTotalsRow, DenialReasonRow, GroupCountRow, MonthlyClaimsRow, MonthlyFinancialsRow,
    RatioRow,
};
use crate::analytics::repositories::{AnalyticsSession, AnalyticsStore};
use crate::analytics::statuses::{
    ACTIVE_STATUS, CLAIM_PAYMENT_TRANSACTION, COMPLETED_PAYMENT_STATUS, DENIED_CLAIM_STATUS,
    OPEN_INVOICE_STATUSES, PAID_CLAIM_STATUS, PENDING_PRIOR_AUTH_STATUSES,
    PRE_ADJUDICATION_CLAIM_STATUSES, PREMIUM_TRANSACTION, QUEUED_CLAIM_STATUSES,
};
use crate::tenant::TenantQuery;
use apex_common::error::{ApexError, ApexResult};
use apex_common::types::TenantId;

const CLAIMS: &str = "claims.claims";
const MEMBERS: &str = "member.members";
const PROVIDERS: &str = "provider.providers";
const PRIOR_AUTHS: &str = "claims.prior_authorizations";
const INVOICES: &str = "billing.invoices";
const PAYMENTS: &str = "billing.payments";
const AUDIT_LOG: &str = "audit.hipaa_audit_log";

#[derive(Clone)]
pub struct PgAnalyticsStore {
    pool: PgPool,
}

impl PgAnalyticsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsStore for PgAnalyticsStore {
    type Session = PgAnalyticsSession;

    async fn open_session(&self, tenant: TenantId) -> ApexResult<PgAnalyticsSession> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| ApexError::Database(format!("acquire connection: {e}")))?;
        tracing::debug!(%tenant, "analytics session opened");
        Ok(PgAnalyticsSession { conn, tenant })
    }
}

/// Owns one pooled connection; dropping the session returns it to the pool.
pub struct PgAnalyticsSession {
    conn: PoolConnection<Postgres>,
    tenant: TenantId,
}

impl PgAnalyticsSession {
    async fn fetch_one(&mut self, mut q: TenantQuery<'_>) -> ApexResult<PgRow> {
        q.build().fetch_one(&mut *self.conn).await.map_err(db_err)
    }

    async fn fetch_all(&mut self, mut q: TenantQuery<'_>) -> ApexResult<Vec<PgRow>> {
        q.build().fetch_all(&mut *self.conn).await.map_err(db_err)
    }

    async fn count(&mut self, q: TenantQuery<'_>) -> ApexResult<i64> {
        let row = self.fetch_one(q).await?;
        row.try_get("count").map_err(db_err)
    }

    async fn sum(&mut self, q: TenantQuery<'_>) -> ApexResult<f64> {
        let row = self.fetch_one(q).await?;
        row.try_get("total").map_err(db_err)
    }

    async fn ratio(&mut self, q: TenantQuery<'_>) -> ApexResult<RatioRow> {
        let row = self.fetch_one(q).await?;
        Ok(RatioRow {
            numerator: row.try_get("numerator").map_err(db_err)?,
            denominator: row.try_get("denominator").map_err(db_err)?,
        })
    }

    async fn groups(&mut self, q: TenantQuery<'_>) -> ApexResult<Vec<GroupCountRow>> {
        let rows = self.fetch_all(q).await?;
        rows.iter().map(map_group_row).collect()
    }

    async fn average_days(&mut self, q: TenantQuery<'_>) -> ApexResult<f64> {
        let row = self.fetch_one(q).await?;
        row.try_get("avg_days").map_err(db_err)
    }
}

#[async_trait]
impl AnalyticsSession for PgAnalyticsSession {
    fn tenant(&self) -> TenantId {
        self.tenant
    }

    async fn claim_totals(&mut self) -> ApexResult<ClaimTotalsRow> {
        let q = TenantQuery::select(
            self.tenant,
            "count(*) as total_claims, \
             coalesce(sum(total_charged_amount), 0)::float8 as total_charged, \
             coalesce(sum(total_paid_amount), 0)::float8 as total_paid",
            CLAIMS,
        );
        let row = self.fetch_one(q).await?;
        Ok(ClaimTotalsRow {
            total_claims: row.try_get("total_claims").map_err(db_err)?,
            total_charged: row.try_get("total_charged").map_err(db_err)?,
            total_paid: row.try_get("total_paid").map_err(db_err)?,
        })
    }

    async fn claims_by_status(&mut self) -> ApexResult<Vec<GroupCountRow>> {
        let q = TenantQuery::select(
            self.tenant,
            "coalesce(status, 'unknown') as key, count(*) as count",
            CLAIMS,
        )
        .then("group by 1 order by 1");
        self.groups(q).await
    }

    async fn claims_by_type(&mut self) -> ApexResult<Vec<GroupCountRow>> {
        let q = TenantQuery::select(
            self.tenant,
            "coalesce(type, 'unknown') as key, count(*) as count",
            CLAIMS,
        )
        .then("group by 1 order by 1");
        self.groups(q).await
    }

    async fn average_turnaround_days(&mut self) -> ApexResult<f64> {
        let q = TenantQuery::select(
            self.tenant,
            "coalesce(avg(processed_date::date - received_date::date), 0)::float8 as avg_days",
            CLAIMS,
        )
        .and("processed_date is not null");
        self.average_days(q).await
    }

    async fn auto_adjudication_counts(
        &mut self,
        confidence_threshold: f64,
    ) -> ApexResult<RatioRow> {
        let q = TenantQuery::select_with(self.tenant, CLAIMS, |qb| {
            qb.push("count(*) filter (where ai_confidence_score > ")
                .push_bind(confidence_threshold)
                .push(") as numerator, count(*) as denominator");
        })
        .and_not_in("status", PRE_ADJUDICATION_CLAIM_STATUSES);
        self.ratio(q).await
    }

    async fn denial_counts(&mut self) -> ApexResult<RatioRow> {
        let q = TenantQuery::select_with(self.tenant, CLAIMS, |qb| {
            qb.push("count(*) filter (where status = ")
                .push_bind(DENIED_CLAIM_STATUS)
                .push(") as numerator, count(*) as denominator");
        })
        .and_not_in("status", PRE_ADJUDICATION_CLAIM_STATUSES);
        self.ratio(q).await
    }

    async fn monthly_claims(&mut self, since: NaiveDate) -> ApexResult<Vec<MonthlyClaimsRow>> {
        let q = TenantQuery::select_with(self.tenant, CLAIMS, |qb| {
            qb.push(
                "to_char(received_date, 'YYYY-MM') as month, \
                 count(*) as received, \
                 count(*) filter (where processed_date is not null) as processed, \
                 count(*) filter (where status = ",
            )
            .push_bind(PAID_CLAIM_STATUS)
            .push(") as paid");
        })
        .and_gte("received_date", since)
        .then("group by 1 order by 1");

        let rows = self.fetch_all(q).await?;
        rows.iter().map(map_monthly_claims_row).collect()
    }

    async fn top_denial_reasons(&mut self, limit: i64) -> ApexResult<Vec<DenialReasonRow>> {
        let q = TenantQuery::select(
            self.tenant,
            "coalesce(denial_reason_description, denial_reason_code, 'unspecified') as reason, \
             count(*) as count",
            CLAIMS,
        )
        .and_eq("status", DENIED_CLAIM_STATUS)
        .then("group by 1 order by 2 desc, 1 asc")
        .limit(limit);

        let rows = self.fetch_all(q).await?;
        rows.iter().map(map_denial_reason_row).collect()
    }

    async fn active_members(&mut self) -> ApexResult<i64> {
        let q = TenantQuery::select(self.tenant, "count(*) as count", MEMBERS)
            .and_eq("status", ACTIVE_STATUS);
        self.count(q).await
    }

    async fn active_providers(&mut self) -> ApexResult<i64> {
        let q = TenantQuery::select(self.tenant, "count(*) as count", PROVIDERS)
            .and_eq("status", ACTIVE_STATUS);
        self.count(q).await
    }

    async fn pending_prior_auths(&mut self) -> ApexResult<i64> {
        let q = TenantQuery::select(self.tenant, "count(*) as count", PRIOR_AUTHS)
            .and_in("status", PENDING_PRIOR_AUTH_STATUSES);
        self.count(q).await
    }

    async fn claims_in_queue(&mut self) -> ApexResult<i64> {
        let q = TenantQuery::select(self.tenant, "count(*) as count", CLAIMS)
            .and_in("status", QUEUED_CLAIM_STATUSES);
        self.count(q).await
    }

    async fn open_invoices(&mut self) -> ApexResult<i64> {
        let q = TenantQuery::select(self.tenant, "count(*) as count", INVOICES)
            .and_in("status", OPEN_INVOICE_STATUSES);
        self.count(q).await
    }

    async fn average_processing_days(&mut self, processed_since: NaiveDate) -> ApexResult<f64> {
        let q = TenantQuery::select(
            self.tenant,
            "coalesce(avg(processed_date::date - received_date::date), 0)::float8 as avg_days",
            CLAIMS,
        )
        .and_gte("processed_date", processed_since);
        self.average_days(q).await
    }

    async fn phi_access_since(&mut self, since: DateTime<Utc>) -> ApexResult<i64> {
        let q = TenantQuery::select(self.tenant, "count(*) as count", AUDIT_LOG)
            .and("phi_accessed = true")
            .and_gte("created_at", since);
        self.count(q).await
    }

    async fn paid_claims_total(&mut self) -> ApexResult<f64> {
        let q = TenantQuery::select(
            self.tenant,
            "coalesce(sum(total_paid_amount), 0)::float8 as total",
            CLAIMS,
        )
        .and_eq("status", PAID_CLAIM_STATUS);
        self.sum(q).await
    }

    async fn premium_revenue_total(&mut self) -> ApexResult<f64> {
        let q = TenantQuery::select(
            self.tenant,
            "coalesce(sum(amount), 0)::float8 as total",
            PAYMENTS,
        )
        .and_eq("status", COMPLETED_PAYMENT_STATUS)
        .and_eq("transaction_type", PREMIUM_TRANSACTION);
        self.sum(q).await
    }

    async fn monthly_financials(
        &mut self,
        since: NaiveDate,
    ) -> ApexResult<Vec<MonthlyFinancialsRow>> {
        let q = TenantQuery::select_with(self.tenant, PAYMENTS, |qb| {
            qb.push(
                "to_char(payment_date, 'YYYY-MM') as month, \
                 coalesce(sum(amount) filter (where transaction_type = ",
            )
            .push_bind(PREMIUM_TRANSACTION)
            .push(
                "), 0)::float8 as revenue, \
                 coalesce(sum(amount) filter (where transaction_type = ",
            )
            .push_bind(CLAIM_PAYMENT_TRANSACTION)
            .push(
                "), 0)::float8 as claims, \
                 coalesce(sum(amount) filter (where transaction_type is null \
                 or not (transaction_type = any(",
            )
            .push_bind(vec![
                PREMIUM_TRANSACTION.to_owned(),
                CLAIM_PAYMENT_TRANSACTION.to_owned(),
            ])
            .push("))), 0)::float8 as admin");
        })
        .and_eq("status", COMPLETED_PAYMENT_STATUS)
        .and_gte("payment_date", since)
        .then("group by 1 order by 1");

        let rows = self.fetch_all(q).await?;
        rows.iter().map(map_monthly_financials_row).collect()
    }
}

fn map_group_row(row: &PgRow) -> ApexResult<GroupCountRow> {
    Ok(GroupCountRow {
        key: row.try_get("key").map_err(db_err)?,
        count: row.try_get("count").map_err(db_err)?,
    })
}

fn map_monthly_claims_row(row: &PgRow) -> ApexResult<MonthlyClaimsRow> {
    Ok(MonthlyClaimsRow {
        month: row.try_get("month").map_err(db_err)?,
        received: row.try_get("received").map_err(db_err)?,
        processed: row.try_get("processed").map_err(db_err)?,
        paid: row.try_get("paid").map_err(db_err)?,
    })
}

fn map_denial_reason_row(row: &PgRow) -> ApexResult<DenialReasonRow> {
    Ok(DenialReasonRow {
        reason: row.try_get("reason").map_err(db_err)?,
        count: row.try_get("count").map_err(db_err)?,
    })
}

fn map_monthly_financials_row(row: &PgRow) -> ApexResult<MonthlyFinancialsRow> {
    Ok(MonthlyFinancialsRow {
        month: row.try_get("month").map_err(db_err)?,
        revenue: row.try_get("revenue").map_err(db_err)?,
        claims: row.try_get("claims").map_err(db_err)?,
        admin: row.try_get("admin").map_err(db_err)?,
    })
}

fn db_err(e: sqlx::Error) -> ApexError {
    ApexError::Database(e.to_string())
}
