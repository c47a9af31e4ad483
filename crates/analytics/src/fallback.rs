//! Per-query fallback.
//!
//! Each aggregate query's `ApexResult` becomes a [`Fallible`]: either the
//! live value or a [`Degraded`] carrying the zero default plus the cause. An
//! [`Assembly`] resolves them one by one for a single report, so a failing
//! query only zeroes its own metric.

use apex_common::error::{ApexError, ApexResult};
use apex_common::types::TenantId;

#[derive(Debug)]
pub struct Degraded<T> {
    pub metric: &'static str,
    pub cause: ApexError,
    pub default: T,
}

pub type Fallible<T> = Result<T, Degraded<T>>;

pub trait OrDegraded<T> {
    /// Fall back to `T::default()`.
    fn or_degraded(self, metric: &'static str) -> Fallible<T>
    where
        T: Default;
}

impl<T> OrDegraded<T> for ApexResult<T> {
    fn or_degraded(self, metric: &'static str) -> Fallible<T>
    where
        T: Default,
    {
        self.map_err(|cause| Degraded {
            metric,
            cause,
            default: T::default(),
        })
    }
}

/// Collects the outcome of every query behind one dashboard.
pub struct Assembly {
    dashboard: &'static str,
    tenant: TenantId,
    degraded: Vec<&'static str>,
}

impl Assembly {
    pub fn new(dashboard: &'static str, tenant: TenantId) -> Self {
        Self {
            dashboard,
            tenant,
            degraded: Vec::new(),
        }
    }

    pub fn resolve<T>(&mut self, outcome: Fallible<T>) -> T {
        match outcome {
            Ok(value) => value,
            Err(Degraded {
                metric,
                cause,
                default,
            }) => {
                tracing::warn!(
                    tenant = %self.tenant,
                    dashboard = self.dashboard,
                    metric,
                    error = %cause,
                    "aggregate query failed, reporting default"
                );
                self.degraded.push(metric);
                default
            }
        }
    }

    /// Names of the metrics that fell back, in query order.
    pub fn finish(self) -> Vec<String> {
        if !self.degraded.is_empty() {
            tracing::info!(
                tenant = %self.tenant,
                dashboard = self.dashboard,
                degraded = self.degraded.len(),
                "dashboard assembled with fallbacks"
            );
        }
        self.degraded.into_iter().map(str::to_owned).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tenant() -> TenantId {
        TenantId::new(Uuid::new_v4())
    }

    #[test]
    fn ok_passes_through() {
        let mut report = Assembly::new("claims", tenant());
        let value = report.resolve(Ok::<i64, ApexError>(42).or_degraded("claims_in_queue"));
        assert_eq!(value, 42);
        assert!(report.finish().is_empty());
    }

    #[test]
    fn error_yields_default_and_is_recorded() {
        let mut report = Assembly::new("operational", tenant());
        let failed: ApexResult<i64> = Err(ApexError::Database("relation does not exist".into()));
        let value = report.resolve(failed.or_degraded("active_members"));
        assert_eq!(value, 0);
        assert_eq!(report.finish(), vec!["active_members".to_string()]);
    }

    #[test]
    fn degraded_carries_metric_and_cause() {
        let failed: ApexResult<Vec<String>> = Err(ApexError::Database("timeout".into()));
        let degraded = failed.or_degraded("top_denial_reasons").unwrap_err();
        assert_eq!(degraded.metric, "top_denial_reasons");
        assert!(degraded.default.is_empty());
        assert!(matches!(degraded.cause, ApexError::Database(_)));
    }

    #[test]
    fn failures_are_independent() {
        let mut report = Assembly::new("financial", tenant());
        let revenue = report.resolve(Ok::<f64, ApexError>(1000.0).or_degraded("premium_revenue"));
        let expenses = report.resolve(
            Err::<f64, ApexError>(ApexError::Database("boom".into())).or_degraded("paid_claims"),
        );
        assert_eq!(revenue, 1000.0);
        assert_eq!(expenses, 0.0);
        assert_eq!(report.finish(), vec!["paid_claims".to_string()]);
    }
}
