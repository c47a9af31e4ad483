//! Status and transaction-type values shared by the analytics statements.
//!
//! Values match the `status` / `transaction_type` columns written by the
//! owning services.

/// Claims not yet past intake; excluded from adjudication-rate denominators.
pub const PRE_ADJUDICATION_CLAIM_STATUSES: &[&str] = &["received", "validated"];

/// Claims still waiting for a decision.
pub const QUEUED_CLAIM_STATUSES: &[&str] = &["received", "validated", "in_review"];

pub const DENIED_CLAIM_STATUS: &str = "denied";
pub const PAID_CLAIM_STATUS: &str = "paid";

pub const OPEN_INVOICE_STATUSES: &[&str] = &["sent", "partial", "overdue"];

pub const PENDING_PRIOR_AUTH_STATUSES: &[&str] = &["submitted", "in_review", "pending_info"];

/// Member and provider rows.
pub const ACTIVE_STATUS: &str = "active";

pub const COMPLETED_PAYMENT_STATUS: &str = "completed";
pub const PREMIUM_TRANSACTION: &str = "premium";
pub const CLAIM_PAYMENT_TRANSACTION: &str = "claim_payment";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_includes_every_pre_adjudication_status() {
        for s in PRE_ADJUDICATION_CLAIM_STATUSES {
            assert!(QUEUED_CLAIM_STATUSES.contains(s), "{s} missing from queue set");
        }
        assert!(QUEUED_CLAIM_STATUSES.contains(&"in_review"));
    }

    #[test]
    fn terminal_claim_statuses_are_not_queued() {
        assert!(!QUEUED_CLAIM_STATUSES.contains(&DENIED_CLAIM_STATUS));
        assert!(!QUEUED_CLAIM_STATUSES.contains(&PAID_CLAIM_STATUS));
    }

    #[test]
    fn open_invoices_exclude_draft_and_paid() {
        assert!(!OPEN_INVOICE_STATUSES.contains(&"draft"));
        assert!(!OPEN_INVOICE_STATUSES.contains(&"paid"));
        assert_eq!(OPEN_INVOICE_STATUSES.len(), 3);
    }

    #[test]
    fn pending_prior_auths_exclude_decisions() {
        for decided in ["approved", "partially_approved", "denied", "cancelled", "expired"] {
            assert!(!PENDING_PRIOR_AUTH_STATUSES.contains(&decided));
        }
    }

    #[test]
    fn premium_and_claim_payment_are_distinct() {
        assert_ne!(PREMIUM_TRANSACTION, CLAIM_PAYMENT_TRANSACTION);
    }
}
