pub mod compute;
pub mod config;
pub mod dashboards;
pub mod fallback;
pub mod quality;
pub mod service;

pub use config::AnalyticsConfig;
pub use dashboards::{ClaimsDashboard, FinancialDashboard, OperationalDashboard, QualityMeasures};
pub use fallback::{Assembly, Degraded, Fallible, OrDegraded};
pub use service::AnalyticsService;
