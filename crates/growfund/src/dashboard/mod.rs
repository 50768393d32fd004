//! Member dashboard: refreshed score, recent savings, open loans, and offers.

pub mod router;
pub mod service;

pub use router::dashboard_router;
pub use service::{DashboardError, DashboardService, DashboardView};
