//! Metric derivations, table builders, and the per-section dashboard view.

pub mod catalog;
pub mod comfort;
pub mod dashboard;
pub mod domain;
pub mod kpi;
pub mod metrics;
pub mod tables;

pub use dashboard::{Dashboard, DashboardError, DashboardView, Dataset, SectionBody};
pub use domain::{
    Category, ComfortRecord, CostRate, MissingRateError, RateCard, Section, YearlyRecord,
};
pub use tables::{CostTable, HistoricalRow, RenewablesRow};
