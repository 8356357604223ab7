//! Event-sourced flow analytics for Futuboard boards.
//!
//! The ticket event log is replayed into a time grid of per-column story
//! point totals (`replay`), which the `format` module then reshapes into the
//! cumulative flow, velocity, burn-up and raw event feed payloads.

pub mod adapters;
pub mod api;
pub mod errors;
pub mod format;
pub mod model;
pub mod policy;
pub mod ports;
pub mod reader;
pub mod replay;

pub use api::{Analytics, AnalyticsService};
pub use errors::{AnalyticsError, AnalyticsResult};
pub use model::{
    BucketSizes, BurnUp, BurnUpPoint, ChartQuery, CountUnit, CumulativeFlow, CumulativeFlowPoint,
    TimeUnit, Velocity, VelocityRow,
};
pub use policy::{AnalyticsPolicyHandle, AnalyticsPolicyView};
pub use reader::{build_plan, ReplayPlan};
pub use replay::{reconstruct, replay, ScopeKey, SizeGrid, Snapshot};
