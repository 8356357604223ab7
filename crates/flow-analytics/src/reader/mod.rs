pub mod fetch;
pub mod plan;

pub use fetch::{describe_source, run_fetch, FetchOutcome};
pub use plan::{build_plan, parse_timestamp, ReplayPlan};
