pub mod bucket;
pub mod fold;
pub mod grid;

pub use bucket::{all_anchor, bucket_label, next_bucket, round_down};
pub use fold::{reconstruct, replay, ReplayState, Snapshot};
pub use grid::{ColumnSizes, ScopeKey, SizeGrid};
