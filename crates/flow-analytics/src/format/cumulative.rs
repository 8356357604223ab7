use super::names::display_names;
use crate::model::{BucketSizes, CumulativeFlow, CumulativeFlowPoint};
use futuboard_core_types::Column;

/// One flat point per bucket, keyed by column display name.
pub fn format_cumulative_flow(buckets: &[BucketSizes], columns: &[Column]) -> CumulativeFlow {
    let names = display_names(columns);
    let data = buckets
        .iter()
        .map(|bucket| CumulativeFlowPoint {
            name: bucket.bucket.clone(),
            values: names
                .iter()
                .map(|(column, name)| {
                    (name.clone(), bucket.sizes.get(column).copied().unwrap_or(0))
                })
                .collect(),
        })
        .collect();

    CumulativeFlow {
        columns: names.into_iter().map(|(_, name)| name).collect(),
        data,
    }
}
