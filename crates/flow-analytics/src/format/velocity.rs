use crate::model::{ScopeTotals, VelocityRow};
use crate::replay::{ScopeKey, Snapshot};
use futuboard_core_types::{Scope, ScopeId};
use std::collections::BTreeMap;

/// Done and forecast totals for each scope, read from `snapshot` without
/// touching it.
///
/// `forecast` is the frozen forecast size when the scope has one, otherwise
/// everything the scope currently holds.
pub fn scope_totals(snapshot: Option<&Snapshot>, scopes: &[Scope]) -> BTreeMap<ScopeId, ScopeTotals> {
    scopes
        .iter()
        .map(|scope| {
            let key = ScopeKey::Specific(scope.scope_id);
            let (done, held) = match snapshot {
                Some(snapshot) => (
                    snapshot.grid.sum(&key, &scope.done_columns),
                    snapshot.grid.total(&key),
                ),
                None => (0, 0),
            };
            let forecast = scope
                .forecast
                .as_ref()
                .map_or(held, |forecast| forecast.size);
            (scope.scope_id, ScopeTotals { done, forecast })
        })
        .collect()
}

pub fn format_velocity(
    scopes: &[Scope],
    totals: &BTreeMap<ScopeId, ScopeTotals>,
) -> Vec<VelocityRow> {
    scopes
        .iter()
        .map(|scope| {
            let totals = totals.get(&scope.scope_id).copied().unwrap_or_default();
            VelocityRow {
                name: scope.title.clone(),
                done: totals.done,
                forecast: totals.forecast,
            }
        })
        .collect()
}
