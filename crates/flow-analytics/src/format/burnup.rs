use crate::model::{BurnUp, BurnUpPoint, CountUnit};
use crate::replay::{ScopeKey, Snapshot};
use futuboard_core_types::Scope;

pub fn format_burn_up(snapshots: &[Snapshot], scope: &Scope, count_unit: CountUnit) -> BurnUp {
    let key = ScopeKey::Specific(scope.scope_id);
    let forecast = scope.forecast.as_ref().map(|forecast| match count_unit {
        CountUnit::Size => forecast.size,
        CountUnit::Count => forecast.tickets.len() as i64,
    });

    let data = snapshots
        .iter()
        .map(|snapshot| BurnUpPoint {
            name: snapshot.label.clone(),
            done: snapshot.grid.sum(&key, &scope.done_columns),
            total: snapshot.grid.total(&key),
            forecast,
        })
        .collect();

    BurnUp {
        scope: scope.title.clone(),
        scope_id: scope.scope_id,
        count_unit,
        data,
    }
}
