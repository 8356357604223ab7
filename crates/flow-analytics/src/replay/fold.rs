use super::bucket::{bucket_label, count_buckets, next_bucket, round_down};
use super::grid::{ScopeKey, SizeGrid};
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::model::{BucketSizes, CountUnit};
use crate::reader::ReplayPlan;
use chrono::NaiveDateTime;
use futuboard_core_types::{Column, ColumnId, EventKind, Scope, ScopeId, TicketEvent, TicketId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Grid state recorded at the end of one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub bucket: NaiveDateTime,
    pub label: String,
    pub grid: SizeGrid,
}

/// Running state of a replay: the grid plus each ticket's scope membership
/// as of the last applied event.
#[derive(Debug, Clone)]
pub struct ReplayState {
    grid: SizeGrid,
    memberships: HashMap<TicketId, BTreeSet<ScopeId>>,
    count_unit: CountUnit,
}

impl ReplayState {
    pub fn new(grid: SizeGrid, count_unit: CountUnit) -> Self {
        Self {
            grid,
            memberships: HashMap::new(),
            count_unit,
        }
    }

    pub fn grid(&self) -> &SizeGrid {
        &self.grid
    }

    pub fn membership(&self, ticket: &TicketId) -> Option<&BTreeSet<ScopeId>> {
        self.memberships.get(ticket)
    }

    pub fn apply(&mut self, event: &TicketEvent) {
        let old_weight = self.count_unit.weigh(event.old_size);
        let new_weight = self.count_unit.weigh(event.new_size);

        match event.kind {
            EventKind::Create => {
                self.apply_to_ticket(event, event.new_column, new_weight);
            }
            EventKind::Delete => {
                self.apply_to_ticket(event, event.old_column, -old_weight);
                self.memberships.remove(&event.ticket_id);
            }
            EventKind::Move => {
                self.apply_to_ticket(event, event.old_column, -old_weight);
                self.apply_to_ticket(event, event.new_column, new_weight);
            }
            EventKind::Update => {
                self.apply_to_ticket(event, event.new_column, new_weight - old_weight);
            }
            EventKind::ScopeChange => self.change_scopes(event, new_weight),
        }
    }

    /// Replaces the ticket's membership with `new_scopes`, then adds the new
    /// weight under `Total` and every scope it now belongs to. Scopes the
    /// ticket left keep what they had.
    fn change_scopes(&mut self, event: &TicketEvent, new_weight: i64) {
        if event.new_scopes.is_empty() {
            self.memberships.remove(&event.ticket_id);
        } else {
            self.memberships
                .insert(event.ticket_id, event.new_scopes.clone());
        }
        self.apply_to_ticket(event, event.new_column, new_weight);
    }

    /// Applies `delta` to `Total` and to every scope the ticket is in.
    fn apply_to_ticket(&mut self, event: &TicketEvent, column: Option<ColumnId>, delta: i64) {
        let scopes: Vec<ScopeId> = self
            .memberships
            .get(&event.ticket_id)
            .map(|scopes| scopes.iter().copied().collect())
            .unwrap_or_default();
        self.add(event, ScopeKey::Total, column, delta);
        for scope in scopes {
            self.add(event, ScopeKey::Specific(scope), column, delta);
        }
    }

    fn add(&mut self, event: &TicketEvent, key: ScopeKey, column: Option<ColumnId>, delta: i64) {
        let Some(column) = column else {
            debug!(
                event = %event.event_id,
                kind = %event.kind,
                "event without column reference skipped"
            );
            return;
        };
        if !self.grid.add(key, column, delta) {
            debug!(
                event = %event.event_id,
                column = %column,
                "delta for column outside the board skipped"
            );
        }
    }
}

/// Replays `events` into one snapshot per bucket of `plan`.
///
/// The walk starts at the earlier of the requested start and the first
/// event's bucket so that state from before the window is carried in, then
/// drops the buckets before the requested start.
pub fn replay(
    events: &[TicketEvent],
    columns: &[Column],
    scopes: &[Scope],
    plan: &ReplayPlan,
) -> AnalyticsResult<Vec<Snapshot>> {
    let unit = plan.unit;
    let Some(earliest) = events
        .iter()
        .map(|event| round_down(event.event_time.naive_utc(), unit))
        .min()
    else {
        return Ok(Vec::new());
    };

    let start = plan.start.map(|start| round_down(start, unit));
    let end = round_down(plan.end, unit);
    let replay_start = start.map_or(earliest, |start| start.min(earliest));
    let had_earlier_events = start.is_some_and(|start| earliest < start);

    let planned = count_buckets(replay_start, end, unit, plan.max_buckets).ok_or(
        AnalyticsError::RangeTooLarge {
            limit: plan.max_buckets,
        },
    )?;

    let mut by_bucket: BTreeMap<NaiveDateTime, Vec<&TicketEvent>> = BTreeMap::new();
    for event in events {
        by_bucket
            .entry(round_down(event.event_time.naive_utc(), unit))
            .or_default()
            .push(event);
    }

    let scope_ids = scopes
        .iter()
        .map(|scope| scope.scope_id)
        .chain(plan.scope_filter);
    let grid = SizeGrid::zero(columns.iter().map(|column| column.column_id), scope_ids);
    let mut state = ReplayState::new(grid, plan.count_unit);

    let mut snapshots = Vec::with_capacity(planned);
    let mut cursor = Some(replay_start);
    while let Some(bucket) = cursor {
        if bucket > end {
            break;
        }
        if let Some(bucket_events) = by_bucket.get(&bucket) {
            for event in bucket_events {
                state.apply(event);
            }
        }
        snapshots.push(Snapshot {
            bucket,
            label: bucket_label(bucket),
            grid: state.grid().clone(),
        });
        cursor = next_bucket(bucket, unit);
    }

    if had_earlier_events {
        if let Some(start) = start {
            snapshots.retain(|snapshot| snapshot.bucket >= start);
        }
    }

    debug!(
        unit = %unit,
        events = events.len(),
        buckets = snapshots.len(),
        "replay finished"
    );
    Ok(snapshots)
}

/// Per-bucket column sizes of the `Total` slice, or of the filtered scope
/// when the plan carries one. A scoped plan expects `events` to be limited
/// to events touching that scope already.
pub fn reconstruct(
    events: &[TicketEvent],
    columns: &[Column],
    plan: &ReplayPlan,
) -> AnalyticsResult<Vec<BucketSizes>> {
    let key = ScopeKey::for_filter(plan.scope_filter);
    let buckets = replay(events, columns, &[], plan)?
        .into_iter()
        .map(|snapshot| BucketSizes {
            sizes: snapshot.grid.slice_or_zero(&key),
            bucket: snapshot.label,
        })
        .collect();
    Ok(buckets)
}
