use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use futuboard_core_types::{ColumnId, EventKind, ScopeId, TicketEvent, TicketId};

/// Events touching any of `columns` (and `scope`, when given), ordered by
/// event time. The sort is stable, so events sharing a timestamp keep the
/// order in which they were appended.
pub fn board_events<'a, I>(
    events: I,
    columns: &HashSet<ColumnId>,
    scope: Option<&ScopeId>,
) -> Vec<TicketEvent>
where
    I: IntoIterator<Item = &'a TicketEvent>,
{
    let mut out: Vec<TicketEvent> = events
        .into_iter()
        .filter(|ev| columns.iter().any(|col| ev.touches_column(col)))
        .filter(|ev| scope.map(|s| ev.touches_scope(s)).unwrap_or(true))
        .cloned()
        .collect();
    out.sort_by_key(|ev| ev.event_time);
    out
}

/// Size of every live ticket as of `at`, derived from the last event seen
/// for it. Deleted tickets are absent from the result.
pub fn latest_ticket_sizes(events: &[TicketEvent], at: DateTime<Utc>) -> BTreeMap<TicketId, i64> {
    let mut sizes = BTreeMap::new();
    for ev in events.iter().filter(|ev| ev.event_time <= at) {
        match ev.kind {
            EventKind::Delete => {
                sizes.remove(&ev.ticket_id);
            }
            _ => {
                sizes.insert(ev.ticket_id, ev.new_size);
            }
        }
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(kind: EventKind, day: u32, column: ColumnId, size: i64) -> TicketEvent {
        let mut ev = TicketEvent::new(
            TicketId::new(),
            kind,
            Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        );
        ev.new_column = Some(column);
        ev.new_size = size;
        ev
    }

    #[test]
    fn sort_is_stable_for_equal_timestamps() {
        let col = ColumnId::new();
        let late = event(EventKind::Create, 3, col, 1);
        let first = event(EventKind::Create, 2, col, 2);
        let second = event(EventKind::Update, 2, col, 3);
        let log = vec![late.clone(), first.clone(), second.clone()];

        let columns: HashSet<_> = [col].into_iter().collect();
        let out = board_events(&log, &columns, None);
        let ids: Vec<_> = out.iter().map(|ev| ev.event_id).collect();
        assert_eq!(ids, vec![first.event_id, second.event_id, late.event_id]);
    }

    #[test]
    fn filters_by_column_and_scope() {
        let col = ColumnId::new();
        let other = ColumnId::new();
        let scope = ScopeId::new();
        let mut scoped = event(EventKind::ScopeChange, 2, col, 5);
        scoped.new_scopes.insert(scope);
        let plain = event(EventKind::Create, 1, col, 5);
        let foreign = event(EventKind::Create, 1, other, 5);
        let log = vec![plain, scoped.clone(), foreign];

        let columns: HashSet<_> = [col].into_iter().collect();
        assert_eq!(board_events(&log, &columns, None).len(), 2);
        let only_scope = board_events(&log, &columns, Some(&scope));
        assert_eq!(only_scope.len(), 1);
        assert_eq!(only_scope[0].event_id, scoped.event_id);
    }

    #[test]
    fn latest_sizes_drop_deleted_tickets() {
        let col = ColumnId::new();
        let created = event(EventKind::Create, 1, col, 5);
        let mut resized = created.clone();
        resized.kind = EventKind::Update;
        resized.event_time = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        resized.old_size = 5;
        resized.new_size = 8;
        let doomed = event(EventKind::Create, 1, col, 3);
        let mut deleted = doomed.clone();
        deleted.kind = EventKind::Delete;
        deleted.event_time = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let log = vec![created.clone(), doomed, resized, deleted];
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let sizes = latest_ticket_sizes(&log, at);
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes.get(&created.ticket_id), Some(&8));

        let before = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(latest_ticket_sizes(&log, before).get(&created.ticket_id), Some(&5));
    }
}
