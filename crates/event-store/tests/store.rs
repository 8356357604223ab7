use chrono::{DateTime, TimeZone, Utc};
use futuboard_core_types::{
    Board, BoardId, Column, ColumnId, EventKind, Scope, ScopeId, TicketEvent, TicketId,
};
use futuboard_event_store::{
    EsErrorKind, InMemoryEventStore, SnapshotDocument, StorePolicyView, TicketEventStore,
};
use std::io::Write;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

async fn board_with_columns(store: &dyn TicketEventStore, titles: &[&str]) -> (BoardId, Vec<ColumnId>) {
    let board = Board {
        board_id: BoardId::new(),
        title: "Board".into(),
    };
    let board_id = board.board_id;
    store.put_board(board).await.unwrap();
    let mut ids = Vec::new();
    for (idx, title) in titles.iter().enumerate().rev() {
        let column = Column {
            column_id: ColumnId::new(),
            board_id,
            title: (*title).into(),
            ordernum: idx as i32,
        };
        ids.push(column.column_id);
        store.put_column(column).await.unwrap();
    }
    ids.reverse();
    (board_id, ids)
}

fn create(column: ColumnId, size: i64, when: DateTime<Utc>) -> TicketEvent {
    let mut event = TicketEvent::new(TicketId::new(), EventKind::Create, when);
    event.new_column = Some(column);
    event.new_size = size;
    event
}

#[tokio::test]
async fn duplicate_event_ids_are_rejected() {
    let store = InMemoryEventStore::new(StorePolicyView::default());
    let (_, cols) = board_with_columns(store.as_ref(), &["Todo"]).await;
    let event = create(cols[0], 3, at(1, 9));

    store.append(event.clone()).await.unwrap();
    let err = store.append(event.clone()).await.unwrap_err();
    assert!(matches!(err.kind(), EsErrorKind::DuplicateEvent(id) if *id == event.event_id));
}

#[tokio::test]
async fn events_without_known_columns_are_rejected() {
    let store = InMemoryEventStore::new(StorePolicyView::default());
    board_with_columns(store.as_ref(), &["Todo"]).await;

    let orphan = TicketEvent::new(TicketId::new(), EventKind::Update, at(1, 9));
    assert!(matches!(
        store.append(orphan).await.unwrap_err().kind(),
        EsErrorKind::AppendRejected(_)
    ));

    let stray = create(ColumnId::new(), 1, at(1, 9));
    assert!(matches!(
        store.append(stray).await.unwrap_err().kind(),
        EsErrorKind::AppendRejected(_)
    ));
}

#[tokio::test]
async fn reads_are_time_ordered_and_keep_append_order_on_ties() {
    let store = InMemoryEventStore::new(StorePolicyView::default());
    let (board, cols) = board_with_columns(store.as_ref(), &["Todo", "Done"]).await;
    let late = create(cols[0], 1, at(3, 9));
    let tie_a = create(cols[1], 2, at(2, 9));
    let tie_b = create(cols[0], 3, at(2, 9));
    for event in [&late, &tie_a, &tie_b] {
        store.append(event.clone()).await.unwrap();
    }

    let ids: Vec<_> = store
        .board_events(board, None)
        .await
        .unwrap()
        .into_iter()
        .map(|event| event.event_id)
        .collect();
    assert_eq!(ids, vec![tie_a.event_id, tie_b.event_id, late.event_id]);

    let columns = store.columns(board).await.unwrap();
    let titles: Vec<_> = columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Todo", "Done"]);
}

#[tokio::test]
async fn board_limit_rejects_without_consuming_the_event_id() {
    let store = InMemoryEventStore::new(StorePolicyView {
        max_events_per_board: 1,
    });
    let (_, cols) = board_with_columns(store.as_ref(), &["Todo"]).await;
    let ack = store.append(create(cols[0], 1, at(1, 9))).await.unwrap();
    assert_eq!(ack.board_len, 1);

    let second = create(cols[0], 1, at(1, 10));
    for _ in 0..2 {
        assert!(matches!(
            store.append(second.clone()).await.unwrap_err().kind(),
            EsErrorKind::AppendRejected(_)
        ));
    }
}

#[tokio::test]
async fn forecast_freezes_live_member_sizes_and_can_be_overwritten() {
    let store = InMemoryEventStore::new(StorePolicyView::default());
    let (board, cols) = board_with_columns(store.as_ref(), &["Todo"]).await;
    let first = create(cols[0], 3, at(1, 9));
    let second = create(cols[0], 5, at(1, 9));
    let mut resized = TicketEvent::new(second.ticket_id, EventKind::Update, at(2, 9));
    resized.new_column = Some(cols[0]);
    resized.old_size = 5;
    resized.new_size = 8;
    let mut gone = TicketEvent::new(first.ticket_id, EventKind::Delete, at(3, 9));
    gone.old_column = Some(cols[0]);
    gone.old_size = 3;

    let scope = Scope {
        scope_id: ScopeId::new(),
        board_id: board,
        title: "Sprint".into(),
        tickets: [first.ticket_id, second.ticket_id].into(),
        done_columns: vec![],
        forecast: None,
    };
    let scope_id = scope.scope_id;
    store.put_scope(scope).await.unwrap();
    for event in [first, second, resized, gone] {
        store.append(event).await.unwrap();
    }

    let early = store.set_scope_forecast(scope_id, at(1, 12)).await.unwrap();
    assert_eq!(early.size, 8);
    assert_eq!(early.tickets.len(), 2);

    let late = store.set_scope_forecast(scope_id, at(3, 12)).await.unwrap();
    assert_eq!(late.size, 8);
    assert_eq!(late.tickets.len(), 1);
    assert_eq!(store.scope(scope_id).await.unwrap().forecast, Some(late));
}

#[tokio::test]
async fn snapshot_files_load_into_the_store() {
    let board_id = BoardId::new();
    let column_id = ColumnId::new();
    let raw = serde_json::json!({
        "board": {"boardid": board_id.to_string(), "title": "Imported"},
        "columns": [{
            "columnid": column_id.to_string(),
            "boardid": board_id.to_string(),
            "title": "Todo",
            "ordernum": 0
        }],
        "events": [{
            "ticketeventid": futuboard_core_types::TicketEventId::new().to_string(),
            "ticketid": TicketId::new().to_string(),
            "event_time": "2024-01-01T09:00:00Z",
            "event_type": "CREATE",
            "new_columnid": column_id.to_string(),
            "new_size": 5
        }]
    });
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{raw}").unwrap();

    let document = SnapshotDocument::read_from(file.path()).await.unwrap();
    let store = InMemoryEventStore::new(StorePolicyView::default());
    let mut loaded = 0;
    for board in document.into_boards() {
        loaded += store.load_snapshot(board).await.unwrap();
    }
    assert_eq!(loaded, 1);
    assert_eq!(store.board(board_id).await.unwrap().title, "Imported");
    let events = store.board_events(board_id, None).await.unwrap();
    assert_eq!(events[0].new_size, 5);
}

#[tokio::test]
async fn malformed_snapshots_report_snapshot_errors() {
    let err = SnapshotDocument::from_json("{\"board\": 3}").unwrap_err();
    assert!(matches!(err.kind(), EsErrorKind::Snapshot(_)));

    let missing = SnapshotDocument::read_from(std::path::Path::new("/nonexistent/board.json"))
        .await
        .unwrap_err();
    assert!(matches!(missing.kind(), EsErrorKind::Snapshot(_)));
}
