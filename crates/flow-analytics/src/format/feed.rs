use futuboard_core_types::TicketEvent;

/// Raw event feed: every event, stable-sorted by time.
pub fn format_event_feed(mut events: Vec<TicketEvent>) -> Vec<TicketEvent> {
    events.sort_by_key(|event| event.event_time);
    events
}
