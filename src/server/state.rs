use std::sync::Arc;

use flow_analytics::Analytics;
use futuboard_event_store::TicketEventStore;

#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<dyn Analytics>,
    /// Write side for forecasts; charts only go through `analytics`.
    pub store: Arc<dyn TicketEventStore>,
}

impl AppState {
    pub fn new(analytics: Arc<dyn Analytics>, store: Arc<dyn TicketEventStore>) -> Self {
        Self { analytics, store }
    }
}
