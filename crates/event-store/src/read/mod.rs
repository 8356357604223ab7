pub mod query;

pub use query::{board_events, latest_ticket_sizes};
