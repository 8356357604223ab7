use futuboard_core_types::{BoardId, TicketEventId};
use serde::{Deserialize, Serialize};

/// Acknowledgement returned to writers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendAck {
    pub event_id: TicketEventId,
    pub board_id: BoardId,
    /// Number of events held for the board after this append.
    pub board_len: usize,
}
