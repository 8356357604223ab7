pub mod api;
pub mod config;
pub mod errors;
pub mod model;
pub mod read;
pub mod snapshot;

mod idempotency;

pub use api::{EventStoreResult, InMemoryEventStore, TicketEventStore};
pub use config::StorePolicyView;
pub use errors::{EsError, EsErrorKind, EsResult};
pub use model::AppendAck;
pub use snapshot::{BoardSnapshot, SnapshotDocument};
