mod clock;
mod event_store;
mod events;

pub use clock::{FixedClock, SystemClock};
pub use event_store::EventStoreAdapter;
pub use events::{AnalyticsRuntimeEvent, NoopEventsPort, RecordingEventsPort, TracingEventsPort};
