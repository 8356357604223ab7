pub mod burnup;
pub mod cumulative;
pub mod feed;
pub mod names;
pub mod velocity;

pub use burnup::format_burn_up;
pub use cumulative::format_cumulative_flow;
pub use feed::format_event_feed;
pub use names::{display_names, RESERVED_KEY};
pub use velocity::{format_velocity, scope_totals};
