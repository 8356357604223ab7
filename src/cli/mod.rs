pub mod app;
pub mod charts;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod events;
pub mod forecast;
pub mod info;
pub mod output;
pub mod runtime;
pub mod serve;

pub use charts::{cmd_burn_up, cmd_cumulative_flow, cmd_velocity, BurnUpArgs, ChartArgs};
pub use events::{cmd_events, BoardArgs};
pub use forecast::{cmd_forecast, ForecastArgs};
pub use info::cmd_info;
pub use serve::{cmd_serve, ServeArgs};
