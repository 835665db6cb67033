#[macro_use]
extern crate tracing;

mod app;
mod logging;
pub mod sink;

pub use app::{
    App,
    Mode,
};
pub use logging::{
    init_errors,
    init_logging,
};
pub use roach_stats_config::Args;
