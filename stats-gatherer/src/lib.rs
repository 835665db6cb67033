//! # CockroachDB Stats Gatherer
//!
//! Polls the `/_status/nodes/1` endpoint of CockroachDB nodes and republishes a
//! fixed set of fields from the status document as tagged observations.
//!
//! ## Architecture
//!
//! - **`endpoint`**: node addresses, the default local node and the status URL
//! - **`metrics`**: the loosely typed `Snapshot`, the `ExtractionMap` and the
//!   resulting `Observation`
//! - **`collectors`**: the HTTP fetcher and the `Orchestrator` driving a
//!   collection cycle over all nodes
//!
//! ## Usage
//!
//! ```no_run
//! use roach_stats_gatherer::{
//!     Collector,
//!     ExtractionMap,
//!     HttpFetcher,
//!     MemoryAccumulator,
//!     Orchestrator,
//! };
//!
//! # async fn run() -> eyre::Result<()> {
//! let servers = vec!["http://roach1:8080".to_string()];
//! let orchestrator = Orchestrator::new(&servers, HttpFetcher::new()?, ExtractionMap::node_status());
//! let acc = MemoryAccumulator::new();
//! orchestrator.collect(&acc).await;
//! for observation in acc.observations() {
//!     println!("{:?}", observation.fields);
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod endpoint;
pub mod error;
pub mod metrics;

#[cfg(test)]
mod test_support;

pub use collectors::*;
pub use endpoint::{
    Endpoint,
    DEFAULT_ENDPOINT,
};
pub use error::{
    FetchError,
    PollError,
};
pub use metrics::*;
