//! # Collectors Module
//!
//! - **`Collector` trait**: one collection cycle per call, results go to an `Accumulator`
//! - **`StatusSource` / `HttpFetcher`**: fetches and decodes a node's status document
//! - **`Orchestrator`**: polls all configured nodes and isolates their failures

pub mod accumulator;
pub mod collector;
pub mod fetcher;
pub mod orchestrator;

// Re-export the main types for easy access
pub use accumulator::{
    Accumulator,
    MemoryAccumulator,
};
pub use collector::Collector;
pub use fetcher::{
    HttpFetcher,
    StatusSource,
    REQUEST_TIMEOUT,
    RESPONSE_HEADER_TIMEOUT,
};
pub use orchestrator::Orchestrator;
