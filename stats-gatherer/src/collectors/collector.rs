use crate::collectors::Accumulator;
use std::{
    future::Future,
    pin::Pin,
};

/// A periodically invoked source of observations.
pub trait Collector {
    /// Run one collection cycle, reporting every result and every failure to `accumulator`.
    fn collect<'a>(&'a self, accumulator: &'a dyn Accumulator) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

    /// One-line description of what this collector reads
    fn description(&self) -> &'static str;

    /// Commented example configuration
    fn sample_config(&self) -> &'static str;

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}
