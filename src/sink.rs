use roach_stats_gatherer::{
    Accumulator,
    Observation,
    PollError,
};
use std::{
    io::{
        self,
        Write,
    },
    sync::{
        Mutex,
        PoisonError,
    },
};

/// Writes every observation as one JSON document per line and logs poll errors.
pub struct JsonLinesAccumulator<W> {
    out: Mutex<W>,
}

impl JsonLinesAccumulator<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonLinesAccumulator<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_line(&self, observation: &Observation) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_writer(&mut *out, observation)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

impl<W: Write + Send> Accumulator for JsonLinesAccumulator<W> {
    fn add_observation(&self, observation: Observation) {
        if let Err(e) = self.write_line(&observation) {
            error!(measurement = %observation.measurement, "Failed to write observation: {e}");
        }
    }

    fn add_error(&self, error: PollError) {
        warn!(endpoint = %error.endpoint, "Collection failed: {}", error.error);
    }
}
