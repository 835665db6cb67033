use crate::{
    collectors::{
        Accumulator,
        Collector,
        HttpFetcher,
        StatusSource,
    },
    endpoint::{
        resolve_servers,
        Endpoint,
    },
    metrics::{
        ExtractionMap,
        FieldSpec,
        Observation,
    },
    FetchError,
    PollError,
};
use chrono::Utc;
use eyre::Result;
use futures::future::join_all;
use roach_stats_config::{
    Config,
    SAMPLE_CONFIG,
};
use std::{
    future::Future,
    pin::Pin,
};

/// Polls every configured node and turns each status document into one observation.
///
/// Nodes are fetched concurrently, so a hung node costs at most one request
/// timeout. Results reach the accumulator in configuration order. A failing
/// node is reported as a [`PollError`] and never keeps the others from being
/// collected.
pub struct Orchestrator<S = HttpFetcher> {
    servers: Vec<String>,
    source: S,
    extraction: ExtractionMap,
}

impl Orchestrator<HttpFetcher> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let extraction = ExtractionMap::node_status().with_fields(config.fields.iter().cloned().map(FieldSpec::from));
        Ok(Self::new(&config.servers, HttpFetcher::new()?, extraction))
    }
}

impl<S: StatusSource> Orchestrator<S> {
    /// An empty `servers` list polls the default local node.
    pub fn new(servers: &[String], source: S, extraction: ExtractionMap) -> Self {
        Self {
            servers: resolve_servers(servers),
            source,
            extraction,
        }
    }

    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    pub fn extraction(&self) -> &ExtractionMap {
        &self.extraction
    }

    #[instrument(level = "debug", skip(self))]
    async fn poll(&self, server: &str) -> Result<Observation, PollError> {
        let attributed = |error: FetchError| PollError::new(server, error);

        let endpoint = Endpoint::parse(server).map_err(attributed)?;
        let snapshot = self.source.fetch(&endpoint).await.map_err(attributed)?;

        Ok(self.extraction.extract(&endpoint, &snapshot, Utc::now()))
    }
}

impl<S: StatusSource> Collector for Orchestrator<S> {
    fn collect<'a>(&'a self, accumulator: &'a dyn Accumulator) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            debug!(servers = self.servers.len(), "Collecting node status");

            let results = join_all(self.servers.iter().map(|server| self.poll(server))).await;

            let mut failed = 0;
            for result in results {
                match result {
                    Ok(observation) => accumulator.add_observation(observation),
                    Err(error) => {
                        failed += 1;
                        accumulator.add_error(error);
                    }
                }
            }

            debug!(servers = self.servers.len(), failed, "Collection finished");
        })
    }

    fn description(&self) -> &'static str {
        "Read health status metrics from the status endpoint of CockroachDB nodes"
    }

    fn sample_config(&self) -> &'static str {
        SAMPLE_CONFIG
    }

    fn name(&self) -> &'static str {
        "cockroachdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collectors::MemoryAccumulator,
        endpoint::DEFAULT_ENDPOINT,
        metrics::{
            FieldValue,
            Snapshot,
        },
        test_support::{
            serve_node_status,
            serve_status,
        },
    };
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::{
        collections::BTreeMap,
        sync::Mutex,
        time::{
            Duration,
            Instant,
        },
    };

    /// Answers from memory: hosts starting with `down` fail, all others succeed.
    #[derive(Default)]
    struct FakeSource {
        attempts: Mutex<Vec<String>>,
    }

    impl StatusSource for FakeSource {
        fn fetch<'a>(
            &'a self,
            endpoint: &'a Endpoint,
        ) -> Pin<Box<dyn Future<Output = Result<Snapshot, FetchError>> + Send + 'a>> {
            Box::pin(async move {
                self.attempts.lock().unwrap().push(endpoint.to_string());
                let host = endpoint.server_tag();
                if host.starts_with("down") {
                    Err(FetchError::UnexpectedStatus(503))
                } else {
                    Ok(Snapshot::from(json!({ "desc": { "address": { "addressField": host } } })))
                }
            })
        }
    }

    fn servers(addresses: &[&str]) -> Vec<String> {
        addresses.iter().map(|s| s.to_string()).collect()
    }

    fn http_orchestrator(servers: Vec<String>) -> Orchestrator {
        Orchestrator::new(&servers, HttpFetcher::new().unwrap(), ExtractionMap::node_status())
    }

    #[tokio::test]
    async fn empty_server_list_polls_default_node_once() {
        let orchestrator = Orchestrator::new(&[], FakeSource::default(), ExtractionMap::node_status());
        assert_eq!(orchestrator.servers(), [DEFAULT_ENDPOINT.to_string()]);

        let acc = MemoryAccumulator::new();
        orchestrator.collect(&acc).await;

        assert_eq!(*orchestrator.source.attempts.lock().unwrap(), vec!["http://localhost:8080/"]);
        assert_eq!(acc.observations().len(), 1);
        assert_eq!(acc.observations()[0].tags["server"], "localhost:8080");
    }

    #[tokio::test]
    async fn one_result_per_server() {
        let configured = servers(&[
            "http://roach1:8080",
            "http://down1:8080",
            "http://roach2:8080",
            "not a url",
            "http://down2:8080",
            "http://roach3:8080",
        ]);
        let orchestrator = Orchestrator::new(&configured, FakeSource::default(), ExtractionMap::node_status());
        let acc = MemoryAccumulator::new();

        orchestrator.collect(&acc).await;

        // the unparseable address never reaches the source
        assert_eq!(orchestrator.source.attempts.lock().unwrap().len(), 5);

        let tagged: Vec<_> = acc
            .observations()
            .iter()
            .map(|observation| observation.tags["addressField"].clone())
            .collect();
        assert_eq!(tagged, vec!["roach1:8080", "roach2:8080", "roach3:8080"]);

        let errors = acc.take_errors();
        let failed: Vec<_> = errors.iter().map(|error| error.endpoint.as_str()).collect();
        assert_eq!(failed, vec!["http://down1:8080", "not a url", "http://down2:8080"]);
        assert!(matches!(errors[0].error, FetchError::UnexpectedStatus(503)));
        assert!(matches!(errors[1].error, FetchError::InvalidAddress { .. }));
    }

    #[tokio::test]
    async fn collects_sample_node_status() {
        let server = serve_node_status().await;
        let host = server.trim_start_matches("http://").to_string();
        let orchestrator = http_orchestrator(vec![server]);
        let acc = MemoryAccumulator::new();

        orchestrator.collect(&acc).await;

        assert_eq!(acc.error_count(), 0);
        let observations = acc.observations();
        assert_eq!(observations.len(), 1);
        let observation = &observations[0];
        assert_eq!(observation.measurement, "cockroachdb");
        assert_eq!(
            observation.tags,
            BTreeMap::from([
                ("addressField".to_string(), "roach1:26257".to_string()),
                ("server".to_string(), host),
            ])
        );
        assert_eq!(
            observation.fields,
            BTreeMap::from([
                ("sys.cpu.user.percent".to_string(), FieldValue::Float(0.004999888952466365)),
                ("sys.cpu.sys.percent".to_string(), FieldValue::Float(0.010999755695426005)),
                ("timeseries.write.bytes".to_string(), FieldValue::Integer(16668854)),
                ("timeseries.write.samples".to_string(), FieldValue::Integer(169916)),
                ("exec.latency-max".to_string(), FieldValue::Integer(6291455)),
            ])
        );
    }

    #[tokio::test]
    async fn partial_document_still_yields_an_observation() {
        let server = serve_status(|| async { r#"{"metrics": {"sys.cpu.user.percent": 0.5}, "newField": [1, 2]}"# }).await;
        let orchestrator = http_orchestrator(vec![server]);
        let acc = MemoryAccumulator::new();

        orchestrator.collect(&acc).await;

        assert_eq!(acc.error_count(), 0);
        let observation = &acc.observations()[0];
        assert_eq!(observation.fields["sys.cpu.user.percent"], FieldValue::Float(0.5));
        assert_eq!(observation.fields["timeseries.write.bytes"], FieldValue::Integer(0));
        assert_eq!(observation.tags["addressField"], "");
    }

    #[tokio::test]
    async fn failing_nodes_are_reported_and_skipped() {
        let healthy = serve_node_status().await;
        let draining = serve_status(|| async { StatusCode::SERVICE_UNAVAILABLE }).await;
        let garbled = serve_status(|| async { "{\"metrics\": " }).await;
        let orchestrator = http_orchestrator(vec![draining.clone(), healthy.clone(), garbled.clone(), healthy]);
        let acc = MemoryAccumulator::new();

        orchestrator.collect(&acc).await;

        assert_eq!(acc.observations().len(), 2);
        let errors = acc.take_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].endpoint, draining);
        assert!(matches!(errors[0].error, FetchError::UnexpectedStatus(503)));
        assert_eq!(errors[1].endpoint, garbled);
        assert!(matches!(errors[1].error, FetchError::DecodeFailed(_)));
    }

    #[tokio::test]
    async fn hung_node_does_not_hold_back_others() {
        let hung = serve_status(|| async {
            std::future::pending::<()>().await;
            "unreachable"
        })
        .await;
        let healthy = serve_node_status().await;
        let fetcher = HttpFetcher::with_timeouts(Duration::from_millis(300), Duration::from_millis(500)).unwrap();
        let orchestrator = Orchestrator::new(&[hung, healthy], fetcher, ExtractionMap::node_status());
        let acc = MemoryAccumulator::new();

        let started = Instant::now();
        orchestrator.collect(&acc).await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(acc.observations().len(), 1);
        let errors = acc.take_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].error, FetchError::Timeout(_)));
    }

    #[tokio::test]
    async fn configured_fields_are_extracted() {
        let server = serve_node_status().await;
        let mut config = Config::default();
        config.servers = vec![server];
        config.fields = vec![roach_stats_config::FieldConfig {
            name: "sys.goroutines".to_string(),
            path: "/metrics/sys.goroutines".to_string(),
            kind: roach_stats_config::FieldKind::Integer,
        }];
        let orchestrator = Orchestrator::from_config(&config).unwrap();
        let acc = MemoryAccumulator::new();

        orchestrator.collect(&acc).await;

        let observation = &acc.observations()[0];
        assert_eq!(observation.fields.len(), 6);
        assert_eq!(observation.fields["sys.goroutines"], FieldValue::Integer(412));
    }

    #[test]
    fn describes_itself() {
        let orchestrator = Orchestrator::new(&[], FakeSource::default(), ExtractionMap::default());
        assert_eq!(orchestrator.name(), "cockroachdb");
        assert!(orchestrator.sample_config().contains("servers:"));
        assert!(!orchestrator.description().is_empty());
    }
}
