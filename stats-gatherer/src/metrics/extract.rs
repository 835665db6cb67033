//! The table of status document paths republished as observation fields and tags.

use crate::{
    endpoint::Endpoint,
    metrics::{
        FieldValue,
        Observation,
        Snapshot,
        MEASUREMENT,
    },
};
use chrono::{
    DateTime,
    Utc,
};
use roach_stats_config::{
    FieldConfig,
    FieldKind,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    /// JSON pointer into the status document.
    pub path: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, path: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
        }
    }

    pub fn float(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, FieldKind::Float)
    }

    pub fn integer(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, FieldKind::Integer)
    }

    pub fn text(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, path, FieldKind::Text)
    }

    /// A node metric, read from `/metrics/<name>`.
    fn metric(name: &str, kind: FieldKind) -> Self {
        Self::new(name, format!("/metrics/{name}"), kind)
    }

    pub fn read(&self, snapshot: &Snapshot) -> FieldValue {
        match self.kind {
            FieldKind::Float => snapshot.float(&self.path).into(),
            FieldKind::Integer => snapshot.integer(&self.path).into(),
            FieldKind::Text => snapshot.text(&self.path).into(),
        }
    }
}

impl From<FieldConfig> for FieldSpec {
    fn from(field: FieldConfig) -> Self {
        Self::new(field.name, field.path, field.kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TagSource {
    /// The configured endpoint's `host[:port]`.
    EndpointHost,
    /// A string at the given JSON pointer.
    Snapshot(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagSpec {
    pub name: String,
    pub source: TagSource,
}

impl TagSpec {
    pub fn endpoint_host(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: TagSource::EndpointHost,
        }
    }

    pub fn snapshot(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: TagSource::Snapshot(path.into()),
        }
    }

    pub fn read(&self, endpoint: &Endpoint, snapshot: &Snapshot) -> String {
        match &self.source {
            TagSource::EndpointHost => endpoint.server_tag(),
            TagSource::Snapshot(path) => snapshot.text(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMap {
    measurement: String,
    fields: Vec<FieldSpec>,
    tags: Vec<TagSpec>,
}

impl Default for ExtractionMap {
    fn default() -> Self {
        Self::node_status()
    }
}

impl ExtractionMap {
    pub fn new(measurement: impl Into<String>, fields: Vec<FieldSpec>, tags: Vec<TagSpec>) -> Self {
        Self {
            measurement: measurement.into(),
            fields,
            tags,
        }
    }

    /// The fields and tags republished from `/_status/nodes/1`.
    pub fn node_status() -> Self {
        Self::new(
            MEASUREMENT,
            vec![
                FieldSpec::metric("sys.cpu.user.percent", FieldKind::Float),
                FieldSpec::metric("sys.cpu.sys.percent", FieldKind::Float),
                FieldSpec::metric("timeseries.write.bytes", FieldKind::Integer),
                FieldSpec::metric("timeseries.write.samples", FieldKind::Integer),
                FieldSpec::metric("exec.latency-max", FieldKind::Integer),
            ],
            vec![
                TagSpec::snapshot("addressField", "/desc/address/addressField"),
                TagSpec::endpoint_host("server"),
            ],
        )
    }

    /// Adds fields to the table. A field whose name is already present replaces it.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        for field in fields {
            match self.fields.iter_mut().find(|existing| existing.name == field.name) {
                Some(existing) => *existing = field,
                None => self.fields.push(field),
            }
        }
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn extract(&self, endpoint: &Endpoint, snapshot: &Snapshot, timestamp: DateTime<Utc>) -> Observation {
        Observation {
            measurement: self.measurement.clone(),
            tags: self
                .tags
                .iter()
                .map(|tag| (tag.name.clone(), tag.read(endpoint, snapshot)))
                .collect(),
            fields: self
                .fields
                .iter()
                .map(|field| (field.name.clone(), field.read(snapshot)))
                .collect(),
            timestamp,
        }
    }
}
