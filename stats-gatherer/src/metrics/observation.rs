use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Measurement name every observation of a node status poll is recorded under.
pub const MEASUREMENT: &str = "cockroachdb";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Tagged metric values extracted from one endpoint at one poll instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldValue>,
    pub timestamp: DateTime<Utc>,
}
