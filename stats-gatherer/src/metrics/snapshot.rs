use crate::FetchError;
use serde_json::{
    Map,
    Value,
};

/// One decoded status document.
///
/// The document is kept loosely typed and addressed by JSON pointer
/// (`/metrics/sys.cpu.user.percent`), so fields the producer adds or removes
/// never break decoding. Lookups of absent or mistyped paths yield the zero
/// value of the requested type. The top level must be an object or `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    document: Value,
}

impl Snapshot {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FetchError> {
        let document: Option<Map<String, Value>> = serde_json::from_slice(bytes).map_err(FetchError::DecodeFailed)?;
        Ok(Self {
            document: document.map(Value::Object).unwrap_or_default(),
        })
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.document.pointer(path)
    }

    pub fn float(&self, path: &str) -> f64 {
        self.get(path).and_then(Value::as_f64).unwrap_or_default()
    }

    /// Fractional numbers truncate, values above `i64::MAX` saturate.
    pub fn integer(&self, path: &str) -> i64 {
        match self.get(path) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|_| i64::MAX))
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or_default(),
            _ => 0,
        }
    }

    pub fn text(&self, path: &str) -> String {
        self.get(path)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

impl From<Value> for Snapshot {
    fn from(document: Value) -> Self {
        Self { document }
    }
}
