use serde::{
    Deserialize,
    Serialize,
};
use strum::{
    Display,
    EnumString,
};

/// The value type a field is read as from the node status document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Float,
    Integer,
    Text,
}

/// A user-declared field, added on top of the built-in extraction table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Output field name, e.g. `sql.conns`.
    pub name: String,
    /// JSON pointer into the status document, e.g. `/metrics/sql.conns`.
    pub path: String,
    pub kind: FieldKind,
}
