pub mod extract;
pub mod observation;
pub mod snapshot;

// Re-export the main types for easy access
pub use extract::{
    ExtractionMap,
    FieldSpec,
    TagSource,
    TagSpec,
};
pub use observation::{
    FieldValue,
    Observation,
    MEASUREMENT,
};
pub use snapshot::Snapshot;
