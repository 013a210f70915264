//! Record pipeline: spreadsheet rows in, normalized deliveries out
//!
//! This module owns the loosely-typed record representation, the pure
//! normalization pass, and the batch orchestrator that drives categories
//! through extraction, normalization, and delivery.

pub mod normalize;
pub mod record;
pub mod runner;

pub use normalize::{DATE_FIELD, NUMERIC_FIELDS, NormalizeError, normalize};
pub use record::{FieldValue, Record};
pub use runner::{CategorySummary, RecordSink, RecordSource, RunSummary, run_sync};
