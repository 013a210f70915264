pub mod report;
pub mod sync;
