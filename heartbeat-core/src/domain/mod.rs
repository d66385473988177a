//! Core domain types
//!
//! These types mirror the parts of the dbt Cloud API the monitor reads.
//! They are shared between the HTTP client (which fetches them) and the CLI
//! (which polls, renders and notifies on them).

pub mod classification;
pub mod job;
pub mod run;

pub use classification::{Classification, classify};
pub use job::JobMetadata;
pub use run::{JobRun, UNKNOWN};
