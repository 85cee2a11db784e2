//! Command-line client for the report generator.
//!
//! Drives the same `FormSession` the browser form uses, over local files:
//!
//! - `config`: command-line flags and their environment fallbacks.
//! - `local_file`: turns paths into `SelectedFile` records.
//! - `endpoint`: `HttpEndpoint`, the report service reached with reqwest.
//! - `presenter`: `DirectoryPresenter`, which saves fetched documents to disk.
//! - `run`: fills the session from the flags, submits and downloads.

pub mod config;
pub mod endpoint;
pub mod local_file;
pub mod presenter;
pub mod run;

pub use config::Cli;
pub use run::{RunReport, run};
