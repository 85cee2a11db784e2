//! Shared model and form orchestration for the report upload client.
//!
//! - `model`: wire types exchanged with the report service and the instrument catalog.
//! - `requests`: the multipart payload description sent to `POST /upload`.
//! - `session`: the platform-neutral form controller used by the browser and CLI front ends.
//! - `error`: typed failures whose `Display` text is what the user sees.

pub mod error;
pub mod model;
pub mod requests;
pub mod session;
