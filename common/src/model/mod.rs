pub mod catalog;
pub mod file;
pub mod measurement;
pub mod report;
pub mod upload;
