//! Load generation against the trunk provisioning API.
//!
//! - [`runner`] sends requests in three phases and records one [`runner::TestResult`] for each.
//! - [`analysis`] summarizes results and writes the report file.
//! - [`args`] reads command-line arguments.

pub mod analysis;
pub mod args;
pub mod runner;
