//! givebox: donation inventory tracking for student giveaway programs.
//!
//! The admin keeps a catalog of donated items in a local sqlite database,
//! captures a morning and an evening snapshot of it each day, and gets a
//! report of what was added, claimed or restocked in between. The report
//! can optionally be summarized by an external text-generation endpoint;
//! that call is best-effort and never affects the report itself.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod store;
pub mod summary;

pub use error::{Error, Result};
