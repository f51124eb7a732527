//! # Storage Module
//!
//! Handles persistence of the member queue.
//!
//! The domain layer only sees the [`MemberStorage`] trait; the CSV
//! implementation keeps the queue in a single human-editable file inside the
//! configured data directory.

pub mod csv;
pub mod traits;

pub use self::csv::{CsvConnection, MemberRepository};
pub use traits::MemberStorage;
