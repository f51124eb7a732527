//! # Storage Traits
//!
//! Storage abstraction for the member queue, so the domain layer works with
//! any backend (CSV files, in-memory fakes in tests) without modification.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Member, RemoteWeekday};

/// Trait defining the interface for member queue storage operations
#[async_trait]
pub trait MemberStorage: Send + Sync {
    /// List all members ordered by rotation rank ascending
    async fn list_members(&self) -> Result<Vec<Member>>;

    /// Append a member at the tail of the rotation.
    ///
    /// The new member gets rank `max(existing) + 1`, or 1 for an empty queue.
    /// Fails with `MemberValidationError` when the name is empty.
    async fn append_member(
        &self,
        name: &str,
        remote_weekday: Option<RemoteWeekday>,
    ) -> Result<Member>;
}
