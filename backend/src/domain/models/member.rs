//! Domain model for a member of the payer rotation.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::weekday::RemoteWeekday;

pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Position in the rotation; the store returns members sorted by it
    pub rotation_rank: u32,
    pub remote_weekday: Option<RemoteWeekday>,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn generate_id() -> String {
        format!("member::{}", Uuid::new_v4())
    }

    pub fn is_remote_on(&self, weekday: RemoteWeekday) -> bool {
        self.remote_weekday == Some(weekday)
    }
}

/// Rank for a member appended to `members`: one past the highest rank, or 1
pub fn next_rotation_rank(members: &[Member]) -> u32 {
    members
        .iter()
        .map(|m| m.rotation_rank)
        .max()
        .map_or(1, |rank| rank + 1)
}

/// Trim and validate a display name
pub fn normalize_member_name(name: &str) -> Result<String, MemberValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(MemberValidationError::EmptyName);
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(MemberValidationError::NameTooLong { max: MAX_NAME_LENGTH });
    }

    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemberValidationError {
    #[error("Member name cannot be empty")]
    EmptyName,
    #[error("Member name cannot exceed {max} characters")]
    NameTooLong { max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_with_rank(rank: u32) -> Member {
        Member {
            id: Member::generate_id(),
            name: format!("Member {}", rank),
            rotation_rank: rank,
            remote_weekday: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_next_rotation_rank() {
        assert_eq!(next_rotation_rank(&[]), 1);

        let members = vec![member_with_rank(1), member_with_rank(4), member_with_rank(2)];
        assert_eq!(next_rotation_rank(&members), 5);
    }

    #[test]
    fn test_normalize_member_name() {
        assert_eq!(normalize_member_name("  Ana  "), Ok("Ana".to_string()));
        assert_eq!(normalize_member_name("   "), Err(MemberValidationError::EmptyName));

        let long_name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            normalize_member_name(&long_name),
            Err(MemberValidationError::NameTooLong { max: MAX_NAME_LENGTH })
        );
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let first = Member::generate_id();
        let second = Member::generate_id();
        assert!(first.starts_with("member::"));
        assert_ne!(first, second);
    }
}
