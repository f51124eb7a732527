use std::sync::Arc;
use tracing::info;

use crate::domain::commands::members::AppendMemberCommand;
use crate::domain::errors::QueueError;
use crate::domain::models::member::normalize_member_name;
use crate::domain::models::Member;
use crate::storage::MemberStorage;

/// Service for managing the members of the rotation queue
#[derive(Clone)]
pub struct MemberService {
    store: Arc<dyn MemberStorage>,
}

impl MemberService {
    /// Create a new MemberService
    pub fn new(store: Arc<dyn MemberStorage>) -> Self {
        Self { store }
    }

    /// List all members in rotation order
    pub async fn list_members(&self) -> Result<Vec<Member>, QueueError> {
        let members = self
            .store
            .list_members()
            .await
            .map_err(QueueError::from_store)?;

        info!("Found {} members", members.len());
        Ok(members)
    }

    /// Append a member at the tail of the rotation
    pub async fn append_member(&self, command: AppendMemberCommand) -> Result<Member, QueueError> {
        info!(
            "Appending member: name={}, remote_weekday={:?}",
            command.name, command.remote_weekday
        );

        let name = normalize_member_name(&command.name)?;

        let member = self
            .store
            .append_member(&name, command.remote_weekday)
            .await
            .map_err(QueueError::from_store)?;

        info!("Appended member: {} with ID: {}", member.name, member.id);
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MemberValidationError, RemoteWeekday};
    use crate::storage::{CsvConnection, MemberRepository};
    use tempfile::TempDir;

    fn setup_test() -> (MemberService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let service = MemberService::new(Arc::new(MemberRepository::new(connection)));
        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_append_and_list_members() {
        let (service, _temp_dir) = setup_test();

        let command = AppendMemberCommand {
            name: " Ana ".to_string(),
            remote_weekday: Some(RemoteWeekday::Thursday),
        };
        let member = service.append_member(command).await.expect("Failed to append member");

        assert_eq!(member.name, "Ana");
        assert_eq!(member.rotation_rank, 1);

        let members = service.list_members().await.expect("Failed to list members");
        assert_eq!(members, vec![member]);
    }

    #[tokio::test]
    async fn test_append_validation() {
        let (service, _temp_dir) = setup_test();

        let command = AppendMemberCommand {
            name: "".to_string(),
            remote_weekday: None,
        };
        let result = service.append_member(command).await;
        assert!(matches!(
            result,
            Err(QueueError::Validation(MemberValidationError::EmptyName))
        ));

        let command = AppendMemberCommand {
            name: "n".repeat(101),
            remote_weekday: None,
        };
        let result = service.append_member(command).await;
        assert!(matches!(
            result,
            Err(QueueError::Validation(MemberValidationError::NameTooLong { .. }))
        ));

        assert!(service.list_members().await.unwrap().is_empty());
    }
}
