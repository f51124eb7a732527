//! Conversions between domain members and the DTOs in `shared`.

use crate::domain::business_days::format_date_long;
use crate::domain::commands::payer::{PayerAssignment, QueueOverview};
use crate::domain::models::weekday::ParseRemoteWeekdayError;
use crate::domain::models::{Member as DomainMember, RemoteWeekday as DomainRemoteWeekday};
use shared::{
    Member as SharedMember, MemberListResponse, PayerDay, QueueEntry, QueueOverviewResponse,
    RemoteWeekday as SharedRemoteWeekday, RemoteWeekdayInput, UpcomingPayersResponse,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapper to convert between shared Member DTOs and domain Member models.
pub struct MemberMapper;

impl MemberMapper {
    /// Parse the entry form value: a code 1-5 or an English/locale day name
    pub fn weekday_input_to_domain(
        input: RemoteWeekdayInput,
    ) -> Result<DomainRemoteWeekday, ParseRemoteWeekdayError> {
        match input {
            RemoteWeekdayInput::Code(code) => DomainRemoteWeekday::from_code(code)
                .ok_or_else(|| ParseRemoteWeekdayError(code.to_string())),
            RemoteWeekdayInput::Name(name) => name.parse(),
        }
    }

    pub fn weekday_to_dto(domain: DomainRemoteWeekday) -> SharedRemoteWeekday {
        match domain {
            DomainRemoteWeekday::Monday => SharedRemoteWeekday::Monday,
            DomainRemoteWeekday::Tuesday => SharedRemoteWeekday::Tuesday,
            DomainRemoteWeekday::Wednesday => SharedRemoteWeekday::Wednesday,
            DomainRemoteWeekday::Thursday => SharedRemoteWeekday::Thursday,
            DomainRemoteWeekday::Friday => SharedRemoteWeekday::Friday,
        }
    }

    /// Converts a domain Member model to a shared Member DTO.
    pub fn to_dto(domain: DomainMember) -> SharedMember {
        SharedMember {
            id: domain.id,
            name: domain.name,
            rotation_rank: domain.rotation_rank,
            remote_weekday: domain.remote_weekday.map(Self::weekday_to_dto),
            remote_day_label: domain.remote_weekday.map(|day| day.short_label().to_string()),
            remote_day_code: domain.remote_weekday.map(|day| day.code()),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_member_list_dto(members: Vec<DomainMember>) -> MemberListResponse {
        MemberListResponse {
            members: members.into_iter().map(Self::to_dto).collect(),
        }
    }

    /// Builds the rendered queue, flagging the member who pays
    pub fn to_overview_dto(overview: QueueOverview) -> QueueOverviewResponse {
        let payer_id = overview.assigned_payer().map(|m| m.id.clone());

        let members = overview
            .members
            .into_iter()
            .map(|member| QueueEntry {
                is_paying: payer_id.as_deref() == Some(member.id.as_str()),
                member: Self::to_dto(member),
            })
            .collect();

        let (payer_date, assigned_payer, exempted_member) = match overview.assignment {
            Some(assignment) => (
                Some(assignment.date.format(DATE_FORMAT).to_string()),
                Some(Self::to_dto(assignment.payer)),
                assignment.exempted.map(Self::to_dto),
            ),
            None => (None, None, None),
        };

        QueueOverviewResponse {
            date: overview.date.format(DATE_FORMAT).to_string(),
            formatted_date: format_date_long(overview.date),
            payer_date,
            assigned_payer,
            exempted_member,
            pointer: overview.pointer,
            members,
        }
    }

    pub fn to_payer_day_dto(assignment: PayerAssignment) -> PayerDay {
        PayerDay {
            date: assignment.date.format(DATE_FORMAT).to_string(),
            weekday: assignment.weekday.locale_name().to_string(),
            payer: Self::to_dto(assignment.payer),
            exempted_member: assignment.exempted.map(Self::to_dto),
        }
    }

    pub fn to_upcoming_dto(assignments: Vec<PayerAssignment>) -> UpcomingPayersResponse {
        UpcomingPayersResponse {
            days: assignments.into_iter().map(Self::to_payer_day_dto).collect(),
        }
    }
}
