use serde::{Deserialize, Serialize};

/// Weekday a member works remotely, as sent over the wire ("monday" .. "friday")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteWeekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// Remote weekday as typed into the entry form.
///
/// Either the numeric code (1 = Monday .. 5 = Friday) or a day name, English
/// ("monday") or localized ("segunda-feira"). The backend validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteWeekdayInput {
    Code(u8),
    Name(String),
}

/// Member ID in format: "member::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    /// Display name shown in the queue
    pub name: String,
    /// Position in the rotation, starting at 1
    pub rotation_rank: u32,
    /// Weekday this member is remote, if any
    pub remote_weekday: Option<RemoteWeekday>,
    /// Localized label for the remote weekday (e.g. "Segunda")
    pub remote_day_label: Option<String>,
    /// Entry form code of the remote weekday, 1 = Monday .. 5 = Friday
    pub remote_day_code: Option<u8>,
    /// When the member joined the queue (RFC 3339)
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub members: Vec<Member>,
}

/// Request to append a member at the tail of the rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    #[serde(default)]
    pub remote_weekday: Option<RemoteWeekdayInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberResponse {
    pub member: Member,
    /// Queue recomputed after the append, ready to render.
    /// None when the member was stored but the queue could not be computed.
    pub overview: Option<QueueOverviewResponse>,
    /// Why `overview` is missing
    pub overview_error: Option<ErrorResponse>,
    pub success_message: String,
}

/// One row of the rendered queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub member: Member,
    /// True for the member paying on the requested date
    pub is_paying: bool,
}

/// Everything the presentation layer needs to render the queue for a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueOverviewResponse {
    /// Requested reference date (YYYY-MM-DD)
    pub date: String,
    /// Human-readable reference date, e.g. "segunda-feira, 02 de outubro"
    pub formatted_date: String,
    /// Business day the assignment applies to; differs from `date` on weekends
    pub payer_date: Option<String>,
    /// None when the queue is empty
    pub assigned_payer: Option<Member>,
    /// Member whose turn it was but who is remote on `payer_date`
    pub exempted_member: Option<Member>,
    /// Rotation pointer after replaying up to `payer_date`
    pub pointer: usize,
    pub members: Vec<QueueEntry>,
}

/// Payer for a single upcoming business day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayerDay {
    /// Business day (YYYY-MM-DD)
    pub date: String,
    /// Localized weekday name, e.g. "terça-feira"
    pub weekday: String,
    pub payer: Member,
    pub exempted_member: Option<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingPayersResponse {
    pub days: Vec<PayerDay>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable kind: "validation_error", "invalid_range", "store_unavailable"
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
