//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod members {
    use crate::domain::models::RemoteWeekday;

    /// Input for appending a member at the tail of the rotation.
    #[derive(Debug, Clone)]
    pub struct AppendMemberCommand {
        pub name: String,
        pub remote_weekday: Option<RemoteWeekday>,
    }
}

pub mod payer {
    use chrono::NaiveDate;

    use crate::domain::models::{Member, RemoteWeekday};

    /// Who pays on one business day.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PayerAssignment {
        pub date: NaiveDate,
        pub weekday: RemoteWeekday,
        pub payer: Member,
        /// Candidate skipped because they are remote on `weekday`
        pub exempted: Option<Member>,
    }

    /// Result of computing the queue for a reference date.
    #[derive(Debug, Clone, PartialEq)]
    pub struct QueueOverview {
        pub date: NaiveDate,
        /// None when the queue is empty
        pub assignment: Option<PayerAssignment>,
        pub pointer: usize,
        pub members: Vec<Member>,
    }

    impl QueueOverview {
        pub fn assigned_payer(&self) -> Option<&Member> {
            self.assignment.as_ref().map(|a| &a.payer)
        }
    }

    /// Query for the payers of the next few business days.
    #[derive(Debug, Clone)]
    pub struct UpcomingPayersQuery {
        pub from: NaiveDate,
        pub days: usize,
    }
}
