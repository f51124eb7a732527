pub mod member;
pub mod weekday;

pub use member::{Member, MemberValidationError};
pub use weekday::RemoteWeekday;
