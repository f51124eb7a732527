//! Rotation scheduler.
//!
//! Replays the member rotation over every business day from the anchor date
//! to a reference date and reports who pays on the last of those days.
//!
//! Each business day the member at the pointer is the candidate. If the
//! candidate is remote on that weekday, the next member in line pays and the
//! pointer stays put, so the candidate is offered the turn again on the next
//! business day. Otherwise the candidate pays and the pointer advances.
//!
//! The scheduler is a pure function of `(members, anchor, reference)`. A
//! [`RotationCheckpoint`] lets callers resume a replay from a previously
//! computed day instead of starting over at the anchor; resumed replays
//! always match a full replay.

use chrono::NaiveDate;
use tracing::debug;

use super::business_days::{
    business_day_count, business_days, next_business_day_on_or_after, BusinessDays,
};
use super::errors::QueueError;
use super::models::{Member, RemoteWeekday};

/// Payer decision for one business day.
///
/// Members are referenced by their index in the snapshot the replay ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAssignment {
    pub date: NaiveDate,
    pub weekday: RemoteWeekday,
    /// Member whose turn it was
    pub candidate: usize,
    /// Member who pays
    pub payer: usize,
    /// True when the candidate was remote and `payer` stood in
    pub exempted: bool,
}

impl DayAssignment {
    pub fn payer<'a>(&self, members: &'a [Member]) -> &'a Member {
        &members[self.payer]
    }

    /// The exempt candidate, if the payer is a substitute
    pub fn exempted_member<'a>(&self, members: &'a [Member]) -> Option<&'a Member> {
        self.exempted.then(|| &members[self.candidate])
    }
}

/// Rotation pointer carried from one business day to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationState {
    pointer: usize,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pointer(pointer: usize) -> Self {
        Self { pointer }
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Apply one day of the rotation.
    ///
    /// Returns `None` without touching the pointer when `members` is empty or
    /// `date` is a weekend day.
    pub fn step(&mut self, members: &[Member], date: NaiveDate) -> Option<DayAssignment> {
        let weekday = RemoteWeekday::from_date(date)?;
        if members.is_empty() {
            return None;
        }

        let len = members.len();
        let candidate = self.pointer % len;

        if members[candidate].is_remote_on(weekday) {
            // A single-member queue substitutes the candidate with itself
            let substitute = (self.pointer + 1) % len;
            Some(DayAssignment {
                date,
                weekday,
                candidate,
                payer: substitute,
                exempted: true,
            })
        } else {
            self.pointer = (self.pointer + 1) % len;
            Some(DayAssignment {
                date,
                weekday,
                candidate,
                payer: candidate,
                exempted: false,
            })
        }
    }
}

/// Result of replaying the rotation up to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOutcome {
    /// Assignment of the last business day in range; None for an empty queue
    /// or a range without business days
    pub assignment: Option<DayAssignment>,
    /// Pointer after the last replayed day
    pub pointer: usize,
    /// Zero-based business-day index of `assignment` counted from the anchor
    pub business_day_index: Option<u64>,
}

impl RotationOutcome {
    fn empty(business_day_index: Option<u64>) -> Self {
        Self {
            assignment: None,
            pointer: 0,
            business_day_index,
        }
    }
}

/// Ordered identity of a member list, as far as the rotation is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFingerprint(Vec<(String, Option<RemoteWeekday>)>);

impl RosterFingerprint {
    pub fn of(members: &[Member]) -> Self {
        Self(
            members
                .iter()
                .map(|m| (m.id.clone(), m.remote_weekday))
                .collect(),
        )
    }
}

/// Replay progress that can be resumed later.
///
/// Only valid for the same anchor and the same roster; any change to the
/// member list alters every past decision, so the checkpoint is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationCheckpoint {
    anchor: NaiveDate,
    roster: RosterFingerprint,
    last_assignment: DayAssignment,
    pointer: usize,
}

impl RotationCheckpoint {
    /// Last business day covered by this checkpoint
    pub fn through(&self) -> NaiveDate {
        self.last_assignment.date
    }

    fn resumes(&self, anchor: NaiveDate, roster: &RosterFingerprint, reference: NaiveDate) -> bool {
        self.anchor == anchor && &self.roster == roster && self.through() <= reference
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationScheduler {
    anchor: NaiveDate,
}

impl RotationScheduler {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    /// Replay every business day from the anchor through `reference`
    pub fn replay(
        &self,
        members: &[Member],
        reference: NaiveDate,
    ) -> Result<RotationOutcome, QueueError> {
        let days = business_days(self.anchor, reference)?;
        let business_day_index = business_day_count(self.anchor, reference)?;
        if members.is_empty() {
            return Ok(RotationOutcome::empty(business_day_index));
        }

        let mut state = RotationState::new();
        let assignment = Self::walk(&mut state, members, days, None);

        Ok(RotationOutcome {
            assignment,
            pointer: state.pointer(),
            business_day_index,
        })
    }

    /// Replay through `reference`, resuming from `checkpoint` when it applies.
    ///
    /// Returns the outcome together with a checkpoint for the last replayed
    /// day (None when no business day was replayed).
    pub fn replay_from(
        &self,
        checkpoint: Option<&RotationCheckpoint>,
        members: &[Member],
        reference: NaiveDate,
    ) -> Result<(RotationOutcome, Option<RotationCheckpoint>), QueueError> {
        // Validates the range even when resuming
        let business_day_index = business_day_count(self.anchor, reference)?;
        if members.is_empty() {
            return Ok((RotationOutcome::empty(business_day_index), None));
        }

        let roster = RosterFingerprint::of(members);
        let (mut state, start, previous) = match checkpoint {
            Some(cp) if cp.resumes(self.anchor, &roster, reference) => {
                debug!("Resuming rotation replay after {}", cp.through());
                (
                    RotationState::with_pointer(cp.pointer),
                    cp.through().succ_opt(),
                    Some(cp.last_assignment),
                )
            }
            _ => {
                debug!("Replaying rotation from anchor {}", self.anchor);
                (RotationState::new(), Some(self.anchor), None)
            }
        };

        let assignment = match start {
            Some(start) => {
                let days = BusinessDays::new(start, reference);
                Self::walk(&mut state, members, days, previous)
            }
            None => previous,
        };

        let next_checkpoint = assignment.map(|last_assignment| RotationCheckpoint {
            anchor: self.anchor,
            roster,
            last_assignment,
            pointer: state.pointer(),
        });

        Ok((
            RotationOutcome {
                assignment,
                pointer: state.pointer(),
                business_day_index,
            },
            next_checkpoint,
        ))
    }

    /// Assignments for `count` business days starting at the first business
    /// day on or after `from`, continuing the replay from the anchor
    pub fn forecast(
        &self,
        members: &[Member],
        from: NaiveDate,
        count: usize,
    ) -> Result<Vec<DayAssignment>, QueueError> {
        business_days(self.anchor, from)?;
        if members.is_empty() || count == 0 {
            return Ok(Vec::new());
        }

        let mut state = RotationState::new();
        if let Some(day_before) = from.pred_opt() {
            Self::walk(&mut state, members, BusinessDays::new(self.anchor, day_before), None);
        }

        let mut assignments = Vec::with_capacity(count);
        let mut date = next_business_day_on_or_after(from);
        while let Some(day) = date {
            if assignments.len() == count {
                break;
            }
            if let Some(assignment) = state.step(members, day) {
                assignments.push(assignment);
            }
            date = day.succ_opt().and_then(next_business_day_on_or_after);
        }

        Ok(assignments)
    }

    fn walk(
        state: &mut RotationState,
        members: &[Member],
        days: BusinessDays,
        initial: Option<DayAssignment>,
    ) -> Option<DayAssignment> {
        days.fold(initial, |last, date| state.step(members, date).or(last))
    }
}
