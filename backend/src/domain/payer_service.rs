use chrono::{Local, NaiveDate};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::domain::commands::payer::{PayerAssignment, QueueOverview, UpcomingPayersQuery};
use crate::domain::errors::QueueError;
use crate::domain::models::Member;
use crate::domain::rotation::{DayAssignment, RotationCheckpoint, RotationScheduler};
use crate::storage::MemberStorage;

/// Upper bound on how many business days `upcoming` will forecast
pub const MAX_FORECAST_DAYS: usize = 60;

/// Service that works out who pays on a given day
#[derive(Clone)]
pub struct PayerService {
    store: Arc<dyn MemberStorage>,
    scheduler: RotationScheduler,
    /// Last replay, kept in memory only and never persisted
    checkpoint: Arc<Mutex<Option<RotationCheckpoint>>>,
}

impl PayerService {
    /// Create a new PayerService replaying from `anchor`
    pub fn new(store: Arc<dyn MemberStorage>, anchor: NaiveDate) -> Self {
        Self {
            store,
            scheduler: RotationScheduler::new(anchor),
            checkpoint: Arc::new(Mutex::new(None)),
        }
    }

    /// Queue overview for today's local date
    pub async fn current_overview(&self) -> Result<QueueOverview, QueueError> {
        self.queue_overview(Local::now().date_naive()).await
    }

    /// Queue overview for `date`: the member list plus who pays that day
    pub async fn queue_overview(&self, date: NaiveDate) -> Result<QueueOverview, QueueError> {
        info!("Computing payer for {}", date);

        let members = self.load_members().await?;

        let previous = self.checkpoint_snapshot();
        let (outcome, next) = self
            .scheduler
            .replay_from(previous.as_ref(), &members, date)?;
        if let Some(checkpoint) = next {
            self.store_checkpoint(checkpoint);
        }

        let assignment = outcome
            .assignment
            .map(|day| Self::to_payer_assignment(&day, &members));

        match &assignment {
            Some(a) => info!(
                "Payer on {} is {} (pointer {})",
                a.date, a.payer.name, outcome.pointer
            ),
            None => info!("No payer for {}: queue is empty or no business day in range", date),
        }

        Ok(QueueOverview {
            date,
            assignment,
            pointer: outcome.pointer,
            members,
        })
    }

    /// Payer for today's local date, if any
    pub async fn current_payer(&self) -> Result<Option<Member>, QueueError> {
        self.payer_on(Local::now().date_naive()).await
    }

    /// Payer of `date`, if any
    pub async fn payer_on(&self, date: NaiveDate) -> Result<Option<Member>, QueueError> {
        let overview = self.queue_overview(date).await?;
        Ok(overview.assignment.map(|a| a.payer))
    }

    /// Payers for the next business days starting at `query.from`
    pub async fn upcoming(
        &self,
        query: UpcomingPayersQuery,
    ) -> Result<Vec<PayerAssignment>, QueueError> {
        let days = if query.days > MAX_FORECAST_DAYS {
            warn!("Requested {} forecast days, capping at {}", query.days, MAX_FORECAST_DAYS);
            MAX_FORECAST_DAYS
        } else {
            query.days
        };

        let members = self.load_members().await?;
        let forecast = self.scheduler.forecast(&members, query.from, days)?;

        info!("Forecast {} payer days from {}", forecast.len(), query.from);
        Ok(forecast
            .iter()
            .map(|day| Self::to_payer_assignment(day, &members))
            .collect())
    }

    async fn load_members(&self) -> Result<Vec<Member>, QueueError> {
        self.store
            .list_members()
            .await
            .map_err(QueueError::from_store)
    }

    fn to_payer_assignment(day: &DayAssignment, members: &[Member]) -> PayerAssignment {
        PayerAssignment {
            date: day.date,
            weekday: day.weekday,
            payer: day.payer(members).clone(),
            exempted: day.exempted_member(members).cloned(),
        }
    }

    fn checkpoint_snapshot(&self) -> Option<RotationCheckpoint> {
        match self.checkpoint.lock() {
            Ok(guard) => guard.clone(),
            // A poisoned checkpoint is just a cache miss
            Err(_) => None,
        }
    }

    fn store_checkpoint(&self, checkpoint: RotationCheckpoint) {
        match self.checkpoint.lock() {
            Ok(mut guard) => *guard = Some(checkpoint),
            Err(poisoned) => *poisoned.into_inner() = Some(checkpoint),
        }
    }
}
