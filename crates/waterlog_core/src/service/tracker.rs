//! Daily intake tracker state.
//!
//! # Responsibility
//! - Hold today's records (most-recent-first) and the daily goal.
//! - Persist after every state-changing call and notify subscribers.
//! - Compute derived metrics (`total_intake`, `progress`) on demand.
//!
//! # Invariants
//! - Invalid operations are rejected before any state change.
//! - The in-memory log is the source of truth; a failed write is logged and
//!   kept in `last_write_failure`, never retried and never rolled back.
//! - Subscribers are notified synchronously after each successful mutation.

use crate::clock::{Clock, SystemClock};
use crate::config::DEFAULT_GOAL_ML;
use crate::model::record::{IntakeRecord, RecordId, RecordValidationError};
use crate::policy::daily_reset::should_reset;
use crate::store::intake_store::{IntakeStore, GOAL_KEY, RECORDS_KEY};
use crate::store::{KeyValueStore, StoreError};
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Caller errors rejected before touching state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidOperation {
    /// The record to add violates record invariants (e.g. non-positive amount).
    InvalidRecord(RecordValidationError),
    /// Goal must be a finite number.
    NonFiniteGoal(f64),
    /// Delete referenced a position outside the current log.
    PositionOutOfRange { position: usize, len: usize },
}

impl Display for InvalidOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRecord(err) => write!(f, "{err}"),
            Self::NonFiniteGoal(goal) => write!(f, "goal must be a finite number, got {goal}"),
            Self::PositionOutOfRange { position, len } => {
                write!(f, "record position {position} is out of range for {len} records")
            }
        }
    }
}

/// Tracker error taxonomy.
#[derive(Debug)]
pub enum TrackerError {
    InvalidOperation(InvalidOperation),
    /// Encode/write failed; the in-memory change was kept.
    PersistenceWriteFailure(StoreError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOperation(err) => write!(f, "invalid operation: {err}"),
            Self::PersistenceWriteFailure(err) => write!(f, "persistence write failed: {err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidOperation(_) => None,
            Self::PersistenceWriteFailure(err) => Some(err),
        }
    }
}

impl From<InvalidOperation> for TrackerError {
    fn from(value: InvalidOperation) -> Self {
        Self::InvalidOperation(value)
    }
}

impl From<RecordValidationError> for TrackerError {
    fn from(value: RecordValidationError) -> Self {
        Self::InvalidOperation(InvalidOperation::InvalidRecord(value))
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerEvent {
    GoalChanged { goal: f64 },
    RecordsChanged { count: usize, total_intake: f64 },
}

/// Handle returned by [`TrackerState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TrackerEvent)>;

/// Snapshot of derived metrics for progress displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSummary {
    /// Sum of today's amounts in ml.
    pub total_intake: f64,
    pub goal: f64,
    /// Ratio in `[0, 1]`.
    pub progress: f64,
    /// `progress * 100`, rounded to the nearest whole percent.
    pub percent: u32,
    /// Amount still missing to reach the goal, never negative.
    pub remaining: f64,
}

/// Persistence-backed state for today's intake log.
pub struct TrackerState<S: KeyValueStore, C: Clock = SystemClock> {
    store: IntakeStore<S>,
    clock: C,
    goal: f64,
    records: Vec<IntakeRecord>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_write_failure: Option<TrackerError>,
}

impl<S: KeyValueStore> TrackerState<S, SystemClock> {
    /// Loads persisted state with the host clock and default goal.
    pub fn load(kv: S) -> Self {
        Self::load_with(kv, SystemClock, DEFAULT_GOAL_ML)
    }
}

impl<S: KeyValueStore, C: Clock> TrackerState<S, C> {
    /// Loads persisted goal and records, then applies the daily reset.
    ///
    /// Unreadable persisted values fall back to `default_goal` / an empty log.
    pub fn load_with(kv: S, clock: C, default_goal: f64) -> Self {
        let store = IntakeStore::new(kv);
        let goal = store.load_goal().unwrap_or(default_goal);
        let records = store.load_records();

        let mut state = Self {
            store,
            clock,
            goal,
            records,
            listeners: Vec::new(),
            next_subscription: 0,
            last_write_failure: None,
        };
        info!(
            "event=tracker_init module=tracker status=ok goal={} records={}",
            state.goal,
            state.records.len()
        );
        state.check_daily_reset();
        state
    }

    pub fn goal(&self) -> f64 {
        self.goal
    }

    /// Today's records, most recent first.
    pub fn records(&self) -> &[IntakeRecord] {
        &self.records
    }

    /// Raw key-value store backing this tracker.
    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// Latest write failure, cleared by the next successful write.
    pub fn last_write_failure(&self) -> Option<&TrackerError> {
        self.last_write_failure.as_ref()
    }

    /// Sum of all amounts logged today, in ml.
    pub fn total_intake(&self) -> f64 {
        self.records.iter().map(IntakeRecord::amount).sum()
    }

    /// `min(total / goal, 1.0)`, or `0` when the goal is not positive.
    pub fn progress(&self) -> f64 {
        if self.goal <= 0.0 {
            return 0.0;
        }
        (self.total_intake() / self.goal).min(1.0)
    }

    pub fn remaining(&self) -> f64 {
        (self.goal - self.total_intake()).max(0.0)
    }

    pub fn summary(&self) -> ProgressSummary {
        let progress = self.progress();
        ProgressSummary {
            total_intake: self.total_intake(),
            goal: self.goal,
            progress,
            percent: (progress * 100.0).round() as u32,
            remaining: self.remaining(),
        }
    }

    /// Logs one drink of `amount` ml at the current instant.
    ///
    /// # Errors
    /// - `InvalidOperation` when `amount` is zero, negative or not finite.
    pub fn add_intake(&mut self, amount: f64) -> TrackerResult<RecordId> {
        let record = IntakeRecord::new(amount, self.clock.now()).map_err(|err| {
            warn!("event=intake_add module=tracker status=rejected error={err}");
            TrackerError::from(err)
        })?;
        let id = record.id();

        self.records.insert(0, record);
        info!(
            "event=intake_add module=tracker status=ok amount_ml={amount} count={}",
            self.records.len()
        );
        self.persist_records("intake_add");
        self.notify_records_changed();
        Ok(id)
    }

    /// Removes the records at `positions` of the current most-recent-first order.
    ///
    /// All positions are validated first; an out-of-range position rejects the
    /// whole call. Duplicates are ignored. Returns removed records in their
    /// previous order.
    pub fn delete_records(
        &mut self,
        positions: impl IntoIterator<Item = usize>,
    ) -> TrackerResult<Vec<IntakeRecord>> {
        let positions: BTreeSet<usize> = positions.into_iter().collect();
        if positions.is_empty() {
            return Ok(Vec::new());
        }

        let len = self.records.len();
        if let Some(&position) = positions.iter().find(|&&position| position >= len) {
            warn!(
                "event=records_delete module=tracker status=rejected position={position} len={len}"
            );
            return Err(InvalidOperation::PositionOutOfRange { position, len }.into());
        }

        let mut removed: Vec<IntakeRecord> = positions
            .iter()
            .rev()
            .map(|&position| self.records.remove(position))
            .collect();
        removed.reverse();

        info!(
            "event=records_delete module=tracker status=ok removed={} count={}",
            removed.len(),
            self.records.len()
        );
        self.persist_records("records_delete");
        self.notify_records_changed();
        Ok(removed)
    }

    /// Replaces the daily goal and persists it.
    ///
    /// No clamping is applied; zero or negative goals are stored and make
    /// `progress()` report `0`.
    ///
    /// # Errors
    /// - `InvalidOperation` when `goal` is NaN or infinite.
    pub fn set_goal(&mut self, goal: f64) -> TrackerResult<()> {
        if !goal.is_finite() {
            warn!("event=goal_set module=tracker status=rejected goal={goal}");
            return Err(InvalidOperation::NonFiniteGoal(goal).into());
        }

        self.goal = goal;
        info!("event=goal_set module=tracker status=ok goal={goal}");
        let result = self.store.save_goal(goal);
        self.record_write("goal_set", GOAL_KEY, result);
        self.notify(TrackerEvent::GoalChanged { goal });
        Ok(())
    }

    /// Empties today's log. Returns the number of removed records.
    pub fn clear_today(&mut self) -> usize {
        let cleared = self.clear_records();
        info!("event=records_clear module=tracker status=ok removed={cleared}");
        cleared
    }

    /// Clears the log when its most recent record is from a past local day.
    ///
    /// Called at construction and whenever the presentation becomes active.
    /// Returns whether a reset happened.
    pub fn check_daily_reset(&mut self) -> bool {
        if !should_reset(&self.records, self.clock.now()) {
            debug!(
                "event=daily_reset module=tracker status=skipped count={}",
                self.records.len()
            );
            return false;
        }

        let cleared = self.clear_records();
        info!("event=daily_reset module=tracker status=ok removed={cleared}");
        true
    }

    /// Registers a change listener.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&TrackerEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    fn clear_records(&mut self) -> usize {
        let cleared = self.records.len();
        self.records.clear();
        self.persist_records("records_clear");
        self.notify_records_changed();
        cleared
    }

    fn persist_records(&mut self, op: &'static str) {
        let result = self.store.save_records(&self.records);
        self.record_write(op, RECORDS_KEY, result);
    }

    fn record_write(
        &mut self,
        op: &'static str,
        key: &'static str,
        result: Result<(), StoreError>,
    ) {
        match result {
            Ok(()) => {
                debug!("event=store_write module=tracker status=ok op={op} key={key}");
                self.last_write_failure = None;
            }
            Err(err) => {
                error!(
                    "event=store_write module=tracker status=error op={op} key={key} retry=false error={err}"
                );
                self.last_write_failure = Some(TrackerError::PersistenceWriteFailure(err));
            }
        }
    }

    fn notify_records_changed(&mut self) {
        let event = TrackerEvent::RecordsChanged {
            count: self.records.len(),
            total_intake: self.total_intake(),
        };
        self.notify(event);
    }

    fn notify(&mut self, event: TrackerEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
