use std::sync::Arc;

use tracker_client::{StoreError, StudentStore};
use tracker_core::{
    DisplayRecord, FilterCriteria, RosterViewModel, SortField, SortState, StudentRecord,
};
use tracker_events::Notifier;

use super::{MSG_CONFIRM_DELETE, MSG_DELETED, MSG_LOAD_FAILED, MSG_OPERATION_FAILED};
use crate::error::{AppError, AppResult};

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Identifies one roster load. Only the most recent ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// The student list: roster, filters, sort state, and load status.
pub struct ListPage<S> {
    store: Arc<S>,
    notifier: Arc<dyn Notifier>,
    roster: RosterViewModel,
    criteria: FilterCriteria,
    sort: SortState,
    loading: bool,
    error: Option<String>,
    latest_ticket: u64,
}

impl<S: StudentStore> ListPage<S> {
    pub fn new(store: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            roster: RosterViewModel::new(),
            criteria: FilterCriteria::default(),
            sort: SortState::default(),
            loading: false,
            error: None,
            latest_ticket: 0,
        }
    }

    // ---- loading ----

    /// Fetch the roster and apply the current filters.
    pub async fn load(&mut self) -> AppResult<()> {
        let ticket = self.begin_load();
        let result = self.store.list().await;
        self.finish_load(ticket, result)
    }

    /// Mark a load as started and hand out its ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.latest_ticket)
    }

    /// Apply the outcome of a load.
    ///
    /// Results for a superseded ticket are discarded and leave the page
    /// untouched.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<StudentRecord>, StoreError>,
    ) -> AppResult<()> {
        if ticket.0 != self.latest_ticket {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Discarding stale roster load"
            );
            return Ok(());
        }
        self.loading = false;
        match result {
            Ok(records) => {
                tracing::info!(count = records.len(), "Roster loaded");
                self.roster.set_roster(records);
                self.roster.refresh(&self.criteria, &self.sort);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load roster");
                self.error = Some(MSG_LOAD_FAILED.to_string());
                self.notifier.notify_error(MSG_OPERATION_FAILED);
                Err(AppError::FetchFailure(e))
            }
        }
    }

    // ---- filters and sorting ----

    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.roster.refresh(&self.criteria, &self.sort);
    }

    /// Sort by `field`, flipping the direction when it is already active.
    pub fn sort(&mut self, field: SortField) {
        self.sort.toggle(field);
        self.roster.refresh(&self.criteria, &self.sort);
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.roster.refresh(&self.criteria, &self.sort);
    }

    // ---- deletion ----

    /// Delete a student after confirmation.
    ///
    /// Returns `Ok(false)` when the user declined; no request is made then.
    /// The row is removed locally only once the store reports success.
    pub async fn delete(&mut self, id: &str, confirm: &impl Confirm) -> AppResult<bool> {
        if !confirm.confirm(MSG_CONFIRM_DELETE) {
            return Ok(false);
        }
        match self.store.delete(id).await {
            Ok(()) => {
                self.roster.remove_by_id(id);
                self.notifier.notify_success(MSG_DELETED);
                Ok(true)
            }
            Err(e) => {
                tracing::error!(student_id = %id, error = %e, "Failed to delete student");
                self.notifier.notify_error(MSG_OPERATION_FAILED);
                Err(AppError::mutation(e))
            }
        }
    }

    // ---- view state ----

    pub fn rows(&self) -> &[DisplayRecord] {
        self.roster.projection()
    }

    pub fn roster(&self) -> &RosterViewModel {
        &self.roster
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
