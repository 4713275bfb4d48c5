use crate::config::Config;
use crate::error::LeaveError;
use crate::leave::service::{self, LeaveOutcome};
use crate::model::leave_request::LeaveApplication;
use crate::store::{BalanceStore, HistoryLog};
use chrono::NaiveDateTime;
use std::sync::Mutex;

/// Shared handles to the two stores.
pub struct AppState {
    pub balances: BalanceStore,
    pub history: HistoryLog,
    /// held across load -> save -> append so one process never loses its own updates
    submit_lock: Mutex<()>,
}

impl AppState {
    pub fn new(balances: BalanceStore, history: HistoryLog) -> Self {
        Self {
            balances,
            history,
            submit_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            BalanceStore::new(&config.balance_csv),
            HistoryLog::new(&config.history_csv),
        )
    }

    pub fn submit(
        &self,
        application: &LeaveApplication,
        applied_on: NaiveDateTime,
    ) -> Result<LeaveOutcome, LeaveError> {
        let _guard = self
            .submit_lock
            .lock()
            .map_err(|_| LeaveError::LockPoisoned)?;

        service::submit_leave(&self.balances, &self.history, application, applied_on)
    }
}
