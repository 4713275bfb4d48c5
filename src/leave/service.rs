use crate::error::LeaveError;
use crate::leave::calculator::count_leave_days;
use crate::model::employee::{LeaveBalance, LeaveType, normalize_name};
use crate::model::leave_request::{
    HistoryEntry, HistoryRecord, LeaveApplication, LeaveStatus,
};
use crate::store::{BalanceStore, HistoryLog};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

/// Entries shown in an employee's history panel.
pub const HISTORY_LIMIT: usize = 10;

pub const APPROVED_MESSAGE: &str = "Leave request submitted and approved.";
pub const INSUFFICIENT_MESSAGE: &str = "Insufficient Leave Balance";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaveOutcome {
    pub status: LeaveStatus,
    #[schema(example = "Leave request submitted and approved.")]
    pub message: String,
    pub leave_type: LeaveType,
    #[schema(example = 5)]
    pub leave_days: i64,
    #[schema(example = 5)]
    pub opening_balance: i64,
    #[schema(example = 0)]
    pub closing_balance: i64,
    /// balance after the request was handled
    pub balance: LeaveBalance,
    pub record: HistoryRecord,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BalanceView {
    #[schema(example = "asha rao")]
    pub name: String,
    pub balance: LeaveBalance,
    /// categories the form offers: those with a positive balance
    pub available_leave_types: Vec<LeaveType>,
    #[schema(example = "lead@company.com")]
    pub manager_email: String,
}

/// Everything the dashboard shows for one employee, read fresh from the stores.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardView {
    #[serde(flatten)]
    pub employee: BalanceView,
    pub history: Vec<HistoryEntry>,
}

/// Handles one submission end to end.
///
/// Balance is saved before the history row is appended; a failure between
/// the two leaves the deduction without its record.
pub fn submit_leave(
    balances: &BalanceStore,
    history: &HistoryLog,
    application: &LeaveApplication,
    applied_on: NaiveDateTime,
) -> Result<LeaveOutcome, LeaveError> {
    if application.from_date > application.to_date {
        warn!(
            name = %application.name,
            from = %application.from_date,
            to = %application.to_date,
            "Rejected leave request with reversed dates"
        );
        return Err(LeaveError::DateOrder);
    }

    let mut table = balances.load()?;
    let employee = table
        .find_mut(&application.name)
        .ok_or_else(|| LeaveError::UnknownEmployee(normalize_name(&application.name)))?;

    let leave_type = application.leave_type;
    let leave_days = count_leave_days(application.from_date, application.to_date);
    let opening_balance = employee.balance.get(leave_type);
    let closing_balance = opening_balance - leave_days;

    let name = employee.name.clone();
    let manager_email = employee.manager_email.clone();

    let (status, message) = if closing_balance < 0 {
        (LeaveStatus::Rejected, INSUFFICIENT_MESSAGE)
    } else {
        employee.balance.set(leave_type, closing_balance);
        (LeaveStatus::Approved, APPROVED_MESSAGE)
    };
    let balance = employee.balance.clone();

    if status == LeaveStatus::Approved {
        balances.save(&table)?;
    }

    let record = HistoryRecord::new(
        &name,
        leave_type,
        application.from_date,
        application.to_date,
        &application.reason,
        status,
        &manager_email,
        applied_on,
    );
    history.append(record.clone())?;

    info!(
        name = %name,
        leave_type = %leave_type,
        leave_days,
        opening_balance,
        closing_balance,
        status = %status,
        "Leave request handled"
    );

    Ok(LeaveOutcome {
        status,
        message: message.to_string(),
        leave_type,
        leave_days,
        opening_balance,
        closing_balance,
        balance,
        record,
    })
}

/// The employee's latest `limit` records, newest `applied_on` first.
/// Records sharing a timestamp keep later-appended first.
pub fn recent_history(records: &[HistoryRecord], name: &str, limit: usize) -> Vec<HistoryEntry> {
    let key = normalize_name(name);
    let mut matching: Vec<(usize, &HistoryRecord)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.name == key)
        .collect();

    matching.sort_by(|(ia, a), (ib, b)| b.applied_on.cmp(&a.applied_on).then(ib.cmp(ia)));

    matching
        .into_iter()
        .take(limit)
        .map(|(_, r)| HistoryEntry::from(r))
        .collect()
}

pub fn balance_view(balances: &BalanceStore, name: &str) -> Result<BalanceView, LeaveError> {
    let table = balances.load()?;
    let employee = table
        .find(name)
        .ok_or_else(|| LeaveError::UnknownEmployee(normalize_name(name)))?;

    Ok(BalanceView {
        name: employee.name.clone(),
        available_leave_types: employee.balance.available_types(),
        balance: employee.balance.clone(),
        manager_email: employee.manager_email.clone(),
    })
}

pub fn employee_history(
    balances: &BalanceStore,
    history: &HistoryLog,
    name: &str,
) -> Result<Vec<HistoryEntry>, LeaveError> {
    let employee = balance_view(balances, name)?;
    Ok(recent_history(&history.load()?, &employee.name, HISTORY_LIMIT))
}

pub fn dashboard(
    balances: &BalanceStore,
    history: &HistoryLog,
    name: &str,
) -> Result<DashboardView, LeaveError> {
    let employee = balance_view(balances, name)?;
    let history = recent_history(&history.load()?, &employee.name, HISTORY_LIMIT);

    Ok(DashboardView { employee, history })
}
