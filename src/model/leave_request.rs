use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::employee::LeaveType;

pub const DATE_FORMAT: &str = "%d-%m-%Y";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column order of the history log.
pub const HISTORY_COLUMNS: [&str; 8] = [
    "name",
    "leave_type",
    "from_date",
    "to_date",
    "reason",
    "status",
    "manager_email",
    "applied_on",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString)]
pub enum LeaveStatus {
    Approved,
    Rejected,
}

/// A row of the history log.
///
/// Fields stay textual so a log written by hand (or by an older tool) with
/// missing columns still loads; absent cells come back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct HistoryRecord {
    pub name: String,
    pub leave_type: String,
    pub from_date: String,
    pub to_date: String,
    pub reason: String,
    pub status: String,
    pub manager_email: String,
    pub applied_on: String,
}

impl HistoryRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        leave_type: LeaveType,
        from_date: NaiveDate,
        to_date: NaiveDate,
        reason: &str,
        status: LeaveStatus,
        manager_email: &str,
        applied_on: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.to_string(),
            leave_type: leave_type.to_string(),
            from_date: from_date.format(DATE_FORMAT).to_string(),
            to_date: to_date.format(DATE_FORMAT).to_string(),
            reason: reason.to_string(),
            status: status.to_string(),
            manager_email: manager_email.to_string(),
            applied_on: applied_on.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Submit payload for a leave request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LeaveApplication {
    #[schema(example = "asha rao")]
    pub name: String,
    #[schema(example = "CL")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub from_date: NaiveDate,
    #[schema(example = "2026-01-09", format = "date", value_type = String)]
    pub to_date: NaiveDate,
    #[serde(default)]
    #[schema(example = "family function")]
    pub reason: String,
}

/// History row as shown to the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "leave_type": "CL",
    "from_date": "05-01-2026",
    "to_date": "09-01-2026",
    "reason": "family function",
    "status": "Approved",
    "applied_on": "2026-01-02 10:15:00"
}))]
pub struct HistoryEntry {
    pub leave_type: String,
    pub from_date: String,
    pub to_date: String,
    pub reason: String,
    pub status: String,
    pub applied_on: String,
}

impl From<&HistoryRecord> for HistoryEntry {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            leave_type: record.leave_type.clone(),
            from_date: record.from_date.clone(),
            to_date: record.to_date.clone(),
            reason: record.reason.clone(),
            status: record.status.clone(),
            applied_on: record.applied_on.clone(),
        }
    }
}
