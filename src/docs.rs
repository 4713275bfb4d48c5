use crate::api::employee::{EmployeeListResponse, HistoryResponse};
use crate::leave::service::{BalanceView, DashboardView, LeaveOutcome};
use crate::model::employee::{LeaveBalance, LeaveType};
use crate::model::leave_request::{HistoryEntry, HistoryRecord, LeaveApplication, LeaveStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Desk API",
        version = "0.1.0",
        description = r#"
## Leave Desk

Self-service leave dashboard backed by two CSV files: a per-employee balance
table and an append-only request history.

### 🔹 Flow
- Pick an employee and read their **CL / SL / EL** balance
- Submit a leave request for a date range (Sundays are not charged)
- The request is **approved** when the balance covers it, otherwise **rejected**
- Every request that passes date validation is written to the history log

### 📦 Response Format
- JSON bodies; errors carry a `message` field
- History lists show the latest 10 entries, newest first

---
Built with **Rust**, **Actix Web**, **csv** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::get_dashboard,
        crate::api::employee::get_balance,
        crate::api::employee::get_history,

        crate::api::leave_request::submit_leave
    ),
    components(
        schemas(
            LeaveType,
            LeaveStatus,
            LeaveBalance,
            LeaveApplication,
            LeaveOutcome,
            HistoryRecord,
            HistoryEntry,
            BalanceView,
            DashboardView,
            EmployeeListResponse,
            HistoryResponse
        )
    ),
    tags(
        (name = "Leave", description = "Leave request submission"),
        (name = "Employee", description = "Balances and history"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/employees",
            "/api/employees/{name}",
            "/api/employees/{name}/balance",
            "/api/employees/{name}/history",
            "/api/leave",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }

    #[test]
    fn documented_response_bodies_are_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;

        for name in ["LeaveOutcome", "DashboardView", "BalanceView", "HistoryResponse"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
