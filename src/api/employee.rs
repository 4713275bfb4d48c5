use crate::{
    error::LeaveError,
    leave::service,
    model::{employee::normalize_name, leave_request::HistoryEntry},
    state::AppState,
};
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    #[schema(example = json!(["asha rao", "ravi"]))]
    pub data: Vec<String>,
    #[schema(example = 2)]
    pub total: usize,
}

#[derive(Serialize, ToSchema)]
pub struct HistoryResponse {
    #[schema(example = "asha rao")]
    pub name: String,
    pub data: Vec<HistoryEntry>,
}

/// List employee names for the selector
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Normalized employee names", body = EmployeeListResponse),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let names = web::block(move || state.balances.load().map(|table| table.names()))
        .await
        .map_err(LeaveError::from)??;

    debug!(total = names.len(), "Listed employees");

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: names.len(),
        data: names,
    }))
}

/// Dashboard view: balance, offered leave types and recent history
#[utoipa::path(
    get,
    path = "/api/employees/{name}",
    params(
        ("name" = String, Path, description = "Employee name (case and surrounding spaces ignored)")
    ),
    responses(
        (status = 200, description = "Dashboard for the employee", body = crate::leave::service::DashboardView),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found: zoe"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_dashboard(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let name = path.into_inner();

    let view = web::block(move || service::dashboard(&state.balances, &state.history, &name))
        .await
        .map_err(LeaveError::from)??;

    Ok(HttpResponse::Ok().json(view))
}

/// Current leave balance of an employee
#[utoipa::path(
    get,
    path = "/api/employees/{name}/balance",
    params(
        ("name" = String, Path, description = "Employee name (case and surrounding spaces ignored)")
    ),
    responses(
        (status = 200, description = "Balance and offered leave types", body = crate::leave::service::BalanceView),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_balance(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let name = path.into_inner();

    let view = web::block(move || service::balance_view(&state.balances, &name))
        .await
        .map_err(LeaveError::from)??;

    Ok(HttpResponse::Ok().json(view))
}

/// Last 10 leave requests of an employee, newest first
#[utoipa::path(
    get,
    path = "/api/employees/{name}/history",
    params(
        ("name" = String, Path, description = "Employee name (case and surrounding spaces ignored)")
    ),
    responses(
        (status = 200, description = "Recent history", body = HistoryResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let name = normalize_name(&path.into_inner());
    let key = name.clone();

    let data = web::block(move || service::employee_history(&state.balances, &state.history, &key))
        .await
        .map_err(LeaveError::from)??;

    Ok(HttpResponse::Ok().json(HistoryResponse { name, data }))
}
