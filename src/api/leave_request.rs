use crate::{
    error::LeaveError,
    model::leave_request::LeaveApplication,
    state::AppState,
};
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;

/* =========================
Submit leave request
========================= */
/// Submit a leave request; approved or rejected immediately against the balance
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = LeaveApplication,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Request handled; `status` is Approved or Rejected", body = crate::leave::service::LeaveOutcome),
        (status = 400, description = "From date after to date", body = Object, example = json!({
            "message": "From Date cannot be after To Date"
        })),
        (status = 404, description = "Employee not found"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    state: web::Data<AppState>,
    payload: web::Json<LeaveApplication>,
) -> actix_web::Result<impl Responder> {
    let application = payload.into_inner();
    let applied_on = Local::now().naive_local();

    let outcome = web::block(move || state.submit(&application, applied_on))
        .await
        .map_err(LeaveError::from)??;

    Ok(HttpResponse::Ok().json(outcome))
}
