use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

pub const INTERNAL_MESSAGE: &str = "Something went wrong, Contact with system admin";

#[derive(Debug, Display)]
pub enum LeaveError {
    #[display(fmt = "From Date cannot be after To Date")]
    DateOrder,

    #[display(fmt = "Employee not found: {}", _0)]
    UnknownEmployee(String),

    #[display(fmt = "Duplicate employee in balance store: {}", _0)]
    DuplicateEmployee(String),

    #[display(fmt = "Invalid {} value {:?} for employee {}", column, value, name)]
    InvalidCounter {
        name: String,
        column: String,
        value: String,
    },

    #[display(fmt = "CSV error: {}", _0)]
    Csv(csv::Error),

    #[display(fmt = "I/O error: {}", _0)]
    Io(std::io::Error),

    #[display(fmt = "Submit lock poisoned")]
    LockPoisoned,

    #[display(fmt = "Blocking task failed: {}", _0)]
    Blocking(String),
}

impl std::error::Error for LeaveError {}

impl From<csv::Error> for LeaveError {
    fn from(e: csv::Error) -> Self {
        LeaveError::Csv(e)
    }
}

impl From<std::io::Error> for LeaveError {
    fn from(e: std::io::Error) -> Self {
        LeaveError::Io(e)
    }
}

impl From<actix_web::error::BlockingError> for LeaveError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        LeaveError::Blocking(e.to_string())
    }
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::DateOrder => StatusCode::BAD_REQUEST,
            LeaveError::UnknownEmployee(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "Leave store failure");
                INTERNAL_MESSAGE.to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
