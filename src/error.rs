use std::fmt;

use actix_web::{HttpResponse, http::StatusCode};
use chrono::NaiveDate;

use crate::model::leave_request::{LeaveStatus, LeaveType};

/// Domain error taxonomy. Validation problems map to 400, lookups to 404,
/// state and business-rule conflicts to 409. Store failures are a separate
/// infrastructure variant that never leaks its detail to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    InvalidRange,
    MissingField(&'static str),
    InvalidDate(String),
    InvalidLeaveType(String),
    InsufficientBalance {
        leave_type: LeaveType,
        available: i32,
        requested: i64,
    },
    BalanceNotFound(String),
    EmployeeNotFound(String),
    RequestNotFound(String),
    RecordNotFound {
        employee_mail: String,
        date: NaiveDate,
    },
    AlreadyDecided {
        reviewed_by: String,
        status: LeaveStatus,
    },
    Store(String),
}

impl std::error::Error for ServiceError {}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidRange => write!(f, "start_date cannot be after end_date"),
            ServiceError::MissingField(field) => write!(f, "Field '{}' must be filled", field),
            ServiceError::InvalidDate(raw) => {
                write!(f, "Invalid date '{}' (expected YYYY-MM-DD)", raw)
            }
            ServiceError::InvalidLeaveType(raw) => write!(
                f,
                "Invalid leave type '{}'. Allowed: annual, sick, personal, emergency",
                raw
            ),
            ServiceError::InsufficientBalance {
                leave_type,
                available,
                requested,
            } => write!(
                f,
                "Insufficient {} leave: {} day(s) available, {} requested",
                leave_type.to_string().to_lowercase(),
                available,
                requested
            ),
            ServiceError::BalanceNotFound(mail) => {
                write!(f, "Leave balance not found for {}", mail)
            }
            ServiceError::EmployeeNotFound(mail) => {
                write!(f, "Employee not found or invalid role: {}", mail)
            }
            ServiceError::RequestNotFound(id) => write!(f, "Leave request {} not found", id),
            ServiceError::RecordNotFound {
                employee_mail,
                date,
            } => write!(
                f,
                "No attendance record for {} on {}",
                employee_mail, date
            ),
            ServiceError::AlreadyDecided {
                reviewed_by,
                status,
            } => write!(f, "Already {} by {}", status, reviewed_by),
            ServiceError::Store(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidRange
            | ServiceError::MissingField(_)
            | ServiceError::InvalidDate(_)
            | ServiceError::InvalidLeaveType(_) => StatusCode::BAD_REQUEST,
            ServiceError::BalanceNotFound(_)
            | ServiceError::EmployeeNotFound(_)
            | ServiceError::RequestNotFound(_)
            | ServiceError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::InsufficientBalance { .. } | ServiceError::AlreadyDecided { .. } => {
                StatusCode::CONFLICT
            }
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Store detail stays in the logs.
            ServiceError::Store(msg) => {
                tracing::error!(error = %msg, "store failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "message": message }))
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;

    #[test]
    fn taxonomy_maps_to_status_classes() {
        assert_eq!(ServiceError::InvalidRange.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServiceError::InvalidDate("junk".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::BalanceNotFound("a@co".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::AlreadyDecided {
                reviewed_by: "hr@co".into(),
                status: LeaveStatus::Approved,
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::Store("db down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn already_decided_names_the_original_reviewer() {
        let err = ServiceError::AlreadyDecided {
            reviewed_by: "hr@co".into(),
            status: LeaveStatus::Rejected,
        };
        assert_eq!(err.to_string(), "Already Rejected by hr@co");
    }
}
