use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Emergency,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// HR's terminal ruling on a pending request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Display, EnumString, ToSchema)]
#[strum(ascii_case_insensitive)]
pub enum LeaveDecision {
    Approved,
    Rejected,
}

impl From<LeaveDecision> for LeaveStatus {
    fn from(decision: LeaveDecision) -> Self {
        match decision {
            LeaveDecision::Approved => LeaveStatus::Approved,
            LeaveDecision::Rejected => LeaveStatus::Rejected,
        }
    }
}

/// Inclusive day span of a leave request. Both endpoints count, so a
/// single-day request spans one day.
pub fn inclusive_days(start_date: NaiveDate, end_date: NaiveDate) -> i64 {
    end_date.signed_duration_since(start_date).num_days() + 1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "5e9f8f8b-6a3e-4f1e-9f1a-1c2d3e4f5a6b",
        "employee_mail": "john.doe@company.com",
        "leave_type": "Sick",
        "start_date": "2025-06-10",
        "end_date": "2025-06-12",
        "total_days": 3,
        "reason": "Flu",
        "work_handover_details": "Jane covers standup",
        "status": "Pending",
        "reviewed_by": null,
        "decision_reason": "",
        "decision_date": null
    })
)]
pub struct LeaveRequest {
    pub id: String,
    #[schema(example = "john.doe@company.com")]
    pub employee_mail: String,
    pub leave_type: LeaveType,
    #[schema(example = "2025-06-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-06-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 3)]
    pub total_days: i32,
    #[schema(example = "Flu")]
    pub reason: String,
    #[schema(example = "Jane covers standup")]
    pub work_handover_details: String,
    pub status: LeaveStatus,
    /// Set once when the request leaves Pending, never changes afterwards.
    #[schema(nullable = true)]
    pub reviewed_by: Option<String>,
    /// Empty string when HR decided without giving a reason.
    #[schema(example = "")]
    pub decision_reason: String,
    #[schema(format = "date", value_type = Option<String>, nullable = true)]
    pub decision_date: Option<NaiveDate>,
}
