use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_request::LeaveType;

/// Remaining leave days per category for one employee.
///
/// Counters are signed: the reference behavior allows an approval that raced
/// with another decision, or an unvalidated HR override, to push a counter
/// below zero.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_mail": "john.doe@company.com",
        "annual_leave": 15,
        "sick_leave": 8,
        "personal_leave": 3,
        "emergency_leave": 2
    })
)]
pub struct LeaveBalance {
    #[schema(example = "john.doe@company.com")]
    pub employee_mail: String,
    #[schema(example = 15)]
    pub annual_leave: i32,
    #[schema(example = 8)]
    pub sick_leave: i32,
    #[schema(example = 3)]
    pub personal_leave: i32,
    #[schema(example = 2)]
    pub emergency_leave: i32,
}

impl LeaveBalance {
    /// Onboarding defaults: every new hire starts the year with the same
    /// entitlement.
    pub fn new_hire(employee_mail: impl Into<String>) -> Self {
        Self {
            employee_mail: employee_mail.into(),
            annual_leave: 15,
            sick_leave: 8,
            personal_leave: 3,
            emergency_leave: 2,
        }
    }

    pub fn counter(&self, leave_type: LeaveType) -> i32 {
        match leave_type {
            LeaveType::Annual => self.annual_leave,
            LeaveType::Sick => self.sick_leave,
            LeaveType::Personal => self.personal_leave,
            LeaveType::Emergency => self.emergency_leave,
        }
    }

    pub fn counter_mut(&mut self, leave_type: LeaveType) -> &mut i32 {
        match leave_type {
            LeaveType::Annual => &mut self.annual_leave,
            LeaveType::Sick => &mut self.sick_leave,
            LeaveType::Personal => &mut self.personal_leave,
            LeaveType::Emergency => &mut self.emergency_leave,
        }
    }
}
