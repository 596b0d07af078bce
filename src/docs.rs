use utoipa::OpenApi;

use crate::api::attendance::MarkPresent;
use crate::api::employee::CreateEmployee;
use crate::api::leave::{CreateLeave, DecideLeave};
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::model::role::Role;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management API",
        version = "1.0.0",
        description = r#"
## Employee Management System

Manages employee identity, leave accounting and daily attendance for an
organization with three roles (Admin, HR, Employee).

### Key Features
- **Employee Onboarding**
  - HR creates employees; each new hire gets a default leave balance
- **Leave Management**
  - Employees submit requests, HR approves or rejects, balances are deducted on approval
- **Attendance Management**
  - Daily Absent rows generated at midnight, manual corrections and queries for HR

### Identity
Callers are authenticated upstream; requests carry `X-User-Mail` and
`X-User-Role` headers with a pre-validated identity.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::leave::create_leave,
        crate::api::leave::leave_list,
        crate::api::leave::my_requests,
        crate::api::leave::decide_leave,
        crate::api::leave::get_balance,
        crate::api::leave::update_balance,

        crate::api::attendance::generate,
        crate::api::attendance::mark_present,
        crate::api::attendance::update,
        crate::api::attendance::day,
        crate::api::attendance::range,
        crate::api::attendance::employee_range
    ),
    components(
        schemas(
            Employee,
            Role,
            LeaveBalance,
            LeaveRequest,
            LeaveType,
            LeaveStatus,
            AttendanceRecord,
            CreateEmployee,
            CreateLeave,
            DecideLeave,
            MarkPresent
        )
    ),
    tags(
        (name = "Employee", description = "Employee roster and onboarding APIs"),
        (name = "Leave", description = "Leave request and balance APIs"),
        (name = "Attendance", description = "Attendance generation and correction APIs"),
    )
)]
pub struct ApiDoc;
