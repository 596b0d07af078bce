//! Keyed stores, one per entity. Each supports the lookups the workflows
//! need; no cross-entity transactions are assumed.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ServiceError;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::LeaveRequest;
use crate::model::role::Role;

pub mod memory;
pub mod mysql;

/// Roster of employees, keyed by mail address.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert-or-replace by mail.
    async fn save(&self, employee: Employee) -> Result<(), ServiceError>;
    async fn find_by_mail(&self, mail: &str) -> Result<Option<Employee>, ServiceError>;
    async fn find_by_role(&self, role: Role) -> Result<Vec<Employee>, ServiceError>;
    async fn list(&self) -> Result<Vec<Employee>, ServiceError>;
    /// Returns false when no employee with that mail existed.
    async fn delete_by_mail(&self, mail: &str) -> Result<bool, ServiceError>;
}

/// Per-employee remaining-day counters.
#[async_trait]
pub trait LeaveBalanceStore: Send + Sync {
    /// Insert-or-replace by employee mail.
    async fn save(&self, balance: LeaveBalance) -> Result<(), ServiceError>;
    async fn find_by_employee(&self, mail: &str) -> Result<Option<LeaveBalance>, ServiceError>;
    async fn delete_by_employee(&self, mail: &str) -> Result<(), ServiceError>;
}

/// Submitted leave requests and their decision state.
#[async_trait]
pub trait LeaveRequestLedger: Send + Sync {
    /// Insert-or-replace by request id.
    async fn save(&self, request: LeaveRequest) -> Result<(), ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<LeaveRequest>, ServiceError>;
    async fn find_by_employee(&self, mail: &str) -> Result<Vec<LeaveRequest>, ServiceError>;
    async fn list(&self) -> Result<Vec<LeaveRequest>, ServiceError>;
}

/// Daily attendance rows. Uniqueness per (employee, date) is the generator's
/// job via lookup-before-insert, not the store's.
#[async_trait]
pub trait AttendanceLedger: Send + Sync {
    /// Insert-or-replace by record id.
    async fn save(&self, record: AttendanceRecord) -> Result<(), ServiceError>;
    async fn find_by_employee_and_date(
        &self,
        mail: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ServiceError>;
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ServiceError>;
    async fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ServiceError>;
    async fn find_by_employee_and_date_between(
        &self,
        mail: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ServiceError>;
}
