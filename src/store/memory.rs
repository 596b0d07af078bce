//! In-process stores backed by `Arc<Mutex<Vec<_>>>`. Used when no
//! `DATABASE_URL` is configured, and by the test suite.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ServiceError;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::LeaveRequest;
use crate::model::role::Role;
use crate::store::{AttendanceLedger, EmployeeStore, LeaveBalanceStore, LeaveRequestLedger};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, ServiceError> {
    mutex
        .lock()
        .map_err(|_| ServiceError::Store("memory store mutex poisoned".into()))
}

#[derive(Clone, Default)]
pub struct MemoryEmployeeStore {
    rows: Arc<Mutex<Vec<Employee>>>,
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn save(&self, employee: Employee) -> Result<(), ServiceError> {
        let mut rows = lock(&self.rows)?;
        rows.retain(|e| e.mail != employee.mail);
        rows.push(employee);
        Ok(())
    }

    async fn find_by_mail(&self, mail: &str) -> Result<Option<Employee>, ServiceError> {
        Ok(lock(&self.rows)?.iter().find(|e| e.mail == mail).cloned())
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<Employee>, ServiceError> {
        Ok(lock(&self.rows)?
            .iter()
            .filter(|e| e.role == role)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(lock(&self.rows)?.clone())
    }

    async fn delete_by_mail(&self, mail: &str) -> Result<bool, ServiceError> {
        let mut rows = lock(&self.rows)?;
        let before = rows.len();
        rows.retain(|e| e.mail != mail);
        Ok(rows.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct MemoryLeaveBalanceStore {
    rows: Arc<Mutex<Vec<LeaveBalance>>>,
}

#[async_trait]
impl LeaveBalanceStore for MemoryLeaveBalanceStore {
    async fn save(&self, balance: LeaveBalance) -> Result<(), ServiceError> {
        let mut rows = lock(&self.rows)?;
        rows.retain(|b| b.employee_mail != balance.employee_mail);
        rows.push(balance);
        Ok(())
    }

    async fn find_by_employee(&self, mail: &str) -> Result<Option<LeaveBalance>, ServiceError> {
        Ok(lock(&self.rows)?
            .iter()
            .find(|b| b.employee_mail == mail)
            .cloned())
    }

    async fn delete_by_employee(&self, mail: &str) -> Result<(), ServiceError> {
        lock(&self.rows)?.retain(|b| b.employee_mail != mail);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryLeaveRequestLedger {
    rows: Arc<Mutex<Vec<LeaveRequest>>>,
}

#[async_trait]
impl LeaveRequestLedger for MemoryLeaveRequestLedger {
    async fn save(&self, request: LeaveRequest) -> Result<(), ServiceError> {
        let mut rows = lock(&self.rows)?;
        rows.retain(|r| r.id != request.id);
        rows.push(request);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<LeaveRequest>, ServiceError> {
        Ok(lock(&self.rows)?.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_employee(&self, mail: &str) -> Result<Vec<LeaveRequest>, ServiceError> {
        Ok(lock(&self.rows)?
            .iter()
            .filter(|r| r.employee_mail == mail)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<LeaveRequest>, ServiceError> {
        Ok(lock(&self.rows)?.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryAttendanceLedger {
    rows: Arc<Mutex<Vec<AttendanceRecord>>>,
}

#[async_trait]
impl AttendanceLedger for MemoryAttendanceLedger {
    async fn save(&self, record: AttendanceRecord) -> Result<(), ServiceError> {
        let mut rows = lock(&self.rows)?;
        rows.retain(|r| r.id != record.id);
        rows.push(record);
        Ok(())
    }

    async fn find_by_employee_and_date(
        &self,
        mail: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ServiceError> {
        Ok(lock(&self.rows)?
            .iter()
            .find(|r| r.employee_mail == mail && r.date == date)
            .cloned())
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ServiceError> {
        Ok(lock(&self.rows)?
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect())
    }

    async fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        Ok(lock(&self.rows)?
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }

    async fn find_by_employee_and_date_between(
        &self,
        mail: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        Ok(lock(&self.rows)?
            .iter()
            .filter(|r| r.employee_mail == mail && r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }
}
