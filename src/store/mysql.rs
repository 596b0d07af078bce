//! MySQL-backed stores. Plain (non-macro) queries with row structs so the
//! crate builds without a live database; see `schema.sql` for the DDL.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::error::ServiceError;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::store::{AttendanceLedger, EmployeeStore, LeaveBalanceStore, LeaveRequestLedger};

fn bad_column(column: &str, value: &str) -> ServiceError {
    ServiceError::Store(format!("unexpected {} value in row: {}", column, value))
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    mail: String,
    name: String,
    role: String,
    department: Option<String>,
    job_role: Option<String>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = ServiceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|_| bad_column("role", &row.role))?;
        Ok(Employee {
            mail: row.mail,
            name: row.name,
            role,
            department: row.department,
            job_role: row.job_role,
        })
    }
}

#[derive(Clone)]
pub struct MySqlEmployeeStore {
    pool: MySqlPool,
}

impl MySqlEmployeeStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn save(&self, employee: Employee) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO employees (mail, name, role, department, job_role)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                name = VALUES(name),
                role = VALUES(role),
                department = VALUES(department),
                job_role = VALUES(job_role)
            "#,
        )
        .bind(&employee.mail)
        .bind(&employee.name)
        .bind(employee.role.to_string())
        .bind(&employee.department)
        .bind(&employee.job_role)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_mail(&self, mail: &str) -> Result<Option<Employee>, ServiceError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT mail, name, role, department, job_role FROM employees WHERE mail = ?",
        )
        .bind(mail)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Employee::try_from).transpose()
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<Employee>, ServiceError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT mail, name, role, department, job_role FROM employees WHERE LOWER(role) = LOWER(?)",
        )
        .bind(role.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT mail, name, role, department, job_role FROM employees",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn delete_by_mail(&self, mail: &str) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM employees WHERE mail = ?")
            .bind(mail)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct LeaveBalanceRow {
    employee_mail: String,
    annual_leave: i32,
    sick_leave: i32,
    personal_leave: i32,
    emergency_leave: i32,
}

impl From<LeaveBalanceRow> for LeaveBalance {
    fn from(row: LeaveBalanceRow) -> Self {
        LeaveBalance {
            employee_mail: row.employee_mail,
            annual_leave: row.annual_leave,
            sick_leave: row.sick_leave,
            personal_leave: row.personal_leave,
            emergency_leave: row.emergency_leave,
        }
    }
}

#[derive(Clone)]
pub struct MySqlLeaveBalanceStore {
    pool: MySqlPool,
}

impl MySqlLeaveBalanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveBalanceStore for MySqlLeaveBalanceStore {
    async fn save(&self, balance: LeaveBalance) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO leave_balances
                (employee_mail, annual_leave, sick_leave, personal_leave, emergency_leave)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                annual_leave = VALUES(annual_leave),
                sick_leave = VALUES(sick_leave),
                personal_leave = VALUES(personal_leave),
                emergency_leave = VALUES(emergency_leave)
            "#,
        )
        .bind(&balance.employee_mail)
        .bind(balance.annual_leave)
        .bind(balance.sick_leave)
        .bind(balance.personal_leave)
        .bind(balance.emergency_leave)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_employee(&self, mail: &str) -> Result<Option<LeaveBalance>, ServiceError> {
        let row = sqlx::query_as::<_, LeaveBalanceRow>(
            r#"
            SELECT employee_mail, annual_leave, sick_leave, personal_leave, emergency_leave
            FROM leave_balances WHERE employee_mail = ?
            "#,
        )
        .bind(mail)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(LeaveBalance::from))
    }

    async fn delete_by_employee(&self, mail: &str) -> Result<(), ServiceError> {
        sqlx::query("DELETE FROM leave_balances WHERE employee_mail = ?")
            .bind(mail)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct LeaveRequestRow {
    id: String,
    employee_mail: String,
    leave_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_days: i32,
    reason: String,
    work_handover_details: String,
    status: String,
    reviewed_by: Option<String>,
    decision_reason: String,
    decision_date: Option<NaiveDate>,
}

impl TryFrom<LeaveRequestRow> for LeaveRequest {
    type Error = ServiceError;

    fn try_from(row: LeaveRequestRow) -> Result<Self, Self::Error> {
        let leave_type = row
            .leave_type
            .parse::<LeaveType>()
            .map_err(|_| bad_column("leave_type", &row.leave_type))?;
        let status = row
            .status
            .parse::<LeaveStatus>()
            .map_err(|_| bad_column("status", &row.status))?;
        Ok(LeaveRequest {
            id: row.id,
            employee_mail: row.employee_mail,
            leave_type,
            start_date: row.start_date,
            end_date: row.end_date,
            total_days: row.total_days,
            reason: row.reason,
            work_handover_details: row.work_handover_details,
            status,
            reviewed_by: row.reviewed_by,
            decision_reason: row.decision_reason,
            decision_date: row.decision_date,
        })
    }
}

const LEAVE_REQUEST_COLUMNS: &str = "id, employee_mail, leave_type, start_date, end_date, \
     total_days, reason, work_handover_details, status, reviewed_by, decision_reason, \
     decision_date";

#[derive(Clone)]
pub struct MySqlLeaveRequestLedger {
    pool: MySqlPool,
}

impl MySqlLeaveRequestLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveRequestLedger for MySqlLeaveRequestLedger {
    async fn save(&self, request: LeaveRequest) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO leave_requests
                (id, employee_mail, leave_type, start_date, end_date, total_days,
                 reason, work_handover_details, status, reviewed_by, decision_reason,
                 decision_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                status = VALUES(status),
                reviewed_by = VALUES(reviewed_by),
                decision_reason = VALUES(decision_reason),
                decision_date = VALUES(decision_date)
            "#,
        )
        .bind(&request.id)
        .bind(&request.employee_mail)
        .bind(request.leave_type.to_string())
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.total_days)
        .bind(&request.reason)
        .bind(&request.work_handover_details)
        .bind(request.status.to_string())
        .bind(&request.reviewed_by)
        .bind(&request.decision_reason)
        .bind(request.decision_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<LeaveRequest>, ServiceError> {
        let sql = format!(
            "SELECT {} FROM leave_requests WHERE id = ?",
            LEAVE_REQUEST_COLUMNS
        );
        let row = sqlx::query_as::<_, LeaveRequestRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(LeaveRequest::try_from).transpose()
    }

    async fn find_by_employee(&self, mail: &str) -> Result<Vec<LeaveRequest>, ServiceError> {
        let sql = format!(
            "SELECT {} FROM leave_requests WHERE employee_mail = ?",
            LEAVE_REQUEST_COLUMNS
        );
        let rows = sqlx::query_as::<_, LeaveRequestRow>(&sql)
            .bind(mail)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(LeaveRequest::try_from).collect()
    }

    async fn list(&self) -> Result<Vec<LeaveRequest>, ServiceError> {
        let sql = format!("SELECT {} FROM leave_requests", LEAVE_REQUEST_COLUMNS);
        let rows = sqlx::query_as::<_, LeaveRequestRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(LeaveRequest::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: String,
    employee_mail: String,
    date: NaiveDate,
    status: String,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        AttendanceRecord {
            id: row.id,
            employee_mail: row.employee_mail,
            date: row.date,
            status: row.status,
        }
    }
}

#[derive(Clone)]
pub struct MySqlAttendanceLedger {
    pool: MySqlPool,
}

impl MySqlAttendanceLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceLedger for MySqlAttendanceLedger {
    async fn save(&self, record: AttendanceRecord) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO attendance (id, employee_mail, date, status)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE status = VALUES(status)
            "#,
        )
        .bind(&record.id)
        .bind(&record.employee_mail)
        .bind(record.date)
        .bind(&record.status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_employee_and_date(
        &self,
        mail: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ServiceError> {
        let row = sqlx::query_as::<_, AttendanceRow>(
            "SELECT id, employee_mail, date, status FROM attendance \
             WHERE employee_mail = ? AND date = ?",
        )
        .bind(mail)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(AttendanceRecord::from))
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            "SELECT id, employee_mail, date, status FROM attendance WHERE date = ?",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            "SELECT id, employee_mail, date, status FROM attendance \
             WHERE date BETWEEN ? AND ?",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn find_by_employee_and_date_between(
        &self,
        mail: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            "SELECT id, employee_mail, date, status FROM attendance \
             WHERE employee_mail = ? AND date BETWEEN ? AND ?",
        )
        .bind(mail)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }
}
