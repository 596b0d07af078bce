use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::ServiceError;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::role::Role;
use crate::store::{AttendanceLedger, EmployeeStore};

fn parse_date(raw: &str) -> Result<NaiveDate, ServiceError> {
    raw.trim()
        .parse::<NaiveDate>()
        .map_err(|_| ServiceError::InvalidDate(raw.trim().to_string()))
}

/// Creates the default "Absent" rows for each day and handles manual
/// corrections. Owns all writes to the attendance ledger.
#[derive(Clone)]
pub struct AttendanceGenerator {
    employees: Arc<dyn EmployeeStore>,
    attendance: Arc<dyn AttendanceLedger>,
}

impl AttendanceGenerator {
    pub fn new(employees: Arc<dyn EmployeeStore>, attendance: Arc<dyn AttendanceLedger>) -> Self {
        Self { employees, attendance }
    }

    /// Create an Absent row for every Employee-role employee missing one on
    /// `date`. Lookup-before-insert keeps sequential re-runs idempotent.
    /// Returns the number of rows created.
    pub async fn generate_for_date(&self, date: NaiveDate) -> Result<u32, ServiceError> {
        let roster = self.employees.find_by_role(Role::Employee).await?;
        let mut created = 0u32;
        for employee in roster {
            let existing = self
                .attendance
                .find_by_employee_and_date(&employee.mail, date)
                .await?;
            if existing.is_none() {
                self.attendance
                    .save(AttendanceRecord {
                        id: uuid::Uuid::new_v4().to_string(),
                        employee_mail: employee.mail,
                        date,
                        status: AttendanceStatus::Absent.to_string(),
                    })
                    .await?;
                created += 1;
            }
        }
        tracing::info!(%date, created, "daily attendance generation finished");
        Ok(created)
    }

    /// Flip an existing row to Present. Never creates a record.
    pub async fn mark_present(&self, mail: &str, date: &str) -> Result<AttendanceRecord, ServiceError> {
        let employee = self.employees.find_by_mail(mail).await?;
        match employee {
            Some(e) if e.role == Role::Employee => {}
            _ => return Err(ServiceError::EmployeeNotFound(mail.to_string())),
        }

        let date = parse_date(date)?;
        let mut record = self
            .attendance
            .find_by_employee_and_date(mail, date)
            .await?
            .ok_or_else(|| ServiceError::RecordNotFound {
                employee_mail: mail.to_string(),
                date,
            })?;

        record.status = AttendanceStatus::Present.to_string();
        self.attendance.save(record.clone()).await?;
        Ok(record)
    }

    /// Unconditional correction: overwrites the status of an existing row
    /// with whatever string HR sends. Reference behavior performs no enum
    /// validation here.
    pub async fn update_status(
        &self,
        mail: &str,
        date: &str,
        status: &str,
    ) -> Result<AttendanceRecord, ServiceError> {
        let date = parse_date(date)?;
        let mut record = self
            .attendance
            .find_by_employee_and_date(mail, date)
            .await?
            .ok_or_else(|| ServiceError::RecordNotFound {
                employee_mail: mail.to_string(),
                date,
            })?;

        record.status = status.to_string();
        self.attendance.save(record.clone()).await?;
        Ok(record)
    }

    pub async fn query_by_date(&self, date: &str) -> Result<Vec<AttendanceRecord>, ServiceError> {
        self.attendance.find_by_date(parse_date(date)?).await
    }

    pub async fn query_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        self.attendance
            .find_by_date_between(parse_date(start)?, parse_date(end)?)
            .await
    }

    pub async fn query_employee_range(
        &self,
        mail: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<AttendanceRecord>, ServiceError> {
        self.attendance
            .find_by_employee_and_date_between(mail, parse_date(start)?, parse_date(end)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::Employee;
    use crate::store::memory::{MemoryAttendanceLedger, MemoryEmployeeStore};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn generator() -> (AttendanceGenerator, Arc<MemoryEmployeeStore>, Arc<MemoryAttendanceLedger>) {
        let employees = Arc::new(MemoryEmployeeStore::default());
        let attendance = Arc::new(MemoryAttendanceLedger::default());
        let generator = AttendanceGenerator::new(employees.clone(), attendance.clone());
        (generator, employees, attendance)
    }

    async fn seed_employee(store: &MemoryEmployeeStore, mail: &str, role: Role) {
        store
            .save(Employee {
                mail: mail.into(),
                name: mail.into(),
                role,
                department: None,
                job_role: None,
            })
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn generation_creates_one_absent_row_per_employee() {
        let (generator, employees, attendance) = generator();
        seed_employee(&employees, "a@co", Role::Employee).await;
        seed_employee(&employees, "b@co", Role::Employee).await;
        seed_employee(&employees, "hr@co", Role::Hr).await;

        let created = generator.generate_for_date(date("2025-06-01")).await.unwrap();
        assert_eq!(created, 2);

        let rows = attendance.find_by_date(date("2025-06-01")).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.status == "Absent"));
        assert!(rows.iter().all(|r| r.employee_mail != "hr@co"));
    }

    #[actix_web::test]
    async fn generation_is_idempotent_under_sequential_reruns() {
        let (generator, employees, attendance) = generator();
        seed_employee(&employees, "a@co", Role::Employee).await;

        assert_eq!(generator.generate_for_date(date("2025-06-01")).await.unwrap(), 1);
        assert_eq!(generator.generate_for_date(date("2025-06-01")).await.unwrap(), 0);
        assert_eq!(
            attendance.find_by_date(date("2025-06-01")).await.unwrap().len(),
            1
        );
    }

    #[actix_web::test]
    async fn generation_does_not_touch_corrected_rows() {
        let (generator, employees, _) = generator();
        seed_employee(&employees, "a@co", Role::Employee).await;

        generator.generate_for_date(date("2025-06-01")).await.unwrap();
        generator.mark_present("a@co", "2025-06-01").await.unwrap();
        generator.generate_for_date(date("2025-06-01")).await.unwrap();

        let rows = generator.query_by_date("2025-06-01").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "Present");
    }

    #[actix_web::test]
    async fn mark_present_requires_an_employee_role() {
        let (generator, employees, _) = generator();
        seed_employee(&employees, "hr@co", Role::Hr).await;

        let err = generator.mark_present("ghost@co", "2025-06-01").await.unwrap_err();
        assert_eq!(err, ServiceError::EmployeeNotFound("ghost@co".into()));

        let err = generator.mark_present("hr@co", "2025-06-01").await.unwrap_err();
        assert_eq!(err, ServiceError::EmployeeNotFound("hr@co".into()));
    }

    #[actix_web::test]
    async fn mark_present_rejects_unparseable_dates() {
        let (generator, employees, _) = generator();
        seed_employee(&employees, "a@co", Role::Employee).await;

        let err = generator.mark_present("a@co", "01/06/2025").await.unwrap_err();
        assert_eq!(err, ServiceError::InvalidDate("01/06/2025".into()));
    }

    #[actix_web::test]
    async fn mark_present_never_creates_a_record() {
        let (generator, employees, attendance) = generator();
        seed_employee(&employees, "a@co", Role::Employee).await;

        let err = generator.mark_present("a@co", "2025-06-01").await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::RecordNotFound {
                employee_mail: "a@co".into(),
                date: date("2025-06-01"),
            }
        );
        assert!(attendance.find_by_date(date("2025-06-01")).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn update_status_stores_any_string_verbatim() {
        let (generator, employees, _) = generator();
        seed_employee(&employees, "a@co", Role::Employee).await;
        generator.generate_for_date(date("2025-06-01")).await.unwrap();

        let record = generator
            .update_status("a@co", "2025-06-01", "WorkFromHome")
            .await
            .unwrap();
        assert_eq!(record.status, "WorkFromHome");
    }

    #[actix_web::test]
    async fn update_status_requires_an_existing_record() {
        let (generator, _, _) = generator();
        let err = generator
            .update_status("a@co", "2025-06-01", "Present")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::RecordNotFound { .. }));
    }

    #[actix_web::test]
    async fn range_query_is_inclusive_at_both_ends() {
        let (generator, employees, _) = generator();
        seed_employee(&employees, "a@co", Role::Employee).await;
        for day in ["2025-06-01", "2025-06-02", "2025-06-03"] {
            generator.generate_for_date(date(day)).await.unwrap();
        }

        let rows = generator.query_by_range("2025-06-01", "2025-06-02").await.unwrap();
        assert_eq!(rows.len(), 2);

        let rows = generator
            .query_employee_range("a@co", "2025-06-01", "2025-06-03")
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
    }
}
