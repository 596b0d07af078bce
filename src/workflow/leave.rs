use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::error::ServiceError;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::{
    LeaveDecision, LeaveRequest, LeaveStatus, LeaveType, inclusive_days,
};
use crate::store::{LeaveBalanceStore, LeaveRequestLedger};

/// Validates and submits leave requests and applies HR decisions. This is the
/// only component that mutates leave balances and requests.
#[derive(Clone)]
pub struct LeaveWorkflow {
    balances: Arc<dyn LeaveBalanceStore>,
    requests: Arc<dyn LeaveRequestLedger>,
}

impl LeaveWorkflow {
    pub fn new(balances: Arc<dyn LeaveBalanceStore>, requests: Arc<dyn LeaveRequestLedger>) -> Self {
        Self { balances, requests }
    }

    /// Submit a request on behalf of an employee. Balances are only checked
    /// here, never deducted; deduction happens at approval.
    pub async fn submit_request(
        &self,
        employee_mail: &str,
        leave_type: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
        work_handover_details: &str,
    ) -> Result<LeaveRequest, ServiceError> {
        if start_date > end_date {
            return Err(ServiceError::InvalidRange);
        }
        if reason.trim().is_empty() {
            return Err(ServiceError::MissingField("reason"));
        }
        if leave_type.trim().is_empty() {
            return Err(ServiceError::MissingField("leave_type"));
        }
        if work_handover_details.trim().is_empty() {
            return Err(ServiceError::MissingField("work_handover_details"));
        }

        let total_days = inclusive_days(start_date, end_date);

        // Balance lookup comes before the type check: an unknown leave type
        // for an employee without a balance row reports the missing balance.
        let balance = self
            .balances
            .find_by_employee(employee_mail)
            .await?
            .ok_or_else(|| ServiceError::BalanceNotFound(employee_mail.to_string()))?;

        let leave_type = leave_type
            .trim()
            .parse::<LeaveType>()
            .map_err(|_| ServiceError::InvalidLeaveType(leave_type.trim().to_string()))?;

        let available = balance.counter(leave_type);
        if i64::from(available) < total_days {
            return Err(ServiceError::InsufficientBalance {
                leave_type,
                available,
                requested: total_days,
            });
        }

        let request = LeaveRequest {
            id: uuid::Uuid::new_v4().to_string(),
            employee_mail: employee_mail.to_string(),
            leave_type,
            start_date,
            end_date,
            total_days: total_days as i32,
            reason: reason.trim().to_string(),
            work_handover_details: work_handover_details.trim().to_string(),
            status: LeaveStatus::Pending,
            reviewed_by: None,
            decision_reason: String::new(),
            decision_date: None,
        };
        self.requests.save(request.clone()).await?;

        tracing::info!(
            employee_mail,
            request_id = %request.id,
            total_days,
            "leave request submitted"
        );
        Ok(request)
    }

    /// Apply a terminal HR decision. Approval re-fetches the balance and
    /// subtracts without re-validating; two approvals racing on the same
    /// employee can drive a counter negative, which matches the reference
    /// behavior of this system.
    pub async fn decide(
        &self,
        request_id: &str,
        decision: LeaveDecision,
        reviewer_mail: &str,
        reason: Option<&str>,
    ) -> Result<LeaveRequest, ServiceError> {
        let mut request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ServiceError::RequestNotFound(request_id.to_string()))?;

        if request.status != LeaveStatus::Pending {
            return Err(ServiceError::AlreadyDecided {
                reviewed_by: request.reviewed_by.unwrap_or_default(),
                status: request.status,
            });
        }

        request.status = decision.into();
        request.reviewed_by = Some(reviewer_mail.to_string());
        request.decision_date = Some(Local::now().date_naive());
        request.decision_reason = reason.unwrap_or("").to_string();

        if decision == LeaveDecision::Approved {
            let mut balance = self
                .balances
                .find_by_employee(&request.employee_mail)
                .await?
                .ok_or_else(|| ServiceError::BalanceNotFound(request.employee_mail.clone()))?;
            *balance.counter_mut(request.leave_type) -= request.total_days;
            self.balances.save(balance).await?;
        }

        self.requests.save(request.clone()).await?;

        tracing::info!(
            request_id,
            reviewer_mail,
            status = %request.status,
            "leave request decided"
        );
        Ok(request)
    }

    pub async fn list_for_employee(&self, mail: &str) -> Result<Vec<LeaveRequest>, ServiceError> {
        self.requests.find_by_employee(mail).await
    }

    pub async fn list_all(&self) -> Result<Vec<LeaveRequest>, ServiceError> {
        self.requests.list().await
    }

    pub async fn get_balance(&self, mail: &str) -> Result<LeaveBalance, ServiceError> {
        self.balances
            .find_by_employee(mail)
            .await?
            .ok_or_else(|| ServiceError::BalanceNotFound(mail.to_string()))
    }

    /// HR override: replaces all four counters verbatim. Values are not
    /// validated, the caller owns what it writes.
    pub async fn overwrite_balance(&self, new_balance: LeaveBalance) -> Result<(), ServiceError> {
        let mut existing = self
            .balances
            .find_by_employee(&new_balance.employee_mail)
            .await?
            .ok_or_else(|| ServiceError::BalanceNotFound(new_balance.employee_mail.clone()))?;

        existing.annual_leave = new_balance.annual_leave;
        existing.sick_leave = new_balance.sick_leave;
        existing.personal_leave = new_balance.personal_leave;
        existing.emergency_leave = new_balance.emergency_leave;
        self.balances.save(existing).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{MemoryLeaveBalanceStore, MemoryLeaveRequestLedger};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn workflow() -> (LeaveWorkflow, Arc<MemoryLeaveBalanceStore>, Arc<MemoryLeaveRequestLedger>) {
        let balances = Arc::new(MemoryLeaveBalanceStore::default());
        let requests = Arc::new(MemoryLeaveRequestLedger::default());
        let workflow = LeaveWorkflow::new(balances.clone(), requests.clone());
        (workflow, balances, requests)
    }

    async fn seed_balance(balances: &MemoryLeaveBalanceStore, mail: &str) {
        balances.save(LeaveBalance::new_hire(mail)).await.unwrap();
    }

    #[actix_web::test]
    async fn submit_computes_inclusive_days_and_stays_pending() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        let request = workflow
            .submit_request("e@co", "Sick", date("2025-06-10"), date("2025-06-12"), "flu", "jane covers")
            .await
            .unwrap();

        assert_eq!(request.total_days, 3);
        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.reviewed_by, None);
        assert_eq!(request.decision_reason, "");
        // No deduction at submission time.
        let balance = workflow.get_balance("e@co").await.unwrap();
        assert_eq!(balance.sick_leave, 8);
    }

    #[actix_web::test]
    async fn submit_rejects_inverted_range_without_side_effects() {
        let (workflow, balances, requests) = workflow();
        seed_balance(&balances, "e@co").await;

        let err = workflow
            .submit_request("e@co", "Annual", date("2025-06-12"), date("2025-06-10"), "trip", "n/a")
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::InvalidRange);
        assert!(requests.list().await.unwrap().is_empty());
        assert_eq!(workflow.get_balance("e@co").await.unwrap().annual_leave, 15);
    }

    #[actix_web::test]
    async fn submit_rejects_blank_fields() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        let err = workflow
            .submit_request("e@co", "Annual", date("2025-06-10"), date("2025-06-10"), "  ", "n/a")
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::MissingField("reason"));

        let err = workflow
            .submit_request("e@co", "", date("2025-06-10"), date("2025-06-10"), "trip", "n/a")
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::MissingField("leave_type"));

        let err = workflow
            .submit_request("e@co", "Annual", date("2025-06-10"), date("2025-06-10"), "trip", "")
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::MissingField("work_handover_details"));
    }

    #[actix_web::test]
    async fn submit_rejects_unknown_leave_type() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        let err = workflow
            .submit_request("e@co", "unpaid", date("2025-06-10"), date("2025-06-10"), "r", "h")
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::InvalidLeaveType("unpaid".into()));
    }

    #[actix_web::test]
    async fn submit_accepts_lowercase_leave_type() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        let request = workflow
            .submit_request("e@co", "emergency", date("2025-06-10"), date("2025-06-11"), "r", "h")
            .await
            .unwrap();
        assert_eq!(request.leave_type, LeaveType::Emergency);
    }

    #[actix_web::test]
    async fn submit_requires_an_existing_balance() {
        let (workflow, _, _) = workflow();

        let err = workflow
            .submit_request("ghost@co", "Annual", date("2025-06-10"), date("2025-06-10"), "r", "h")
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::BalanceNotFound("ghost@co".into()));
    }

    // The missing balance wins over the bad leave type, matching the order
    // of the submission checks.
    #[actix_web::test]
    async fn missing_balance_is_reported_before_unknown_leave_type() {
        let (workflow, _, _) = workflow();

        let err = workflow
            .submit_request("ghost@co", "unpaid", date("2025-06-10"), date("2025-06-10"), "r", "h")
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::BalanceNotFound("ghost@co".into()));
    }

    #[actix_web::test]
    async fn submit_rejects_insufficient_balance_and_creates_nothing() {
        let (workflow, balances, requests) = workflow();
        seed_balance(&balances, "e@co").await;

        // Personal balance is 3, request spans 4 days.
        let err = workflow
            .submit_request("e@co", "Personal", date("2025-06-10"), date("2025-06-13"), "r", "h")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::InsufficientBalance {
                leave_type: LeaveType::Personal,
                available: 3,
                requested: 4,
            }
        );
        assert!(requests.list().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn approval_deducts_the_matching_counter() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        let request = workflow
            .submit_request("e@co", "Annual", date("2025-07-01"), date("2025-07-03"), "r", "h")
            .await
            .unwrap();
        let decided = workflow
            .decide(&request.id, LeaveDecision::Approved, "hr@co", Some("ok"))
            .await
            .unwrap();

        assert_eq!(decided.status, LeaveStatus::Approved);
        assert_eq!(decided.reviewed_by.as_deref(), Some("hr@co"));
        assert_eq!(decided.decision_reason, "ok");
        assert_eq!(decided.decision_date, Some(Local::now().date_naive()));

        let balance = workflow.get_balance("e@co").await.unwrap();
        assert_eq!(balance.annual_leave, 12);
        assert_eq!(balance.sick_leave, 8);
    }

    #[actix_web::test]
    async fn rejection_leaves_the_balance_untouched() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        let request = workflow
            .submit_request("e@co", "Sick", date("2025-07-01"), date("2025-07-02"), "r", "h")
            .await
            .unwrap();
        let decided = workflow
            .decide(&request.id, LeaveDecision::Rejected, "hr@co", None)
            .await
            .unwrap();

        assert_eq!(decided.status, LeaveStatus::Rejected);
        assert_eq!(decided.decision_reason, "");
        assert_eq!(workflow.get_balance("e@co").await.unwrap().sick_leave, 8);
    }

    #[actix_web::test]
    async fn deciding_twice_fails_and_names_the_first_reviewer() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        let request = workflow
            .submit_request("e@co", "Annual", date("2025-07-01"), date("2025-07-01"), "r", "h")
            .await
            .unwrap();
        workflow
            .decide(&request.id, LeaveDecision::Approved, "hr1@co", None)
            .await
            .unwrap();

        let err = workflow
            .decide(&request.id, LeaveDecision::Rejected, "hr2@co", None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::AlreadyDecided {
                reviewed_by: "hr1@co".into(),
                status: LeaveStatus::Approved,
            }
        );
        // Only the first approval deducted.
        assert_eq!(workflow.get_balance("e@co").await.unwrap().annual_leave, 14);
    }

    #[actix_web::test]
    async fn deciding_unknown_request_fails() {
        let (workflow, _, _) = workflow();
        let err = workflow
            .decide("nope", LeaveDecision::Approved, "hr@co", None)
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::RequestNotFound("nope".into()));
    }

    // Two requests validated against the same starting balance, both
    // approved: the second approval does not re-validate, so the counter
    // goes negative. Documents the accepted lost-update behavior.
    #[actix_web::test]
    async fn overlapping_approvals_can_drive_a_counter_negative() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        let first = workflow
            .submit_request("e@co", "Annual", date("2025-07-01"), date("2025-07-10"), "r", "h")
            .await
            .unwrap();
        let second = workflow
            .submit_request("e@co", "Annual", date("2025-08-01"), date("2025-08-10"), "r", "h")
            .await
            .unwrap();

        workflow
            .decide(&first.id, LeaveDecision::Approved, "hr@co", None)
            .await
            .unwrap();
        workflow
            .decide(&second.id, LeaveDecision::Approved, "hr@co", None)
            .await
            .unwrap();

        assert_eq!(workflow.get_balance("e@co").await.unwrap().annual_leave, -5);
    }

    #[actix_web::test]
    async fn overwrite_replaces_counters_verbatim() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "e@co").await;

        workflow
            .overwrite_balance(LeaveBalance {
                employee_mail: "e@co".into(),
                annual_leave: 20,
                sick_leave: 0,
                personal_leave: -1,
                emergency_leave: 5,
            })
            .await
            .unwrap();

        let balance = workflow.get_balance("e@co").await.unwrap();
        assert_eq!(balance.annual_leave, 20);
        assert_eq!(balance.sick_leave, 0);
        assert_eq!(balance.personal_leave, -1);
        assert_eq!(balance.emergency_leave, 5);
    }

    #[actix_web::test]
    async fn overwrite_requires_an_existing_balance() {
        let (workflow, _, _) = workflow();
        let err = workflow
            .overwrite_balance(LeaveBalance::new_hire("ghost@co"))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::BalanceNotFound("ghost@co".into()));
    }

    #[actix_web::test]
    async fn list_for_employee_only_returns_their_requests() {
        let (workflow, balances, _) = workflow();
        seed_balance(&balances, "a@co").await;
        seed_balance(&balances, "b@co").await;

        workflow
            .submit_request("a@co", "Annual", date("2025-07-01"), date("2025-07-01"), "r", "h")
            .await
            .unwrap();
        workflow
            .submit_request("b@co", "Annual", date("2025-07-01"), date("2025-07-01"), "r", "h")
            .await
            .unwrap();

        let mine = workflow.list_for_employee("a@co").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].employee_mail, "a@co");
        assert_eq!(workflow.list_all().await.unwrap().len(), 2);
    }
}
