//! End-to-end leave lifecycle against the in-memory stores.

use chrono::{Local, NaiveDate};

use employee_management::AppState;
use employee_management::model::leave_balance::LeaveBalance;
use employee_management::model::leave_request::{LeaveDecision, LeaveStatus};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[actix_web::test]
async fn sick_leave_submission_and_approval() {
    let state = AppState::in_memory();
    state
        .balances
        .save(LeaveBalance::new_hire("e@co"))
        .await
        .unwrap();

    // Employee submits Sick leave 2025-06-10..2025-06-12 (3 days).
    let request = state
        .workflow
        .submit_request(
            "e@co",
            "Sick",
            date("2025-06-10"),
            date("2025-06-12"),
            "flu",
            "Jane covers standup",
        )
        .await
        .unwrap();
    assert_eq!(request.total_days, 3);
    assert_eq!(request.status, LeaveStatus::Pending);

    // Balance untouched while pending.
    assert_eq!(state.workflow.get_balance("e@co").await.unwrap().sick_leave, 8);

    // HR approves.
    let decided = state
        .workflow
        .decide(&request.id, LeaveDecision::Approved, "hr@co", None)
        .await
        .unwrap();
    assert_eq!(decided.status, LeaveStatus::Approved);
    assert_eq!(decided.reviewed_by.as_deref(), Some("hr@co"));
    assert_eq!(decided.decision_date, Some(Local::now().date_naive()));

    // Sick counter deducted, everything else untouched.
    let balance = state.workflow.get_balance("e@co").await.unwrap();
    assert_eq!(balance.sick_leave, 5);
    assert_eq!(balance.annual_leave, 15);
    assert_eq!(balance.personal_leave, 3);
    assert_eq!(balance.emergency_leave, 2);

    // The decision is terminal.
    let err = state
        .workflow
        .decide(&request.id, LeaveDecision::Rejected, "hr2@co", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Already Approved by hr@co");
}

#[actix_web::test]
async fn decision_fails_when_balance_row_was_deleted() {
    let state = AppState::in_memory();
    state
        .balances
        .save(LeaveBalance::new_hire("e@co"))
        .await
        .unwrap();

    let request = state
        .workflow
        .submit_request("e@co", "Annual", date("2025-06-10"), date("2025-06-10"), "r", "h")
        .await
        .unwrap();

    state.balances.delete_by_employee("e@co").await.unwrap();

    let err = state
        .workflow
        .decide(&request.id, LeaveDecision::Approved, "hr@co", None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Leave balance not found for e@co");
}
