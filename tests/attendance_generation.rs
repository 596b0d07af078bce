//! End-to-end attendance generation against the in-memory stores.

use chrono::NaiveDate;

use employee_management::AppState;
use employee_management::model::employee::Employee;
use employee_management::model::role::Role;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

async fn onboard(state: &AppState, mail: &str, role: Role) {
    state
        .employees
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
async fn generation_covers_the_employee_roster_once() {
    let state = AppState::in_memory();
    onboard(&state, "a@co", Role::Employee).await;
    onboard(&state, "b@co", Role::Employee).await;
    onboard(&state, "hr@co", Role::Hr).await;

    // Two Absent rows, one per Employee-role employee.
    let created = state
        .generator
        .generate_for_date(date("2025-06-01"))
        .await
        .unwrap();
    assert_eq!(created, 2);

    let rows = state.generator.query_by_date("2025-06-01").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.status == "Absent"));

    // Sequential re-run is a no-op.
    let created = state
        .generator
        .generate_for_date(date("2025-06-01"))
        .await
        .unwrap();
    assert_eq!(created, 0);
    assert_eq!(state.generator.query_by_date("2025-06-01").await.unwrap().len(), 2);
}

#[actix_web::test]
async fn correction_flow_flips_generated_rows() {
    let state = AppState::in_memory();
    onboard(&state, "a@co", Role::Employee).await;
    state
        .generator
        .generate_for_date(date("2025-06-01"))
        .await
        .unwrap();

    let record = state.generator.mark_present("a@co", "2025-06-01").await.unwrap();
    assert_eq!(record.status, "Present");

    // Present-marking never creates rows for other days.
    let err = state.generator.mark_present("a@co", "2025-06-02").await.unwrap_err();
    assert_eq!(err.to_string(), "No attendance record for a@co on 2025-06-02");
    assert!(state.generator.query_by_date("2025-06-02").await.unwrap().is_empty());
}
