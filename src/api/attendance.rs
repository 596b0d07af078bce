use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;
use crate::auth::AuthUser;
use crate::error::ServiceError;

#[derive(Deserialize, IntoParams)]
pub struct GenerateQuery {
    /// Defaults to today (server local time).
    pub date: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct MarkPresent {
    #[schema(example = "john.doe@company.com")]
    pub mail: String,
    #[schema(example = "2025-06-01")]
    pub date: String,
}

#[derive(Deserialize, IntoParams)]
pub struct UpdateQuery {
    pub mail: String,
    pub date: String,
    pub status: String,
}

#[derive(Deserialize, IntoParams)]
pub struct DayQuery {
    pub date: String,
}

#[derive(Deserialize, IntoParams)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
}

#[derive(Deserialize, IntoParams)]
pub struct EmployeeRangeQuery {
    pub mail: String,
    pub start: String,
    pub end: String,
}

/// Manual trigger for the daily generation (HR/Admin). Re-running for the
/// same date is a no-op for employees already recorded.
#[utoipa::path(
    post,
    path = "/api/attendance/generate",
    params(GenerateQuery),
    responses(
        (status = 200, description = "Attendance rows created", body = Object, example = json!({
            "message": "Attendance records created",
            "date": "2025-06-01",
            "created": 2
        })),
        (status = 400, description = "Invalid date")
    ),
    tag = "Attendance"
)]
pub async fn generate(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<GenerateQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;

    let date = match query.date.as_deref() {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServiceError::InvalidDate(raw.trim().to_string()))?,
        None => Local::now().date_naive(),
    };

    let created = state.generator.generate_for_date(date).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance records created",
        "date": date,
        "created": created
    })))
}

/// Flip an existing record to Present (HR/Admin). Never creates a record.
#[utoipa::path(
    put,
    path = "/api/attendance/mark-present",
    request_body = MarkPresent,
    responses(
        (status = 200, description = "Marked present", body = Object, example = json!({
            "message": "Marked Present for john.doe@company.com on 2025-06-01"
        })),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Employee or record not found")
    ),
    tag = "Attendance"
)]
pub async fn mark_present(
    auth: AuthUser,
    state: web::Data<AppState>,
    payload: web::Json<MarkPresent>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let record = state
        .generator
        .mark_present(&payload.mail, &payload.date)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Marked Present for {} on {}", record.employee_mail, record.date)
    })))
}

/// Overwrite a record's status with an arbitrary string (HR/Admin).
#[utoipa::path(
    put,
    path = "/api/attendance/update",
    params(UpdateQuery),
    responses(
        (status = 200, description = "Attendance updated", body = Object, example = json!({
            "message": "Attendance updated"
        })),
        (status = 404, description = "Record not found")
    ),
    tag = "Attendance"
)]
pub async fn update(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<UpdateQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    state
        .generator
        .update_status(&query.mail, &query.date, &query.status)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance updated"
    })))
}

/// All records for one day (HR/Admin).
#[utoipa::path(
    get,
    path = "/api/attendance/day",
    params(DayQuery),
    responses(
        (status = 200, description = "Records for the day", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn day(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<DayQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let records = state.generator.query_by_date(&query.date).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// All records in an inclusive date range (HR/Admin).
#[utoipa::path(
    get,
    path = "/api/attendance/range",
    params(RangeQuery),
    responses(
        (status = 200, description = "Records in range", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn range(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<RangeQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let records = state.generator.query_by_range(&query.start, &query.end).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// One employee's records in an inclusive date range (HR/Admin).
#[utoipa::path(
    get,
    path = "/api/attendance/employee-range",
    params(EmployeeRangeQuery),
    responses(
        (status = 200, description = "Employee records in range", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn employee_range(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<EmployeeRangeQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let records = state
        .generator
        .query_employee_range(&query.mail, &query.start, &query.end)
        .await?;
    Ok(HttpResponse::Ok().json(records))
}
