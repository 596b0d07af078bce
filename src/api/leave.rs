use actix_web::{HttpResponse, error::ErrorBadRequest, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;
use crate::auth::AuthUser;
use crate::model::leave_balance::LeaveBalance;
use crate::model::leave_request::LeaveDecision;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "sick")]
    pub leave_type: String,
    #[schema(example = "2025-06-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-06-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Flu")]
    pub reason: String,
    #[schema(example = "Jane covers standup")]
    pub work_handover_details: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DecideLeave {
    #[schema(example = "approved")]
    pub decision: String,
    #[schema(example = "Enjoy", nullable = true)]
    pub reason: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct BalanceQuery {
    /// HR/Admin may read any employee's balance; employees read their own.
    pub mail: Option<String>,
}

/// Submit a leave request (Employee). No balance is deducted until approval.
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body = CreateLeave,
    responses(
        (status = 200, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Invalid range, blank field or unknown leave type"),
        (status = 404, description = "Leave balance not found"),
        (status = 409, description = "Insufficient balance")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    state: web::Data<AppState>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<HttpResponse> {
    let mail = auth.require_employee()?.to_string();

    let request = state
        .workflow
        .submit_request(
            &mail,
            &payload.leave_type,
            payload.start_date,
            payload.end_date,
            &payload.reason,
            &payload.work_handover_details,
        )
        .await?;

    Ok(HttpResponse::Ok().json(request))
}

/// All leave requests (HR/Admin).
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "All leave requests", body = [LeaveRequest])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let requests = state.workflow.list_all().await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// The caller's own leave requests (Employee).
#[utoipa::path(
    get,
    path = "/api/leave/my",
    responses(
        (status = 200, description = "Own leave requests", body = [LeaveRequest])
    ),
    tag = "Leave"
)]
pub async fn my_requests(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let mail = auth.require_employee()?.to_string();
    let requests = state.workflow.list_for_employee(&mail).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// Approve or reject a pending request (HR/Admin). Terminal: a second
/// decision on the same request is a conflict.
#[utoipa::path(
    put,
    path = "/api/leave/{id}/decide",
    params(("id" = String, Path, description = "Leave request id")),
    request_body = DecideLeave,
    responses(
        (status = 200, description = "Decision applied", body = Object, example = json!({
            "message": "Request Approved by hr@company.com"
        })),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Already decided")
    ),
    tag = "Leave"
)]
pub async fn decide_leave(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<DecideLeave>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let request_id = path.into_inner();

    let decision = payload
        .decision
        .trim()
        .parse::<LeaveDecision>()
        .map_err(|_| ErrorBadRequest("Invalid decision. Allowed: approved, rejected"))?;

    let decided = state
        .workflow
        .decide(&request_id, decision, &auth.mail, payload.reason.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Request {} by {}", decided.status, auth.mail)
    })))
}

/// Leave balance lookup. Employees see their own; HR/Admin may pass `?mail=`.
#[utoipa::path(
    get,
    path = "/api/leave/balance",
    params(BalanceQuery),
    responses(
        (status = 200, description = "Leave balance", body = LeaveBalance),
        (status = 404, description = "Balance not found")
    ),
    tag = "Leave"
)]
pub async fn get_balance(
    auth: AuthUser,
    state: web::Data<AppState>,
    query: web::Query<BalanceQuery>,
) -> actix_web::Result<HttpResponse> {
    let mail = match (&query.mail, auth.role.is_hr_or_admin()) {
        (Some(mail), true) => mail.clone(),
        _ => auth.mail.clone(),
    };
    let balance = state.workflow.get_balance(&mail).await?;
    Ok(HttpResponse::Ok().json(balance))
}

/// Replace an employee's counters verbatim (HR/Admin). No validation is
/// applied to the values.
#[utoipa::path(
    put,
    path = "/api/leave/balance",
    request_body = LeaveBalance,
    responses(
        (status = 200, description = "Balance updated", body = Object, example = json!({
            "message": "Leave balance updated"
        })),
        (status = 404, description = "Balance not found")
    ),
    tag = "Leave"
)]
pub async fn update_balance(
    auth: AuthUser,
    state: web::Data<AppState>,
    payload: web::Json<LeaveBalance>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    state.workflow.overwrite_balance(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave balance updated"
    })))
}
