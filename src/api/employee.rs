use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::AppState;
use crate::auth::AuthUser;
use crate::error::ServiceError;
use crate::model::employee::Employee;
use crate::model::leave_balance::LeaveBalance;
use crate::model::role::Role;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "john.doe@company.com")]
    pub mail: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "Engineering", nullable = true)]
    pub department: Option<String>,
    #[schema(example = "Backend Developer", nullable = true)]
    pub job_role: Option<String>,
}

/// Onboard an employee (HR/Admin). Seeds the default leave balance.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created", body = Object, example = json!({
            "message": "Employee created with mail: john.doe@company.com"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    auth: AuthUser,
    state: web::Data<AppState>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;

    if payload.mail.trim().is_empty() {
        return Err(ServiceError::MissingField("mail").into());
    }
    let mail = payload.mail.trim().to_string();

    state
        .employees
        .save(Employee {
            mail: mail.clone(),
            name: payload.name.clone(),
            role: Role::Employee,
            department: payload.department.clone(),
            job_role: payload.job_role.clone(),
        })
        .await?;
    state.balances.save(LeaveBalance::new_hire(&mail)).await?;

    tracing::info!(%mail, "employee onboarded");
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Employee created with mail: {}", mail)
    })))
}

/// List all employees (HR/Admin).
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Employee roster", body = [Employee]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let employees = state.employees.list().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Fetch one employee by mail (HR/Admin).
#[utoipa::path(
    get,
    path = "/api/employees/{mail}",
    params(("mail" = String, Path, description = "Employee mail address")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let mail = path.into_inner();
    let employee = state
        .employees
        .find_by_mail(&mail)
        .await?
        .ok_or(ServiceError::EmployeeNotFound(mail))?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Offboard an employee (HR/Admin). The leave balance goes with the
/// employee record.
#[utoipa::path(
    delete,
    path = "/api/employees/{mail}",
    params(("mail" = String, Path, description = "Employee mail address")),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "message": "Employee deleted: john.doe@company.com"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    auth.require_hr_or_admin()?;
    let mail = path.into_inner();

    let deleted = state.employees.delete_by_mail(&mail).await?;
    if !deleted {
        return Err(ServiceError::EmployeeNotFound(mail).into());
    }
    state.balances.delete_by_employee(&mail).await?;

    tracing::info!(%mail, "employee offboarded");
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Employee deleted: {}", mail)
    })))
}
