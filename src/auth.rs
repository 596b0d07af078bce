//! Caller identity. Authentication happens upstream (gateway/token service);
//! this service trusts the identity headers it receives and only enforces
//! role-based access.

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

use crate::model::role::Role;

pub const MAIL_HEADER: &str = "X-User-Mail";
pub const ROLE_HEADER: &str = "X-User-Role";

pub struct AuthUser {
    pub mail: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let mail = match req.headers().get(MAIL_HEADER).and_then(|h| h.to_str().ok()) {
            Some(m) if !m.trim().is_empty() => m.trim().to_string(),
            _ => return ready(Err(ErrorUnauthorized("Missing identity"))),
        };

        let role = match req
            .headers()
            .get(ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|r| r.trim().parse::<Role>().ok())
        {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Missing or unknown role"))),
        };

        ready(Ok(AuthUser { mail, role }))
    }
}

impl AuthUser {
    pub fn require_hr_or_admin(&self) -> actix_web::Result<()> {
        if self.role.is_hr_or_admin() {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("HR/Admin only"))
        }
    }

    pub fn require_employee(&self) -> actix_web::Result<&str> {
        if self.role == Role::Employee {
            Ok(&self.mail)
        } else {
            Err(actix_web::error::ErrorForbidden("Employee only"))
        }
    }
}
