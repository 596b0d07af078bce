use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Caller roles as issued by the upstream identity provider. Role strings
/// arrive in arbitrary casing ("EMPLOYEE", "employee"), so parsing is
/// case-insensitive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    pub fn is_hr_or_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Hr)
    }
}
