use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "mail": "john.doe@company.com",
        "name": "John Doe",
        "role": "Employee",
        "department": "Engineering",
        "job_role": "Backend Developer"
    })
)]
pub struct Employee {
    /// Mail address doubles as the employee identifier.
    #[schema(example = "john.doe@company.com")]
    pub mail: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "Employee")]
    pub role: Role,

    #[schema(example = "Engineering", nullable = true)]
    pub department: Option<String>,

    #[schema(example = "Backend Developer", nullable = true)]
    pub job_role: Option<String>,
}
