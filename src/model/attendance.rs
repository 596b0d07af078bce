use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Statuses the system writes itself. Manual corrections through the update
/// endpoint store whatever string HR sends, so the record keeps a plain
/// string field.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, ToSchema)]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
    Absent,
    Present,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "0c7e1f1a-3b2c-4d5e-8f9a-0b1c2d3e4f5a",
        "employee_mail": "john.doe@company.com",
        "date": "2025-06-01",
        "status": "Absent"
    })
)]
pub struct AttendanceRecord {
    pub id: String,
    #[schema(example = "john.doe@company.com")]
    pub employee_mail: String,
    #[schema(example = "2025-06-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Absent")]
    pub status: String,
}
