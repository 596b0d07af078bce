pub mod attendance;
pub mod leave;

pub use attendance::AttendanceGenerator;
pub use leave::LeaveWorkflow;
