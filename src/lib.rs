pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod scheduler;
pub mod store;
pub mod workflow;

use std::sync::Arc;

use sqlx::MySqlPool;

use crate::store::memory::{
    MemoryAttendanceLedger, MemoryEmployeeStore, MemoryLeaveBalanceStore, MemoryLeaveRequestLedger,
};
use crate::store::mysql::{
    MySqlAttendanceLedger, MySqlEmployeeStore, MySqlLeaveBalanceStore, MySqlLeaveRequestLedger,
};
use crate::store::{AttendanceLedger, EmployeeStore, LeaveBalanceStore, LeaveRequestLedger};
use crate::workflow::{AttendanceGenerator, LeaveWorkflow};

/// Shared handler state: the stores plus the two workflow components built
/// on top of them.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<dyn EmployeeStore>,
    pub balances: Arc<dyn LeaveBalanceStore>,
    pub workflow: LeaveWorkflow,
    pub generator: AttendanceGenerator,
}

impl AppState {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        balances: Arc<dyn LeaveBalanceStore>,
        requests: Arc<dyn LeaveRequestLedger>,
        attendance: Arc<dyn AttendanceLedger>,
    ) -> Self {
        let workflow = LeaveWorkflow::new(balances.clone(), requests);
        let generator = AttendanceGenerator::new(employees.clone(), attendance);
        Self {
            employees,
            balances,
            workflow,
            generator,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryEmployeeStore::default()),
            Arc::new(MemoryLeaveBalanceStore::default()),
            Arc::new(MemoryLeaveRequestLedger::default()),
            Arc::new(MemoryAttendanceLedger::default()),
        )
    }

    pub fn with_mysql(pool: MySqlPool) -> Self {
        Self::new(
            Arc::new(MySqlEmployeeStore::new(pool.clone())),
            Arc::new(MySqlLeaveBalanceStore::new(pool.clone())),
            Arc::new(MySqlLeaveRequestLedger::new(pool.clone())),
            Arc::new(MySqlAttendanceLedger::new(pool)),
        )
    }
}
