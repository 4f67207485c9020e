pub mod build_job;
pub mod copy_job;

use crate::services::core::operation_lock::OperationLock;

/// Guard state a shell keeps for the lifetime of the app.
///
/// One copy run and one build run may be active at a time; the two kinds
/// hold independent locks and never contend with each other.
#[derive(Default)]
pub struct JobLocks {
    pub copy: OperationLock,
    pub build: OperationLock,
}
