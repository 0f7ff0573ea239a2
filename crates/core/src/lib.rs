//! TaskRun deletion engine
//!
//! This crate provides:
//! - TaskRun items and parent references (Task / ClusterTask)
//! - Recency ordering and keep-N retention
//! - Delete mode selection and option validation
//! - The batch deleter (bulkhead semantics, aggregated outcome)
//! - The `TaskRunStore` collaborator trait and the top-level delete flow

pub mod deleter;
pub mod error;
pub mod flow;
pub mod mode;
pub mod retention;
pub mod selector;
pub mod sort;
pub mod store;
pub mod taskrun;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

// Re-exports
pub use deleter::{Deleter, Outcome};
pub use error::{AggregateError, Failure, StoreError, ValidationError};
pub use flow::{delete_task_runs, Report};
pub use mode::{DeleteOptions, DeleteRequest, Mode};
pub use retention::RetentionPolicy;
pub use selector::LabelSelector;
pub use store::TaskRunStore;
pub use taskrun::{ParentKind, ParentRef, TaskRun};

/// Resource kind label for the items this crate deletes
pub const TASK_RUN_KIND: &str = "TaskRun";
