//! Delete mode selection and option validation

use crate::deleter::quoted_list;
use crate::error::ValidationError;
use crate::retention::RetentionPolicy;
use crate::taskrun::{ParentKind, ParentRef};

/// Which TaskRuns a delete invocation targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Every TaskRun in the namespace
    All,
    /// TaskRuns created from a Task or ClusterTask
    ByParent(ParentRef),
    /// Exactly the given names, no retention applied
    Explicit(Vec<String>),
}

/// Raw delete options as given on the command line
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub names: Vec<String>,
    pub all: bool,
    pub task: Option<String>,
    pub cluster_task: Option<String>,
    pub keep: i64,
}

/// Validated delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub mode: Mode,
    pub retention: RetentionPolicy,
}

/// Pick the delete mode; first match wins.
///
/// A retention count without a parent trims the whole namespace.
pub fn select_mode(
    names: &[String],
    all: bool,
    parent: Option<&ParentRef>,
    retention: RetentionPolicy,
) -> Mode {
    let parent = parent.filter(|p| !p.name.is_empty());
    let all = all || (retention.is_active() && parent.is_none());

    if all {
        Mode::All
    } else if let Some(parent) = parent {
        Mode::ByParent(parent.clone())
    } else {
        Mode::Explicit(names.to_vec())
    }
}

impl DeleteOptions {
    /// Parent reference from `--task` / `--clustertask`, ignoring empty names
    fn parent(&self) -> Result<Option<ParentRef>, ValidationError> {
        let task = self.task.as_deref().filter(|s| !s.is_empty());
        let cluster_task = self.cluster_task.as_deref().filter(|s| !s.is_empty());

        match (task, cluster_task) {
            (Some(_), Some(_)) => Err(ValidationError::ConflictingParents),
            (Some(name), None) => Ok(Some(ParentRef::new(ParentKind::Task, name))),
            (None, Some(name)) => Ok(Some(ParentRef::new(ParentKind::ClusterTask, name))),
            (None, None) => Ok(None),
        }
    }

    /// Validate the options and select the delete mode.
    ///
    /// Runs before any store is contacted; a failure here means nothing
    /// was deleted.
    pub fn validate(&self) -> Result<DeleteRequest, ValidationError> {
        // 1. Parent flags are mutually exclusive
        let parent = self.parent()?;

        // 2. Retention count must be non-negative
        let retention = RetentionPolicy::from_count(self.keep)?;

        // 3. Something must be selected
        let forced_all = retention.is_active() && parent.is_none();
        if self.names.is_empty() && parent.is_none() && !self.all && !forced_all {
            return Err(ValidationError::NothingSelected);
        }

        // 4. Namespace-wide deletion takes no names
        if self.all && (!self.names.is_empty() || parent.is_some()) {
            return Err(ValidationError::AllWithArguments);
        }
        if forced_all && !self.names.is_empty() {
            return Err(ValidationError::KeepWithArguments);
        }

        let mode = select_mode(&self.names, self.all, parent.as_ref(), retention);
        tracing::info!("Selected delete mode {:?} (keep {})", mode, retention.count());

        Ok(DeleteRequest { mode, retention })
    }
}

impl DeleteRequest {
    /// Question asked before deleting anything
    pub fn confirmation_prompt(&self, namespace: &str) -> String {
        let keeping = if self.retention.is_active() {
            format!(" keeping {} TaskRuns", self.retention.count())
        } else {
            String::new()
        };

        match &self.mode {
            Mode::All => format!(
                "Are you sure you want to delete all TaskRuns in namespace {:?}{} (y/n): ",
                namespace, keeping
            ),
            Mode::ByParent(parent) => format!(
                "Are you sure you want to delete all TaskRuns related to {} {:?}{} (y/n): ",
                parent.kind, parent.name, keeping
            ),
            Mode::Explicit(names) => format!(
                "Are you sure you want to delete TaskRun(s) {} (y/n): ",
                quoted_list(names)
            ),
        }
    }

    /// Message used when the user declines
    pub fn cancel_message(&self) -> String {
        match &self.mode {
            Mode::Explicit(names) => format!("canceled deleting TaskRun(s) {}", quoted_list(names)),
            Mode::ByParent(parent) => format!(
                "canceled deleting TaskRuns related to {} {:?}",
                parent.kind, parent.name
            ),
            Mode::All => "canceled deleting TaskRuns".to_string(),
        }
    }
}
