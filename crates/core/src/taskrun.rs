//! TaskRun items and parent references

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of resource a TaskRun was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentKind {
    /// Namespaced Task
    Task,
    /// Cluster-scoped ClusterTask
    ClusterTask,
}

impl ParentKind {
    /// Resource kind name as shown to users ("Task", "ClusterTask")
    pub fn as_str(&self) -> &'static str {
        match self {
            ParentKind::Task => "Task",
            ParentKind::ClusterTask => "ClusterTask",
        }
    }

    /// Label name under the `tekton.dev/` domain that links runs to this kind
    pub fn label(&self) -> &'static str {
        match self {
            ParentKind::Task => "task",
            ParentKind::ClusterTask => "clusterTask",
        }
    }

    /// Map a `taskRef.kind` value to a parent kind.
    ///
    /// An empty kind defaults to Task, matching how the controller
    /// resolves references.
    pub fn from_ref_kind(kind: &str) -> Self {
        match kind {
            "ClusterTask" => ParentKind::ClusterTask,
            _ => ParentKind::Task,
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named Task or ClusterTask whose runs are targeted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub kind: ParentKind,
    pub name: String,
}

impl ParentRef {
    pub fn new(kind: ParentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// A TaskRun as seen by the deletion engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRun {
    /// Resource name, unique within a namespace
    pub name: String,
    /// Kind of the referenced task, `None` for runs with an embedded spec
    pub parent_kind: Option<ParentKind>,
    /// Name of the referenced task (empty when unknown)
    pub parent_name: String,
    /// When the run started; `None` while still pending
    pub start_time: Option<DateTime<Utc>>,
    /// Resource labels
    pub labels: BTreeMap<String, String>,
}

impl TaskRun {
    /// Create a TaskRun with no parent and no start time
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_kind: None,
            parent_name: String::new(),
            start_time: None,
            labels: BTreeMap::new(),
        }
    }

    /// Set the start time
    pub fn started_at(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Reference a parent and add the label the controller would set for it.
    ///
    /// ClusterTask runs carry both the `task` and `clusterTask` labels.
    pub fn with_parent(mut self, parent: &ParentRef) -> Self {
        self.parent_kind = Some(parent.kind);
        self.parent_name = parent.name.clone();
        self.labels.insert(
            format!("{}/{}", crate::selector::LABEL_DOMAIN, ParentKind::Task.label()),
            parent.name.clone(),
        );
        if parent.kind == ParentKind::ClusterTask {
            self.labels.insert(
                format!("{}/{}", crate::selector::LABEL_DOMAIN, parent.kind.label()),
                parent.name.clone(),
            );
        }
        self
    }

    /// Whether this run references a parent of the given kind
    pub fn is_run_of(&self, kind: ParentKind) -> bool {
        self.parent_kind == Some(kind)
    }
}
