//! Error taxonomy for TaskRun deletion

use thiserror::Error;

/// Invalid option combination, raised before any store call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cannot use --task and --clustertask option together")]
    ConflictingParents,

    #[error("keep option should not be lower than 0")]
    NegativeKeep,

    #[error("must provide TaskRun name(s) or use --task flag or --all flag to use delete")]
    NothingSelected,

    #[error("--all flag should not have any arguments or flags specified with it")]
    AllWithArguments,

    #[error("--keep flag should not have any arguments specified with it")]
    KeepWithArguments,
}

/// Error reported by a `TaskRunStore` call or a delete action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("taskruns.tekton.dev {0:?} not found")]
    NotFound(String),

    /// Deletion refused on purpose (parent protection)
    #[error("{0}")]
    Refused(String),

    #[error("{0}")]
    Api(String),
}

/// One failed entry of a batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// A single resource could not be deleted
    #[error("failed to delete {} {name:?}: {source}", .kind.to_lowercase())]
    Delete {
        kind: &'static str,
        name: String,
        source: StoreError,
    },

    /// Related resources of a parent could not be listed
    #[error(
        "failed to list {}s for {parent_kind} {parent:?}: {source}",
        .related_kind.to_lowercase()
    )]
    List {
        related_kind: &'static str,
        parent_kind: &'static str,
        parent: String,
        source: StoreError,
    },
}

impl Failure {
    /// Name the failure is recorded under (the resource, or the parent for list failures)
    pub fn name(&self) -> &str {
        match self {
            Failure::Delete { name, .. } => name,
            Failure::List { parent, .. } => parent,
        }
    }
}

/// All failures of a batch, surfaced once the batch has completed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.failures))]
pub struct AggregateError {
    failures: Vec<Failure>,
}

impl AggregateError {
    pub(crate) fn new(failures: Vec<Failure>) -> Self {
        Self { failures }
    }

    /// Individual failures in attempt order
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
}

fn render(failures: &[Failure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
