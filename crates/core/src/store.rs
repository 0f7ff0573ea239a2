//! Backing store collaborator and the delete/list actions built on it

use crate::deleter::{DeleteAction, RelatedLister};
use crate::error::StoreError;
use crate::selector::LabelSelector;
use crate::taskrun::{ParentKind, ParentRef, TaskRun};
use async_trait::async_trait;

/// Access to the TaskRuns of a cluster
#[async_trait]
pub trait TaskRunStore: Send + Sync {
    /// List TaskRuns in a namespace, optionally restricted by a label selector
    async fn list(
        &self,
        namespace: &str,
        selector: Option<&LabelSelector>,
    ) -> Result<Vec<TaskRun>, StoreError>;

    /// Delete a single TaskRun
    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError>;
}

/// Deletes TaskRuns by name through a store
pub struct StoreDelete<'a, S: ?Sized> {
    store: &'a S,
    namespace: &'a str,
}

impl<'a, S: TaskRunStore + ?Sized> StoreDelete<'a, S> {
    pub fn new(store: &'a S, namespace: &'a str) -> Self {
        Self { store, namespace }
    }
}

#[async_trait]
impl<S: TaskRunStore + ?Sized> DeleteAction for StoreDelete<'_, S> {
    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.store.delete(self.namespace, name).await
    }
}

/// Refuses every deletion; bound as the primary action for a parent
/// so the parent itself can never be removed
pub struct RefuseDelete {
    kind: ParentKind,
}

impl RefuseDelete {
    pub fn new(kind: ParentKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl DeleteAction for RefuseDelete {
    async fn delete(&self, _name: &str) -> Result<(), StoreError> {
        Err(StoreError::Refused(format!(
            "the {} should not be deleted",
            self.kind
        )))
    }
}

/// Lists the TaskRuns created from a named Task or ClusterTask
pub struct ParentLister<'a, S: ?Sized> {
    store: &'a S,
    namespace: &'a str,
    kind: ParentKind,
}

impl<'a, S: TaskRunStore + ?Sized> ParentLister<'a, S> {
    pub fn new(store: &'a S, namespace: &'a str, kind: ParentKind) -> Self {
        Self {
            store,
            namespace,
            kind,
        }
    }
}

#[async_trait]
impl<S: TaskRunStore + ?Sized> RelatedLister for ParentLister<'_, S> {
    async fn list_related(&self, parent: &str) -> Result<Vec<TaskRun>, StoreError> {
        let selector = LabelSelector::for_parent(&ParentRef::new(self.kind, parent));
        tracing::debug!("Listing TaskRuns with selector {}", selector);

        let runs = self.store.list(self.namespace, Some(&selector)).await?;

        // ClusterTask runs also carry the task label
        if self.kind == ParentKind::Task {
            return Ok(runs
                .into_iter()
                .filter(|r| r.is_run_of(ParentKind::Task))
                .collect());
        }
        Ok(runs)
    }
}
