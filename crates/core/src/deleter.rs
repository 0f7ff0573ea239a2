//! Batch deletion with per-item failure isolation
//!
//! A [`Deleter`] binds a resource kind to the action that deletes one
//! resource of that kind. Optionally a related group is attached: a lister
//! resolving the resources that belong to a parent, and the action deleting
//! those. Every call returns a fresh [`Outcome`]; a failing item is recorded
//! and the batch moves on to the next one.

use crate::error::{AggregateError, Failure, StoreError};
use crate::retention::RetentionPolicy;
use crate::taskrun::TaskRun;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Deletes one resource by name
#[async_trait]
pub trait DeleteAction: Send + Sync {
    async fn delete(&self, name: &str) -> Result<(), StoreError>;
}

/// Resolves the resources that belong to a parent
#[async_trait]
pub trait RelatedLister: Send + Sync {
    async fn list_related(&self, parent: &str) -> Result<Vec<TaskRun>, StoreError>;
}

/// Marker for a deleter without a related group
pub struct NoRelated;

/// Related deletion group
pub struct Related<L, R> {
    kind: &'static str,
    lister: L,
    delete: R,
}

/// Batch deleter
pub struct Deleter<D, Rel = NoRelated> {
    kind: &'static str,
    delete: D,
    related: Rel,
    retention: RetentionPolicy,
}

impl<D: DeleteAction> Deleter<D> {
    /// Create a deleter for `kind` resources
    pub fn new(kind: &'static str, delete: D) -> Self {
        Self {
            kind,
            delete,
            related: NoRelated,
            retention: RetentionPolicy::default(),
        }
    }

    /// Attach a related group keyed by parent name
    pub fn with_related<L, R>(
        self,
        related_kind: &'static str,
        lister: L,
        delete: R,
    ) -> Deleter<D, Related<L, R>>
    where
        L: RelatedLister,
        R: DeleteAction,
    {
        Deleter {
            kind: self.kind,
            delete: self.delete,
            related: Related {
                kind: related_kind,
                lister,
                delete,
            },
            retention: self.retention,
        }
    }
}

impl<D: DeleteAction, Rel> Deleter<D, Rel> {
    /// Retention applied to related resources before deletion
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Resource kind handled by the primary action
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Delete every name with the primary action, one at a time.
    ///
    /// A failure never stops the batch; all names are attempted.
    pub async fn delete_all(&self, names: &[String]) -> Outcome {
        let mut outcome = Outcome::new(self.kind);

        for name in names {
            debug!("Deleting {} {}", self.kind, name);
            match self.delete.delete(name).await {
                Ok(()) => outcome.record_success(name),
                Err(source) => outcome.record_failure(Failure::Delete {
                    kind: self.kind,
                    name: name.clone(),
                    source,
                }),
            }
        }

        outcome
    }
}

impl<D, L, R> Deleter<D, Related<L, R>>
where
    D: DeleteAction,
    L: RelatedLister,
    R: DeleteAction,
{
    /// Delete the related resources of each parent.
    ///
    /// The parents themselves are never handed to any delete action. A list
    /// failure is recorded under the parent's name and only skips that
    /// parent.
    pub async fn delete_related(&self, parents: &[String]) -> Outcome {
        let related = &self.related;
        let mut outcome = Outcome::new(related.kind);

        for parent in parents {
            let runs = match related.lister.list_related(parent).await {
                Ok(runs) => runs,
                Err(source) => {
                    outcome.record_failure(Failure::List {
                        related_kind: related.kind,
                        parent_kind: self.kind,
                        parent: parent.clone(),
                        source,
                    });
                    continue;
                }
            };

            let names = self.retention.select(runs);
            debug!(
                "{} {} {}s selected for {} {}",
                names.len(),
                if self.retention.is_active() { "unretained" } else { "related" },
                related.kind,
                self.kind,
                parent
            );

            for name in names.iter().filter(|n| *n != parent) {
                debug!("Deleting {} {}", related.kind, name);
                match related.delete.delete(name).await {
                    Ok(()) => outcome.record_success(name),
                    Err(source) => outcome.record_failure(Failure::Delete {
                        kind: related.kind,
                        name: name.clone(),
                        source,
                    }),
                }
            }
        }

        outcome
    }
}

/// Result of one batch: every attempted name is on exactly one side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    kind: &'static str,
    succeeded: Vec<String>,
    failed: Vec<Failure>,
}

impl Outcome {
    /// Empty outcome for `kind` resources
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    fn record_success(&mut self, name: &str) {
        self.succeeded.push(name.to_string());
    }

    fn record_failure(&mut self, failure: Failure) {
        warn!("{}", failure);
        self.failed.push(failure);
    }

    /// Names deleted, in attempt order
    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    /// Failures, in attempt order
    pub fn failed(&self) -> &[Failure] {
        &self.failed
    }

    /// Whether `name` is recorded as failed
    pub fn is_failed(&self, name: &str) -> bool {
        self.failed.iter().any(|f| f.name() == name)
    }

    /// Aggregated failures, `None` when the batch fully succeeded
    pub fn errors(&self) -> Option<AggregateError> {
        if self.failed.is_empty() {
            None
        } else {
            Some(AggregateError::new(self.failed.clone()))
        }
    }

    /// Itemized success line, e.g. `TaskRuns deleted: "a", "b"`.
    ///
    /// Suppressed entirely when any item failed, even if others succeeded.
    pub fn summarize(&self) -> Option<String> {
        if !self.failed.is_empty() || self.succeeded.is_empty() {
            return None;
        }
        Some(format!("{}s deleted: {}", self.kind, quoted_list(&self.succeeded)))
    }
}

/// Render names as `"a", "b"`
pub fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("{:?}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taskrun::{ParentKind, ParentRef};
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;

    /// Records every call; fails the configured names
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<String>>,
        failing: Vec<String>,
    }

    impl Recording {
        fn failing(names: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failing: names.iter().map(|s| s.to_string()).collect(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl<'a> DeleteAction for &'a Recording {
        async fn delete(&self, name: &str) -> Result<(), StoreError> {
            self.calls.lock().push(name.to_string());
            if self.failing.iter().any(|f| f == name) {
                Err(StoreError::Api("boom".to_string()))
            } else {
                Ok(())
            }
        }
    }

    /// Refusing primary action that records its calls
    #[derive(Default)]
    struct RecordingRefusal(Mutex<Vec<String>>);

    #[async_trait]
    impl<'a> DeleteAction for &'a RecordingRefusal {
        async fn delete(&self, name: &str) -> Result<(), StoreError> {
            self.0.lock().push(name.to_string());
            Err(StoreError::Refused("the Task should not be deleted".to_string()))
        }
    }

    struct Refuse;

    #[async_trait]
    impl DeleteAction for Refuse {
        async fn delete(&self, _name: &str) -> Result<(), StoreError> {
            Err(StoreError::Refused("the Task should not be deleted".to_string()))
        }
    }

    struct FixedLister {
        runs: Vec<TaskRun>,
        failing_parent: Option<&'static str>,
    }

    #[async_trait]
    impl RelatedLister for FixedLister {
        async fn list_related(&self, parent: &str) -> Result<Vec<TaskRun>, StoreError> {
            if self.failing_parent == Some(parent) {
                return Err(StoreError::Api("forbidden".to_string()));
            }
            Ok(self
                .runs
                .iter()
                .filter(|r| r.parent_name == parent)
                .cloned()
                .collect())
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_of(name: &str, parent: &str, secs: i64) -> TaskRun {
        TaskRun::new(name)
            .with_parent(&ParentRef::new(ParentKind::Task, parent))
            .started_at(Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let action = Recording::failing(&["b"]);
        let deleter = Deleter::new("TaskRun", &action);

        let outcome = deleter.delete_all(&names(&["a", "b", "c"])).await;

        assert_eq!(action.calls(), names(&["a", "b", "c"]));
        assert_eq!(outcome.succeeded(), names(&["a", "c"]).as_slice());
        assert_eq!(outcome.failed().len(), 1);
        assert!(outcome.is_failed("b"));
        assert!(!outcome.is_failed("a"));
    }

    #[tokio::test]
    async fn test_errors_only_on_failure() {
        let action = Recording::default();
        let outcome = Deleter::new("TaskRun", &action)
            .delete_all(&names(&["a", "b"]))
            .await;
        assert!(outcome.errors().is_none());
        assert_eq!(outcome.summarize().unwrap(), "TaskRuns deleted: \"a\", \"b\"");

        let action = Recording::failing(&["a"]);
        let outcome = Deleter::new("TaskRun", &action)
            .delete_all(&names(&["a", "b"]))
            .await;
        let err = outcome.errors().unwrap();
        assert_eq!(err.to_string(), "failed to delete taskrun \"a\": boom");
        // partial success is not enumerated
        assert!(outcome.summarize().is_none());
    }

    #[tokio::test]
    async fn test_empty_batch_reports_nothing() {
        let action = Recording::default();
        let outcome = Deleter::new("TaskRun", &action).delete_all(&[]).await;
        assert!(outcome.errors().is_none());
        assert!(outcome.summarize().is_none());
        assert!(action.calls().is_empty());
    }

    #[tokio::test]
    async fn test_related_never_deletes_parent() {
        let primary = RecordingRefusal::default();
        let related = Recording::failing(&["tr2"]);
        let lister = FixedLister {
            runs: vec![
                run_of("tr1", "taskFoo", 1),
                run_of("tr2", "taskFoo", 2),
                // same name as the parent
                run_of("taskFoo", "taskFoo", 3),
            ],
            failing_parent: None,
        };

        let deleter = Deleter::new("Task", &primary).with_related("TaskRun", lister, &related);
        let outcome = deleter.delete_related(&names(&["taskFoo"])).await;

        assert!(primary.0.lock().is_empty());
        assert_eq!(related.calls(), names(&["tr1", "tr2"]));
        assert_eq!(outcome.succeeded(), names(&["tr1"]).as_slice());
        assert!(outcome.is_failed("tr2"));
    }

    #[tokio::test]
    async fn test_related_applies_retention() {
        let related = Recording::default();
        let lister = FixedLister {
            runs: vec![
                run_of("tr1", "foo", 100),
                run_of("tr3", "foo", 300),
                run_of("tr2", "foo", 200),
            ],
            failing_parent: None,
        };

        let outcome = Deleter::new("Task", Refuse)
            .with_related("TaskRun", lister, &related)
            .with_retention(RetentionPolicy::keep(1))
            .delete_related(&names(&["foo"]))
            .await;

        assert_eq!(related.calls(), names(&["tr2", "tr1"]));
        assert_eq!(outcome.summarize().unwrap(), "TaskRuns deleted: \"tr2\", \"tr1\"");
    }

    #[tokio::test]
    async fn test_list_failure_recorded_per_parent() {
        let related = Recording::default();
        let lister = FixedLister {
            runs: vec![run_of("tr1", "foo", 1), run_of("tr2", "bar", 2)],
            failing_parent: Some("foo"),
        };

        let outcome = Deleter::new("Task", Refuse)
            .with_related("TaskRun", lister, &related)
            .delete_related(&names(&["foo", "bar"]))
            .await;

        assert_eq!(related.calls(), names(&["tr2"]));
        assert!(outcome.is_failed("foo"));
        assert_eq!(outcome.succeeded(), names(&["tr2"]).as_slice());
        assert_eq!(
            outcome.errors().unwrap().to_string(),
            "failed to list taskruns for Task \"foo\": forbidden"
        );
    }

    #[tokio::test]
    async fn test_primary_refusal_is_reported() {
        let outcome = Deleter::new("Task", Refuse).delete_all(&names(&["foo"])).await;
        assert_eq!(
            outcome.errors().unwrap().to_string(),
            "failed to delete task \"foo\": the Task should not be deleted"
        );
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list(&names(&["a"])), "\"a\"");
        assert_eq!(quoted_list(&names(&["a", "b"])), "\"a\", \"b\"");
    }
}
