//! Top-level delete flow: mode → target names → deleter → report

use crate::deleter::{Deleter, Outcome};
use crate::error::{AggregateError, StoreError};
use crate::mode::{DeleteRequest, Mode};
use crate::store::{ParentLister, RefuseDelete, StoreDelete, TaskRunStore};
use crate::TASK_RUN_KIND;
use tracing::info;

/// Outcome of a delete invocation plus the success line to print
#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: Outcome,
    /// Mode-specific success message; `None` when anything failed
    pub summary: Option<String>,
}

impl Report {
    /// Aggregated per-item failures
    pub fn errors(&self) -> Option<AggregateError> {
        self.outcome.errors()
    }

    /// Convert into the invocation result
    pub fn into_result(self) -> Result<Option<String>, AggregateError> {
        match self.outcome.errors() {
            Some(err) => Err(err),
            None => Ok(self.summary),
        }
    }
}

/// Delete TaskRuns in `namespace` as described by a validated request.
///
/// Items are deleted one at a time; per-item failures are collected in the
/// report. Only a failure to list the namespace itself is returned as an
/// error, before anything was deleted.
pub async fn delete_task_runs<S>(
    store: &S,
    namespace: &str,
    request: &DeleteRequest,
) -> Result<Report, StoreError>
where
    S: TaskRunStore + ?Sized,
{
    let retention = request.retention;

    let outcome = match &request.mode {
        Mode::All => {
            let runs = store.list(namespace, None).await?;
            info!("Found {} TaskRuns in namespace {}", runs.len(), namespace);
            let names = retention.select(runs);

            Deleter::new(TASK_RUN_KIND, StoreDelete::new(store, namespace))
                .delete_all(&names)
                .await
        }
        Mode::Explicit(names) => {
            Deleter::new(TASK_RUN_KIND, StoreDelete::new(store, namespace))
                .delete_all(names)
                .await
        }
        Mode::ByParent(parent) => {
            Deleter::new(parent.kind.as_str(), RefuseDelete::new(parent.kind))
                .with_related(
                    TASK_RUN_KIND,
                    ParentLister::new(store, namespace, parent.kind),
                    StoreDelete::new(store, namespace),
                )
                .with_retention(retention)
                .delete_related(std::slice::from_ref(&parent.name))
                .await
        }
    };

    let summary = if outcome.errors().is_some() {
        None
    } else {
        success_message(request, namespace, &outcome)
    };

    Ok(Report { outcome, summary })
}

fn success_message(request: &DeleteRequest, namespace: &str, outcome: &Outcome) -> Option<String> {
    let keep = request.retention.count();

    match &request.mode {
        Mode::All if keep > 0 => Some(format!(
            "All but {} TaskRuns deleted in namespace {:?}",
            keep, namespace
        )),
        Mode::All => Some(format!("All TaskRuns deleted in namespace {:?}", namespace)),
        Mode::ByParent(parent) if keep > 0 => Some(format!(
            "All but {} TaskRuns associated with {} {:?} deleted in namespace {:?}",
            keep, parent.kind, parent.name, namespace
        )),
        Mode::ByParent(parent) => Some(format!(
            "All TaskRuns associated with {} {:?} deleted in namespace {:?}",
            parent.kind, parent.name, namespace
        )),
        Mode::Explicit(_) => outcome.summarize(),
    }
}
