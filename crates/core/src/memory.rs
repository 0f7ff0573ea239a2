//! In-memory `TaskRunStore` with call recording and failure injection

use crate::error::StoreError;
use crate::selector::LabelSelector;
use crate::store::TaskRunStore;
use crate::taskrun::TaskRun;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct State {
    runs: Vec<TaskRun>,
    deleted: Vec<(String, String)>,
    delete_calls: Vec<String>,
    list_calls: Vec<Option<String>>,
    delete_failures: HashMap<String, String>,
    list_failure: Option<String>,
}

/// TaskRun store backed by a vector; namespaces are recorded but not partitioned
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create a store holding the given runs
    pub fn new(runs: Vec<TaskRun>) -> Self {
        Self {
            state: Mutex::new(State {
                runs,
                ..State::default()
            }),
        }
    }

    /// Make every delete of `name` fail with an API error
    pub fn fail_delete(self, name: &str, reason: &str) -> Self {
        self.state
            .lock()
            .delete_failures
            .insert(name.to_string(), reason.to_string());
        self
    }

    /// Make every list call fail with an API error
    pub fn fail_list(self, reason: &str) -> Self {
        self.state.lock().list_failure = Some(reason.to_string());
        self
    }

    /// Names still present in the store
    pub fn names(&self) -> Vec<String> {
        self.state.lock().runs.iter().map(|r| r.name.clone()).collect()
    }

    /// Successful deletions as `(namespace, name)` in call order
    pub fn deleted(&self) -> Vec<(String, String)> {
        self.state.lock().deleted.clone()
    }

    /// Every name passed to `delete`, successful or not
    pub fn delete_calls(&self) -> Vec<String> {
        self.state.lock().delete_calls.clone()
    }

    /// Rendered selector of every `list` call (`None` for unfiltered lists)
    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.state.lock().list_calls.clone()
    }
}

#[async_trait]
impl TaskRunStore for MemoryStore {
    async fn list(
        &self,
        _namespace: &str,
        selector: Option<&LabelSelector>,
    ) -> Result<Vec<TaskRun>, StoreError> {
        let mut state = self.state.lock();
        state.list_calls.push(selector.map(ToString::to_string));

        if let Some(reason) = &state.list_failure {
            return Err(StoreError::Api(reason.clone()));
        }

        Ok(state
            .runs
            .iter()
            .filter(|r| selector.map_or(true, |s| s.matches(&r.labels)))
            .cloned()
            .collect())
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.delete_calls.push(name.to_string());

        if let Some(reason) = state.delete_failures.get(name) {
            return Err(StoreError::Api(reason.clone()));
        }

        let before = state.runs.len();
        state.runs.retain(|r| r.name != name);
        if state.runs.len() == before {
            return Err(StoreError::NotFound(name.to_string()));
        }

        state.deleted.push((namespace.to_string(), name.to_string()));
        Ok(())
    }
}
