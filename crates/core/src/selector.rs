//! Label selectors linking TaskRuns to their parent task

use crate::taskrun::ParentRef;
use std::collections::BTreeMap;
use std::fmt;

/// Label domain used by the Tekton controller
pub const LABEL_DOMAIN: &str = "tekton.dev";

/// Equality selector of the form `<key>=<value>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSelector {
    pub key: String,
    pub value: String,
}

impl LabelSelector {
    /// Selector matching runs of the given parent, e.g. `tekton.dev/task=foo`
    pub fn for_parent(parent: &ParentRef) -> Self {
        Self {
            key: format!("{}/{}", LABEL_DOMAIN, parent.kind.label()),
            value: parent.name.clone(),
        }
    }

    /// Check the selector against a label map
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        labels.get(&self.key).is_some_and(|v| *v == self.value)
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
