//! Kubernetes-backed TaskRun store
//!
//! TaskRuns are accessed through the dynamic API for `tekton.dev`, so no
//! generated Tekton types are needed.

pub mod client;
mod decode;

pub use client::{connect, ClientError, ClientOptions, Connection};

use async_trait::async_trait;
use kube::api::{Api, DeleteParams, ListParams};
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use kube::Client;
use tr_core::{LabelSelector, StoreError, TaskRun, TaskRunStore};

/// API group serving TaskRuns
pub const TEKTON_GROUP: &str = "tekton.dev";

/// Supported `tekton.dev` API versions
pub const API_VERSIONS: &[&str] = &["v1", "v1beta1"];

/// Dynamic resource description for TaskRuns at the given API version
pub fn task_run_resource(version: &str) -> ApiResource {
    let gvk = GroupVersionKind::gvk(TEKTON_GROUP, version, tr_core::TASK_RUN_KIND);
    ApiResource::from_gvk_with_plural(&gvk, "taskruns")
}

/// TaskRun store talking to a cluster
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
    resource: ApiResource,
}

impl KubeStore {
    /// Create a store for TaskRuns served at `tekton.dev/<version>`
    pub fn new(client: Client, version: &str) -> Self {
        Self {
            client,
            resource: task_run_resource(version),
        }
    }

    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.resource)
    }
}

#[async_trait]
impl TaskRunStore for KubeStore {
    async fn list(
        &self,
        namespace: &str,
        selector: Option<&LabelSelector>,
    ) -> Result<Vec<TaskRun>, StoreError> {
        let mut params = ListParams::default();
        if let Some(selector) = selector {
            params = params.labels(&selector.to_string());
        }

        let list = self
            .api(namespace)
            .list(&params)
            .await
            .map_err(|e| StoreError::Api(e.to_string()))?;

        tracing::debug!("Listed {} TaskRuns in {}", list.items.len(), namespace);
        Ok(list.items.iter().map(decode::task_run).collect())
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        match self.api(namespace).delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(resp)) if resp.code == 404 => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(StoreError::Api(e.to_string())),
        }
    }
}
