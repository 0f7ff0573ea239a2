//! Cluster client construction

use kube::config::{InferConfigError, KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::{Client, Config};
use std::path::PathBuf;
use thiserror::Error;

/// Where to find cluster credentials
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Explicit kubeconfig file (default: `$KUBECONFIG` or `~/.kube/config`)
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use instead of the current one
    pub context: Option<String>,
}

/// The cluster cannot be reached at all; fatal for an invocation
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to create tekton client: {0}")]
    Infer(#[from] InferConfigError),

    #[error("failed to create tekton client: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("failed to create tekton client: {0}")]
    Client(#[from] kube::Error),
}

/// Connected client plus the namespace its configuration defaults to
pub struct Connection {
    pub client: Client,
    pub default_namespace: String,
}

/// Build a client from kubeconfig or in-cluster configuration
pub async fn connect(options: &ClientOptions) -> Result<Connection, ClientError> {
    let config = match (&options.kubeconfig, &options.context) {
        (None, None) => Config::infer().await?,
        (path, context) => {
            let kube_options = KubeConfigOptions {
                context: context.clone(),
                ..Default::default()
            };
            match path {
                Some(path) => {
                    let kubeconfig = Kubeconfig::read_from(path)?;
                    Config::from_custom_kubeconfig(kubeconfig, &kube_options).await?
                }
                None => Config::from_kubeconfig(&kube_options).await?,
            }
        }
    };

    tracing::debug!("Connecting to {}", config.cluster_url);
    let default_namespace = config.default_namespace.clone();
    let client = Client::try_from(config)?;

    Ok(Connection {
        client,
        default_namespace,
    })
}
