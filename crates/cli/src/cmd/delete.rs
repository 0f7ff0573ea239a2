//! Delete TaskRuns by name, by parent task, or across a namespace

use crate::config::{self, Config};
use crate::prompt;
use anyhow::{Context, Result};
use clap::Args;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tr_core::{delete_task_runs, DeleteOptions, DeleteRequest, TaskRunStore};
use tr_kube::{ClientOptions, KubeStore};

/// Arguments of `trprune delete`
#[derive(Args, Debug, Clone, Default)]
pub struct DeleteArgs {
    /// Names of the TaskRuns to delete
    pub names: Vec<String>,

    /// Namespace to delete TaskRuns in
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Path to the kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// The name of a Task whose TaskRuns should be deleted (does not delete the Task)
    #[arg(short = 't', long)]
    pub task: Option<String>,

    /// The name of a ClusterTask whose TaskRuns should be deleted (does not delete the ClusterTask)
    #[arg(long = "clustertask")]
    pub cluster_task: Option<String>,

    /// Delete all TaskRuns in a namespace
    #[arg(long)]
    pub all: bool,

    /// Keep n most recent number of TaskRuns
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub keep: i64,

    /// Skip the confirmation prompt
    #[arg(short = 'f', long)]
    pub force: bool,
}

impl DeleteArgs {
    /// Raw options for validation
    pub fn options(&self) -> DeleteOptions {
        DeleteOptions {
            names: self.names.clone(),
            all: self.all,
            task: self.task.clone(),
            cluster_task: self.cluster_task.clone(),
            keep: self.keep,
        }
    }

    fn client_options(&self, config: &Config) -> ClientOptions {
        ClientOptions {
            kubeconfig: self.kubeconfig.clone().or_else(|| config.cluster.kubeconfig.clone()),
            context: self.context.clone().or_else(|| config.cluster.context.clone()),
        }
    }
}

pub async fn run(args: &DeleteArgs) -> Result<()> {
    // 1. Validate options before anything touches the cluster
    let request = args.options().validate()?;

    // 2. Load configuration
    let config = config::load().context("Failed to load configuration")?;

    // 3. Connect; failure here is fatal for the whole invocation
    let connection = tr_kube::connect(&args.client_options(&config)).await?;

    let namespace = args
        .namespace
        .clone()
        .or_else(|| config.cluster.namespace.clone())
        .unwrap_or(connection.default_namespace);
    let store = KubeStore::new(connection.client, &config.cluster.api_version);

    // 4. Confirm and delete
    let force = args.force || config.delete.force;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    execute(&store, &namespace, &request, force, &mut stdin.lock(), &mut stdout).await
}

/// Confirm (unless forced), delete, and print the success line.
///
/// Per-item failures are returned as one aggregated error after the
/// whole batch ran.
pub async fn execute<S, R, W>(
    store: &S,
    namespace: &str,
    request: &DeleteRequest,
    force: bool,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: TaskRunStore + ?Sized,
    R: BufRead,
    W: Write,
{
    if !force {
        prompt::confirm(request, namespace, input, out)?;
    }

    let report = delete_task_runs(store, namespace, request)
        .await
        .context("Failed to list TaskRuns")?;

    if let Some(summary) = report.into_result()? {
        writeln!(out, "{}", summary)?;
    }

    Ok(())
}
