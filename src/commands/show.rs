//! Show command: collect one application and print the report

use crate::collector::{self, AppQuery};
use crate::k8s::{KubeClient, ResourceLister};
use crate::output;
use anyhow::Result;
use std::path::PathBuf;

/// Options for a single run
#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub query: AppQuery,
    pub output: String,
    pub verbose: bool,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

/// Connect to the cluster, collect and print
pub async fn show(options: ShowOptions) -> Result<()> {
    let client =
        KubeClient::connect(options.kubeconfig.as_deref(), options.context.as_deref()).await?;
    show_with(&client, &options).await
}

/// Collect through an existing lister and print
pub async fn show_with<L: ResourceLister>(lister: &L, options: &ShowOptions) -> Result<()> {
    crate::log_info!(
        "Looking up {} in namespace {}",
        options.query.selector(),
        options.query.namespace
    );

    let summary = collector::collect(lister, &options.query, options.verbose).await?;
    output::report(&summary, &options.output, options.verbose);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::fake::FakeCluster;
    use tokio_test::block_on;

    fn options(output: &str) -> ShowOptions {
        ShowOptions {
            query: AppQuery::new("default", "checkout", "app"),
            output: output.to_string(),
            verbose: false,
            kubeconfig: None,
            context: None,
        }
    }

    #[test]
    fn test_unknown_controller_still_completes() {
        let cluster = FakeCluster::default();
        assert!(block_on(show_with(&cluster, &options("pretty"))).is_ok());
    }

    #[test]
    fn test_unknown_output_is_not_fatal() {
        let cluster = FakeCluster::default();
        assert!(block_on(show_with(&cluster, &options("xml"))).is_ok());
    }

    #[test]
    fn test_collect_failure_propagates() {
        let cluster = FakeCluster {
            fail_pods: true,
            ..Default::default()
        };
        assert!(block_on(show_with(&cluster, &options("table"))).is_err());
    }
}
