//! kubectl-appviewer - show all resources related to an app

use appviewer::collector::AppQuery;
use appviewer::commands::show::{self, ShowOptions};
use appviewer::config::Settings;
use appviewer::utils::{self, display_error_and_exit, enhance_error};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kubectl-appviewer")]
#[command(author, version, about = "Show all resources related to an app", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Application name, matched against the label value
    name: String,

    /// Set namespace (default: "default")
    #[arg(short, long)]
    namespace: Option<String>,

    /// Define label to search against (default: "app")
    #[arg(short, long)]
    label: Option<String>,

    /// Show detailed information of resources
    #[arg(short = 'a', long)]
    verbose: bool,

    /// Format plugin output: raw, json, table, pretty (default: table)
    #[arg(short, long)]
    output: Option<String>,

    /// Display debug information
    #[arg(short, long)]
    debug: bool,

    /// Path to kubeconfig file (default: KUBECONFIG or ~/.kube/config)
    #[arg(long)]
    kubeconfig: Option<String>,

    /// Kubeconfig context to use
    #[arg(long)]
    context: Option<String>,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    utils::logger::init(cli.debug);

    let settings = Settings::load();
    settings.colors.apply();

    let defaults = settings
        .defaults
        .merged(cli.namespace, cli.label, cli.output);

    let options = ShowOptions {
        query: AppQuery::new(defaults.namespace, cli.name, defaults.label),
        output: defaults.output,
        verbose: cli.verbose,
        kubeconfig: cli.kubeconfig.map(PathBuf::from),
        context: cli.context,
    };

    if let Err(e) = show::show(options).await {
        display_error_and_exit(enhance_error(e));
    }
}
