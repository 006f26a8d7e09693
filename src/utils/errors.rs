//! Fatal error reporting with actionable suggestions

use colored::Colorize;
use thiserror::Error;

/// Error shown to the user before the process exits
#[derive(Error, Debug)]
#[error("{message}")]
pub struct AppViewerError {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl AppViewerError {
    /// Create a new error with no suggestions
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    /// Add a suggestion to the error
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Display the error with suggestions
    pub fn display(&self) {
        crate::log_error!("{}", self.message);

        if !self.suggestions.is_empty() {
            eprintln!();
            eprintln!("{}", "Suggestions:".yellow().bold());
            for suggestion in &self.suggestions {
                eprintln!("  {} {}", "->".blue(), suggestion);
            }
        }
    }

    // Common error patterns

    /// No usable kubeconfig
    pub fn kubeconfig_not_found(detail: &str) -> Self {
        Self::new(format!("Could not load cluster configuration: {}", detail))
            .suggest("Check that ~/.kube/config exists or set KUBECONFIG")
            .suggest("Pass --kubeconfig <path> to point at a specific file")
            .suggest("Pass --context <name> to pick a context from the file")
    }

    /// Cluster did not answer
    pub fn cluster_unreachable(detail: &str) -> Self {
        Self::new(format!("Could not reach the cluster: {}", detail))
            .suggest("Verify network connectivity to the API server")
            .suggest("Check the current context with: kubectl config current-context")
    }

    /// RBAC refused a list call
    pub fn permission_denied(detail: &str) -> Self {
        Self::new(format!("Permission denied: {}", detail))
            .suggest("Verify you can list pods, services, ingresses and workloads in the namespace")
            .suggest("Check with: kubectl auth can-i list pods -n <namespace>")
    }

    /// Namespace does not exist
    pub fn namespace_not_found(detail: &str) -> Self {
        Self::new(format!("Namespace not found: {}", detail))
            .suggest("List namespaces with: kubectl get namespaces")
            .suggest("Pass the right one with --namespace <name>")
    }
}

/// Helper to display error and exit
pub fn display_error_and_exit(error: AppViewerError) -> ! {
    error.display();
    std::process::exit(1);
}

/// Convert an anyhow error chain to an AppViewerError when the cause is recognised
pub fn enhance_error(err: anyhow::Error) -> AppViewerError {
    let err_str = format!("{:#}", err);
    let lower = err_str.to_lowercase();

    if lower.contains("kubeconfig") || lower.contains("infer") {
        return AppViewerError::kubeconfig_not_found(&err_str);
    }

    if lower.contains("unauthorized") || lower.contains("forbidden") {
        return AppViewerError::permission_denied(&err_str);
    }

    if lower.contains("namespaces") && lower.contains("not found") {
        return AppViewerError::namespace_not_found(&err_str);
    }

    if lower.contains("connection refused")
        || lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("dns error")
    {
        return AppViewerError::cluster_unreachable(&err_str);
    }

    AppViewerError::new(err_str).suggest("Run with --debug for more details")
}
