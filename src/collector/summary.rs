//! The aggregated view of one application

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Workload kind owning the application's pods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Deployment,
    DaemonSet,
    StatefulSet,
    Unknown,
}

impl ControllerKind {
    /// Kinds probed when resolving the controller, highest priority first
    pub const SEARCH_ORDER: [ControllerKind; 3] = [
        ControllerKind::Deployment,
        ControllerKind::DaemonSet,
        ControllerKind::StatefulSet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::Deployment => "Deployment",
            ControllerKind::DaemonSet => "DaemonSet",
            ControllerKind::StatefulSet => "StatefulSet",
            ControllerKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Volumes backed by storage rather than config
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Storage {
    pub pvc: BTreeSet<String>,
    pub host_path: BTreeSet<String>,
}

impl Storage {
    /// Storage kinds with their display keys, in print order
    pub fn kinds(&self) -> [(&'static str, &BTreeSet<String>); 2] {
        [("pvc", &self.pvc), ("hostPath", &self.host_path)]
    }
}

// Debug uses the Kubernetes key names so raw output matches the table
impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("pvc", &self.pvc)
            .field("hostPath", &self.host_path)
            .finish()
    }
}

/// Fields only gathered with `--verbose`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerboseDetails {
    pub namespace: String,
    pub containers: BTreeSet<String>,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

/// Everything found for one application in one namespace.
///
/// `pods`, `services` and `ingress` keep the order the API returned them in,
/// duplicates included. Every set-typed field is deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSummary {
    pub app: String,
    pub controller: ControllerKind,
    pub pods: Vec<String>,
    pub services: Vec<String>,
    pub ingress: Vec<String>,
    pub storage: Storage,
    pub secrets: BTreeSet<String>,
    pub configs: BTreeSet<String>,
    pub nodes: BTreeSet<String>,
    pub details: Option<VerboseDetails>,
}
