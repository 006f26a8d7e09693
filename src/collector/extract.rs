//! Pure extraction over a pod list. Nothing here talks to the cluster.

use k8s_openapi::api::core::v1::{EnvVar, Pod, PodSpec, Volume};
use std::collections::BTreeSet;

/// Names referenced by pod volumes, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountedValues {
    pub configs: BTreeSet<String>,
    pub secrets: BTreeSet<String>,
    pub pvc: BTreeSet<String>,
    pub host_paths: BTreeSet<String>,
}

/// A secret key an env var reads from
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecretRef {
    pub name: String,
    pub key: String,
}

/// Where an env var takes its value from, when it is not inlined
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnvSource {
    ConfigMap(String),
    Secret(SecretRef),
}

fn pod_specs(pods: &[Pod]) -> impl Iterator<Item = &PodSpec> {
    pods.iter().filter_map(|p| p.spec.as_ref())
}

/// Classify every pod volume by its first populated source.
/// Order is secret, config map, persistent volume claim, host path.
pub fn mounted_values(pods: &[Pod]) -> MountedValues {
    let mut values = MountedValues::default();

    for spec in pod_specs(pods) {
        for volume in spec.volumes.iter().flatten() {
            classify_volume(volume, &mut values);
        }
    }

    values
}

fn classify_volume(volume: &Volume, values: &mut MountedValues) {
    if let Some(secret) = &volume.secret {
        if let Some(name) = &secret.secret_name {
            values.secrets.insert(name.clone());
        }
    } else if let Some(config_map) = &volume.config_map {
        values.configs.insert(config_map.name.clone());
    } else if let Some(claim) = &volume.persistent_volume_claim {
        values.pvc.insert(claim.claim_name.clone());
    } else if let Some(host_path) = &volume.host_path {
        values.host_paths.insert(host_path.path.clone());
    }
}

/// External source of a single env var, `None` for literal or field-ref values
pub fn env_value(env: &EnvVar) -> Option<EnvSource> {
    let source = env.value_from.as_ref()?;

    if let Some(cm) = &source.config_map_key_ref {
        Some(EnvSource::ConfigMap(cm.name.clone()))
    } else {
        source.secret_key_ref.as_ref().map(|secret| {
            EnvSource::Secret(SecretRef {
                name: secret.name.clone(),
                key: secret.key.clone(),
            })
        })
    }
}

/// Distinct external env sources across all containers of all pods
pub fn pod_env_values(pods: &[Pod]) -> BTreeSet<EnvSource> {
    pod_specs(pods)
        .flat_map(|spec| spec.containers.iter())
        .flat_map(|c| c.env.iter().flatten())
        .filter_map(env_value)
        .collect()
}

/// Container names across all pods, in order, duplicates kept
pub fn container_names(pods: &[Pod]) -> Vec<String> {
    pod_specs(pods)
        .flat_map(|spec| spec.containers.iter())
        .map(|c| c.name.clone())
        .collect()
}
