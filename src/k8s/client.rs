//! Kubernetes API access for the collector

use crate::collector::ControllerKind;
use anyhow::{Context, Result, anyhow};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::core::v1::{Pod, Service};
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{Api, ApiResource, DynamicObject, ListParams, ResourceExt};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::core::GroupVersionKind;
use kube::{Client, Config};
use std::path::Path;

/// API groups Traefik has published IngressRoute under, newest first
const INGRESS_ROUTE_GROUPS: [&str; 2] = ["traefik.io", "traefik.containo.us"];

/// Namespaced, label-filtered list calls the collector needs.
#[allow(async_fn_in_trait)]
pub trait ResourceLister {
    async fn list_pods(&self, namespace: &str, selector: &str) -> Result<Vec<Pod>>;

    async fn list_services(&self, namespace: &str, selector: &str) -> Result<Vec<Service>>;

    async fn list_ingresses(&self, namespace: &str, selector: &str) -> Result<Vec<Ingress>>;

    /// Names of Traefik IngressRoutes. Errors when the CRD is not served.
    async fn list_ingress_routes(&self, namespace: &str, selector: &str) -> Result<Vec<String>>;

    /// Whether at least one workload of `kind` matches
    async fn has_controller(
        &self,
        kind: ControllerKind,
        namespace: &str,
        selector: &str,
    ) -> Result<bool>;
}

/// Cluster session built once per run
#[derive(Clone)]
pub struct KubeClient {
    client: Client,
}

impl KubeClient {
    /// Build a client from an explicit kubeconfig, a context in the ambient
    /// kubeconfig, or the inferred environment (KUBECONFIG, ~/.kube/config, in-cluster).
    pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Self> {
        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };

        let config = match kubeconfig {
            Some(path) => {
                let file = Kubeconfig::read_from(path)
                    .with_context(|| format!("Failed to read kubeconfig: {}", path.display()))?;
                Config::from_custom_kubeconfig(file, &options)
                    .await
                    .with_context(|| format!("Failed to load kubeconfig: {}", path.display()))?
            }
            None if context.is_some() => Config::from_kubeconfig(&options)
                .await
                .context("Failed to load kubeconfig context")?,
            None => Config::infer()
                .await
                .context("Failed to infer cluster config")?,
        };

        crate::log_debug!("Using API server {}", config.cluster_url);

        let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
        Ok(Self { client })
    }

    async fn any_match<K>(&self, namespace: &str, selector: &str) -> Result<bool>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>
            + Clone
            + serde::de::DeserializeOwned
            + std::fmt::Debug,
        <K as kube::Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default().labels(selector).limit(1))
            .await?;
        Ok(!list.items.is_empty())
    }
}

impl ResourceLister for KubeClient {
    async fn list_pods(&self, namespace: &str, selector: &str) -> Result<Vec<Pod>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default().labels(selector))
            .await
            .context("Failed to list pods")?;
        Ok(list.items)
    }

    async fn list_services(&self, namespace: &str, selector: &str) -> Result<Vec<Service>> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default().labels(selector))
            .await
            .context("Failed to list services")?;
        Ok(list.items)
    }

    async fn list_ingresses(&self, namespace: &str, selector: &str) -> Result<Vec<Ingress>> {
        let api: Api<Ingress> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default().labels(selector))
            .await
            .context("Failed to list ingresses")?;
        Ok(list.items)
    }

    async fn list_ingress_routes(&self, namespace: &str, selector: &str) -> Result<Vec<String>> {
        let params = ListParams::default().labels(selector);

        for group in INGRESS_ROUTE_GROUPS {
            let gvk = GroupVersionKind::gvk(group, "v1alpha1", "IngressRoute");
            let resource = ApiResource::from_gvk(&gvk);
            let api: Api<DynamicObject> =
                Api::namespaced_with(self.client.clone(), namespace, &resource);

            match api.list(&params).await {
                Ok(list) => return Ok(list.items.iter().map(|r| r.name_any()).collect()),
                Err(e) => crate::log_debug!("IngressRoute not available in {}: {}", group, e),
            }
        }

        Err(anyhow!("No IngressRoute API served by the cluster"))
    }

    async fn has_controller(
        &self,
        kind: ControllerKind,
        namespace: &str,
        selector: &str,
    ) -> Result<bool> {
        let found = match kind {
            ControllerKind::Deployment => self.any_match::<Deployment>(namespace, selector).await,
            ControllerKind::DaemonSet => self.any_match::<DaemonSet>(namespace, selector).await,
            ControllerKind::StatefulSet => self.any_match::<StatefulSet>(namespace, selector).await,
            ControllerKind::Unknown => return Ok(false),
        };
        found.with_context(|| format!("Failed to list {}s", kind.as_str().to_lowercase()))
    }
}
