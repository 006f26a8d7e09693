//! Resource collection for one application
//!
//! Every query is scoped to a namespace and a `<label>=<app>` selector and
//! runs to completion before the next one starts. Transport failures are
//! returned to the caller untouched apart from context; the IngressRoute
//! lookup is the one best-effort call.

pub mod extract;
pub mod summary;

pub use extract::{EnvSource, MountedValues, SecretRef};
pub use summary::{ApplicationSummary, ControllerKind, Storage, VerboseDetails};

use crate::k8s::ResourceLister;
use anyhow::Result;
use k8s_openapi::api::core::v1::Pod;
use std::collections::{BTreeMap, BTreeSet};

/// What to look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppQuery {
    pub namespace: String,
    pub app: String,
    pub label: String,
}

impl AppQuery {
    pub fn new(
        namespace: impl Into<String>,
        app: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            app: app.into(),
            label: label.into(),
        }
    }

    /// Label selector matching the application
    pub fn selector(&self) -> String {
        format!("{}={}", self.label, self.app)
    }
}

/// Query the cluster and build the summary for `query.app`
pub async fn collect<L: ResourceLister>(
    lister: &L,
    query: &AppQuery,
    verbose: bool,
) -> Result<ApplicationSummary> {
    let namespace = query.namespace.as_str();
    let selector = query.selector();
    crate::log_debug!("Collecting resources in {} matching {}", namespace, selector);

    let pods = lister.list_pods(namespace, &selector).await?;
    crate::log_debug!("Found {} pods", pods.len());

    let services: Vec<String> = lister
        .list_services(namespace, &selector)
        .await?
        .into_iter()
        .map(|s| s.metadata.name.unwrap_or_default())
        .collect();
    crate::log_debug!("Found {} services", services.len());

    let mut ingress: Vec<String> = lister
        .list_ingresses(namespace, &selector)
        .await?
        .into_iter()
        .map(|i| i.metadata.name.unwrap_or_default())
        .collect();
    match lister.list_ingress_routes(namespace, &selector).await {
        Ok(routes) => ingress.extend(routes),
        Err(e) => crate::log_debug!("Skipping IngressRoutes: {:#}", e),
    }
    crate::log_debug!("Found {} ingress resources", ingress.len());

    let mounted = extract::mounted_values(&pods);
    let controller = resolve_controller(lister, query, &selector).await?;

    let details = verbose.then(|| verbose_details(&pods, namespace));

    Ok(ApplicationSummary {
        app: query.app.clone(),
        controller,
        pods: pods
            .iter()
            .map(|p| p.metadata.name.clone().unwrap_or_default())
            .collect(),
        services,
        ingress,
        storage: Storage {
            pvc: mounted.pvc,
            host_path: mounted.host_paths,
        },
        secrets: mounted.secrets,
        configs: mounted.configs,
        nodes: pods
            .iter()
            .filter_map(|p| p.spec.as_ref()?.node_name.clone())
            .collect(),
        details,
    })
}

/// First controller kind with a matching workload, `Unknown` when none match
async fn resolve_controller<L: ResourceLister>(
    lister: &L,
    query: &AppQuery,
    selector: &str,
) -> Result<ControllerKind> {
    for kind in ControllerKind::SEARCH_ORDER {
        if lister.has_controller(kind, &query.namespace, selector).await? {
            crate::log_debug!("Controller for {} is a {}", query.app, kind);
            return Ok(kind);
        }
    }

    crate::log_warn!("Could not find controller for {}", query.app);
    Ok(ControllerKind::Unknown)
}

/// Later pods overwrite earlier ones on label or annotation key collision
fn verbose_details(pods: &[Pod], namespace: &str) -> VerboseDetails {
    let mut labels = BTreeMap::new();
    let mut annotations = BTreeMap::new();

    for pod in pods {
        if let Some(l) = &pod.metadata.labels {
            labels.extend(l.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(a) = &pod.metadata.annotations {
            annotations.extend(a.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    VerboseDetails {
        namespace: namespace.to_string(),
        containers: extract::container_names(pods)
            .into_iter()
            .collect::<BTreeSet<_>>(),
        labels,
        annotations,
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use anyhow::anyhow;
    use k8s_openapi::api::core::v1::Service;
    use k8s_openapi::api::networking::v1::Ingress;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::cell::RefCell;

    /// In-memory cluster holding the objects that already match the selector
    #[derive(Default)]
    pub struct FakeCluster {
        pub pods: Vec<Pod>,
        pub services: Vec<String>,
        pub ingresses: Vec<String>,
        pub ingress_routes: Option<Vec<String>>,
        pub controllers: Vec<ControllerKind>,
        pub fail_pods: bool,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeCluster {
        fn record(&self, call: &str, namespace: &str, selector: &str) {
            self.calls
                .borrow_mut()
                .push(format!("{} {} {}", call, namespace, selector));
        }
    }

    fn meta(name: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    impl ResourceLister for FakeCluster {
        async fn list_pods(&self, namespace: &str, selector: &str) -> Result<Vec<Pod>> {
            self.record("pods", namespace, selector);
            if self.fail_pods {
                return Err(anyhow!("Failed to list pods: connection refused"));
            }
            Ok(self.pods.clone())
        }

        async fn list_services(&self, namespace: &str, selector: &str) -> Result<Vec<Service>> {
            self.record("services", namespace, selector);
            Ok(self
                .services
                .iter()
                .map(|n| Service {
                    metadata: meta(n),
                    ..Default::default()
                })
                .collect())
        }

        async fn list_ingresses(&self, namespace: &str, selector: &str) -> Result<Vec<Ingress>> {
            self.record("ingresses", namespace, selector);
            Ok(self
                .ingresses
                .iter()
                .map(|n| Ingress {
                    metadata: meta(n),
                    ..Default::default()
                })
                .collect())
        }

        async fn list_ingress_routes(
            &self,
            namespace: &str,
            selector: &str,
        ) -> Result<Vec<String>> {
            self.record("ingressroutes", namespace, selector);
            self.ingress_routes
                .clone()
                .ok_or_else(|| anyhow!("the server could not find the requested resource"))
        }

        async fn has_controller(
            &self,
            kind: ControllerKind,
            namespace: &str,
            selector: &str,
        ) -> Result<bool> {
            self.record(kind.as_str(), namespace, selector);
            Ok(self.controllers.contains(&kind))
        }
    }
}
