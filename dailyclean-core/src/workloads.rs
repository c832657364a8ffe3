//! Deployments and StatefulSets of the namespace, flagged by dailyclean label

use std::sync::Arc;

use dailyclean_models::{Workload, WorkloadKind};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use tracing::debug;

use crate::config::DailycleanConfig;
use crate::error::Result;
use crate::k8s_client::Cluster;

pub struct WorkloadCatalog {
    cluster: Arc<dyn Cluster>,
    config: Arc<DailycleanConfig>,
}

impl WorkloadCatalog {
    pub fn new(cluster: Arc<dyn Cluster>, config: Arc<DailycleanConfig>) -> Self {
        Self { cluster, config }
    }

    /// Deployments first, then StatefulSets, in API order
    pub async fn list(&self) -> Result<Vec<Workload>> {
        let label = &self.config.dailyclean_label;

        let mut workloads: Vec<Workload> = self
            .cluster
            .list_deployments()
            .await?
            .iter()
            .map(|d| workload(&d.metadata, WorkloadKind::Deployment, label))
            .collect();

        workloads.extend(
            self.cluster
                .list_stateful_sets()
                .await?
                .iter()
                .map(|s| workload(&s.metadata, WorkloadKind::StatefulSet, label)),
        );

        debug!(count = workloads.len(), "Listed workloads");
        Ok(workloads)
    }
}

fn workload(metadata: &ObjectMeta, kind: WorkloadKind, label: &str) -> Workload {
    Workload {
        name: metadata.name.clone().unwrap_or_default(),
        kind,
        dailyclean_eligible: metadata
            .labels
            .as_ref()
            .is_some_and(|labels| labels.contains_key(label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{metadata, FakeCluster};
    use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};

    #[tokio::test]
    async fn test_list_flags_labelled_workloads() {
        let cluster = Arc::new(FakeCluster::new("team-a"));
        cluster.insert_stateful_set(StatefulSet {
            metadata: metadata("postgres", &[("axa.com/dailyclean", "true")]),
            ..Default::default()
        });
        cluster.insert_deployment(Deployment {
            metadata: metadata("api", &[("axa.com/dailyclean", "false")]),
            ..Default::default()
        });
        cluster.insert_deployment(Deployment {
            metadata: metadata("frontend", &[("app", "frontend")]),
            ..Default::default()
        });
        cluster.insert_stateful_set(StatefulSet {
            metadata: metadata("redis", &[]),
            ..Default::default()
        });

        let catalog = WorkloadCatalog::new(cluster.clone(), Arc::new(DailycleanConfig::default()));
        let workloads = catalog.list().await.unwrap();

        let summary: Vec<(&str, WorkloadKind, bool)> = workloads
            .iter()
            .map(|w| (w.name.as_str(), w.kind, w.dailyclean_eligible))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("api", WorkloadKind::Deployment, true),
                ("frontend", WorkloadKind::Deployment, false),
                ("postgres", WorkloadKind::StatefulSet, true),
                ("redis", WorkloadKind::StatefulSet, false),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_empty_namespace() {
        let cluster = Arc::new(FakeCluster::new("team-a"));
        let catalog = WorkloadCatalog::new(cluster, Arc::new(DailycleanConfig::default()));
        assert!(catalog.list().await.unwrap().is_empty());
    }
}
