//! Shared Kubernetes client utilities
//!
//! [`Cluster`] is the seam between the dailyclean logic and the API server.
//! [`KubeCluster`] talks to a real cluster through `kube`; tests swap in an
//! in-memory implementation.

use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use kube::{Client, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;

/// Namespaced access to the objects dailyclean reads and writes
///
/// Lookups return `None` for missing objects and deletes of missing objects
/// succeed, so absence never surfaces as an error.
#[async_trait]
pub trait Cluster: Send + Sync {
    /// Namespace every call is scoped to
    fn namespace(&self) -> &str;

    async fn get_cron_job(&self, name: &str) -> Result<Option<CronJob>>;

    /// Create the CronJob, or replace the one already holding its name
    async fn apply_cron_job(&self, cron_job: &CronJob) -> Result<()>;

    async fn delete_cron_job(&self, name: &str) -> Result<()>;

    async fn get_job(&self, name: &str) -> Result<Option<Job>>;

    /// Create the Job; a running Job already holding its name is kept
    async fn apply_job(&self, job: &Job) -> Result<()>;

    /// Delete the Job and let its Pods be garbage collected
    async fn delete_job(&self, name: &str) -> Result<()>;

    async fn list_deployments(&self) -> Result<Vec<Deployment>>;

    async fn list_stateful_sets(&self) -> Result<Vec<StatefulSet>>;
}

/// Get a Kubernetes client
pub async fn get_k8s_client() -> Result<Client> {
    Ok(Client::try_default().await?)
}

/// [`Cluster`] backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
    namespace: String,
}

impl KubeCluster {
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    /// Connect with the ambient kubeconfig or in-cluster credentials
    ///
    /// Without an explicit namespace, the client's default namespace is used
    /// (the pod's own namespace when running in-cluster).
    pub async fn connect(namespace: Option<String>) -> Result<Self> {
        let client = get_k8s_client().await?;
        let namespace = namespace.unwrap_or_else(|| client.default_namespace().to_string());
        Ok(Self::new(client, namespace))
    }

    fn api<K>(&self) -> Api<K>
    where
        K: Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        <K as Resource>::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), &self.namespace)
    }
}

async fn get_if_exists<K>(api: &Api<K>, name: &str) -> Result<Option<K>>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    match api.get(name).await {
        Ok(obj) => Ok(Some(obj)),
        Err(kube::Error::Api(response)) if response.code == 404 => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn delete_if_exists<K>(api: &Api<K>, name: &str, params: &DeleteParams) -> Result<()>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    match api.delete(name, params).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(response)) if response.code == 404 => {
            debug!(name, "object not found, skipping delete");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Create `obj`; on a name conflict replace the existing object instead
async fn create_or_replace<K>(api: &Api<K>, obj: &K) -> Result<()>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    let name = obj.meta().name.clone().unwrap_or_default();

    match api.create(&PostParams::default(), obj).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(response)) if response.code == 409 => {
            debug!(name = %name, "object already exists, replacing");
            let current = api.get(&name).await?;
            let mut replacement = obj.clone();
            replacement.meta_mut().resource_version = current.meta().resource_version.clone();
            api.replace(&name, &PostParams::default(), &replacement).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Create `job`; a live Job already holding its name is kept as is
///
/// A Job's selector and pod template are immutable once the API server has
/// filled them in, so a running Job cannot be replaced by a freshly rendered
/// manifest. A conflicting Job that has finished or is being deleted is
/// reported as the original conflict.
async fn create_or_keep_job(api: &Api<Job>, job: &Job) -> Result<()> {
    let name = job.metadata.name.clone().unwrap_or_default();

    match api.create(&PostParams::default(), job).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(response)) if response.code == 409 => {
            match get_if_exists(api, &name).await? {
                Some(current) if is_live_job(&current) => {
                    info!(job = %name, "Job still running, keeping it");
                    Ok(())
                }
                _ => Err(kube::Error::Api(response).into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Neither finished nor on its way out
pub(crate) fn is_live_job(job: &Job) -> bool {
    let finished = job
        .status
        .as_ref()
        .is_some_and(|status| status.completion_time.is_some());
    !finished && job.metadata.deletion_timestamp.is_none()
}

#[async_trait]
impl Cluster for KubeCluster {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get_cron_job(&self, name: &str) -> Result<Option<CronJob>> {
        get_if_exists(&self.api::<CronJob>(), name).await
    }

    async fn apply_cron_job(&self, cron_job: &CronJob) -> Result<()> {
        create_or_replace(&self.api::<CronJob>(), cron_job).await
    }

    async fn delete_cron_job(&self, name: &str) -> Result<()> {
        delete_if_exists(&self.api::<CronJob>(), name, &DeleteParams::default()).await
    }

    async fn get_job(&self, name: &str) -> Result<Option<Job>> {
        get_if_exists(&self.api::<Job>(), name).await
    }

    async fn apply_job(&self, job: &Job) -> Result<()> {
        create_or_keep_job(&self.api::<Job>(), job).await
    }

    async fn delete_job(&self, name: &str) -> Result<()> {
        delete_if_exists(&self.api::<Job>(), name, &DeleteParams::background()).await
    }

    async fn list_deployments(&self) -> Result<Vec<Deployment>> {
        let list = self.api::<Deployment>().list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn list_stateful_sets(&self) -> Result<Vec<StatefulSet>> {
        let list = self.api::<StatefulSet>().list(&ListParams::default()).await?;
        Ok(list.items)
    }
}
