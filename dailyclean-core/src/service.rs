//! Entry point bundling the reconciler, the job runner and the catalog

use std::sync::Arc;

use dailyclean_models::{Action, CronJobState, JobState, Timeranges, Workload};

use crate::config::DailycleanConfig;
use crate::cron_jobs::CronJobReconciler;
use crate::error::Result;
use crate::jobs::JobRunner;
use crate::k8s_client::{Cluster, KubeCluster};
use crate::manifests::{ManifestProvider, TemplateManifests};
use crate::workloads::WorkloadCatalog;

/// Every dailyclean operation for one namespace
///
/// # Example
///
/// ```rust,no_run
/// use dailyclean_core::{DailycleanConfig, DailycleanService};
///
/// # async fn example() -> dailyclean_core::Result<()> {
/// let config = DailycleanConfig {
///     image_name: "axaguildev/dailyclean-job:latest".to_string(),
///     ..Default::default()
/// };
/// let service = DailycleanService::connect(config, None).await?;
/// service.updating_cron_job_if_needed().await?;
/// service.create_default_stop_cron_job_if_not_exist().await?;
/// # Ok(())
/// # }
/// ```
pub struct DailycleanService {
    cluster: Arc<dyn Cluster>,
    config: Arc<DailycleanConfig>,
    cron_jobs: CronJobReconciler,
    jobs: JobRunner,
    workloads: WorkloadCatalog,
}

impl DailycleanService {
    pub fn new(
        cluster: Arc<dyn Cluster>,
        manifests: Arc<dyn ManifestProvider>,
        config: DailycleanConfig,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            cron_jobs: CronJobReconciler::new(cluster.clone(), manifests.clone(), config.clone()),
            jobs: JobRunner::new(cluster.clone(), manifests, config.clone()),
            workloads: WorkloadCatalog::new(cluster.clone(), config.clone()),
            cluster,
            config,
        }
    }

    /// Connect to the cluster with the bundled manifest templates
    pub async fn connect(config: DailycleanConfig, namespace: Option<String>) -> Result<Self> {
        let cluster = KubeCluster::connect(namespace).await?;
        let manifests = TemplateManifests::new()?;
        Ok(Self::new(Arc::new(cluster), Arc::new(manifests), config))
    }

    pub fn namespace(&self) -> &str {
        self.cluster.namespace()
    }

    pub fn config(&self) -> &DailycleanConfig {
        &self.config
    }

    pub async fn create_start_cron_job(&self, cron: Option<&str>) -> Result<()> {
        self.cron_jobs.create(Action::Start, cron).await
    }

    pub async fn create_stop_cron_job(&self, cron: Option<&str>) -> Result<()> {
        self.cron_jobs.create(Action::Stop, cron).await
    }

    pub async fn get_cron_start_as_string(&self) -> Result<Option<String>> {
        self.cron_jobs.get_schedule(Action::Start).await
    }

    pub async fn get_cron_stop_as_string(&self) -> Result<Option<String>> {
        self.cron_jobs.get_schedule(Action::Stop).await
    }

    /// Both effective schedules at once
    pub async fn status(&self) -> Result<Timeranges> {
        Ok(Timeranges {
            cron_start: self.get_cron_start_as_string().await?,
            cron_stop: self.get_cron_stop_as_string().await?,
        })
    }

    pub async fn cron_job_state(&self, action: Action) -> Result<Option<CronJobState>> {
        self.cron_jobs.state(action).await
    }

    pub async fn job_state(&self, action: Action) -> Result<Option<JobState>> {
        self.jobs.state(action).await
    }

    pub async fn delete_cron_jobs(&self) -> Result<()> {
        self.cron_jobs.delete_all().await
    }

    pub async fn create_start_job(&self) -> Result<()> {
        self.jobs.run(Action::Start).await
    }

    pub async fn create_stop_job(&self) -> Result<()> {
        self.jobs.run(Action::Stop).await
    }

    pub async fn get_workloads(&self) -> Result<Vec<Workload>> {
        self.workloads.list().await
    }

    /// Recreate the CronJobs if they run a stale image; returns whether they did
    pub async fn updating_cron_job_if_needed(&self) -> Result<bool> {
        self.cron_jobs.reconcile_image_drift().await
    }

    /// Returns whether the default stop CronJob had to be created
    pub async fn create_default_stop_cron_job_if_not_exist(&self) -> Result<bool> {
        self.cron_jobs.ensure_default_stop().await
    }
}
