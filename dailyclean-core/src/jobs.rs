//! One-shot start/stop runs

use std::sync::Arc;

use dailyclean_models::{Action, JobState};
use k8s_openapi::api::batch::v1::Job;
use tracing::{debug, info};

use crate::config::DailycleanConfig;
use crate::error::Result;
use crate::k8s_client::Cluster;
use crate::manifests::{JobParams, ManifestProvider};
use crate::names;

pub struct JobRunner {
    cluster: Arc<dyn Cluster>,
    manifests: Arc<dyn ManifestProvider>,
    config: Arc<DailycleanConfig>,
}

impl JobRunner {
    pub fn new(
        cluster: Arc<dyn Cluster>,
        manifests: Arc<dyn ManifestProvider>,
        config: Arc<DailycleanConfig>,
    ) -> Self {
        Self {
            cluster,
            manifests,
            config,
        }
    }

    /// Current view of the Job for `action`
    pub async fn state(&self, action: Action) -> Result<Option<JobState>> {
        let job = self.cluster.get_job(names::job_name(action)).await?;
        Ok(job.as_ref().map(job_state))
    }

    /// Trigger a single start/stop run
    ///
    /// A finished Job under the reserved name is deleted first because a Job's
    /// pod template cannot be changed. A Job still running is left in place.
    pub async fn run(&self, action: Action) -> Result<()> {
        let image = self.config.require_image()?;
        let name = names::job_name(action);

        match self.state(action).await? {
            Some(previous) if previous.is_finished() => {
                info!(job = name, "Deleting finished Job before rerun");
                self.cluster.delete_job(name).await?;
            }
            Some(_) => debug!(job = name, "Job still running, not deleting it"),
            None => debug!(job = name, "No previous Job"),
        }

        let job = self.manifests.render_job(&JobParams {
            action,
            image,
            service_account: &self.config.service_account_name,
        })?;

        info!(namespace = self.cluster.namespace(), job = name, "Creating Job");
        self.cluster.apply_job(&job).await?;
        info!(job = name, "Successfully created Job");

        Ok(())
    }
}

fn job_state(job: &Job) -> JobState {
    JobState {
        name: job.metadata.name.clone().unwrap_or_default(),
        completion_time: job
            .status
            .as_ref()
            .and_then(|status| status.completion_time.as_ref())
            .map(|time| time.0),
    }
}
