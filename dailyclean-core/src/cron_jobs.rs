//! Lifecycle of the start/stop CronJobs
//!
//! Each action owns exactly one CronJob, named by [`names::cron_job_name`].
//! Writes always go through create-or-replace, so re-submitting a schedule
//! replaces the object in place instead of piling up duplicates.
//!
//! None of the multi-step operations here are atomic: a concurrent writer
//! touching the same CronJob between our read and our write wins or loses
//! arbitrarily. Only dailyclean is expected to write these objects.

use std::sync::Arc;

use dailyclean_models::{Action, CronJobState};
use k8s_openapi::api::batch::v1::CronJob;
use tracing::{debug, info, warn};

use crate::config::DailycleanConfig;
use crate::cron::{self, ResolvedSchedule};
use crate::error::{DailycleanError, Result};
use crate::k8s_client::Cluster;
use crate::manifests::{CronJobParams, ManifestProvider};
use crate::names;
use crate::namespace_guard;

pub struct CronJobReconciler {
    cluster: Arc<dyn Cluster>,
    manifests: Arc<dyn ManifestProvider>,
    config: Arc<DailycleanConfig>,
}

impl CronJobReconciler {
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

    /// Create or replace the CronJob for `action` from a user cron
    ///
    /// `None` or a blank cron creates the CronJob suspended.
    pub async fn create(&self, action: Action, cron: Option<&str>) -> Result<()> {
        self.apply(action, &cron::resolve(cron)).await
    }

    /// Schedule of the CronJob for `action`, unless it is absent or suspended
    pub async fn get_schedule(&self, action: Action) -> Result<Option<String>> {
        let cron_job = self.cluster.get_cron_job(names::cron_job_name(action)).await?;
        Ok(effective_schedule(cron_job.as_ref()))
    }

    /// Current view of the CronJob for `action`
    pub async fn state(&self, action: Action) -> Result<Option<CronJobState>> {
        let cron_job = self.cluster.get_cron_job(names::cron_job_name(action)).await?;
        Ok(cron_job.as_ref().map(cron_job_state))
    }

    /// Delete both CronJobs; missing ones are skipped
    pub async fn delete_all(&self) -> Result<()> {
        for action in [Action::Stop, Action::Start] {
            let name = names::cron_job_name(action);
            if self.cluster.get_cron_job(name).await?.is_some() {
                info!(cron_job = name, "Deleting CronJob");
                self.cluster.delete_cron_job(name).await?;
            } else {
                debug!(cron_job = name, "CronJob not found, nothing to delete");
            }
        }
        Ok(())
    }

    /// Recreate both CronJobs if either runs an image other than the configured one
    ///
    /// Effective schedules are read before deletion and re-submitted, so a
    /// suspended or missing CronJob comes back suspended. Returns whether
    /// drift was found. Drift in an unauthorized namespace is reported as an
    /// error and the existing CronJobs are kept.
    pub async fn reconcile_image_drift(&self) -> Result<bool> {
        let image = self.config.require_image()?;

        let start = self.cluster.get_cron_job(names::cron_jobs::START).await?;
        let stop = self.cluster.get_cron_job(names::cron_jobs::STOP).await?;

        let drifted = image_drifted(start.as_ref(), image)? | image_drifted(stop.as_ref(), image)?;
        if !drifted {
            debug!(image, "CronJobs match the configured image");
            return Ok(false);
        }

        // recreation would be refused, so refuse before deleting anything
        namespace_guard::ensure_authorized(
            self.cluster.namespace(),
            self.config.unauthorized_namespace_regex.as_ref(),
        )?;

        let start_schedule = effective_schedule(start.as_ref());
        let stop_schedule = effective_schedule(stop.as_ref());
        warn!(
            image,
            start = ?start_schedule,
            stop = ?stop_schedule,
            "CronJob image drift detected, recreating CronJobs"
        );

        self.delete_all().await?;
        self.create(Action::Start, start_schedule.as_deref()).await?;
        self.create(Action::Stop, stop_schedule.as_deref()).await?;

        Ok(true)
    }

    /// Create the stop CronJob on the default schedule if there is none
    ///
    /// Any existing stop CronJob, suspended or not, is left alone. Returns
    /// whether one was created.
    pub async fn ensure_default_stop(&self) -> Result<bool> {
        if self.cluster.get_cron_job(names::cron_jobs::STOP).await?.is_some() {
            debug!("Stop CronJob already exists, keeping it");
            return Ok(false);
        }

        let resolved = ResolvedSchedule {
            suspend: false,
            expression: self.config.default_cron_stop.clone(),
        };
        self.apply(Action::Stop, &resolved).await?;
        Ok(true)
    }

    async fn apply(&self, action: Action, resolved: &ResolvedSchedule) -> Result<()> {
        let image = self.config.require_image()?;
        let namespace = self.cluster.namespace();
        namespace_guard::ensure_authorized(namespace, self.config.unauthorized_namespace_regex.as_ref())?;

        let cron_job = self.manifests.render_cron_job(&CronJobParams {
            action,
            image,
            service_account: &self.config.service_account_name,
            time_zone: &self.config.time_zone,
            suspend: resolved.suspend,
            schedule: &resolved.expression,
        })?;

        let name = names::cron_job_name(action);
        info!(
            namespace,
            cron_job = name,
            schedule = %resolved.expression,
            suspend = resolved.suspend,
            "Creating CronJob"
        );
        self.cluster.apply_cron_job(&cron_job).await?;
        info!(cron_job = name, "Successfully created CronJob");

        Ok(())
    }
}

fn is_suspended(cron_job: &CronJob) -> bool {
    cron_job
        .spec
        .as_ref()
        .and_then(|spec| spec.suspend)
        .unwrap_or(false)
}

/// Schedule a caller should see: `None` for a missing or suspended CronJob
fn effective_schedule(cron_job: Option<&CronJob>) -> Option<String> {
    let cron_job = cron_job?;
    if is_suspended(cron_job) {
        return None;
    }
    cron_job.spec.as_ref().map(|spec| spec.schedule.clone())
}

/// Image of the first container in the CronJob's pod template
///
/// A template without containers cannot have been written by dailyclean.
fn first_container_image(cron_job: &CronJob) -> Result<Option<String>> {
    let container = cron_job
        .spec
        .as_ref()
        .and_then(|spec| spec.job_template.spec.as_ref())
        .and_then(|job| job.template.spec.as_ref())
        .and_then(|pod| pod.containers.first())
        .ok_or_else(|| {
            DailycleanError::InvariantViolation(format!(
                "CronJob '{}' has no container in its job template",
                cron_job.metadata.name.as_deref().unwrap_or_default()
            ))
        })?;
    Ok(container.image.clone())
}

fn image_drifted(cron_job: Option<&CronJob>, image: &str) -> Result<bool> {
    match cron_job {
        Some(cron_job) => Ok(first_container_image(cron_job)?.as_deref() != Some(image)),
        None => Ok(false),
    }
}

fn cron_job_state(cron_job: &CronJob) -> CronJobState {
    CronJobState {
        name: cron_job.metadata.name.clone().unwrap_or_default(),
        schedule: cron_job
            .spec
            .as_ref()
            .map(|spec| spec.schedule.clone())
            .unwrap_or_default(),
        suspended: is_suspended(cron_job),
        container_image: first_container_image(cron_job).ok().flatten(),
    }
}
