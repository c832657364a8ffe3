//! Rendering CronJob and Job manifests for a dailyclean action

use dailyclean_models::Action;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use tera::{Context as TeraContext, Tera};

use crate::error::Result;
use crate::names;

const CRON_JOB_TEMPLATE: &str = "cronjob";
const JOB_TEMPLATE: &str = "job";

/// Inputs for a recurring start/stop CronJob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronJobParams<'a> {
    pub action: Action,
    pub image: &'a str,
    pub service_account: &'a str,
    pub time_zone: &'a str,
    pub suspend: bool,
    pub schedule: &'a str,
}

/// Inputs for a one-shot start/stop Job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobParams<'a> {
    pub action: Action,
    pub image: &'a str,
    pub service_account: &'a str,
}

/// Produces the manifests dailyclean applies to the cluster
pub trait ManifestProvider: Send + Sync {
    fn render_cron_job(&self, params: &CronJobParams<'_>) -> Result<CronJob>;

    fn render_job(&self, params: &JobParams<'_>) -> Result<Job>;
}

/// [`ManifestProvider`] backed by the YAML templates shipped with the crate
pub struct TemplateManifests {
    tera: Tera,
}

impl TemplateManifests {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            CRON_JOB_TEMPLATE,
            include_str!("templates/dailyclean-cronjob.yaml"),
        )?;
        tera.add_raw_template(JOB_TEMPLATE, include_str!("templates/dailyclean-job.yaml"))?;
        Ok(Self { tera })
    }

    fn base_context(name: &str, action: Action, image: &str, service_account: &str) -> TeraContext {
        let mut ctx = TeraContext::new();
        ctx.insert("name", name);
        ctx.insert("action", action.as_str());
        ctx.insert("image", image);
        ctx.insert("service_account", service_account);
        ctx.insert("container_name", names::CONTAINER_NAME);
        ctx.insert("managed_by", names::MANAGED_BY);
        ctx
    }
}

impl ManifestProvider for TemplateManifests {
    fn render_cron_job(&self, params: &CronJobParams<'_>) -> Result<CronJob> {
        let mut ctx = Self::base_context(
            names::cron_job_name(params.action),
            params.action,
            params.image,
            params.service_account,
        );
        ctx.insert("schedule", params.schedule);
        ctx.insert("time_zone", params.time_zone);
        ctx.insert("suspend", &params.suspend);

        let yaml = self.tera.render(CRON_JOB_TEMPLATE, &ctx)?;
        Ok(serde_yaml::from_str(&yaml)?)
    }

    fn render_job(&self, params: &JobParams<'_>) -> Result<Job> {
        let ctx = Self::base_context(
            names::job_name(params.action),
            params.action,
            params.image,
            params.service_account,
        );

        let yaml = self.tera.render(JOB_TEMPLATE, &ctx)?;
        Ok(serde_yaml::from_str(&yaml)?)
    }
}
