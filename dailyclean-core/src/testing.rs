//! In-memory [`Cluster`] used by the unit tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, CronJobSpec, Job, JobSpec, JobStatus, JobTemplateSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};

use crate::error::Result;
use crate::k8s_client::{is_live_job, Cluster};

/// Mutating call observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    ApplyCronJob(String),
    DeleteCronJob(String),
    ApplyJob(String),
    DeleteJob(String),
}

#[derive(Default)]
struct State {
    cron_jobs: BTreeMap<String, CronJob>,
    jobs: BTreeMap<String, Job>,
    deployments: Vec<Deployment>,
    stateful_sets: Vec<StatefulSet>,
    ops: Vec<Op>,
}

pub struct FakeCluster {
    namespace: String,
    state: Mutex<State>,
}

impl FakeCluster {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn insert_cron_job(&self, cron_job: CronJob) {
        let name = cron_job.metadata.name.clone().unwrap_or_default();
        self.state.lock().unwrap().cron_jobs.insert(name, cron_job);
    }

    pub fn insert_job(&self, job: Job) {
        let name = job.metadata.name.clone().unwrap_or_default();
        self.state.lock().unwrap().jobs.insert(name, job);
    }

    pub fn insert_deployment(&self, deployment: Deployment) {
        self.state.lock().unwrap().deployments.push(deployment);
    }

    pub fn insert_stateful_set(&self, stateful_set: StatefulSet) {
        self.state.lock().unwrap().stateful_sets.push(stateful_set);
    }

    pub fn cron_job(&self, name: &str) -> Option<CronJob> {
        self.state.lock().unwrap().cron_jobs.get(name).cloned()
    }

    pub fn cron_job_names(&self) -> Vec<String> {
        self.state.lock().unwrap().cron_jobs.keys().cloned().collect()
    }

    pub fn job(&self, name: &str) -> Option<Job> {
        self.state.lock().unwrap().jobs.get(name).cloned()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.state.lock().unwrap().ops.clone()
    }
}

#[async_trait]
impl Cluster for FakeCluster {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get_cron_job(&self, name: &str) -> Result<Option<CronJob>> {
        Ok(self.cron_job(name))
    }

    async fn apply_cron_job(&self, cron_job: &CronJob) -> Result<()> {
        let name = cron_job.metadata.name.clone().unwrap_or_default();
        let mut state = self.state.lock().unwrap();
        state.ops.push(Op::ApplyCronJob(name.clone()));
        state.cron_jobs.insert(name, cron_job.clone());
        Ok(())
    }

    async fn delete_cron_job(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(Op::DeleteCronJob(name.to_string()));
        state.cron_jobs.remove(name);
        Ok(())
    }

    async fn get_job(&self, name: &str) -> Result<Option<Job>> {
        Ok(self.job(name))
    }

    async fn apply_job(&self, job: &Job) -> Result<()> {
        let name = job.metadata.name.clone().unwrap_or_default();
        let mut state = self.state.lock().unwrap();
        state.ops.push(Op::ApplyJob(name.clone()));
        if state.jobs.get(&name).is_some_and(is_live_job) {
            return Ok(());
        }
        state.jobs.insert(name, job.clone());
        Ok(())
    }

    async fn delete_job(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(Op::DeleteJob(name.to_string()));
        state.jobs.remove(name);
        Ok(())
    }

    async fn list_deployments(&self) -> Result<Vec<Deployment>> {
        Ok(self.state.lock().unwrap().deployments.clone())
    }

    async fn list_stateful_sets(&self) -> Result<Vec<StatefulSet>> {
        Ok(self.state.lock().unwrap().stateful_sets.clone())
    }
}

/// A CronJob as a previous dailyclean release might have left it
pub fn cron_job(name: &str, schedule: &str, suspend: bool, images: &[&str]) -> CronJob {
    let containers = images
        .iter()
        .map(|image| Container {
            name: "dailyclean-job".to_string(),
            image: Some(image.to_string()),
            ..Default::default()
        })
        .collect();

    CronJob {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(CronJobSpec {
            schedule: schedule.to_string(),
            suspend: Some(suspend),
            job_template: JobTemplateSpec {
                metadata: None,
                spec: Some(JobSpec {
                    template: PodTemplateSpec {
                        metadata: None,
                        spec: Some(PodSpec {
                            containers,
                            ..Default::default()
                        }),
                    },
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        status: None,
    }
}

/// A Job, finished when `completed` is set
pub fn job(name: &str, completed: bool) -> Job {
    Job {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(BTreeMap::from([("generation".to_string(), "old".to_string())])),
            ..Default::default()
        },
        spec: Some(JobSpec::default()),
        status: Some(JobStatus {
            completion_time: completed.then(|| Time(Utc::now())),
            ..Default::default()
        }),
    }
}

pub fn metadata(name: &str, labels: &[(&str, &str)]) -> ObjectMeta {
    let labels: BTreeMap<String, String> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ObjectMeta {
        name: Some(name.to_string()),
        labels: (!labels.is_empty()).then_some(labels),
        ..Default::default()
    }
}
