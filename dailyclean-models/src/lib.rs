use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The start or stop intent carried by a CronJob or a one-shot Job
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Scale the namespace's workloads back up
    Start,
    /// Scale the namespace's workloads down
    Stop,
}

impl Action {
    /// Both actions, start first
    pub const ALL: [Action; 2] = [Action::Start, Action::Stop];

    /// Argument handed to the dailyclean job container
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a namespace workload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadKind::Deployment => f.write_str("Deployment"),
            WorkloadKind::StatefulSet => f.write_str("StatefulSet"),
        }
    }
}

/// Read-only projection of a Deployment or StatefulSet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workload {
    pub name: String,
    pub kind: WorkloadKind,
    /// Whether the workload carries the dailyclean label
    pub dailyclean_eligible: bool,
}

/// View over a dailyclean CronJob as read from the cluster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CronJobState {
    pub name: String,
    pub schedule: String,
    pub suspended: bool,
    /// Image of the first container, if the template has one
    pub container_image: Option<String>,
}

/// View over a dailyclean Job as read from the cluster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobState {
    pub name: String,
    pub completion_time: Option<DateTime<Utc>>,
}

impl JobState {
    pub fn is_finished(&self) -> bool {
        self.completion_time.is_some()
    }
}

/// Effective start/stop schedules of a namespace
///
/// A side is `None` when its CronJob is absent or suspended.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timeranges {
    #[serde(default)]
    pub cron_start: Option<String>,
    #[serde(default)]
    pub cron_stop: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(serde_json::to_string(&Action::Start).unwrap(), "\"start\"");
        assert_eq!(serde_json::to_string(&Action::Stop).unwrap(), "\"stop\"");
        assert_eq!(Action::Stop.to_string(), "stop");
    }

    #[test]
    fn test_timeranges_missing_fields_default_to_none() {
        let parsed: Timeranges = serde_json::from_str(r#"{"cron_start":"0 7 * * 1-5"}"#).unwrap();
        assert_eq!(parsed.cron_start.as_deref(), Some("0 7 * * 1-5"));
        assert_eq!(parsed.cron_stop, None);
    }

    #[test]
    fn test_job_state_finished() {
        let running = JobState {
            name: "dailyclean-stop".to_string(),
            completion_time: None,
        };
        assert!(!running.is_finished());

        let done = JobState {
            completion_time: Some(Utc::now()),
            ..running
        };
        assert!(done.is_finished());
    }
}
