//! Reserved resource names for dailyclean objects
//!
//! Every CronJob and Job this crate manages is identified by its [`Action`];
//! the names below are the only place those identities are spelled out.

use dailyclean_models::Action;

/// Prefix shared by every dailyclean resource
pub const PREFIX: &str = "dailyclean";

/// Name of the container running the dailyclean job image
pub const CONTAINER_NAME: &str = "dailyclean-job";

/// Value of `app.kubernetes.io/managed-by` on rendered manifests
pub const MANAGED_BY: &str = "dailyclean";

/// CronJob names
pub mod cron_jobs {
    /// Recurring scale-up
    pub const START: &str = "dailyclean-start";
    /// Recurring scale-down
    pub const STOP: &str = "dailyclean-stop";
}

/// One-shot Job names
pub mod jobs {
    /// Immediate scale-up
    pub const START: &str = "dailyclean-start";
    /// Immediate scale-down
    pub const STOP: &str = "dailyclean-stop";
}

/// Reserved CronJob name for an action
pub fn cron_job_name(action: Action) -> &'static str {
    match action {
        Action::Start => cron_jobs::START,
        Action::Stop => cron_jobs::STOP,
    }
}

/// Reserved Job name for an action
pub fn job_name(action: Action) -> &'static str {
    match action {
        Action::Start => jobs::START,
        Action::Stop => jobs::STOP,
    }
}
