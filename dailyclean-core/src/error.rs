//! Error type shared by every dailyclean operation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DailycleanError {
    /// A required setting is missing or blank
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The current namespace matches the unauthorized-namespace regex
    #[error("Create CronJob action is not authorized for namespace '{namespace}'. Actual regex for unauthorized namespace: {regex}")]
    Unauthorized { namespace: String, regex: String },

    /// Any failure reported by the Kubernetes API, passed through untouched
    #[error("kubernetes API error: {0}")]
    Cluster(#[from] kube::Error),

    /// A manifest template failed to render or did not parse
    #[error("failed to render manifest: {0}")]
    Manifest(String),

    /// A cluster object is not in a shape this crate could have written
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<tera::Error> for DailycleanError {
    fn from(e: tera::Error) -> Self {
        DailycleanError::Manifest(e.to_string())
    }
}

impl From<serde_yaml::Error> for DailycleanError {
    fn from(e: serde_yaml::Error) -> Self {
        DailycleanError::Manifest(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DailycleanError>;
