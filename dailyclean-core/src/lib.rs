//! Dailyclean Core - scheduled and on-demand scale-down of a Kubernetes namespace
//!
//! This crate keeps the two dailyclean CronJobs (start and stop) in the shape
//! the user asked for, runs one-shot start/stop Jobs, and lists the
//! namespace's workloads.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dailyclean_core::{DailycleanConfig, DailycleanService};
//!
//! # async fn example() -> dailyclean_core::Result<()> {
//! let config = DailycleanConfig {
//!     image_name: "axaguildev/dailyclean-job:latest".to_string(),
//!     ..Default::default()
//! };
//! let service = DailycleanService::connect(config, None).await?;
//!
//! // Stop everything at 19:00 on weekdays, start it again at 07:00
//! service.create_stop_cron_job(Some("0 19 * * 1-5")).await?;
//! service.create_start_cron_job(Some("0 7 * * 1-5")).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cron;
pub mod cron_jobs;
pub mod error;
pub mod jobs;
pub mod k8s_client;
pub mod manifests;
pub mod names;
pub mod namespace_guard;
pub mod service;
pub mod workloads;

#[cfg(test)]
mod testing;

// Re-export key types for convenience
pub use config::DailycleanConfig;
pub use error::{DailycleanError, Result};
pub use service::DailycleanService;
pub use dailyclean_models as models;
