use anyhow::{Context, Result};
use dailyclean_core::config::{
    DEFAULT_CRON_STOP, DEFAULT_DAILYCLEAN_LABEL, DEFAULT_SERVICE_ACCOUNT, DEFAULT_TIME_ZONE,
};
use dailyclean_core::DailycleanConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub dailyclean: DailycleanConfig,
    /// Overrides the kube client's default namespace
    pub namespace: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut dailyclean = DailycleanConfig {
            image_name: std::env::var("DAILYCLEAN_IMAGE_NAME").unwrap_or_default(),
            service_account_name: std::env::var("DAILYCLEAN_SERVICE_ACCOUNT")
                .unwrap_or_else(|_| DEFAULT_SERVICE_ACCOUNT.to_string()),
            time_zone: std::env::var("DAILYCLEAN_TIMEZONE")
                .unwrap_or_else(|_| DEFAULT_TIME_ZONE.to_string()),
            default_cron_stop: std::env::var("DAILYCLEAN_DEFAULT_CRON_STOP")
                .unwrap_or_else(|_| DEFAULT_CRON_STOP.to_string()),
            dailyclean_label: std::env::var("DAILYCLEAN_LABEL")
                .unwrap_or_else(|_| DEFAULT_DAILYCLEAN_LABEL.to_string()),
            unauthorized_namespace_regex: None,
        };

        if let Some(pattern) = non_empty_var("DAILYCLEAN_UNAUTHORIZED_NAMESPACE_REGEX") {
            dailyclean = dailyclean
                .with_unauthorized_namespace_regex(&pattern)
                .context("DAILYCLEAN_UNAUTHORIZED_NAMESPACE_REGEX must be a valid regex")?;
        }

        Ok(Self {
            dailyclean,
            namespace: non_empty_var("DAILYCLEAN_NAMESPACE"),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
