//! Immutable configuration handed to every dailyclean component

use regex::Regex;

use crate::error::{DailycleanError, Result};

pub const DEFAULT_SERVICE_ACCOUNT: &str = "default";
pub const DEFAULT_TIME_ZONE: &str = "Etc/UTC";
pub const DEFAULT_CRON_STOP: &str = "0 20 * * *";
pub const DEFAULT_DAILYCLEAN_LABEL: &str = "axa.com/dailyclean";

/// Unauthorized-namespace regex, kept alongside the pattern it was built from
///
/// The pattern must match the whole namespace name, so `kube-.*` denies
/// `kube-system` but not `team-kube-tools`.
#[derive(Debug, Clone)]
pub struct NamespacePattern {
    pattern: String,
    regex: Regex,
}

impl NamespacePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            DailycleanError::Configuration(format!(
                "invalid unauthorized namespace regex '{}': {}",
                pattern, e
            ))
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, namespace: &str) -> bool {
        self.regex.is_match(namespace)
    }

    /// The pattern as configured
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

#[derive(Debug, Clone)]
pub struct DailycleanConfig {
    /// Image run by the start/stop jobs; blank means "not configured"
    pub image_name: String,
    pub service_account_name: String,
    /// IANA zone written into `spec.timeZone` of the CronJobs
    pub time_zone: String,
    /// Schedule of the safety-net stop CronJob
    pub default_cron_stop: String,
    /// Label key marking a workload as managed by dailyclean
    pub dailyclean_label: String,
    /// Namespaces matching this regex may not get CronJobs
    pub unauthorized_namespace_regex: Option<NamespacePattern>,
}

impl Default for DailycleanConfig {
    fn default() -> Self {
        Self {
            image_name: String::new(),
            service_account_name: DEFAULT_SERVICE_ACCOUNT.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            default_cron_stop: DEFAULT_CRON_STOP.to_string(),
            dailyclean_label: DEFAULT_DAILYCLEAN_LABEL.to_string(),
            unauthorized_namespace_regex: None,
        }
    }
}

impl DailycleanConfig {
    pub fn with_unauthorized_namespace_regex(mut self, pattern: &str) -> Result<Self> {
        self.unauthorized_namespace_regex = Some(NamespacePattern::new(pattern)?);
        Ok(self)
    }

    /// Image name, or a configuration error when it is blank
    pub fn require_image(&self) -> Result<&str> {
        let image = self.image_name.trim();
        if image.is_empty() {
            return Err(DailycleanError::Configuration(
                "The image name is not properly set.".to_string(),
            ));
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_image_rejects_blank() {
        let config = DailycleanConfig {
            image_name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.require_image(),
            Err(DailycleanError::Configuration(_))
        ));
    }

    #[test]
    fn test_require_image_trims() {
        let config = DailycleanConfig {
            image_name: " axaguildev/dailyclean-job:1.2.0 ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.require_image().unwrap(), "axaguildev/dailyclean-job:1.2.0");
    }

    #[test]
    fn test_namespace_pattern_keeps_configured_text() {
        let config = DailycleanConfig::default()
            .with_unauthorized_namespace_regex("kube-.*")
            .unwrap();
        let pattern = config.unauthorized_namespace_regex.unwrap();
        assert_eq!(pattern.as_str(), "kube-.*");
        assert!(pattern.is_match("kube-system"));
    }

    #[test]
    fn test_invalid_namespace_regex() {
        let result = DailycleanConfig::default().with_unauthorized_namespace_regex("kube-(");
        assert!(matches!(result, Err(DailycleanError::Configuration(_))));
    }
}
