//! Turning a user-supplied cron into CronJob `schedule` and `suspend` values

/// Schedule written into a suspended CronJob; never fires while suspended
pub const DISABLED_PLACEHOLDER: &str = "0 0 * * *";

/// What a CronJob should carry for a given user cron
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchedule {
    pub suspend: bool,
    pub expression: String,
}

/// Resolve a user cron
///
/// `None` or a blank string is the "disabled" sentinel and yields a suspended
/// placeholder. Anything else is passed through unchanged; syntax is left to
/// the API server to reject.
pub fn resolve(cron: Option<&str>) -> ResolvedSchedule {
    match cron {
        Some(expression) if !expression.trim().is_empty() => ResolvedSchedule {
            suspend: false,
            expression: expression.to_string(),
        },
        _ => ResolvedSchedule {
            suspend: true,
            expression: DISABLED_PLACEHOLDER.to_string(),
        },
    }
}
