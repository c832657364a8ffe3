//! Deny-list check run before creating CronJobs

use tracing::warn;

use crate::config::NamespacePattern;
use crate::error::{DailycleanError, Result};

/// A namespace is authorized unless it matches the deny regex
pub fn is_authorized(namespace: &str, deny: Option<&NamespacePattern>) -> bool {
    match deny {
        Some(regex) => !regex.is_match(namespace),
        None => true,
    }
}

/// Same check, as an error the caller can surface
pub fn ensure_authorized(namespace: &str, deny: Option<&NamespacePattern>) -> Result<()> {
    if is_authorized(namespace, deny) {
        return Ok(());
    }

    let regex = deny.map(|r| r.as_str().to_string()).unwrap_or_default();
    warn!(namespace, regex = %regex, "namespace is not authorized for CronJob creation");
    Err(DailycleanError::Unauthorized {
        namespace: namespace.to_string(),
        regex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_regex_authorizes_everything() {
        for ns in ["kube-system", "team-a", "default", ""] {
            assert!(is_authorized(ns, None));
        }
    }

    #[test]
    fn test_regex_denies_matching_namespaces() {
        let regex = NamespacePattern::new("^kube-.*").unwrap();
        assert!(!is_authorized("kube-system", Some(&regex)));
        assert!(is_authorized("team-a", Some(&regex)));
    }

    #[test]
    fn test_regex_must_match_whole_name() {
        let regex = NamespacePattern::new("kube-.*").unwrap();
        assert!(!is_authorized("kube-public", Some(&regex)));
        assert!(is_authorized("team-kube-tools", Some(&regex)));
    }

    #[test]
    fn test_ensure_authorized_error() {
        let pattern = NamespacePattern::new("prod-.*").unwrap();
        let err = ensure_authorized("prod-payments", Some(&pattern)).unwrap_err();
        match err {
            DailycleanError::Unauthorized { namespace, regex } => {
                assert_eq!(namespace, "prod-payments");
                assert_eq!(regex, "prod-.*");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(ensure_authorized("dev-payments", Some(&pattern)).is_ok());
    }
}
