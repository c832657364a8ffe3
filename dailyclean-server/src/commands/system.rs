use anyhow::Result;
use dailyclean_core::DailycleanService;

use crate::config::Config;

/// What the dailyclean API runs when it boots
pub async fn startup(service: &DailycleanService) -> Result<()> {
    tracing::info!(namespace = service.namespace(), "Running dailyclean startup checks");

    if service.updating_cron_job_if_needed().await? {
        println!("✓ CronJobs recreated with image {}", service.config().image_name);
    } else {
        println!("✓ CronJobs already up to date");
    }

    if service.create_default_stop_cron_job_if_not_exist().await? {
        println!("✓ Default stop CronJob created ({})", service.config().default_cron_stop);
    } else {
        println!("✓ Stop CronJob present");
    }

    Ok(())
}

pub async fn reconcile(service: &DailycleanService) -> Result<()> {
    if service.updating_cron_job_if_needed().await? {
        println!("✓ CronJobs recreated with image {}", service.config().image_name);
    } else {
        println!("✓ No image drift in namespace {}", service.namespace());
    }
    Ok(())
}

pub fn config(config: &Config) -> Result<()> {
    let dailyclean = &config.dailyclean;

    println!("Dailyclean Configuration");
    println!("{}", "=".repeat(80));
    println!();

    println!("Job:");
    println!(
        "  Image:             {}",
        if dailyclean.image_name.trim().is_empty() { "✗ Not set" } else { dailyclean.image_name.as_str() }
    );
    println!("  Service Account:   {}", dailyclean.service_account_name);
    println!("  Time Zone:         {}", dailyclean.time_zone);
    println!("  Default Stop Cron: {}", dailyclean.default_cron_stop);
    println!();

    println!("Namespace:");
    println!(
        "  Namespace:         {}",
        config.namespace.as_deref().unwrap_or("(kube client default)")
    );
    println!("  Dailyclean Label:  {}", dailyclean.dailyclean_label);
    println!(
        "  Denied Regex:      {}",
        dailyclean
            .unauthorized_namespace_regex
            .as_ref()
            .map(|r| r.as_str())
            .unwrap_or("none")
    );
    println!();

    println!("Environment Variables:");
    println!("  RUST_LOG:           {}", std::env::var("RUST_LOG").unwrap_or_else(|_| "not set".to_string()));
    println!("  DAILYCLEAN_LOG_DIR: {}", std::env::var("DAILYCLEAN_LOG_DIR").unwrap_or_else(|_| "not set".to_string()));

    Ok(())
}
