use anyhow::Result;
use dailyclean_core::DailycleanService;
use dailyclean_models::Action;

pub async fn show(service: &DailycleanService, output: &str) -> Result<()> {
    let timeranges = service.status().await?;

    if output == "json" {
        println!("{}", serde_json::to_string_pretty(&timeranges)?);
        return Ok(());
    }

    println!("Namespace: {}", service.namespace());
    println!("{}", "=".repeat(60));
    println!();
    println!("{:<8} {:<18} {:<10} {}", "ACTION", "SCHEDULE", "SUSPENDED", "IMAGE");
    println!("{}", "-".repeat(60));

    for action in Action::ALL {
        match service.cron_job_state(action).await? {
            Some(state) => println!(
                "{:<8} {:<18} {:<10} {}",
                action.as_str(),
                state.schedule,
                state.suspended,
                state.container_image.as_deref().unwrap_or("-")
            ),
            None => println!("{:<8} {:<18} {:<10} {}", action.as_str(), "-", "-", "not created"),
        }
    }

    println!();
    println!("Effective start: {}", timeranges.cron_start.as_deref().unwrap_or("disabled"));
    println!("Effective stop:  {}", timeranges.cron_stop.as_deref().unwrap_or("disabled"));

    Ok(())
}

pub async fn set(service: &DailycleanService, start: Option<String>, stop: Option<String>) -> Result<()> {
    tracing::info!(start = ?start, stop = ?stop, "Updating dailyclean schedules");

    service.create_start_cron_job(start.as_deref()).await?;
    service.create_stop_cron_job(stop.as_deref()).await?;

    println!("✓ Start: {}", start.as_deref().unwrap_or("disabled"));
    println!("✓ Stop:  {}", stop.as_deref().unwrap_or("disabled"));
    Ok(())
}

pub async fn clear(service: &DailycleanService) -> Result<()> {
    service.delete_cron_jobs().await?;
    println!("✓ Dailyclean CronJobs deleted from {}", service.namespace());
    Ok(())
}
