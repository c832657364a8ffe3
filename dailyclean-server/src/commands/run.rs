use anyhow::Result;
use chrono::SecondsFormat;
use dailyclean_core::DailycleanService;
use dailyclean_models::Action;

pub async fn run(service: &DailycleanService, action: Action) -> Result<()> {
    if let Some(previous) = service.job_state(action).await? {
        match previous.completion_time {
            Some(at) => println!(
                "Previous {} run finished at {}",
                action,
                at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            None => println!("Previous {} run is still in progress", action),
        }
    }

    match action {
        Action::Start => service.create_start_job().await?,
        Action::Stop => service.create_stop_job().await?,
    }

    println!("✓ {} job submitted in namespace {}", action, service.namespace());
    Ok(())
}
