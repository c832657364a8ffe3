use anyhow::Result;
use dailyclean_core::DailycleanService;

pub async fn list(service: &DailycleanService, output: &str) -> Result<()> {
    let workloads = service.get_workloads().await?;

    if output == "json" {
        println!("{}", serde_json::to_string_pretty(&workloads)?);
        return Ok(());
    }

    println!("{:<40} {:<12} {}", "NAME", "KIND", "DAILYCLEAN");
    println!("{}", "-".repeat(64));
    for workload in &workloads {
        println!(
            "{:<40} {:<12} {}",
            workload.name,
            workload.kind.to_string(),
            if workload.dailyclean_eligible { "yes" } else { "no" }
        );
    }

    println!();
    let eligible = workloads.iter().filter(|w| w.dailyclean_eligible).count();
    println!("{} workload(s) found, {} managed by dailyclean", workloads.len(), eligible);

    Ok(())
}
