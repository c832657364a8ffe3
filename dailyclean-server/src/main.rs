use anyhow::Result;
use clap::Parser;
use dailyclean_core::DailycleanService;
use dailyclean_models::Action;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;

use cli::{Args, Mode, ScheduleCommand};
use config::Config;

/// Initialize tracing:
/// 1. Console output (stderr), keeping stdout for command output
/// 2. File output under $DAILYCLEAN_LOG_DIR/dailyclean.log when set
fn initialize_tracing() -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,\
         dailyclean_core=debug,\
         dailyclean_server=debug,\
         kube=warn"
            .into()
    });

    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let file_layer = match std::env::var("DAILYCLEAN_LOG_DIR") {
        Ok(dir) => {
            std::fs::create_dir_all(&dir)?;
            let file_appender = tracing_appender::rolling::never(&dir, "dailyclean.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            // Dropping the guard stops file logging
            std::mem::forget(guard);

            Some(fmt::layer().with_writer(file_writer).with_ansi(false))
        }
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    initialize_tracing()?;

    let config = Config::load()?;

    if let Mode::Config = args.mode {
        return commands::system::config(&config);
    }

    let service = DailycleanService::connect(config.dailyclean, config.namespace).await?;
    tracing::debug!(namespace = service.namespace(), "Connected to cluster");

    match args.mode {
        Mode::Startup => commands::system::startup(&service).await,
        Mode::Reconcile => commands::system::reconcile(&service).await,
        Mode::Schedule { command } => match command {
            ScheduleCommand::Show { output } => commands::schedule::show(&service, &output).await,
            ScheduleCommand::Set { start, stop } => commands::schedule::set(&service, start, stop).await,
            ScheduleCommand::Clear => commands::schedule::clear(&service).await,
        },
        Mode::Start => commands::run::run(&service, Action::Start).await,
        Mode::Stop => commands::run::run(&service, Action::Stop).await,
        Mode::Workloads { output } => commands::workloads::list(&service, &output).await,
        Mode::Config => Ok(()),
    }
}
