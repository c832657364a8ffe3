use clap::{Parser, Subcommand};

/// Dailyclean - scheduled scale-down of a Kubernetes namespace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Heal CronJobs running a stale image, then make sure a stop CronJob exists
    Startup,

    /// Recreate the CronJobs if they run a stale image
    Reconcile,

    /// Manage the start/stop CronJobs
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },

    /// Start all workloads of the namespace now
    Start,

    /// Stop all workloads of the namespace now
    Stop,

    /// List Deployments and StatefulSets of the namespace
    Workloads {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: String,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommand {
    /// Show the effective start/stop schedules
    Show {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: String,
    },

    /// Set the start/stop schedules (an omitted side is disabled)
    Set {
        /// Cron for scaling up (e.g. "0 7 * * 1-5")
        #[arg(long)]
        start: Option<String>,

        /// Cron for scaling down (e.g. "0 19 * * 1-5")
        #[arg(long)]
        stop: Option<String>,
    },

    /// Delete both CronJobs
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule_set() {
        let args = Args::parse_from(["dailyclean", "schedule", "set", "--stop", "0 19 * * 1-5"]);
        match args.mode {
            Mode::Schedule {
                command: ScheduleCommand::Set { start, stop },
            } => {
                assert_eq!(start, None);
                assert_eq!(stop.as_deref(), Some("0 19 * * 1-5"));
            }
            other => panic!("unexpected mode: {other:?}"),
        }
    }

    #[test]
    fn test_parse_workloads_default_output() {
        let args = Args::parse_from(["dailyclean", "workloads"]);
        assert!(matches!(args.mode, Mode::Workloads { output } if output == "table"));
    }
}
