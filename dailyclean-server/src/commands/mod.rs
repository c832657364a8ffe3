pub mod run;
pub mod schedule;
pub mod system;
pub mod workloads;
