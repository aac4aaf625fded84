pub mod api;
pub mod benchmark;
pub mod config;
pub mod results;
pub mod server;
pub mod system;
pub mod types;
pub mod ui;

pub use config::Config;
pub use types::{BaselineResult, DashboardData, OptimizationEntry, RunAck, SystemInfo};
