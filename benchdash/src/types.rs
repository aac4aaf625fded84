use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Size label (e.g. "small") to measured GFLOPS.
pub type BaselineResult = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationEntry {
    pub rank: u32,
    pub gflops: f64,
    pub time: f64,
    pub opt: String,
    pub march: String,
    pub size: String,
}

/// Body of `GET /api/data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub baseline: BaselineResult,
    pub optimizations: Vec<OptimizationEntry>,
    pub timestamp: f64,
}

/// Body of `GET /api/system`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub processor: String,
    pub cores: u32,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Acknowledgement returned by `POST /api/run-benchmark`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAck {
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl RunAck {
    pub fn started(kind: impl Into<String>) -> Self {
        Self {
            status: "started".to_string(),
            kind: kind.into(),
        }
    }
}

/// Seconds since the Unix epoch, with sub-second precision.
pub fn epoch_secs_f64() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_secs_f64())
        .unwrap_or(0.0)
}
