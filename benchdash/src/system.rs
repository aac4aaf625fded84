//! Host CPU metadata from the kernel's cpuinfo text.
//!
//! Only two facts are extracted: the first `model name` value and the number
//! of `processor` stanzas. On hosts that do not expose cpuinfo the reporter
//! answers with a fixed default instead of an error.

use crate::types::{SystemInfo, epoch_secs_f64};
use log::warn;
use std::fs;
use std::path::Path;

pub const FALLBACK_PROCESSOR: &str = "Neoverse System";
pub const FALLBACK_CORES: u32 = 16;
const UNKNOWN_PROCESSOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct CpuSummary {
    pub processor: String,
    pub cores: u32,
}

impl CpuSummary {
    pub fn fallback() -> Self {
        Self {
            processor: FALLBACK_PROCESSOR.to_string(),
            cores: FALLBACK_CORES,
        }
    }

    /// Read and summarize the descriptor at `path`.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(parse_cpuinfo(&content))
    }
}

pub fn parse_cpuinfo(content: &str) -> CpuSummary {
    let mut processor: Option<String> = None;
    let mut cores = 0u32;

    for line in content.lines() {
        if line.to_lowercase().contains("model name") {
            if processor.is_none()
                && let Some((_, value)) = line.split_once(':')
            {
                processor = Some(value.trim().to_string());
            }
        } else if line.starts_with("processor") {
            cores += 1;
        }
    }

    CpuSummary {
        processor: processor.unwrap_or_else(|| UNKNOWN_PROCESSOR.to_string()),
        cores,
    }
}

/// Build the `/api/system` payload. Never fails.
pub fn system_info(cpuinfo_path: &Path) -> SystemInfo {
    let summary = CpuSummary::read(cpuinfo_path).unwrap_or_else(|err| {
        warn!(
            "[system] cannot read {}: {}; reporting defaults",
            cpuinfo_path.display(),
            err
        );
        CpuSummary::fallback()
    });

    SystemInfo {
        processor: summary.processor,
        cores: summary.cores,
        timestamp: epoch_secs_f64(),
    }
}
