//! Server configuration.
//!
//! Every field has a default that reproduces the stock layout:
//!
//! ```text
//! <root>/dashboard/                      static assets
//! <root>/results/baseline_summary.txt    baseline summary
//! <root>/scripts/03/run-baseline.sh      benchmark script
//! ```
//!
//! A TOML file may override any of them. Relative paths are resolved against
//! the project root.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub results: ResultsConfig,
    pub system: SystemConfig,
    pub benchmark: BenchmarkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub document_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            document_root: PathBuf::from("dashboard"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResultsConfig {
    pub summary_file: PathBuf,
    /// JSON array of optimization rows; the built-in table is used when unset.
    pub optimizations_file: Option<PathBuf>,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            summary_file: PathBuf::from("results/baseline_summary.txt"),
            optimizations_file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub cpuinfo_path: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            cpuinfo_path: PathBuf::from("/proc/cpuinfo"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub script: PathBuf,
    pub interpreter: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("scripts/03/run-baseline.sh"),
            interpreter: "bash".to_string(),
        }
    }
}

impl Config {
    /// Load from an optional TOML file, then anchor relative paths at `root`.
    pub fn load(path: Option<&Path>, root: &Path) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_toml(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(config.rooted_at(root))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.server.document_root = anchor(root, &self.server.document_root);
        self.results.summary_file = anchor(root, &self.results.summary_file);
        self.results.optimizations_file = self
            .results
            .optimizations_file
            .map(|path| anchor(root, &path));
        self.system.cpuinfo_path = anchor(root, &self.system.cpuinfo_path);
        self.benchmark.script = anchor(root, &self.benchmark.script);
        self
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.bind, self.server.port);
        addr.parse()
            .with_context(|| format!("invalid listen address {addr}"))
    }
}

fn anchor(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
