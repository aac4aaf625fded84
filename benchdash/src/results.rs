//! Baseline summary parser and optimization table.
//!
//! Summary format, one measurement per line:
//!   small: 2.59 GFLOPS (target)
//!   medium: 1.87 GFLOPS
//!
//! Anything else in the file (headers, blank lines, notes) is ignored.

use crate::config::ResultsConfig;
use crate::types::{BaselineResult, DashboardData, OptimizationEntry, epoch_secs_f64};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;

/// Parse summary text into a label -> GFLOPS map.
///
/// Input: "small: 2.59 GFLOPS (target)"
/// Output: {"small": 2.59}
pub fn parse_summary(content: &str) -> BaselineResult {
    let mut baseline = BaselineResult::new();
    for line in content.lines() {
        if let Some((label, gflops)) = parse_line(line) {
            baseline.insert(label, gflops);
        } else if !line.trim().is_empty() {
            debug!("[results] skipping line {:?}", line);
        }
    }
    baseline
}

fn parse_line(line: &str) -> Option<(String, f64)> {
    if !line.contains(':') || !line.contains("GFLOPS") {
        return None;
    }
    let mut parts = line.trim().split(':');
    let label = parts.next()?.trim();
    let value = parts.next()?.split_whitespace().next()?;
    let gflops = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((label.to_string(), gflops))
}

/// Read and parse the summary file. A missing or unreadable file is an empty
/// baseline. Invalid UTF-8 is replaced rather than rejected so one bad byte
/// only spoils its own line.
pub fn read_baseline(path: &Path) -> BaselineResult {
    match fs::read(path) {
        Ok(bytes) => parse_summary(&String::from_utf8_lossy(&bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("[results] no summary at {}", path.display());
            BaselineResult::new()
        }
        Err(err) => {
            warn!("[results] failed to read {}: {}", path.display(), err);
            BaselineResult::new()
        }
    }
}

/// Placeholder ranking shown until real optimization sweeps are wired in.
pub fn placeholder_optimizations() -> Vec<OptimizationEntry> {
    let row = |rank, gflops, time, opt: &str, march: &str, size: &str| OptimizationEntry {
        rank,
        gflops,
        time,
        opt: opt.to_string(),
        march: march.to_string(),
        size: size.to_string(),
    };
    vec![
        row(1, 4.56, 0.000, "-O2", "Autodetect", "micro"),
        row(2, 4.50, 0.000, "-O3", "None", "micro"),
        row(3, 2.59, 0.104, "-O3", "V2", "small"),
    ]
}

/// Optimization rows from `path` if it holds a valid JSON array, otherwise the
/// placeholder table.
pub fn read_optimizations(path: Option<&Path>) -> Vec<OptimizationEntry> {
    let Some(path) = path else {
        return placeholder_optimizations();
    };
    let rows = fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|text| {
            serde_json::from_str::<Vec<OptimizationEntry>>(&text).map_err(|err| err.to_string())
        });
    match rows {
        Ok(rows) => rows,
        Err(err) => {
            warn!(
                "[results] optimizations file {} unusable ({}); using placeholder table",
                path.display(),
                err
            );
            placeholder_optimizations()
        }
    }
}

/// Assemble the `/api/data` payload. Never fails.
pub fn load_dashboard_data(cfg: &ResultsConfig) -> DashboardData {
    DashboardData {
        baseline: read_baseline(&cfg.summary_file),
        optimizations: read_optimizations(cfg.optimizations_file.as_deref()),
        timestamp: epoch_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_parse_target_line_and_skip_bogus() {
        let baseline = parse_summary("small: 2.59 GFLOPS (target)\nbogus line\n");
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline.get("small"), Some(&2.59));
    }

    #[test]
    fn test_parse_multiple_sizes() {
        let content = "Baseline results\n\
                       ================\n\
                       small: 2.59 GFLOPS\n\
                       medium:   1.87 GFLOPS (avg of 5)\n\
                       large : 0.91 GFLOPS\n";
        let baseline = parse_summary(content);
        assert_eq!(baseline.len(), 3);
        assert_eq!(baseline["small"], 2.59);
        assert_eq!(baseline["medium"], 1.87);
        assert_eq!(baseline["large"], 0.91);
    }

    #[test]
    fn test_requires_colon_and_gflops() {
        assert!(parse_summary("small 2.59 GFLOPS\n").is_empty());
        assert!(parse_summary("small: 2.59 MFLOPS\n").is_empty());
    }

    #[test]
    fn test_skips_non_numeric_and_empty_values() {
        let content = "small: fast GFLOPS\nmedium: GFLOPS\nlarge:\t\nhuge: 3.5 GFLOPS\n";
        let baseline = parse_summary(content);
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline["huge"], 3.5);
    }

    #[test]
    fn test_skips_non_finite() {
        assert!(parse_summary("small: NaN GFLOPS\nmedium: inf GFLOPS\n").is_empty());
    }

    #[test]
    fn test_value_stops_at_second_colon() {
        let baseline = parse_summary("small: 2.5:GFLOPS at 12:00\n");
        assert_eq!(baseline["small"], 2.5);
    }

    #[test]
    fn test_duplicate_label_last_wins() {
        let baseline = parse_summary("small: 1.0 GFLOPS\nsmall: 2.0 GFLOPS\n");
        assert_eq!(baseline["small"], 2.0);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_baseline(&dir.path().join("nope.txt")).is_empty());
    }

    #[test]
    fn test_non_utf8_line_only_skips_itself() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"small: 2.59 GFLOPS\nnote: 3 \xb5s latency\nmedium: 1.8 GFLOPS\n")
            .unwrap();

        let baseline = read_baseline(file.path());
        assert_eq!(baseline.len(), 2);
        assert_eq!(baseline["small"], 2.59);
        assert_eq!(baseline["medium"], 1.8);
    }

    #[test]
    fn test_directory_instead_of_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_baseline(dir.path()).is_empty());
    }

    #[test]
    fn test_placeholder_ranks() {
        let rows = placeholder_optimizations();
        let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(rows[2].march, "V2");
        assert_eq!(rows[2].size, "small");
    }

    #[test]
    fn test_optimizations_file_replaces_placeholder() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"rank":1,"gflops":9.1,"time":0.05,"opt":"-Ofast","march":"native","size":"large"}}]"#
        )
        .unwrap();

        let rows = read_optimizations(Some(file.path()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].opt, "-Ofast");
    }

    #[test]
    fn test_invalid_optimizations_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert_eq!(read_optimizations(Some(file.path())), placeholder_optimizations());
        assert_eq!(
            read_optimizations(Some(Path::new("/definitely/missing.json"))),
            placeholder_optimizations()
        );
    }

    #[test]
    fn test_load_dashboard_data() {
        let mut summary = NamedTempFile::new().unwrap();
        writeln!(summary, "micro: 4.12 GFLOPS").unwrap();
        let cfg = ResultsConfig {
            summary_file: summary.path().to_path_buf(),
            optimizations_file: None,
        };

        let data = load_dashboard_data(&cfg);
        assert_eq!(data.baseline["micro"], 4.12);
        assert_eq!(data.optimizations.len(), 3);
        assert!(data.timestamp > 0.0);
    }
}
