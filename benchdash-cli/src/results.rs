use colored::*;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;

#[derive(Debug, Deserialize)]
pub struct DashboardData {
    pub baseline: BTreeMap<String, f64>,
    pub optimizations: Vec<Optimization>,
    #[allow(dead_code)]
    pub timestamp: f64,
}

#[derive(Debug, Deserialize)]
pub struct Optimization {
    pub rank: u32,
    pub gflops: f64,
    pub time: f64,
    pub opt: String,
    pub march: String,
    pub size: String,
}

#[derive(Debug, Deserialize)]
pub struct SystemInfo {
    pub processor: String,
    pub cores: u32,
}

#[derive(Debug, Deserialize)]
pub struct RunAck {
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
}

pub async fn run_data(client: &Client, url: &str) -> Result<(), Box<dyn Error>> {
    let data: DashboardData = client
        .get(format!("{}/api/data", url))
        .send()
        .await?
        .json()
        .await?;

    println!("{}", "Baseline".bold());
    if data.baseline.is_empty() {
        println!("  {}", "no baseline results".dimmed());
    } else {
        println!("  {:<12} GFLOPS", "SIZE");
        for (size, gflops) in &data.baseline {
            println!("  {:<12} {:.2}", size, gflops);
        }
    }

    println!();
    println!("{}", "Optimizations".bold());
    println!(
        "  {:<5} {:<8} {:<8} {:<6} {:<12} SIZE",
        "RANK", "GFLOPS", "TIME", "OPT", "MARCH"
    );
    for o in &data.optimizations {
        let rank = if o.rank == 1 {
            o.rank.to_string().green()
        } else {
            o.rank.to_string().normal()
        };
        println!(
            "  {:<5} {:<8.2} {:<8.3} {:<6} {:<12} {}",
            rank, o.gflops, o.time, o.opt, o.march, o.size
        );
    }

    Ok(())
}

pub async fn run_system(client: &Client, url: &str) -> Result<(), Box<dyn Error>> {
    let info: SystemInfo = client
        .get(format!("{}/api/system", url))
        .send()
        .await?
        .json()
        .await?;

    println!("{:<10} {}", "Processor:".bold(), info.processor);
    println!("{:<10} {}", "Cores:".bold(), info.cores);
    Ok(())
}

pub async fn run_benchmark(client: &Client, url: &str, kind: &str) -> Result<(), Box<dyn Error>> {
    let resp = client
        .post(format!("{}/api/run-benchmark", url))
        .json(&serde_json::json!({ "type": kind }))
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(format!("trigger failed: {}", resp.status()).into());
    }

    let ack: RunAck = resp.json().await?;
    println!(
        "Benchmark {} ({}). Results appear in `data` once the run finishes.",
        ack.status.green(),
        ack.kind
    );
    Ok(())
}
