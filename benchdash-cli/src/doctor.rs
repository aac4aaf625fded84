use colored::*;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::error::Error;

use crate::results::{DashboardData, SystemInfo};

enum Check<T> {
    Ok(T),
    Fail(String),
}

async fn probe<T: DeserializeOwned>(client: &Client, url: &str) -> Check<T> {
    let resp = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => return Check::Fail(e.to_string()),
    };
    if !resp.status().is_success() {
        return Check::Fail(format!("Status {}", resp.status()));
    }
    match resp.json::<T>().await {
        Ok(body) => Check::Ok(body),
        Err(_) => Check::Fail("Invalid JSON".to_string()),
    }
}

pub async fn run_doctor(client: &Client, url: &str) -> Result<(), Box<dyn Error>> {
    println!("{}", "Benchmark Dashboard Doctor".bold().cyan());
    println!("{}", "Checking dashboard API...".dimmed());
    println!();

    let mut all_good = true;

    // 1. System endpoint doubles as the connectivity check
    print!("• System Endpoint:    ");
    match probe::<SystemInfo>(client, &format!("{}/api/system", url)).await {
        Check::Ok(info) => {
            println!("{}", "OK".green());
            print!("• Processor:          ");
            println!("{} ({} cores)", info.processor, info.cores);
        }
        Check::Fail(reason) => {
            println!("{}", format!("FAIL ({})", reason).red());
            println!("  → Is the dashboard server running on {}?", url);
            return Ok(());
        }
    }

    // 2. Results endpoint
    print!("• Data Endpoint:      ");
    match probe::<DashboardData>(client, &format!("{}/api/data", url)).await {
        Check::Ok(data) => {
            println!("{}", "OK".green());
            print!("• Baseline Results:   ");
            if data.baseline.is_empty() {
                println!("{}", "None (run a baseline first)".yellow());
            } else {
                println!("{}", format!("{} sizes", data.baseline.len()).green());
            }
        }
        Check::Fail(reason) => {
            println!("{}", format!("FAIL ({})", reason).red());
            all_good = false;
        }
    }

    println!();
    if all_good {
        println!("{}", "✅ Dashboard API is healthy.".bold().green());
    } else {
        println!("{}", "⚠️  Dashboard API has issues. See above.".bold().yellow());
    }

    Ok(())
}
