//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `username_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use username_status::initialization::init_logger_with;
use username_status::{build_reverse_image_links, SearchConfig, Searcher};

#[tokio::main]
async fn main() -> Result<()> {
    let config = SearchConfig::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let username = config.username.clone();
    let image_url = config.image_url.clone();
    let as_json = config.json;

    let searcher = match Searcher::new(config).await {
        Ok(searcher) => searcher,
        Err(e) => {
            eprintln!("username_status error: {e}");
            process::exit(1);
        }
    };

    let report = match searcher.search(&username).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("username_status error: {e}");
            process::exit(1);
        }
    };

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        println!(
            "✅ Checked {} platform{} for '{}' ({} found, {} timeout{}, {} error{}) in {:.1}s",
            report.platforms_checked,
            if report.platforms_checked == 1 { "" } else { "s" },
            report.target_username,
            report.found_count,
            report.timeouts_count,
            if report.timeouts_count == 1 { "" } else { "s" },
            report.errors_count,
            if report.errors_count == 1 { "" } else { "s" },
            report.elapsed_seconds
        );
        for (platform, url) in &report.profiles_found {
            println!("   {platform}: {url}");
        }
    }

    if let Some(image_url) = image_url {
        match build_reverse_image_links(&image_url) {
            Ok(links) => {
                println!("Reverse image search links:");
                for (engine, link) in links {
                    println!("   {engine}: {link}");
                }
            }
            Err(e) => {
                eprintln!("username_status error: {e}");
                process::exit(1);
            }
        }
    }

    Ok(())
}
