//! Cache management commands

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use crate::cache::CacheManager;

/// Clear all cache entries
pub fn clear(cache_dir: Option<&Path>) -> Result<ExitCode> {
    let cache_mgr = CacheManager::open(cache_dir)?;

    println!("{}", "Clearing render cache...".cyan().bold());

    let count = cache_mgr.clear()?;

    if count == 0 {
        println!("  {}", "Cache is already empty".dimmed());
    } else {
        println!(
            "  {} Removed {} cache {}",
            "SUCCESS".green().bold(),
            count,
            if count == 1 { "entry" } else { "entries" }
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Show cache information
pub fn info(cache_dir: Option<&Path>) -> Result<ExitCode> {
    let cache_mgr = CacheManager::open(cache_dir)?;

    println!("{}", "Cache Information".cyan().bold());

    let info = cache_mgr.info()?;

    println!(
        "  {}: {}",
        "Cache directory".dimmed(),
        info.cache_dir.display()
    );
    println!("  {}: {}", "Entry count".dimmed(), info.entry_count);
    println!(
        "  {}: {}",
        "Total size".dimmed(),
        format_size(info.total_size_bytes)
    );

    Ok(ExitCode::SUCCESS)
}

fn format_size(bytes: u64) -> String {
    let size_mb = bytes as f64 / (1024.0 * 1024.0);
    if size_mb >= 1.0 {
        format!("{:.2} MB", size_mb)
    } else {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    }
}
