//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProbeStats};
use crate::report::SearchReport;

/// Prints the per-category failure and info statistics to the log.
pub fn print_probe_statistics(stats: &ProbeStats) {
    let total_errors = stats.total_errors();
    let total_info = stats.total_info();

    if total_errors > 0 {
        info!("Probe failure counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Notable events ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }

    if stats.peak_in_flight() > 0 {
        info!("Peak concurrent probes: {}", stats.peak_in_flight());
    }
}

/// Logs a one-line summary of a finished search.
pub fn log_report_summary(report: &SearchReport) {
    info!(
        "Checked {} platform{} for '{}': {} found, {} timeout{}, {} error{} in {:.2}s",
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
}
