//! Output formatting functions.

use std::collections::BTreeMap;

use sharedcache_core::cache::{display_value, render_entries};

use crate::cli::OutputFormat;
use crate::commands::{DemoReport, StressReport};
use crate::{CacheKey, CacheValue};

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Format cache contents for output.
pub fn format_contents(contents: &BTreeMap<CacheKey, CacheValue>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(contents),
        OutputFormat::Pretty => render_entries(contents),
    }
}

/// Format the demo walkthrough for output.
pub fn format_demo(report: &DemoReport, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return format_json(report);
    }

    let retrieved = report
        .retrieved
        .as_ref()
        .map_or_else(|| "(none)".to_string(), display_value);

    format!(
        "First handle contents:\n{}\n\n\
         After adding through second handle:\n{}\n\n\
         Retrieving user:123: {}\n\
         Is same instance? {}\n\n\
         After clearing through second handle:\n{}",
        report.after_first_handle,
        report.after_second_handle,
        retrieved,
        report.same_instance,
        report.after_clear
    )
}

/// Format a stress run for output.
pub fn format_stress(report: &StressReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(report),
        OutputFormat::Pretty => format!(
            "STRESS\n{}\n  Threads: {}\n  Keys per thread: {}\n  Entries verified: {}\n  Elapsed: {}ms",
            "-".repeat(40),
            report.threads,
            report.keys_per_thread,
            report.entries,
            report.elapsed.as_millis()
        ),
    }
}
