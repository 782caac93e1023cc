//! Text blocks built from runtime data.

use std::path::Path;

use proto::{PackageInfo, PackageStats};
use stats::{calculate_total_downloads, format_number};

use crate::content::{THEME_PRESETS, ThemeCategory};

const RULE: &str = "═══════════════════════════════════════════════════════";

pub const FETCHING_STATS: &str = "📦 Fetching package statistics from npm registry...";
pub const FETCHING_INFO: &str = "📦 Fetching package details from npm registry...";
pub const STATS_FAILED: &str = "Error fetching package statistics.";

/// Shown before `clear-data` runs.
pub const CLEAR_DATA_PROMPT: &[&str] = &[
    "⚠️  Warning: This will clear ALL stored data including:",
    "",
    "• All settings",
    "• Command history",
    "• All tabs",
    "• Everything in the local store",
    "",
    "This action cannot be undone. Continue? (y/n)",
];

pub fn no_packages() -> Vec<String> {
    [
        "No packages configured yet.",
        "",
        "To add your packages:",
        "1. Open your config.toml",
        "2. List your package names under [stats] packages",
        "3. Example: packages = [\"@yourusername/package-name\"]",
        "",
        "Find your packages at:",
        "https://www.npmjs.com/settings/mohammad.garmabi/packages",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Per-package counts followed by the totals.
pub fn package_stats(stats: &[PackageStats]) -> Vec<String> {
    let totals = calculate_total_downloads(stats);
    let mut lines = vec![
        "📦 NPM Packages Statistics:".to_string(),
        RULE.to_string(),
        String::new(),
    ];
    for (i, pkg) in stats.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, pkg.name));
        lines.push(format!("     📥 Last Year:  {}", format_number(pkg.downloads)));
        lines.push(format!(
            "     📅 Last Month: {}",
            format_number(pkg.downloads_last_month)
        ));
        lines.push(format!(
            "     📆 Last Week:  {}",
            format_number(pkg.downloads_last_week)
        ));
    }
    lines.extend([
        String::new(),
        RULE.to_string(),
        format!(
            "📊 Total Downloads (Last Year):  {}",
            format_number(totals.total)
        ),
        format!(
            "📊 Total Downloads (Last Month): {}",
            format_number(totals.last_month)
        ),
        format!(
            "📊 Total Downloads (Last Week):  {}",
            format_number(totals.last_week)
        ),
        String::new(),
        "💡 Note: NPM API provides stats for the last 18 months".to_string(),
        "   For 5-year historical data, consider npm-stat.com".to_string(),
    ]);
    lines
}

pub fn package_infos(infos: &[(String, Option<PackageInfo>)]) -> Vec<String> {
    let mut lines = vec!["📦 NPM Packages:".to_string(), RULE.to_string()];
    for (i, (name, info)) in infos.iter().enumerate() {
        match info {
            Some(info) => {
                lines.push(format!("  {}. {}@{}", i + 1, info.name, info.version));
                lines.push(format!("     {}", info.description));
            }
            None => lines.push(format!("  {}. {name} (registry unavailable)", i + 1)),
        }
    }
    lines
}

pub fn theme_list(active: Option<&str>) -> Vec<String> {
    let mut lines = vec!["Available themes:".to_string()];
    for category in ThemeCategory::ALL {
        lines.push(String::new());
        lines.push(format!("  {}", category.label()));
        for preset in THEME_PRESETS.iter().filter(|p| p.category == category) {
            let marker = if active == Some(preset.name) { "*" } else { " " };
            lines.push(format!(
                "   {marker} {:<16} {} / {}",
                preset.name, preset.background_color, preset.font_color
            ));
        }
    }
    lines.push(String::new());
    lines.push("Use 'theme <name>' to apply one.".to_string());
    lines
}

pub fn exported(path: &Path) -> Vec<String> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = path
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    vec![
        "✅ Data exported successfully!".to_string(),
        String::new(),
        format!("📦 File: {file_name}"),
        String::new(),
        format!("Your data has been saved to {dir}."),
        "You can import it later with 'import-data <path>'.".to_string(),
    ]
}

pub fn imported(path: &str, collections: usize) -> Vec<String> {
    vec![
        "✅ Data imported successfully!".to_string(),
        String::new(),
        format!("📦 File: {path}"),
        format!("Restored {collections} collection(s); the session has been reloaded."),
    ]
}

pub fn import_usage() -> Vec<String> {
    vec![
        "Usage: import-data <path>".to_string(),
        String::new(),
        "Restores a backup written by 'export-data'.".to_string(),
    ]
}

pub fn cleared(reload_secs: u64) -> Vec<String> {
    vec![
        "✅ All data cleared successfully!".to_string(),
        String::new(),
        format!("The session will reload in {reload_secs} seconds..."),
    ]
}

pub fn failure(headline: &str, error: &dyn std::fmt::Display) -> Vec<String> {
    vec![headline.to_string(), error.to_string()]
}

pub fn not_found(raw: &str) -> Vec<String> {
    vec![
        format!("Command not found: {raw}"),
        "Type 'help' for available commands.".to_string(),
    ]
}
