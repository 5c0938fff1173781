//! Formatting functions for UI output.
//!
//! `render_*` functions build the text and are tested; `display_*` print it.

use crate::args::ExampleArgs;
use crate::boundary::BoundaryWarning;
use crate::domain::{Branch, SemanticRef};
use crate::resolver::BuildInfo;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// `versionName=...` and `versionCode=...` lines, one per value
pub fn render_build_info(info: &BuildInfo) -> String {
    format!(
        "versionName={}\nversionCode={}",
        info.version_name, info.version_code
    )
}

pub fn display_build_info(info: &BuildInfo) {
    println!("{}", render_build_info(info));
}

/// Summary of a migration run.
pub fn render_migration(current: &Branch, merged: &[Branch]) -> String {
    if merged.is_empty() {
        return format!("{} is up to date with its upstream branches", current);
    }

    let sources: Vec<&str> = merged.iter().map(|b| b.name()).collect();
    format!(
        "Merged into {} and pushed: {}",
        current,
        sources.join(", ")
    )
}

pub fn display_migration(current: &Branch, merged: &[Branch]) {
    display_success(&render_migration(current, merged));
}

pub fn display_retired(current: &Branch, tag: &str) {
    display_success(&format!(
        "Retired {}: tagged {}, merged into master, deleted remote branch",
        current, tag
    ));
}

/// One `name = value` line per example property, `<unset>` for missing values.
pub fn render_example_args(args: &ExampleArgs) -> String {
    fn show<T: ToString>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "<unset>".to_string())
    }

    let user_emails = args.user_emails.as_ref().map(|emails| emails.join(", "));
    [
        format!("simpleDefault = {}", show(&args.simple_default)),
        format!("testEnv = {}", show(&args.test_env)),
        format!("appHardening = {}", show(&args.app_hardening_enabled)),
        format!("adminEmail = {}", show(&args.admin_email)),
        format!("userEmails = {}", show(&user_emails)),
    ]
    .join("\n")
}

pub fn display_example_args(args: &ExampleArgs) {
    println!("{}", render_example_args(args));
}
