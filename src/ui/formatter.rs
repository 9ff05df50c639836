//! Pure formatting functions for console output.
//!
//! Status lines go to stdout so they interleave with the update tool's own
//! output; errors go to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{PlanStep, ReleasePlan};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    println!("{} {}", style("⚠").yellow().bold(), warning);
}

/// Render the revisions of a plan as `a, b, then mainline`.
pub fn format_plan(plan: &ReleasePlan, mainline: &str) -> String {
    let releases: Vec<&str> = plan
        .steps()
        .iter()
        .filter(|step| matches!(step, PlanStep::Release(_)))
        .map(|step| step.revision(mainline))
        .collect();

    if releases.is_empty() {
        format!("'{}'", mainline)
    } else {
        format!("{}, followed by '{}'", releases.join(", "), mainline)
    }
}

/// Display the release walk about to be performed.
pub fn display_plan(plan: &ReleasePlan, mainline: &str) {
    println!(
        "\n{} {}",
        style("Going to upgrade to:").bold(),
        format_plan(plan, mainline)
    );
}

/// Display the start of one step of the walk.
pub fn display_step(index: usize, total: usize, revision: &str) {
    println!(
        "\n{}",
        style(format!("[{}/{}] Updating to {}", index + 1, total, revision)).bold()
    );
}

/// Display the tags that produced changes.
pub fn display_summary(new_tags: &[String]) {
    if new_tags.is_empty() {
        println!("\n{}", style("No updates available.").bold());
    } else {
        println!("\n{}", style("Updates available for:").bold());
        for tag in new_tags {
            println!("  {} {}", style("•").green(), tag);
        }
    }
}
