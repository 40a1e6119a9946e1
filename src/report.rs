//! Console banners and the final pass/fail summary.
//!
//! Pure formatting: nothing here influences control flow. Formatting helpers
//! return strings so they can be asserted on; the `print_*` wrappers only
//! add color and write to stdout.

use crossterm::style::Stylize;

use crate::error::HarnessError;
use crate::runner::RunReport;
use crate::scenario::Scenario;

/// Wrap `text` in a bordered banner.
///
/// ```rust
/// use gan_smoke_rs::report::banner;
///
/// assert_eq!(banner("hi"), "--------\n|  hi  |\n--------");
/// ```
#[must_use]
pub fn banner(text: &str) -> String {
    let line = "-".repeat(text.chars().count() + 6);
    format!("{line}\n|  {text}  |\n{line}")
}

/// Banner opening one scenario: ordinal, total and description.
pub fn print_start(index: usize, total: usize, description: &str) {
    let text = format!("[{}/{}] {}", index + 1, total, description);
    println!("{}", banner(&text).blue().bold());
    println!();
}

/// Banner closing a phase.
pub fn print_end(text: &str) {
    println!("{}", banner(text).green().bold());
}

/// Show the overrides and metadata of the scenario about to run.
pub fn print_overrides(scenario: &Scenario) {
    println!("{}", "••  Current Scenario:".bold());
    if scenario.overrides.is_empty() {
        println!("(no overrides)");
    } else {
        let rendered = serde_yaml::to_string(&scenario.overrides)
            .unwrap_or_else(|_| "(unprintable overrides)".to_string());
        print!("{rendered}");
    }
    println!(
        "track: {}, end-to-end: {}",
        scenario.track, scenario.end_to_end
    );
    println!("{}", "•• Execution:".bold());
    println!();
}

/// Error message plus its source chain, one cause per line.
#[must_use]
pub fn error_trace(err: &HarnessError) -> String {
    let mut trace = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        trace.push_str("\n  caused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}

/// Print a contained scenario failure with its full trace.
pub fn print_failure(err: &HarnessError) {
    println!("{}", error_trace(err).red());
}

/// Summary lines for a finished batch.
///
/// One line when everything passed, otherwise the success count and the
/// zero-based indices of the failures.
#[must_use]
pub fn summary_lines(successes: usize, failed: &[usize]) -> Vec<String> {
    if failed.is_empty() {
        return vec!["•• All scenarios were successful".to_string()];
    }
    let indices = failed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        format!("•• {successes} successful tests"),
        format!("•• Failed test indices: {indices}"),
    ]
}

/// Print the final summary banner and the outcome lines.
pub fn print_summary(report: &RunReport) {
    print_end("     -----   Summary   -----     ");
    let failed = report.failures();
    for line in summary_lines(report.successes().len(), &failed) {
        if failed.is_empty() {
            println!("{line}");
        } else {
            println!("{}", line.yellow());
        }
    }
}
