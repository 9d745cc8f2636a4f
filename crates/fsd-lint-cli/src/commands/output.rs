//! Shared output formatting for lint results.

use anyhow::Result;
use fsd_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use miette::{NamedSource, Report};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result),
    }
    Ok(())
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_label(violation.severity), violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }
    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{summary_color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

/// Renders each violation as a miette report over its source file. Files
/// that can no longer be read fall back to the text layout.
fn print_pretty(result: &LintResult) {
    for violation in &result.violations {
        match render_pretty(violation) {
            Some(rendered) => println!("{rendered}"),
            None => println!("{}", violation.format()),
        }
    }
    print_summary(result);
}

fn render_pretty(violation: &Violation) -> Option<String> {
    let file = &violation.location.file;
    let source = std::fs::read_to_string(file).ok()?;
    let report = Report::new(ViolationDiagnostic::from(violation))
        .with_source_code(NamedSource::new(file.display().to_string(), source));
    Some(format!("{report:?}"))
}
