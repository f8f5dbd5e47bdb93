//! Error rendering using ariadne
//!
//! Compilation and runtime errors point into the program text; they are
//! rendered as source snippets with the offending span underlined. Other
//! errors have no location and render as a single line.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

const DEFAULT_SOURCE_NAME: &str = "<program>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use bumpalo::Bump;
/// use paracl::{Program, render_error};
///
/// let arena = Bump::new();
/// if let Err(e) = Program::compile(&arena, "x = ;") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, DEFAULT_SOURCE_NAME, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer, naming the program `source_name`
/// in snippet headers (usually its file path).
pub fn render_error_to(
    error: &Error,
    source_name: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    render_error_to_writer(error, source_name, writer, use_color)
}

/// Render an error to a String
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, DEFAULT_SOURCE_NAME, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, DEFAULT_SOURCE_NAME, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source_name: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compilation {
            diagnostics,
            source,
        } => render_diagnostics(source_name, source, diagnostics, writer, use_color),
        Error::Runtime {
            diagnostic, source, ..
        } => render_diagnostics(
            source_name,
            source,
            core::slice::from_ref(diagnostic),
            writer,
            use_color,
        ),
        Error::ResourceExceeded(_) | Error::Internal(_) | Error::Io(_) => {
            writeln!(writer, "{}", error)
        }
    }
}

fn render_diagnostics(
    source_name: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for diag in diagnostics {
        let Some(span) = &diag.span else {
            writeln!(writer, "{}: {}", diag.severity, diag.message)?;
            continue;
        };
        // Keep the label inside the text so ariadne can place it.
        let end = span.0.end.min(source.len());
        let range = span.0.start.min(end)..end;

        let mut colors = ColorGenerator::new();
        colors.next(); // Skip the first color.

        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        };

        let mut report = Report::build(kind, (source_name, range.clone()))
            .with_message(&diag.message)
            .with_config(ariadne::Config::default().with_color(use_color));

        if let Some(code) = &diag.code {
            report = report.with_code(code);
        }

        let color = colors.next();
        report = report.with_label(
            Label::new((source_name, range))
                .with_message(&diag.message)
                .with_color(color),
        );

        if let Some(help_msg) = &diag.help {
            report = report.with_help(help_msg);
        }

        // Render to the writer (need to reborrow to avoid moving)
        report
            .finish()
            .write((source_name, Source::from(source)), &mut *writer)?;
    }

    Ok(())
}
