//! Exception reports.
//!
//! When a hook or action fails, the failure becomes text the user can read
//! in place of the menu output. [`ExceptionReport`] holds what is known
//! about the failure; a [`ReportRenderer`] turns it into outline text.

use serde::Serialize;

use crate::hooks::Phase;

/// A failed hook or action call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionReport {
    /// Handler the call was made on.
    pub handler: String,
    /// Phase the failure happened in.
    pub phase: Phase,
    /// Action or hook name.
    pub action: String,
    /// Arguments the call received.
    pub args: Vec<String>,
    /// The error's own message.
    pub message: String,
    /// Messages of the underlying causes, outermost first.
    pub causes: Vec<String>,
}

impl ExceptionReport {
    /// Builds a report from an error, keeping its cause chain.
    pub fn from_error(
        handler: impl Into<String>,
        phase: Phase,
        action: impl Into<String>,
        args: &[String],
        error: &anyhow::Error,
    ) -> Self {
        Self {
            handler: handler.into(),
            phase,
            action: action.into(),
            args: args.to_vec(),
            message: error.to_string(),
            causes: error.chain().skip(1).map(|e| e.to_string()).collect(),
        }
    }

    /// The failing call written out, e.g. `Todo.add "milk", "eggs"`.
    pub fn code(&self) -> String {
        let args = self
            .args
            .iter()
            .map(|a| format!("{a:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}.{} {}", self.handler, self.action, args)
            .trim_end()
            .to_string()
    }
}

/// Turns an exception report into text.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &ExceptionReport) -> String;
}

/// Renders reports as an outline item with quoted detail lines.
///
/// ```text
/// - boom)
///   | Todo.add "milk"
///   | caused by: disk full
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineReportRenderer;

impl ReportRenderer for OutlineReportRenderer {
    fn render(&self, report: &ExceptionReport) -> String {
        let headline = report.message.lines().next().unwrap_or("error");
        let mut out = format!("- {headline})\n  | {}\n", report.code());
        for line in report.message.lines().skip(1) {
            out.push_str(&format!("  | {line}\n"));
        }
        for cause in &report.causes {
            out.push_str(&format!("  | caused by: {cause}\n"));
        }
        out
    }
}
