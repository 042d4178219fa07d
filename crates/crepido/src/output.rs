//! Terminal messages on stderr.
//!
//! Stdout is reserved for rendered pages (`crepido render` without `-o`).

use std::fmt::Display;

use console::{Style, Term};

/// Width of the label column in [`Output::field`] lines.
const LABEL_WIDTH: usize = 8;

/// Styled stderr writer.
pub(crate) struct Output {
    term: Term,
    label: Style,
    done: Style,
    warn: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            done: Style::new().green(),
            warn: Style::new().yellow(),
            failure: Style::new().red().bold(),
        }
    }

    /// Print an unstyled line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print an aligned `label  value` line with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        let label = format!("{label:>LABEL_WIDTH$}");
        let _ = self
            .term
            .write_line(&format!("{}  {value}", self.label.apply_to(label)));
    }

    /// Print a completed action (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.done.apply_to(msg).to_string());
    }

    /// Print a `warning:` prefixed line.
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {msg}", self.warn.apply_to("warning:")));
    }

    /// Print an `error:` prefixed line.
    pub(crate) fn error(&self, err: &dyn Display) {
        let _ = self
            .term
            .write_line(&format!("{} {err}", self.failure.apply_to("error:")));
    }
}
