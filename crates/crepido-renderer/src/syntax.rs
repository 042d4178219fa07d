//! Bracket syntax rewriters for list markup.
//!
//! Board lists carry a small inline vocabulary written in square brackets:
//!
//! | Syntax | Result |
//! |---|---|
//! | `[ ]`, `[x]` | disabled status checkbox |
//! | `[3d]`, `[1.5h]`, `[45m]` | timer badge |
//! | `[Project Name]` | project label |
//!
//! Each rewriter is a single regex pass over already-rendered HTML. The passes
//! are independent, but [`transform`] runs them in a fixed order: checkboxes,
//! then day, hour and minute timers, then labels. Labels match any remaining
//! bracket group, so they must come last.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::slugify;

static CHECKBOX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\[([ x])\]").unwrap());

static DAYS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\[(\d+(?:\.\d)?)d\]").unwrap());
static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\[(\d+(?:\.\d)?)h\]").unwrap());
static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[(\d+(?:\.\d)?)m\]").unwrap());

static LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

const CHECKED: &str =
    r#"<input class="status hidden done" type="checkbox" value="1" checked disabled/>"#;
const UNCHECKED: &str = r#"<input class="status hidden" type="checkbox" value="0" disabled/>"#;

/// Unit of a timer token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerUnit {
    Days,
    Hours,
    Minutes,
}

impl TimerUnit {
    /// All units, in the order [`transform`] applies them.
    pub const ALL: [TimerUnit; 3] = [TimerUnit::Days, TimerUnit::Hours, TimerUnit::Minutes];

    /// Suffix shown after the value in the rendered badge.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            TimerUnit::Days => "d",
            TimerUnit::Hours => "h",
            TimerUnit::Minutes => "m",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            TimerUnit::Days => &DAYS,
            TimerUnit::Hours => &HOURS,
            TimerUnit::Minutes => &MINUTES,
        }
    }
}

/// Replace `[ ]` and `[x]` with disabled status checkboxes.
///
/// Matching is case-insensitive, but only `[x]` renders checked and carries
/// the `done` class; `[X]` becomes an unchecked box. Any other single
/// character between the brackets is left for later passes.
#[must_use]
pub fn add_checkboxes(html: &str) -> Cow<'_, str> {
    CHECKBOX.replace_all(html, |caps: &Captures<'_>| {
        if &caps[1] == "x" { CHECKED } else { UNCHECKED }
    })
}

/// Replace timer tokens of one unit with timer badges.
///
/// The value is kept exactly as written, so `[1.5h]` yields
/// `data-value="1.5"`. The unit letter is matched case-insensitively.
#[must_use]
pub fn add_timers(html: &str, unit: TimerUnit) -> Cow<'_, str> {
    let suffix = unit.suffix();
    unit.pattern().replace_all(html, |caps: &Captures<'_>| {
        let value = &caps[1];
        format!(
            r#"<span class="timer" data-value="{value}"><i class="fa fa-clock-o"></i>{value}{suffix}</span>"#
        )
    })
}

/// Replace every remaining non-empty bracket group with a project label.
///
/// Groups left partially rewritten by earlier passes still match, so
/// `[[x]]` wraps the checkbox in a label.
///
/// The label text is kept as written for display and `data-project`; its slug
/// is used for the modifier class and `data-name`. `[]` is not a label.
#[must_use]
pub fn add_labels(html: &str) -> Cow<'_, str> {
    LABEL.replace_all(html, |caps: &Captures<'_>| {
        let text = &caps[1];
        let name = slugify(text);
        format!(
            r#"<span class="project label label--{name}" data-name="{name}" data-project="{text}"><i class="fa fa-folder-o"></i>{text}</span>"#
        )
    })
}

/// Run every rewriter over `html` in precedence order.
#[must_use]
pub fn transform(html: &str) -> String {
    let mut out = add_checkboxes(html).into_owned();
    for unit in TimerUnit::ALL {
        out = add_timers(&out, unit).into_owned();
    }
    add_labels(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_checked_checkbox() {
        assert_eq!(add_checkboxes("<li>[x] ship</li>"), format!("<li>{CHECKED} ship</li>"));
    }

    #[test]
    fn test_uppercase_x_is_unchecked() {
        assert_eq!(add_checkboxes("[X] ship"), format!("{UNCHECKED} ship"));
    }

    #[test]
    fn test_unchecked_checkbox() {
        assert_eq!(add_checkboxes("[ ] todo"), format!("{UNCHECKED} todo"));
    }

    #[test]
    fn test_other_single_char_is_not_checkbox() {
        assert_eq!(add_checkboxes("[y] [-] [  ] [xx]"), "[y] [-] [  ] [xx]");
    }

    #[test]
    fn test_checkbox_leaves_input_borrowed_without_match() {
        assert!(matches!(add_checkboxes("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_timers() {
        assert_eq!(
            add_timers("[3d]", TimerUnit::Days),
            r#"<span class="timer" data-value="3"><i class="fa fa-clock-o"></i>3d</span>"#
        );
        assert_eq!(
            add_timers("[1.5h]", TimerUnit::Hours),
            r#"<span class="timer" data-value="1.5"><i class="fa fa-clock-o"></i>1.5h</span>"#
        );
        assert_eq!(
            add_timers("[45m]", TimerUnit::Minutes),
            r#"<span class="timer" data-value="45"><i class="fa fa-clock-o"></i>45m</span>"#
        );
    }

    #[test]
    fn test_timer_unit_is_case_insensitive() {
        assert_eq!(
            add_timers("[2H]", TimerUnit::Hours),
            r#"<span class="timer" data-value="2"><i class="fa fa-clock-o"></i>2h</span>"#
        );
    }

    #[test]
    fn test_timer_passes_are_independent() {
        assert_eq!(add_timers("[2h]", TimerUnit::Days), "[2h]");
        assert_eq!(add_timers("[2d]", TimerUnit::Minutes), "[2d]");
    }

    #[test]
    fn test_invalid_timers() {
        for input in ["[3x]", "[1.25h]", "[.5h]", "[h]", "[1.h]"] {
            assert_eq!(transform_timers_only(input), input, "{input}");
        }
    }

    fn transform_timers_only(input: &str) -> String {
        let mut out = input.to_owned();
        for unit in TimerUnit::ALL {
            out = add_timers(&out, unit).into_owned();
        }
        out
    }

    #[test]
    fn test_label() {
        assert_eq!(
            add_labels("[Project Name]"),
            r#"<span class="project label label--project-name" data-name="project-name" data-project="Project Name"><i class="fa fa-folder-o"></i>Project Name</span>"#
        );
    }

    #[test]
    fn test_empty_brackets_are_not_labels() {
        assert_eq!(add_labels("keep [] as is"), "keep [] as is");
    }

    #[test]
    fn test_label_claims_partially_processed_group() {
        let html = transform("[[x]]");

        assert_eq!(
            html,
            format!(
                r#"<span class="project label label--{slug}" data-name="{slug}" data-project="{CHECKED}"><i class="fa fa-folder-o"></i>{CHECKED}</span>"#,
                slug = slugify(CHECKED)
            )
        );
    }

    #[test]
    fn test_label_wraps_inline_markup() {
        let html = add_labels("[<strong>b</strong>]");

        assert!(html.starts_with(r#"<span class="project label label---strong-b-strong-""#));
        assert!(html.ends_with("<strong>b</strong></span>"));
    }

    #[test]
    fn test_transform_precedence() {
        let html = transform("[x] done [2h] [urgent]");

        assert!(html.starts_with(CHECKED));
        assert!(html.contains(r#"<span class="timer" data-value="2">"#));
        assert!(html.contains(r#"data-name="urgent""#));
        assert_eq!(html.matches("label--").count(), 1);
    }

    #[test]
    fn test_transform_catches_leftovers_as_labels() {
        let html = transform("[3x] [y]");

        assert!(html.contains(r#"data-project="3x""#));
        assert!(html.contains(r#"data-project="y""#));
        assert!(!html.contains("timer"));
        assert!(!html.contains("checkbox"));
    }

    #[test]
    fn test_transform_without_brackets_is_identity() {
        let html = "<ul>\n<li>nothing to see</li>\n</ul>";
        assert_eq!(transform(html), html);
    }
}
