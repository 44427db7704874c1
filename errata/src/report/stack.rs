//! Panic rendering.
//!
//! A panic-level link is not reported as a cause chain. Instead the live call
//! stack at echo time is captured and printed, minus the reporter's own
//! frames.

use backtrace::Backtrace;
use colored::Colorize;

use super::render::{Report, Style, tag};
use crate::meta::Meta;
use crate::node::{Annotated, Level};

/// Leading frames with these symbol prefixes belong to the capture itself.
const SKIP_PREFIXES: &[&str] = &[
    "backtrace::",
    "<backtrace::",
    "errata::report::",
    "<errata::report::",
    "errata::global::",
];

/// One resolved stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StackFrame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

/// Capture the caller's stack, at most `max_depth` frames.
///
/// Returns the frames and whether the limit cut the stack short.
pub(crate) fn capture(max_depth: usize) -> (Vec<StackFrame>, bool) {
    let trace = Backtrace::new();
    let resolved = trace.frames().iter().flat_map(|frame| {
        frame.symbols().iter().map(|symbol| StackFrame {
            function: symbol
                .name()
                .map(|n| format!("{n:#}"))
                .unwrap_or_else(|| "<unknown>".to_string()),
            file: symbol.filename().map(|p| p.display().to_string()),
            line: symbol.lineno(),
        })
    });

    let mut frames = Vec::new();
    let mut truncated = false;
    for frame in resolved.skip_while(is_own_frame) {
        if frames.len() == max_depth {
            truncated = true;
            break;
        }
        frames.push(frame);
    }
    (frames, truncated)
}

fn is_own_frame(frame: &StackFrame) -> bool {
    SKIP_PREFIXES.iter().any(|p| frame.function.starts_with(p))
}

/// Render the stack report for a panic link.
pub(crate) fn render_panic(
    node: &Annotated,
    meta: Meta,
    version: &str,
    max_depth: usize,
    color: bool,
) -> Report {
    let (frames, truncated) = capture(max_depth);

    // A panic has no origin message of its own; lead with the cause text.
    let mut headline = node.cause().to_string();
    if headline != node.message() {
        headline.push_str(". ");
        headline.push_str(node.message());
    }

    let plain = assemble(&headline, version, &frames, truncated, Style::Plain);
    let colored = if color {
        assemble(&headline, version, &frames, truncated, Style::Colored)
    } else {
        plain.clone()
    };

    Report {
        level: node.level(),
        plain,
        colored,
        meta,
    }
}

fn assemble(
    headline: &str,
    version: &str,
    frames: &[StackFrame],
    truncated: bool,
    style: Style,
) -> String {
    let mut lines: Vec<String> = frames
        .iter()
        .enumerate()
        .map(|(j, frame)| {
            let function = match style {
                Style::Plain => frame.function.clone(),
                Style::Colored => frame.function.blue().bold().to_string(),
            };
            match (&frame.file, frame.line) {
                (Some(file), Some(line)) => format!("  {j} > {function}[{file}:{line}]"),
                (Some(file), None) => format!("  {j} > {function}[{file}]"),
                _ => format!("  {j} > {function}"),
            }
        })
        .collect();
    if truncated {
        lines.push(format!("  {} > exceeded max depth", frames.len()));
    }

    format!(
        "{} ver: {}  {}\n{}",
        tag(Level::Panic, style),
        version,
        headline,
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::panic;

    #[test]
    fn capture_respects_limit() {
        let (frames, truncated) = capture(2);
        assert!(frames.len() <= 2);
        // The test harness alone is deeper than two frames.
        assert!(truncated);
    }

    #[test]
    fn capture_skips_own_frames() {
        let (frames, _) = capture(50);
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|f| !f.function.starts_with("backtrace::")));
        assert!(!frames[0].function.starts_with("errata::report::"));
    }

    #[test]
    fn headline_joins_cause_and_message() {
        let node = panic("out of memory", &["all bets are off"]);
        let report = render_panic(&node, Meta::new(), "v1.2.3", 3, false);
        assert!(
            report
                .plain
                .starts_with("PANIC ver: v1.2.3  out of memory. all bets are off\n")
        );
    }

    #[test]
    fn headline_without_friendly_message() {
        let node = panic("EXPLOOOOSION!", &[]);
        let report = render_panic(&node, Meta::new(), "v0", 3, false);
        assert!(report.plain.starts_with("PANIC ver: v0  EXPLOOOOSION!\n"));
    }

    #[test]
    fn truncated_stack_ends_with_marker() {
        let node = panic("boom", &[]);
        let report = render_panic(&node, Meta::new(), "v0", 1, false);
        let last = report.body().last().unwrap_or_default();
        assert_eq!(last, "  1 > exceeded max depth");
        assert!(report.body().count() <= 2);
    }
}
