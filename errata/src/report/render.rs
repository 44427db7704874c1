//! Report formatting for cause chains.
//!
//! Every report is built twice from the same entries: a plain variant that is
//! logged and returned, and a colorized variant for terminal output. The
//! plain variant never carries escape codes.
//!
//! ```text
//! ERROR ver: v1.2.3
//!   3 > disk full
//!   2 > app::store[src/store.rs:10:9] disk full
//!   1 > app::api[src/api.rs:22:13] save failed
//! ```

use colored::Colorize;
use serde::Serialize;

use super::chain::{ChainEntry, ChainWalk};
use crate::meta::Meta;
use crate::node::{Level, Origin};

/// Output of one echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Severity the report was rendered and dispatched at.
    pub level: Level,
    /// Report without escape codes. Logged and returned by echo.
    pub plain: String,
    /// ANSI-styled report for direct terminal output. Equal to `plain` when
    /// color is disabled.
    pub colored: String,
    /// Metadata merged from every visited link.
    pub meta: Meta,
}

impl Report {
    /// Lines below the header.
    pub fn body(&self) -> impl Iterator<Item = &str> {
        self.plain.lines().skip(1)
    }
}

/// Which renderer a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    Plain,
    Colored,
}

pub(crate) fn render_chain(walk: ChainWalk, version: &str, color: bool) -> Report {
    // No annotated link at all still reports as an error.
    let level = match walk.level {
        Some(Level::Warn) => Level::Warn,
        _ => Level::Error,
    };

    // Root cause first.
    let entries: Vec<&ChainEntry> = walk.entries.iter().rev().collect();

    let plain = assemble(level, version, &entries, Style::Plain);
    let colored = if color {
        assemble(level, version, &entries, Style::Colored)
    } else {
        plain.clone()
    };

    Report {
        level,
        plain,
        colored,
        meta: walk.meta,
    }
}

fn assemble(level: Level, version: &str, entries: &[&ChainEntry], style: Style) -> String {
    let lines: Vec<String> = entries.iter().map(|e| format_entry(e, style)).collect();
    format!("{} ver: {}\n{}", tag(level, style), version, lines.join("\n"))
}

pub(crate) fn tag(level: Level, style: Style) -> String {
    match style {
        Style::Plain => level.tag().to_string(),
        Style::Colored => match level {
            Level::Warn => level.tag().yellow().bold().to_string(),
            Level::Error => level.tag().red().bold().to_string(),
            Level::Panic => level.tag().white().on_red().blink().to_string(),
        },
    }
}

fn format_entry(entry: &ChainEntry, style: Style) -> String {
    match entry {
        ChainEntry::Link {
            index,
            origin,
            text,
        } => format!("  {} > {} {}", index, format_origin(origin, style), text),
        ChainEntry::Root { index, text } => format!("  {index} > {text}"),
        ChainEntry::Stopped { max_depth } => format!("stop >{max_depth} deep"),
    }
}

fn format_origin(origin: &Origin, style: Style) -> String {
    match (origin.function, style) {
        (Some(function), Style::Colored) if !function.is_empty() => {
            format!("{}[{origin}]", function.blue().bold())
        }
        (Some(function), _) => format!("{function}[{origin}]"),
        (None, _) => format!("[{origin}]"),
    }
}
