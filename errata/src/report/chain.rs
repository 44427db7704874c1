//! Cause-chain walker.
//!
//! Visits links outermost first, collecting one entry per link and merging
//! each annotated link's own metadata. Stops at the terminal fault, at the
//! depth limit, or as soon as a panic-level link is seen (the caller then
//! switches to stack rendering).

use crate::meta::Meta;
use crate::node::{Annotated, Fault, Level, Origin};

/// One rendered line of a chain, before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChainEntry {
    /// Annotated link. `index` counts from the outermost link (1).
    Link {
        index: usize,
        origin: Origin,
        text: String,
    },
    /// Terminal fault ending the chain.
    Root { index: usize, text: String },
    /// Depth limit reached before a terminal fault.
    Stopped { max_depth: usize },
}

/// Result of walking a chain that holds no panic link.
#[derive(Debug, Clone)]
pub(crate) struct ChainWalk {
    /// Entries in visit order: outermost first.
    pub entries: Vec<ChainEntry>,
    /// Severity of the last annotated link visited (innermost).
    pub level: Option<Level>,
    pub meta: Meta,
}

pub(crate) enum Walk<'a> {
    Chain(ChainWalk),
    /// A panic link was reached. `link` is the chain position holding
    /// `node`.
    Panic {
        link: &'a Fault,
        node: &'a Annotated,
        meta: Meta,
    },
}

pub(crate) fn walk(fault: &Fault, max_depth: usize) -> Walk<'_> {
    let mut entries = Vec::new();
    let mut level = None;
    let mut meta = Meta::new();
    let mut current = fault;
    let mut finished = false;

    for index in 1..=max_depth {
        match current {
            Fault::Node(node) => {
                level = Some(node.level());
                meta.merge_under(node.meta());
                if node.level() == Level::Panic {
                    return Walk::Panic {
                        link: current,
                        node,
                        meta,
                    };
                }
                entries.push(ChainEntry::Link {
                    index,
                    origin: *node.origin(),
                    text: node.message().to_string(),
                });
                current = node.cause();
            }
            Fault::Terminal(err) => {
                entries.push(ChainEntry::Root {
                    index,
                    text: err.to_string(),
                });
                finished = true;
                break;
            }
        }
    }

    if !finished {
        entries.push(ChainEntry::Stopped { max_depth });
    }

    Walk::Chain(ChainWalk {
        entries,
        level,
        meta,
    })
}
