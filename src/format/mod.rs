//! Solution-text formatting pipeline
//!
//! Turns the solver's loosely-structured explanation text (step headings in
//! `**...**` markers, escaped math delimiters, literal `\n` sequences) into
//! an ordered sequence of display blocks.
//!
//! The transform is an explicit ordered list of named passes over a segment
//! stream, so pass order and composition are testable independently of any
//! one regex. Formatting never fails: markup the passes do not recognize
//! degrades to plain text.

pub mod passes;

use crate::models::{Block, FormattedDocument};

/// Intermediate representation between passes: text still awaiting
/// classification, or a finished block no later pass may touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Done(Block),
}

/// A named formatting pass
pub struct Pass {
    pub name: &'static str,
    pub run: fn(Vec<Segment>) -> Vec<Segment>,
}

/// The pipeline, in application order. Order matters: heading extraction
/// must see emphasis markers before they are stripped, and math extraction
/// must run before newlines are turned into line breaks so display math can
/// span lines.
pub const PIPELINE: &[Pass] = &[
    Pass {
        name: "normalize-escapes",
        run: passes::normalize_escapes,
    },
    Pass {
        name: "extract-headings",
        run: passes::extract_headings,
    },
    Pass {
        name: "strip-emphasis",
        run: passes::strip_emphasis,
    },
    Pass {
        name: "extract-math-blocks",
        run: passes::extract_math_blocks,
    },
    Pass {
        name: "extract-inline-math",
        run: passes::extract_inline_math,
    },
    Pass {
        name: "split-text-runs",
        run: passes::split_text_runs,
    },
];

/// Format raw solver text into a block document.
///
/// Total function: empty input yields an empty document, unrecognized or
/// unterminated markup is left as plain text.
pub fn format(raw: &str) -> FormattedDocument {
    if raw.is_empty() {
        return FormattedDocument::empty();
    }

    let mut segments = vec![Segment::Text(raw.to_string())];
    for pass in PIPELINE {
        segments = (pass.run)(segments);
    }

    let blocks = segments
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Done(block) => Some(block),
            // split-text-runs consumes every Text segment; anything left
            // here would be an empty remnant
            Segment::Text(_) => None,
        })
        .collect();

    FormattedDocument::new(blocks)
}
