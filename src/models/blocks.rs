//! Formatted solution document model
//!
//! The formatter turns the solver's raw explanation text into an ordered
//! sequence of display blocks. Blocks are immutable once produced; the
//! rendering side (MathJax + DOM) consumes them and is responsible for
//! actually typesetting the math payloads.

use serde::{Deserialize, Serialize};

/// One unit of the formatted output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text")]
pub enum Block {
    /// A step heading ("Paso N: ..."), markers already stripped
    Heading(String),

    /// Display math, payload retains the `\[ ... \]` delimiters so the
    /// typesetting engine can recognize it
    MathBlock(String),

    /// Inline math, payload retains the `\( ... \)` delimiters
    InlineMath(String),

    /// Plain prose with no markup
    PlainRun(String),

    /// An explicit line break between runs
    LineBreak,
}

impl Block {
    /// CSS class for the container this block should be wrapped in,
    /// if it needs one
    pub fn container_class(&self) -> Option<&'static str> {
        match self {
            Block::MathBlock(_) => Some("math-block"),
            _ => None,
        }
    }
}

/// The formatted solution document: an ordered block sequence
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormattedDocument {
    pub blocks: Vec<Block>,
}

impl FormattedDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn empty() -> Self {
        Self { blocks: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the document back to plain text.
    ///
    /// Headings and math payloads are emitted as-is, line breaks become
    /// newlines. Formatting is a one-shot normalization: running the
    /// formatter again over this projection must not reintroduce heading
    /// or emphasis markers.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Heading(text)
                | Block::MathBlock(text)
                | Block::InlineMath(text)
                | Block::PlainRun(text) => out.push_str(text),
                Block::LineBreak => out.push('\n'),
            }
        }
        out
    }

    /// Render the document as the HTML fragment the page injects into the
    /// solution pane: `<h3>` headings, `<br>` line breaks, display math in
    /// a `math-block` div. Math delimiters survive untouched for MathJax.
    pub fn html(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Heading(text) => {
                    out.push_str("<h3>");
                    out.push_str(&escape_html(text));
                    out.push_str("</h3>");
                }
                Block::MathBlock(latex) => {
                    out.push_str("<div class='math-block'>");
                    out.push_str(latex);
                    out.push_str("</div>");
                }
                Block::InlineMath(latex) => out.push_str(latex),
                Block::PlainRun(text) => out.push_str(&escape_html(text)),
                Block::LineBreak => out.push_str("<br>"),
            }
        }
        out
    }
}

/// Minimal HTML escaping for prose runs (math payloads are passed through
/// verbatim so MathJax can find its delimiters)
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
