//! The individual formatting passes
//!
//! Each pass takes the segment stream and returns a new one. Extraction
//! passes only ever split `Segment::Text`; finished blocks pass through
//! untouched, which is what makes the pipeline safe to compose.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Segment;
use crate::models::Block;

/// `**Paso ...**` marker run plus the remainder of its line. Headings never
/// span lines; the non-greedy body stops at the first closing marker.
///
/// The rest-of-line tail means a second `**Paso ...**` marker on the same
/// line is absorbed into the first heading (markers stripped) rather than
/// minting a second one. Step labels sit on their own lines in practice.
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(Paso[^\n]*?)\*\*([^\n]*)").unwrap());

/// Display math `\[ ... \]`, non-greedy, may span lines
static MATH_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\\\[.*?\\\]").unwrap());

/// Inline math `\( ... \)`, non-greedy, whitespace inside the delimiters
/// captured separately so it can be trimmed
static INLINE_MATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\\(\s*(.*?)\s*\\\)").unwrap());

/// Apply `f` to every pending text segment, leaving finished blocks alone
fn map_text(segments: Vec<Segment>, f: impl Fn(&str) -> Vec<Segment>) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for seg in segments {
        match seg {
            Segment::Text(text) => out.extend(f(&text)),
            done => out.push(done),
        }
    }
    out
}

/// Split a text segment around every match of `re`, mapping each match to a
/// finished block and keeping the unmatched stretches as pending text.
fn extract_with(
    text: &str,
    re: &Regex,
    to_block: impl Fn(&regex::Captures) -> Block,
) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let mat = caps.get(0).unwrap();
        if mat.start() > last {
            out.push(Segment::Text(text[last..mat.start()].to_string()));
        }
        out.push(Segment::Done(to_block(&caps)));
        last = mat.end();
    }
    if last < text.len() {
        out.push(Segment::Text(text[last..].to_string()));
    }
    out
}

/// Pass 1: collapse doubled backslashes (a formatting artifact in the
/// solver's output, not a math delimiter) and turn the literal two-character
/// `\n` sequence into a real newline. Order matters: `\\n` must lose its
/// doubled backslash before the newline rewrite sees it.
pub fn normalize_escapes(segments: Vec<Segment>) -> Vec<Segment> {
    map_text(segments, |text| {
        vec![Segment::Text(text.replace("\\\\", "").replace("\\n", "\n"))]
    })
}

/// Pass 2: `**Paso ...**` runs become headings. The heading absorbs the
/// rest of its line (the step label and its tail read as one title), with
/// markers stripped.
pub fn extract_headings(segments: Vec<Segment>) -> Vec<Segment> {
    map_text(segments, |text| {
        extract_with(text, &HEADING_RE, |caps| {
            let mut title = String::new();
            title.push_str(&caps[1]);
            title.push_str(&caps[2]);
            Block::Heading(title.replace("**", ""))
        })
    })
}

/// Pass 3: remaining `**` markers do not denote steps; drop them
pub fn strip_emphasis(segments: Vec<Segment>) -> Vec<Segment> {
    map_text(segments, |text| {
        vec![Segment::Text(text.replace("**", ""))]
    })
}

/// Pass 4: `\[ ... \]` runs become display-math blocks. The payload keeps
/// the delimiters so the typesetting engine downstream can recognize it.
pub fn extract_math_blocks(segments: Vec<Segment>) -> Vec<Segment> {
    map_text(segments, |text| {
        extract_with(text, &MATH_BLOCK_RE, |caps| {
            Block::MathBlock(caps[0].to_string())
        })
    })
}

/// Pass 5: `\( ... \)` runs become inline math, delimiters kept, whitespace
/// just inside the delimiters trimmed
pub fn extract_inline_math(segments: Vec<Segment>) -> Vec<Segment> {
    map_text(segments, |text| {
        extract_with(text, &INLINE_MATH_RE, |caps| {
            Block::InlineMath(format!("\\({}\\)", &caps[1]))
        })
    })
}

/// Pass 6: remaining newlines become line breaks, everything else becomes
/// plain runs. After this pass no pending text remains.
pub fn split_text_runs(segments: Vec<Segment>) -> Vec<Segment> {
    map_text(segments, |text| {
        let mut out = Vec::new();
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                out.push(Segment::Done(Block::LineBreak));
            }
            if !part.is_empty() {
                out.push(Segment::Done(Block::PlainRun(part.to_string())));
            }
        }
        out
    })
}
