// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paginated export of a stored plan.
//!
//! Lays the plan text out the way the printable export does: a title on the
//! first page, fixed-width wrapped lines, and a fixed number of lines per page.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const DOCUMENT_TITLE: &str = "Workout Plan";

/// Page geometry for the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Maximum characters per line
    pub line_width: usize,
    /// Body lines on the first page (below the title)
    pub first_page_lines: usize,
    /// Body lines on every later page
    pub page_lines: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            line_width: 90,
            first_page_lines: 25,
            page_lines: 28,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanDocument {
    pub title: String,
    pub pages: Vec<Vec<String>>,
}

/// Wrap one paragraph line to `width` characters, breaking on whitespace.
///
/// Leading indentation is kept on the first output line. Words longer than
/// `width` are split.
fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let width = width.max(1);
    let body = line.trim_start();
    let mut current = line[..line.len() - body.len()].to_string();
    let mut current_len = current.chars().count();
    let mut has_words = false;

    for word in body.split_whitespace() {
        let mut word: &str = word;
        loop {
            let word_len = word.chars().count();
            let needed = if has_words {
                current_len + 1 + word_len
            } else {
                current_len + word_len
            };

            if needed <= width {
                if has_words {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(word);
                current_len += word_len;
                has_words = true;
                break;
            }

            if has_words {
                out.push(std::mem::take(&mut current));
                current_len = 0;
                has_words = false;
                continue;
            }

            if current_len > 0 {
                // Indentation alone leaves no room; drop it.
                current.clear();
                current_len = 0;
                continue;
            }

            // Word alone is wider than a line.
            let split_at = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            out.push(word[..split_at].to_string());
            word = &word[split_at..];
            if word.is_empty() {
                break;
            }
        }
    }

    if has_words || out.is_empty() {
        out.push(current);
    }
}

/// Wrap plan text into display lines. Blank lines are kept.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut wrapped = Vec::new();
        wrap_line(raw, width, &mut wrapped);
        lines.extend(wrapped);
    }
    lines
}

/// Lay out `text` into pages.
///
/// Always yields at least one page, even for empty text.
pub fn paginate(text: &str, layout: PageLayout) -> PlanDocument {
    let lines = wrap_text(text, layout.line_width);
    let first = layout.first_page_lines.max(1);
    let rest = layout.page_lines.max(1);

    let mut pages = Vec::new();
    let split = first.min(lines.len());
    pages.push(lines[..split].to_vec());
    for chunk in lines[split..].chunks(rest) {
        pages.push(chunk.to_vec());
    }

    PlanDocument {
        title: DOCUMENT_TITLE.to_string(),
        pages,
    }
}
