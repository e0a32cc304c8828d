//! Source context around a token usage, for showing where a key is used.

use std::fs;

use crate::core::{
    error::{LocalizerError, LocalizerResult},
    extract::TokenUsage,
};

/// Bytes of context read on each side of a usage.
pub const CONTEXT_BYTES: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsagePreview {
    /// 1-based line of the first key byte.
    pub line: usize,
    /// 1-based byte column of the first key byte.
    pub column: usize,
    /// Whole lines before the key, up to the key.
    pub before: String,
    pub key: String,
    /// Rest of the line after the key plus whole following lines.
    pub after: String,
}

/// Read the usage's file and build its preview.
pub fn load_preview(usage: &TokenUsage) -> LocalizerResult<UsagePreview> {
    let content =
        fs::read(&usage.full_filename).map_err(|e| LocalizerError::scan_io(&usage.full_filename, e))?;
    Ok(preview(&content, usage))
}

/// Preview of `usage` inside `content`. Offsets past the end are clamped.
pub fn preview(content: &[u8], usage: &TokenUsage) -> UsagePreview {
    let begin = usage.begin.min(content.len());
    let end = usage.end().min(content.len());

    let before_start = begin.saturating_sub(CONTEXT_BYTES);
    let mut before = &content[before_start..begin];
    if before_start > 0
        && let Some(newline) = before.iter().position(|b| *b == b'\n')
    {
        before = &before[newline + 1..];
    }

    let after_end = (end + CONTEXT_BYTES).min(content.len());
    let mut after = &content[end..after_end];
    if after_end < content.len()
        && let Some(newline) = after.iter().rposition(|b| *b == b'\n')
    {
        after = &after[..newline];
    }

    let line_start = content[..begin]
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |i| i + 1);
    UsagePreview {
        line: content[..begin].iter().filter(|b| **b == b'\n').count() + 1,
        column: begin - line_start + 1,
        before: text(before),
        key: text(&content[begin..end]),
        after: text(after),
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\r', "")
}
