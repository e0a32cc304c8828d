//! Report formatting and printing utilities.
//!
//! Prints command results in a cargo-like style. Kept apart from the core so
//! ngloc can be used as a library.

use std::{
    fmt::Display,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, InitSummary, RenameSummary, SearchSummary,
    TranslateSummary,
};
use super::commands::helper::relative_to;
use crate::config::CONFIG_FILE_NAME;
use crate::core::{KeyAction, NodeId, Tree, preview::UsagePreview};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Indentation per tree level.
const INDENT: usize = 2;

pub fn print(result: &CommandResult) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Scan(summary) => print_tree_to(&summary.tree, summary.missing_only, &mut stdout),
        CommandSummary::Extract(summary) => print_extract_to(summary, &mut stdout),
        CommandSummary::Rename(summary) => print_rename_to(summary, &mut stdout),
        CommandSummary::Translate(summary) => print_translate_to(summary, &mut stdout),
        CommandSummary::Search(summary) => print_search_to(summary, &mut stdout),
        CommandSummary::Watch(_) => {}
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print an error that did not stop the command.
pub fn print_error(err: &impl Display) {
    let _ = writeln!(io::stderr().lock(), "{} {}", "error:".bold().red(), err);
}

pub fn print_watching(source_root: &Path, i18n_root: &Path) {
    println!(
        "{} {} and {} (press Ctrl-C to stop)",
        "Watching".bold().cyan(),
        source_root.display(),
        i18n_root.display()
    );
}

/// Print the key tree to stdout.
pub fn print_tree(tree: &Tree, missing_only: bool) {
    print_tree_to(tree, missing_only, &mut io::stdout().lock());
}

/// Print the key tree with key counts and missing translations per node.
///
/// Conventional keys show without their namespace, other keys in bold and
/// malformed keys dimmed. With `missing_only`, fully translated branches are
/// left out.
pub fn print_tree_to<W: Write>(tree: &Tree, missing_only: bool, writer: &mut W) {
    let mut rows = Vec::new();
    for id in tree.root_items() {
        collect_rows(tree, *id, 0, missing_only, &mut rows);
    }

    let width = rows
        .iter()
        .map(|row| row.depth * INDENT + UnicodeWidthStr::width(row.label.as_str()))
        .max()
        .unwrap_or(0);

    let count_width = rows.iter().map(|row| row.count.len()).max().unwrap_or(0);

    for row in &rows {
        let padding = width - row.depth * INDENT - UnicodeWidthStr::width(row.label.as_str());
        let line = format!(
            "{:indent$}{}{:padding$}  {}",
            "",
            row.styled_label(),
            "",
            row.columns(count_width),
            indent = row.depth * INDENT,
            padding = padding
        );
        let _ = writeln!(writer, "{}", line.trim_end());
    }

    print_tree_summary(tree, writer);
}

pub fn print_extract_to<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    match &summary.output {
        Some(output) => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Wrote {} {} to {}",
                    summary.keys.len(),
                    plural(summary.keys.len(), "key", "keys"),
                    output.display()
                )
                .green()
            );
        }
        None => {
            for key in &summary.keys {
                let _ = writeln!(writer, "{}", key);
            }
        }
    }
}

pub fn print_rename_to<W: Write>(summary: &RenameSummary, writer: &mut W) {
    let outcome = &summary.outcome;
    let _ = writeln!(
        writer,
        "{} {} {} {} {}",
        SUCCESS_MARK.green(),
        "Renamed".green(),
        outcome.old_key.bold(),
        "->".dimmed(),
        outcome.new_key.bold()
    );
    let _ = writeln!(
        writer,
        "  {} {} ({} {})",
        "-->".blue(),
        relative_to(&outcome.source_file, &summary.source_root).display(),
        outcome.replaced,
        plural(outcome.replaced, "usage", "usages")
    );
    for catalog in &outcome.catalogs {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), catalog.display());
    }
}

pub fn print_translate_to<W: Write>(summary: &TranslateSummary, writer: &mut W) {
    let message = match summary.action {
        Some(KeyAction::Added) => format!(
            "Added {} translation for {}",
            summary.language, summary.key
        ),
        Some(KeyAction::Updated) => format!(
            "Updated {} translation for {}",
            summary.language, summary.key
        ),
        None => format!(
            "{} translation for {} is unchanged",
            summary.language, summary.key
        ),
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
    let _ = writeln!(writer, "  {} {}", "-->".blue(), summary.catalog.display());
}

pub fn print_search_to<W: Write>(summary: &SearchSummary, writer: &mut W) {
    for hit in &summary.hits {
        let kind = if hit.is_key { "key" } else if hit.file.is_some() { "file" } else { "folder" };
        let _ = writeln!(writer, "{}  {}", hit.path.bold(), kind.dimmed().cyan());

        if let Some(file) = &hit.file
            && hit.is_key
        {
            let width = hit
                .usages
                .iter()
                .map(|u| u.line.to_string().len())
                .max()
                .unwrap_or(1);
            for usage in &hit.usages {
                print_usage(file, usage, width, writer);
            }
        }
        for (language, text) in &hit.translations {
            let _ = writeln!(writer, "  {} {}: {}", "=".blue(), language.bold(), text);
        }
        let _ = writeln!(writer);
    }

    let count = summary.hits.len();
    if count == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("No matches for \"{}\"", summary.text).red()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} {} for \"{}\"",
                count,
                plural(count, "match", "matches"),
                summary.text
            )
            .green()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

struct TreeRow {
    depth: usize,
    label: String,
    count: String,
    missing: String,
    is_key: bool,
    is_default_key: bool,
    is_valid: bool,
}

impl TreeRow {
    fn styled_label(&self) -> String {
        if !self.is_valid {
            self.label.dimmed().to_string()
        } else if self.is_key && !self.is_default_key {
            self.label.bold().to_string()
        } else if !self.is_key {
            self.label.cyan().to_string()
        } else {
            self.label.clone()
        }
    }

    /// Key count and missing translations. Key rows have no count, so their
    /// missing languages take the count column.
    fn columns(&self, count_width: usize) -> String {
        let missing = if self.missing.is_empty() {
            String::new()
        } else {
            self.missing.red().to_string()
        };
        if self.count.is_empty() {
            missing
        } else {
            format!(
                "{:<count_width$}  {}",
                self.count,
                missing,
                count_width = count_width
            )
        }
    }
}

fn collect_rows(tree: &Tree, id: NodeId, depth: usize, missing_only: bool, rows: &mut Vec<TreeRow>) {
    let node = tree.node(id);
    if missing_only && !node.has_missing_translations() {
        return;
    }

    let (count, missing) = match node.key_item() {
        Some(item) => (
            String::new(),
            item.translations
                .iter()
                .filter(|t| t.is_missing())
                .map(|t| t.language.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        None => (
            format!(
                "{} {}",
                node.text_count(),
                plural(node.text_count(), "key", "keys")
            ),
            node.missing_label(),
        ),
    };

    rows.push(TreeRow {
        depth,
        label: tree.label(id),
        count,
        missing,
        is_key: node.is_key(),
        is_default_key: node.is_default_key,
        is_valid: node.is_valid(),
    });

    for child in tree.children(id) {
        collect_rows(tree, *child, depth + 1, missing_only, rows);
    }
}

fn print_tree_summary<W: Write>(tree: &Tree, writer: &mut W) {
    let root = tree.node(tree.root());
    let keys = root.text_count();
    let missing = root.missing_count();

    if keys == 0 {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), "No keys found".green());
    } else if missing == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} {}, all translated", keys, plural(keys, "key", "keys")).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "\n{} {} missing {} in {} {} ({})",
            FAILURE_MARK.red(),
            missing,
            plural(missing, "translation", "translations").red(),
            keys,
            plural(keys, "key", "keys"),
            root.missing_label()
        );
    }
}

fn print_usage<W: Write>(file: &str, usage: &UsagePreview, width: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        file,
        usage.line,
        usage.column
    );

    let prefix = usage.before.rsplit('\n').next().unwrap_or_default();
    let suffix = usage.after.split('\n').next().unwrap_or_default();
    let source_line = format!("{}{}{}", prefix, usage.key, suffix);
    let caret_padding = UnicodeWidthStr::width(prefix);
    let carets = "^".repeat(UnicodeWidthStr::width(usage.key.as_str()).max(1));

    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        usage.line.to_string().blue(),
        "|".blue(),
        source_line.trim_end(),
        width = width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        carets.yellow(),
        width = width,
        padding = caret_padding
    );
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        eprintln!("Error: {}", error);
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

// ============================================================
// Tests
// ============================================================
