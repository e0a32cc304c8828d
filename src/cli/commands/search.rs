use std::path::Path;

use anyhow::Result;

use super::helper::{load_settings, relative_to};
use super::{CommandResult, CommandSummary, SearchHit, SearchSummary};
use crate::cli::args::SearchCommand;
use crate::core::{
    NodeId, NodeKind, Tree,
    preview::load_preview,
    search::find_next,
};

/// List every node matching the text. A search without hits is a finding.
pub fn search(cmd: SearchCommand) -> Result<CommandResult> {
    let settings = load_settings(&cmd.common)?;
    let mut controller = settings.controller();
    controller.scan()?;
    let tree = controller.tree();

    let hits = collect_hits(tree, &cmd.text)
        .into_iter()
        .map(|id| search_hit(tree, id, &cmd.text, &settings.source_root))
        .collect::<Result<Vec<_>>>()?;
    let misses = usize::from(hits.is_empty());

    Ok(CommandResult::new(CommandSummary::Search(SearchSummary {
        text: cmd.text,
        hits,
    }))
    .with_findings(misses))
}

/// Follow "find next" from the top until it wraps around to the first hit.
fn collect_hits(tree: &Tree, text: &str) -> Vec<NodeId> {
    let Some(first) = find_next(tree, None, text) else {
        return Vec::new();
    };
    let mut hits = vec![first];
    let mut current = first;
    while let Some(next) = find_next(tree, Some(current), text) {
        if next == first {
            break;
        }
        hits.push(next);
        current = next;
    }
    hits
}

fn search_hit(tree: &Tree, id: NodeId, text: &str, source_root: &Path) -> Result<SearchHit> {
    let node = tree.node(id);
    let search = text.trim().to_lowercase();
    let file = node
        .full_filename()
        .map(|f| relative_to(f, source_root).display().to_string());

    let (translations, usages) = match &node.kind {
        NodeKind::Key(item) => {
            let translations = item
                .translations
                .iter()
                .filter_map(|t| {
                    let text = t.text.as_deref()?;
                    text.to_lowercase()
                        .contains(&search)
                        .then(|| (t.language.clone(), text.to_string()))
                })
                .collect();
            let usages = item
                .usages
                .iter()
                .map(load_preview)
                .collect::<Result<Vec<_>, _>>()?;
            (translations, usages)
        }
        _ => (Vec::new(), Vec::new()),
    };

    Ok(SearchHit {
        path: tree.display_path(id),
        is_key: node.is_key(),
        file,
        translations,
        usages,
    })
}
