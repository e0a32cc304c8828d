use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use tracing::debug;

use crate::cli::args::CommonArgs;
use crate::config::Settings;
use crate::core::{NodeId, Tree};

/// Settings for the current directory with the command line applied.
pub fn load_settings(common: &CommonArgs) -> Result<Settings> {
    let cwd = env::current_dir()?;
    let settings = Settings::load(&cwd, &common.overrides())?;
    debug!(
        source_root = %settings.source_root.display(),
        i18n_root = %settings.i18n_root.display(),
        languages = ?settings.languages,
        from_file = settings.from_file,
        "settings loaded"
    );
    Ok(settings)
}

/// Key nodes for `key`, narrowed to source files ending with `file`.
pub fn matching_key_nodes(tree: &Tree, key: &str, file: Option<&Path>) -> Vec<NodeId> {
    let file = file.map(|f| f.strip_prefix(".").unwrap_or(f));
    tree.find_keys(key, None)
        .into_iter()
        .filter(|id| match file {
            Some(file) => tree
                .node(*id)
                .full_filename()
                .is_some_and(|full| full.ends_with(file)),
            None => true,
        })
        .collect()
}

/// The single key node for `key`. Fails when the key is unused or when it
/// appears in several files and `file` does not pick one.
pub fn resolve_key_node(tree: &Tree, key: &str, file: Option<&Path>) -> Result<NodeId> {
    match matching_key_nodes(tree, key, file).as_slice() {
        [id] => Ok(*id),
        [] => match file {
            Some(file) => bail!("Key \"{}\" is not used in {}", key, file.display()),
            None => bail!("Key \"{}\" is not used in any source file", key),
        },
        many => {
            let files = many
                .iter()
                .filter_map(|id| tree.node(*id).full_filename())
                .map(|f| f.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            bail!(
                "Key \"{}\" is used in {} files ({}); select one with --file",
                key,
                many.len(),
                files
            )
        }
    }
}

/// `path` relative to `root` when it lies below it.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
