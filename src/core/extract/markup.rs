use std::{path::Path, sync::LazyLock};

use glob::Pattern;
use regex::bytes::Regex;

use super::{TokenExtractor, TokenUsage, token_text};

// Everything up to a `| translate` pipe, stopping at `{` or `"` so the
// expression never reaches back past the interpolation or attribute start.
static TRANSLATE_PIPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?-u)(?P<code>[^{"]*)\|\s*translate"#).unwrap());

// Every single-quoted literal inside the piped expression is a candidate key.
static QUOTED_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)'(?P<key>.*?)'").unwrap());

static HTML_PATTERN: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("*.html").unwrap());

/// Scanner for Angular templates using the `translate` pipe.
///
/// ```text
/// {{ 'HOME.TITLE' | translate }}
/// <img [alt]="(isNew ? 'ITEM.NEW' : 'ITEM.OLD') | translate">
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupExtractor;

impl TokenExtractor for MarkupExtractor {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn file_pattern(&self) -> &Pattern {
        &HTML_PATTERN
    }

    fn extract<'a>(
        &'a self,
        content: &'a [u8],
        path: &'a Path,
    ) -> Box<dyn Iterator<Item = TokenUsage> + 'a> {
        let usages = TRANSLATE_PIPE_REGEX
            .captures_iter(content)
            .filter_map(|caps| caps.name("code"))
            .flat_map(move |code| {
                QUOTED_KEY_REGEX
                    .captures_iter(code.as_bytes())
                    .filter_map(|caps| caps.name("key"))
                    .map(move |key| TokenUsage {
                        token: token_text(key.as_bytes()),
                        begin: code.start() + key.start(),
                        length: key.len(),
                        full_filename: path.to_path_buf(),
                    })
            });
        Box::new(usages)
    }
}
