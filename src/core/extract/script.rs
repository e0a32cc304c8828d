use std::{path::Path, sync::LazyLock};

use glob::Pattern;
use regex::bytes::Regex;

use super::{TokenExtractor, TokenUsage, token_text};

// translateService.instant('KEY', ...) or translateService.get('KEY', ...)
static TRANSLATE_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)translateService\.(instant|get)\('(?P<key>.*?)'.*?\)").unwrap()
});

static TS_PATTERN: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("*.ts").unwrap());

/// Scanner for TypeScript calls into ngx-translate's `TranslateService`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptExtractor;

impl TokenExtractor for ScriptExtractor {
    fn name(&self) -> &'static str {
        "script"
    }

    fn file_pattern(&self) -> &Pattern {
        &TS_PATTERN
    }

    fn extract<'a>(
        &'a self,
        content: &'a [u8],
        path: &'a Path,
    ) -> Box<dyn Iterator<Item = TokenUsage> + 'a> {
        let usages = TRANSLATE_CALL_REGEX
            .captures_iter(content)
            .filter_map(|caps| caps.name("key"))
            .map(move |key| TokenUsage {
                token: token_text(key.as_bytes()),
                begin: key.start(),
                length: key.len(),
                full_filename: path.to_path_buf(),
            });
        Box::new(usages)
    }
}
