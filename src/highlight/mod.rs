//! Syntax highlighting for documents.
//!
//! The editor core only consumes a per-byte array of [`HighlightCategory`]
//! tags. [`SyntectHighlighter`] produces one with syntect's parser and a
//! fixed scope-prefix table; rendering decides what each category looks
//! like.

use std::path::Path;
use std::sync::OnceLock;

use syntect::parsing::{ParseState, ParsingError, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

/// Semantic class of one byte of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightCategory {
    #[default]
    Default,
    Comment,
    String,
    Number,
    Keyword,
    Function,
    Type,
    Operator,
    Punctuation,
    Escape,
    Attribute,
    Constant,
    Variable,
}

impl HighlightCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Default,
        Self::Comment,
        Self::String,
        Self::Number,
        Self::Keyword,
        Self::Function,
        Self::Type,
        Self::Operator,
        Self::Punctuation,
        Self::Escape,
        Self::Attribute,
        Self::Constant,
        Self::Variable,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Number => "number",
            Self::Keyword => "keyword",
            Self::Function => "function",
            Self::Type => "type",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::Escape => "escape",
            Self::Attribute => "attribute",
            Self::Constant => "constant",
            Self::Variable => "variable",
        }
    }
}

/// Failure of a highlight pass. The document keeps its previous array.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("no syntax available for language `{0}`")]
    UnsupportedLanguage(String),
    #[error("source is not valid UTF-8")]
    InvalidUtf8,
    #[error("syntax parse failed: {0}")]
    Parse(#[from] ParsingError),
    #[error("scope stack error: {0}")]
    Scope(String),
}

/// Something that can classify every byte of a source text.
pub trait Highlighter {
    /// Return exactly one category per byte of `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`HighlightError`] if the language is unknown, the source
    /// is not UTF-8, or the parser fails.
    fn highlight(
        &self,
        source: &[u8],
        language: &str,
    ) -> Result<Vec<HighlightCategory>, HighlightError>;
}

/// Highlighter backed by syntect's bundled syntax definitions.
#[derive(Debug, Clone, Copy)]
pub struct SyntectHighlighter {
    syntaxes: &'static SyntaxSet,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: syntax_set(),
        }
    }

    fn find_syntax(&self, language: &str) -> Option<&'static SyntaxReference> {
        let syntaxes = self.syntaxes;
        syntaxes
            .find_syntax_by_name(language)
            .or_else(|| syntaxes.find_syntax_by_token(language))
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(
        &self,
        source: &[u8],
        language: &str,
    ) -> Result<Vec<HighlightCategory>, HighlightError> {
        let _scope = crate::perf::scope("highlight.pass");
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::UnsupportedLanguage(language.to_string()))?;
        let text = std::str::from_utf8(source).map_err(|_| HighlightError::InvalidUtf8)?;

        let mut categories = Vec::with_capacity(source.len());
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();

        for line in LinesWithEndings::from(text) {
            let ops = state.parse_line(line, self.syntaxes)?;
            let mut last = 0;
            for (index, op) in ops {
                fill(&mut categories, category_for(&stack), index - last);
                last = index;
                stack
                    .apply(&op)
                    .map_err(|e| HighlightError::Scope(format!("{e:?}")))?;
            }
            fill(&mut categories, category_for(&stack), line.len() - last);
        }

        debug_assert_eq!(categories.len(), source.len());
        tracing::debug!(language = syntax.name.as_str(), bytes = source.len(), "highlight pass");
        Ok(categories)
    }
}

/// Name of the syntax matching the extension of `path`, if any.
pub fn language_for_path(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    syntax_set()
        .find_syntax_by_extension(extension)
        .map(|syntax| syntax.name.clone())
}

fn fill(categories: &mut Vec<HighlightCategory>, category: HighlightCategory, count: usize) {
    categories.extend(std::iter::repeat_n(category, count));
}

/// Classify the current scope stack, innermost scope first.
///
/// Delimiter punctuation (quotes, comment markers) takes the category of
/// the construct it delimits and only falls back to punctuation when
/// nothing encloses it.
fn category_for(stack: &ScopeStack) -> HighlightCategory {
    let table = scope_table();
    let mut fallback = HighlightCategory::Default;
    for scope in stack.as_slice().iter().rev() {
        if table.delimiter.is_some_and(|d| d.is_prefix_of(*scope)) {
            fallback = HighlightCategory::Punctuation;
            continue;
        }
        if let Some((_, category)) = table
            .prefixes
            .iter()
            .find(|(prefix, _)| prefix.is_prefix_of(*scope))
        {
            return *category;
        }
    }
    fallback
}

/// More specific prefixes come first.
const SCOPE_CATEGORIES: &[(&str, HighlightCategory)] = &[
    ("comment", HighlightCategory::Comment),
    ("string", HighlightCategory::String),
    ("constant.numeric", HighlightCategory::Number),
    ("constant.character.escape", HighlightCategory::Escape),
    ("constant", HighlightCategory::Constant),
    ("keyword.operator", HighlightCategory::Operator),
    ("keyword", HighlightCategory::Keyword),
    ("storage.type.function", HighlightCategory::Keyword),
    ("storage.modifier", HighlightCategory::Keyword),
    ("entity.name.function", HighlightCategory::Function),
    ("support.function", HighlightCategory::Function),
    ("entity.name.type", HighlightCategory::Type),
    ("entity.name.class", HighlightCategory::Type),
    ("entity.name.struct", HighlightCategory::Type),
    ("entity.name.enum", HighlightCategory::Type),
    ("storage.type", HighlightCategory::Type),
    ("support.type", HighlightCategory::Type),
    ("support.class", HighlightCategory::Type),
    ("storage", HighlightCategory::Keyword),
    ("entity.other.attribute-name", HighlightCategory::Attribute),
    ("meta.attribute", HighlightCategory::Attribute),
    ("meta.annotation", HighlightCategory::Attribute),
    ("punctuation", HighlightCategory::Punctuation),
    ("variable.function", HighlightCategory::Function),
    ("variable", HighlightCategory::Variable),
];

struct ScopeTable {
    delimiter: Option<Scope>,
    prefixes: Vec<(Scope, HighlightCategory)>,
}

fn scope_table() -> &'static ScopeTable {
    static TABLE: OnceLock<ScopeTable> = OnceLock::new();
    TABLE.get_or_init(|| ScopeTable {
        delimiter: Scope::new("punctuation.definition").ok(),
        prefixes: SCOPE_CATEGORIES
            .iter()
            .filter_map(|(prefix, category)| {
                Scope::new(prefix).ok().map(|scope| (scope, *category))
            })
            .collect(),
    })
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}
