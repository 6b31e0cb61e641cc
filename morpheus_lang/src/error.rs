// Error type for loading morphology data and conjugating verbs.
//
// Two families share one enum. Load-time integrity failures
// (`DuplicateVerb`, `MalformedEntry`, `IncompleteRuleSet`, `DuplicateRule`,
// `MalformedRule`, `LexiconSyntax`, `Json`, `Io`) stop an engine from being
// built at all. Query-time failures (`NotFound`, `InvalidStemChange`) abort
// only the call that hit them and leave the shared tables untouched.

use crate::types::{Cell, StemChange, SuffixGroup};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MorphError {
    #[error("verb '{infinitive}' not found in lexicon")]
    NotFound { infinitive: String },

    #[error("verb '{infinitive}' is registered more than once")]
    DuplicateVerb { infinitive: String },

    #[error("malformed lexicon entry '{infinitive}': {reason}")]
    MalformedEntry { infinitive: String, reason: String },

    #[error("rule table has no -{group} rule for {cell}")]
    IncompleteRuleSet { group: SuffixGroup, cell: Cell },

    #[error("rule table has more than one -{group} rule for {cell}")]
    DuplicateRule { group: SuffixGroup, cell: Cell },

    #[error("malformed morphology rule: {0}")]
    MalformedRule(String),

    #[error("'{infinitive}' is marked {pattern} but stem '{stem}' has no matching vowel ({cell})")]
    InvalidStemChange {
        infinitive: String,
        cell: Cell,
        pattern: StemChange,
        stem: String,
    },

    #[error("lexicon line {line}: {message}")]
    LexiconSyntax { line: usize, message: String },

    #[error("invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = MorphError> = std::result::Result<T, E>;
